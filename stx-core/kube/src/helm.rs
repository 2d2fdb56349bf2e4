//! Helm 发布领域对象
//!
//! `kubectl get helmrelease` 输出的类型化视图。应用级编排里
//! `Ready=True` 且状态为已部署描述是发布的成功终态。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::age::age_to_minutes;
use crate::error::{required, Result};

/// `kubectl get helmrelease` 的允许表头集合
pub const HELM_RELEASE_HEADERS: [&str; 4] = ["NAME", "AGE", "READY", "STATUS"];

/// Helm 发布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelmRelease {
    /// 发布名
    pub name: String,
    /// 年龄原始文本
    pub age: String,
    /// 就绪标志（True / False / Unknown）
    pub ready: String,
    /// 状态描述
    pub status: String,
}

impl HelmRelease {
    /// 从 `kubectl get helmrelease` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "HelmRelease", "NAME")?.to_string(),
            age: required(record, "HelmRelease", "AGE")?.to_string(),
            ready: required(record, "HelmRelease", "READY")?.to_string(),
            status: required(record, "HelmRelease", "STATUS")?.to_string(),
        })
    }

    /// 是否已达成功终态
    pub fn is_deployed(&self) -> bool {
        self.ready == "True"
    }

    /// 年龄换算为分钟
    pub fn age_minutes(&self) -> Result<u64> {
        age_to_minutes(&self.age)
    }
}
