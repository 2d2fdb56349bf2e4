//! 节点领域对象
//!
//! `kubectl get nodes` 输出的类型化视图。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::age::age_to_minutes;
use crate::error::{required, Result};

/// `kubectl get nodes` 的允许表头集合
pub const NODE_HEADERS: [&str; 5] = ["NAME", "STATUS", "ROLES", "AGE", "VERSION"];

/// Kubernetes 节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 节点名
    pub name: String,
    /// 状态（Ready / NotReady，可能带 SchedulingDisabled 注记）
    pub status: String,
    /// 角色列表（逗号分隔的原始文本）
    pub roles: String,
    /// 年龄原始文本
    pub age: String,
    /// kubelet 版本
    pub version: String,
}

impl Node {
    /// 从 `kubectl get nodes` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "Node", "NAME")?.to_string(),
            status: required(record, "Node", "STATUS")?.to_string(),
            roles: required(record, "Node", "ROLES")?.to_string(),
            age: required(record, "Node", "AGE")?.to_string(),
            version: required(record, "Node", "VERSION")?.to_string(),
        })
    }

    /// 是否就绪（带注记的 `Ready,SchedulingDisabled` 也算就绪）
    pub fn is_ready(&self) -> bool {
        self.status == "Ready" || self.status.starts_with("Ready,")
    }

    /// 年龄换算为分钟
    pub fn age_minutes(&self) -> Result<u64> {
        age_to_minutes(&self.age)
    }
}
