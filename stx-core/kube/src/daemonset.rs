//! DaemonSet 领域对象
//!
//! `kubectl get daemonsets` 输出的类型化视图。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, KubeError, Result};

/// `kubectl get daemonsets` 的允许表头集合
pub const DAEMONSET_HEADERS: [&str; 9] = [
    "NAMESPACE",
    "NAME",
    "DESIRED",
    "CURRENT",
    "READY",
    "UP-TO-DATE",
    "AVAILABLE",
    "NODE SELECTOR",
    "AGE",
];

/// DaemonSet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonSet {
    /// 命名空间（`--all-namespaces` 输出才有）
    pub namespace: Option<String>,
    /// 名称
    pub name: String,
    /// 期望副本数
    pub desired: u32,
    /// 当前副本数
    pub current: u32,
    /// 就绪副本数
    pub ready: u32,
    /// 已更新副本数
    pub up_to_date: u32,
    /// 可用副本数
    pub available: u32,
    /// 节点选择器原始文本
    pub node_selector: String,
    /// 年龄原始文本
    pub age: String,
}

impl DaemonSet {
    /// 从 `kubectl get daemonsets` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        let count = |field: &'static str| -> Result<u32> {
            let raw = required(record, "DaemonSet", field)?;
            raw.parse().map_err(|_| KubeError::InvalidField {
                entity: "DaemonSet",
                field,
                value: raw.to_string(),
            })
        };
        Ok(Self {
            namespace: record
                .get("NAMESPACE")
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            name: required(record, "DaemonSet", "NAME")?.to_string(),
            desired: count("DESIRED")?,
            current: count("CURRENT")?,
            ready: count("READY")?,
            up_to_date: count("UP-TO-DATE")?,
            available: count("AVAILABLE")?,
            node_selector: required(record, "DaemonSet", "NODE SELECTOR")?.to_string(),
            age: required(record, "DaemonSet", "AGE")?.to_string(),
        })
    }

    /// 每个期望副本都已就绪
    pub fn is_fully_ready(&self) -> bool {
        self.desired == self.ready && self.desired == self.available
    }
}
