//! Pod 领域对象
//!
//! `kubectl get pods [-o wide]` 输出的类型化视图。
//! NAMESPACE 列只在 `--all-namespaces` 下出现，作为可选字段处理；
//! `-o wide` 追加的 IP / NODE 列同理。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::age::age_to_minutes;
use crate::error::{required, KubeError, Result};

/// `kubectl get pods` 的允许表头集合（含 `-o wide` 追加列）
pub const POD_HEADERS: [&str; 10] = [
    "NAMESPACE",
    "NAME",
    "READY",
    "STATUS",
    "RESTARTS",
    "AGE",
    "IP",
    "NODE",
    "NOMINATED NODE",
    "READINESS GATES",
];

/// Pod 健康状态集合
pub fn healthy_statuses() -> HashSet<&'static str> {
    ["Running", "Succeeded", "Completed"].into_iter().collect()
}

/// Pod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    /// 命名空间（`--all-namespaces` 输出才有）
    pub namespace: Option<String>,
    /// Pod 名
    pub name: String,
    /// 就绪计数（`x/y` 原始文本）
    pub ready: String,
    /// 生命周期状态
    pub status: String,
    /// 重启次数（原始文本，可能带 `(3h ago)` 注记）
    pub restarts: String,
    /// 年龄原始文本
    pub age: String,
    /// Pod IP（`-o wide` 输出才有）
    pub ip: Option<String>,
    /// 所在节点（`-o wide` 输出才有）
    pub node: Option<String>,
}

impl Pod {
    /// 从 `kubectl get pods` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        let optional = |field: &str| {
            record
                .get(field)
                .filter(|v| !v.is_empty() && *v != "<none>")
                .map(str::to_string)
        };
        Ok(Self {
            namespace: optional("NAMESPACE"),
            name: required(record, "Pod", "NAME")?.to_string(),
            ready: required(record, "Pod", "READY")?.to_string(),
            status: required(record, "Pod", "STATUS")?.to_string(),
            restarts: required(record, "Pod", "RESTARTS")?.to_string(),
            age: required(record, "Pod", "AGE")?.to_string(),
            ip: optional("IP"),
            node: optional("NODE"),
        })
    }

    /// 年龄换算为分钟
    pub fn age_minutes(&self) -> Result<u64> {
        age_to_minutes(&self.age)
    }

    /// 就绪计数是否齐全（`x/y` 中 x == y）
    pub fn is_ready(&self) -> bool {
        match self.ready.split_once('/') {
            Some((current, desired)) => !desired.is_empty() && current == desired,
            None => false,
        }
    }

    /// 状态是否属于健康集合
    pub fn is_healthy_status(&self) -> bool {
        healthy_statuses().contains(self.status.as_str())
    }

    /// 整体健康：状态健康，且运行中的 Pod 就绪计数齐全
    pub fn is_healthy(&self) -> bool {
        if !self.is_healthy_status() {
            return false;
        }
        if self.status == "Running" {
            return self.is_ready();
        }
        true
    }

    /// 重启次数（剥离 `(3h ago)` 一类的注记）
    pub fn restart_count(&self) -> Result<u32> {
        let digits: String = self
            .restarts
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().map_err(|_| KubeError::InvalidField {
            entity: "Pod",
            field: "RESTARTS",
            value: self.restarts.clone(),
        })
    }
}
