//! 卷快照领域对象
//!
//! `kubectl get volumesnapshot` 输出的类型化视图。备份恢复
//! 流程用它断言快照就绪与时效。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::age::age_to_minutes;
use crate::error::{required, Result};

/// `kubectl get volumesnapshot` 的允许表头集合
pub const SNAPSHOT_HEADERS: [&str; 8] = [
    "NAME",
    "READYTOUSE",
    "SOURCEPVC",
    "RESTORESIZE",
    "SNAPSHOTCLASS",
    "SNAPSHOTCONTENT",
    "CREATIONTIME",
    "AGE",
];

/// 卷快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSnapshot {
    /// 快照名
    pub name: String,
    /// 是否可用
    pub ready_to_use: bool,
    /// 来源 PVC
    pub source_pvc: String,
    /// 恢复大小原始文本
    pub restore_size: String,
    /// 创建时间（kubectl 的相对时间文本）
    pub creation_time: String,
    /// 年龄原始文本
    pub age: String,
}

impl VolumeSnapshot {
    /// 从 `kubectl get volumesnapshot` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "VolumeSnapshot", "NAME")?.to_string(),
            ready_to_use: required(record, "VolumeSnapshot", "READYTOUSE")? == "true",
            source_pvc: required(record, "VolumeSnapshot", "SOURCEPVC")?.to_string(),
            restore_size: required(record, "VolumeSnapshot", "RESTORESIZE")?.to_string(),
            creation_time: required(record, "VolumeSnapshot", "CREATIONTIME")?.to_string(),
            age: required(record, "VolumeSnapshot", "AGE")?.to_string(),
        })
    }

    /// 年龄换算为分钟
    pub fn age_minutes(&self) -> Result<u64> {
        age_to_minutes(&self.age)
    }

    /// 创建时间换算为分钟（与年龄同一套后缀规则）
    pub fn creation_minutes(&self) -> Result<u64> {
        age_to_minutes(&self.creation_time)
    }
}
