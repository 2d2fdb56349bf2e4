//! 告警与事件领域对象
//!
//! `fm alarm-list` / `fm event-list` 输出的类型化视图。
//! 告警身份由 `(alarm_id, entity_id)` 决定：同一告警在轮询间
//! 时间戳会变，去重和消失判定都不应受其影响。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, Result};

/// `fm alarm-list` 的允许表头集合
pub const ALARM_LIST_HEADERS: [&str; 5] = [
    "Alarm ID",
    "Reason Text",
    "Entity ID",
    "Severity",
    "Time Stamp",
];

/// `fm event-list` 的允许表头集合
pub const EVENT_LIST_HEADERS: [&str; 6] = [
    "Time Stamp",
    "State",
    "Event Log ID",
    "Reason Text",
    "Entity Instance ID",
    "Severity",
];

/// 活动告警
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    /// 告警编号（如 `100.104`）
    pub alarm_id: String,
    /// 告警原因描述
    pub reason_text: String,
    /// 告警实体标识
    pub entity_id: String,
    /// 严重级别（critical / major / minor / warning）
    pub severity: String,
    /// 上报时间戳（保留原始文本）
    pub time_stamp: String,
}

impl PartialEq for Alarm {
    fn eq(&self, other: &Self) -> bool {
        self.alarm_id == other.alarm_id && self.entity_id == other.entity_id
    }
}

impl Eq for Alarm {}

impl std::hash::Hash for Alarm {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.alarm_id.hash(state);
        self.entity_id.hash(state);
    }
}

impl Alarm {
    /// 从 `fm alarm-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            alarm_id: required(record, "Alarm", "Alarm ID")?.to_string(),
            reason_text: required(record, "Alarm", "Reason Text")?.to_string(),
            entity_id: required(record, "Alarm", "Entity ID")?.to_string(),
            severity: required(record, "Alarm", "Severity")?.to_string(),
            time_stamp: required(record, "Alarm", "Time Stamp")?.to_string(),
        })
    }

    /// 是否匹配指定告警编号与可选的实体子串
    pub fn matches(&self, alarm_id: &str, entity_contains: Option<&str>) -> bool {
        if self.alarm_id != alarm_id {
            return false;
        }
        match entity_contains {
            Some(fragment) => self.entity_id.contains(fragment),
            None => true,
        }
    }
}

/// 按告警编号筛选
pub fn alarms_with_id<'a>(alarms: &'a [Alarm], alarm_id: &str) -> Vec<&'a Alarm> {
    alarms.iter().filter(|a| a.alarm_id == alarm_id).collect()
}

/// 按实体标识子串筛选
pub fn alarms_with_entity<'a>(alarms: &'a [Alarm], fragment: &str) -> Vec<&'a Alarm> {
    alarms
        .iter()
        .filter(|a| a.entity_id.contains(fragment))
        .collect()
}

/// 去重：同一 `(alarm_id, entity_id)` 只保留首次出现
pub fn dedup_alarms(alarms: Vec<Alarm>) -> Vec<Alarm> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    alarms
        .into_iter()
        .filter(|a| seen.insert((a.alarm_id.clone(), a.entity_id.clone())))
        .collect()
}

/// 事件记录
///
/// 与告警同源，但带生命周期状态；`set` 表示触发，`clear`
/// 表示消除，`suppressed` 表示被抑制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 上报时间戳
    pub time_stamp: String,
    /// 生命周期状态（set / clear / log / suppressed）
    pub state: String,
    /// 事件编号
    pub event_log_id: String,
    /// 事件原因描述
    pub reason_text: String,
    /// 事件实体标识
    pub entity_instance_id: String,
    /// 严重级别
    pub severity: String,
}

impl Event {
    /// 从 `fm event-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            time_stamp: required(record, "Event", "Time Stamp")?.to_string(),
            state: required(record, "Event", "State")?.to_string(),
            event_log_id: required(record, "Event", "Event Log ID")?.to_string(),
            reason_text: required(record, "Event", "Reason Text")?.to_string(),
            entity_instance_id: required(record, "Event", "Entity Instance ID")?.to_string(),
            severity: required(record, "Event", "Severity")?.to_string(),
        })
    }

    /// 是否处于抑制状态
    pub fn is_suppressed(&self) -> bool {
        self.state == "suppressed"
    }
}
