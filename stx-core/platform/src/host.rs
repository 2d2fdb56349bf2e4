//! 主机领域对象
//!
//! `system host-list` / `system host-show` 输出的类型化视图。
//! 列表行提供五元状态，show 输出补充 uptime、capabilities、
//! 子功能等细节字段；缺失的细节字段保持缺省而不是空字符串。

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stx_tabular::{split_csv, PropertyTable, Record};

use crate::error::{required, PlatformError, Result};

/// `system host-list` 的允许表头集合
pub const HOST_LIST_HEADERS: [&str; 6] = [
    "id",
    "hostname",
    "personality",
    "administrative",
    "operational",
    "availability",
];

/// capabilities 字段的宽松解析结果
///
/// 平台把 capabilities 输出为类 Python 字面量的文本
/// （单引号、裸 `None`）。解析前先做归一化；归一化后仍无法
/// 解析时保留原文，不丢数据。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// CLI 输出的原始文本
    pub raw: String,
    /// 归一化后解析出的结构（解析失败时为空）
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
}

fn bare_none_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(^|[^"\w])None([^"\w]|$)"#).expect("固定模式"))
}

impl Capabilities {
    /// 宽松解析 capabilities 文本
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        if raw.is_empty() {
            return Self {
                raw,
                parsed: None,
            };
        }

        // 单引号转双引号，裸 None 转字符串 "None"
        let normalized = raw.replace('\'', "\"");
        let normalized = bare_none_re()
            .replace_all(&normalized, "$1\"None\"$2")
            .to_string();

        let parsed = serde_json::from_str(&normalized).ok();
        if parsed.is_none() {
            debug!("capabilities 无法结构化解析, 保留原文: {:?}", raw);
        }
        Self { raw, parsed }
    }

    /// 按键取字符串值
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.parsed.as_ref()?.get(key)?.as_str()
    }

    /// 控制器角色（`Controller-Active` / `Controller-Standby`）
    pub fn personality(&self) -> Option<&str> {
        self.get_str("Personality")
    }
}

/// 主机
///
/// 值对象：构造一次，只读使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    /// 主机 id
    pub id: u32,
    /// 主机名
    pub name: String,
    /// 角色（controller / worker / storage）
    pub personality: String,
    /// 管理状态（locked / unlocked）
    pub administrative: String,
    /// 运行状态（enabled / disabled）
    pub operational: String,
    /// 可用状态（available / degraded / offline / ...）
    pub availability: String,

    /// 运行秒数（仅 show 输出提供）
    #[serde(default)]
    pub uptime: Option<u64>,
    /// 子功能列表（仅 show 输出提供）
    #[serde(default)]
    pub subfunctions: Vec<String>,
    /// 板管理 IP（仅 show 输出提供）
    #[serde(default)]
    pub bm_ip: Option<String>,
    /// 管理网 IP（仅 show 输出提供）
    #[serde(default)]
    pub mgmt_ip: Option<String>,
    /// 管理网 MAC（仅 show 输出提供）
    #[serde(default)]
    pub mgmt_mac: Option<String>,
    /// capabilities 字段（仅 show 输出提供）
    #[serde(default)]
    pub capabilities: Capabilities,
}

impl Host {
    /// 从 `system host-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        let id_raw = required(record, "Host", "id")?;
        let id = id_raw
            .parse::<u32>()
            .map_err(|_| PlatformError::InvalidField {
                entity: "Host",
                field: "id",
                value: id_raw.to_string(),
            })?;

        Ok(Self {
            id,
            name: required(record, "Host", "hostname")?.to_string(),
            personality: required(record, "Host", "personality")?.to_string(),
            administrative: required(record, "Host", "administrative")?.to_string(),
            operational: required(record, "Host", "operational")?.to_string(),
            availability: required(record, "Host", "availability")?.to_string(),
            uptime: None,
            subfunctions: Vec::new(),
            bm_ip: None,
            mgmt_ip: None,
            mgmt_mac: None,
            capabilities: Capabilities::default(),
        })
    }

    /// 从 `system host-show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        let get_required = |field: &'static str| -> Result<String> {
            props
                .get_str(field)
                .map(str::to_string)
                .ok_or(PlatformError::MissingField {
                    entity: "Host",
                    field,
                })
        };

        let id_raw = get_required("id")?;
        let id = id_raw
            .parse::<u32>()
            .map_err(|_| PlatformError::InvalidField {
                entity: "Host",
                field: "id",
                value: id_raw,
            })?;

        let uptime = props
            .get_str("uptime")
            .and_then(|v| v.parse::<u64>().ok());
        let subfunctions = props
            .get_str("subfunctions")
            .map(split_csv)
            .unwrap_or_default();
        let bm_ip = optional_field(props, "bm_ip");
        let mgmt_ip = optional_field(props, "mgmt_ip");
        let mgmt_mac = optional_field(props, "mgmt_mac");
        let capabilities = props
            .get_str("capabilities")
            .map(Capabilities::parse)
            .unwrap_or_default();

        Ok(Self {
            id,
            name: get_required("hostname")?,
            personality: get_required("personality")?,
            administrative: get_required("administrative")?,
            operational: get_required("operational")?,
            availability: get_required("availability")?,
            uptime,
            subfunctions,
            bm_ip,
            mgmt_ip,
            mgmt_mac,
            capabilities,
        })
    }

    /// 是否健康：unlocked ∧ enabled ∧ available
    pub fn is_healthy(&self) -> bool {
        self.administrative == "unlocked"
            && self.operational == "enabled"
            && self.availability == "available"
    }

    /// 是否为控制器
    pub fn is_controller(&self) -> bool {
        self.personality == "controller"
    }

    /// 是否为活动控制器（依据 capabilities 中的控制器角色）
    pub fn is_active_controller(&self) -> bool {
        self.capabilities.personality() == Some("Controller-Active")
    }

    /// 是否为备用控制器
    pub fn is_standby_controller(&self) -> bool {
        self.capabilities.personality() == Some("Controller-Standby")
    }

    /// 状态三元组 (availability, operational, administrative)
    pub fn state_tuple(&self) -> (String, String, String) {
        (
            self.availability.clone(),
            self.operational.clone(),
            self.administrative.clone(),
        )
    }
}

/// show 输出中的可选字段：`None` 字面量按缺失处理
fn optional_field(props: &PropertyTable, field: &str) -> Option<String> {
    props
        .get_str(field)
        .filter(|v| !v.is_empty() && *v != "None")
        .map(str::to_string)
}
