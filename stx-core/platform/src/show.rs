//! 单例配置 show 领域对象
//!
//! `system dns-show` / `ntp-show` / `oam-show` / `ptp-show` 的
//! 类型化视图。这些对象在平台上各只有一份实例，show 输出为
//! 两列属性表；列表型的值（nameservers、ntpservers）按逗号拆分。

use serde::{Deserialize, Serialize};

use stx_tabular::{split_csv, PropertyTable};

use crate::error::{PlatformError, Result};

fn required_prop(props: &PropertyTable, entity: &'static str, field: &'static str) -> Result<String> {
    props
        .get_str(field)
        .map(str::to_string)
        .ok_or(PlatformError::MissingField { entity, field })
}

/// DNS 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsConfig {
    /// 配置 uuid
    pub uuid: String,
    /// 域名服务器列表
    pub nameservers: Vec<String>,
}

impl DnsConfig {
    /// 从 `system dns-show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        Ok(Self {
            uuid: required_prop(props, "DnsConfig", "uuid")?,
            nameservers: split_csv(&required_prop(props, "DnsConfig", "nameservers")?),
        })
    }
}

/// NTP 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NtpConfig {
    /// 配置 uuid
    pub uuid: String,
    /// 时间服务器列表
    pub ntpservers: Vec<String>,
}

impl NtpConfig {
    /// 从 `system ntp-show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        Ok(Self {
            uuid: required_prop(props, "NtpConfig", "uuid")?,
            ntpservers: split_csv(&required_prop(props, "NtpConfig", "ntpservers")?),
        })
    }
}

/// OAM 网络配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OamConfig {
    /// 配置 uuid
    pub uuid: String,
    /// OAM 子网
    pub oam_subnet: String,
    /// OAM 网关（可缺失）
    pub oam_gateway_ip: Option<String>,
    /// OAM 浮动地址
    pub oam_floating_ip: String,
    /// controller-0 的 OAM 地址（双控部署才有）
    pub oam_c0_ip: Option<String>,
    /// controller-1 的 OAM 地址（双控部署才有）
    pub oam_c1_ip: Option<String>,
}

impl OamConfig {
    /// 从 `system oam-show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        let optional = |field: &str| {
            props
                .get_str(field)
                .filter(|v| !v.is_empty() && *v != "None")
                .map(str::to_string)
        };
        Ok(Self {
            uuid: required_prop(props, "OamConfig", "uuid")?,
            oam_subnet: required_prop(props, "OamConfig", "oam_subnet")?,
            oam_gateway_ip: optional("oam_gateway_ip"),
            oam_floating_ip: required_prop(props, "OamConfig", "oam_floating_ip")?,
            oam_c0_ip: optional("oam_c0_ip"),
            oam_c1_ip: optional("oam_c1_ip"),
        })
    }
}

/// 平台级 PTP 配置（`system ptp-show`，旧式单例）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtpConfig {
    /// 配置 uuid
    pub uuid: String,
    /// 时钟模式（hardware / software / legacy）
    pub mechanism: String,
    /// 传输模式（l2 / udp）
    pub transport: String,
    /// 时间戳模式
    pub mode: String,
}

impl PtpConfig {
    /// 从 `system ptp-show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        Ok(Self {
            uuid: required_prop(props, "PtpConfig", "uuid")?,
            mechanism: required_prop(props, "PtpConfig", "mechanism")?,
            transport: required_prop(props, "PtpConfig", "transport")?,
            mode: required_prop(props, "PtpConfig", "mode")?,
        })
    }
}
