//! STX 平台适配器
//!
//! `system` / `fm` 命令输出的类型化领域对象与命令前端：
//! - 主机（host-list / host-show，含 capabilities 宽松解析）
//! - 告警与事件（alarm-list / event-list / suppress）
//! - 服务、应用、地址池、网络
//! - 单例配置 show（dns / ntp / oam / ptp）
//! - PTP 实例族（instance / interface / parameter / 主机分配）
//!
//! 所有前端通过 [`stx_cloud_cli::CommandRunner`] 契约执行命令，
//! 不直接触碰 SSH。

mod alarm;
mod application;
mod client;
mod error;
mod host;
mod network;
mod ptp;
mod service;
mod show;

pub use alarm::{
    alarms_with_entity, alarms_with_id, dedup_alarms, Alarm, Event, ALARM_LIST_HEADERS,
    EVENT_LIST_HEADERS,
};
pub use application::{Application, APPLICATION_APPLIED, APPLICATION_LIST_HEADERS};
pub use client::{FaultClient, SystemClient};
pub use error::{PlatformError, Result};
pub use host::{Capabilities, Host, HOST_LIST_HEADERS};
pub use network::{AddrPool, Network, ADDRPOOL_LIST_HEADERS, NETWORK_LIST_HEADERS};
pub use ptp::{
    PtpHostAssignment, PtpInstance, PtpInterface, PtpParameter, PTP_HOST_ASSIGNMENT_HEADERS,
    PTP_INSTANCE_HEADERS, PTP_INTERFACE_HEADERS, PTP_PARAMETER_HEADERS,
};
pub use service::{Service, SERVICE_LIST_HEADERS};
pub use show::{DnsConfig, NtpConfig, OamConfig, PtpConfig};
