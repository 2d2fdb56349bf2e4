//! STX 高层关键字
//!
//! 轮询引擎与类型化适配器组合出的复合等待：
//! - 主机状态三元组（锁定 / 解锁 / 主备切换）
//! - 告警消失
//! - Pod 舰队健康
//! - 子云部署状态（失败终态快速失败）
//!
//! 关键字只消费 [`stx_cloud_cli::CommandRunner`] 契约与
//! [`stx_polling`] 引擎，不接触 SSH 细节。

mod alarms;
mod error;
mod host_state;
mod pods;
mod subcloud_deploy;

pub use alarms::wait_for_alarm_gone;
pub use error::{KeywordError, Result};
pub use host_state::{lock_host, swact, unlock_host, wait_for_host_state, HostStateTarget};
pub use pods::wait_for_pods_healthy;
pub use subcloud_deploy::wait_for_deploy_state;
