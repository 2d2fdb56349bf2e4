//! 主机状态复合等待
//!
//! 锁定 / 解锁 / 主备切换都归结为同一个等待：主机记录的
//! `(availability, operational, administrative)` 三元组达到目标。

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stx_cloud_cli::CommandRunner;
use stx_platform::{Host, SystemClient};
use stx_polling::{wait_predicate, PollSpec};

use crate::error::Result;

/// 主机状态目标三元组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostStateTarget {
    /// 可用状态
    pub availability: String,
    /// 运行状态
    pub operational: String,
    /// 管理状态
    pub administrative: String,
}

impl HostStateTarget {
    /// 构造目标三元组
    pub fn new(
        availability: impl Into<String>,
        operational: impl Into<String>,
        administrative: impl Into<String>,
    ) -> Self {
        Self {
            availability: availability.into(),
            operational: operational.into(),
            administrative: administrative.into(),
        }
    }

    /// 锁定完成的目标（online / disabled / locked）
    pub fn locked() -> Self {
        Self::new("online", "disabled", "locked")
    }

    /// 解锁完成的目标（available / enabled / unlocked）
    pub fn unlocked() -> Self {
        Self::new("available", "enabled", "unlocked")
    }

    fn matches(&self, host: &Host) -> bool {
        host.availability == self.availability
            && host.operational == self.operational
            && host.administrative == self.administrative
    }
}

/// 等待主机状态三元组达到目标
pub async fn wait_for_host_state(
    runner: Arc<dyn CommandRunner>,
    hostname: &str,
    target: &HostStateTarget,
    spec: &PollSpec,
) -> Result<Host> {
    let system = SystemClient::new(runner);
    let host = wait_predicate(
        spec,
        || {
            let system = system.clone();
            let hostname = hostname.to_string();
            async move {
                system
                    .host(&hostname)
                    .await
                    .with_context(|| format!("查询主机 {hostname}"))
            }
        },
        |host| target.matches(host),
    )
    .await?;
    Ok(host)
}

/// 锁定主机并等待锁定完成
pub async fn lock_host(
    runner: Arc<dyn CommandRunner>,
    hostname: &str,
    spec: &PollSpec,
) -> Result<Host> {
    info!("锁定主机 {} 并等待完成", hostname);
    let system = SystemClient::new(runner.clone());
    system.host_lock(hostname).await?.accepted()?;
    wait_for_host_state(runner, hostname, &HostStateTarget::locked(), spec).await
}

/// 解锁主机并等待恢复可用
pub async fn unlock_host(
    runner: Arc<dyn CommandRunner>,
    hostname: &str,
    spec: &PollSpec,
) -> Result<Host> {
    info!("解锁主机 {} 并等待恢复", hostname);
    let system = SystemClient::new(runner.clone());
    system.host_unlock(hostname).await?.accepted()?;
    wait_for_host_state(runner, hostname, &HostStateTarget::unlocked(), spec).await
}

/// 主备切换并等待活动控制器易主
pub async fn swact(
    runner: Arc<dyn CommandRunner>,
    active_hostname: &str,
    spec: &PollSpec,
) -> Result<Host> {
    info!("从 {} 发起主备切换", active_hostname);
    let system = SystemClient::new(runner);
    system.host_swact(active_hostname).await?.accepted()?;

    let previous = active_hostname.to_string();
    let host = wait_predicate(
        spec,
        || {
            let system = system.clone();
            async move {
                system
                    .active_controller()
                    .await
                    .context("查询活动控制器")
            }
        },
        |host| host.name != previous,
    )
    .await?;
    Ok(host)
}
