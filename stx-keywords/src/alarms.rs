//! 告警消失复合等待

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stx_cloud_cli::CommandRunner;
use stx_platform::FaultClient;
use stx_polling::{wait_predicate, PollSpec};

use crate::error::Result;

/// 等待指定告警从活动告警列表中消失
///
/// `entity_contains` 可选：提供时只关注实体标识包含该子串的
/// 告警实例（同一告警编号可能同时挂在多台主机上）。
pub async fn wait_for_alarm_gone(
    runner: Arc<dyn CommandRunner>,
    alarm_id: &str,
    entity_contains: Option<&str>,
    spec: &PollSpec,
) -> Result<()> {
    info!(
        "等待告警 {} 消失{}",
        alarm_id,
        entity_contains
            .map(|e| format!(" (实体含 {e})"))
            .unwrap_or_default()
    );
    let fault = FaultClient::new(runner);
    let alarm_id = alarm_id.to_string();
    let fragment = entity_contains.map(str::to_string);

    wait_predicate(
        spec,
        || {
            let fault = fault.clone();
            let alarm_id = alarm_id.clone();
            let fragment = fragment.clone();
            async move {
                let alarms = fault.alarm_list().await.context("查询活动告警")?;
                let remaining = alarms
                    .iter()
                    .filter(|a| a.matches(&alarm_id, fragment.as_deref()))
                    .count();
                Ok(remaining)
            }
        },
        |remaining| *remaining == 0,
    )
    .await?;
    Ok(())
}
