//! 子云部署状态复合等待
//!
//! 目标必须是部署状态机的成功终态；等待过程中观测到任何
//! `*-failed` 状态立即失败，不消耗剩余预算。

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stx_cloud_cli::CommandRunner;
use stx_dcmanager::{validate_target_state, DcManagerClient, DeployState};
use stx_polling::{wait_predicate_abort, PollError, PollSpec};

use crate::error::{KeywordError, Result};

/// 等待子云部署状态达到目标终态
pub async fn wait_for_deploy_state(
    runner: Arc<dyn CommandRunner>,
    subcloud: &str,
    target: &str,
    spec: &PollSpec,
) -> Result<DeployState> {
    validate_target_state(target)?;
    info!("等待子云 {} 部署状态达到 {}", subcloud, target);

    let dc = DcManagerClient::new(runner);
    let name = subcloud.to_string();
    let target = target.to_string();

    let result = wait_predicate_abort(
        spec,
        || {
            let dc = dc.clone();
            let name = name.clone();
            async move {
                let sc = dc
                    .subcloud(&name)
                    .await
                    .with_context(|| format!("查询子云 {name}"))?;
                Ok(sc.deploy_status)
            }
        },
        |state: &DeployState| state.as_str() == target,
        DeployState::is_failed,
    )
    .await;

    match result {
        Ok(state) => Ok(state),
        // 终态失败换成带子云名的专用错误
        Err(PollError::FatalState {
            observed, elapsed, ..
        }) => Err(KeywordError::FatalDeployState {
            subcloud: subcloud.to_string(),
            observed,
            elapsed,
        }),
        Err(e) => Err(e.into()),
    }
}
