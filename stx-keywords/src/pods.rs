//! Pod 舰队健康复合等待

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stx_cloud_cli::CommandRunner;
use stx_kube::{KubeClient, Pod};
use stx_polling::{wait_predicate, PollSpec};

use crate::error::Result;

/// 等待命名空间内（或全集群）每个 Pod 都健康
///
/// 健康：状态 ∈ {Running, Succeeded, Completed}，且 Running 的
/// Pod 就绪计数齐全。返回最终观测到的 Pod 列表。
pub async fn wait_for_pods_healthy(
    runner: Arc<dyn CommandRunner>,
    namespace: Option<&str>,
    spec: &PollSpec,
) -> Result<Vec<Pod>> {
    info!(
        "等待 {} 内全部 Pod 健康",
        namespace.unwrap_or("全部命名空间")
    );
    let kube = KubeClient::new(runner);
    let namespace = namespace.map(str::to_string);

    let pods = wait_predicate(
        spec,
        || {
            let kube = kube.clone();
            let namespace = namespace.clone();
            async move {
                kube.get_pods(namespace.as_deref())
                    .await
                    .context("查询 Pod 列表")
            }
        },
        |pods: &Vec<Pod>| pods.iter().all(Pod::is_healthy),
    )
    .await?;
    Ok(pods)
}
