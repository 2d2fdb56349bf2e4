//! kubectl 命令前端
//!
//! 在 [`CommandRunner`] 契约上封装 `kubectl` 命令。kubectl 在
//! 控制器上无需加载 openrc 环境，但仍走统一的执行通道以便
//! 会话复用与日志留痕。

use std::sync::Arc;

use tracing::debug;

use stx_cloud_cli::CommandRunner;
use stx_tabular::TableParser;

use crate::daemonset::{DaemonSet, DAEMONSET_HEADERS};
use crate::describe::NodeDescription;
use crate::error::{KubeError, Result};
use crate::helm::{HelmRelease, HELM_RELEASE_HEADERS};
use crate::node::{Node, NODE_HEADERS};
use crate::pod::{Pod, POD_HEADERS};
use crate::resources::{
    GlobalNetworkPolicy, KubeService, Secret, GLOBAL_NETWORK_POLICY_HEADERS, SECRET_HEADERS,
    SERVICE_HEADERS,
};
use crate::snapshot::{VolumeSnapshot, SNAPSHOT_HEADERS};

/// kubectl 命令前端
#[derive(Clone)]
pub struct KubeClient {
    runner: Arc<dyn CommandRunner>,
}

impl KubeClient {
    /// 创建前端
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn namespace_flag(namespace: Option<&str>) -> String {
        match namespace {
            Some(ns) => format!(" -n {ns}"),
            None => " --all-namespaces".to_string(),
        }
    }

    /// 列出 Pod（`-o wide`；不指定命名空间时跨全部命名空间）
    pub async fn get_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>> {
        let command = format!(
            "kubectl get pods{} -o wide",
            Self::namespace_flag(namespace)
        );
        let output = self.runner.run(&command).await?;
        let table = TableParser::new(POD_HEADERS).parse(&output.lines)?;
        let pods: Result<Vec<Pod>> = table.records().iter().map(Pod::from_record).collect();
        let pods = pods?;
        debug!("列出 {} 个 Pod", pods.len());
        Ok(pods)
    }

    /// 按名查 Pod
    pub async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        self.get_pods(Some(namespace))
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| KubeError::NotFound(format!("Pod {namespace}/{name}")))
    }

    /// 列出节点
    pub async fn get_nodes(&self) -> Result<Vec<Node>> {
        let output = self.runner.run("kubectl get nodes").await?;
        let table = TableParser::new(NODE_HEADERS).parse(&output.lines)?;
        table.records().iter().map(Node::from_record).collect()
    }

    /// describe 单个节点
    pub async fn describe_node(&self, name: &str) -> Result<NodeDescription> {
        let output = self
            .runner
            .run(&format!("kubectl describe node {name}"))
            .await?;
        NodeDescription::parse(&output.lines)
    }

    /// 列出 Helm 发布
    pub async fn get_helm_releases(&self, namespace: Option<&str>) -> Result<Vec<HelmRelease>> {
        let command = format!(
            "kubectl get helmrelease{}",
            Self::namespace_flag(namespace)
        );
        let output = self.runner.run(&command).await?;
        let table = TableParser::new(HELM_RELEASE_HEADERS).parse(&output.lines)?;
        table
            .records()
            .iter()
            .map(HelmRelease::from_record)
            .collect()
    }

    /// 列出 DaemonSet
    pub async fn get_daemonsets(&self, namespace: Option<&str>) -> Result<Vec<DaemonSet>> {
        let command = format!(
            "kubectl get daemonsets{}",
            Self::namespace_flag(namespace)
        );
        let output = self.runner.run(&command).await?;
        let table = TableParser::new(DAEMONSET_HEADERS).parse(&output.lines)?;
        table
            .records()
            .iter()
            .map(DaemonSet::from_record)
            .collect()
    }

    /// 列出卷快照
    pub async fn get_volume_snapshots(&self, namespace: &str) -> Result<Vec<VolumeSnapshot>> {
        let output = self
            .runner
            .run(&format!("kubectl get volumesnapshot -n {namespace}"))
            .await?;
        let table = TableParser::new(SNAPSHOT_HEADERS).parse(&output.lines)?;
        table
            .records()
            .iter()
            .map(VolumeSnapshot::from_record)
            .collect()
    }

    /// 列出 Secret
    pub async fn get_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        let output = self
            .runner
            .run(&format!("kubectl get secrets -n {namespace}"))
            .await?;
        let table = TableParser::new(SECRET_HEADERS).parse(&output.lines)?;
        table.records().iter().map(Secret::from_record).collect()
    }

    /// 列出 Service
    pub async fn get_services(&self, namespace: &str) -> Result<Vec<KubeService>> {
        let output = self
            .runner
            .run(&format!("kubectl get services -n {namespace}"))
            .await?;
        let table = TableParser::new(SERVICE_HEADERS).parse(&output.lines)?;
        table
            .records()
            .iter()
            .map(KubeService::from_record)
            .collect()
    }

    /// 列出 Calico 全局网络策略
    pub async fn get_global_network_policies(&self) -> Result<Vec<GlobalNetworkPolicy>> {
        let output = self
            .runner
            .run("kubectl get globalnetworkpolicies")
            .await?;
        let table = TableParser::new(GLOBAL_NETWORK_POLICY_HEADERS).parse(&output.lines)?;
        table
            .records()
            .iter()
            .map(GlobalNetworkPolicy::from_record)
            .collect()
    }
}
