//! STX Kubernetes 适配器
//!
//! `kubectl` 输出的类型化领域对象与命令前端：
//! - Pod / Node（get 列表，年龄换算，就绪与健康判定）
//! - NodeDescription（describe node 分段解析）
//! - HelmRelease / DaemonSet / VolumeSnapshot
//! - Secret / Service / GlobalNetworkPolicy
//!
//! 所有前端通过 [`stx_cloud_cli::CommandRunner`] 契约执行命令。

mod age;
mod client;
mod daemonset;
mod describe;
mod error;
mod helm;
mod node;
mod pod;
mod resources;
mod snapshot;

pub use age::age_to_minutes;
pub use client::KubeClient;
pub use daemonset::{DaemonSet, DAEMONSET_HEADERS};
pub use describe::{AllocatedResource, NodeDescription, ResourceSet};
pub use error::{KubeError, Result};
pub use helm::{HelmRelease, HELM_RELEASE_HEADERS};
pub use node::{Node, NODE_HEADERS};
pub use pod::{healthy_statuses, Pod, POD_HEADERS};
pub use resources::{
    GlobalNetworkPolicy, KubeService, Secret, GLOBAL_NETWORK_POLICY_HEADERS, SECRET_HEADERS,
    SERVICE_HEADERS,
};
pub use snapshot::{VolumeSnapshot, SNAPSHOT_HEADERS};
