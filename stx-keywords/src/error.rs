//! 关键字层错误定义

use std::time::Duration;

use thiserror::Error;

/// 关键字层结果类型
pub type Result<T> = std::result::Result<T, KeywordError>;

/// 关键字层错误类型
#[derive(Error, Debug)]
pub enum KeywordError {
    /// 轮询超时或终态失败
    #[error("轮询失败: {0}")]
    Poll(#[from] stx_polling::PollError),

    /// 平台适配器错误
    #[error("平台适配器错误: {0}")]
    Platform(#[from] stx_platform::PlatformError),

    /// Kubernetes 适配器错误
    #[error("Kubernetes 适配器错误: {0}")]
    Kube(#[from] stx_kube::KubeError),

    /// 分布式云适配器错误
    #[error("分布式云适配器错误: {0}")]
    DcManager(#[from] stx_dcmanager::DcManagerError),

    /// 命令调用错误
    #[error("命令调用错误: {0}")]
    Cli(#[from] stx_cloud_cli::CliError),

    /// 子云部署进入失败终态
    #[error("子云 {subcloud} 部署失败: 观测到 {observed} (耗时 {elapsed:?})")]
    FatalDeployState {
        /// 子云名
        subcloud: String,
        /// 观测到的失败状态
        observed: String,
        /// 从开始等待到观测到失败的耗时
        elapsed: Duration,
    },
}
