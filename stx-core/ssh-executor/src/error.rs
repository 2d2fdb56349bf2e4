//! SSH 错误定义

use thiserror::Error;

/// SSH 操作结果类型
pub type Result<T> = std::result::Result<T, SshError>;

/// SSH 错误类型
#[derive(Error, Debug)]
pub enum SshError {
    /// 连接错误
    #[error("SSH 连接失败: {0}")]
    ConnectionError(String),

    /// 认证错误
    #[error("SSH 认证失败: {0}")]
    AuthenticationError(String),

    /// 命令执行错误
    #[error("命令执行失败: {0}")]
    ExecutionError(String),

    /// 超时错误
    #[error("SSH 操作超时: {0}")]
    TimeoutError(String),

    /// 文件传输失败（超过截止时间后操作被放弃）
    #[error("文件传输失败 ({direction}): {path}: {reason}")]
    TransferFailed {
        /// 传输方向（upload / download）
        direction: &'static str,
        /// 涉及的文件路径
        path: String,
        /// 失败原因
        reason: String,
    },

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}
