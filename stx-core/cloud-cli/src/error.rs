//! 命令调用错误定义

use thiserror::Error;

/// 命令调用结果类型
pub type Result<T> = std::result::Result<T, CliError>;

/// 命令调用错误类型
#[derive(Error, Debug)]
pub enum CliError {
    /// SSH 传输错误
    #[error("SSH 错误: {0}")]
    Ssh(#[from] stx_ssh_executor::SshError),

    /// 远端 CLI 拒绝命令（非零退出码且调用方未选择 fail_ok）
    #[error("命令被拒绝 (退出码 {exit_code}): {command}: {output}")]
    CommandRejected {
        /// 被拒绝的命令
        command: String,
        /// 退出码
        exit_code: u32,
        /// 合并输出
        output: String,
    },

    /// 配置中的瞬态错误模式无法编译
    #[error("无效的瞬态错误模式: {0}")]
    InvalidPattern(String),
}
