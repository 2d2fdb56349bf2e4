//! 轮询错误定义

use std::time::Duration;
use thiserror::Error;

/// 轮询操作结果类型
pub type Result<T> = std::result::Result<T, PollError>;

/// 轮询错误类型
#[derive(Error, Debug)]
pub enum PollError {
    /// 等待预算耗尽
    #[error(
        "等待超时: {description}: 期望 {expected}, 最后观测 {last_observed}, 耗时 {elapsed:?}"
    )]
    Timeout {
        /// 人类可读的等待描述
        description: String,
        /// 期望值（渲染后）
        expected: String,
        /// 最后一次观测值（渲染后）
        last_observed: String,
        /// 实际耗时
        elapsed: Duration,
    },

    /// 探测到终态失败值（无需等到超时）
    #[error("观测到终态失败: {description}: {observed} (耗时 {elapsed:?})")]
    FatalState {
        /// 人类可读的等待描述
        description: String,
        /// 触发失败的观测值（渲染后）
        observed: String,
        /// 实际耗时
        elapsed: Duration,
    },
}

impl PollError {
    /// 等待描述
    pub fn description(&self) -> &str {
        match self {
            PollError::Timeout { description, .. } => description,
            PollError::FatalState { description, .. } => description,
        }
    }

    /// 实际耗时
    pub fn elapsed(&self) -> Duration {
        match self {
            PollError::Timeout { elapsed, .. } => *elapsed,
            PollError::FatalState { elapsed, .. } => *elapsed,
        }
    }
}
