//! 命令执行契约
//!
//! 类型化适配器与高层关键字只依赖 [`CommandRunner`]，不直接依赖
//! SSH 客户端；测试可以注入脚本化的执行器。

use std::sync::Arc;

use async_trait::async_trait;

use stx_common::RunContext;

use crate::error::{CliError, Result};

/// 一次命令调用的输出
///
/// 标准输出与标准错误已合并为单一行序列（平台 CLI 把错误写到
/// 哪个流并不稳定）。
#[derive(Debug, Clone)]
pub struct CliOutput {
    /// 实际执行的命令（不含环境加载前缀）
    pub command: String,
    /// 退出码
    pub exit_code: u32,
    /// 合并输出行
    pub lines: Vec<String>,
}

impl CliOutput {
    /// 构造输出
    pub fn new(command: impl Into<String>, exit_code: u32, lines: Vec<String>) -> Self {
        Self {
            command: command.into(),
            exit_code,
            lines,
        }
    }

    /// 是否成功（退出码 0）
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// 合并输出为整段文本
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// 命令裁决：fail_ok 语义的显式结果值
///
/// 负向测试期望命令被拒绝，拒绝信息作为值返回而不是异常。
#[derive(Debug, Clone)]
pub enum CliVerdict {
    /// 命令被接受（退出码 0）
    Accepted(CliOutput),
    /// 命令被拒绝（非零退出码）
    Rejected {
        /// 被拒绝的命令
        command: String,
        /// 退出码
        exit_code: u32,
        /// 合并输出（错误信息随 stdout 通道带回）
        output: String,
    },
}

impl CliVerdict {
    /// 是否被接受
    pub fn is_accepted(&self) -> bool {
        matches!(self, CliVerdict::Accepted(_))
    }

    /// 取接受的输出；被拒绝时转换为 [`CliError::CommandRejected`]
    pub fn accepted(self) -> Result<CliOutput> {
        match self {
            CliVerdict::Accepted(output) => Ok(output),
            CliVerdict::Rejected {
                command,
                exit_code,
                output,
            } => Err(CliError::CommandRejected {
                command,
                exit_code,
                output,
            }),
        }
    }
}

/// 命令执行契约
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 执行命令，非零退出码作为 [`CliVerdict::Rejected`] 值返回
    async fn run_fail_ok(&self, command: &str) -> Result<CliVerdict>;

    /// 执行命令并校验成功，非零退出码转换为错误
    async fn run(&self, command: &str) -> Result<CliOutput> {
        self.run_fail_ok(command).await?.accepted()
    }
}

/// 计数执行器
///
/// 包装任意执行器，把命令执行与拒绝事件累计到共享运行上下文的
/// 计数器中。瞬态重试发生在 [`crate::CloudCli`] 内部，由其在
/// 重试现场记录，两处计数互不重叠。
pub struct MeteredRunner {
    inner: Arc<dyn CommandRunner>,
    context: Arc<RunContext>,
}

impl MeteredRunner {
    /// 包装执行器
    pub fn new(inner: Arc<dyn CommandRunner>, context: Arc<RunContext>) -> Self {
        Self { inner, context }
    }
}

#[async_trait]
impl CommandRunner for MeteredRunner {
    async fn run_fail_ok(&self, command: &str) -> Result<CliVerdict> {
        let verdict = self.inner.run_fail_ok(command).await?;
        self.context.counters.record_command();
        if !verdict.is_accepted() {
            self.context.counters.record_rejection();
        }
        Ok(verdict)
    }
}
