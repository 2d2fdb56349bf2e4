//! 命令调用器
//!
//! 在 SSH 客户端之上提供云 CLI 调用语义：
//! - 云 CLI 命令（`system`、`fm`、`dcmanager` 等）执行前加载 RC 环境
//! - 退出码校验，`fail_ok` 以结果值表达
//! - 瞬态 CLI 拒绝按允许列表有限重试

use std::sync::Arc;

use async_trait::async_trait;
use regex::RegexBuilder;
use tracing::{debug, info, warn};

use stx_common::RunContext;
use stx_ssh_executor::SshClient;

use crate::config::CloudCliConfig;
use crate::error::{CliError, Result};
use crate::runner::{CliOutput, CliVerdict, CommandRunner};

/// 云 CLI 命令调用器
pub struct CloudCli {
    ssh: Arc<SshClient>,
    config: CloudCliConfig,
    transient_patterns: Vec<regex::Regex>,
    run_context: Option<Arc<RunContext>>,
}

impl CloudCli {
    /// 创建命令调用器
    ///
    /// # Errors
    /// 配置中的瞬态错误模式无法编译时返回 [`CliError::InvalidPattern`]。
    pub fn new(ssh: Arc<SshClient>, config: CloudCliConfig) -> Result<Self> {
        let transient_patterns = config
            .transient_patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| CliError::InvalidPattern(format!("{}: {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ssh,
            config,
            transient_patterns,
            run_context: None,
        })
    }

    /// 注入共享运行上下文
    ///
    /// 瞬态重试事件计入其计数器；命令执行与拒绝计数由外层的
    /// [`crate::MeteredRunner`] 负责。
    pub fn with_run_context(mut self, context: Arc<RunContext>) -> Self {
        self.run_context = Some(context);
        self
    }

    /// 组装实际发送的命令行
    ///
    /// 云 CLI 命令前缀命中配置列表时加载 RC 环境；`kubectl` 等
    /// 命令原样发送。
    pub fn full_command(&self, command: &str) -> String {
        let first_token = command.split_whitespace().next().unwrap_or("");
        if self
            .config
            .sourced_prefixes
            .iter()
            .any(|p| p == first_token)
        {
            format!("source {} > /dev/null; {}", self.config.openrc_path, command)
        } else {
            command.to_string()
        }
    }

    /// 输出文本是否命中瞬态错误允许列表
    pub fn is_transient_rejection(&self, output: &str) -> bool {
        self.transient_patterns.iter().any(|re| re.is_match(output))
    }

    /// 执行一次（不重试）
    async fn execute_once(&self, command: &str) -> Result<CliVerdict> {
        let full = self.full_command(command);
        let output = self.ssh.execute(&full).await?;

        let exit_code = output.exit_code.unwrap_or(1);
        if exit_code == 0 {
            Ok(CliVerdict::Accepted(CliOutput::new(
                command,
                exit_code,
                output.combined_lines(),
            )))
        } else {
            Ok(CliVerdict::Rejected {
                command: command.to_string(),
                exit_code,
                output: output.combined_output(),
            })
        }
    }
}

#[async_trait]
impl CommandRunner for CloudCli {
    async fn run_fail_ok(&self, command: &str) -> Result<CliVerdict> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("执行命令 (第 {} 次): {}", attempt, command);

            let verdict = self.execute_once(command).await?;
            match &verdict {
                CliVerdict::Accepted(output) => {
                    debug!("命令成功: {} ({} 行输出)", command, output.lines.len());
                    return Ok(verdict);
                }
                CliVerdict::Rejected { output, .. } => {
                    // 仅允许列表内的瞬态拒绝才重试
                    if attempt <= self.config.transient_retries
                        && self.is_transient_rejection(output)
                    {
                        if let Some(ctx) = &self.run_context {
                            ctx.counters.record_transient_retry();
                        }
                        warn!(
                            "瞬态 CLI 拒绝, {} 秒后重试 ({}/{}): {}",
                            self.config.retry_delay_secs,
                            attempt,
                            self.config.transient_retries,
                            command
                        );
                        tokio::time::sleep(self.config.retry_delay()).await;
                        continue;
                    }
                    info!("命令被拒绝: {}", command);
                    return Ok(verdict);
                }
            }
        }
    }
}
