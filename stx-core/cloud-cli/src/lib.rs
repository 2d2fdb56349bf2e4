//! STX 命令调用器
//!
//! 云 CLI 命令的统一入口：加载 RC 环境、执行命令、校验退出码，
//! 并把合并输出行交给类型化适配器解析。
//!
//! - `fail_ok` 语义以 [`CliVerdict`] 结果值表达，负向测试不依赖异常
//! - 瞬态 CLI 拒绝（告警列表锁竞争等）按配置的允许列表有限重试
//! - [`SessionManager`] 维护每目标主机的 SSH 会话单例
//!
//! # 示例
//!
//! ```ignore
//! use stx_cloud_cli::{CloudCli, CloudCliConfig, CommandRunner};
//!
//! let cli = CloudCli::new(ssh, CloudCliConfig::default())?;
//! let output = cli.run("system host-list").await?;
//! ```

mod config;
mod error;
mod invoker;
mod runner;
mod sessions;

pub use config::CloudCliConfig;
pub use error::{CliError, Result};
pub use invoker::CloudCli;
pub use runner::{CliOutput, CliVerdict, CommandRunner, MeteredRunner};
pub use sessions::SessionManager;
