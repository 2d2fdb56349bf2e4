//! STX SSH 执行器
//!
//! 提供 SSH 远程命令执行与文件传输能力，支持：
//! - 密码认证 / SSH 密钥认证
//! - 命令执行，stdout 与 stderr 合并为单一行序列
//! - scp 文件上传下载（带截止时间）
//!
//! # 示例
//!
//! ```ignore
//! use stx_ssh_executor::{SshClient, SshConfig};
//!
//! let config = SshConfig::with_password("10.10.10.2", "sysadmin", "Li69nux*");
//! let client = SshClient::connect(config).await?;
//! let output = client.execute("system host-list").await?;
//! for line in output.stdout_lines() {
//!     println!("{}", line);
//! }
//! ```

mod client;
mod config;
mod error;
mod transfer;

pub use client::{CommandOutput, SshClient};
pub use config::{AuthMethod, SshConfig};
pub use error::{Result, SshError};
