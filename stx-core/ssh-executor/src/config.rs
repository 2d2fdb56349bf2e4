//! SSH 连接配置
//!
//! 超时字段以 humantime 字符串（`30s`、`5m`）序列化，方便放进
//! 实验室配置文件。

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// SSH 认证方式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuthMethod {
    /// 密码认证（经由 sshpass）
    Password(String),
    /// 密钥认证（可选密码短语）
    Key {
        /// 私钥路径
        key_path: PathBuf,
        /// 密钥密码短语（可选）
        passphrase: Option<String>,
    },
    /// 使用默认密钥（~/.ssh/id_rsa, ~/.ssh/id_ed25519 等）
    DefaultKey,
}

/// SSH 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    /// 主机地址
    pub host: String,
    /// 端口（默认 22）
    pub port: u16,
    /// 用户名
    pub username: String,
    /// 认证方式
    pub auth: AuthMethod,
    /// 连接超时
    #[serde(with = "humantime_serde", default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    /// 命令执行超时
    #[serde(with = "humantime_serde", default = "default_command_timeout")]
    pub command_timeout: Duration,
    /// 文件传输截止时间
    #[serde(with = "humantime_serde", default = "default_transfer_deadline")]
    pub transfer_deadline: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_command_timeout() -> Duration {
    // 平台 CLI 命令（backup、application-apply 等）可能运行较久
    Duration::from_secs(300)
}

fn default_transfer_deadline() -> Duration {
    Duration::from_secs(600)
}

impl SshConfig {
    /// 以显式认证方式创建配置，其余字段取默认值
    pub fn new(host: impl Into<String>, username: impl Into<String>, auth: AuthMethod) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            auth,
            connect_timeout: default_connect_timeout(),
            command_timeout: default_command_timeout(),
            transfer_deadline: default_transfer_deadline(),
        }
    }

    /// 使用密码认证创建配置
    pub fn with_password(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(host, username, AuthMethod::Password(password.into()))
    }

    /// 使用密钥认证创建配置
    pub fn with_key(
        host: impl Into<String>,
        username: impl Into<String>,
        key_path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(
            host,
            username,
            AuthMethod::Key {
                key_path: key_path.into(),
                passphrase: None,
            },
        )
    }

    /// 使用默认密钥认证创建配置
    pub fn with_default_key(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(host, username, AuthMethod::DefaultKey)
    }

    /// 设置端口
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// 设置连接超时
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// 设置命令执行超时
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// 设置文件传输截止时间
    pub fn transfer_deadline(mut self, deadline: Duration) -> Self {
        self.transfer_deadline = deadline;
        self
    }

    /// 会话管理器的缓存键（host:port 格式）
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ssh/scp 命令使用的 user@host 目标串
    pub fn target(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_config() {
        let config = SshConfig::with_password("10.10.10.2", "sysadmin", "Li69nux*");
        assert_eq!(config.host, "10.10.10.2");
        assert_eq!(config.port, 22);
        assert_eq!(config.username, "sysadmin");
        assert!(matches!(config.auth, AuthMethod::Password(_)));
        assert_eq!(config.target(), "sysadmin@10.10.10.2");
        assert_eq!(config.address(), "10.10.10.2:22");
    }

    #[test]
    fn test_key_config() {
        let config = SshConfig::with_key("10.10.10.2", "sysadmin", "/home/user/.ssh/id_rsa");
        assert!(matches!(config.auth, AuthMethod::Key { .. }));
    }

    #[test]
    fn test_config_builder() {
        let config = SshConfig::with_password("host", "user", "pass")
            .port(2222)
            .connect_timeout(Duration::from_secs(10))
            .transfer_deadline(Duration::from_secs(120));
        assert_eq!(config.port, 2222);
        assert_eq!(config.connect_timeout.as_secs(), 10);
        assert_eq!(config.transfer_deadline.as_secs(), 120);
    }

    #[test]
    fn test_timeouts_roundtrip_as_humantime() {
        let config = SshConfig::with_password("host", "user", "pass")
            .command_timeout(Duration::from_secs(90));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"1m 30s\""));
        let back: SshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.command_timeout.as_secs(), 90);
    }
}
