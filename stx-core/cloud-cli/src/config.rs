//! 命令调用器配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 命令调用器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudCliConfig {
    /// 云 CLI 命令执行前加载的 RC 文件路径
    #[serde(default = "default_openrc_path")]
    pub openrc_path: String,

    /// 需要加载 RC 环境的命令前缀
    #[serde(default = "default_sourced_prefixes")]
    pub sourced_prefixes: Vec<String>,

    /// 瞬态 CLI 拒绝的重试次数
    #[serde(default = "default_transient_retries")]
    pub transient_retries: u32,

    /// 重试间隔（秒）
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// 瞬态 CLI 拒绝的识别模式（正则，忽略大小写）
    #[serde(default = "default_transient_patterns")]
    pub transient_patterns: Vec<String>,
}

fn default_openrc_path() -> String {
    "/etc/platform/openrc".to_string()
}

fn default_sourced_prefixes() -> Vec<String> {
    ["system", "fm", "dcmanager", "openstack", "sw-manager"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_transient_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_transient_patterns() -> Vec<String> {
    // 平台 CLI 偶发的锁竞争与服务瞬断
    [
        r"resource temporarily unavailable",
        r"database is locked",
        r"Unable to establish connection",
        r"An unknown exception occurred",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for CloudCliConfig {
    fn default() -> Self {
        Self {
            openrc_path: default_openrc_path(),
            sourced_prefixes: default_sourced_prefixes(),
            transient_retries: default_transient_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            transient_patterns: default_transient_patterns(),
        }
    }
}

impl CloudCliConfig {
    /// 重试间隔
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}
