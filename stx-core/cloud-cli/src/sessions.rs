//! SSH 会话管理
//!
//! 每个目标主机一个 SSH 会话单例，作用域为整个测试会话。
//! 调用方串行使用会话；核心不做内部并行。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use stx_ssh_executor::{SshClient, SshConfig};

use crate::error::Result;

/// 会话管理器
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<SshClient>>>,
}

impl SessionManager {
    /// 创建会话管理器
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取目标主机的会话；不存在时建立并缓存
    pub async fn get_or_connect(&self, config: SshConfig) -> Result<Arc<SshClient>> {
        let key = config.address();
        let mut sessions = self.sessions.lock().await;

        if let Some(client) = sessions.get(&key) {
            debug!("复用已有 SSH 会话: {}", key);
            return Ok(Arc::clone(client));
        }

        info!("建立新 SSH 会话: {}", key);
        let client = Arc::new(SshClient::connect(config).await?);
        sessions.insert(key, Arc::clone(&client));
        Ok(client)
    }

    /// 丢弃目标主机的会话（主机重启 / swact 之后使用）
    pub async fn drop_session(&self, address: &str) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(address).is_some() {
            info!("丢弃 SSH 会话: {}", address);
        }
    }

    /// 当前缓存的会话数量
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
