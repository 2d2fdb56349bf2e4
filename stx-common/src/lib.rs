//! STX ATP 通用类型定义
//!
//! 此 crate 包含测试运行期间各组件共享的元数据类型。
//! 运行上下文以显式注入的方式（`Arc<RunContext>`）在组件间传递，
//! 替代全局可变状态。

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 测试运行上下文
///
/// 每次测试运行创建一个实例，经 `Arc` 注入各组件，贯穿整个
/// 运行过程。记录运行标识、开始时间以及各类事件计数。
#[derive(Debug, Serialize, Deserialize)]
pub struct RunContext {
    /// 运行标识（UUID v4）
    pub run_id: Uuid,

    /// 运行开始时间
    pub started_at: DateTime<Utc>,

    /// 测试实验室名称（可选，来自配置）
    #[serde(default)]
    pub lab_name: Option<String>,

    /// 计数器集合
    #[serde(default)]
    pub counters: RunCounters,
}

impl RunContext {
    /// 创建新的运行上下文
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            lab_name: None,
            counters: RunCounters::default(),
        }
    }

    /// 设置实验室名称
    pub fn with_lab_name(mut self, name: impl Into<String>) -> Self {
        self.lab_name = Some(name.into());
        self
    }

    /// 运行至今的秒数
    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 运行计数器
///
/// 记录一次运行中累计的命令、重试与等待事件数量，最终写入测试
/// 报告。计数是原子的：共享同一上下文的组件用 `&self` 记录。
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RunCounters {
    commands_executed: AtomicU64,
    commands_rejected: AtomicU64,
    transient_retries: AtomicU64,
    poll_timeouts: AtomicU64,
}

impl RunCounters {
    /// 记录一次命令执行
    pub fn record_command(&self) {
        self.commands_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次命令拒绝
    pub fn record_rejection(&self) {
        self.commands_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次瞬态错误重试
    pub fn record_transient_retry(&self) {
        self.transient_retries.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次轮询等待超时
    pub fn record_poll_timeout(&self) {
        self.poll_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// 已执行的远程命令数
    pub fn commands_executed(&self) -> u64 {
        self.commands_executed.load(Ordering::Relaxed)
    }

    /// 命令被拒绝（非零退出码）次数
    pub fn commands_rejected(&self) -> u64 {
        self.commands_rejected.load(Ordering::Relaxed)
    }

    /// 瞬态错误重试次数
    pub fn transient_retries(&self) -> u64 {
        self.transient_retries.load(Ordering::Relaxed)
    }

    /// 轮询等待超时次数
    pub fn poll_timeouts(&self) -> u64 {
        self.poll_timeouts.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_context_new() {
        let ctx = RunContext::new();
        assert!(ctx.lab_name.is_none());
        assert_eq!(ctx.counters.commands_executed(), 0);
        assert!(ctx.elapsed_secs() >= 0);
    }

    #[test]
    fn test_run_context_lab_name() {
        let ctx = RunContext::new().with_lab_name("wcp-113-121");
        assert_eq!(ctx.lab_name.as_deref(), Some("wcp-113-121"));
    }

    #[test]
    fn test_counters_record_through_shared_ref() {
        let counters = RunCounters::default();
        counters.record_command();
        counters.record_command();
        counters.record_rejection();
        counters.record_transient_retry();

        assert_eq!(counters.commands_executed(), 2);
        assert_eq!(counters.commands_rejected(), 1);
        assert_eq!(counters.transient_retries(), 1);
        assert_eq!(counters.poll_timeouts(), 0);
    }
}
