//! 轮询校验引擎
//!
//! 所有"等待状态 X"关键字的共用引擎：反复求值探测函数，
//! 命中即返回观测值，预算耗尽抛出带完整期望/观测差值的超时错误。
//!
//! 规则：
//! - 首次求值同步进行，命中立即返回，不经历任何等待
//! - 探测函数的瞬态错误被捕获、计数并继续重试
//! - 时钟单调；两次尝试之间的等待不小于配置间隔
//! - 配置了终态失败判定时，命中即刻失败，不消耗剩余预算

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use stx_common::RunContext;

use crate::error::{PollError, Result};

/// 一次等待的描述
#[derive(Debug, Clone)]
pub struct PollSpec {
    /// 等待预算
    pub timeout: Duration,
    /// 两次探测的最小间隔
    pub interval: Duration,
    /// 人类可读描述（出现在超时错误与日志中）
    pub description: String,
    /// 共享运行上下文（可选；超时事件计入其计数器）
    pub context: Option<Arc<RunContext>>,
}

impl PollSpec {
    /// 创建等待描述
    pub fn new(timeout: Duration, interval: Duration, description: impl Into<String>) -> Self {
        Self {
            timeout,
            interval,
            description: description.into(),
            context: None,
        }
    }

    /// 秒粒度的便捷构造
    pub fn secs(timeout_secs: u64, interval_secs: u64, description: impl Into<String>) -> Self {
        Self::new(
            Duration::from_secs(timeout_secs),
            Duration::from_secs(interval_secs),
            description,
        )
    }

    /// 注入共享运行上下文
    pub fn with_context(mut self, context: Arc<RunContext>) -> Self {
        self.context = Some(context);
        self
    }
}

/// 等待探测值等于期望值
///
/// # Errors
/// 预算耗尽返回 [`PollError::Timeout`]，错误携带期望值、最后
/// 观测值、实际耗时与等待描述。
pub async fn wait_equals<T, F, Fut>(spec: &PollSpec, probe: F, expected: T) -> Result<T>
where
    T: PartialEq + Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let expected_repr = format!("{:?}", expected);
    wait_inner(
        spec,
        probe,
        |value| *value == expected,
        no_abort,
        &expected_repr,
    )
    .await
}

/// 等待探测值满足判定条件
pub async fn wait_predicate<T, F, Fut, A>(spec: &PollSpec, probe: F, accept: A) -> Result<T>
where
    T: Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    A: Fn(&T) -> bool,
{
    let expected_repr = spec.description.clone();
    wait_inner(spec, probe, accept, no_abort, &expected_repr).await
}

/// 等待探测值满足判定条件，并在观测到终态失败值时立即失败
///
/// 用于子云部署一类的状态机等待：任何 `*-failed` 状态都是终态，
/// 继续等待没有意义。
pub async fn wait_predicate_abort<T, F, Fut, A, B>(
    spec: &PollSpec,
    probe: F,
    accept: A,
    abort: B,
) -> Result<T>
where
    T: Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    A: Fn(&T) -> bool,
    B: Fn(&T) -> bool,
{
    let expected_repr = spec.description.clone();
    wait_inner(spec, probe, accept, abort, &expected_repr).await
}

fn no_abort<T>(_: &T) -> bool {
    false
}

/// 轮询主循环
async fn wait_inner<T, F, Fut, A, B>(
    spec: &PollSpec,
    mut probe: F,
    accept: A,
    abort: B,
    expected_repr: &str,
) -> Result<T>
where
    T: Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    A: Fn(&T) -> bool,
    B: Fn(&T) -> bool,
{
    let start = Instant::now();
    let mut last_observed = String::from("<尚未观测>");
    let mut attempts: u32 = 0;
    let mut probe_errors: u32 = 0;

    loop {
        attempts += 1;

        match probe().await {
            Ok(value) => {
                if abort(&value) {
                    let elapsed = start.elapsed();
                    warn!(
                        "{}: 观测到终态失败值 {:?} (第 {} 次探测)",
                        spec.description, value, attempts
                    );
                    return Err(PollError::FatalState {
                        description: spec.description.clone(),
                        observed: format!("{:?}", value),
                        elapsed,
                    });
                }
                if accept(&value) {
                    debug!(
                        "{}: 第 {} 次探测命中, 耗时 {:?}",
                        spec.description,
                        attempts,
                        start.elapsed()
                    );
                    return Ok(value);
                }
                last_observed = format!("{:?}", value);
            }
            Err(e) => {
                // 瞬态探测错误：记录并继续
                probe_errors += 1;
                last_observed = format!("探测错误: {}", e);
                debug!(
                    "{}: 探测错误 ({} 次): {}",
                    spec.description, probe_errors, e
                );
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= spec.timeout {
            if let Some(ctx) = &spec.context {
                ctx.counters.record_poll_timeout();
            }
            warn!(
                "{}: 超时, 期望 {}, 最后观测 {}, {} 次探测 ({} 次错误)",
                spec.description, expected_repr, last_observed, attempts, probe_errors
            );
            return Err(PollError::Timeout {
                description: spec.description.clone(),
                expected: expected_repr.to_string(),
                last_observed,
                elapsed,
            });
        }

        tokio::time::sleep(spec.interval).await;
    }
}
