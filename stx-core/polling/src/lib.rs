//! STX 轮询校验器
//!
//! "等待状态 X" 关键字的共用重试/超时引擎。调用方提供探测函数、
//! 期望值（或判定条件）与等待描述，引擎负责单调计时、间隔休眠、
//! 瞬态错误重试，并在预算耗尽时给出完整的期望/观测差值。
//!
//! # 示例
//!
//! ```ignore
//! use stx_polling::{wait_equals, PollSpec};
//!
//! let spec = PollSpec::secs(600, 10, "等待 controller-1 解锁后可用");
//! let availability = wait_equals(
//!     &spec,
//!     || async { Ok(query_host_availability(&cli, "controller-1").await?) },
//!     "available".to_string(),
//! )
//! .await?;
//! ```

mod error;
mod validator;

pub use error::{PollError, Result};
pub use validator::{wait_equals, wait_predicate, wait_predicate_abort, PollSpec};
