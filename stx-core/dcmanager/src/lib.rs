//! STX 分布式云适配器
//!
//! `dcmanager` 输出的类型化领域对象与命令前端：
//! - 子云（list / show，健康判定）
//! - 部署状态机（成功终态集合与 `*-failed` 分类）
//! - 生命周期命令前端（add / delete / manage / unmanage /
//!   update / deploy）
//!
//! 所有前端通过 [`stx_cloud_cli::CommandRunner`] 契约执行命令。

mod client;
mod deploy_state;
mod error;
mod subcloud;

pub use client::DcManagerClient;
pub use deploy_state::{validate_target_state, DeployState, DeployStateKind, SUCCESS_TERMINALS};
pub use error::{DcManagerError, Result};
pub use subcloud::{Subcloud, SUBCLOUD_LIST_HEADERS};
