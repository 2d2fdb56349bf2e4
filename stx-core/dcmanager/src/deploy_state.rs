//! 子云部署状态机
//!
//! 部署流程按 `create → create-complete → installing →
//! install-complete → bootstrapping → bootstrap-complete →
//! (configuring) → complete` 推进。任何 `*-failed` 形态的状态都是
//! 坏终态，轮询一旦观察到必须立即失败而不是等超时。

use serde::{Deserialize, Serialize};

use crate::error::{DcManagerError, Result};

/// 部署流程的成功终态集合
pub const SUCCESS_TERMINALS: [&str; 5] = [
    "complete",
    "complete-local",
    "complete-central",
    "install-complete",
    "bootstrap-complete",
];

/// 部署状态分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployStateKind {
    /// 流程推进中
    InProgress,
    /// 成功终态
    Success,
    /// 失败终态（`*-failed`）
    Failed,
}

/// 子云部署状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployState(String);

impl DeployState {
    /// 从 CLI 输出文本构造
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 原始文本
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 状态分类
    pub fn kind(&self) -> DeployStateKind {
        if self.0.ends_with("-failed") || self.0 == "failed" {
            DeployStateKind::Failed
        } else if SUCCESS_TERMINALS.contains(&self.0.as_str()) {
            DeployStateKind::Success
        } else {
            DeployStateKind::InProgress
        }
    }

    /// 是否为失败终态
    pub fn is_failed(&self) -> bool {
        self.kind() == DeployStateKind::Failed
    }

    /// 是否为成功终态
    pub fn is_success_terminal(&self) -> bool {
        self.kind() == DeployStateKind::Success
    }
}

impl std::fmt::Display for DeployState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 校验轮询目标必须是成功终态之一
pub fn validate_target_state(target: &str) -> Result<()> {
    if SUCCESS_TERMINALS.contains(&target) {
        Ok(())
    } else {
        Err(DcManagerError::InvalidTargetState(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_terminals() {
        for state in SUCCESS_TERMINALS {
            assert!(DeployState::new(state).is_success_terminal(), "{state}");
            assert!(validate_target_state(state).is_ok());
        }
    }

    #[test]
    fn test_failed_classification() {
        for state in [
            "install-failed",
            "bootstrap-failed",
            "config-failed",
            "deploy-failed",
            "failed",
        ] {
            assert!(DeployState::new(state).is_failed(), "{state}");
        }
    }

    #[test]
    fn test_in_progress_states() {
        for state in ["create", "installing", "bootstrapping", "configuring"] {
            let s = DeployState::new(state);
            assert_eq!(s.kind(), DeployStateKind::InProgress, "{state}");
        }
    }

    #[test]
    fn test_invalid_target_rejected() {
        // installing 是过程态，不能作为轮询目标
        let err = validate_target_state("installing").unwrap_err();
        assert!(matches!(err, DcManagerError::InvalidTargetState(_)));
        assert!(validate_target_state("install-failed").is_err());
    }
}
