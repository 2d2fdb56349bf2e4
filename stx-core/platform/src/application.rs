//! 应用领域对象
//!
//! `system application-list` 输出的类型化视图。
//! `applied` 是应用生命周期的成功终态；`uploading` / `applying`
//! 等进行态靠 progress 列观察进度。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, Result};

/// `system application-list` 的允许表头集合
pub const APPLICATION_LIST_HEADERS: [&str; 5] =
    ["application", "version", "manifest name", "status", "progress"];

/// 应用生命周期成功终态
pub const APPLICATION_APPLIED: &str = "applied";

/// 平台应用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// 应用名
    pub name: String,
    /// 版本
    pub version: String,
    /// 清单名
    pub manifest: String,
    /// 生命周期状态（uploaded / applying / applied / remove-failed ...）
    pub status: String,
    /// 进度描述
    pub progress: String,
}

impl Application {
    /// 从 `system application-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "Application", "application")?.to_string(),
            version: required(record, "Application", "version")?.to_string(),
            manifest: required(record, "Application", "manifest name")?.to_string(),
            status: required(record, "Application", "status")?.to_string(),
            progress: required(record, "Application", "progress")?.to_string(),
        })
    }

    /// 是否已达成功终态
    pub fn is_applied(&self) -> bool {
        self.status == APPLICATION_APPLIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stx_tabular::{strip_borders, TableParser};

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_application_from_list() {
        let output = lines(
            r#"
+--------------------------+---------+-------------------------------+----------+-----------+
| application              | version | manifest name                 | status   | progress  |
+--------------------------+---------+-------------------------------+----------+-----------+
| cert-manager             | 1.0-44  | cert-manager-manifest         | applied  | completed |
| platform-integ-apps      | 1.0-65  | platform-integration-manifest | applying | 48%       |
+--------------------------+---------+-------------------------------+----------+-----------+
"#,
        );
        let prepared = strip_borders(&output);
        let table = TableParser::new(APPLICATION_LIST_HEADERS)
            .parse(&prepared)
            .unwrap();
        let apps: Vec<Application> = table
            .records()
            .iter()
            .map(|r| Application::from_record(r).unwrap())
            .collect();

        assert_eq!(apps.len(), 2);
        assert!(apps[0].is_applied());
        assert!(!apps[1].is_applied());
        assert_eq!(apps[1].progress, "48%");
    }
}
