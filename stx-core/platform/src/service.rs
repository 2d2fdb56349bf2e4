//! 服务领域对象
//!
//! `system service-list` 输出的类型化视图。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, PlatformError, Result};

/// `system service-list` 的允许表头集合
pub const SERVICE_LIST_HEADERS: [&str; 4] = ["id", "service_name", "hostname", "state"];

/// 平台服务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// 服务 id
    pub id: u32,
    /// 服务名
    pub service_name: String,
    /// 所在主机
    pub hostname: String,
    /// 运行状态（enabled-active / enabled-standby / disabled）
    pub state: String,
}

impl Service {
    /// 从 `system service-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        let id_raw = required(record, "Service", "id")?;
        let id = id_raw
            .parse::<u32>()
            .map_err(|_| PlatformError::InvalidField {
                entity: "Service",
                field: "id",
                value: id_raw.to_string(),
            })?;
        Ok(Self {
            id,
            service_name: required(record, "Service", "service_name")?.to_string(),
            hostname: required(record, "Service", "hostname")?.to_string(),
            state: required(record, "Service", "state")?.to_string(),
        })
    }

    /// 是否为活动实例
    pub fn is_active(&self) -> bool {
        self.state == "enabled-active"
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
    fn test_service_from_list() {
        let output = lines(
            r#"
+----+--------------+--------------+-----------------+
| id | service_name | hostname     | state           |
+----+--------------+--------------+-----------------+
| 1  | oam-services | controller-0 | enabled-active  |
| 2  | oam-services | controller-1 | enabled-standby |
+----+--------------+--------------+-----------------+
"#,
        );
        let prepared = strip_borders(&output);
        let table = TableParser::new(SERVICE_LIST_HEADERS).parse(&prepared).unwrap();
        let services: Vec<Service> = table
            .records()
            .iter()
            .map(|r| Service::from_record(r).unwrap())
            .collect();

        assert_eq!(services.len(), 2);
        assert!(services[0].is_active());
        assert!(!services[1].is_active());
        assert_eq!(services[1].hostname, "controller-1");
    }
}
