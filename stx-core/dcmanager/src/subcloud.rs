//! 子云领域对象
//!
//! `dcmanager subcloud list` / `subcloud show` 输出的类型化视图。
//! 健康判定：online ∧ managed ∧ in-sync ∧ 部署完成。

use serde::{Deserialize, Serialize};

use stx_tabular::{PropertyTable, Record};

use crate::deploy_state::DeployState;
use crate::error::{required, DcManagerError, Result};

/// `dcmanager subcloud list` 的允许表头集合
pub const SUBCLOUD_LIST_HEADERS: [&str; 6] = [
    "id",
    "name",
    "management",
    "availability",
    "deploy status",
    "sync",
];

/// 子云
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcloud {
    /// 子云 id
    pub id: u32,
    /// 子云名
    pub name: String,
    /// 管理状态（managed / unmanaged）
    pub management: String,
    /// 可用状态（online / offline）
    pub availability: String,
    /// 部署状态
    pub deploy_status: DeployState,
    /// 配置同步状态（in-sync / out-of-sync）
    pub sync: String,

    /// 描述（仅 show 输出提供）
    #[serde(default)]
    pub description: Option<String>,
    /// 地理位置（仅 show 输出提供）
    #[serde(default)]
    pub location: Option<String>,
    /// 软件版本（仅 show 输出提供）
    #[serde(default)]
    pub software_version: Option<String>,
    /// 备份状态（仅 show 输出提供）
    #[serde(default)]
    pub backup_status: Option<String>,
}

impl Subcloud {
    /// 从 `dcmanager subcloud list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        let id_raw = required(record, "Subcloud", "id")?;
        let id = id_raw
            .parse::<u32>()
            .map_err(|_| DcManagerError::InvalidField {
                entity: "Subcloud",
                field: "id",
                value: id_raw.to_string(),
            })?;
        Ok(Self {
            id,
            name: required(record, "Subcloud", "name")?.to_string(),
            management: required(record, "Subcloud", "management")?.to_string(),
            availability: required(record, "Subcloud", "availability")?.to_string(),
            deploy_status: DeployState::new(required(record, "Subcloud", "deploy status")?),
            sync: required(record, "Subcloud", "sync")?.to_string(),
            description: None,
            location: None,
            software_version: None,
            backup_status: None,
        })
    }

    /// 从 `dcmanager subcloud show` 的属性表构造
    pub fn from_properties(props: &PropertyTable) -> Result<Self> {
        let get_required = |field: &'static str| -> Result<String> {
            props
                .get_str(field)
                .map(str::to_string)
                .ok_or(DcManagerError::MissingField {
                    entity: "Subcloud",
                    field,
                })
        };
        let optional = |field: &str| {
            props
                .get_str(field)
                .filter(|v| !v.is_empty() && *v != "None")
                .map(str::to_string)
        };

        let id_raw = get_required("id")?;
        let id = id_raw
            .parse::<u32>()
            .map_err(|_| DcManagerError::InvalidField {
                entity: "Subcloud",
                field: "id",
                value: id_raw,
            })?;

        Ok(Self {
            id,
            name: get_required("name")?,
            management: get_required("management")?,
            availability: get_required("availability")?,
            deploy_status: DeployState::new(get_required("deploy_status")?),
            sync: get_required("sync")?,
            description: optional("description"),
            location: optional("location"),
            software_version: optional("software_version"),
            backup_status: optional("backup_status"),
        })
    }

    /// 是否健康：online ∧ managed ∧ in-sync ∧ 部署 complete
    pub fn is_healthy(&self) -> bool {
        self.availability == "online"
            && self.management == "managed"
            && self.sync == "in-sync"
            && self.deploy_status.as_str() == "complete"
    }
}
