//! dcmanager 命令前端
//!
//! 在 [`CommandRunner`] 契约上封装 `dcmanager subcloud` 的查询与
//! 生命周期命令。生命周期命令（add / delete / manage …）返回
//! 裁决值，负向测试直接断言拒绝信息。

use std::sync::Arc;

use tracing::info;

use stx_cloud_cli::{CliVerdict, CommandRunner};
use stx_tabular::{strip_borders, PropertyParser, TableParser};

use crate::error::{DcManagerError, Result};
use crate::subcloud::{Subcloud, SUBCLOUD_LIST_HEADERS};

/// dcmanager 命令前端
#[derive(Clone)]
pub struct DcManagerClient {
    runner: Arc<dyn CommandRunner>,
}

impl DcManagerClient {
    /// 创建前端
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 列出子云
    pub async fn subcloud_list(&self) -> Result<Vec<Subcloud>> {
        let output = self.runner.run("dcmanager subcloud list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(SUBCLOUD_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(Subcloud::from_record).collect()
    }

    /// 查看单个子云详情
    pub async fn subcloud_show(&self, name: &str) -> Result<Subcloud> {
        let output = self
            .runner
            .run(&format!("dcmanager subcloud show {name}"))
            .await?;
        let props = PropertyParser::new().merge_lines(true).parse(&output.lines)?;
        Subcloud::from_properties(&props)
    }

    /// 按名查子云，未找到时报错
    pub async fn subcloud(&self, name: &str) -> Result<Subcloud> {
        self.subcloud_list()
            .await?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| DcManagerError::NotFound(format!("子云 {name}")))
    }

    /// 添加子云
    pub async fn subcloud_add(
        &self,
        bootstrap_address: &str,
        bootstrap_values: &str,
        install_values: Option<&str>,
    ) -> Result<CliVerdict> {
        let mut command = format!(
            "dcmanager subcloud add --bootstrap-address {bootstrap_address} \
             --bootstrap-values {bootstrap_values}"
        );
        if let Some(values) = install_values {
            command.push_str(&format!(" --install-values {values}"));
        }
        info!("添加子云: {}", bootstrap_address);
        self.runner
            .run_fail_ok(&command)
            .await
            .map_err(Into::into)
    }

    /// 删除子云
    pub async fn subcloud_delete(&self, name: &str) -> Result<CliVerdict> {
        info!("删除子云: {}", name);
        self.runner
            .run_fail_ok(&format!("dcmanager subcloud delete {name}"))
            .await
            .map_err(Into::into)
    }

    /// 纳管子云
    pub async fn subcloud_manage(&self, name: &str) -> Result<CliVerdict> {
        info!("纳管子云: {}", name);
        self.runner
            .run_fail_ok(&format!("dcmanager subcloud manage {name}"))
            .await
            .map_err(Into::into)
    }

    /// 解除纳管
    pub async fn subcloud_unmanage(&self, name: &str) -> Result<CliVerdict> {
        info!("解除纳管: {}", name);
        self.runner
            .run_fail_ok(&format!("dcmanager subcloud unmanage {name}"))
            .await
            .map_err(Into::into)
    }

    /// 更新子云属性（description / location 一类）
    pub async fn subcloud_update(&self, name: &str, field: &str, value: &str) -> Result<CliVerdict> {
        info!("更新子云 {}: {}={}", name, field, value);
        self.runner
            .run_fail_ok(&format!(
                "dcmanager subcloud update {name} --{field} {value}"
            ))
            .await
            .map_err(Into::into)
    }

    /// 触发子云部署
    pub async fn subcloud_deploy(&self, name: &str, phase: &str) -> Result<CliVerdict> {
        info!("子云部署: {} {}", name, phase);
        self.runner
            .run_fail_ok(&format!("dcmanager subcloud deploy {phase} {name}"))
            .await
            .map_err(Into::into)
    }
}
