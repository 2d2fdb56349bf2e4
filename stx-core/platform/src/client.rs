//! 平台命令前端
//!
//! 在 [`CommandRunner`] 契约上封装 `system` / `fm` 命令：
//! 拼命令、跑命令、解析输出、构造领域对象。前端不持有 SSH
//! 细节，测试用脚本化执行器注入。

use std::sync::Arc;

use tracing::{debug, info};

use stx_cloud_cli::{CliVerdict, CommandRunner};
use stx_tabular::{strip_borders, PropertyParser, TableParser};

use crate::alarm::{Alarm, Event, ALARM_LIST_HEADERS, EVENT_LIST_HEADERS};
use crate::application::{Application, APPLICATION_LIST_HEADERS};
use crate::error::{PlatformError, Result};
use crate::host::{Host, HOST_LIST_HEADERS};
use crate::network::{AddrPool, Network, ADDRPOOL_LIST_HEADERS, NETWORK_LIST_HEADERS};
use crate::ptp::{
    PtpHostAssignment, PtpInstance, PtpInterface, PtpParameter, PTP_HOST_ASSIGNMENT_HEADERS,
    PTP_INSTANCE_HEADERS, PTP_INTERFACE_HEADERS, PTP_PARAMETER_HEADERS,
};
use crate::service::{Service, SERVICE_LIST_HEADERS};
use crate::show::{DnsConfig, NtpConfig, OamConfig, PtpConfig};

/// `system` 命令前端
#[derive(Clone)]
pub struct SystemClient {
    runner: Arc<dyn CommandRunner>,
}

impl SystemClient {
    /// 创建前端
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 列出主机
    pub async fn host_list(&self) -> Result<Vec<Host>> {
        let output = self.runner.run("system host-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(HOST_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(Host::from_record).collect()
    }

    /// 查看单台主机详情
    pub async fn host_show(&self, hostname: &str) -> Result<Host> {
        let output = self
            .runner
            .run(&format!("system host-show {hostname}"))
            .await?;
        let props = PropertyParser::new().merge_lines(true).parse(&output.lines)?;
        Host::from_properties(&props)
    }

    /// 按主机名查主机，未找到时报错
    pub async fn host(&self, hostname: &str) -> Result<Host> {
        self.host_list()
            .await?
            .into_iter()
            .find(|h| h.name == hostname)
            .ok_or_else(|| PlatformError::NotFound(format!("主机 {hostname}")))
    }

    /// 按角色列主机
    pub async fn hosts_with_personality(&self, personality: &str) -> Result<Vec<Host>> {
        Ok(self
            .host_list()
            .await?
            .into_iter()
            .filter(|h| h.personality == personality)
            .collect())
    }

    /// 活动控制器
    ///
    /// 列表输出不含 capabilities，逐台 show 控制器直到命中
    /// `Controller-Active` 角色。
    pub async fn active_controller(&self) -> Result<Host> {
        self.controller_with_role("Controller-Active").await
    }

    /// 备用控制器
    pub async fn standby_controller(&self) -> Result<Host> {
        self.controller_with_role("Controller-Standby").await
    }

    async fn controller_with_role(&self, role: &str) -> Result<Host> {
        for host in self.hosts_with_personality("controller").await? {
            let detail = self.host_show(&host.name).await?;
            if detail.capabilities.personality() == Some(role) {
                return Ok(detail);
            }
        }
        Err(PlatformError::NotFound(format!("角色为 {role} 的控制器")))
    }

    /// 锁定主机（非零退出码作为裁决值返回）
    pub async fn host_lock(&self, hostname: &str) -> Result<CliVerdict> {
        info!("锁定主机: {}", hostname);
        self.runner
            .run_fail_ok(&format!("system host-lock {hostname}"))
            .await
            .map_err(Into::into)
    }

    /// 解锁主机
    pub async fn host_unlock(&self, hostname: &str) -> Result<CliVerdict> {
        info!("解锁主机: {}", hostname);
        self.runner
            .run_fail_ok(&format!("system host-unlock {hostname}"))
            .await
            .map_err(Into::into)
    }

    /// 控制器主备切换
    pub async fn host_swact(&self, hostname: &str) -> Result<CliVerdict> {
        info!("主备切换: {}", hostname);
        self.runner
            .run_fail_ok(&format!("system host-swact {hostname}"))
            .await
            .map_err(Into::into)
    }

    /// 列出平台服务
    pub async fn service_list(&self) -> Result<Vec<Service>> {
        let output = self.runner.run("system service-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(SERVICE_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(Service::from_record).collect()
    }

    /// 列出平台应用
    pub async fn application_list(&self) -> Result<Vec<Application>> {
        let output = self.runner.run("system application-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(APPLICATION_LIST_HEADERS).parse(&prepared)?;
        table
            .records()
            .iter()
            .map(Application::from_record)
            .collect()
    }

    /// 列出地址池
    pub async fn addrpool_list(&self) -> Result<Vec<AddrPool>> {
        let output = self.runner.run("system addrpool-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(ADDRPOOL_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(AddrPool::from_record).collect()
    }

    /// 列出平台网络
    pub async fn network_list(&self) -> Result<Vec<Network>> {
        let output = self.runner.run("system network-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(NETWORK_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(Network::from_record).collect()
    }

    /// DNS 配置
    pub async fn dns_show(&self) -> Result<DnsConfig> {
        let output = self.runner.run("system dns-show").await?;
        let props = PropertyParser::new().parse(&output.lines)?;
        DnsConfig::from_properties(&props)
    }

    /// NTP 配置
    pub async fn ntp_show(&self) -> Result<NtpConfig> {
        let output = self.runner.run("system ntp-show").await?;
        let props = PropertyParser::new().parse(&output.lines)?;
        NtpConfig::from_properties(&props)
    }

    /// OAM 配置
    pub async fn oam_show(&self) -> Result<OamConfig> {
        let output = self.runner.run("system oam-show").await?;
        let props = PropertyParser::new().parse(&output.lines)?;
        OamConfig::from_properties(&props)
    }

    /// 旧式 PTP 配置
    pub async fn ptp_show(&self) -> Result<PtpConfig> {
        let output = self.runner.run("system ptp-show").await?;
        let props = PropertyParser::new().parse(&output.lines)?;
        PtpConfig::from_properties(&props)
    }

    /// 列出 PTP 实例
    pub async fn ptp_instance_list(&self) -> Result<Vec<PtpInstance>> {
        let output = self.runner.run("system ptp-instance-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(PTP_INSTANCE_HEADERS).parse(&prepared)?;
        table
            .records()
            .iter()
            .map(PtpInstance::from_record)
            .collect()
    }

    /// 列出 PTP 接口
    pub async fn ptp_interface_list(&self) -> Result<Vec<PtpInterface>> {
        let output = self.runner.run("system ptp-interface-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(PTP_INTERFACE_HEADERS).parse(&prepared)?;
        table
            .records()
            .iter()
            .map(PtpInterface::from_record)
            .collect()
    }

    /// 列出 PTP 实例参数
    pub async fn ptp_parameter_list(&self, instance: &str) -> Result<Vec<PtpParameter>> {
        let output = self
            .runner
            .run(&format!("system ptp-instance-parameter-list {instance}"))
            .await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(PTP_PARAMETER_HEADERS).parse(&prepared)?;
        table
            .records()
            .iter()
            .map(PtpParameter::from_record)
            .collect()
    }

    /// 列出 PTP 实例的主机分配
    pub async fn ptp_host_list(&self, instance: &str) -> Result<Vec<PtpHostAssignment>> {
        let output = self
            .runner
            .run(&format!("system ptp-instance-host-list {instance}"))
            .await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(PTP_HOST_ASSIGNMENT_HEADERS).parse(&prepared)?;
        table
            .records()
            .iter()
            .map(PtpHostAssignment::from_record)
            .collect()
    }
}

/// `fm` 告警命令前端
#[derive(Clone)]
pub struct FaultClient {
    runner: Arc<dyn CommandRunner>,
}

impl FaultClient {
    /// 创建前端
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 列出活动告警
    pub async fn alarm_list(&self) -> Result<Vec<Alarm>> {
        let output = self.runner.run("fm alarm-list").await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(ALARM_LIST_HEADERS).parse(&prepared)?;
        let alarms: Result<Vec<Alarm>> =
            table.records().iter().map(Alarm::from_record).collect();
        let alarms = alarms?;
        debug!("当前活动告警: {} 条", alarms.len());
        Ok(alarms)
    }

    /// 列出事件记录
    pub async fn event_list(&self, limit: Option<u32>) -> Result<Vec<Event>> {
        let command = match limit {
            Some(n) => format!("fm event-list --limit {n}"),
            None => "fm event-list".to_string(),
        };
        let output = self.runner.run(&command).await?;
        let prepared = strip_borders(&output.lines);
        let table = TableParser::new(EVENT_LIST_HEADERS).parse(&prepared)?;
        table.records().iter().map(Event::from_record).collect()
    }

    /// 抑制指定告警编号
    pub async fn alarm_suppress(&self, alarm_id: &str) -> Result<CliVerdict> {
        info!("抑制告警: {}", alarm_id);
        self.runner
            .run_fail_ok(&format!("fm event-suppress --alarm_id {alarm_id}"))
            .await
            .map_err(Into::into)
    }

    /// 解除指定告警编号的抑制
    pub async fn alarm_unsuppress(&self, alarm_id: &str) -> Result<CliVerdict> {
        info!("解除告警抑制: {}", alarm_id);
        self.runner
            .run_fail_ok(&format!("fm event-unsuppress --alarm_id {alarm_id}"))
            .await
            .map_err(Into::into)
    }
}
