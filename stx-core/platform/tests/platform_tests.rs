//! 平台前端集成测试
//!
//! 使用脚本化执行器注入真实形态的 CLI 输出，验证命令拼装、
//! 解析与领域对象构造的端到端链路。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stx_cloud_cli::{CliOutput, CliVerdict, CommandRunner};
use stx_platform::{FaultClient, PlatformError, SystemClient};

/// 按命令查表的脚本化执行器
struct ScriptedRunner {
    responses: HashMap<String, CliVerdict>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            commands: Mutex::new(Vec::new()),
        }
    }

    fn respond(mut self, command: &str, output: &str) -> Self {
        let lines: Vec<String> = output
            .lines()
            .skip_while(|l| l.is_empty())
            .map(|l| l.to_string())
            .collect();
        self.responses.insert(
            command.to_string(),
            CliVerdict::Accepted(CliOutput::new(command, 0, lines)),
        );
        self
    }

    fn reject(mut self, command: &str, exit_code: u32, output: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            CliVerdict::Rejected {
                command: command.to_string(),
                exit_code,
                output: output.to_string(),
            },
        );
        self
    }

    fn seen_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run_fail_ok(&self, command: &str) -> stx_cloud_cli::Result<CliVerdict> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(self
            .responses
            .get(command)
            .unwrap_or_else(|| panic!("未预置的命令: {command}"))
            .clone())
    }
}

const HOST_LIST: &str = r#"
+----+--------------+-------------+----------------+-------------+--------------+
| id | hostname     | personality | administrative | operational | availability |
+----+--------------+-------------+----------------+-------------+--------------+
| 1  | controller-0 | controller  | unlocked       | enabled     | available    |
| 2  | controller-1 | controller  | unlocked       | enabled     | available    |
| 3  | compute-0    | worker      | unlocked       | enabled     | available    |
+----+--------------+-------------+----------------+-------------+--------------+
"#;

fn host_show_output(hostname: &str, role: &str) -> String {
    let id = if hostname == "controller-0" { 1 } else { 2 };
    format!(
        r#"+----------------+--------------------------------------------------+
| Property       | Value                                            |
+----------------+--------------------------------------------------+
| id             | {id}                                                |
| hostname       | {hostname}                                     |
| personality    | controller                                       |
| administrative | unlocked                                         |
| operational    | enabled                                          |
| availability   | available                                        |
| uptime         | 98432                                            |
| subfunctions   | controller                                       |
| capabilities   | {{'Personality': '{role}'}}            |
+----------------+--------------------------------------------------+"#
    )
}

#[tokio::test]
async fn test_host_list_end_to_end() {
    let runner = Arc::new(ScriptedRunner::new().respond("system host-list", HOST_LIST));
    let system = SystemClient::new(runner.clone());

    let hosts = system.host_list().await.unwrap();
    assert_eq!(hosts.len(), 3);
    assert!(hosts.iter().all(|h| h.is_healthy()));
    assert_eq!(runner.seen_commands(), vec!["system host-list"]);

    let controllers = system.hosts_with_personality("controller").await.unwrap();
    assert_eq!(controllers.len(), 2);
}

#[tokio::test]
async fn test_active_controller_resolution() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .respond("system host-list", HOST_LIST)
            .respond(
                "system host-show controller-0",
                &host_show_output("controller-0", "Controller-Standby"),
            )
            .respond(
                "system host-show controller-1",
                &host_show_output("controller-1", "Controller-Active"),
            ),
    );
    let system = SystemClient::new(runner.clone());

    let active = system.active_controller().await.unwrap();
    assert_eq!(active.name, "controller-1");
    assert!(active.is_active_controller());

    let standby = system.standby_controller().await.unwrap();
    assert_eq!(standby.name, "controller-0");
}

#[tokio::test]
async fn test_host_not_found() {
    let runner = Arc::new(ScriptedRunner::new().respond("system host-list", HOST_LIST));
    let system = SystemClient::new(runner);

    let err = system.host("compute-9").await.unwrap_err();
    assert!(matches!(err, PlatformError::NotFound(_)));
}

#[tokio::test]
async fn test_host_lock_rejection_is_verdict() {
    let runner = Arc::new(ScriptedRunner::new().reject(
        "system host-lock controller-0",
        1,
        "Avoiding lock action on active controller",
    ));
    let system = SystemClient::new(runner);

    // 负向测试路径：拒绝作为裁决值返回
    let verdict = system.host_lock("controller-0").await.unwrap();
    match verdict {
        CliVerdict::Rejected {
            exit_code, output, ..
        } => {
            assert_eq!(exit_code, 1);
            assert!(output.contains("active controller"));
        }
        CliVerdict::Accepted(_) => panic!("期望 Rejected"),
    }
}

#[tokio::test]
async fn test_alarm_list_end_to_end() {
    let runner = Arc::new(ScriptedRunner::new().respond(
        "fm alarm-list",
        r#"
+----------+--------------------------------------+------------------------+----------+----------------------------+
| Alarm ID | Reason Text                          | Entity ID              | Severity | Time Stamp                 |
+----------+--------------------------------------+------------------------+----------+----------------------------+
| 100.104  | filesystem threshold exceeded        | host=controller-0.fs=/ | major    | 2026-02-11T08:14:02.158204 |
+----------+--------------------------------------+------------------------+----------+----------------------------+
"#,
    ));
    let fault = FaultClient::new(runner);

    let alarms = fault.alarm_list().await.unwrap();
    assert_eq!(alarms.len(), 1);
    assert!(alarms[0].matches("100.104", Some("controller-0")));
}

#[tokio::test]
async fn test_empty_alarm_list() {
    let runner = Arc::new(ScriptedRunner::new().respond(
        "fm alarm-list",
        r#"
+----------+-------------+-----------+----------+------------+
| Alarm ID | Reason Text | Entity ID | Severity | Time Stamp |
+----------+-------------+-----------+----------+------------+
+----------+-------------+-----------+----------+------------+
"#,
    ));
    let fault = FaultClient::new(runner);

    let alarms = fault.alarm_list().await.unwrap();
    assert!(alarms.is_empty());
}

#[tokio::test]
async fn test_dns_show_end_to_end() {
    let runner = Arc::new(ScriptedRunner::new().respond(
        "system dns-show",
        r#"
+-------------+--------------------------------------+
| Property    | Value                                |
+-------------+--------------------------------------+
| uuid        | 0dd0a2d3-a3d6-4a8e-b0fc-7efc17f56a9e |
| nameservers | 8.8.8.8,1.1.1.1                      |
+-------------+--------------------------------------+
"#,
    ));
    let system = SystemClient::new(runner);

    let dns = system.dns_show().await.unwrap();
    assert_eq!(dns.nameservers, vec!["8.8.8.8", "1.1.1.1"]);
}

#[tokio::test]
async fn test_event_list_with_limit() {
    let runner = Arc::new(ScriptedRunner::new().respond(
        "fm event-list --limit 5",
        r#"
+----------------------------+-------+--------------+-------------------------------+--------------------+----------+
| Time Stamp                 | State | Event Log ID | Reason Text                   | Entity Instance ID | Severity |
+----------------------------+-------+--------------+-------------------------------+--------------------+----------+
| 2026-02-11T08:14:02.158204 | set   | 100.104      | filesystem threshold exceeded | host=controller-0  | major    |
+----------------------------+-------+--------------+-------------------------------+--------------------+----------+
"#,
    ));
    let fault = FaultClient::new(runner.clone());

    let events = fault.event_list(Some(5)).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].state, "set");
    assert_eq!(runner.seen_commands(), vec!["fm event-list --limit 5"]);
}
