//! dcmanager 前端集成测试

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stx_cloud_cli::{CliOutput, CliVerdict, CommandRunner};
use stx_dcmanager::{DcManagerClient, DcManagerError};

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
        let lines = output
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

const SUBCLOUD_LIST: &str = r#"
+----+------------+------------+--------------+---------------+-------------+
| id | name       | management | availability | deploy status | sync        |
+----+------------+------------+--------------+---------------+-------------+
| 1  | subcloud1  | managed    | online       | complete      | in-sync     |
| 2  | subcloud2  | unmanaged  | offline      | install-failed| out-of-sync |
+----+------------+------------+--------------+---------------+-------------+
"#;

#[tokio::test]
async fn test_subcloud_list_end_to_end() {
    let runner = Arc::new(ScriptedRunner::new().respond("dcmanager subcloud list", SUBCLOUD_LIST));
    let dc = DcManagerClient::new(runner.clone());

    let subclouds = dc.subcloud_list().await.unwrap();
    assert_eq!(subclouds.len(), 2);
    assert!(subclouds[0].is_healthy());
    assert!(subclouds[1].deploy_status.is_failed());
    assert_eq!(runner.seen_commands(), vec!["dcmanager subcloud list"]);
}

#[tokio::test]
async fn test_subcloud_by_name_not_found() {
    let runner = Arc::new(ScriptedRunner::new().respond("dcmanager subcloud list", SUBCLOUD_LIST));
    let dc = DcManagerClient::new(runner);

    let found = dc.subcloud("subcloud1").await.unwrap();
    assert_eq!(found.id, 1);

    let err = dc.subcloud("subcloud9").await.unwrap_err();
    assert!(matches!(err, DcManagerError::NotFound(_)));
}

#[tokio::test]
async fn test_subcloud_show_end_to_end() {
    let runner = Arc::new(ScriptedRunner::new().respond(
        "dcmanager subcloud show subcloud1",
        r#"
+------------------+--------------+
| Property         | Value        |
+------------------+--------------+
| id               | 1            |
| name             | subcloud1    |
| description      | lab subcloud |
| location         | None         |
| software_version | 22.12        |
| management       | managed      |
| availability     | online       |
| deploy_status    | complete     |
| sync             | in-sync      |
| backup_status    | None         |
+------------------+--------------+
"#,
    ));
    let dc = DcManagerClient::new(runner);

    let subcloud = dc.subcloud_show("subcloud1").await.unwrap();
    assert!(subcloud.is_healthy());
    assert_eq!(subcloud.description.as_deref(), Some("lab subcloud"));
    assert!(subcloud.location.is_none());
    assert!(subcloud.backup_status.is_none());
}

#[tokio::test]
async fn test_manage_rejection_is_verdict() {
    let runner = Arc::new(ScriptedRunner::new().reject(
        "dcmanager subcloud manage subcloud2",
        1,
        "Subcloud deploy status must be complete",
    ));
    let dc = DcManagerClient::new(runner);

    let verdict = dc.subcloud_manage("subcloud2").await.unwrap();
    match verdict {
        CliVerdict::Rejected { output, .. } => {
            assert!(output.contains("deploy status"));
        }
        CliVerdict::Accepted(_) => panic!("期望 Rejected"),
    }
}

#[tokio::test]
async fn test_add_command_assembly() {
    let expected = "dcmanager subcloud add --bootstrap-address 10.10.10.2 \
                    --bootstrap-values bootstrap.yaml --install-values install.yaml";
    let runner = Arc::new(ScriptedRunner::new().respond(expected, ""));
    let dc = DcManagerClient::new(runner.clone());

    dc.subcloud_add("10.10.10.2", "bootstrap.yaml", Some("install.yaml"))
        .await
        .unwrap();
    assert_eq!(runner.seen_commands(), vec![expected.to_string()]);
}
