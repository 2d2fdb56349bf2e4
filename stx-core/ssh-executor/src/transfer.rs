//! 文件传输
//!
//! 使用系统 scp 命令实现上传/下载。传输是流式同步的，超过截止
//! 时间后进程被终止、操作放弃，调用方收到传输失败错误。

use std::path::Path;
use std::process::Stdio;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::client::SshClient;
use crate::error::{Result, SshError};

impl SshClient {
    /// 上传本地文件到远端
    ///
    /// # Arguments
    /// * `local_path` - 本地文件路径
    /// * `remote_path` - 远端目标路径
    pub async fn upload(&self, local_path: &Path, remote_path: &str) -> Result<()> {
        let source = local_path.to_string_lossy().to_string();
        let dest = format!("{}:{}", self.config().target(), remote_path);
        info!("上传文件: {} -> {}", source, dest);

        self.run_scp(&source, &dest, "upload", remote_path).await
    }

    /// 从远端下载文件到本地
    ///
    /// # Arguments
    /// * `remote_path` - 远端文件路径
    /// * `local_path` - 本地目标路径
    pub async fn download(&self, remote_path: &str, local_path: &Path) -> Result<()> {
        let source = format!("{}:{}", self.config().target(), remote_path);
        let dest = local_path.to_string_lossy().to_string();
        info!("下载文件: {} -> {}", source, dest);

        self.run_scp(&source, &dest, "download", remote_path).await
    }

    /// 执行 scp 进程并等待截止时间
    async fn run_scp(
        &self,
        source: &str,
        dest: &str,
        direction: &'static str,
        path: &str,
    ) -> Result<()> {
        let mut cmd = self.base_command("scp")?;
        cmd.arg("-o")
            .arg("StrictHostKeyChecking=no")
            .arg("-o")
            .arg("UserKnownHostsFile=/dev/null")
            .arg("-P")
            .arg(self.config().port.to_string())
            .arg(source)
            .arg(dest);

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| SshError::ExecutionError(format!("启动 scp 进程失败: {}", e)))?;

        let deadline = self.config().transfer_deadline;
        let status = match timeout(deadline, child.wait()).await {
            Ok(result) => {
                result.map_err(|e| SshError::ExecutionError(format!("等待 scp 进程失败: {}", e)))?
            }
            Err(_) => {
                // 截止时间已过：终止进程并放弃本次传输
                warn!("传输超过截止时间 {:?}, 放弃: {}", deadline, path);
                let _ = child.kill().await;
                return Err(SshError::TransferFailed {
                    direction,
                    path: path.to_string(),
                    reason: format!("超过截止时间 {:?}", deadline),
                });
            }
        };

        if !status.success() {
            return Err(SshError::TransferFailed {
                direction,
                path: path.to_string(),
                reason: format!("scp 退出码 {:?}", status.code()),
            });
        }

        debug!("传输完成: {}", path);
        Ok(())
    }
}
