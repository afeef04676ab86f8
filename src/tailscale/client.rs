use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::config::Config;
use crate::types::BackendError;

use super::api::StatusResponse;
use super::models::{Node, TailnetStatus};

/// Source of tailnet status data. The cache and engine consume this seam
/// so tests can substitute a scripted source for the real CLI.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<TailnetStatus, BackendError>;

    /// Best-effort connection toggle: `down` when currently online, `up`
    /// otherwise. The caller re-checks status afterward rather than
    /// trusting the command's exit code.
    async fn toggle_connection(&self, currently_online: bool);
}

/// Wrapper around the `tailscale` command-line client.
pub struct TailscaleCli {
    binary: String,
    timeout: Duration,
}

impl TailscaleCli {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.tailscale_binary.clone(),
            timeout: config.command_timeout(),
        }
    }

    /// Degrading wrapper: the node list, or empty on any failure.
    pub async fn fetch_nodes(&self) -> Vec<Node> {
        match StatusSource::fetch_status(self).await {
            Ok(status) => status.nodes,
            Err(err) => {
                warn!(error = %err, "Status fetch failed, returning no nodes");
                Vec::new()
            }
        }
    }

    /// Degrading wrapper: the self node's online flag, or false on any
    /// failure.
    pub async fn fetch_self_online(&self) -> bool {
        match StatusSource::fetch_status(self).await {
            Ok(status) => status.self_online,
            Err(err) => {
                warn!(error = %err, "Online check failed, treating as offline");
                false
            }
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, BackendError> {
        let rendered = format!("{} {}", self.binary, args.join(" "));
        let output = timeout(self.timeout, Command::new(&self.binary).args(args).output())
            .await
            .map_err(|_| BackendError::Timeout {
                command: rendered.clone(),
                timeout: self.timeout,
            })??;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(BackendError::Command(if stderr.is_empty() {
            format!("`{}` exited with {}", rendered, output.status)
        } else {
            format!("`{}` failed: {}", rendered, stderr)
        }))
    }
}

fn toggle_args(currently_online: bool) -> &'static [&'static str] {
    if currently_online {
        &["down"]
    } else {
        &["up"]
    }
}

#[async_trait]
impl StatusSource for TailscaleCli {
    async fn fetch_status(&self) -> Result<TailnetStatus, BackendError> {
        let stdout = self.run(&["status", "--json"]).await?;
        let response: StatusResponse = serde_json::from_slice(&stdout)?;
        Ok(TailnetStatus::from_response(response))
    }

    async fn toggle_connection(&self, currently_online: bool) {
        let args = toggle_args(currently_online);
        if let Err(err) = self.run(args).await {
            warn!(error = %err, args = ?args, "Toggle command failed");
        }
    }
}
