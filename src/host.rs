use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Optional capability of whatever is embedding the dashboard: told once that the first frame is
/// on screen.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn ready(&self) -> Result<()>;
}

/// Signals readiness by running a shell command, e.g. to tell a wrapping launcher to drop its
/// splash screen.
#[derive(Debug, Clone)]
pub struct CommandHost {
    command: String,
}

impl CommandHost {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

#[async_trait]
impl HostBridge for CommandHost {
    async fn ready(&self) -> Result<()> {
        let status = Command::new("sh")
            .args(["-c", &self.command])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            return Err(anyhow!("ready command exited with {status}"));
        }
        Ok(())
    }
}

/// Holds the bridge until it has been notified; later calls do nothing.
pub struct ReadySignal {
    host: Option<Box<dyn HostBridge>>,
}

impl ReadySignal {
    pub fn new(host: Option<Box<dyn HostBridge>>) -> Self {
        Self { host }
    }

    /// Best effort: the host runs on its own task so a slow one never stalls the caller, and a
    /// failing one is logged and otherwise ignored. Must be called from within the runtime.
    pub fn notify(&mut self) -> Option<JoinHandle<()>> {
        let host = self.host.take()?;
        Some(tokio::spawn(async move {
            match host.ready().await {
                Ok(()) => info!("host notified of first render"),
                Err(err) => warn!(error = %err, "host ready signal failed"),
            }
        }))
    }
}
