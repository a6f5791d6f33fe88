use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::analysis::CancelHandle;

/// Turns Ctrl-C into a cancellation of the in-flight analysis run
pub struct ShutdownCoordinator {
    listener: Option<JoinHandle<()>>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self { listener: None }
    }

    /// Install the signal handler. Every Ctrl-C cancels the current run.
    pub fn install_signal_handlers(&mut self, cancel: CancelHandle) {
        info!("Installing signal handler for graceful shutdown");
        self.listener = Some(tokio::spawn(async move {
            loop {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        warn!("Interrupt received, aborting analysis run");
                        cancel.cancel();
                    }
                    Err(e) => {
                        warn!("Failed to listen for interrupt signal: {}", e);
                        break;
                    }
                }
            }
        }));
    }

    pub fn is_installed(&self) -> bool {
        self.listener.is_some()
    }

    /// Stop listening for signals
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            if let Err(e) = listener.await {
                if !e.is_cancelled() {
                    return Err(anyhow::anyhow!("Signal listener failed: {}", e));
                }
            }
        }
        info!("Graceful shutdown completed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisWorkflow;

    #[tokio::test]
    async fn test_install_and_shutdown() {
        let workflow = AnalysisWorkflow::default();
        let mut coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_installed());

        coordinator.install_signal_handlers(workflow.cancel_handle());
        assert!(coordinator.is_installed());

        coordinator.shutdown().await.unwrap();
    }
}
