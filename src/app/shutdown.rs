use super::{ComponentState, ShutdownReason, VodnavOrchestrator};
use crate::error::Result;
use tracing::{debug, error, info};

impl VodnavOrchestrator {
    /// Stop background tasks and report the exit code for `reason`
    pub async fn shutdown(&mut self, reason: &ShutdownReason) -> Result<i32> {
        info!("Beginning graceful shutdown");

        // Cancel all background tasks
        self.cancellation_token.cancel();

        let mut exit_code = match reason {
            ShutdownReason::Error(_) => 1,
            _ => 0,
        };

        if self.keyboard_enabled {
            if let Err(e) = self.stop_component("keyboard").await {
                error!("Error stopping keyboard: {}", e);
                exit_code = 1;
            }
        }

        if let Err(e) = self.stop_component("event_loop").await {
            error!("Error stopping event loop: {}", e);
            exit_code = 1;
        }

        if let Err(e) = self.flush_settings().await {
            error!("Error flushing settings: {}", e);
            exit_code = 1;
        }

        info!(
            "Handled {} events before shutdown ({} category changes)",
            self.metrics.total_events,
            self.metrics.count("category_requested")
        );
        info!("Graceful shutdown completed with exit code: {}", exit_code);
        Ok(exit_code)
    }

    /// Stop a specific component
    async fn stop_component(&mut self, component: &str) -> Result<()> {
        match self.get_component_state(component).await {
            None | Some(ComponentState::Stopped) => {
                debug!("Component '{}' not running, nothing to stop", component);
                return Ok(());
            }
            _ => {}
        }

        self.set_component_state(component, ComponentState::Stopping)
            .await;

        if component == "keyboard" {
            if let Some(keyboard_handler) = &self.keyboard_handler {
                keyboard_handler.stop().await?;
            }
        }

        self.set_component_state(component, ComponentState::Stopped)
            .await;
        Ok(())
    }
}
