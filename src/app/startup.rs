use super::{ComponentState, VodnavOrchestrator};
use crate::error::Result;
use tracing::{error, info};

impl VodnavOrchestrator {
    /// Register components and publish the start-up view
    pub async fn initialize(&mut self) -> Result<()> {
        info!("Initializing vodnav components");

        let mut states = self.component_states.lock().await;
        states.insert("video_index".to_string(), ComponentState::Running);
        states.insert("event_loop".to_string(), ComponentState::Stopped);

        // Only register keyboard component if enabled
        if self.keyboard_enabled {
            states.insert("keyboard".to_string(), ComponentState::Stopped);
        }
        drop(states);

        info!(
            "{} videos indexed, starting with no category selected",
            self.index.len()
        );
        self.publish_view();
        Ok(())
    }

    /// Re-enter the category persisted by a previous session
    pub fn restore_persisted_category(&mut self) {
        if self
            .navigator
            .restore_persisted_category(&self.index)
            .is_some()
        {
            self.publish_view();
        }
    }

    /// Start input handling
    pub async fn start(&mut self) -> Result<()> {
        info!("Starting vodnav");

        if self.keyboard_enabled {
            if let Some(keyboard_handler) = &self.keyboard_handler {
                self.set_component_state("keyboard", ComponentState::Starting)
                    .await;

                if let Err(e) = keyboard_handler.start().await {
                    error!("Failed to start keyboard input: {}", e);
                    self.set_component_state("keyboard", ComponentState::Failed)
                        .await;
                    return Err(e);
                }

                self.set_component_state("keyboard", ComponentState::Running)
                    .await;
            }
        }

        info!("Vodnav started");
        Ok(())
    }
}
