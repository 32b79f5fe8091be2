use super::{ComponentState, EventOutcome, ShutdownReason, VodnavOrchestrator};
use crate::error::{Result, VodnavError};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::{oneshot, Mutex};
use tracing::{info, warn};

impl VodnavOrchestrator {
    /// Drain the event bus one event at a time until shutdown is requested
    /// on the bus or by a signal. Returns the process exit code.
    pub async fn run(&mut self) -> Result<i32> {
        info!("Vodnav is running");

        let mut receiver = self
            .event_receiver
            .take()
            .ok_or_else(|| VodnavError::System {
                message: "Event receiver already taken".to_string(),
            })?;

        let (shutdown_sender, mut shutdown_receiver) = oneshot::channel();
        self.setup_signal_handlers(shutdown_sender);
        let mut signals_armed = true;

        self.set_component_state("event_loop", ComponentState::Running)
            .await;

        let shutdown_reason = loop {
            tokio::select! {
                // Queued events are drained before a signal is honoured.
                biased;

                received = receiver.recv() => match received {
                    Some(event) => {
                        if let EventOutcome::Shutdown(reason) = self.handle_event(event) {
                            break reason;
                        }
                    }
                    None => {
                        break ShutdownReason::Error("Event bus closed".to_string());
                    }
                },
                signal = &mut shutdown_receiver, if signals_armed => match signal {
                    Ok(reason) => break reason,
                    Err(_) => {
                        warn!("Signal handlers exited, continuing without them");
                        signals_armed = false;
                    }
                },
            }
        };

        info!("Shutdown initiated: {:?}", shutdown_reason);

        let exit_code = self.shutdown(&shutdown_reason).await?;

        info!("Vodnav shutdown complete");
        Ok(exit_code)
    }

    /// Set up signal handlers for graceful shutdown
    fn setup_signal_handlers(&self, shutdown_sender: oneshot::Sender<ShutdownReason>) {
        let shutdown_sender = Arc::new(Mutex::new(Some(shutdown_sender)));
        let token = self.cancellation_token.clone();

        // Handle SIGTERM - Unix only
        #[cfg(unix)]
        {
            let shutdown_sender_sigterm = Arc::clone(&shutdown_sender);
            let token = token.clone();
            tokio::spawn(async move {
                let mut sigterm =
                    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                        Ok(sigterm) => sigterm,
                        Err(e) => {
                            warn!("Failed to register SIGTERM handler: {}", e);
                            return;
                        }
                    };

                tokio::select! {
                    _ = token.cancelled() => {}
                    Some(()) = sigterm.recv() => {
                        info!("Received SIGTERM signal");
                        if let Some(sender) = shutdown_sender_sigterm.lock().await.take() {
                            let _ = sender.send(ShutdownReason::Signal("SIGTERM".to_string()));
                        }
                    }
                }
            });
        }

        // Handle SIGINT (Ctrl+C) - Cross-platform
        let shutdown_sender_sigint = Arc::clone(&shutdown_sender);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                Ok(()) = signal::ctrl_c() => {
                    info!("Received SIGINT signal (Ctrl+C)");
                    if let Some(sender) = shutdown_sender_sigint.lock().await.take() {
                        let _ = sender.send(ShutdownReason::Signal("SIGINT".to_string()));
                    }
                }
            }
        });
    }
}
