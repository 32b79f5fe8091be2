use crate::category::VideoCategory;
use crate::error::Result;
use crate::events::{EventBus, VodnavEvent};
use crate::navigation::Page;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Terminal driver standing in for the side menu and video list
pub struct KeyboardInputHandler {
    event_bus: Arc<EventBus>,
    cancellation_token: CancellationToken,
}

/// Event raised by a key press, if the key is bound.
///
/// `1`-`9` pick categories in menu order, `s`/`e`/`b` switch page,
/// `j`/`k` move through the list, `m` shows more, `q`/`Esc` quit.
pub fn event_for_key(code: KeyCode) -> Option<VodnavEvent> {
    match code {
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c.to_digit(10)? as usize - 1;
            VideoCategory::ALL
                .get(slot)
                .map(|category| VodnavEvent::CategoryRequested {
                    category: *category,
                })
        }
        KeyCode::Char('s') => Some(VodnavEvent::PageRequested {
            page: Page::Settings,
        }),
        KeyCode::Char('e') => Some(VodnavEvent::PageRequested {
            page: Page::SceneEditor,
        }),
        KeyCode::Char('b') => Some(VodnavEvent::PageRequested { page: Page::Browse }),
        KeyCode::Char('j') | KeyCode::Down => Some(VodnavEvent::SelectionStepped { delta: 1 }),
        KeyCode::Char('k') | KeyCode::Up => Some(VodnavEvent::SelectionStepped { delta: -1 }),
        KeyCode::Char('m') => Some(VodnavEvent::ShowMoreRequested),
        KeyCode::Char('q') | KeyCode::Esc => Some(VodnavEvent::ShutdownRequested {
            timestamp: SystemTime::now(),
            reason: "User requested via keyboard".to_string(),
        }),
        _ => None,
    }
}

impl KeyboardInputHandler {
    /// Create a new keyboard input handler
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            event_bus,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Start listening for keyboard input
    pub async fn start(&self) -> Result<()> {
        info!("Starting keyboard input - 1-9 categories, s/e/b pages, j/k select, q quit");

        let event_bus = Arc::clone(&self.event_bus);
        let cancellation_token = self.cancellation_token.clone();

        // Spawn a blocking task to handle keyboard input
        task::spawn_blocking(move || {
            if let Err(e) = enable_raw_mode() {
                error!("Failed to enable raw mode for keyboard input: {}", e);
                return;
            }

            debug!("Raw mode enabled - keyboard handler active");

            loop {
                if cancellation_token.is_cancelled() || event_bus.is_closed() {
                    debug!("Keyboard input handler stopping");
                    break;
                }

                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {
                        let Ok(Event::Key(key_event)) = event::read() else {
                            continue;
                        };
                        // Only handle key press events (not release)
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }

                        let Some(nav_event) = event_for_key(key_event.code) else {
                            debug!("Key pressed: {:?}", key_event.code);
                            continue;
                        };

                        let quitting = matches!(nav_event, VodnavEvent::ShutdownRequested { .. });
                        if let Err(e) = event_bus.publish(nav_event) {
                            warn!("Failed to publish keyboard event: {}", e);
                        }
                        if quitting {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Error polling for keyboard events: {}", e);
                    }
                }
            }

            if let Err(e) = disable_raw_mode() {
                error!("Failed to disable raw mode: {}", e);
            } else {
                debug!("Raw mode disabled");
            }

            debug!("Keyboard input handler task exited");
        });

        Ok(())
    }

    /// Stop the keyboard input handler
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping keyboard input handler");
        self.cancellation_token.cancel();

        // Give the task a moment to clean up and disable raw mode
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Ensure raw mode is disabled even if the task didn't clean up properly
        let _ = disable_raw_mode();

        Ok(())
    }
}
