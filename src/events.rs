use crate::category::VideoCategory;
use crate::error::EventBusError;
use crate::navigation::Page;
use crate::status::{CrashData, MicStatus, RecStatus, SaveStatus, UpgradeStatus};
use crate::video::VideoIndex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Everything the orchestrator reacts to: user requests from the
/// presentation layer and pushes from the recorder and updater.
#[derive(Debug, Clone)]
pub enum VodnavEvent {
    /// A category tab was clicked
    CategoryRequested { category: VideoCategory },
    /// A settings-menu page was clicked
    PageRequested { page: Page },
    /// A row of the category page was clicked
    VideoSelected { video_name: String },
    /// Step the selection through the visible rows
    SelectionStepped { delta: isize },
    /// Filter text edited
    FilterChanged { query: String },
    /// "Show more" pressed under the video list
    ShowMoreRequested,
    RecorderStatusChanged {
        status: RecStatus,
        error: Option<String>,
    },
    MicStatusChanged { status: MicStatus },
    CrashReported { crash: CrashData },
    CrashesCleared,
    SaveStatusChanged { status: SaveStatus },
    UpgradeStatusChanged { status: UpgradeStatus },
    /// Raw version string pushed by the main process
    VersionDisplayUpdated { raw: String },
    /// The video index was re-read from disk
    VideoIndexRefreshed { index: Arc<VideoIndex> },
    /// Application shutdown requested
    ShutdownRequested {
        timestamp: SystemTime,
        reason: String,
    },
}

impl VodnavEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            VodnavEvent::CategoryRequested { category } => {
                format!("Category requested: {}", category)
            }
            VodnavEvent::PageRequested { page } => format!("Page requested: {:?}", page),
            VodnavEvent::VideoSelected { video_name } => {
                format!("Video selected: {}", video_name)
            }
            VodnavEvent::SelectionStepped { delta } => format!("Selection stepped by {}", delta),
            VodnavEvent::FilterChanged { query } => format!("Filter changed: {:?}", query),
            VodnavEvent::ShowMoreRequested => "Show more requested".to_string(),
            VodnavEvent::RecorderStatusChanged { status, .. } => {
                format!("Recorder status: {:?}", status)
            }
            VodnavEvent::MicStatusChanged { status } => format!("Mic status: {:?}", status),
            VodnavEvent::CrashReported { crash } => format!("Crash reported: {}", crash.reason),
            VodnavEvent::CrashesCleared => "Crashes cleared".to_string(),
            VodnavEvent::SaveStatusChanged { status } => format!("Save status: {:?}", status),
            VodnavEvent::UpgradeStatusChanged { status } => {
                format!("Upgrade status: {:?}", status)
            }
            VodnavEvent::VersionDisplayUpdated { raw } => format!("Version string: {}", raw),
            VodnavEvent::VideoIndexRefreshed { index } => {
                format!("Video index refreshed ({} videos)", index.len())
            }
            VodnavEvent::ShutdownRequested { reason, .. } => {
                format!("Shutdown requested: {}", reason)
            }
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            VodnavEvent::CategoryRequested { .. } => "category_requested",
            VodnavEvent::PageRequested { .. } => "page_requested",
            VodnavEvent::VideoSelected { .. } => "video_selected",
            VodnavEvent::SelectionStepped { .. } => "selection_stepped",
            VodnavEvent::FilterChanged { .. } => "filter_changed",
            VodnavEvent::ShowMoreRequested => "show_more_requested",
            VodnavEvent::RecorderStatusChanged { .. } => "recorder_status_changed",
            VodnavEvent::MicStatusChanged { .. } => "mic_status_changed",
            VodnavEvent::CrashReported { .. } => "crash_reported",
            VodnavEvent::CrashesCleared => "crashes_cleared",
            VodnavEvent::SaveStatusChanged { .. } => "save_status_changed",
            VodnavEvent::UpgradeStatusChanged { .. } => "upgrade_status_changed",
            VodnavEvent::VersionDisplayUpdated { .. } => "version_display_updated",
            VodnavEvent::VideoIndexRefreshed { .. } => "video_index_refreshed",
            VodnavEvent::ShutdownRequested { .. } => "shutdown_requested",
        }
    }
}

/// Queue feeding the orchestrator's event loop.
///
/// Unbounded and single-consumer: a burst of status pushes never displaces
/// a queued user request, and events are applied in publish order.
#[derive(Clone)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<VodnavEvent>,
}

impl EventBus {
    /// Create the bus together with the receiver the event loop drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<VodnavEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Queue an event for the event loop
    pub fn publish(&self, event: VodnavEvent) -> Result<(), EventBusError> {
        debug!("Publishing event: {}", event.description());

        match &event {
            VodnavEvent::RecorderStatusChanged {
                status: RecStatus::FatalError,
                error: Some(message),
            } => {
                error!("Recorder failed: {}", message);
            }
            VodnavEvent::CrashReported { crash } => {
                warn!("Recorder crash reported: {}", crash.reason);
            }
            VodnavEvent::ShutdownRequested { reason, .. } => {
                info!("Shutdown requested: {}", reason);
            }
            _ => {}
        }

        self.sender
            .send(event)
            .map_err(|e| EventBusError::PublishFailed {
                details: format!("event loop stopped, dropped {}", e.0.event_type()),
            })
    }

    /// True once the event loop has stopped receiving
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Counters kept by the event loop
#[derive(Debug, Default)]
pub struct EventMetrics {
    pub total_events: u64,
    pub events_by_type: HashMap<&'static str, u64>,
    pub last_event_time: Option<SystemTime>,
}

impl EventMetrics {
    /// Record an event
    pub fn record_event(&mut self, event: &VodnavEvent) {
        self.total_events += 1;
        *self.events_by_type.entry(event.event_type()).or_insert(0) += 1;
        self.last_event_time = Some(SystemTime::now());
    }

    pub fn count(&self, event_type: &str) -> u64 {
        self.events_by_type.get(event_type).copied().unwrap_or(0)
    }
}
