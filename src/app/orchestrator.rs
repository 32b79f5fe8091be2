use super::types::ComponentState;
use crate::config::VodnavConfig;
use crate::error::Result;
use crate::events::{EventBus, EventMetrics, VodnavEvent};
use crate::keyboard_input::KeyboardInputHandler;
use crate::navigation::{NavigationState, Navigator, PlaybackProgress};
use crate::settings::{SettingsStore, TomlSettingsStore};
use crate::status::{status_channels, StatusAggregator, StatusSources};
use crate::video::VideoIndex;
use crate::view::ViewModel;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Single logical thread of the application: drains the event bus, applies
/// navigation transitions and status pushes, and publishes a fresh
/// [`ViewModel`] after every event.
pub struct VodnavOrchestrator {
    pub(super) config: VodnavConfig,
    pub(super) event_bus: Arc<EventBus>,
    pub(super) event_receiver: Option<mpsc::UnboundedReceiver<VodnavEvent>>,

    pub(super) navigator: Navigator,
    pub(super) settings: Arc<dyn SettingsStore>,
    pub(super) index: Arc<VideoIndex>,
    pub(super) status_sources: StatusSources,
    pub(super) status: StatusAggregator,
    pub(super) view_sender: watch::Sender<ViewModel>,
    pub(super) metrics: EventMetrics,

    pub(super) keyboard_handler: Option<KeyboardInputHandler>,
    pub(super) keyboard_enabled: bool,

    // Lifecycle management
    pub(super) component_states: Arc<Mutex<HashMap<String, ComponentState>>>,
    pub(super) cancellation_token: CancellationToken,
}

impl VodnavOrchestrator {
    /// Create an orchestrator over an already loaded index and settings store
    pub fn new(config: VodnavConfig, index: VideoIndex, settings: Arc<dyn SettingsStore>) -> Self {
        let (event_bus, event_receiver) = EventBus::channel();
        let event_bus = Arc::new(event_bus);
        let event_receiver = Some(event_receiver);

        let navigator = Navigator::new(Arc::clone(&settings), PlaybackProgress::new());
        let index = Arc::new(index);
        let (status_sources, status) = status_channels();

        let initial_view =
            ViewModel::compose(navigator.snapshot(), &index, status.snapshot());
        let (view_sender, _) = watch::channel(initial_view);

        let keyboard_handler = Some(KeyboardInputHandler::new(Arc::clone(&event_bus)));
        let keyboard_enabled = config.system.keyboard_input;

        Self {
            config,
            event_bus,
            event_receiver,
            navigator,
            settings,
            index,
            status_sources,
            status,
            view_sender,
            metrics: EventMetrics::default(),
            keyboard_handler,
            keyboard_enabled,
            component_states: Arc::new(Mutex::new(HashMap::new())),
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Build from configuration: load the library index and open the
    /// persisted settings. A missing library starts with an empty index.
    pub async fn from_config(config: VodnavConfig) -> Result<Self> {
        let index = load_index_or_empty(&config.library.path).await;
        let settings =
            Arc::new(TomlSettingsStore::open(&config.navigation.settings_path).await?);
        info!("Settings persisted to {}", settings.path().display());

        Ok(Self::new(config, index, settings))
    }

    /// Wait for queued settings writes to reach storage
    pub async fn flush_settings(&self) -> Result<()> {
        self.settings.flush().await
    }

    /// Enable or disable the keyboard input handler
    pub fn set_keyboard_enabled(&mut self, enabled: bool) {
        self.keyboard_enabled = enabled;
    }

    /// Bus used by the presentation layer to raise change requests
    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Receiver of every published view model
    pub fn subscribe_view(&self) -> watch::Receiver<ViewModel> {
        self.view_sender.subscribe()
    }

    pub fn view_model(&self) -> ViewModel {
        self.view_sender.borrow().clone()
    }

    pub fn navigation(&self) -> Arc<NavigationState> {
        self.navigator.snapshot()
    }

    pub fn status(&self) -> &StatusAggregator {
        &self.status
    }

    pub fn playback_progress(&self) -> &PlaybackProgress {
        self.navigator.progress()
    }

    pub fn metrics(&self) -> &EventMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &VodnavConfig {
        &self.config
    }
}

async fn load_index_or_empty(path: &str) -> VideoIndex {
    if !Path::new(path).exists() {
        warn!("Library directory {} does not exist, starting empty", path);
        return VideoIndex::default();
    }

    match VideoIndex::load_from_dir(path).await {
        Ok(index) => index,
        Err(e) => {
            warn!("Failed to load video index: {}", e);
            VideoIndex::default()
        }
    }
}
