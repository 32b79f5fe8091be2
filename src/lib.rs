pub mod app;
pub mod category;
pub mod config;
pub mod error;
pub mod events;
pub mod keyboard_input;
pub mod navigation;
pub mod resolver;
pub mod settings;
pub mod status;
pub mod video;
pub mod view;

pub use app::{ComponentState, EventOutcome, ShutdownReason, VodnavOrchestrator};
pub use category::{
    category_counts, category_from_index, category_index, category_of, count_in_category,
    filter_for, VideoCategory, NO_CATEGORY_INDEX,
};
pub use config::VodnavConfig;
pub use error::{EventBusError, Result, VodnavError};
pub use events::{EventBus, EventMetrics, VodnavEvent};
pub use navigation::{
    visible_videos, NavigationState, Navigator, Page, PlaybackProgress, DEFAULT_VIDEOS_DISPLAYED,
};
pub use resolver::{pov_name_sort, resolve_first};
pub use settings::{MemorySettingsStore, SettingsStore, TomlSettingsStore, SELECTED_CATEGORY_KEY};
pub use status::{
    parse_version_display, status_channels, CrashData, Crashes, MicStatus, RecStatus,
    SaveStatus, StatusAggregator, StatusBundle, StatusSources, UpgradeStatus,
};
pub use video::{Video, VideoIndex};
pub use view::ViewModel;
