use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Recorder state as reported by the capture subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecStatus {
    #[default]
    WaitingForWoW,
    Recording,
    InvalidConfig,
    ReadyToRecord,
    FatalError,
    Overrunning,
    Reconfiguring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MicStatus {
    #[default]
    None,
    Muted,
    Listening,
}

/// One crash of the capture backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashData {
    pub date: DateTime<Utc>,
    pub reason: String,
}

pub type Crashes = Vec<CrashData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveStatus {
    #[default]
    NotSaving,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpgradeStatus {
    #[default]
    UpToDate,
    Available { version: String, link: String },
}

/// Latest value of every status source, read together for one render
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatusBundle {
    pub recorder: RecStatus,
    pub error: Option<String>,
    pub mic: MicStatus,
    pub crashes: Crashes,
    pub save: SaveStatus,
    pub upgrade: UpgradeStatus,
    pub app_version: Option<String>,
}

/// Version shown under the side menu: the text after the first `v` of the
/// raw version string. Anything malformed leaves the display unset.
pub fn parse_version_display(raw: &str) -> Option<String> {
    raw.split('v')
        .nth(1)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Producer side. Each setter touches exactly one slot.
pub struct StatusSources {
    recorder: watch::Sender<RecStatus>,
    error: watch::Sender<Option<String>>,
    mic: watch::Sender<MicStatus>,
    crashes: watch::Sender<Crashes>,
    save: watch::Sender<SaveStatus>,
    upgrade: watch::Sender<UpgradeStatus>,
    app_version: watch::Sender<Option<String>>,
}

/// Reader side. Reads never wait on a producer; a dropped producer leaves
/// its last value in place.
#[derive(Clone)]
pub struct StatusAggregator {
    recorder: watch::Receiver<RecStatus>,
    error: watch::Receiver<Option<String>>,
    mic: watch::Receiver<MicStatus>,
    crashes: watch::Receiver<Crashes>,
    save: watch::Receiver<SaveStatus>,
    upgrade: watch::Receiver<UpgradeStatus>,
    app_version: watch::Receiver<Option<String>>,
}

/// Create a connected pair of status producers and reader
pub fn status_channels() -> (StatusSources, StatusAggregator) {
    let (recorder_tx, recorder_rx) = watch::channel(RecStatus::default());
    let (error_tx, error_rx) = watch::channel(None);
    let (mic_tx, mic_rx) = watch::channel(MicStatus::default());
    let (crashes_tx, crashes_rx) = watch::channel(Crashes::new());
    let (save_tx, save_rx) = watch::channel(SaveStatus::default());
    let (upgrade_tx, upgrade_rx) = watch::channel(UpgradeStatus::default());
    let (version_tx, version_rx) = watch::channel(None);

    (
        StatusSources {
            recorder: recorder_tx,
            error: error_tx,
            mic: mic_tx,
            crashes: crashes_tx,
            save: save_tx,
            upgrade: upgrade_tx,
            app_version: version_tx,
        },
        StatusAggregator {
            recorder: recorder_rx,
            error: error_rx,
            mic: mic_rx,
            crashes: crashes_rx,
            save: save_rx,
            upgrade: upgrade_rx,
            app_version: version_rx,
        },
    )
}

impl StatusSources {
    pub fn set_recorder_status(&self, status: RecStatus, error: Option<String>) {
        match status {
            RecStatus::FatalError | RecStatus::InvalidConfig => {
                warn!("Recorder status {:?}: {}", status, error.as_deref().unwrap_or("-"))
            }
            _ => debug!("Recorder status {:?}", status),
        }
        self.recorder.send_replace(status);
        self.error.send_replace(error);
    }

    pub fn set_mic_status(&self, status: MicStatus) {
        debug!("Microphone status {:?}", status);
        self.mic.send_replace(status);
    }

    pub fn push_crash(&self, crash: CrashData) {
        warn!("Recorder crashed at {}: {}", crash.date, crash.reason);
        self.crashes.send_modify(|crashes| crashes.push(crash));
    }

    pub fn clear_crashes(&self) {
        self.crashes.send_replace(Crashes::new());
    }

    pub fn set_save_status(&self, status: SaveStatus) {
        debug!("Save status {:?}", status);
        self.save.send_replace(status);
    }

    pub fn set_upgrade_status(&self, status: UpgradeStatus) {
        if let UpgradeStatus::Available { version, .. } = &status {
            info!("Upgrade available: {}", version);
        }
        self.upgrade.send_replace(status);
    }

    /// Store the display version parsed from `raw`. Malformed strings clear
    /// nothing and are only logged.
    pub fn update_version_display(&self, raw: &str) {
        match parse_version_display(raw) {
            Some(version) => {
                self.app_version.send_replace(Some(version));
            }
            None => debug!("Ignoring malformed version string {:?}", raw),
        }
    }
}

impl StatusAggregator {
    pub fn recorder(&self) -> RecStatus {
        *self.recorder.borrow()
    }

    pub fn mic(&self) -> MicStatus {
        *self.mic.borrow()
    }

    pub fn crashes(&self) -> Crashes {
        self.crashes.borrow().clone()
    }

    pub fn save(&self) -> SaveStatus {
        *self.save.borrow()
    }

    pub fn upgrade(&self) -> UpgradeStatus {
        self.upgrade.borrow().clone()
    }

    pub fn app_version(&self) -> Option<String> {
        self.app_version.borrow().clone()
    }

    /// Current value of every source, passed through unmodified
    pub fn snapshot(&self) -> StatusBundle {
        StatusBundle {
            recorder: self.recorder(),
            error: self.error.borrow().clone(),
            mic: self.mic(),
            crashes: self.crashes(),
            save: self.save(),
            upgrade: self.upgrade(),
            app_version: self.app_version(),
        }
    }
}
