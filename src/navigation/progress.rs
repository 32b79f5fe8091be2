use parking_lot::Mutex;
use std::sync::Arc;

/// Player position in seconds, shared with the playback collaborator.
///
/// Navigation only ever resets it; the player owns every other write.
#[derive(Debug, Clone, Default)]
pub struct PlaybackProgress {
    seconds: Arc<Mutex<f64>>,
}

impl PlaybackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> f64 {
        *self.seconds.lock()
    }

    pub fn set(&self, seconds: f64) {
        *self.seconds.lock() = seconds;
    }

    pub fn reset(&self) {
        self.set(0.0);
    }
}
