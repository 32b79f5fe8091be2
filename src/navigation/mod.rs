mod navigator;
mod progress;
mod state;

#[cfg(test)]
mod tests;

pub use navigator::Navigator;
pub use progress::PlaybackProgress;
pub use state::{visible_videos, NavigationState, Page, DEFAULT_VIDEOS_DISPLAYED};
