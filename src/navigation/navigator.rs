use super::progress::PlaybackProgress;
use super::state::{visible_videos, NavigationState, Page};
use crate::{
    category::{category_from_index, category_index, VideoCategory, NO_CATEGORY_INDEX},
    resolver::resolve_first,
    settings::{SettingsStore, SELECTED_CATEGORY_KEY},
    video::VideoIndex,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owner of the current [`NavigationState`] and the only way to change it.
///
/// Every operation is total: bad input degrades to "nothing selected"
/// rather than an error.
pub struct Navigator {
    state: Arc<NavigationState>,
    settings: Arc<dyn SettingsStore>,
    progress: PlaybackProgress,
}

impl Navigator {
    pub fn new(settings: Arc<dyn SettingsStore>, progress: PlaybackProgress) -> Self {
        Self {
            state: Arc::new(NavigationState::initial()),
            settings,
            progress,
        }
    }

    /// Current snapshot. Cheap to clone and never partially updated.
    pub fn snapshot(&self) -> Arc<NavigationState> {
        Arc::clone(&self.state)
    }

    pub fn progress(&self) -> &PlaybackProgress {
        &self.progress
    }

    fn replace(&mut self, next: NavigationState) -> Arc<NavigationState> {
        self.state = Arc::new(next);
        self.snapshot()
    }

    /// Enter a category: persist it, pick its canonical video, rewind the
    /// player and reset filter and pagination.
    pub fn change_category(
        &mut self,
        category: VideoCategory,
        index: &VideoIndex,
    ) -> Arc<NavigationState> {
        self.apply_category(Some(category), index)
    }

    /// Same as [`Navigator::change_category`] for a persisted menu index.
    /// Unknown indices land on the "no category" state.
    pub fn change_category_index(&mut self, raw: i64, index: &VideoIndex) -> Arc<NavigationState> {
        let category = category_from_index(raw);
        if category.is_none() && raw != NO_CATEGORY_INDEX {
            warn!("Unknown category index {}, clearing selection", raw);
        }
        self.apply_category(category, index)
    }

    fn apply_category(
        &mut self,
        category: Option<VideoCategory>,
        index: &VideoIndex,
    ) -> Arc<NavigationState> {
        let next_index = category.map(category_index).unwrap_or(NO_CATEGORY_INDEX);
        self.settings.set_config_value(SELECTED_CATEGORY_KEY, next_index);

        let resolved = resolve_first(index, category);
        self.progress.reset();

        match (&category, &resolved) {
            (Some(c), Some(v)) => info!("Category {} selected, showing {}", c, v.video_name),
            (Some(c), None) => info!("Category {} selected, nothing to show", c),
            (None, _) => info!("Category selection cleared"),
        }

        let next = self.state.with_category(category, resolved);
        self.replace(next)
    }

    /// Switch page. Category, selection, filter and pagination are kept for
    /// when browsing resumes.
    pub fn change_page(&mut self, page: Page) -> Arc<NavigationState> {
        debug!("Page changed: {:?} -> {:?}", self.state.page(), page);
        let next = self.state.with_page(page);
        self.replace(next)
    }

    /// Play `video_name` if it belongs to the current category
    pub fn select_video(&mut self, video_name: &str, index: &VideoIndex) -> Arc<NavigationState> {
        let Some(video) = index.get(video_name) else {
            debug!("Ignoring selection of unknown video {}", video_name);
            return self.snapshot();
        };

        if Some(video.category) != self.state.category() {
            debug!(
                "Ignoring selection of {} outside category {:?}",
                video_name,
                self.state.category()
            );
            return self.snapshot();
        }

        let next = self.state.with_selected_video(video.clone());
        self.replace(next)
    }

    /// Move the selection `delta` rows through the visible list. With no
    /// current row the first one is selected.
    pub fn step_selection(&mut self, delta: isize, index: &VideoIndex) -> Arc<NavigationState> {
        let rows = visible_videos(&self.state, index);
        if rows.is_empty() {
            return self.snapshot();
        }

        let current = self.state.selected_video_name().and_then(|name| {
            rows.iter().position(|row| {
                index
                    .get(name)
                    .is_some_and(|selected| row.same_encounter(selected))
            })
        });

        let target = match current {
            Some(pos) => pos
                .saturating_add_signed(delta)
                .min(rows.len() - 1),
            None => 0,
        };

        let next = self.state.with_selected_video(rows[target].clone());
        self.replace(next)
    }

    pub fn set_filter_query<S: Into<String>>(&mut self, query: S) -> Arc<NavigationState> {
        let next = self.state.with_filter_query(query.into());
        self.replace(next)
    }

    pub fn show_more_videos(&mut self, step: usize) -> Arc<NavigationState> {
        let next = self.state.with_more_videos(step);
        self.replace(next)
    }

    /// Check the selection against a freshly loaded index. A selected video
    /// that is no longer on disk is dropped; category, page, filter and
    /// pagination are kept.
    pub fn reconcile_index(&mut self, index: &VideoIndex) -> Arc<NavigationState> {
        let Some(name) = self.state.selected_video_name() else {
            return self.snapshot();
        };
        if index.get(name).is_some() {
            return self.snapshot();
        }

        info!("Selected video {} left the index, clearing selection", name);
        let next = self.state.without_selection();
        self.replace(next)
    }

    /// Re-enter the category persisted by a previous session, if any.
    pub fn restore_persisted_category(&mut self, index: &VideoIndex) -> Option<VideoCategory> {
        let raw = self.settings.config_value(SELECTED_CATEGORY_KEY)?;
        let Some(category) = category_from_index(raw) else {
            warn!("Ignoring persisted category index {}", raw);
            return None;
        };

        info!("Restoring persisted category {}", category);
        self.change_category(category, index);
        Some(category)
    }
}
