use crate::{
    category::{category_index, filter_for, VideoCategory, NO_CATEGORY_INDEX},
    resolver::sorted_povs,
    video::{Video, VideoIndex},
};
use serde::Serialize;

/// Rows shown after entering a category
pub const DEFAULT_VIDEOS_DISPLAYED: usize = 10;

/// Top-level view mode, independent of the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    /// Browsing recordings of the current category
    Browse,
    Settings,
    SceneEditor,
}

/// What is currently shown.
///
/// Snapshots are never mutated; every transition builds a new one. Fields
/// are private so only this crate can produce states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    page: Page,
    category: Option<VideoCategory>,
    selected_video_name: Option<String>,
    playing_video: Option<Video>,
    video_filter_query: String,
    num_videos_displayed: usize,
}

impl NavigationState {
    /// Start-up state: browsing with no category selected
    pub fn initial() -> Self {
        Self {
            page: Page::Browse,
            category: None,
            selected_video_name: None,
            playing_video: None,
            video_filter_query: String::new(),
            num_videos_displayed: DEFAULT_VIDEOS_DISPLAYED,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn category(&self) -> Option<VideoCategory> {
        self.category
    }

    /// Persisted form of the category, `-1` when none is selected
    pub fn category_index(&self) -> i64 {
        self.category.map(category_index).unwrap_or(NO_CATEGORY_INDEX)
    }

    pub fn selected_video_name(&self) -> Option<&str> {
        self.selected_video_name.as_deref()
    }

    pub fn playing_video(&self) -> Option<&Video> {
        self.playing_video.as_ref()
    }

    pub fn video_filter_query(&self) -> &str {
        &self.video_filter_query
    }

    pub fn num_videos_displayed(&self) -> usize {
        self.num_videos_displayed
    }

    /// True when the category page is the one being rendered
    pub fn is_browsing(&self) -> bool {
        self.page == Page::Browse
    }

    pub(crate) fn with_category(
        &self,
        category: Option<VideoCategory>,
        resolved: Option<Video>,
    ) -> Self {
        Self {
            page: Page::Browse,
            category,
            selected_video_name: resolved.as_ref().map(|v| v.video_name.clone()),
            playing_video: resolved,
            video_filter_query: String::new(),
            num_videos_displayed: DEFAULT_VIDEOS_DISPLAYED,
        }
    }

    pub(crate) fn with_page(&self, page: Page) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub(crate) fn with_selected_video(&self, video: Video) -> Self {
        Self {
            selected_video_name: Some(video.video_name.clone()),
            playing_video: Some(video),
            ..self.clone()
        }
    }

    pub(crate) fn without_selection(&self) -> Self {
        Self {
            selected_video_name: None,
            playing_video: None,
            ..self.clone()
        }
    }

    pub(crate) fn with_filter_query(&self, query: String) -> Self {
        Self {
            video_filter_query: query,
            num_videos_displayed: DEFAULT_VIDEOS_DISPLAYED,
            ..self.clone()
        }
    }

    pub(crate) fn with_more_videos(&self, step: usize) -> Self {
        Self {
            num_videos_displayed: self.num_videos_displayed.saturating_add(step),
            ..self.clone()
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::initial()
    }
}

fn matches_query(video: &Video, query: &str) -> bool {
    let fields = [
        Some(video.video_name.as_str()),
        Some(video.pov_name.as_str()),
        video.zone_name.as_deref(),
        video.encounter_name.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(query))
}

/// Rows of the category page: one canonical point of view per encounter
/// group, narrowed by the filter query and cut to the pagination count.
pub fn visible_videos(state: &NavigationState, index: &VideoIndex) -> Vec<Video> {
    let in_category = filter_for(state.category);
    let query = state.video_filter_query.trim().to_lowercase();
    let mut rows: Vec<Video> = Vec::new();

    for video in index.videos().iter().filter(|v| in_category(*v)) {
        if rows.len() >= state.num_videos_displayed {
            break;
        }
        if rows.iter().any(|row| row.same_encounter(video)) {
            continue;
        }

        let povs = sorted_povs(index, video, state.category);
        if !query.is_empty() && !povs.iter().any(|v| matches_query(v, &query)) {
            continue;
        }
        if let Some(canonical) = povs.first() {
            rows.push((*canonical).clone());
        }
    }

    rows
}
