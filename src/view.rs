use crate::{
    category::{category_counts, VideoCategory},
    navigation::{visible_videos, NavigationState, Page},
    status::StatusBundle,
    video::{Video, VideoIndex},
};
use std::sync::Arc;

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub navigation: Arc<NavigationState>,
    pub status: StatusBundle,
    /// Badge count per category tab, in menu order
    pub category_counts: Vec<(VideoCategory, usize)>,
    /// Rows of the category page; empty off the browse page
    pub visible_videos: Vec<Video>,
}

impl ViewModel {
    pub fn compose(
        navigation: Arc<NavigationState>,
        index: &VideoIndex,
        status: StatusBundle,
    ) -> Self {
        let visible_videos = if navigation.is_browsing() {
            visible_videos(&navigation, index)
        } else {
            Vec::new()
        };

        Self {
            category_counts: category_counts(index.videos()),
            visible_videos,
            status,
            navigation,
        }
    }

    /// Category tab to highlight. Only while browsing, so the category and
    /// settings menus never both show a selection.
    pub fn highlighted_category(&self) -> Option<VideoCategory> {
        if self.navigation.is_browsing() {
            self.navigation.category()
        } else {
            None
        }
    }

    /// Settings-menu entry to highlight
    pub fn highlighted_page(&self) -> Option<Page> {
        match self.navigation.page() {
            Page::Browse => None,
            page => Some(page),
        }
    }

    /// One-line summary used by the log-based front end
    pub fn summary(&self) -> String {
        let location = match (self.navigation.page(), self.navigation.category()) {
            (Page::Browse, Some(category)) => category.to_string(),
            (Page::Browse, None) => "no category".to_string(),
            (page, _) => format!("{:?}", page),
        };
        let playing = self
            .navigation
            .selected_video_name()
            .unwrap_or("nothing");

        format!(
            "[{}] playing {} | {} rows | recorder {:?} | mic {:?} | {} crashes",
            location,
            playing,
            self.visible_videos.len(),
            self.status.recorder,
            self.status.mic,
            self.status.crashes.len()
        )
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::compose(
            Arc::new(NavigationState::initial()),
            &VideoIndex::default(),
            StatusBundle::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_neutral() {
        let view = ViewModel::default();
        assert_eq!(view.highlighted_category(), None);
        assert_eq!(view.highlighted_page(), None);
        assert!(view.visible_videos.is_empty());
        assert!(view.category_counts.iter().all(|(_, n)| *n == 0));
        assert!(view.summary().starts_with("[no category] playing nothing"));
    }

    #[test]
    fn test_settings_page_hides_category_highlight() {
        let index = VideoIndex::new(vec![Video::new("r", VideoCategory::Raids, "A")]);
        let browsing = NavigationState::initial().with_category(
            Some(VideoCategory::Raids),
            index.get("r").cloned(),
        );
        let settings = browsing.with_page(Page::Settings);

        let view = ViewModel::compose(Arc::new(browsing), &index, StatusBundle::default());
        assert_eq!(view.highlighted_category(), Some(VideoCategory::Raids));
        assert_eq!(view.visible_videos.len(), 1);

        let view = ViewModel::compose(Arc::new(settings), &index, StatusBundle::default());
        assert_eq!(view.highlighted_category(), None);
        assert_eq!(view.highlighted_page(), Some(Page::Settings));
        assert!(view.visible_videos.is_empty());
        // Retained, just not rendered.
        assert_eq!(view.navigation.category(), Some(VideoCategory::Raids));
    }
}
