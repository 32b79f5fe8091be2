use crate::video::Video;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a recorded session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCategory {
    #[serde(rename = "2v2")]
    TwoVTwo,
    #[serde(rename = "3v3")]
    ThreeVThree,
    #[serde(rename = "5v5")]
    FiveVFive,
    Skirmish,
    #[serde(rename = "Solo Shuffle")]
    SoloShuffle,
    #[serde(rename = "Mythic+")]
    MythicPlus,
    Raids,
    Battlegrounds,
    Clips,
}

impl VideoCategory {
    /// All categories in side-menu order
    pub const ALL: [VideoCategory; 9] = [
        VideoCategory::TwoVTwo,
        VideoCategory::ThreeVThree,
        VideoCategory::FiveVFive,
        VideoCategory::Skirmish,
        VideoCategory::SoloShuffle,
        VideoCategory::MythicPlus,
        VideoCategory::Raids,
        VideoCategory::Battlegrounds,
        VideoCategory::Clips,
    ];

    /// Label shown in the side menu
    pub fn label(&self) -> &'static str {
        match self {
            VideoCategory::TwoVTwo => "2v2",
            VideoCategory::ThreeVThree => "3v3",
            VideoCategory::FiveVFive => "5v5",
            VideoCategory::Skirmish => "Skirmish",
            VideoCategory::SoloShuffle => "Solo Shuffle",
            VideoCategory::MythicPlus => "Mythic+",
            VideoCategory::Raids => "Raids",
            VideoCategory::Battlegrounds => "Battlegrounds",
            VideoCategory::Clips => "Clips",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Index persisted for "no category selected"
pub const NO_CATEGORY_INDEX: i64 = -1;

pub fn category_of(video: &Video) -> VideoCategory {
    video.category
}

/// Menu position of a category, as persisted under `selectedCategory`
pub fn category_index(category: VideoCategory) -> i64 {
    VideoCategory::ALL
        .iter()
        .position(|c| *c == category)
        .map(|i| i as i64)
        .unwrap_or(NO_CATEGORY_INDEX)
}

/// Inverse of [`category_index`]. Anything out of range, including the
/// sentinel, maps to `None`.
pub fn category_from_index(index: i64) -> Option<VideoCategory> {
    usize::try_from(index)
        .ok()
        .and_then(|i| VideoCategory::ALL.get(i).copied())
}

/// Membership predicate for a category. The sentinel matches nothing.
pub fn filter_for(category: Option<VideoCategory>) -> impl Fn(&Video) -> bool {
    move |video: &Video| category.is_some_and(|c| category_of(video) == c)
}

pub fn count_in_category(videos: &[Video], category: Option<VideoCategory>) -> usize {
    let matches = filter_for(category);
    videos.iter().filter(|v| matches(*v)).count()
}

/// Badge counts for every category, in menu order
pub fn category_counts(videos: &[Video]) -> Vec<(VideoCategory, usize)> {
    VideoCategory::ALL
        .iter()
        .map(|c| (*c, count_in_category(videos, Some(*c))))
        .collect()
}
