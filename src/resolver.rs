use crate::{
    category::{filter_for, VideoCategory},
    video::{Video, VideoIndex},
};
use std::cmp::Ordering;
use tracing::debug;

/// Point-of-view order: case-insensitive player name, then exact name.
/// Equal names keep their index order since callers sort stably.
pub fn pov_name_sort(a: &Video, b: &Video) -> Ordering {
    a.pov_name
        .to_lowercase()
        .cmp(&b.pov_name.to_lowercase())
        .then_with(|| a.pov_name.cmp(&b.pov_name))
}

/// Members of `video`'s encounter group that belong to `category`, ordered
/// by [`pov_name_sort`]. Siblings filed under another category are left out.
pub fn sorted_povs<'a>(
    index: &'a VideoIndex,
    video: &'a Video,
    category: Option<VideoCategory>,
) -> Vec<&'a Video> {
    let in_category = filter_for(category);
    let mut povs: Vec<&Video> = std::iter::once(video)
        .chain(index.multi_pov(video))
        .filter(|v| in_category(*v))
        .collect();
    povs.sort_by(|a, b| pov_name_sort(a, b));
    povs
}

/// Canonical video to show when `category` is entered: the first matching
/// video in index order, swapped for the first point of view of its
/// encounter group.
pub fn resolve_first(index: &VideoIndex, category: Option<VideoCategory>) -> Option<Video> {
    let matches = filter_for(category);
    let first = index.videos().iter().find(|v| matches(*v))?;

    let resolved = sorted_povs(index, first, category).first().map(|v| (*v).clone());

    if let Some(video) = &resolved {
        debug!(
            "Resolved {} for category {:?} (pov {})",
            video.video_name, category, video.pov_name
        );
    }
    resolved
}
