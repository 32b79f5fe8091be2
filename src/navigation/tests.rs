use super::*;
use crate::category::{count_in_category, filter_for, VideoCategory};
use crate::settings::{MemorySettingsStore, SettingsStore, SELECTED_CATEGORY_KEY};
use crate::video::{Video, VideoIndex};
use std::sync::Arc;

fn create_test_index() -> VideoIndex {
    VideoIndex::new(vec![
        Video::new("raid-b", VideoCategory::Raids, "B")
            .with_encounter("pull-1")
            .with_names("Nerub-ar Palace", "Ulgrax"),
        Video::new("raid-a", VideoCategory::Raids, "A")
            .with_encounter("pull-1")
            .with_names("Nerub-ar Palace", "Ulgrax"),
        Video::new("raid-c", VideoCategory::Raids, "C")
            .with_encounter("pull-1")
            .with_names("Nerub-ar Palace", "Ulgrax"),
        Video::new("raid-2", VideoCategory::Raids, "A")
            .with_encounter("pull-2")
            .with_names("Nerub-ar Palace", "Sikran"),
        Video::new("arena-1", VideoCategory::TwoVTwo, "A").with_names("Nagrand Arena", "2v2"),
        Video::new("clip-1", VideoCategory::Clips, "A"),
    ])
}

fn create_test_navigator() -> (Navigator, Arc<MemorySettingsStore>, PlaybackProgress) {
    let settings = Arc::new(MemorySettingsStore::new());
    let progress = PlaybackProgress::new();
    let navigator = Navigator::new(settings.clone(), progress.clone());
    (navigator, settings, progress)
}

#[test]
fn test_initial_state_is_sentinel() {
    let (navigator, _, _) = create_test_navigator();
    let state = navigator.snapshot();

    assert_eq!(state.page(), Page::Browse);
    assert_eq!(state.category(), None);
    assert_eq!(state.category_index(), -1);
    assert_eq!(state.selected_video_name(), None);
    assert!(state.playing_video().is_none());

    let index = create_test_index();
    assert!(visible_videos(&state, &index).is_empty());
    assert_eq!(count_in_category(index.videos(), state.category()), 0);
    let matches = filter_for(state.category());
    assert!(!index.videos().iter().any(|v| matches(v)));
}

#[test]
fn test_change_category_selects_canonical_pov() {
    let (mut navigator, settings, _) = create_test_navigator();
    let index = create_test_index();

    let state = navigator.change_category(VideoCategory::Raids, &index);

    assert_eq!(state.page(), Page::Browse);
    assert_eq!(state.category(), Some(VideoCategory::Raids));
    assert_eq!(state.selected_video_name(), Some("raid-a"));
    assert_eq!(state.playing_video().unwrap().pov_name, "A");
    assert_eq!(settings.config_value(SELECTED_CATEGORY_KEY), Some(6));
}

#[test]
fn test_change_category_is_idempotent() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    let first = navigator.change_category(VideoCategory::Raids, &index);
    let second = navigator.change_category(VideoCategory::Raids, &index);

    assert_eq!(first.selected_video_name(), second.selected_video_name());
    assert_eq!(first, second);
}

#[test]
fn test_change_category_resets_filter_and_pagination() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    navigator.set_filter_query("foo");
    navigator.show_more_videos(40);
    let before = navigator.snapshot();
    assert_eq!(before.video_filter_query(), "foo");
    assert_eq!(before.num_videos_displayed(), 50);

    let after = navigator.change_category(VideoCategory::Clips, &index);
    assert_eq!(after.video_filter_query(), "");
    assert_eq!(after.num_videos_displayed(), 10);
}

#[test]
fn test_change_category_rewinds_playback() {
    let (mut navigator, _, progress) = create_test_navigator();
    let index = create_test_index();

    progress.set(93.5);
    navigator.change_category(VideoCategory::TwoVTwo, &index);
    assert_eq!(progress.get(), 0.0);
}

#[test]
fn test_empty_category_has_no_selection() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    let state = navigator.change_category(VideoCategory::MythicPlus, &index);

    assert_eq!(state.category(), Some(VideoCategory::MythicPlus));
    assert_eq!(state.selected_video_name(), None);
    assert!(state.playing_video().is_none());
}

#[test]
fn test_change_category_with_empty_index() {
    let (mut navigator, _, _) = create_test_navigator();
    let state = navigator.change_category(VideoCategory::Raids, &VideoIndex::default());
    assert_eq!(state.selected_video_name(), None);
}

#[test]
fn test_change_category_leaves_settings_page() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_page(Page::Settings);
    let state = navigator.change_category(VideoCategory::Clips, &index);
    assert_eq!(state.page(), Page::Browse);
}

#[test]
fn test_page_switch_preserves_browsing_context() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    navigator.set_filter_query("ulgrax");
    navigator.show_more_videos(10);
    let browsing = navigator.snapshot();

    let settings = navigator.change_page(Page::Settings);
    assert_eq!(settings.page(), Page::Settings);
    assert_eq!(settings.category(), browsing.category());
    assert_eq!(settings.selected_video_name(), browsing.selected_video_name());
    assert_eq!(settings.video_filter_query(), "ulgrax");
    assert_eq!(settings.num_videos_displayed(), 20);

    let back = navigator.change_page(Page::Browse);
    assert_eq!(*back, *browsing);
}

#[test]
fn test_snapshots_are_not_mutated() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    let before = navigator.snapshot();
    navigator.change_category(VideoCategory::Raids, &index);

    assert_eq!(before.category(), None);
    assert_eq!(navigator.snapshot().category(), Some(VideoCategory::Raids));
}

#[test]
fn test_unknown_category_index_clears_selection() {
    let (mut navigator, settings, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    let state = navigator.change_category_index(42, &index);

    assert_eq!(state.category(), None);
    assert_eq!(state.selected_video_name(), None);
    assert_eq!(settings.config_value(SELECTED_CATEGORY_KEY), Some(-1));

    let state = navigator.change_category_index(0, &index);
    assert_eq!(state.category(), Some(VideoCategory::TwoVTwo));
    assert_eq!(state.selected_video_name(), Some("arena-1"));
}

#[test]
fn test_select_video_within_category() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    let state = navigator.select_video("raid-c", &index);
    assert_eq!(state.selected_video_name(), Some("raid-c"));

    // Other categories and unknown names are ignored.
    let state = navigator.select_video("clip-1", &index);
    assert_eq!(state.selected_video_name(), Some("raid-c"));
    let state = navigator.select_video("missing", &index);
    assert_eq!(state.selected_video_name(), Some("raid-c"));
}

#[test]
fn test_visible_videos_one_row_per_encounter() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    let state = navigator.change_category(VideoCategory::Raids, &index);
    let rows: Vec<String> = visible_videos(&state, &index)
        .into_iter()
        .map(|v| v.video_name)
        .collect();
    assert_eq!(rows, vec!["raid-a", "raid-2"]);
}

#[test]
fn test_shared_encounter_across_categories_stays_in_category() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = VideoIndex::new(vec![
        Video::new("raid-z", VideoCategory::Raids, "Zed").with_encounter("pull-1"),
        Video::new("clip-a", VideoCategory::Clips, "Amy").with_encounter("pull-1"),
    ]);

    let state = navigator.change_category(VideoCategory::Raids, &index);
    assert_eq!(state.selected_video_name(), Some("raid-z"));
    assert_eq!(
        state.playing_video().map(|v| v.category),
        Some(VideoCategory::Raids)
    );
    let rows = visible_videos(&state, &index);
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|v| v.category == VideoCategory::Raids));

    let state = navigator.change_category(VideoCategory::Clips, &index);
    assert_eq!(state.selected_video_name(), Some("clip-a"));
    let rows = visible_videos(&state, &index);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].video_name, "clip-a");
}

#[test]
fn test_visible_videos_filter_and_pagination() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    let state = navigator.set_filter_query("SIKRAN");
    let rows = visible_videos(&state, &index);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].video_name, "raid-2");

    let many: Vec<Video> = (0..25)
        .map(|i| Video::new(format!("clip-{i}"), VideoCategory::Clips, "A"))
        .collect();
    let index = VideoIndex::new(many);
    let state = navigator.change_category(VideoCategory::Clips, &index);
    assert_eq!(visible_videos(&state, &index).len(), 10);

    let state = navigator.show_more_videos(10);
    assert_eq!(visible_videos(&state, &index).len(), 20);
}

#[test]
fn test_step_selection_moves_through_rows() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();

    navigator.change_category(VideoCategory::Raids, &index);
    let state = navigator.step_selection(1, &index);
    assert_eq!(state.selected_video_name(), Some("raid-2"));

    // Clamped at the end of the list.
    let state = navigator.step_selection(5, &index);
    assert_eq!(state.selected_video_name(), Some("raid-2"));

    let state = navigator.step_selection(-1, &index);
    assert_eq!(state.selected_video_name(), Some("raid-a"));
}

#[test]
fn test_restore_persisted_category() {
    let index = create_test_index();
    let settings = Arc::new(MemorySettingsStore::new());
    settings.set_config_value(SELECTED_CATEGORY_KEY, 8);

    let mut navigator = Navigator::new(settings.clone(), PlaybackProgress::new());
    assert_eq!(navigator.snapshot().category(), None);

    let restored = navigator.restore_persisted_category(&index);
    assert_eq!(restored, Some(VideoCategory::Clips));
    assert_eq!(navigator.snapshot().selected_video_name(), Some("clip-1"));

    settings.set_config_value(SELECTED_CATEGORY_KEY, -1);
    let mut fresh = Navigator::new(settings, PlaybackProgress::new());
    assert_eq!(fresh.restore_persisted_category(&index), None);
    assert_eq!(fresh.snapshot().category(), None);
}

#[test]
fn test_index_refresh_drops_vanished_selection() {
    let (mut navigator, _, _) = create_test_navigator();
    let index = create_test_index();
    navigator.change_category(VideoCategory::Raids, &index);

    let kept = VideoIndex::new(vec![
        Video::new("raid-a", VideoCategory::Raids, "A").with_encounter("pull-1"),
    ]);
    let state = navigator.reconcile_index(&kept);
    assert_eq!(state.selected_video_name(), Some("raid-a"));
    assert_eq!(state.category(), Some(VideoCategory::Raids));

    let state = navigator.reconcile_index(&VideoIndex::default());
    assert_eq!(state.selected_video_name(), None);
    assert!(state.playing_video().is_none());
    assert_eq!(state.category(), Some(VideoCategory::Raids));
}
