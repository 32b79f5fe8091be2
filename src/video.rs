use crate::{
    category::VideoCategory,
    error::{Result, VodnavError},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// Descriptor of one recorded session, as written next to the recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_name: String,
    pub category: VideoCategory,
    /// Name of the player the recording was made from
    #[serde(default)]
    pub pov_name: String,
    /// Videos sharing this key are points of view of the same event
    #[serde(default)]
    pub encounter: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub encounter_name: Option<String>,
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub size_bytes: u64,
}

impl Video {
    pub fn new<N: Into<String>, P: Into<String>>(
        video_name: N,
        category: VideoCategory,
        pov_name: P,
    ) -> Self {
        Self {
            video_name: video_name.into(),
            category,
            pov_name: pov_name.into(),
            encounter: None,
            start: None,
            duration_seconds: 0,
            zone_name: None,
            encounter_name: None,
            result: false,
            protected: false,
            size_bytes: 0,
        }
    }

    pub fn with_encounter<S: Into<String>>(mut self, key: S) -> Self {
        self.encounter = Some(key.into());
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_names<Z: Into<String>, E: Into<String>>(mut self, zone: Z, encounter: E) -> Self {
        self.zone_name = Some(zone.into());
        self.encounter_name = Some(encounter.into());
        self
    }

    /// True when both videos belong to the same encounter group
    pub fn same_encounter(&self, other: &Video) -> bool {
        match (&self.encounter, &other.encounter) {
            (Some(a), Some(b)) => a == b,
            _ => self.video_name == other.video_name,
        }
    }
}

/// Ordered, read-only collection of recorded sessions
#[derive(Debug, Clone, Default)]
pub struct VideoIndex {
    videos: Vec<Video>,
}

impl VideoIndex {
    pub fn new(videos: Vec<Video>) -> Self {
        Self { videos }
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn get(&self, video_name: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.video_name == video_name)
    }

    /// The video plus its sibling points of view, in index order
    pub fn encounter_group<'a>(&'a self, video: &'a Video) -> Vec<&'a Video> {
        let mut group: Vec<&Video> = self
            .videos
            .iter()
            .filter(|v| v.same_encounter(video))
            .collect();

        if group.is_empty() {
            // Not from this index; treat it as a group of one.
            debug!("Video {} not present in index", video.video_name);
            group.push(video);
        }
        group
    }

    /// Sibling points of view, excluding the video itself
    pub fn multi_pov<'a>(&'a self, video: &'a Video) -> Vec<&'a Video> {
        self.encounter_group(video)
            .into_iter()
            .filter(|v| v.video_name != video.video_name)
            .collect()
    }

    /// Load every `*.json` metadata sidecar in `dir`, newest first.
    /// Unreadable sidecars are skipped.
    pub async fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        debug!("Scanning for video metadata in: {}", dir.display());

        let mut entries = fs::read_dir(dir).await.map_err(|e| {
            VodnavError::component(
                "video_index",
                format!("Failed to read library directory {}: {}", dir.display(), e),
            )
        })?;

        let mut videos = Vec::new();
        let mut skipped = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = match fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Failed to read metadata {}: {}", path.display(), e);
                    skipped += 1;
                    continue;
                }
            };

            match serde_json::from_str::<Video>(&contents) {
                Ok(video) => videos.push(video),
                Err(e) => {
                    warn!("Skipping malformed metadata {}: {}", path.display(), e);
                    skipped += 1;
                }
            }
        }

        videos.sort_by(newest_first);

        info!(
            "Loaded {} videos from {} ({} skipped)",
            videos.len(),
            dir.display(),
            skipped
        );
        Ok(Self::new(videos))
    }
}

fn newest_first(a: &Video, b: &Video) -> Ordering {
    match (&a.start, &b.start) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.video_name.cmp(&b.video_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encounter_group_and_multi_pov() {
        let index = VideoIndex::new(vec![
            Video::new("a", VideoCategory::Raids, "Alice").with_encounter("pull-1"),
            Video::new("b", VideoCategory::Raids, "Bob").with_encounter("pull-1"),
            Video::new("c", VideoCategory::Raids, "Carol").with_encounter("pull-2"),
            Video::new("d", VideoCategory::Raids, "Dave"),
        ]);

        let a = index.get("a").unwrap();
        let group: Vec<&str> = index
            .encounter_group(a)
            .iter()
            .map(|v| v.video_name.as_str())
            .collect();
        assert_eq!(group, vec!["a", "b"]);

        let siblings = index.multi_pov(a);
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].video_name, "b");

        let d = index.get("d").unwrap();
        assert!(index.multi_pov(d).is_empty());
        assert_eq!(index.encounter_group(d).len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_dir_sorts_and_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();

        let older = Video::new("older", VideoCategory::TwoVTwo, "Alice")
            .with_start(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let newer = Video::new("newer", VideoCategory::Clips, "Alice")
            .with_start(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());

        for video in [&older, &newer] {
            let path = dir.path().join(format!("{}.json", video.video_name));
            std::fs::write(path, serde_json::to_string(video).unwrap()).unwrap();
        }
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let index = VideoIndex::load_from_dir(dir.path()).await.unwrap();
        let names: Vec<&str> = index.videos().iter().map(|v| v.video_name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_load_from_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = VideoIndex::load_from_dir(dir.path().join("missing")).await;
        assert!(matches!(result, Err(VodnavError::Component { .. })));
    }

    #[test]
    fn test_sidecar_field_names() {
        let json = r#"{
            "videoName": "2024-06-01 Raid",
            "category": "Raids",
            "povName": "Alice",
            "encounter": "pull-7",
            "zoneName": "Nerub-ar Palace"
        }"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.category, VideoCategory::Raids);
        assert_eq!(video.encounter.as_deref(), Some("pull-7"));
        assert!(!video.protected);
    }
}
