use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One video in the showcase catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VideoEntry {
    /// Provider-assigned media id.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Short description shown under the player.
    #[serde(default)]
    pub description: String,

    /// Thumbnail image path.
    #[serde(default)]
    pub thumbnail: String,

    /// Signed playback token, empty for public media.
    #[serde(default)]
    pub access_token: String,

    /// Category used by the showcase filter.
    pub category: String,
}

/// Video catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Category names in display order. Categories used by videos but
    /// missing here are still filterable.
    pub categories: Vec<String>,

    /// Videos in display order; the first one is selected on startup.
    pub videos: Vec<VideoEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: ["packaging", "editing", "other"]
                .map(String::from)
                .to_vec(),
            videos: vec![VideoEntry {
                id: "1397757906801587829".to_string(),
                title: "AI对话式互联计划".to_string(),
                description: "我是谁 我擅长什么 我能做什么".to_string(),
                thumbnail: "/thumbnails/video1.jpg".to_string(),
                access_token: String::new(),
                category: "packaging".to_string(),
            }],
        }
    }
}

impl CatalogConfig {
    /// Looks up a video by id.
    pub fn video(&self, id: &str) -> Option<&VideoEntry> {
        self.videos.iter().find(|video| video.id == id)
    }

    /// Videos in the given category, or all videos when `category` is `None`.
    pub fn videos_in<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a VideoEntry> {
        self.videos
            .iter()
            .filter(move |video| category.is_none_or(|c| video.category == c))
    }
}
