use serde::Deserialize;

/// Episode object as returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamEpisode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<UpstreamImage>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub audio_preview_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamImage {
    #[serde(default)]
    pub url: String,
}

/// One page of a show's episodes. Unavailable episodes arrive as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodePage {
    #[serde(default)]
    pub items: Vec<Option<UpstreamEpisode>>,
    /// Episodes in the show, across all pages
    #[serde(default)]
    pub total: Option<u32>,
}
