// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const EMBED_BASE: &str = "https://open.spotify.com/embed/episode";

/// How an episode's audio is played back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    /// `src` is a media URL playable by a plain audio element
    Direct,
    /// `src` is a provider locator that needs the embedded player
    Embedded,
}

/// Playback source of an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub src: String,
    pub kind: AudioKind,
}

impl Audio {
    /// MIME type for direct media, or the provider tag for embeds
    pub fn mime_or_kind(&self) -> &'static str {
        match self.kind {
            AudioKind::Direct => "audio/mpeg",
            AudioKind::Embedded => "spotify",
        }
    }
}

/// Normalized episode, derived from one upstream episode object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: String,
    pub title: String,
    /// Upstream release date, as sent (`YYYY-MM-DD`, `YYYY-MM` or `YYYY`)
    pub published: String,
    pub description: String,
    pub html_content: String,
    pub audio: Audio,
    pub duration_ms: u64,
    pub artwork_url: Option<String>,
}

impl EpisodeRecord {
    pub fn is_embedded(&self) -> bool {
        self.audio.kind == AudioKind::Embedded
    }

    /// URL of the embedded player for this episode, `None` for direct media
    pub fn embed_url(&self, autoplay: bool) -> Option<String> {
        self.is_embedded().then(|| {
            format!(
                "{EMBED_BASE}/{}?utm_source=generator&theme=0&autoplay={}",
                self.id,
                u8::from(autoplay)
            )
        })
    }

    /// Release date, padding coarser precisions to the first day
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.published.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d"))
            .or_else(|_| NaiveDate::parse_from_str(&format!("{date}-01-01"), "%Y-%m-%d"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: AudioKind) -> EpisodeRecord {
        EpisodeRecord {
            id: "e1".to_string(),
            title: "T".to_string(),
            published: "2024-01-01".to_string(),
            description: "d".to_string(),
            html_content: "<p>d</p>".to_string(),
            audio: Audio {
                src: "spotify:episode:e1".to_string(),
                kind,
            },
            duration_ms: 1000,
            artwork_url: None,
        }
    }

    #[test]
    fn embed_url_toggles_autoplay() {
        let ep = record(AudioKind::Embedded);
        assert_eq!(
            ep.embed_url(true).unwrap(),
            "https://open.spotify.com/embed/episode/e1?utm_source=generator&theme=0&autoplay=1"
        );
        assert!(ep.embed_url(false).unwrap().ends_with("autoplay=0"));
    }

    #[test]
    fn direct_audio_has_no_embed_url() {
        let ep = record(AudioKind::Direct);
        assert!(ep.embed_url(true).is_none());
        assert_eq!(ep.audio.mime_or_kind(), "audio/mpeg");
    }

    #[test]
    fn published_on_accepts_all_precisions() {
        let mut ep = record(AudioKind::Direct);
        assert_eq!(ep.published_on(), NaiveDate::from_ymd_opt(2024, 1, 1));

        ep.published = "2023-07".to_string();
        assert_eq!(ep.published_on(), NaiveDate::from_ymd_opt(2023, 7, 1));

        ep.published = "2022".to_string();
        assert_eq!(ep.published_on(), NaiveDate::from_ymd_opt(2022, 1, 1));

        ep.published = "someday".to_string();
        assert_eq!(ep.published_on(), None);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&record(AudioKind::Embedded).audio).unwrap();
        assert_eq!(json, r#"{"src":"spotify:episode:e1","kind":"embedded"}"#);
    }
}
