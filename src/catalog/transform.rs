// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::episode::{Audio, AudioKind, EpisodeRecord};

use super::upstream::{UpstreamEpisode, UpstreamImage};

/// Map a provider episode onto the local record
pub fn to_episode_record(upstream: &UpstreamEpisode) -> EpisodeRecord {
    EpisodeRecord {
        id: upstream.id.clone(),
        title: upstream.name.clone(),
        published: upstream.release_date.clone(),
        description: upstream.description.clone(),
        // Passed through unsanitized
        html_content: format!("<p>{}</p>", upstream.description),
        audio: select_audio(upstream),
        duration_ms: upstream.duration_ms,
        artwork_url: select_artwork(&upstream.images),
    }
}

/// The provider lists images largest first; prefer the last (smallest)
pub fn select_artwork(images: &[UpstreamImage]) -> Option<String> {
    let usable = |img: &UpstreamImage| Some(img.url.clone()).filter(|u| !u.is_empty());
    images
        .last()
        .and_then(usable)
        .or_else(|| images.first().and_then(usable))
}

fn select_audio(upstream: &UpstreamEpisode) -> Audio {
    match upstream
        .audio_preview_url
        .as_deref()
        .filter(|u| !u.is_empty())
    {
        Some(preview) => Audio {
            src: preview.to_string(),
            kind: AudioKind::Direct,
        },
        None => Audio {
            src: format!("spotify:episode:{}", upstream.id),
            kind: AudioKind::Embedded,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> UpstreamImage {
        UpstreamImage {
            url: url.to_string(),
        }
    }

    fn upstream(images: Vec<UpstreamImage>, preview: Option<&str>) -> UpstreamEpisode {
        UpstreamEpisode {
            id: "e1".to_string(),
            name: "T".to_string(),
            release_date: "2024-01-01".to_string(),
            description: "d & <b>bold</b>".to_string(),
            images,
            duration_ms: 1000,
            audio_preview_url: preview.map(String::from),
        }
    }

    #[test]
    fn artwork_prefers_last_image() {
        let images = vec![image("large"), image("medium"), image("small")];
        assert_eq!(select_artwork(&images), Some("small".to_string()));
    }

    #[test]
    fn artwork_with_single_image_uses_it() {
        assert_eq!(select_artwork(&[image("only")]), Some("only".to_string()));
    }

    #[test]
    fn artwork_without_images_is_none() {
        assert_eq!(select_artwork(&[]), None);
    }

    #[test]
    fn artwork_falls_back_to_first_when_last_has_no_url() {
        let images = vec![image("large"), image("")];
        assert_eq!(select_artwork(&images), Some("large".to_string()));
    }

    #[test]
    fn preview_url_makes_direct_audio() {
        let record = to_episode_record(&upstream(vec![], Some("http://x/mp3")));
        assert_eq!(record.audio.src, "http://x/mp3");
        assert_eq!(record.audio.kind, AudioKind::Direct);
    }

    #[test]
    fn missing_preview_routes_to_embed() {
        for preview in [None, Some("")] {
            let record = to_episode_record(&upstream(vec![], preview));
            assert_eq!(record.audio.src, "spotify:episode:e1");
            assert_eq!(record.audio.kind, AudioKind::Embedded);
            assert!(record.embed_url(true).is_some());
        }
    }

    #[test]
    fn html_content_wraps_raw_description() {
        let record = to_episode_record(&upstream(vec![], None));
        assert_eq!(record.html_content, "<p>d & <b>bold</b></p>");
        assert_eq!(record.description, "d & <b>bold</b>");
    }

    #[test]
    fn transform_is_deterministic() {
        let source = upstream(vec![image("a"), image("b")], Some("http://x/mp3"));
        let first = serde_json::to_vec(&to_episode_record(&source)).unwrap();
        let second = serde_json::to_vec(&to_episode_record(&source)).unwrap();
        assert_eq!(first, second);
    }
}
