// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::warn;
use tokio::sync::OnceCell;

use crate::catalog::CatalogClient;
use crate::episode::EpisodeRecord;
use crate::error::FetchError;
use crate::http::HttpClient;

type EpisodeSlot = Arc<OnceCell<Option<EpisodeRecord>>>;

/// Memoizes catalog lookups for the duration of one render pass.
///
/// Create one per request and drop it when the response is produced.
/// Repeated calls return the resolved value without another network call;
/// failed lookups are not memoized.
pub struct RenderCache<'a, C: HttpClient> {
    catalog: &'a CatalogClient<C>,
    listing: OnceCell<Vec<EpisodeRecord>>,
    episodes: Mutex<HashMap<String, EpisodeSlot>>,
}

impl<'a, C: HttpClient> RenderCache<'a, C> {
    pub fn new(catalog: &'a CatalogClient<C>) -> Self {
        Self {
            catalog,
            listing: OnceCell::new(),
            episodes: Mutex::new(HashMap::new()),
        }
    }

    /// Memoized [`CatalogClient::list_episodes`]
    pub async fn list_episodes(&self) -> &[EpisodeRecord] {
        self.listing
            .get_or_init(|| self.catalog.list_episodes())
            .await
    }

    /// Memoized [`CatalogClient::get_episode`]
    pub async fn get_episode(&self, id: &str) -> Result<Option<EpisodeRecord>, FetchError> {
        let slot = self.slot(id);
        let episode = slot
            .get_or_try_init(|| self.catalog.get_episode(id))
            .await?;
        Ok(episode.clone())
    }

    /// Resolve an episode from the memoized listing rather than the
    /// single-episode endpoint
    pub async fn find_in_listing(&self, id: &str) -> Option<&EpisodeRecord> {
        self.list_episodes().await.iter().find(|ep| ep.id == id)
    }

    /// Detail-page lookup: the single-episode endpoint, falling back to the
    /// listing when that lookup fails. `None` is rendered as missing.
    pub async fn resolve_episode(&self, id: &str) -> Option<EpisodeRecord> {
        match self.get_episode(id).await {
            Ok(episode) => episode,
            Err(e) => {
                warn!("Falling back to listing for episode {id}: {e}");
                self.find_in_listing(id).await.cloned()
            }
        }
    }

    fn slot(&self, id: &str) -> EpisodeSlot {
        // The std mutex is never held across an await
        let mut episodes = self.episodes.lock().unwrap_or_else(|e| e.into_inner());
        episodes.entry(id.to_string()).or_default().clone()
    }
}
