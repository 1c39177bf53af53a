// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use log::{error, info};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenIssuer;
use crate::config::{CredentialSource, ProviderConfig};
use crate::episode::EpisodeRecord;
use crate::error::FetchError;
use crate::http::HttpClient;

use super::transform::to_episode_record;
use super::upstream::{EpisodePage, UpstreamEpisode};

/// Fetches the show's episodes from the provider and normalizes them.
///
/// One instance is meant to live for the whole process so that the token
/// cache inside it is shared by every request.
pub struct CatalogClient<C: HttpClient> {
    client: C,
    config: ProviderConfig,
    issuer: TokenIssuer,
}

impl<C: HttpClient> CatalogClient<C> {
    pub fn new(client: C, config: ProviderConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        let issuer = TokenIssuer::new(config.token_url.clone(), credentials);
        Self::with_issuer(client, config, issuer)
    }

    /// Use a preconfigured token issuer (custom clock or safety margin)
    pub fn with_issuer(client: C, config: ProviderConfig, issuer: TokenIssuer) -> Self {
        Self {
            client,
            config,
            issuer,
        }
    }

    pub fn http(&self) -> &C {
        &self.client
    }

    /// List the show's episodes, newest first as the provider orders them.
    ///
    /// Never fails: any error is logged and yields an empty list, which
    /// callers display as "no episodes".
    pub async fn list_episodes(&self) -> Vec<EpisodeRecord> {
        match self.try_list_episodes().await {
            Ok(episodes) => episodes,
            Err(e) => {
                error!("Error fetching episodes: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`list_episodes`](Self::list_episodes) but surfaces the failure
    pub async fn try_list_episodes(&self) -> Result<Vec<EpisodeRecord>, FetchError> {
        let url = self.config.show_episodes_url()?;
        let page: EpisodePage = self
            .get_json(&url)
            .await?
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })?;

        let episodes: Vec<_> = page
            .items
            .iter()
            .flatten()
            .map(to_episode_record)
            .collect();

        let total = page.total.map_or_else(|| "?".to_string(), |t| t.to_string());
        info!(
            "Fetched {} of {total} episodes for show {}",
            episodes.len(),
            self.config.show_id
        );
        Ok(episodes)
    }

    /// Look up one episode. `Ok(None)` when the provider answers 404.
    pub async fn get_episode(&self, id: &str) -> Result<Option<EpisodeRecord>, FetchError> {
        let result = async {
            let url = self.config.episode_url(id)?;
            let episode: Option<UpstreamEpisode> = self.get_json(&url).await?;
            Ok::<_, FetchError>(episode.as_ref().map(to_episode_record))
        }
        .await;

        result.inspect_err(|e| {
            error!("Error fetching episode with ID {id}: {e}");
        })
    }

    /// Authenticated GET; 404 maps to `None`
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, FetchError> {
        let token = self.issuer.get_token(&self.client).await?;

        let response = self
            .client
            .get(url.as_str(), &format!("Bearer {token}"))
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;

        if response.status == 404 {
            return Ok(None);
        }

        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body)
            .map(Some)
            .map_err(|e| FetchError::InvalidResponse {
                url: url.to_string(),
                source: e,
            })
    }
}
