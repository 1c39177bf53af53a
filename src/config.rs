// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::error::ConfigError;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_SECRET";
pub const SHOW_ID_VAR: &str = "SPOTIFY_SHOW_ID";

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SHOW_ID: &str = "79UN7d5K0y61ly9pRBNzvR";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Client credentials used for the token exchange
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Where credentials come from. Consulted once per token refresh.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Result<Credentials, ConfigError>;
}

/// Reads credentials from `SPOTIFY_ID` / `SPOTIFY_SECRET`
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(Credentials {
            client_id: read_var(CLIENT_ID_VAR)?,
            client_secret: read_var(CLIENT_SECRET_VAR)?,
        })
    }
}

/// Fixed credentials, e.g. from command line flags
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(self.0.clone())
    }
}

fn read_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar { name })
}

/// Provider endpoints and the show being listed
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub token_url: Url,
    pub api_base: Url,
    pub show_id: String,
    pub page_size: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token_url: Url::parse(DEFAULT_TOKEN_URL).expect("valid default token URL"),
            api_base: Url::parse(DEFAULT_API_BASE).expect("valid default API base"),
            show_id: DEFAULT_SHOW_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProviderConfig {
    /// Defaults, with the show id taken from `SPOTIFY_SHOW_ID` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(show_id) = read_var(SHOW_ID_VAR) {
            config.show_id = show_id;
        }
        config
    }

    /// URL of the bounded show-episodes listing
    pub fn show_episodes_url(&self) -> Result<Url, ConfigError> {
        let mut url = self.endpoint(&["shows", &self.show_id, "episodes"])?;
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string());
        Ok(url)
    }

    /// URL of a single episode
    pub fn episode_url(&self, id: &str) -> Result<Url, ConfigError> {
        self.endpoint(&["episodes", id])
    }

    /// Append percent-encoded path segments to the API base
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::NotABase {
                url: self.api_base.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
