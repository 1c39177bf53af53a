// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::TimeDelta;
use log::{debug, error};
use tokio::sync::Mutex;
use url::Url;

use crate::clock::{Clock, SystemClock};
use crate::config::{CredentialSource, Credentials};
use crate::error::AuthError;
use crate::http::HttpClient;

use super::token::{CachedToken, DEFAULT_SAFETY_MARGIN, TokenResponse};

const GRANT_BODY: &str = "grant_type=client_credentials";

/// Exchanges client credentials for bearer tokens and memoizes the latest
/// one until it nears expiry.
///
/// The cache lock is held across the exchange, so concurrent callers that
/// find no valid token wait for a single refresh instead of each issuing one.
pub struct TokenIssuer {
    token_url: Url,
    credentials: Arc<dyn CredentialSource>,
    clock: Arc<dyn Clock>,
    safety_margin: TimeDelta,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenIssuer {
    pub fn new(token_url: Url, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            token_url,
            credentials,
            clock: Arc::new(SystemClock),
            safety_margin: DEFAULT_SAFETY_MARGIN,
            cache: Mutex::new(None),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_safety_margin(mut self, margin: TimeDelta) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Return a valid bearer token, exchanging credentials only when the
    /// cached one is missing or expired
    pub async fn get_token<C: HttpClient>(&self, client: &C) -> Result<String, AuthError> {
        let mut cache = self.cache.lock().await;

        let now = self.clock.now();
        if let Some(token) = cache.as_ref().filter(|t| t.is_valid_at(now)) {
            debug!("Reusing cached access token");
            return Ok(token.value.clone());
        }

        let token = self.exchange(client).await.inspect_err(|e| {
            error!("Error getting access token: {e}");
        })?;
        let value = token.value.clone();
        *cache = Some(token);
        Ok(value)
    }

    /// Snapshot of the cached token, if any
    pub async fn cached(&self) -> Option<CachedToken> {
        self.cache.lock().await.clone()
    }

    async fn exchange<C: HttpClient>(&self, client: &C) -> Result<CachedToken, AuthError> {
        let credentials = self.credentials.credentials()?;
        let issued_at = self.clock.now();

        let response = client
            .post_form(
                self.token_url.as_str(),
                &basic_authorization(&credentials),
                GRANT_BODY,
            )
            .await
            .map_err(|e| AuthError::Request { source: e })?;

        if !response.is_success() {
            return Err(AuthError::Status {
                status: response.status,
            });
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| AuthError::InvalidResponse { source: e })?;

        debug!("Obtained access token valid for {}s", parsed.expires_in);

        CachedToken::issued(
            parsed.access_token,
            issued_at,
            parsed.expires_in,
            self.safety_margin,
        )
        .ok_or(AuthError::InvalidLifetime {
            expires_in: parsed.expires_in,
        })
    }
}

/// `Authorization` header value for HTTP basic auth
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}
