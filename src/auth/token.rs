// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

/// Margin subtracted from the advertised lifetime so a token is never
/// handed out just before it lapses
pub const DEFAULT_SAFETY_MARGIN: TimeDelta = TimeDelta::milliseconds(60_000);

/// A bearer token and the instant it stops being reused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Build a token issued at `issued_at` that the provider says lives for
    /// `expires_in` seconds. `None` when the expiry is not representable.
    pub fn issued(
        value: String,
        issued_at: DateTime<Utc>,
        expires_in: u64,
        safety_margin: TimeDelta,
    ) -> Option<Self> {
        let millis = i64::try_from(expires_in).ok()?.checked_mul(1000)?;
        let expires_at = issued_at
            .checked_add_signed(TimeDelta::try_milliseconds(millis)?)?
            .checked_sub_signed(safety_margin)?;
        Some(Self { value, expires_at })
    }

    /// Reusable strictly before `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Body of a successful client-credentials exchange
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn expiry_subtracts_safety_margin() {
        let token = CachedToken::issued("tok".to_string(), t0(), 3600, DEFAULT_SAFETY_MARGIN).unwrap();
        assert_eq!(
            token.expires_at,
            t0() + TimeDelta::seconds(3600) - TimeDelta::seconds(60)
        );
    }

    #[test]
    fn valid_on_half_open_interval() {
        let token = CachedToken::issued("tok".to_string(), t0(), 3600, DEFAULT_SAFETY_MARGIN).unwrap();
        let end = t0() + TimeDelta::milliseconds(3600 * 1000 - 60_000);

        assert!(token.is_valid_at(t0()));
        assert!(token.is_valid_at(end - TimeDelta::milliseconds(1)));
        assert!(!token.is_valid_at(end));
        assert!(!token.is_valid_at(end + TimeDelta::seconds(1)));
    }

    #[test]
    fn lifetime_shorter_than_margin_is_never_valid() {
        let token = CachedToken::issued("tok".to_string(), t0(), 30, DEFAULT_SAFETY_MARGIN).unwrap();
        assert!(!token.is_valid_at(t0()));
    }

    #[test]
    fn unrepresentable_lifetime_is_rejected() {
        for expires_in in [9_000_000_000_000, u64::from(u32::MAX) * 1_000_000, u64::MAX] {
            assert!(
                CachedToken::issued("tok".to_string(), t0(), expires_in, DEFAULT_SAFETY_MARGIN)
                    .is_none()
            );
        }
    }

    #[test]
    fn negative_lifetime_fails_to_parse() {
        let parsed: Result<TokenResponse, _> =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":-5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn token_response_ignores_extra_fields() {
        let parsed: TokenResponse = serde_json::from_str(
            r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#,
        )
        .unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.expires_in, 3600);
    }
}
