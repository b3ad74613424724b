//! # Session Service
//!
//! Each visitor carries a signed session cookie holding two records:
//!
//! - `auth` - the anonymous bootstrap token as issued by the API
//! - `cookies` - name/value pairs of the upstream cookies to replay
//!
//! [`ensure_auth`] is the per-request gate: when the stored token is
//! absent, malformed, or past its `expire_in` timestamp, a fresh one
//! is fetched from the bootstrap endpoint and stored. Upstream cookie
//! pairs returned by any API call are merged into the jar; a pair
//! with an empty value removes the cookie.

use std::collections::HashMap;

use actix_session::Session;
use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::ads::{AdsClient, SetCookies};
use crate::error::AppError;
use crate::models::AuthToken;

/// Session key for the bootstrap token record.
pub const AUTH_KEY: &str = "auth";

/// Session key for the upstream cookie jar.
pub const COOKIES_KEY: &str = "cookies";

/// Timestamp format of the token's `expire_in` field.
const EXPIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// The visitor's upstream cookie jar.
pub type CookieMap = HashMap<String, String>;

/// Check whether a token is past its expiry timestamp.
///
/// A token whose `expire_in` cannot be parsed counts as expired, which
/// forces a refresh instead of replaying a credential of unknown age.
pub fn is_expired(auth: &AuthToken) -> bool {
    match NaiveDateTime::parse_from_str(&auth.expire_in, EXPIRE_FORMAT) {
        Ok(expire_in) => expire_in <= Utc::now().naive_utc(),
        Err(_) => true,
    }
}

/// Read the upstream cookie jar from the session.
pub fn load_cookies(session: &Session) -> Result<CookieMap, AppError> {
    Ok(session
        .get::<CookieMap>(COOKIES_KEY)
        .map_err(|e| AppError::Session(e.to_string()))?
        .unwrap_or_default())
}

/// Write the upstream cookie jar back to the session.
pub fn save_cookies(session: &Session, cookies: &CookieMap) -> Result<(), AppError> {
    session
        .insert(COOKIES_KEY, cookies)
        .map_err(|e| AppError::Session(e.to_string()))
}

/// Merge freshly received `Set-Cookie` pairs into the jar.
///
/// An empty value clears the cookie, mirroring how upstream expires
/// one.
pub fn merge_cookies(cookies: &mut CookieMap, fresh: SetCookies) {
    for (name, value) in fresh {
        if value.is_empty() {
            cookies.remove(&name);
        } else {
            cookies.insert(name, value);
        }
    }
}

/// Return a valid bootstrap token, refreshing it if needed.
///
/// This runs at the top of every page handler. When the stored token
/// is still valid it is returned as-is; otherwise the bootstrap
/// endpoint is called and both session records are updated.
pub async fn ensure_auth(session: &Session, ads: &AdsClient) -> Result<AuthToken, AppError> {
    let stored = session
        .get::<AuthToken>(AUTH_KEY)
        .map_err(|e| AppError::Session(e.to_string()))?;

    if let Some(auth) = stored {
        if !is_expired(&auth) {
            debug!("Reusing session token");
            return Ok(auth);
        }
        info!("Session token expired, refreshing");
    } else {
        info!("No session token, bootstrapping");
    }

    let mut cookies = load_cookies(session)?;
    let (auth, fresh) = ads.bootstrap(&cookies).await?;
    merge_cookies(&mut cookies, fresh);

    session
        .insert(AUTH_KEY, &auth)
        .map_err(|e| AppError::Session(e.to_string()))?;
    save_cookies(session, &cookies)?;

    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token_expiring_at(expire_in: &str) -> AuthToken {
        AuthToken {
            access_token: "tok".to_string(),
            expire_in: expire_in.to_string(),
            ..AuthToken::default()
        }
    }

    fn timestamp(offset: Duration) -> String {
        (Utc::now() + offset)
            .naive_utc()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string()
    }

    #[test]
    fn test_future_token_is_not_expired() {
        let auth = token_expiring_at(&timestamp(Duration::hours(1)));
        assert!(!is_expired(&auth));
    }

    #[test]
    fn test_past_token_is_expired() {
        let auth = token_expiring_at(&timestamp(-Duration::hours(1)));
        assert!(is_expired(&auth));
    }

    #[test]
    fn test_barely_past_token_is_expired() {
        // Seconds-stale tokens must refresh too
        let auth = token_expiring_at(&timestamp(-Duration::seconds(5)));
        assert!(is_expired(&auth));
    }

    #[test]
    fn test_malformed_expiry_counts_as_expired() {
        assert!(is_expired(&token_expiring_at("not-a-timestamp")));
        assert!(is_expired(&token_expiring_at("")));
    }

    #[test]
    fn test_expiry_accepts_upstream_format() {
        // Exact shape the bootstrap endpoint issues
        let auth = token_expiring_at("2019-06-12T14:15:17.823482");
        assert!(is_expired(&auth));

        let auth = token_expiring_at("2999-01-01T00:00:00.000000");
        assert!(!is_expired(&auth));
    }

    #[test]
    fn test_merge_cookies_inserts_and_replaces() {
        let mut jar = CookieMap::new();
        merge_cookies(
            &mut jar,
            vec![("session".to_string(), "abc".to_string())],
        );
        assert_eq!(jar.get("session").unwrap(), "abc");

        merge_cookies(
            &mut jar,
            vec![("session".to_string(), "def".to_string())],
        );
        assert_eq!(jar.get("session").unwrap(), "def");
    }

    #[test]
    fn test_merge_cookies_empty_value_removes() {
        let mut jar = CookieMap::new();
        jar.insert("session".to_string(), "abc".to_string());

        merge_cookies(&mut jar, vec![("session".to_string(), String::new())]);
        assert!(!jar.contains_key("session"));
    }
}
