//! Authenticated session handed to every protected call.
//!
//! A `Session` only comes out of a successful login (or an explicitly
//! provided token) and is consumed by logout. Nothing is stored globally;
//! callers pass it down to each request.

use crate::domain::model::Token;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: Option<i64>,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

impl Session {
    pub fn from_token(token: Token) -> Self {
        let mut session = Self::from_raw(token.token);
        session.user_id = Some(token.id);
        session
    }

    /// Session around a token obtained elsewhere, e.g. from the CLI.
    pub fn from_raw(token: impl Into<String>) -> Self {
        let token = token.into();
        let expires_at = jwt_expiry(&token);
        Self {
            token,
            user_id: None,
            expires_at,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Reads `exp` from a JWT payload without verifying the signature.
/// Opaque tokens have no expiry.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Utc.timestamp_opt(claims.exp?, 0).single()
}

#[cfg(test)]
pub(crate) fn fake_jwt(exp: i64) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"ana","exp":{}}}"#, exp));
    format!("{}.{}.assinatura", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_read_from_jwt() {
        let session = Session::from_token(Token {
            id: 7,
            token: fake_jwt(1_700_000_000),
        });
        assert_eq!(session.user_id(), Some(7));
        assert_eq!(
            session.expires_at(),
            Utc.timestamp_opt(1_700_000_000, 0).single()
        );
        assert!(session.is_expired_at(Utc.timestamp_opt(1_700_000_001, 0).unwrap()));
        assert!(!session.is_expired_at(Utc.timestamp_opt(1_699_999_999, 0).unwrap()));
    }

    #[test]
    fn test_opaque_token_never_expires() {
        let session = Session::from_raw("token-opaco");
        assert_eq!(session.expires_at(), None);
        assert!(!session.is_expired());
        assert_eq!(session.bearer(), "Bearer token-opaco");
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::from_raw("segredo");
        assert!(!format!("{:?}", session).contains("segredo"));
    }
}
