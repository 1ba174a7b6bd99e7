//! Session handling.
//!
//! Two pieces live here:
//! - [`SessionSource`]: answers "does this request carry an auth token?".
//!   [`CookieSession`] answers it from the auth cookie. Nothing checks the
//!   token's signature or expiry; the storefront API does that.
//! - [`SessionStore`]: the cached profile of each signed-in user, keyed by
//!   token. Profile data is written only through [`SessionStore::merge`].

use crate::guard;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Response;
use backstage_core::{User, UserPatch};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Capability to tell whether the current request is signed in.
pub trait SessionSource {
    fn has_token(&self) -> bool;
}

/// Session read from the request's auth cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSession {
    token: Option<String>,
}

impl CookieSession {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Read `cookie_name` from the `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        Self {
            token: cookie_value(headers, cookie_name),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl SessionSource for CookieSession {
    fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Value of cookie `name`, ignoring empty values left behind by logout.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(&prefix))
        .map(|value| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Per-token cache of signed-in users.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    records: Arc<RwLock<HashMap<String, User>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached user for `token`.
    pub fn get(&self, token: &str) -> Option<User> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// Merge `patch` into the record for `token` and return the result.
    ///
    /// Fields absent from the patch keep their cached value. A token with no
    /// record starts from an empty user.
    pub fn merge(&self, token: &str, patch: &UserPatch) -> User {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let user = records.entry(token.to_string()).or_default();
        user.apply(patch);
        user.clone()
    }

    /// Drop the record for `token` (logout).
    pub fn forget(&self, token: &str) -> Option<User> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The auth token of a signed-in request.
///
/// Rejects with the login redirect when the cookie is missing, so handlers
/// behind the guard can rely on it.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth = &state.config().auth;
        match cookie_value(&parts.headers, &auth.cookie_name) {
            Some(token) => Ok(SessionToken(token)),
            None => Err(guard::login_redirect(
                &auth.login_path,
                &parts.uri,
                guard::is_htmx(&parts.headers),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value() {
        let h = headers("theme=dark; auth_token=abc.def; other=1");
        assert_eq!(cookie_value(&h, "auth_token").as_deref(), Some("abc.def"));
        assert_eq!(cookie_value(&h, "missing"), None);
    }

    #[test]
    fn test_cookie_prefix_must_match_whole_name() {
        let h = headers("xauth_token=nope");
        assert_eq!(cookie_value(&h, "auth_token"), None);
    }

    #[test]
    fn test_cleared_cookie_counts_as_absent() {
        let session = CookieSession::from_headers(&headers("auth_token="), "auth_token");
        assert!(!session.has_token());
    }

    #[test]
    fn test_cookie_session() {
        let session = CookieSession::from_headers(&headers("auth_token=t1"), "auth_token");
        assert!(session.has_token());
        assert_eq!(session.token(), Some("t1"));
        assert!(!CookieSession::from_headers(&HeaderMap::new(), "auth_token").has_token());
    }

    #[test]
    fn test_merge_preserves_unpatched_fields() {
        let store = SessionStore::new();
        store.merge(
            "t1",
            &UserPatch {
                id: Some("u1".into()),
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
                ..Default::default()
            },
        );

        let merged = store.merge(
            "t1",
            &UserPatch {
                name: Some("Ada King".into()),
                ..Default::default()
            },
        );

        assert_eq!(merged.name, "Ada King");
        assert_eq!(merged.email, "ada@example.com");
        assert_eq!(store.get("t1"), Some(merged));
    }

    #[test]
    fn test_records_are_per_token() {
        let store = SessionStore::new();
        store.merge("t1", &UserPatch { name: Some("A".into()), ..Default::default() });
        store.merge("t2", &UserPatch { name: Some("B".into()), ..Default::default() });

        assert_eq!(store.len(), 2);
        assert_eq!(store.forget("t1").unwrap().name, "A");
        assert!(store.get("t1").is_none());
        assert_eq!(store.get("t2").unwrap().name, "B");
    }
}
