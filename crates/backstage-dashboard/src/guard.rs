//! Session guard for protected pages.
//!
//! The guard only checks that a session token is present. A missing token is
//! an ordinary navigation: the browser is sent to the login page with the
//! requested location preserved, and the protected handler never runs.

use crate::session::{CookieSession, SessionSource};
use crate::state::AppState;
use crate::templates;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

/// Guard decision for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allow,
    RedirectToLogin,
}

/// Decide whether a request may reach a protected page.
pub fn gate(session: &dyn SessionSource) -> Gate {
    if session.has_token() {
        Gate::Allow
    } else {
        Gate::RedirectToLogin
    }
}

/// Middleware guarding every protected route.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let auth = &state.config().auth;
    let session = CookieSession::from_headers(request.headers(), &auth.cookie_name);

    match gate(&session) {
        Gate::Allow => next.run(request).await,
        Gate::RedirectToLogin => {
            tracing::debug!(path = %request.uri().path(), "no session, redirecting to login");
            login_redirect(&auth.login_path, request.uri(), is_htmx(request.headers()))
        }
    }
}

/// Response sending the browser to `login_path`, remembering `requested`.
///
/// HTMX requests also get an `HX-Redirect` header so the whole page
/// navigates instead of swapping the login page into a fragment. The body is
/// the neutral loading placeholder.
pub fn login_redirect(login_path: &str, requested: &Uri, htmx: bool) -> Response {
    let target = requested
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("{login_path}?redirect={}", urlencoding::encode(target));

    let mut response = (
        StatusCode::SEE_OTHER,
        Html(templates::loading_placeholder()),
    )
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&location) {
        let headers = response.headers_mut();
        headers.insert(header::LOCATION, value.clone());
        if htmx {
            headers.insert("HX-Redirect", value);
        }
    }
    response
}

/// True for requests issued by HTMX.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
