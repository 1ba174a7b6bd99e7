//! Login and logout for the dashboard.
//!
//! Credentials are checked by the storefront API. On success the returned
//! token is stored in an `HttpOnly` cookie, and the user record (when the
//! API returns one) seeds the session cache.

use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use backstage_core::{AuthConfig, UserPatch};
use serde::Deserialize;

use crate::session::cookie_value;
use crate::state::AppState;
use crate::templates::{escape, head_assets};

/// Login page query parameters
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Login form data
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// `Set-Cookie` value storing `token`.
pub fn session_cookie(auth: &AuthConfig, token: &str) -> String {
    let secure = if auth.secure_cookie { "; Secure" } else { "" };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        auth.cookie_name, token, auth.cookie_max_age_seconds, secure
    )
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_cookie(auth: &AuthConfig) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", auth.cookie_name)
}

/// Only same-site absolute paths are followed after login.
///
/// Browsers drop tabs and newlines from URLs and read `\\` as `/`, so any of
/// those could turn `/x` into a protocol-relative `//host`.
fn safe_redirect(redirect: Option<&str>) -> &str {
    match redirect {
        Some(r) if is_local_path(r) => r,
        _ => "/",
    }
}

fn is_local_path(target: &str) -> bool {
    if !target.starts_with('/') || target.starts_with("//") {
        return false;
    }
    if target.chars().any(|c| c.is_control() || c.is_whitespace() || c == '\\') {
        return false;
    }
    target
        .parse::<Uri>()
        .is_ok_and(|uri| uri.scheme().is_none() && uri.authority().is_none())
}

/// Handler for the login page (GET)
pub async fn login_page(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Html<String> {
    Html(login_page_template(
        &state.config().auth.login_path,
        query.redirect.as_deref(),
        query.error.as_deref(),
    ))
}

/// Handler for login form submission (POST)
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let auth = &state.config().auth;

    match state.users().login(form.email.trim(), &form.password).await {
        Ok(login) => {
            if let Some(user) = &login.user {
                state.sessions().merge(&login.token, &UserPatch::from(user));
            }
            tracing::info!(email = %form.email.trim(), "user signed in");

            (
                [(header::SET_COOKIE, session_cookie(auth, &login.token))],
                Redirect::to(safe_redirect(form.redirect.as_deref())),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(email = %form.email.trim(), error = %e, "sign-in failed");
            let reason = if e.is_unauthorized() { "invalid" } else { "unavailable" };
            let redirect = form
                .redirect
                .map(|r| format!("&redirect={}", urlencoding::encode(&r)))
                .unwrap_or_default();

            Redirect::to(&format!("{}?error={reason}{redirect}", auth.login_path)).into_response()
        }
    }
}

/// Handler for logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let auth = &state.config().auth;
    if let Some(token) = cookie_value(&headers, &auth.cookie_name) {
        state.end_session(&token);
    }

    (
        [(header::SET_COOKIE, clear_cookie(auth))],
        Redirect::to(&auth.login_path),
    )
        .into_response()
}

/// Generate the login page HTML
fn login_page_template(action: &str, redirect: Option<&str>, error: Option<&str>) -> String {
    let error_html = match error {
        Some("invalid") => login_error("Invalid email or password. Please try again."),
        Some(_) => login_error("The store is not responding. Please try again shortly."),
        None => String::new(),
    };

    let redirect_input = redirect
        .map(|r| format!(r#"<input type="hidden" name="redirect" value="{}">"#, escape(r)))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en" x-data="{{
    darkMode: localStorage.getItem('darkMode') === 'true'
}}" :class="{{ 'dark': darkMode }}">
<head>
    {HEAD}
    <title>Login - Backstage</title>
</head>
<body class="bg-gradient-to-br from-primary-600 via-primary-700 to-primary-900 dark:from-gray-900 dark:via-gray-800 dark:to-gray-900 min-h-screen flex items-center justify-center p-4">
    <div class="w-full max-w-md">
        <div class="text-center mb-8 text-white">
            <i class="fas fa-theater-masks text-4xl mb-2"></i>
            <h1 class="text-2xl font-bold">Backstage</h1>
            <p class="text-primary-200 dark:text-gray-400">Store administration</p>
        </div>

        <div class="bg-white dark:bg-gray-800 rounded-2xl shadow-2xl p-8">
            <div class="text-center mb-6">
                <h2 class="text-xl font-semibold text-gray-900 dark:text-white">Welcome back</h2>
                <p class="text-gray-500 dark:text-gray-400 mt-1">Sign in to access the dashboard</p>
            </div>

            {error_html}

            <form method="POST" action="{action}" class="space-y-5">
                {redirect_input}

                <div>
                    <label for="email" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-2">Email</label>
                    <div class="relative">
                        <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                            <i class="fas fa-envelope text-gray-400"></i>
                        </div>
                        <input type="email" id="email" name="email" required autofocus
                            class="block w-full pl-10 pr-4 py-3 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white focus:ring-2 focus:ring-primary-500 focus:border-primary-500"
                            placeholder="you@example.com">
                    </div>
                </div>

                <div>
                    <label for="password" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-2">Password</label>
                    <div class="relative" x-data="{{ show: false }}">
                        <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                            <i class="fas fa-lock text-gray-400"></i>
                        </div>
                        <input :type="show ? 'text' : 'password'" id="password" name="password" required
                            class="block w-full pl-10 pr-12 py-3 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white focus:ring-2 focus:ring-primary-500 focus:border-primary-500"
                            placeholder="Enter your password">
                        <button type="button" @click="show = !show"
                            class="absolute inset-y-0 right-0 pr-3 flex items-center text-gray-400 hover:text-gray-600 dark:hover:text-gray-300">
                            <i class="fas" :class="show ? 'fa-eye-slash' : 'fa-eye'"></i>
                        </button>
                    </div>
                </div>

                <button type="submit"
                    class="w-full py-3 px-4 bg-primary-600 hover:bg-primary-700 text-white font-medium rounded-lg shadow-lg transition-all duration-200">
                    <span class="flex items-center justify-center gap-2">
                        <i class="fas fa-sign-in-alt"></i>
                        Sign In
                    </span>
                </button>
            </form>
        </div>
    </div>
</body>
</html>"##,
        HEAD = head_assets(),
        action = escape(action),
    )
}

fn login_error(message: &str) -> String {
    format!(
        r##"<div class="mb-6 p-4 bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-lg">
            <div class="flex items-center gap-3">
                <i class="fas fa-exclamation-circle text-red-500"></i>
                <span class="text-red-700 dark:text-red-400">{message}</span>
            </div>
        </div>"##
    )
}
