//! Error types for the dashboard crate.

use crate::templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use backstage_client::ClientError;
use thiserror::Error;

/// Errors that can occur in the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to start the server.
    #[error("failed to start dashboard: {0}")]
    StartupFailed(String),

    /// The storefront API failed.
    #[error("storefront API error: {0}")]
    Api(#[from] ClientError),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::Api(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            DashboardError::Api(_) => StatusCode::BAD_GATEWAY,
            DashboardError::StartupFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown on the error page.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Api(e) => e
                .user_message()
                .unwrap_or_else(|| "The storefront API did not respond as expected.".to_string()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "dashboard request failed");
        }
        (status, Html(templates::error_page(status, &self.user_message()))).into_response()
    }
}
