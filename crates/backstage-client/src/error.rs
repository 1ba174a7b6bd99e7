//! Error types for the API client.

use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Transport or decoding failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}{}", message_suffix(.message))]
    Api {
        status: u16,
        message: Option<String>,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ClientError {
    /// Build an API error from a status code and response body.
    ///
    /// JSON bodies of the form `{"message": "..."}` or `{"error": "..."}`
    /// provide the message; anything else is dropped.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.trim().is_empty());
        ClientError::Api { status, message }
    }

    /// Message suitable for showing to the user, if the error carries one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Request(e) => {
                let text = e.to_string();
                (!text.is_empty()).then_some(text)
            }
            ClientError::InvalidBaseUrl { .. } => Some(self.to_string()),
        }
    }

    /// HTTP status returned by the API, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidBaseUrl { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
