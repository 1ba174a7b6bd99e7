//! # backstage-client
//!
//! REST client for the storefront API. [`ApiClient`] holds the configured
//! `reqwest` client; [`UserApi`] and [`StoreApi`] expose the endpoints the
//! dashboard consumes.

pub mod api;
pub mod client;
pub mod error;

pub use api::{StoreApi, UserApi};
pub use client::ApiClient;
pub use error::ClientError;
