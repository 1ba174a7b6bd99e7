//! # backstage-dashboard
//!
//! Server-rendered admin dashboard for the storefront.
//!
//! Pages cover orders, the shop catalog, coupons, users, music releases,
//! shipping logistics and the blackbox mini-game. All data lives behind the
//! storefront REST API; the dashboard reads it through
//! [`backstage_client`] and validates every form with [`backstage_schema`]
//! before submitting.
//!
//! ## Tech Stack
//!
//! - Axum for HTTP server
//! - HTMX + Alpine.js for interactivity (minimal JS)
//! - Tailwind CSS for styling

pub mod auth;
pub mod blackbox_pages;
pub mod catalog_pages;
pub mod error;
pub mod forms;
pub mod guard;
pub mod handlers;
pub mod notify;
pub mod pages;
pub mod profile;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod templates;

pub use error::DashboardError;
pub use notify::{Level, NoticeBoard, Notification, Notifier};
pub use routes::create_router;
pub use server::DashboardServer;
pub use session::{CookieSession, SessionSource, SessionStore};
pub use state::{AppState, PageContext};
