//! # backstage-core
//!
//! Types shared by every Backstage crate:
//! - [`config`]: the `backstage.yaml` configuration
//! - [`models`]: records exchanged with the storefront API
//! - [`routes`]: the dashboard's static route table

pub mod config;
pub mod models;
pub mod routes;

pub use config::{ApiConfig, AuthConfig, BackstageConfig, ConfigError, DashboardConfig};
pub use models::{
    ContentEntry, Countdown, Coupon, Location, LoginResponse, Order, OrderStatus, Product,
    ProductStatus, Puzzle, ShippingZone, Track, User, UserPatch,
};
pub use routes::{Route, RouteGroup, is_active};
