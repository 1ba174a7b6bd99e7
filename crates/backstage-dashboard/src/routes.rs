//! Route definitions for the dashboard.

use crate::auth;
use crate::guard;
use crate::handlers;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use backstage_core::Route;
use tower_http::trace::TraceLayer;

/// Create the dashboard router.
///
/// Login, logout and the health check are public. Everything else goes
/// through [`guard::require_session`]. The login page is mounted at the
/// configured `auth.login_path`, which is also where the guard sends
/// anonymous requests.
pub fn create_router(state: AppState) -> Router {
    let login_path = state.config().auth.login_path.clone();

    let protected = Router::new()
        .route(Route::Home.path(), get(handlers::home))
        .route(Route::Users.path(), get(handlers::users))
        .route(Route::Settings.path(), get(handlers::settings))
        .route("/settings/profile", post(handlers::update_settings_profile))
        .route(Route::Orders.path(), get(handlers::orders))
        .route(Route::Shop.path(), get(handlers::shop))
        .route("/shop/new", get(handlers::new_product).post(handlers::create_product))
        .route(
            "/shop/{id}/edit",
            get(handlers::edit_product).post(handlers::update_product),
        )
        .route(Route::Coupons.path(), get(handlers::coupons).post(handlers::create_coupon))
        .route(Route::MusicManager.path(), get(handlers::music))
        .route(
            Route::AddSingle.path(),
            get(handlers::add_single).post(handlers::create_single),
        )
        .route(Route::ShippingZones.path(), get(handlers::shipping_zones))
        .route(Route::Locations.path(), get(handlers::locations))
        .route(Route::Blackbox.path(), get(handlers::blackbox))
        .route(Route::ContentManager.path(), get(handlers::blackbox_content))
        .route(Route::GameEditor.path(), get(handlers::game_editor))
        .route(Route::Countdown.path(), get(handlers::countdown))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ));

    Router::new()
        .route(&login_path, get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
