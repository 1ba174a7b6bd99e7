//! Request handlers for the dashboard.
//!
//! Every handler here sits behind the session guard, so the
//! [`SessionToken`] extractor always finds a token.

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use backstage_client::ClientError;
use backstage_core::OrderStatus;
use backstage_schema::{
    ValidationErrors, bundle_variant_schema, coupon_schema, edit_product_schema,
    product_schema, profile_schema, single_track_schema,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::blackbox_pages;
use crate::catalog_pages::{self, ProductFormMode};
use crate::error::DashboardError;
use crate::forms::{CouponForm, ProductForm, ProfileForm, TrackForm};
use crate::notify::{Notification, Notifier};
use crate::pages::{self, Loaded};
use crate::profile::{UPDATE_FAILED, update_profile};
use crate::session::SessionToken;
use crate::state::AppState;

/// Turn an API result into page data, logging failures.
fn loaded<T>(state: &AppState, token: &str, what: &str, result: Result<T, ClientError>) -> Loaded<T> {
    result.map_err(|e| {
        tracing::warn!(resource = what, error = %e, "failed to load page data");
        state.expire_if_rejected(token, &e);
        e.user_message().unwrap_or_else(|| e.to_string())
    })
}

fn notify_failure(notifier: &dyn Notifier, error: &ClientError, fallback: &str) {
    let message = error.user_message().unwrap_or_else(|| fallback.to_string());
    notifier.notify(Notification::error(message));
}

// =============================================================================
// Overview
// =============================================================================

/// Handler for the dashboard home page.
pub async fn home(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let (orders, products, users) = tokio::join!(
        state.store().list_orders(&token),
        state.store().list_products(&token),
        state.users().list_users(&token),
    );
    let ctx = state.page_context(&token, uri.path()).await;

    Html(pages::home_page(
        &ctx,
        &loaded(&state, &token, "orders", orders),
        &loaded(&state, &token, "products", products),
        &loaded(&state, &token, "users", users),
    ))
}

pub async fn users(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let users = loaded(&state, &token, "users", state.users().list_users(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(pages::users_page(&ctx, &users))
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub status: Option<String>,
}

pub async fn orders(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Query(query): Query<OrdersQuery>,
) -> Html<String> {
    let status = query.status.as_deref().and_then(OrderStatus::from_key);
    let orders = loaded(&state, &token, "orders", state.store().list_orders(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(pages::orders_page(&ctx, &orders, status))
}

// =============================================================================
// Settings
// =============================================================================

pub async fn settings(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let ctx = state.page_context(&token, uri.path()).await;
    let form = ctx.user.as_ref().map(ProfileForm::from_user).unwrap_or_default();
    Html(pages::settings_page(&ctx, &form, &ValidationErrors::default()))
}

/// Handler for the profile form (POST /settings/profile).
pub async fn update_settings_profile(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(form): Form<ProfileForm>,
) -> Response {
    let notifier = state.notifier(&token);
    let Some(user) = state.current_user(&token).await else {
        notifier.notify(Notification::error(UPDATE_FAILED));
        let ctx = state.page_context(&token, "/settings").await;
        return Html(pages::settings_page(&ctx, &form, &ValidationErrors::default())).into_response();
    };

    let form = form.fill_missing(&user);
    let patch = form.to_patch(&user);
    let payload = serde_json::to_value(&patch).unwrap_or_else(|_| json!({}));

    if let Err(errors) = profile_schema().validate(&payload) {
        let ctx = state.page_context(&token, "/settings").await;
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::settings_page(&ctx, &form, &errors)),
        )
            .into_response();
    }

    match update_profile(state.users(), state.sessions(), &notifier, &token, &user.id, &patch).await {
        Ok(_) => Redirect::to("/settings").into_response(),
        Err(_) => {
            let ctx = state.page_context(&token, "/settings").await;
            Html(pages::settings_page(&ctx, &form, &ValidationErrors::default())).into_response()
        }
    }
}

// =============================================================================
// Shop
// =============================================================================

pub async fn shop(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let products = loaded(&state, &token, "products", state.store().list_products(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(catalog_pages::shop_page(&ctx, &products))
}

pub async fn new_product(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let ctx = state.page_context(&token, uri.path()).await;
    Html(catalog_pages::product_form_page(
        &ctx,
        ProductFormMode::Create,
        &ProductForm::default(),
        &ValidationErrors::default(),
    ))
}

/// Create a product, or a bundle variant when the bundle box is ticked.
pub async fn create_product(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Form(form): Form<ProductForm>,
) -> Response {
    let schema = if form.is_bundle() {
        bundle_variant_schema()
    } else {
        product_schema()
    };
    let payload = form.to_create_payload();

    let created = match schema.validate(&payload) {
        Err(errors) => {
            let ctx = state.page_context(&token, uri.path()).await;
            let page = catalog_pages::product_form_page(&ctx, ProductFormMode::Create, &form, &errors);
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
        Ok(()) => state.store().create_product(&token, &payload).await,
    };

    let notifier = state.notifier(&token);
    match created {
        Ok(_) => {
            tracing::info!(name = %form.name, bundle = form.is_bundle(), "product created");
            notifier.notify(Notification::success("Product created"));
            Redirect::to("/shop").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "product creation failed");
            notify_failure(&notifier, &e, "Failed to create product");
            let ctx = state.page_context(&token, uri.path()).await;
            let page = catalog_pages::product_form_page(&ctx, ProductFormMode::Create, &form, &ValidationErrors::default());
            Html(page).into_response()
        }
    }
}

pub async fn edit_product(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Html<String>, DashboardError> {
    let product = state.store().get_product(&token, &id).await?;
    let ctx = state.page_context(&token, uri.path()).await;
    Ok(Html(catalog_pages::product_form_page(
        &ctx,
        ProductFormMode::Edit { id: &id },
        &ProductForm::from_product(&product),
        &ValidationErrors::default(),
    )))
}

/// Send only the filled-in fields of the edit form.
pub async fn update_product(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let payload = form.to_edit_payload();

    if let Err(errors) = edit_product_schema().validate(&payload) {
        let ctx = state.page_context(&token, uri.path()).await;
        let page = catalog_pages::product_form_page(&ctx, ProductFormMode::Edit { id: &id }, &form, &errors);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    let notifier = state.notifier(&token);
    match state.store().update_product(&token, &id, &payload).await {
        Ok(_) => {
            tracing::info!(product_id = %id, "product updated");
            notifier.notify(Notification::success("Product updated"));
            Redirect::to("/shop").into_response()
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "product update failed");
            notify_failure(&notifier, &e, "Failed to update product");
            let ctx = state.page_context(&token, uri.path()).await;
            let page = catalog_pages::product_form_page(
                &ctx,
                ProductFormMode::Edit { id: &id },
                &form,
                &ValidationErrors::default(),
            );
            Html(page).into_response()
        }
    }
}

// =============================================================================
// Coupons
// =============================================================================

pub async fn coupons(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let coupons = loaded(&state, &token, "coupons", state.store().list_coupons(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(catalog_pages::coupons_page(
        &ctx,
        &coupons,
        &CouponForm::default(),
        &ValidationErrors::default(),
        Utc::now(),
    ))
}

pub async fn create_coupon(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Form(form): Form<CouponForm>,
) -> Response {
    let payload = form.to_payload();

    let (status, errors) = match coupon_schema().validate(&payload) {
        Err(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors),
        Ok(()) => {
            let notifier = state.notifier(&token);
            match state.store().create_coupon(&token, &payload).await {
                Ok(_) => {
                    tracing::info!(code = %form.code, "coupon created");
                    notifier.notify(Notification::success("Coupon created"));
                    return Redirect::to("/coupons").into_response();
                }
                Err(e) => {
                    tracing::warn!(code = %form.code, error = %e, "coupon creation failed");
                    notify_failure(&notifier, &e, "Failed to create coupon");
                    (StatusCode::OK, ValidationErrors::default())
                }
            }
        }
    };

    let coupons = loaded(&state, &token, "coupons", state.store().list_coupons(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    let page = catalog_pages::coupons_page(&ctx, &coupons, &form, &errors, Utc::now());
    (status, Html(page)).into_response()
}

// =============================================================================
// Music
// =============================================================================

pub async fn music(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let tracks = loaded(&state, &token, "tracks", state.store().list_tracks(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(catalog_pages::music_page(&ctx, &tracks))
}

pub async fn add_single(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let ctx = state.page_context(&token, uri.path()).await;
    Html(catalog_pages::add_single_page(&ctx, &TrackForm::default(), &ValidationErrors::default()))
}

pub async fn create_single(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    uri: Uri,
    Form(form): Form<TrackForm>,
) -> Response {
    let payload = form.to_payload();

    if let Err(errors) = single_track_schema().validate(&payload) {
        let ctx = state.page_context(&token, uri.path()).await;
        let page = catalog_pages::add_single_page(&ctx, &form, &errors);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    let notifier = state.notifier(&token);
    match state.store().create_single(&token, &payload).await {
        Ok(_) => {
            tracing::info!(title = %form.title, "single published");
            notifier.notify(Notification::success("Single published"));
            Redirect::to("/music").into_response()
        }
        Err(e) => {
            tracing::warn!(title = %form.title, error = %e, "single upload failed");
            notify_failure(&notifier, &e, "Failed to publish single");
            let ctx = state.page_context(&token, uri.path()).await;
            Html(catalog_pages::add_single_page(&ctx, &form, &ValidationErrors::default())).into_response()
        }
    }
}

// =============================================================================
// Logistics
// =============================================================================

pub async fn shipping_zones(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let zones = loaded(&state, &token, "shipping zones", state.store().list_shipping_zones(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(pages::shipping_zones_page(&ctx, &zones))
}

pub async fn locations(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let locations = loaded(&state, &token, "locations", state.store().list_locations(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(pages::locations_page(&ctx, &locations))
}

// =============================================================================
// Blackbox
// =============================================================================

pub async fn blackbox(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let ctx = state.page_context(&token, uri.path()).await;
    Html(blackbox_pages::blackbox_page(&ctx))
}

pub async fn blackbox_content(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let entries = loaded(&state, &token, "content", state.store().list_content(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(blackbox_pages::content_page(&ctx, &entries))
}

pub async fn game_editor(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let puzzles = loaded(&state, &token, "puzzles", state.store().list_puzzles(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(blackbox_pages::game_editor_page(&ctx, &puzzles))
}

pub async fn countdown(State(state): State<AppState>, SessionToken(token): SessionToken, uri: Uri) -> Html<String> {
    let countdown = loaded(&state, &token, "countdown", state.store().countdown(&token).await);
    let ctx = state.page_context(&token, uri.path()).await;
    Html(blackbox_pages::countdown_page(&ctx, &countdown, Utc::now()))
}

// =============================================================================
// Health
// =============================================================================

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
