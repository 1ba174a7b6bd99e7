//! Router tests against an in-memory storefront API.

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use backstage_client::{ClientError, StoreApi, UserApi};
use backstage_core::{
    ContentEntry, Countdown, Coupon, DashboardConfig, Location, LoginResponse, Order,
    OrderStatus, Product, ProductStatus, Puzzle, ShippingZone, Track, User, UserPatch,
};
use backstage_dashboard::{AppState, Notification, Notifier, create_router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const TOKEN: &str = "tok-1";

/// Records every call and serves canned data.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    payloads: Mutex<Vec<Value>>,
    reject_updates: bool,
    /// Answer 401 as if the session token had expired upstream.
    expired: bool,
}

impl FakeApi {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn called(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn last_payload(&self) -> Option<Value> {
        self.payloads.lock().unwrap().last().cloned()
    }
}

fn ada() -> User {
    User {
        id: "u1".into(),
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        role: "admin".into(),
        phone: "555-0100".into(),
        avatar: None,
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn login(&self, _email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        self.record("login");
        if password == "secret" {
            Ok(LoginResponse {
                token: TOKEN.into(),
                user: Some(ada()),
            })
        } else {
            Err(ClientError::from_response(401, r#"{"message":"Invalid credentials"}"#))
        }
    }

    async fn current_user(&self, _token: &str) -> Result<User, ClientError> {
        self.record("current_user");
        if self.expired {
            return Err(ClientError::from_response(401, r#"{"message":"Token expired"}"#));
        }
        Ok(ada())
    }

    async fn list_users(&self, _token: &str) -> Result<Vec<User>, ClientError> {
        self.record("list_users");
        Ok(vec![ada()])
    }

    async fn update_user(&self, _token: &str, _user_id: &str, patch: &UserPatch) -> Result<UserPatch, ClientError> {
        self.record("update_user");
        self.payloads.lock().unwrap().push(serde_json::to_value(patch).unwrap());
        if self.reject_updates {
            return Err(ClientError::from_response(500, ""));
        }
        Ok(UserPatch {
            phone: patch.phone.clone(),
            ..Default::default()
        })
    }
}

#[async_trait]
impl StoreApi for FakeApi {
    async fn list_products(&self, _token: &str) -> Result<Vec<Product>, ClientError> {
        self.record("list_products");
        Ok(vec![Product {
            id: "p1".into(),
            image: None,
            name: "Tour Tee".into(),
            price: "29.99".into(),
            quantity: 0,
            category: "apparel".into(),
            status: ProductStatus::SoldOut,
        }])
    }

    async fn get_product(&self, _token: &str, id: &str) -> Result<Product, ClientError> {
        self.record("get_product");
        if id != "p1" {
            return Err(ClientError::from_response(404, r#"{"message":"Product not found"}"#));
        }
        Ok(self.list_products(TOKEN).await?.remove(0))
    }

    async fn create_product(&self, _token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.record("create_product");
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(payload.clone())
    }

    async fn update_product(&self, _token: &str, _id: &str, payload: &Value) -> Result<Value, ClientError> {
        self.record("update_product");
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(payload.clone())
    }

    async fn list_orders(&self, _token: &str) -> Result<Vec<Order>, ClientError> {
        self.record("list_orders");
        if self.expired {
            return Err(ClientError::from_response(401, r#"{"message":"Token expired"}"#));
        }
        Ok(vec![Order {
            id: "o1".into(),
            item: "Vinyl LP".into(),
            order_ref: "#1001".into(),
            status: OrderStatus::Pending,
            created_at: None,
        }])
    }

    async fn list_coupons(&self, _token: &str) -> Result<Vec<Coupon>, ClientError> {
        self.record("list_coupons");
        Ok(Vec::new())
    }

    async fn create_coupon(&self, _token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.record("create_coupon");
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(payload.clone())
    }

    async fn list_tracks(&self, _token: &str) -> Result<Vec<Track>, ClientError> {
        self.record("list_tracks");
        Ok(Vec::new())
    }

    async fn create_single(&self, _token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.record("create_single");
        Ok(payload.clone())
    }

    async fn list_shipping_zones(&self, _token: &str) -> Result<Vec<ShippingZone>, ClientError> {
        self.record("list_shipping_zones");
        Err(ClientError::from_response(503, r#"{"message":"Logistics service offline"}"#))
    }

    async fn list_locations(&self, _token: &str) -> Result<Vec<Location>, ClientError> {
        self.record("list_locations");
        Ok(Vec::new())
    }

    async fn countdown(&self, _token: &str) -> Result<Option<Countdown>, ClientError> {
        self.record("countdown");
        Ok(None)
    }

    async fn list_content(&self, _token: &str) -> Result<Vec<ContentEntry>, ClientError> {
        self.record("list_content");
        Ok(Vec::new())
    }

    async fn list_puzzles(&self, _token: &str) -> Result<Vec<Puzzle>, ClientError> {
        self.record("list_puzzles");
        Ok(Vec::new())
    }
}

fn setup(api: FakeApi) -> (AppState, Arc<FakeApi>) {
    setup_with(DashboardConfig::default(), api)
}

fn setup_with(config: DashboardConfig, api: FakeApi) -> (AppState, Arc<FakeApi>) {
    let api = Arc::new(api);
    let state = AppState::new(config, api.clone(), api.clone());
    (state, api)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("auth_token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("auth_token={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(state: &AppState, request: Request<Body>) -> Response {
    create_router(state.clone()).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_guard_redirects_without_token() {
    let (state, api) = setup(FakeApi::default());

    let response = send(&state, get("/orders?status=pending", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect=%2Forders%3Fstatus%3Dpending");
    assert_eq!(api.called("list_orders"), 0);
    let body = body_text(response).await;
    assert!(body.contains("animate-spin"));
    assert!(!body.contains("#1001"));
}

#[tokio::test]
async fn test_guard_sets_hx_redirect_for_htmx() {
    let (state, _) = setup(FakeApi::default());
    let request = Request::builder()
        .uri("/shop")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();

    let response = send(&state, request).await;
    assert_eq!(
        response.headers().get("HX-Redirect").unwrap(),
        "/login?redirect=%2Fshop"
    );
}

#[tokio::test]
async fn test_guard_passes_with_token() {
    let (state, api) = setup(FakeApi::default());

    let response = send(&state, get("/orders", Some(TOKEN))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(api.called("list_orders"), 1);
    assert!(body_text(response).await.contains("#1001"));
}

#[tokio::test]
async fn test_health_is_public() {
    let (state, _) = setup(FakeApi::default());
    let response = send(&state, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_login_sets_cookie_and_seeds_session() {
    let (state, _) = setup(FakeApi::default());

    let response = send(
        &state,
        post_form("/login", None, "email=ada%40example.com&password=secret&redirect=%2Forders"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/orders");
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth_token=tok-1;"));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(state.sessions().get(TOKEN).unwrap().name, "Ada Lovelace");
}

#[tokio::test]
async fn test_login_ignores_redirect_with_control_characters() {
    let (state, _) = setup(FakeApi::default());

    let response = send(
        &state,
        post_form(
            "/login",
            None,
            "email=ada%40example.com&password=secret&redirect=%2F%09%2Fevil.example",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn test_custom_login_path() {
    let mut config = DashboardConfig::default();
    config.auth.login_path = "/signin".into();
    let (state, _) = setup_with(config, FakeApi::default());

    let response = send(&state, get("/orders", None)).await;
    assert_eq!(location(&response), "/signin?redirect=%2Forders");

    let response = send(&state, get("/signin?redirect=%2Forders", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"action="/signin""#));
    assert!(page.contains(r#"value="/orders""#));

    let response = send(
        &state,
        post_form("/signin", None, "email=ada%40example.com&password=secret&redirect=%2Forders"),
    )
    .await;
    assert_eq!(location(&response), "/orders");
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    let response = send(&state, post_form("/signin", None, "email=ada%40example.com&password=nope")).await;
    assert_eq!(location(&response), "/signin?error=invalid");

    assert_eq!(send(&state, get("/login", None)).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_login_returns_to_form() {
    let (state, _) = setup(FakeApi::default());

    let response = send(&state, post_form("/login", None, "email=ada%40example.com&password=nope")).await;

    assert_eq!(location(&response), "/login?error=invalid");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session() {
    let (state, _) = setup(FakeApi::default());
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));

    let response = send(&state, get("/logout", Some(TOKEN))).await;

    assert_eq!(location(&response), "/login");
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert!(state.sessions().get(TOKEN).is_none());
}

#[tokio::test]
async fn test_profile_update_merges_and_toasts() {
    let (state, api) = setup(FakeApi::default());
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));

    let response = send(&state, post_form("/settings/profile", Some(TOKEN), "phone=555-0199")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings");
    assert_eq!(api.last_payload(), Some(json!({ "phone": "555-0199" })));

    let cached = state.sessions().get(TOKEN).unwrap();
    assert_eq!(cached.phone, "555-0199");
    assert_eq!(cached.email, "ada@example.com");

    let page = body_text(send(&state, get("/settings", Some(TOKEN))).await).await;
    assert_eq!(page.matches("Profile updated successfully").count(), 1);
}

#[tokio::test]
async fn test_failed_profile_update_keeps_cache() {
    let (state, _) = setup(FakeApi {
        reject_updates: true,
        ..Default::default()
    });
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));

    let response = send(&state, post_form("/settings/profile", Some(TOKEN), "phone=555-0199")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Failed to update user"));
    assert_eq!(state.sessions().get(TOKEN).unwrap().phone, "555-0100");
}

#[tokio::test]
async fn test_invalid_profile_is_not_sent() {
    let (state, api) = setup(FakeApi::default());

    let response = send(&state, post_form("/settings/profile", Some(TOKEN), "email=not-an-email")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Enter a valid email address"));
    assert_eq!(api.called("update_user"), 0);
}

#[tokio::test]
async fn test_blank_phone_is_rejected() {
    let (state, api) = setup(FakeApi::default());
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));

    let response = send(
        &state,
        post_form(
            "/settings/profile",
            Some(TOKEN),
            "name=Ada+Lovelace&email=ada%40example.com&phone=+&avatar=",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Phone number cannot be blank"));
    assert_eq!(api.called("update_user"), 0);
}

#[tokio::test]
async fn test_unchanged_profile_fields_are_not_sent() {
    let (state, api) = setup(FakeApi::default());
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));

    let response = send(
        &state,
        post_form(
            "/settings/profile",
            Some(TOKEN),
            "name=Ada+Lovelace&email=ada%40example.com&phone=555-0199&avatar=",
        ),
    )
    .await;

    assert_eq!(location(&response), "/settings");
    assert_eq!(api.last_payload(), Some(json!({ "phone": "555-0199" })));
}

#[tokio::test]
async fn test_rejected_token_drops_cached_session() {
    let (state, _) = setup(FakeApi {
        expired: true,
        ..Default::default()
    });
    state.sessions().merge(TOKEN, &UserPatch::from(&ada()));
    state.notifier(TOKEN).notify(Notification::success("Saved"));

    let response = send(&state, get("/orders", Some(TOKEN))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Token expired"));
    assert!(state.sessions().get(TOKEN).is_none());
    assert!(state.sessions().is_empty());
    assert!(state.notices().drain(TOKEN).is_empty());
}

#[tokio::test]
async fn test_short_product_name_is_rejected() {
    let (state, api) = setup(FakeApi::default());
    let form = "name=Ab&description=Heavyweight+cotton+tee&price=20&stock=5&sku=T1&categories=apparel&color=black";

    let response = send(&state, post_form("/shop/new", Some(TOKEN), form)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Product name must be at least 3 characters"));
    assert_eq!(api.called("create_product"), 0);
}

#[tokio::test]
async fn test_valid_product_is_created() {
    let (state, api) = setup(FakeApi::default());
    let form = "name=Abc&description=Heavyweight+cotton+tee&price=20&stock=5&sku=T1&categories=apparel&color=black";

    let response = send(&state, post_form("/shop/new", Some(TOKEN), form)).await;

    assert_eq!(location(&response), "/shop");
    assert_eq!(api.called("create_product"), 1);
    assert_eq!(api.last_payload().unwrap()["categories"], json!(["apparel"]));
}

#[tokio::test]
async fn test_empty_edit_is_accepted() {
    let (state, api) = setup(FakeApi::default());

    let response = send(&state, post_form("/shop/p1/edit", Some(TOKEN), "")).await;

    assert_eq!(location(&response), "/shop");
    assert_eq!(api.last_payload(), Some(json!({})));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (state, _) = setup(FakeApi::default());

    let response = send(&state, get("/shop/nope/edit", Some(TOKEN))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Product not found"));
}

#[tokio::test]
async fn test_coupon_discount_over_limit() {
    let (state, api) = setup(FakeApi::default());

    let response = send(&state, post_form("/coupons", Some(TOKEN), "code=SPRING&discount=150")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Discount cannot exceed 100%"));
    assert_eq!(api.called("create_coupon"), 0);
}

#[tokio::test]
async fn test_load_failure_renders_empty_state() {
    let (state, _) = setup(FakeApi::default());

    let response = send(&state, get("/shipping-zones", Some(TOKEN))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Logistics service offline"));
}

#[tokio::test]
async fn test_sidebar_marks_nested_route_active() {
    let (state, _) = setup(FakeApi::default());

    let body = body_text(send(&state, get("/shop/p1/edit", Some(TOKEN))).await).await;
    let shop_link = body
        .split("<a ")
        .find(|a| a.starts_with(r#"href="/shop" "#))
        .unwrap();
    assert!(shop_link.contains("text-primary-600 dark:text-primary-400"));
}
