//! Client tests against an in-process stub of the storefront API.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use backstage_client::{ApiClient, ClientError, StoreApi, UserApi};
use backstage_core::{OrderStatus, UserPatch};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn login(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.bodies.lock().unwrap().push(body.clone());
    if body["password"] == "hunter2" {
        (
            StatusCode::OK,
            Json(json!({ "token": "tok-123", "user": { "id": "u1", "name": "Ada", "email": "ada@example.com" } })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn update_user(
    State(seen): State<Seen>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    seen.headers.lock().unwrap().push(headers);
    seen.bodies.lock().unwrap().push(body.clone());
    if id == "locked" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Email already taken" })),
        );
    }
    (StatusCode::OK, Json(json!({ "id": id, "name": body["name"] })))
}

async fn orders(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get(header::AUTHORIZATION).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": "o1", "item": "Vinyl LP", "orderRef": "#1001", "status": "Pending" },
            { "id": "o2", "item": "Hoodie", "orderRef": "#1002", "status": "Delivered",
              "createdAt": "2026-03-01T10:00:00Z" }
        ])),
    )
}

async fn no_countdown() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn broken_products() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_stub() -> (ApiClient, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users/{id}", patch(update_user))
        .route("/api/orders", get(orders))
        .route("/api/blackbox/countdown", get(no_countdown))
        .route("/api/products", get(broken_products))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::with_base_url(format!("http://{addr}/api"), 5).unwrap();
    (client, seen)
}

#[tokio::test]
async fn test_login_returns_token() {
    let (client, seen) = spawn_stub().await;

    let response = client.login("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(response.token, "tok-123");
    assert_eq!(response.user.unwrap().name, "Ada");
    assert_eq!(
        seen.bodies.lock().unwrap()[0],
        json!({ "email": "ada@example.com", "password": "hunter2" })
    );
}

#[tokio::test]
async fn test_login_failure_carries_api_message() {
    let (client, _) = spawn_stub().await;

    let err = client.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message().as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_update_user_sends_json_with_bearer_token() {
    let (client, seen) = spawn_stub().await;

    let patch = UserPatch {
        name: Some("Ada King".into()),
        ..Default::default()
    };
    let echoed = client.update_user("tok-123", "u1", &patch).await.unwrap();
    assert_eq!(echoed.name.as_deref(), Some("Ada King"));
    assert_eq!(echoed.id.as_deref(), Some("u1"));
    assert!(echoed.email.is_none());

    let headers = seen.headers.lock().unwrap()[0].clone();
    assert_eq!(headers[header::AUTHORIZATION], "Bearer tok-123");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCEPT], "application/json");
    assert_eq!(seen.bodies.lock().unwrap()[0], json!({ "name": "Ada King" }));
}

#[tokio::test]
async fn test_update_user_error() {
    let (client, _) = spawn_stub().await;

    let err = client
        .update_user("tok-123", "locked", &UserPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }));
    assert_eq!(err.user_message().as_deref(), Some("Email already taken"));
}

#[tokio::test]
async fn test_list_orders() {
    let (client, _) = spawn_stub().await;

    let orders = client.list_orders("tok-123").await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert!(orders[1].created_at.is_some());
}

#[tokio::test]
async fn test_missing_countdown_is_none() {
    let (client, _) = spawn_stub().await;
    assert!(client.countdown("tok-123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_without_message() {
    let (client, _) = spawn_stub().await;

    let err = client.list_products("tok-123").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), None);
}
