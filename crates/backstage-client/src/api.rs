//! Typed views of the storefront API.
//!
//! The dashboard depends on these traits rather than on [`ApiClient`]
//! directly so handlers can be exercised against in-memory fakes.

use crate::client::ApiClient;
use crate::error::ClientError;
use async_trait::async_trait;
use backstage_core::{
    ContentEntry, Countdown, Coupon, Location, LoginResponse, Order, Product, Puzzle,
    ShippingZone, Track, User, UserPatch,
};
use serde_json::{Value, json};

/// Authentication and user-profile endpoints.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError>;

    /// Profile of the user owning `token`.
    async fn current_user(&self, token: &str) -> Result<User, ClientError>;

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ClientError>;

    /// Apply a partial update. The response may carry only the changed fields.
    async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        patch: &UserPatch,
    ) -> Result<UserPatch, ClientError>;
}

/// Shop, music, logistics and blackbox endpoints.
#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn list_products(&self, token: &str) -> Result<Vec<Product>, ClientError>;

    async fn get_product(&self, token: &str, id: &str) -> Result<Product, ClientError>;

    async fn create_product(&self, token: &str, payload: &Value) -> Result<Value, ClientError>;

    async fn update_product(&self, token: &str, id: &str, payload: &Value) -> Result<Value, ClientError>;

    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ClientError>;

    async fn list_coupons(&self, token: &str) -> Result<Vec<Coupon>, ClientError>;

    async fn create_coupon(&self, token: &str, payload: &Value) -> Result<Value, ClientError>;

    async fn list_tracks(&self, token: &str) -> Result<Vec<Track>, ClientError>;

    async fn create_single(&self, token: &str, payload: &Value) -> Result<Value, ClientError>;

    async fn list_shipping_zones(&self, token: &str) -> Result<Vec<ShippingZone>, ClientError>;

    async fn list_locations(&self, token: &str) -> Result<Vec<Location>, ClientError>;

    /// The running countdown, or `None` when none is scheduled.
    async fn countdown(&self, token: &str) -> Result<Option<Countdown>, ClientError>;

    async fn list_content(&self, token: &str) -> Result<Vec<ContentEntry>, ClientError>;

    async fn list_puzzles(&self, token: &str) -> Result<Vec<Puzzle>, ClientError>;
}

#[async_trait]
impl UserApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        self.post(
            "/auth/login",
            None,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn current_user(&self, token: &str) -> Result<User, ClientError> {
        self.get("/users/me", token).await
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ClientError> {
        self.get("/users", token).await
    }

    async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        patch: &UserPatch,
    ) -> Result<UserPatch, ClientError> {
        self.patch(&format!("/users/{user_id}"), token, patch).await
    }
}

#[async_trait]
impl StoreApi for ApiClient {
    async fn list_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        self.get("/products", token).await
    }

    async fn get_product(&self, token: &str, id: &str) -> Result<Product, ClientError> {
        self.get(&format!("/products/{id}"), token).await
    }

    async fn create_product(&self, token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.post("/products", Some(token), payload).await
    }

    async fn update_product(&self, token: &str, id: &str, payload: &Value) -> Result<Value, ClientError> {
        self.patch(&format!("/products/{id}"), token, payload).await
    }

    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        self.get("/orders", token).await
    }

    async fn list_coupons(&self, token: &str) -> Result<Vec<Coupon>, ClientError> {
        self.get("/coupons", token).await
    }

    async fn create_coupon(&self, token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.post("/coupons", Some(token), payload).await
    }

    async fn list_tracks(&self, token: &str) -> Result<Vec<Track>, ClientError> {
        self.get("/music/tracks", token).await
    }

    async fn create_single(&self, token: &str, payload: &Value) -> Result<Value, ClientError> {
        self.post("/music/singles", Some(token), payload).await
    }

    async fn list_shipping_zones(&self, token: &str) -> Result<Vec<ShippingZone>, ClientError> {
        self.get("/shipping-zones", token).await
    }

    async fn list_locations(&self, token: &str) -> Result<Vec<Location>, ClientError> {
        self.get("/locations", token).await
    }

    async fn countdown(&self, token: &str) -> Result<Option<Countdown>, ClientError> {
        match self.get::<Countdown>("/blackbox/countdown", token).await {
            Ok(countdown) => Ok(Some(countdown)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_content(&self, token: &str) -> Result<Vec<ContentEntry>, ClientError> {
        self.get("/blackbox/content", token).await
    }

    async fn list_puzzles(&self, token: &str) -> Result<Vec<Puzzle>, ClientError> {
        self.get("/blackbox/puzzles", token).await
    }
}
