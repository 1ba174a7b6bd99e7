//! Submitted HTML forms and the JSON payloads built from them.
//!
//! Form fields arrive as strings. Each form turns itself into the payload
//! the storefront API expects, and that payload is what gets validated, so
//! error field names match input names.

use backstage_core::{Product, User, UserPatch};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Split a comma separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a numeric input, keeping the raw text when it is not a number.
fn number_or_raw(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return json!(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => json!(n),
        _ => json!(raw),
    }
}

fn insert_text(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), json!(value.trim()));
}

fn insert_if_filled(map: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.trim().is_empty() {
        insert_text(map, key, value);
    }
}

/// Shop product form, used for both create and edit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub sku: String,
    /// Comma separated.
    pub categories: String,
    pub color: String,
    /// Comma separated.
    pub sizes: String,
    /// Comma separated image URLs.
    pub images: String,
    /// The "bundle variant" checkbox.
    pub bundle: bool,
    /// One `productId:quantity` pair per line.
    pub bundle_items: String,
    pub bundle_price: String,
    pub bundle_tier: String,
}

impl ProductForm {
    /// Prefill the edit form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.clone(),
            stock: product.quantity.to_string(),
            categories: product.category.clone(),
            images: product.image.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn is_bundle(&self) -> bool {
        self.bundle
    }

    /// Parse the bundle item lines.
    pub fn bundle_item_values(&self) -> Vec<Value> {
        self.bundle_items
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once(':') {
                Some((id, qty)) => json!({ "productId": id.trim(), "quantity": number_or_raw(qty) }),
                None => json!({ "productId": line }),
            })
            .collect()
    }

    /// Payload for `POST /products`.
    ///
    /// Bundle variants always carry the three bundle fields. Plain products
    /// carry whichever bundle fields were filled in.
    pub fn to_create_payload(&self) -> Value {
        let mut map = Map::new();
        insert_text(&mut map, "name", &self.name);
        insert_text(&mut map, "description", &self.description);
        insert_text(&mut map, "price", &self.price);
        insert_text(&mut map, "stock", &self.stock);
        insert_text(&mut map, "sku", &self.sku);
        map.insert("categories".into(), json!(split_list(&self.categories)));
        insert_text(&mut map, "color", &self.color);
        map.insert("sizes".into(), json!(split_list(&self.sizes)));
        map.insert("images".into(), json!(split_list(&self.images)));

        if self.bundle {
            map.insert("bundleItems".into(), Value::Array(self.bundle_item_values()));
            insert_text(&mut map, "bundlePrice", &self.bundle_price);
            insert_text(&mut map, "bundleTier", &self.bundle_tier);
        } else {
            self.insert_filled_bundle(&mut map);
        }
        Value::Object(map)
    }

    /// Payload for `PATCH /products/{id}`: only the fields that were filled.
    pub fn to_edit_payload(&self) -> Value {
        let mut map = Map::new();
        insert_if_filled(&mut map, "name", &self.name);
        insert_if_filled(&mut map, "description", &self.description);
        insert_if_filled(&mut map, "price", &self.price);
        insert_if_filled(&mut map, "stock", &self.stock);
        insert_if_filled(&mut map, "sku", &self.sku);
        if !self.categories.trim().is_empty() {
            map.insert("categories".into(), json!(split_list(&self.categories)));
        }
        insert_if_filled(&mut map, "color", &self.color);
        if !self.sizes.trim().is_empty() {
            map.insert("sizes".into(), json!(split_list(&self.sizes)));
        }
        if !self.images.trim().is_empty() {
            map.insert("images".into(), json!(split_list(&self.images)));
        }
        self.insert_filled_bundle(&mut map);
        Value::Object(map)
    }

    fn insert_filled_bundle(&self, map: &mut Map<String, Value>) {
        if !self.bundle_items.trim().is_empty() {
            map.insert("bundleItems".into(), Value::Array(self.bundle_item_values()));
        }
        insert_if_filled(map, "bundlePrice", &self.bundle_price);
        insert_if_filled(map, "bundleTier", &self.bundle_tier);
    }
}

/// Music manager "add single" form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackForm {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: String,
    /// Comma separated.
    pub genres: String,
    pub audio_url: String,
    /// Comma separated cover image URLs.
    pub images: String,
    pub release_date: String,
}

impl TrackForm {
    /// Payload for `POST /music/singles`.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        insert_text(&mut map, "title", &self.title);
        insert_text(&mut map, "artist", &self.artist);
        insert_text(&mut map, "description", &self.description);
        insert_text(&mut map, "price", &self.price);
        map.insert("genres".into(), json!(split_list(&self.genres)));
        insert_text(&mut map, "audioUrl", &self.audio_url);
        map.insert("images".into(), json!(split_list(&self.images)));
        insert_if_filled(&mut map, "releaseDate", &self.release_date);
        Value::Object(map)
    }
}

/// Coupon creation form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CouponForm {
    pub code: String,
    pub discount: String,
    pub expires_at: String,
}

impl CouponForm {
    /// Payload for `POST /coupons`. A blank discount is left out.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        insert_text(&mut map, "code", &self.code);
        if !self.discount.trim().is_empty() {
            map.insert("discount".into(), number_or_raw(&self.discount));
        }
        insert_if_filled(&mut map, "expiresAt", &self.expires_at);
        Value::Object(map)
    }
}

/// Settings page profile form.
///
/// A field missing from the submission is `None`. A field submitted blank is
/// `Some("")`, which clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

fn changed(submitted: &Option<String>, current: &str) -> Option<String> {
    let value = submitted.as_deref()?.trim();
    (value != current).then(|| value.to_string())
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self::default().fill_missing(user)
    }

    /// Take fields that were not submitted from `user`.
    pub fn fill_missing(self, user: &User) -> Self {
        Self {
            name: self.name.or_else(|| Some(user.name.clone())),
            email: self.email.or_else(|| Some(user.email.clone())),
            phone: self.phone.or_else(|| Some(user.phone.clone())),
            avatar: self.avatar.or_else(|| Some(user.avatar.clone().unwrap_or_default())),
        }
    }

    /// The fields that differ from `current`, blanks included.
    pub fn to_patch(&self, current: &User) -> UserPatch {
        UserPatch {
            name: changed(&self.name, &current.name),
            email: changed(&self.email, &current.email),
            phone: changed(&self.phone, &current.phone),
            avatar: changed(&self.avatar, current.avatar.as_deref().unwrap_or_default()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstage_schema::{bundle_variant_schema, edit_product_schema, product_schema};
    use pretty_assertions::assert_eq;

    fn filled_product() -> ProductForm {
        ProductForm {
            name: "Tour Tee".into(),
            description: "Heavyweight cotton tour shirt".into(),
            price: "29.99".into(),
            stock: "40".into(),
            sku: "TEE-01".into(),
            categories: "apparel, merch".into(),
            color: "black".into(),
            sizes: "S,M, L".into(),
            images: "".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, ,b ,c,"), vec!["a", "b", "c"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn test_create_payload_passes_product_schema() {
        let payload = filled_product().to_create_payload();
        assert_eq!(payload["categories"], json!(["apparel", "merch"]));
        assert_eq!(payload["sizes"], json!(["S", "M", "L"]));
        assert_eq!(payload["images"], json!([]));
        assert!(payload.get("bundleItems").is_none());
        assert!(product_schema().validate(&payload).is_ok());
    }

    #[test]
    fn test_partial_bundle_trips_refinement() {
        let form = ProductForm {
            bundle_price: "49.99".into(),
            ..filled_product()
        };
        let errors = product_schema().validate(&form.to_create_payload()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has("bundleItems"));
        assert!(errors.has("bundleTier"));
    }

    #[test]
    fn test_bundle_variant_payload() {
        let form = ProductForm {
            bundle: true,
            bundle_items: "p-1:2\n\n p-2 : 1 \n".into(),
            bundle_price: "49.99".into(),
            bundle_tier: "gold".into(),
            ..filled_product()
        };
        let payload = form.to_create_payload();
        assert_eq!(
            payload["bundleItems"],
            json!([
                { "productId": "p-1", "quantity": 2 },
                { "productId": "p-2", "quantity": 1 }
            ])
        );
        assert!(bundle_variant_schema().validate(&payload).is_ok());
    }

    #[test]
    fn test_bad_bundle_quantity_is_reported() {
        let form = ProductForm {
            bundle: true,
            bundle_items: "p-1:lots".into(),
            bundle_price: "49.99".into(),
            bundle_tier: "gold".into(),
            ..filled_product()
        };
        let errors = bundle_variant_schema()
            .validate(&form.to_create_payload())
            .unwrap_err();
        assert!(errors.has("bundleItems[0].quantity"));
    }

    #[test]
    fn test_edit_payload_only_sends_filled_fields() {
        let form = ProductForm {
            price: " 19.99 ".into(),
            ..Default::default()
        };
        let payload = form.to_edit_payload();
        assert_eq!(payload, json!({ "price": "19.99" }));
        assert!(edit_product_schema().validate(&payload).is_ok());
        assert_eq!(ProductForm::default().to_edit_payload(), json!({}));
    }

    #[test]
    fn test_coupon_discount_parsing() {
        let form = CouponForm {
            code: "SPRING25".into(),
            discount: "25".into(),
            expires_at: "".into(),
        };
        assert_eq!(form.to_payload(), json!({ "code": "SPRING25", "discount": 25 }));

        let form = CouponForm {
            discount: "12.5".into(),
            ..Default::default()
        };
        assert_eq!(form.to_payload()["discount"], json!(12.5));

        let form = CouponForm {
            discount: "ten".into(),
            ..Default::default()
        };
        assert_eq!(form.to_payload()["discount"], json!("ten"));
    }

    #[test]
    fn test_track_payload() {
        let form = TrackForm {
            title: "Night Drive".into(),
            artist: "The Static".into(),
            description: "Lead single from the new record".into(),
            price: "1.29".into(),
            genres: "synthwave".into(),
            audio_url: "https://cdn.example.com/night-drive.mp3".into(),
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload["audioUrl"], json!("https://cdn.example.com/night-drive.mp3"));
        assert!(payload.get("releaseDate").is_none());
        assert!(backstage_schema::single_track_schema().validate(&payload).is_ok());
    }

    fn ada() -> User {
        User {
            id: "u1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            role: "admin".into(),
            phone: "555-0100".into(),
            avatar: Some("https://cdn.example.com/ada.png".into()),
        }
    }

    #[test]
    fn test_profile_patch_only_sends_changes() {
        let form = ProfileForm {
            name: Some(" Ada King ".into()),
            ..Default::default()
        }
        .fill_missing(&ada());
        assert_eq!(
            form.to_patch(&ada()),
            UserPatch {
                name: Some("Ada King".into()),
                ..Default::default()
            }
        );
        assert_eq!(ProfileForm::from_user(&ada()).to_patch(&ada()), UserPatch::default());
    }

    #[test]
    fn test_profile_patch_sends_cleared_fields() {
        let form = ProfileForm {
            phone: Some("  ".into()),
            avatar: Some(String::new()),
            ..Default::default()
        };
        let patch = form.to_patch(&ada());
        assert_eq!(patch.phone.as_deref(), Some(""));
        assert_eq!(patch.avatar.as_deref(), Some(""));

        let payload = serde_json::to_value(&patch).unwrap();
        let errors = backstage_schema::profile_schema().validate(&payload).unwrap_err();
        assert!(errors.has("phone"));
        assert!(!errors.has("avatar"));
    }
}
