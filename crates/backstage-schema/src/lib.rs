//! Backstage payload validation.
//!
//! Each dashboard form builds a JSON payload and checks it against one of the
//! schemas here before anything is sent to the storefront API. A [`Schema`]
//! maps field names to [`Rule`]s and reports every failing field as a
//! [`FieldError`], so forms can render messages next to the right inputs.

pub mod catalog;
pub mod error;
pub mod profile;
pub mod rule;
pub mod schema;

pub use catalog::{
    BUNDLE_FIELDS, bundle_variant_schema, coupon_schema, edit_product_schema, product_schema,
    single_track_schema,
};
pub use error::{FieldError, FieldErrorKind, ValidationErrors};
pub use profile::profile_schema;
pub use rule::{Rule, ValueKind};
pub use schema::{Refinement, Schema};

/// Names accepted by [`schema_by_name`].
pub const SCHEMA_NAMES: [&str; 6] = [
    "product",
    "edit-product",
    "bundle",
    "single",
    "coupon",
    "profile",
];

/// Look up a built-in schema by its short name.
pub fn schema_by_name(name: &str) -> Option<Schema> {
    match name {
        "product" => Some(product_schema()),
        "edit-product" => Some(edit_product_schema()),
        "bundle" => Some(bundle_variant_schema()),
        "single" => Some(single_track_schema()),
        "coupon" => Some(coupon_schema()),
        "profile" => Some(profile_schema()),
        _ => None,
    }
}
