//! Schemas for shop products, music singles and coupons.

use crate::rule::Rule;
use crate::schema::Schema;
use regex::Regex;
use std::sync::LazyLock;

/// Field names of the optional bundle block.
pub const BUNDLE_FIELDS: [&str; 3] = ["bundleItems", "bundlePrice", "bundleTier"];

static COUPON_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]+$").expect("coupon code pattern is valid"));

fn required_text(message: &str) -> Rule {
    Rule::string()
        .required_message(message)
        .non_empty()
        .message(message)
}

fn bundle_item() -> Rule {
    Rule::object(
        Schema::new()
            .field("productId", required_text("Bundle item product is required"))
            .field(
                "quantity",
                Rule::number()
                    .required_message("Bundle item quantity is required")
                    .positive()
                    .message("Bundle item quantity must be greater than zero"),
            ),
    )
}

/// Schema for creating a shop product.
///
/// The bundle block is optional, but when any bundle field is given all
/// three must be.
pub fn product_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Rule::string()
                .required_message("Product name is required")
                .min_len(3)
                .message("Product name must be at least 3 characters"),
        )
        .field(
            "description",
            Rule::string()
                .required_message("Description is required")
                .min_len(10)
                .message("Description must be at least 10 characters"),
        )
        .field("price", required_text("Price is required"))
        .field("stock", required_text("Stock is required"))
        .field("sku", required_text("SKU is required"))
        .field(
            "categories",
            Rule::array()
                .required_message("Select at least one category")
                .min_items(1)
                .message("Select at least one category")
                .items(Rule::string().non_empty()),
        )
        .field("color", required_text("Color is required"))
        .field("sizes", Rule::array().items(Rule::string()))
        .field("images", Rule::array().items(Rule::string()))
        .field("bundleItems", Rule::array().items(bundle_item()).optional())
        .field("bundlePrice", required_text("Bundle price is required").optional())
        .field("bundleTier", required_text("Bundle tier is required").optional())
        .all_or_none(
            &BUNDLE_FIELDS,
            "Bundle items, bundle price and bundle tier must be provided together",
        )
}

/// Schema for editing a product: every field optional.
pub fn edit_product_schema() -> Schema {
    product_schema().partial()
}

/// Schema for creating a bundle variant: the bundle block is mandatory and
/// must list at least one item.
pub fn bundle_variant_schema() -> Schema {
    product_schema()
        .field(
            "bundleItems",
            Rule::array()
                .required_message("Add at least one bundle item")
                .min_items(1)
                .message("Add at least one bundle item")
                .items(bundle_item()),
        )
        .require("bundlePrice")
        .require("bundleTier")
}

/// Schema for the music manager's "add single" form.
pub fn single_track_schema() -> Schema {
    Schema::new()
        .field(
            "title",
            Rule::string()
                .required_message("Track title is required")
                .min_len(3)
                .message("Track title must be at least 3 characters"),
        )
        .field("artist", required_text("Artist is required"))
        .field(
            "description",
            Rule::string()
                .required_message("Description is required")
                .min_len(10)
                .message("Description must be at least 10 characters"),
        )
        .field("price", required_text("Price is required"))
        .field(
            "genres",
            Rule::array()
                .required_message("Select at least one genre")
                .min_items(1)
                .message("Select at least one genre")
                .items(Rule::string().non_empty()),
        )
        .field("audioUrl", required_text("Audio file URL is required"))
        .field("images", Rule::array().items(Rule::string()))
        .field("releaseDate", Rule::string().optional())
}

/// Schema for creating a coupon.
pub fn coupon_schema() -> Schema {
    Schema::new()
        .field(
            "code",
            Rule::string()
                .required_message("Coupon code is required")
                .min_len(3)
                .message("Coupon code must be at least 3 characters")
                .pattern(COUPON_CODE.clone())
                .message("Coupon code may only contain A-Z, 0-9, '-' and '_'"),
        )
        .field(
            "discount",
            Rule::number()
                .required_message("Discount is required")
                .message("Discount must be a number")
                .positive()
                .message("Discount must be greater than zero")
                .max(100.0)
                .message("Discount cannot exceed 100%"),
        )
        .field("expiresAt", Rule::string().non_empty().optional())
}
