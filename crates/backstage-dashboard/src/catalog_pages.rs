//! Shop, coupon and music manager pages.

use crate::forms::{CouponForm, ProductForm, TrackForm};
use crate::pages::{Loaded, format_date, load_failed};
use crate::state::PageContext;
use crate::templates::{
    badge, card, empty_state, escape, form_checkbox, form_errors, form_field, form_textarea,
    layout, page_header, submit_button, table,
};
use backstage_core::{Coupon, Product, ProductStatus, Track};
use backstage_schema::ValidationErrors;
use chrono::{DateTime, Utc};

// =============================================================================
// Shop
// =============================================================================

pub fn shop_page(ctx: &PageContext, products: &Loaded<Vec<Product>>) -> String {
    let body = match products {
        Ok(products) if products.is_empty() => empty_state(
            "store",
            "No products yet",
            "Add your first product to start selling.",
            Some(("New Product", "/shop/new")),
        ),
        Ok(products) => {
            let rows: Vec<Vec<String>> = products.iter().map(product_row).collect();
            table(
                &["", "Name", "Price", "Quantity", "Category", "Status", ""],
                &rows,
            )
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Shop", "Products listed in the store.", Some(("New Product", "/shop/new"))),
        card("Products", &body),
    );
    layout("Shop", ctx, &content)
}

fn product_row(p: &Product) -> Vec<String> {
    let image = match &p.image {
        Some(src) => format!(
            r#"<img src="{}" alt="" class="w-10 h-10 rounded object-cover">"#,
            escape(src)
        ),
        None => r#"<div class="w-10 h-10 rounded bg-gray-100 dark:bg-gray-700 flex items-center justify-center"><i class="fas fa-image text-gray-400"></i></div>"#.to_string(),
    };
    let status = match p.status {
        ProductStatus::Active => badge("Active", "green"),
        ProductStatus::SoldOut => badge("Sold Out", "red"),
    };
    vec![
        image,
        escape(&p.name),
        escape(&p.price),
        p.quantity.to_string(),
        escape(&p.category),
        status,
        format!(
            r#"<a href="/shop/{}/edit" class="text-primary-600 hover:text-primary-700"><i class="fas fa-pen"></i> Edit</a>"#,
            urlencoding::encode(&p.id)
        ),
    ]
}

/// Which product form is being shown.
#[derive(Debug, Clone, Copy)]
pub enum ProductFormMode<'a> {
    Create,
    Edit { id: &'a str },
}

const PRODUCT_INPUTS: [&str; 12] = [
    "name",
    "description",
    "price",
    "stock",
    "sku",
    "categories",
    "color",
    "sizes",
    "images",
    "bundleItems",
    "bundlePrice",
    "bundleTier",
];

/// Create or edit form for a product.
pub fn product_form_page(
    ctx: &PageContext,
    mode: ProductFormMode<'_>,
    form: &ProductForm,
    errors: &ValidationErrors,
) -> String {
    let (title, action, subtitle) = match mode {
        ProductFormMode::Create => (
            "New Product".to_string(),
            "/shop/new".to_string(),
            "Every field except sizes and images is required.",
        ),
        ProductFormMode::Edit { id } => (
            "Edit Product".to_string(),
            format!("/shop/{}/edit", urlencoding::encode(id)),
            "Only the fields you fill in are changed.",
        ),
    };

    let bundle_toggle = match mode {
        ProductFormMode::Create => form_checkbox("bundle", "This product is a bundle variant", form.bundle),
        ProductFormMode::Edit { .. } => String::new(),
    };

    let fields = format!(
        r##"{summary}
        <form method="POST" action="{action}" class="space-y-5">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-5">
                {name}
                {sku}
            </div>
            {description}
            <div class="grid grid-cols-1 md:grid-cols-3 gap-5">
                {price}
                {stock}
                {color}
            </div>
            {categories}
            <div class="grid grid-cols-1 md:grid-cols-2 gap-5">
                {sizes}
                {images}
            </div>
            {bundle_toggle}
            <fieldset class="space-y-5 border-t border-gray-200 dark:border-gray-700 pt-5">
                <legend class="text-sm font-semibold text-gray-500 dark:text-gray-400">Bundle</legend>
                {bundle_items}
                <div class="grid grid-cols-1 md:grid-cols-2 gap-5">
                    {bundle_price}
                    {bundle_tier}
                </div>
            </fieldset>
            <div class="flex items-center gap-3 pt-2">
                {submit}
                <a href="/shop" class="text-gray-500 hover:text-gray-700">Cancel</a>
            </div>
        </form>"##,
        summary = form_errors(errors, &PRODUCT_INPUTS),
        name = form_field("name", "Name", "text", &form.name, "Tour T-shirt", errors),
        sku = form_field("sku", "SKU", "text", &form.sku, "TEE-001", errors),
        description = form_textarea("description", "Description", &form.description, errors),
        price = form_field("price", "Price", "text", &form.price, "29.99", errors),
        stock = form_field("stock", "Stock", "text", &form.stock, "100", errors),
        color = form_field("color", "Color", "text", &form.color, "Black", errors),
        categories = form_field("categories", "Categories (comma separated)", "text", &form.categories, "apparel, merch", errors),
        sizes = form_field("sizes", "Sizes (comma separated)", "text", &form.sizes, "S, M, L", errors),
        images = form_field("images", "Image URLs (comma separated)", "text", &form.images, "https://", errors),
        bundle_items = form_textarea("bundleItems", "Bundle items (one productId:quantity per line)", &form.bundle_items, errors),
        bundle_price = form_field("bundlePrice", "Bundle price", "text", &form.bundle_price, "49.99", errors),
        bundle_tier = form_field("bundleTier", "Bundle tier", "text", &form.bundle_tier, "gold", errors),
        submit = submit_button("Save product"),
    );

    let content = format!("{}{}", page_header(&title, subtitle, None), card("Product", &fields));
    layout(&title, ctx, &content)
}

// =============================================================================
// Coupons
// =============================================================================

fn coupon_badge(coupon: &Coupon, now: DateTime<Utc>) -> String {
    if coupon.is_expired(now) {
        badge("Expired", "red")
    } else if !coupon.active {
        badge("Inactive", "gray")
    } else {
        badge("Active", "green")
    }
}

/// Coupon table plus the create form.
pub fn coupons_page(
    ctx: &PageContext,
    coupons: &Loaded<Vec<Coupon>>,
    form: &CouponForm,
    errors: &ValidationErrors,
    now: DateTime<Utc>,
) -> String {
    let body = match coupons {
        Ok(coupons) if coupons.is_empty() => {
            empty_state("ticket-alt", "No coupons", "Create a coupon with the form below.", None)
        }
        Ok(coupons) => {
            let rows: Vec<Vec<String>> = coupons
                .iter()
                .map(|c| {
                    vec![
                        format!(r#"<code class="text-sm">{}</code>"#, escape(&c.code)),
                        format!("{}%", c.discount),
                        format_date(c.expires_at),
                        coupon_badge(c, now),
                    ]
                })
                .collect();
            table(&["Code", "Discount", "Expires", "Status"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let create_form = format!(
        r##"{summary}
        <form method="POST" action="/coupons" class="grid grid-cols-1 md:grid-cols-4 gap-5 items-end">
            {code}
            {discount}
            {expires}
            <div>{submit}</div>
        </form>"##,
        summary = form_errors(errors, &["code", "discount", "expiresAt"]),
        code = form_field("code", "Code", "text", &form.code, "SPRING25", errors),
        discount = form_field("discount", "Discount (%)", "text", &form.discount, "25", errors),
        expires = form_field("expiresAt", "Expires", "date", &form.expires_at, "", errors),
        submit = submit_button("Create coupon"),
    );

    let content = format!(
        r##"{header}
        <div class="space-y-6">
            {table}
            {create}
        </div>"##,
        header = page_header("Coupons", "Discount codes for the store.", None),
        table = card("Coupons", &body),
        create = card("New Coupon", &create_form),
    );
    layout("Coupons", ctx, &content)
}

// =============================================================================
// Music Manager
// =============================================================================

pub fn music_page(ctx: &PageContext, tracks: &Loaded<Vec<Track>>) -> String {
    let body = match tracks {
        Ok(tracks) if tracks.is_empty() => empty_state(
            "music",
            "No releases",
            "Upload a single to get started.",
            Some(("Add Single", "/music/add-single")),
        ),
        Ok(tracks) => {
            let rows: Vec<Vec<String>> = tracks
                .iter()
                .map(|t| {
                    let cover = match &t.cover {
                        Some(src) => format!(
                            r#"<img src="{}" alt="" class="w-10 h-10 rounded object-cover">"#,
                            escape(src)
                        ),
                        None => r#"<i class="fas fa-compact-disc text-2xl text-gray-400"></i>"#.to_string(),
                    };
                    vec![
                        cover,
                        escape(&t.title),
                        escape(&t.artist),
                        escape(&t.price),
                        format_date(t.release_date),
                    ]
                })
                .collect();
            table(&["", "Title", "Artist", "Price", "Released"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Music Manager", "Singles and releases.", Some(("Add Single", "/music/add-single"))),
        card("Tracks", &body),
    );
    layout("Music Manager", ctx, &content)
}

const TRACK_INPUTS: [&str; 8] = [
    "title",
    "artist",
    "description",
    "price",
    "genres",
    "audioUrl",
    "images",
    "releaseDate",
];

pub fn add_single_page(ctx: &PageContext, form: &TrackForm, errors: &ValidationErrors) -> String {
    let fields = format!(
        r##"{summary}
        <form method="POST" action="/music/add-single" class="space-y-5">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-5">
                {title}
                {artist}
            </div>
            {description}
            <div class="grid grid-cols-1 md:grid-cols-3 gap-5">
                {price}
                {genres}
                {release}
            </div>
            {audio}
            {images}
            <div class="flex items-center gap-3 pt-2">
                {submit}
                <a href="/music" class="text-gray-500 hover:text-gray-700">Cancel</a>
            </div>
        </form>"##,
        summary = form_errors(errors, &TRACK_INPUTS),
        title = form_field("title", "Title", "text", &form.title, "Night Drive", errors),
        artist = form_field("artist", "Artist", "text", &form.artist, "", errors),
        description = form_textarea("description", "Description", &form.description, errors),
        price = form_field("price", "Price", "text", &form.price, "1.29", errors),
        genres = form_field("genres", "Genres (comma separated)", "text", &form.genres, "synthwave, pop", errors),
        release = form_field("releaseDate", "Release date", "date", &form.release_date, "", errors),
        audio = form_field("audioUrl", "Audio file URL", "url", &form.audio_url, "https://", errors),
        images = form_field("images", "Cover image URLs (comma separated)", "text", &form.images, "https://", errors),
        submit = submit_button("Publish single"),
    );

    let content = format!(
        "{}{}",
        page_header("Add Single", "Publish a new single to the store.", None),
        card("Single", &fields),
    );
    layout("Add Single", ctx, &content)
}
