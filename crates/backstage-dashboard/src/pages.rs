//! Page templates for the overview, user and logistics views.

use crate::forms::ProfileForm;
use crate::state::PageContext;
use crate::templates::{
    badge, card, empty_state, escape, form_errors, form_field, layout, link_tabs, page_header,
    stats_card, submit_button, table, tabs,
};
use backstage_core::{Location, Order, OrderStatus, ShippingZone, User};
use backstage_schema::ValidationErrors;
use chrono::{DateTime, Utc};

/// Data for a page section, or the message explaining why it is missing.
pub type Loaded<T> = Result<T, String>;

/// Empty state shown in place of data that failed to load.
pub fn load_failed(message: &str) -> String {
    empty_state("exclamation-triangle", "Could not load data", message, None)
}

pub(crate) fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn order_status_badge(status: OrderStatus) -> String {
    let color = match status {
        OrderStatus::Delivered => "green",
        OrderStatus::InTransit => "blue",
        OrderStatus::Pending => "yellow",
    };
    badge(&status.to_string(), color)
}

fn count_or_dash<T>(loaded: &Loaded<Vec<T>>) -> String {
    loaded
        .as_ref()
        .map(|items| items.len().to_string())
        .unwrap_or_else(|_| "-".to_string())
}

fn orders_table(orders: &[Order]) -> String {
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                format!(r#"<code class="text-xs">{}</code>"#, escape(&o.order_ref)),
                escape(&o.item),
                order_status_badge(o.status),
                format_date(o.created_at),
            ]
        })
        .collect();
    table(&["Order", "Item", "Status", "Placed"], &rows)
}

// =============================================================================
// Home Page
// =============================================================================

pub fn home_page<P, U>(
    ctx: &PageContext,
    orders: &Loaded<Vec<Order>>,
    products: &Loaded<Vec<P>>,
    users: &Loaded<Vec<U>>,
) -> String {
    let pending = orders
        .as_ref()
        .map(|o| {
            o.iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count()
                .to_string()
        })
        .unwrap_or_else(|_| "-".to_string());

    let stats = format!(
        r##"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6 mb-8">
            {orders_stat}
            {products_stat}
            {users_stat}
            {pending_stat}
        </div>"##,
        orders_stat = stats_card("Orders", &count_or_dash(orders), "receipt", "blue"),
        products_stat = stats_card("Products", &count_or_dash(products), "store", "green"),
        users_stat = stats_card("Users", &count_or_dash(users), "users", "purple"),
        pending_stat = stats_card("Pending Orders", &pending, "clock", "yellow"),
    );

    let recent = match orders {
        Ok(orders) if orders.is_empty() => {
            empty_state("receipt", "No orders yet", "New orders will show up here.", None)
        }
        Ok(orders) => {
            let mut recent: Vec<Order> = orders.clone();
            recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            recent.truncate(5);
            orders_table(&recent)
        }
        Err(message) => load_failed(message),
    };

    let greeting = ctx
        .user
        .as_ref()
        .map(|u| format!("Welcome back, {}", escape(&u.name)))
        .unwrap_or_else(|| "Welcome back".to_string());

    let content = format!(
        r##"{header}
        {stats}
        {recent}"##,
        header = page_header(&greeting, "Here is what is happening in the store today.", None),
        recent = card("Recent Orders", &recent),
    );

    layout("Dashboard", ctx, &content)
}

// =============================================================================
// Users Page
// =============================================================================

pub fn users_page(ctx: &PageContext, users: &Loaded<Vec<User>>) -> String {
    let body = match users {
        Ok(users) if users.is_empty() => {
            empty_state("users", "No users", "No accounts have been created yet.", None)
        }
        Ok(users) => {
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        escape(&u.name),
                        escape(&u.email),
                        badge(&u.role, "primary"),
                        escape(&u.phone),
                    ]
                })
                .collect();
            table(&["Name", "Email", "Role", "Phone"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Users", "Everyone with an account in the store.", None),
        card("All Users", &body),
    );
    layout("Users", ctx, &content)
}

// =============================================================================
// Orders Page
// =============================================================================

/// Orders list with one tab per status. `None` selects the "All" tab.
pub fn orders_page(ctx: &PageContext, orders: &Loaded<Vec<Order>>, status: Option<OrderStatus>) -> String {
    let mut tab_links: Vec<(&str, String)> = vec![("All", "/orders".to_string())];
    let labels: Vec<(OrderStatus, String)> = OrderStatus::ALL
        .iter()
        .map(|s| (*s, s.to_string()))
        .collect();
    for (s, label) in &labels {
        tab_links.push((label.as_str(), format!("/orders?status={}", s.key())));
    }
    let selected = status.map(|s| s.to_string()).unwrap_or_else(|| "All".to_string());

    let body = match orders {
        Ok(orders) => {
            let shown: Vec<Order> = orders
                .iter()
                .filter(|o| status.is_none_or(|s| o.status == s))
                .cloned()
                .collect();
            if shown.is_empty() {
                empty_state("receipt", "No orders", "No orders match this status.", None)
            } else {
                orders_table(&shown)
            }
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        r##"{header}
        {tabs}
        {body}"##,
        header = page_header("Orders", "Track fulfilment across every order.", None),
        tabs = link_tabs(&tab_links, &selected),
        body = card("Orders", &body),
    );
    layout("Orders", ctx, &content)
}

// =============================================================================
// Settings Page
// =============================================================================

/// Settings with Profile and Account tabs.
pub fn settings_page(ctx: &PageContext, form: &ProfileForm, errors: &ValidationErrors) -> String {
    let profile_form = format!(
        r##"{summary}
        <form method="POST" action="/settings/profile" class="space-y-5 max-w-xl">
            {name}
            {email}
            {phone}
            {avatar}
            <div class="pt-2">{submit}</div>
        </form>"##,
        summary = form_errors(errors, &["name", "email", "phone", "avatar"]),
        name = form_field("name", "Full name", "text", form.name.as_deref().unwrap_or_default(), "Jane Doe", errors),
        email = form_field("email", "Email", "email", form.email.as_deref().unwrap_or_default(), "jane@example.com", errors),
        phone = form_field("phone", "Phone", "tel", form.phone.as_deref().unwrap_or_default(), "+1 555 0100", errors),
        avatar = form_field("avatar", "Avatar URL", "url", form.avatar.as_deref().unwrap_or_default(), "https://", errors),
        submit = submit_button("Save profile"),
    );

    let account = match &ctx.user {
        Some(user) => format!(
            r##"<dl class="grid grid-cols-1 md:grid-cols-2 gap-4 text-sm">
                <div><dt class="text-gray-500 dark:text-gray-400">User ID</dt><dd class="font-mono text-gray-900 dark:text-white">{id}</dd></div>
                <div><dt class="text-gray-500 dark:text-gray-400">Role</dt><dd>{role}</dd></div>
                <div><dt class="text-gray-500 dark:text-gray-400">Email</dt><dd class="text-gray-900 dark:text-white">{email}</dd></div>
            </dl>
            <a href="/logout" class="mt-6 inline-flex items-center gap-2 bg-red-600 hover:bg-red-700 text-white px-4 py-2 rounded-lg font-medium transition-colors">
                <i class="fas fa-sign-out-alt"></i> Sign out
            </a>"##,
            id = escape(&user.id),
            role = badge(&user.role, "primary"),
            email = escape(&user.email),
        ),
        None => load_failed("Your account details are unavailable right now."),
    };

    let content = format!(
        "{}{}",
        page_header("Settings", "Manage your profile and account.", None),
        card(
            "Settings",
            &tabs("settings-tabs", &[
                ("profile", "Profile", profile_form.as_str()),
                ("account", "Account", account.as_str()),
            ]),
        ),
    );
    layout("Settings", ctx, &content)
}

// =============================================================================
// Logistics Pages
// =============================================================================

pub fn shipping_zones_page(ctx: &PageContext, zones: &Loaded<Vec<ShippingZone>>) -> String {
    let body = match zones {
        Ok(zones) if zones.is_empty() => {
            empty_state("truck", "No shipping zones", "Shipping zones are managed in the store API.", None)
        }
        Ok(zones) => {
            let rows: Vec<Vec<String>> = zones
                .iter()
                .map(|z| vec![escape(&z.name), escape(&z.regions.join(", ")), escape(&z.rate)])
                .collect();
            table(&["Zone", "Regions", "Rate"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Shipping Zones", "Where the store ships and what it costs.", None),
        card("Zones", &body),
    );
    layout("Shipping Zones", ctx, &content)
}

pub fn locations_page(ctx: &PageContext, locations: &Loaded<Vec<Location>>) -> String {
    let body = match locations {
        Ok(locations) if locations.is_empty() => {
            empty_state("map-marker-alt", "No locations", "Warehouses and pickup points appear here.", None)
        }
        Ok(locations) => {
            let rows: Vec<Vec<String>> = locations
                .iter()
                .map(|l| vec![escape(&l.name), escape(&l.address), escape(&l.city)])
                .collect();
            table(&["Name", "Address", "City"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Locations", "Warehouses and pickup points.", None),
        card("Locations", &body),
    );
    layout("Locations", ctx, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            item: format!("Item {id}"),
            order_ref: format!("REF-{id}"),
            status,
            created_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_orders_tab_filters_by_status() {
        let orders = Ok(vec![
            order("1", OrderStatus::Pending),
            order("2", OrderStatus::Delivered),
        ]);
        let html = orders_page(&PageContext::new("/orders"), &orders, Some(OrderStatus::Delivered));
        assert!(html.contains("REF-2"));
        assert!(!html.contains("REF-1"));

        let all = orders_page(&PageContext::new("/orders"), &orders, None);
        assert!(all.contains("REF-1") && all.contains("REF-2"));
    }

    #[test]
    fn test_load_failure_renders_message() {
        let html = users_page(&PageContext::new("/users"), &Err("API returned 500".into()));
        assert!(html.contains("Could not load data"));
        assert!(html.contains("API returned 500"));
    }

    #[test]
    fn test_home_counts_pending_orders() {
        let orders = Ok(vec![
            order("1", OrderStatus::Pending),
            order("2", OrderStatus::Pending),
            order("3", OrderStatus::InTransit),
        ]);
        let products: Loaded<Vec<()>> = Err("down".into());
        let users: Loaded<Vec<User>> = Ok(vec![User::default()]);
        let html = home_page(&PageContext::new("/"), &orders, &products, &users);
        assert!(html.contains(r#"mt-1">2</p>"#));
        assert!(html.contains(r#"mt-1">-</p>"#));
    }

    #[test]
    fn test_settings_renders_field_errors() {
        let errors = ValidationErrors::new(vec![backstage_schema::FieldError::new(
            "email",
            backstage_schema::FieldErrorKind::PatternMismatch,
            "Enter a valid email address",
        )]);
        let form = ProfileForm {
            email: Some("nope".into()),
            ..Default::default()
        };
        let html = settings_page(&PageContext::new("/settings"), &form, &errors);
        assert!(html.contains("Enter a valid email address"));
        assert!(html.contains(r#"value="nope""#));
    }
}
