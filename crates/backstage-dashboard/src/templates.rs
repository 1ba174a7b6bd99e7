//! HTML templates for the dashboard.
//!
//! Plain `format!` templates styled with Tailwind CSS, with HTMX and Alpine.js
//! for interactivity. Every helper returns a `String` fragment; pages compose
//! them and [`layout`] wraps the result.

use crate::notify::{Level, Notification};
use crate::state::PageContext;
use axum::http::StatusCode;
use backstage_core::{Route, RouteGroup, User, is_active};
use backstage_schema::ValidationErrors;

/// Base HTML layout wrapper.
pub fn layout(title: &str, ctx: &PageContext, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en" x-data="{{
    darkMode: localStorage.getItem('darkMode') === 'true',
    sidebarOpen: true
}}" :class="{{ 'dark': darkMode }}">
<head>
    {HEAD}
    <title>{title} - Backstage</title>
</head>
<body class="bg-gray-50 dark:bg-gray-900 min-h-screen">
    {NAV}

    <div class="flex">
        {SIDEBAR}

        <main class="flex-1 p-6 lg:p-8">
            <div class="max-w-7xl mx-auto">
                {content}
            </div>
        </main>
    </div>

    {TOASTS}

    <script>
        document.body.addEventListener('htmx:afterSwap', function(evt) {{
            if (typeof Alpine !== 'undefined') {{
                Alpine.initTree(evt.detail.target);
            }}
        }});
    </script>
</body>
</html>"##,
        title = escape(title),
        HEAD = head_assets(),
        NAV = nav_template(ctx.user.as_ref()),
        SIDEBAR = sidebar_template(&ctx.path),
        TOASTS = toasts(&ctx.notices),
    )
}

/// Shared `<head>` assets: Tailwind, HTMX, Alpine and Font Awesome.
pub fn head_assets() -> &'static str {
    r##"<meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="https://cdn.tailwindcss.com"></script>
    <script>
        tailwind.config = {
            darkMode: 'class',
            theme: {
                extend: {
                    colors: {
                        primary: {
                            50: '#fdf4ff',
                            100: '#fae8ff',
                            200: '#f5d0fe',
                            300: '#f0abfc',
                            400: '#e879f9',
                            500: '#d946ef',
                            600: '#c026d3',
                            700: '#a21caf',
                            800: '#86198f',
                            900: '#701a75',
                        }
                    }
                }
            }
        }
    </script>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script defer src="https://unpkg.com/alpinejs@3.x.x/dist/cdn.min.js"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <style>
        [x-cloak] { display: none !important; }
        .htmx-indicator { display: none; }
        .htmx-request .htmx-indicator { display: inline-block; }
        .htmx-request.htmx-indicator { display: inline-block; }
    </style>"##
}

fn nav_template(user: Option<&User>) -> String {
    let user_chip = match user {
        Some(user) => {
            let avatar = match &user.avatar {
                Some(src) => format!(
                    r#"<img src="{}" alt="" class="w-8 h-8 rounded-full object-cover">"#,
                    escape(src)
                ),
                None => format!(
                    r#"<span class="w-8 h-8 rounded-full bg-primary-500 flex items-center justify-center text-xs font-semibold">{}</span>"#,
                    escape(&user.initials())
                ),
            };
            format!(
                r##"<a href="/settings" class="flex items-center gap-2 text-sm hover:bg-primary-700 rounded-lg px-2 py-1">
                    {avatar}
                    <span class="hidden md:inline">{name}</span>
                </a>"##,
                name = escape(&user.name),
            )
        }
        None => String::new(),
    };

    format!(
        r##"<nav class="bg-primary-600 dark:bg-primary-900 text-white px-4 py-3 sticky top-0 z-50 shadow-lg">
        <div class="flex items-center justify-between">
            <div class="flex items-center gap-4">
                <button @click="sidebarOpen = !sidebarOpen" class="p-2 hover:bg-primary-700 rounded-lg lg:hidden">
                    <i class="fas fa-bars"></i>
                </button>
                <a href="/" class="flex items-center gap-2 font-semibold">
                    <i class="fas fa-theater-masks"></i>
                    <span>Backstage</span>
                </a>
            </div>
            <div class="flex items-center gap-4">
                {user_chip}
                <button @click="darkMode = !darkMode; localStorage.setItem('darkMode', darkMode)"
                        class="p-2 hover:bg-primary-700 rounded-lg">
                    <i class="fas" :class="darkMode ? 'fa-sun' : 'fa-moon'"></i>
                </button>
                <a href="/logout" class="p-2 hover:bg-primary-700 rounded-lg" title="Sign out">
                    <i class="fas fa-sign-out-alt"></i>
                </a>
            </div>
        </div>
    </nav>"##
    )
}

fn sidebar_template(current_path: &str) -> String {
    let mut links = String::new();
    let mut group: Option<RouteGroup> = None;

    for route in Route::SIDEBAR {
        if group != Some(route.group()) {
            group = Some(route.group());
            if route.group() != RouteGroup::Overview {
                links.push_str(&format!(
                    r#"<div class="pt-4 pb-2 px-4 text-xs font-semibold text-gray-400 dark:text-gray-500 uppercase tracking-wider">{}</div>"#,
                    route.group().label()
                ));
            }
        }
        links.push_str(&sidebar_link(route, current_path));
    }

    format!(
        r##"<aside class="w-64 bg-white dark:bg-gray-800 border-r border-gray-200 dark:border-gray-700 min-h-[calc(100vh-56px)] transition-all duration-300"
              :class="{{ '-ml-64': !sidebarOpen }}"
              x-cloak>
            <nav class="p-4 space-y-1">
                {links}
            </nav>
        </aside>"##
    )
}

fn sidebar_link(route: Route, current_path: &str) -> String {
    let state = if is_active(current_path, route.path()) {
        "bg-primary-50 dark:bg-primary-900/50 text-primary-600 dark:text-primary-400"
    } else {
        "text-gray-700 dark:text-gray-200"
    };
    format!(
        r##"<a href="{path}" class="flex items-center gap-3 px-4 py-2.5 {state} hover:bg-primary-50 dark:hover:bg-primary-900/50 rounded-lg transition-colors">
                    <i class="fas fa-{icon} w-5"></i>
                    <span>{label}</span>
                </a>"##,
        path = route.path(),
        icon = route.icon(),
        label = route.label(),
    )
}

/// Toast stack for queued notifications. Each toast hides itself.
pub fn toasts(notices: &[Notification]) -> String {
    let items: String = notices
        .iter()
        .map(|n| {
            let (bg, icon) = match n.level {
                Level::Success => ("bg-green-500", "check-circle"),
                Level::Error => ("bg-red-500", "exclamation-circle"),
            };
            format!(
                r##"<div x-data="{{ show: true }}" x-show="show" x-init="setTimeout(() => show = false, 4000)" x-transition
                     class="toast {bg} text-white px-6 py-3 rounded-lg shadow-lg flex items-center gap-3">
                    <i class="fas fa-{icon}"></i>
                    <span>{message}</span>
                </div>"##,
                message = escape(&n.message),
            )
        })
        .collect();

    format!(r##"<div id="toasts" class="fixed bottom-4 right-4 z-50 space-y-2">{items}</div>"##)
}

/// Page heading with an optional action link.
pub fn page_header(title: &str, subtitle: &str, action: Option<(&str, &str)>) -> String {
    let action_html = action.map_or(String::new(), |(text, href)| {
        format!(
            r##"<a href="{href}" class="inline-flex items-center gap-2 bg-primary-600 hover:bg-primary-700 text-white px-4 py-2 rounded-lg font-medium transition-colors">
            <i class="fas fa-plus"></i> {text}
        </a>"##
        )
    });
    format!(
        r##"<div class="flex items-center justify-between mb-8">
            <div>
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{title}</h1>
                <p class="text-gray-500 dark:text-gray-400 mt-1">{subtitle}</p>
            </div>
            {action_html}
        </div>"##
    )
}

/// Card component.
pub fn card(title: &str, content: &str) -> String {
    format!(
        r##"<div class="bg-white dark:bg-gray-800 rounded-xl shadow-sm border border-gray-200 dark:border-gray-700 overflow-hidden">
            <div class="px-6 py-4 border-b border-gray-200 dark:border-gray-700">
                <h3 class="text-lg font-semibold text-gray-900 dark:text-white">{title}</h3>
            </div>
            <div class="p-6">
                {content}
            </div>
        </div>"##
    )
}

/// Stats card component.
pub fn stats_card(title: &str, value: &str, icon: &str, color: &str) -> String {
    format!(
        r##"<div class="bg-white dark:bg-gray-800 rounded-xl shadow-sm border border-gray-200 dark:border-gray-700 p-6">
            <div class="flex items-center justify-between">
                <div>
                    <p class="text-sm text-gray-500 dark:text-gray-400">{title}</p>
                    <p class="text-2xl font-bold text-gray-900 dark:text-white mt-1">{value}</p>
                </div>
                <div class="w-12 h-12 rounded-full bg-{color}-100 dark:bg-{color}-900/30 flex items-center justify-center">
                    <i class="fas fa-{icon} text-{color}-500 text-xl"></i>
                </div>
            </div>
        </div>"##
    )
}

/// Badge component.
pub fn badge(text: &str, color: &str) -> String {
    format!(
        r##"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-{color}-100 dark:bg-{color}-900/30 text-{color}-800 dark:text-{color}-300">{text}</span>"##,
        text = escape(text),
    )
}

/// Table component. Cells are inserted as-is; escape user data first.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let headers_html: String = headers
        .iter()
        .map(|h| format!(r#"<th class="px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider">{h}</th>"#))
        .collect();

    let rows_html: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!(r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900 dark:text-gray-100">{cell}</td>"#))
                .collect();
            format!(r#"<tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50">{cells}</tr>"#)
        })
        .collect();

    format!(
        r##"<div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-800">
                    <tr>{headers_html}</tr>
                </thead>
                <tbody class="bg-white dark:bg-gray-900 divide-y divide-gray-200 dark:divide-gray-700">
                    {rows_html}
                </tbody>
            </table>
        </div>"##
    )
}

/// Client-side tab container (Alpine).
pub fn tabs(id: &str, tabs: &[(&str, &str, &str)]) -> String {
    let tab_buttons: String = tabs
        .iter()
        .map(|(key, label, _)| {
            format!(
                r##"<button type="button" @click="activeTab = '{key}'"
                        :class="{{ 'border-primary-600 text-primary-600 dark:text-primary-400': activeTab === '{key}', 'border-transparent text-gray-500 hover:text-gray-700 hover:border-gray-300': activeTab !== '{key}' }}"
                        class="px-4 py-2 border-b-2 font-medium text-sm transition-colors">
                    {label}
                </button>"##
            )
        })
        .collect();

    let tab_contents: String = tabs
        .iter()
        .map(|(key, _, content)| {
            format!(
                r##"<div x-show="activeTab === '{key}'" x-transition>
                    {content}
                </div>"##
            )
        })
        .collect();

    let first_key = tabs.first().map(|(k, _, _)| *k).unwrap_or("default");

    format!(
        r##"<div x-data="{{ activeTab: '{first_key}' }}" id="{id}">
            <div class="border-b border-gray-200 dark:border-gray-700 mb-4">
                <nav class="flex gap-2">
                    {tab_buttons}
                </nav>
            </div>
            <div>
                {tab_contents}
            </div>
        </div>"##
    )
}

/// Server-side tab strip: each tab is a link, `selected` is highlighted.
pub fn link_tabs(tabs: &[(&str, String)], selected: &str) -> String {
    let links: String = tabs
        .iter()
        .map(|(label, href)| {
            let class = if *label == selected {
                "border-primary-600 text-primary-600 dark:text-primary-400"
            } else {
                "border-transparent text-gray-500 hover:text-gray-700 hover:border-gray-300"
            };
            format!(
                r##"<a href="{href}" class="px-4 py-2 border-b-2 font-medium text-sm transition-colors {class}">{label}</a>"##
            )
        })
        .collect();

    format!(
        r##"<div class="border-b border-gray-200 dark:border-gray-700 mb-4">
            <nav class="flex gap-2">{links}</nav>
        </div>"##
    )
}

/// Input field with its validation message, if any.
pub fn form_field(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    placeholder: &str,
    errors: &ValidationErrors,
) -> String {
    let (border, message) = field_error(name, errors);
    format!(
        r##"<div class="space-y-1">
            <label for="{name}" class="block text-sm font-medium text-gray-700 dark:text-gray-300">{label}</label>
            <input type="{input_type}" name="{name}" id="{name}" value="{value}" placeholder="{placeholder}"
                   class="w-full px-4 py-2 border {border} rounded-lg bg-white dark:bg-gray-800 text-gray-900 dark:text-white focus:ring-2 focus:ring-primary-500 focus:border-primary-500">
            {message}
        </div>"##,
        value = escape(value),
    )
}

/// Textarea with its validation message, if any.
pub fn form_textarea(name: &str, label: &str, value: &str, errors: &ValidationErrors) -> String {
    let (border, message) = field_error(name, errors);
    format!(
        r##"<div class="space-y-1">
            <label for="{name}" class="block text-sm font-medium text-gray-700 dark:text-gray-300">{label}</label>
            <textarea name="{name}" id="{name}" rows="4"
                      class="w-full px-4 py-2 border {border} rounded-lg bg-white dark:bg-gray-800 text-gray-900 dark:text-white focus:ring-2 focus:ring-primary-500 focus:border-primary-500">{value}</textarea>
            {message}
        </div>"##,
        value = escape(value),
    )
}

/// Checkbox input.
pub fn form_checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r##"<label class="flex items-center gap-2 text-sm text-gray-700 dark:text-gray-300">
            <input type="checkbox" name="{name}" value="true" class="rounded border-gray-300 text-primary-600 focus:ring-primary-500"{checked}>
            {label}
        </label>"##
    )
}

fn field_error(name: &str, errors: &ValidationErrors) -> (&'static str, String) {
    match errors.for_field(name) {
        Some(error) => (
            "border-red-500",
            format!(
                r#"<p class="text-sm text-red-600 dark:text-red-400">{}</p>"#,
                escape(&error.message)
            ),
        ),
        None => ("border-gray-300 dark:border-gray-600", String::new()),
    }
}

/// Errors not tied to a rendered input (refinements, nested items).
pub fn form_errors(errors: &ValidationErrors, rendered: &[&str]) -> String {
    let items: String = errors
        .iter()
        .filter(|e| !rendered.contains(&e.field.as_str()))
        .map(|e| format!("<li>{}</li>", escape(&e.message)))
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!(
        r##"<div class="mb-6 p-4 bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-lg">
            <ul class="list-disc list-inside text-sm text-red-700 dark:text-red-400">{items}</ul>
        </div>"##
    )
}

/// Submit button with an HTMX indicator.
pub fn submit_button(text: &str) -> String {
    format!(
        r##"<button type="submit" class="bg-primary-600 hover:bg-primary-700 text-white px-4 py-2 rounded-lg font-medium transition-colors disabled:opacity-50">
            <i class="fas fa-spinner fa-spin htmx-indicator"></i> {text}
        </button>"##
    )
}

/// Empty state component.
pub fn empty_state(icon: &str, title: &str, description: &str, action: Option<(&str, &str)>) -> String {
    let action_html = action.map_or(String::new(), |(text, href)| {
        format!(r##"<a href="{href}" class="mt-4 inline-flex items-center gap-2 bg-primary-600 hover:bg-primary-700 text-white px-4 py-2 rounded-lg font-medium transition-colors">
            <i class="fas fa-plus"></i> {text}
        </a>"##)
    });

    format!(
        r##"<div class="text-center py-12">
            <i class="fas fa-{icon} text-4xl text-gray-400 dark:text-gray-600 mb-4"></i>
            <h3 class="text-lg font-medium text-gray-900 dark:text-white">{title}</h3>
            <p class="mt-1 text-gray-500 dark:text-gray-400">{description}</p>
            {action_html}
        </div>"##,
        description = escape(description),
    )
}

/// Loading spinner.
pub fn spinner() -> &'static str {
    r##"<div class="flex items-center justify-center py-8">
        <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-primary-600"></div>
    </div>"##
}

/// Neutral page shown while the browser follows a redirect.
pub fn loading_placeholder() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    {HEAD}
    <title>Loading - Backstage</title>
</head>
<body class="bg-gray-50 dark:bg-gray-900 min-h-screen flex items-center justify-center">
    {SPINNER}
</body>
</html>"##,
        HEAD = head_assets(),
        SPINNER = spinner(),
    )
}

/// Standalone error page.
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    {HEAD}
    <title>{code} - Backstage</title>
</head>
<body class="bg-gray-50 dark:bg-gray-900 min-h-screen flex items-center justify-center p-4">
    <div class="bg-white dark:bg-gray-800 rounded-2xl shadow-xl p-8 max-w-md text-center">
        <i class="fas fa-exclamation-triangle text-4xl text-yellow-500 mb-4"></i>
        <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{code} {reason}</h1>
        <p class="mt-2 text-gray-500 dark:text-gray-400">{message}</p>
        <a href="/" class="mt-6 inline-flex items-center gap-2 text-primary-600 hover:text-primary-700">
            <i class="fas fa-arrow-left"></i> Back to dashboard
        </a>
    </div>
</body>
</html>"##,
        HEAD = head_assets(),
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or(""),
        message = escape(message),
    )
}

/// Escape text for HTML content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
