//! `backstage routes` command implementation.

use backstage_core::Route;

#[derive(Debug, PartialEq, Eq)]
pub struct RouteRow {
    pub path: &'static str,
    pub label: &'static str,
    pub group: &'static str,
    /// Login is the only page reachable without a session.
    pub public: bool,
    pub in_sidebar: bool,
}

pub fn rows() -> Vec<RouteRow> {
    Route::ALL
        .iter()
        .map(|route| RouteRow {
            path: route.path(),
            label: route.label(),
            group: route.group().label(),
            public: *route == Route::Login,
            in_sidebar: Route::SIDEBAR.contains(route),
        })
        .collect()
}

pub fn run() {
    println!("{:<24} {:<18} {:<10} {:<10} SIDEBAR", "PATH", "LABEL", "GROUP", "ACCESS");
    println!("{}", "─".repeat(72));
    for row in rows() {
        println!(
            "{:<24} {:<18} {:<10} {:<10} {}",
            row.path,
            row.label,
            row.group,
            if row.public { "public" } else { "session" },
            if row.in_sidebar { "yes" } else { "no" },
        );
    }
}
