//! Static route table for the dashboard.
//!
//! Every dashboard section has one fixed path. The sidebar is rendered from
//! [`Route::SIDEBAR`] and highlights entries with [`is_active`].

/// A dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Users,
    Settings,
    Orders,
    MusicManager,
    AddSingle,
    Shop,
    Coupons,
    ShippingZones,
    Locations,
    Blackbox,
    ContentManager,
    GameEditor,
    Countdown,
    Login,
}

/// Sidebar grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    Overview,
    Commerce,
    Media,
    Logistics,
    Blackbox,
    Account,
}

impl RouteGroup {
    pub fn label(&self) -> &'static str {
        match self {
            RouteGroup::Overview => "Overview",
            RouteGroup::Commerce => "Commerce",
            RouteGroup::Media => "Media",
            RouteGroup::Logistics => "Logistics",
            RouteGroup::Blackbox => "Blackbox",
            RouteGroup::Account => "Account",
        }
    }
}

impl Route {
    /// Every route, in declaration order.
    pub const ALL: [Route; 15] = [
        Route::Home,
        Route::Users,
        Route::Settings,
        Route::Orders,
        Route::MusicManager,
        Route::AddSingle,
        Route::Shop,
        Route::Coupons,
        Route::ShippingZones,
        Route::Locations,
        Route::Blackbox,
        Route::ContentManager,
        Route::GameEditor,
        Route::Countdown,
        Route::Login,
    ];

    /// Routes shown in the sidebar, in display order.
    pub const SIDEBAR: [Route; 13] = [
        Route::Home,
        Route::Orders,
        Route::Shop,
        Route::Coupons,
        Route::MusicManager,
        Route::ShippingZones,
        Route::Locations,
        Route::Blackbox,
        Route::ContentManager,
        Route::GameEditor,
        Route::Countdown,
        Route::Users,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Users => "/users",
            Route::Settings => "/settings",
            Route::Orders => "/orders",
            Route::MusicManager => "/music",
            Route::AddSingle => "/music/add-single",
            Route::Shop => "/shop",
            Route::Coupons => "/coupons",
            Route::ShippingZones => "/shipping-zones",
            Route::Locations => "/locations",
            Route::Blackbox => "/blackbox",
            Route::ContentManager => "/blackbox/content",
            Route::GameEditor => "/blackbox/game-editor",
            Route::Countdown => "/blackbox/countdown",
            Route::Login => "/login",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::Users => "Users",
            Route::Settings => "Settings",
            Route::Orders => "Orders",
            Route::MusicManager => "Music Manager",
            Route::AddSingle => "Add Single",
            Route::Shop => "Shop",
            Route::Coupons => "Coupons",
            Route::ShippingZones => "Shipping Zones",
            Route::Locations => "Locations",
            Route::Blackbox => "Blackbox",
            Route::ContentManager => "Content Manager",
            Route::GameEditor => "Game Editor",
            Route::Countdown => "Countdown",
            Route::Login => "Login",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Users => "users",
            Route::Settings => "cog",
            Route::Orders => "receipt",
            Route::MusicManager => "music",
            Route::AddSingle => "compact-disc",
            Route::Shop => "store",
            Route::Coupons => "ticket-alt",
            Route::ShippingZones => "truck",
            Route::Locations => "map-marker-alt",
            Route::Blackbox => "cube",
            Route::ContentManager => "folder-open",
            Route::GameEditor => "puzzle-piece",
            Route::Countdown => "hourglass-half",
            Route::Login => "sign-in-alt",
        }
    }

    pub fn group(&self) -> RouteGroup {
        match self {
            Route::Home => RouteGroup::Overview,
            Route::Orders | Route::Shop | Route::Coupons => RouteGroup::Commerce,
            Route::MusicManager | Route::AddSingle => RouteGroup::Media,
            Route::ShippingZones | Route::Locations => RouteGroup::Logistics,
            Route::Blackbox | Route::ContentManager | Route::GameEditor | Route::Countdown => {
                RouteGroup::Blackbox
            }
            Route::Users | Route::Settings | Route::Login => RouteGroup::Account,
        }
    }

    /// Look a route up by its exact path.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// True when this route should be highlighted for `current_path`.
    pub fn is_active_for(&self, current_path: &str) -> bool {
        is_active(current_path, self.path())
    }
}

/// Whether `route_path` is the active section for `current_path`.
///
/// The root path only matches itself. Any other route matches itself and
/// every path nested below it (`/shop` matches `/shop/123` but not
/// `/shopping`).
pub fn is_active(current_path: &str, route_path: &str) -> bool {
    if route_path == "/" {
        return current_path == "/";
    }
    let route_path = route_path.trim_end_matches('/');
    match current_path.strip_prefix(route_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nested_path_is_active() {
        assert!(is_active("/shop/123", "/shop"));
        assert!(is_active("/shop", "/shop"));
    }

    #[test]
    fn test_other_section_is_inactive() {
        assert!(!is_active("/orders", "/shop"));
        assert!(!is_active("/shopping", "/shop"));
    }

    #[test]
    fn test_root_matches_only_itself() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/orders", "/"));
    }

    #[test]
    fn test_blackbox_children_activate_parent() {
        assert!(Route::Blackbox.is_active_for("/blackbox/countdown"));
        assert!(Route::Countdown.is_active_for("/blackbox/countdown"));
        assert!(!Route::GameEditor.is_active_for("/blackbox/countdown"));
    }

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Route::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), Route::ALL.len());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/music/add-single"), Some(Route::AddSingle));
        assert_eq!(Route::from_path("/nope"), None);
    }
}
