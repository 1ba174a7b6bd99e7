//! Dashboard application state.

use crate::notify::{FlashNotifier, NoticeBoard, Notification};
use crate::session::SessionStore;
use backstage_client::{ApiClient, ClientError, StoreApi, UserApi};
use backstage_core::{DashboardConfig, User, UserPatch};
use std::sync::Arc;

/// Shared application state for the dashboard.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The dashboard section of the configuration.
    config: DashboardConfig,
    /// User endpoints of the storefront API.
    users: Arc<dyn UserApi>,
    /// Catalog, order and content endpoints of the storefront API.
    store: Arc<dyn StoreApi>,
    /// Cached profile per session token.
    sessions: SessionStore,
    /// Pending toasts per session token.
    notices: NoticeBoard,
}

/// Everything the layout needs besides the page body.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Path of the page being rendered, for sidebar highlighting.
    pub path: String,
    pub user: Option<User>,
    pub notices: Vec<Notification>,
}

impl PageContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl AppState {
    /// Create state over explicit API implementations.
    pub fn new(config: DashboardConfig, users: Arc<dyn UserApi>, store: Arc<dyn StoreApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                store,
                sessions: SessionStore::new(),
                notices: NoticeBoard::new(),
            }),
        }
    }

    /// Create state backed by one HTTP client for every endpoint.
    pub fn from_client(config: DashboardConfig, client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self::new(config, client.clone(), client)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn users(&self) -> &dyn UserApi {
        self.inner.users.as_ref()
    }

    pub fn store(&self) -> &dyn StoreApi {
        self.inner.store.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.inner.notices
    }

    /// Notifier queuing toasts for the session `token`.
    pub fn notifier(&self, token: &str) -> FlashNotifier {
        self.inner.notices.notifier(token)
    }

    /// Drop the cached profile and pending toasts for `token`.
    pub fn end_session(&self, token: &str) {
        self.inner.sessions.forget(token);
        self.inner.notices.drain(token);
    }

    /// End the session when the API no longer accepts `token`.
    ///
    /// Records are otherwise only removed on logout.
    pub fn expire_if_rejected(&self, token: &str, error: &ClientError) {
        if error.is_unauthorized() {
            tracing::info!("storefront API rejected session token, dropping cached session");
            self.end_session(token);
        }
    }

    /// Signed-in user for `token`.
    ///
    /// Served from the session cache; on a miss the profile is fetched from
    /// the API and merged in. A failed fetch yields `None`.
    pub async fn current_user(&self, token: &str) -> Option<User> {
        if let Some(user) = self.inner.sessions.get(token) {
            return Some(user);
        }
        match self.inner.users.current_user(token).await {
            Ok(user) => Some(self.inner.sessions.merge(token, &UserPatch::from(&user))),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load current user");
                self.expire_if_rejected(token, &e);
                None
            }
        }
    }

    /// Layout context for a page at `path`. Drains pending toasts.
    pub async fn page_context(&self, token: &str, path: &str) -> PageContext {
        PageContext {
            path: path.to_string(),
            user: self.current_user(token).await,
            notices: self.inner.notices.drain(token),
        }
    }
}
