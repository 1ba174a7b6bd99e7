//! Profile update flow for the signed-in user.

use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;
use backstage_client::{ClientError, UserApi};
use backstage_core::{User, UserPatch};

/// Toast shown after a successful update.
pub const UPDATE_SUCCEEDED: &str = "Profile updated successfully";

/// Toast shown when a failed update carries no message.
pub const UPDATE_FAILED: &str = "Failed to update user";

/// Send `patch` for `user_id` and fold the response into the session cache.
///
/// On success the API's (possibly partial) response is merged into the
/// cached record for `token` and one success notification is emitted. On
/// failure one error notification is emitted and the cache is untouched.
pub async fn update_profile(
    api: &dyn UserApi,
    store: &SessionStore,
    notifier: &dyn Notifier,
    token: &str,
    user_id: &str,
    patch: &UserPatch,
) -> Result<User, ClientError> {
    match api.update_user(token, user_id, patch).await {
        Ok(updated) => {
            let user = store.merge(token, &updated);
            tracing::info!(user_id = %user_id, "profile updated");
            notifier.notify(Notification::success(UPDATE_SUCCEEDED));
            Ok(user)
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "profile update failed");
            let message = e.user_message().unwrap_or_else(|| UPDATE_FAILED.to_string());
            notifier.notify(Notification::error(message));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Level;
    use async_trait::async_trait;
    use backstage_core::LoginResponse;
    use std::sync::Mutex;

    /// Answers `update_user` with a canned result.
    struct FakeUsers {
        response: Mutex<Option<Result<UserPatch, ClientError>>>,
    }

    impl FakeUsers {
        fn returning(result: Result<UserPatch, ClientError>) -> Self {
            Self {
                response: Mutex::new(Some(result)),
            }
        }
    }

    #[async_trait]
    impl UserApi for FakeUsers {
        async fn login(&self, _: &str, _: &str) -> Result<LoginResponse, ClientError> {
            unimplemented!()
        }

        async fn current_user(&self, _: &str) -> Result<User, ClientError> {
            unimplemented!()
        }

        async fn list_users(&self, _: &str) -> Result<Vec<User>, ClientError> {
            unimplemented!()
        }

        async fn update_user(&self, _: &str, _: &str, _: &UserPatch) -> Result<UserPatch, ClientError> {
            self.response.lock().unwrap().take().expect("update_user called once")
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notification>>);

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn seeded_store() -> SessionStore {
        let store = SessionStore::new();
        store.merge(
            "tok",
            &UserPatch {
                id: Some("u1".into()),
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
                role: Some("admin".into()),
                phone: Some("555-0100".into()),
                avatar: None,
            },
        );
        store
    }

    #[tokio::test]
    async fn test_success_merges_partial_response() {
        let store = seeded_store();
        let recorder = Recorder::default();
        let api = FakeUsers::returning(Ok(UserPatch {
            phone: Some("555-0199".into()),
            ..Default::default()
        }));

        let patch = UserPatch {
            phone: Some("555-0199".into()),
            ..Default::default()
        };
        let user = update_profile(&api, &store, &recorder, "tok", "u1", &patch)
            .await
            .unwrap();

        assert_eq!(user.phone, "555-0199");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(store.get("tok"), Some(user));

        let notes = recorder.0.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], Notification::success(UPDATE_SUCCEEDED));
    }

    #[tokio::test]
    async fn test_failure_with_message_leaves_cache_alone() {
        let store = seeded_store();
        let before = store.get("tok");
        let recorder = Recorder::default();
        let api = FakeUsers::returning(Err(ClientError::from_response(
            422,
            r#"{"message":"Email already taken"}"#,
        )));

        let patch = UserPatch {
            email: Some("taken@example.com".into()),
            ..Default::default()
        };
        let result = update_profile(&api, &store, &recorder, "tok", "u1", &patch).await;

        assert!(result.is_err());
        assert_eq!(store.get("tok"), before);
        let notes = recorder.0.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, Level::Error);
        assert_eq!(notes[0].message, "Email already taken");
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let store = seeded_store();
        let before = store.get("tok");
        let recorder = Recorder::default();
        let api = FakeUsers::returning(Err(ClientError::from_response(500, "")));

        let result =
            update_profile(&api, &store, &recorder, "tok", "u1", &UserPatch::default()).await;

        assert!(result.is_err());
        assert_eq!(store.get("tok"), before);
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![Notification::error(UPDATE_FAILED)]
        );
    }
}
