//! Toast notifications.
//!
//! Handlers report outcomes through a [`Notifier`]. The dashboard's notifier
//! queues them per session; the next rendered page drains the queue into its
//! toast area.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Pending notifications for every session.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    queues: Arc<Mutex<HashMap<String, Vec<Notification>>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, token: &str, notification: Notification) {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(token.to_string())
            .or_default()
            .push(notification);
    }

    /// Take every pending notification for `token`.
    pub fn drain(&self, token: &str) -> Vec<Notification> {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .unwrap_or_default()
    }

    /// Notifier that queues for `token`.
    pub fn notifier(&self, token: &str) -> FlashNotifier {
        FlashNotifier {
            board: self.clone(),
            token: token.to_string(),
        }
    }
}

/// Queues notifications on a [`NoticeBoard`] for one session.
#[derive(Debug, Clone)]
pub struct FlashNotifier {
    board: NoticeBoard,
    token: String,
}

impl Notifier for FlashNotifier {
    fn notify(&self, notification: Notification) {
        self.board.push(&self.token, notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let board = NoticeBoard::new();
        let notifier = board.notifier("t1");
        notifier.notify(Notification::success("saved"));
        notifier.notify(Notification::error("oops"));

        let drained = board.drain("t1");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, Level::Success);
        assert!(board.drain("t1").is_empty());
    }

    #[test]
    fn test_queues_are_per_session() {
        let board = NoticeBoard::new();
        board.notifier("t1").notify(Notification::success("one"));

        assert!(board.drain("t2").is_empty());
        assert_eq!(board.drain("t1"), vec![Notification::success("one")]);
    }
}
