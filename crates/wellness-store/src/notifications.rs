use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use wellness_types::events::SliceName;
use wellness_types::models::{Notification, Severity};

use crate::scope::ViewScope;
use crate::slice::Settled;
use crate::store::Store;

/// Lifetime of toasts raised through [`Store::notify`].
pub const DEFAULT_AUTO_DISMISS_MS: u64 = 5000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    /// Oldest first.
    pub items: Vec<Notification>,
}

impl Store {
    /// Load the notifications stored for a user, replacing the live list.
    pub async fn fetch_notifications(&self, scope: &ViewScope, user_id: Uuid) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.notifications,
            SliceName::Notifications,
            "fetch",
            scope,
            async move { api.notifications(user_id).await },
            |state: &mut NotificationsState, items: Vec<Notification>| state.items = items,
        )
        .await
    }

    /// Show a notification. With an auto-dismiss duration a timer removes it
    /// again; the timer stops with the store.
    pub async fn push_notification(&self, notification: Notification) -> Uuid {
        let id = notification.id;
        let auto_dismiss = notification.auto_dismiss_ms;

        self.update(&self.inner.notifications, SliceName::Notifications, "push", |slice| {
            slice.data.items.push(notification)
        })
        .await;

        if let Some(ms) = auto_dismiss {
            let store = self.clone();
            let shutdown = self.inner.root.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = shutdown.cancelled() => {}
                    _ = tokio::time::sleep(Duration::from_millis(ms)) => {
                        if store.dismiss_notification(id).await {
                            debug!(notification_id = %id, "Notification auto-dismissed");
                        }
                    }
                }
            });
        }

        id
    }

    pub async fn notify(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.push_notification(Notification::new(message, severity, Some(DEFAULT_AUTO_DISMISS_MS)))
            .await
    }

    /// Returns false if it was already gone.
    pub async fn dismiss_notification(&self, id: Uuid) -> bool {
        self.update(&self.inner.notifications, SliceName::Notifications, "dismiss", |slice| {
            let before = slice.data.items.len();
            slice.data.items.retain(|n| n.id != id);
            slice.data.items.len() != before
        })
        .await
    }

    pub async fn clear_notifications(&self) {
        self.update(&self.inner.notifications, SliceName::Notifications, "clear_all", |slice| {
            slice.data.items.clear()
        })
        .await;
    }
}
