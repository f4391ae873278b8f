use tokio_util::sync::{CancellationToken, DropGuard};

/// Lifetime of the view that dispatched an intent. Once cancelled, in-flight
/// intents started under it stop waiting on their shim and write nothing.
///
/// Clones share the same token.
#[derive(Debug, Clone)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub(crate) fn child_of(root: &CancellationToken) -> Self {
        Self {
            token: root.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Cancels the scope when the guard is dropped, e.g. on view unmount.
    pub fn unmount_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}
