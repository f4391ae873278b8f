use std::future::Future;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wellness_api::{ApiResult, TokenStore, WellnessApi};
use wellness_types::events::{Phase, SliceName, StoreEvent};

use crate::analytics::AnalyticsState;
use crate::auth::AuthState;
use crate::chat::ChatState;
use crate::notifications::NotificationsState;
use crate::resources::ResourcesState;
use crate::scope::ViewScope;
use crate::slice::{Settled, Slice};
use crate::wellness::WellnessState;

/// Handle to the whole state tree. Cheap to clone; every clone sees the same
/// slices.
#[derive(Clone)]
pub struct Store {
    pub(crate) inner: Arc<StoreInner>,
}

pub(crate) struct StoreInner {
    pub(crate) api: Arc<dyn WellnessApi>,
    pub(crate) tokens: Arc<dyn TokenStore>,

    /// Change notifications for every subscribed view
    events: broadcast::Sender<StoreEvent>,

    /// Parent of every view scope
    pub(crate) root: CancellationToken,

    pub(crate) auth: RwLock<Slice<AuthState>>,
    pub(crate) wellness: RwLock<Slice<WellnessState>>,
    pub(crate) analytics: RwLock<Slice<AnalyticsState>>,
    pub(crate) resources: RwLock<Slice<ResourcesState>>,
    pub(crate) chat: RwLock<Slice<ChatState>>,
    pub(crate) notifications: RwLock<Slice<NotificationsState>>,
}

impl Store {
    pub fn new(api: Arc<dyn WellnessApi>, tokens: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(StoreInner {
                api,
                tokens,
                events,
                root: CancellationToken::new(),
                auth: RwLock::new(Slice::default()),
                wellness: RwLock::new(Slice::default()),
                analytics: RwLock::new(Slice::default()),
                resources: RwLock::new(Slice::default()),
                chat: RwLock::new(Slice::default()),
                notifications: RwLock::new(Slice::default()),
            }),
        }
    }

    /// Subscribe to state change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    /// Open a scope for a view. Intents dispatched under it are abandoned
    /// once it is cancelled.
    pub fn scope(&self) -> ViewScope {
        ViewScope::child_of(&self.inner.root)
    }

    /// Cancel every scope and background timer.
    pub fn shutdown(&self) {
        info!("Store shutting down");
        self.inner.root.cancel();
    }

    // -- Snapshots --

    pub async fn auth(&self) -> Slice<AuthState> {
        self.inner.auth.read().await.clone()
    }

    pub async fn wellness(&self) -> Slice<WellnessState> {
        self.inner.wellness.read().await.clone()
    }

    pub async fn analytics(&self) -> Slice<AnalyticsState> {
        self.inner.analytics.read().await.clone()
    }

    pub async fn resources(&self) -> Slice<ResourcesState> {
        self.inner.resources.read().await.clone()
    }

    pub async fn chat(&self) -> Slice<ChatState> {
        self.inner.chat.read().await.clone()
    }

    pub async fn notifications(&self) -> Slice<NotificationsState> {
        self.inner.notifications.read().await.clone()
    }

    // -- Plumbing shared by the slice modules --

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    pub(crate) fn emit_updated(&self, slice: SliceName, intent: &'static str) {
        debug!(%slice, intent, "updated");
        self.emit(StoreEvent::Updated {
            slice,
            intent: intent.to_string(),
        });
    }

    fn emit_phase(
        &self,
        slice: SliceName,
        intent: &'static str,
        phase: Phase,
        error: Option<String>,
    ) {
        self.emit(StoreEvent::Intent {
            slice,
            intent: intent.to_string(),
            phase,
            error,
        });
    }

    /// Synchronous intent: mutate the slice and announce it.
    pub(crate) async fn update<S, R>(
        &self,
        lock: &RwLock<Slice<S>>,
        slice: SliceName,
        intent: &'static str,
        mutate: impl FnOnce(&mut Slice<S>) -> R,
    ) -> R {
        let result = mutate(&mut *lock.write().await);
        self.emit_updated(slice, intent);
        result
    }

    /// Run an async intent through pending → fulfilled | rejected | cancelled.
    pub(crate) async fn dispatch<S, T, Fut, W>(
        &self,
        lock: &RwLock<Slice<S>>,
        slice: SliceName,
        intent: &'static str,
        scope: &ViewScope,
        call: Fut,
        write: W,
    ) -> Settled
    where
        Fut: Future<Output = ApiResult<T>>,
        W: FnOnce(&mut S, T),
    {
        self.dispatch_with(lock, slice, intent, scope, call, write, |_| {})
            .await
    }

    /// Like [`Store::dispatch`], with `settle` run on every outcome to reset
    /// in-flight markers other than `is_loading`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn dispatch_with<S, T, Fut, W, F>(
        &self,
        lock: &RwLock<Slice<S>>,
        slice: SliceName,
        intent: &'static str,
        scope: &ViewScope,
        call: Fut,
        write: W,
        settle: F,
    ) -> Settled
    where
        Fut: Future<Output = ApiResult<T>>,
        W: FnOnce(&mut S, T),
        F: FnOnce(&mut S),
    {
        if scope.is_cancelled() {
            debug!(%slice, intent, "scope already cancelled, not dispatching");
            settle(&mut lock.write().await.data);
            return Settled::Cancelled;
        }

        lock.write().await.pending();
        debug!(%slice, intent, "pending");
        self.emit_phase(slice, intent, Phase::Pending, None);

        let outcome = tokio::select! {
            biased;
            _ = scope.cancelled() => None,
            result = call => Some(result),
        };
        // The view may have gone away while the shim was settling.
        let outcome = outcome.filter(|_| !scope.is_cancelled());

        let settled = {
            let mut state = lock.write().await;
            settle(&mut state.data);
            match outcome {
                None => {
                    state.cancel();
                    Settled::Cancelled
                }
                Some(Ok(value)) => {
                    state.fulfill(|data| write(data, value));
                    Settled::Fulfilled
                }
                Some(Err(e)) => {
                    let message = e.to_string();
                    warn!(%slice, intent, operation = %e.operation(), "rejected: {}", message);
                    state.reject(message.clone());
                    Settled::Rejected(message)
                }
            }
        };

        match &settled {
            Settled::Fulfilled => {
                debug!(%slice, intent, "fulfilled");
                self.emit_phase(slice, intent, Phase::Fulfilled, None);
            }
            Settled::Rejected(message) => {
                self.emit_phase(slice, intent, Phase::Rejected, Some(message.clone()));
            }
            Settled::Cancelled => {
                debug!(%slice, intent, "cancelled");
                self.emit_phase(slice, intent, Phase::Cancelled, None);
            }
        }

        settled
    }
}
