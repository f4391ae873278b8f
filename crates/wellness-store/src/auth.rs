use tracing::{info, warn};

use wellness_api::{ApiError, Operation};
use wellness_types::api::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use wellness_types::events::SliceName;
use wellness_types::models::User;

use crate::scope::ViewScope;
use crate::slice::Settled;
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

impl Store {
    pub async fn login(&self, scope: &ViewScope, req: LoginRequest) -> Settled {
        let api = self.inner.api.clone();
        let tokens = self.inner.tokens.clone();
        self.dispatch(
            &self.inner.auth,
            SliceName::Auth,
            "login",
            scope,
            async move { api.login(req).await },
            move |state: &mut AuthState, auth: AuthResponse| {
                if let Err(e) = tokens.save(&auth.token) {
                    warn!("Failed to persist session token: {}", e);
                }
                info!(user_id = %auth.user.id, "Signed in");
                state.user = Some(auth.user);
                state.token = Some(auth.token);
            },
        )
        .await
    }

    pub async fn register(&self, scope: &ViewScope, req: RegisterRequest) -> Settled {
        let api = self.inner.api.clone();
        let tokens = self.inner.tokens.clone();
        self.dispatch(
            &self.inner.auth,
            SliceName::Auth,
            "register",
            scope,
            async move { api.register(req).await },
            move |state: &mut AuthState, auth: AuthResponse| {
                if let Err(e) = tokens.save(&auth.token) {
                    warn!("Failed to persist session token: {}", e);
                }
                state.user = Some(auth.user);
                state.token = Some(auth.token);
            },
        )
        .await
    }

    /// Restore the session from the token store. Without a stored token this
    /// settles immediately and leaves the slice alone. An unreadable token
    /// store rejects without calling the backend.
    pub async fn restore_session(&self, scope: &ViewScope) -> Settled {
        let token = match self.inner.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return Settled::Fulfilled,
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                let message = ApiError::Rejected(Operation::CurrentUser).to_string();
                self.update(&self.inner.auth, SliceName::Auth, "restore_session", |slice| {
                    slice.error = Some(message.clone())
                })
                .await;
                return Settled::Rejected(message);
            }
        };

        let api = self.inner.api.clone();
        let lookup = token.clone();
        let settled = self
            .dispatch(
                &self.inner.auth,
                SliceName::Auth,
                "restore_session",
                scope,
                async move { api.current_user(&lookup).await },
                move |state: &mut AuthState, user: User| {
                    state.user = Some(user);
                    state.token = Some(token);
                },
            )
            .await;

        if matches!(settled, Settled::Rejected(_)) {
            // Stale token; forget it so the next start goes straight to login.
            if let Err(e) = self.inner.tokens.clear() {
                warn!("Failed to clear stale session token: {}", e);
            }
        }
        settled
    }

    pub async fn logout(&self) {
        if let Err(e) = self.inner.tokens.clear() {
            warn!("Failed to clear session token: {}", e);
        }
        self.update(&self.inner.auth, SliceName::Auth, "logout", |slice| {
            slice.data = AuthState::default();
            slice.error = None;
        })
        .await;
        info!("Signed out");
    }

    pub async fn update_profile(&self, scope: &ViewScope, req: UpdateProfileRequest) -> Settled {
        let user_id = self.signed_in_user_id().await;
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.auth,
            SliceName::Auth,
            "update_profile",
            scope,
            async move {
                match user_id {
                    Some(user_id) => api.update_profile(user_id, req).await,
                    None => Err(ApiError::Rejected(Operation::UpdateProfile)),
                }
            },
            |state: &mut AuthState, user: User| state.user = Some(user),
        )
        .await
    }

    pub async fn record_consent(&self, scope: &ViewScope, granted: bool) -> Settled {
        let user_id = self.signed_in_user_id().await;
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.auth,
            SliceName::Auth,
            "record_consent",
            scope,
            async move {
                match user_id {
                    Some(user_id) => api.record_consent(user_id, granted).await,
                    None => Err(ApiError::Rejected(Operation::RecordConsent)),
                }
            },
            |state: &mut AuthState, user: User| state.user = Some(user),
        )
        .await
    }

    pub async fn clear_auth_error(&self) {
        self.update(&self.inner.auth, SliceName::Auth, "clear_error", |slice| {
            slice.clear_error()
        })
        .await;
    }

    async fn signed_in_user_id(&self) -> Option<uuid::Uuid> {
        self.inner.auth.read().await.data.user.as_ref().map(|u| u.id)
    }
}
