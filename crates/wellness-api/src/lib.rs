//! Access shims: the request/response boundary between the state store and a
//! backend. [`MockApi`] serves the bundled fixtures after a simulated delay;
//! a real HTTP client would implement [`WellnessApi`] the same way.

pub mod chat;
pub mod checkin;
pub mod error;
pub mod mock;
pub mod token;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use wellness_types::api::{
    AuthResponse, ChatReply, CheckInRequest, LoginRequest, RegisterRequest, SendMessageRequest,
    UpdateProfileRequest,
};
use wellness_types::models::{
    AnalyticsSnapshot, Conversation, DepartmentMetrics, Notification, PersonalAnalytics, Resource,
    User, WellnessEntry,
};

pub use error::{ApiError, Operation};
pub use mock::MockApi;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_DEMO_PASSWORD: &str = "password123";

/// Knobs for the simulated backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The single password every fixture account accepts.
    pub demo_password: String,
    /// Multiplier applied to every operation's base latency.
    pub latency_scale: f64,
}

impl ApiConfig {
    pub fn latency(&self, op: Operation) -> Duration {
        op.base_latency().mul_f64(self.latency_scale.max(0.0))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            demo_password: DEFAULT_DEMO_PASSWORD.to_string(),
            latency_scale: 1.0,
        }
    }
}

/// One async method per backend endpoint. Every method resolves with an owned
/// copy of the data or rejects with the operation's fixed message.
#[async_trait]
pub trait WellnessApi: Send + Sync {
    async fn login(&self, req: LoginRequest) -> ApiResult<AuthResponse>;

    async fn register(&self, req: RegisterRequest) -> ApiResult<AuthResponse>;

    /// Resolve the user a stored token belongs to.
    async fn current_user(&self, token: &str) -> ApiResult<User>;

    async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> ApiResult<User>;

    async fn record_consent(&self, user_id: Uuid, granted: bool) -> ApiResult<User>;

    /// Entries for a user, newest first.
    async fn wellness_history(&self, user_id: Uuid) -> ApiResult<Vec<WellnessEntry>>;

    async fn submit_check_in(&self, user_id: Uuid, req: CheckInRequest) -> ApiResult<WellnessEntry>;

    async fn organization_analytics(&self) -> ApiResult<AnalyticsSnapshot>;

    async fn department_analytics(&self, department: &str) -> ApiResult<DepartmentMetrics>;

    async fn personal_analytics(&self, user_id: Uuid) -> ApiResult<PersonalAnalytics>;

    async fn resources(&self) -> ApiResult<Vec<Resource>>;

    async fn resource(&self, id: Uuid) -> ApiResult<Resource>;

    async fn conversations(&self, user_id: Uuid) -> ApiResult<Vec<Conversation>>;

    async fn send_message(&self, user_id: Uuid, req: SendMessageRequest) -> ApiResult<ChatReply>;

    async fn notifications(&self, user_id: Uuid) -> ApiResult<Vec<Notification>>;
}
