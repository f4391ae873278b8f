use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use wellness_fixtures::FixtureStore;
use wellness_types::api::{
    AuthResponse, ChatReply, CheckInRequest, LoginRequest, RegisterRequest, SendMessageRequest,
    UpdateProfileRequest,
};
use wellness_types::models::{
    AnalyticsSnapshot, ChatMessage, Conversation, DepartmentMetrics, MessageRole, Notification,
    PersonalAnalytics, Resource, Role, User, WellnessEntry,
};

use crate::error::{ApiError, Operation};
use crate::token::{issue_token, user_id_from_token};
use crate::{ApiConfig, ApiResult, WellnessApi, chat, checkin};

/// Backend stand-in: waits the operation's latency, then answers from the
/// fixture store.
#[derive(Clone)]
pub struct MockApi {
    fixtures: Arc<FixtureStore>,
    config: ApiConfig,
}

impl MockApi {
    pub fn new(fixtures: Arc<FixtureStore>, config: ApiConfig) -> Self {
        Self { fixtures, config }
    }

    /// Seeded fixtures with default latencies.
    pub fn seeded() -> Self {
        Self::new(Arc::new(FixtureStore::seeded()), ApiConfig::default())
    }

    async fn simulate(&self, op: Operation) {
        let delay = self.config.latency(op);
        debug!(operation = %op, delay_ms = delay.as_millis() as u64, "Simulating remote call");
        tokio::time::sleep(delay).await;
    }

    fn require_user(&self, op: Operation, user_id: Uuid) -> ApiResult<User> {
        self.fixtures
            .get_user_by_id(user_id)
            .map_err(|e| fixture_error(op, e))?
            .ok_or_else(|| {
                warn!(operation = %op, %user_id, "Unknown user");
                ApiError::NotFound(op)
            })
    }
}

fn fixture_error(operation: Operation, e: anyhow::Error) -> ApiError {
    warn!(%operation, "Fixture access failed: {}", e);
    ApiError::Fixture {
        operation,
        detail: e.to_string(),
    }
}

#[async_trait]
impl WellnessApi for MockApi {
    async fn login(&self, req: LoginRequest) -> ApiResult<AuthResponse> {
        let op = Operation::Login;
        self.simulate(op).await;

        let user = self
            .fixtures
            .get_user_by_email(&req.email)
            .map_err(|e| fixture_error(op, e))?
            .ok_or(ApiError::Rejected(op))?;

        if req.password != self.config.demo_password {
            warn!(email = %req.email, "Login rejected: wrong password");
            return Err(ApiError::Rejected(op));
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        let token = issue_token(user.id, Utc::now());
        Ok(AuthResponse { user, token })
    }

    async fn register(&self, req: RegisterRequest) -> ApiResult<AuthResponse> {
        let op = Operation::Register;
        self.simulate(op).await;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: req.email.trim().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
            role: Role::Employee,
            department: req.department,
            position: req.position,
            has_consented: false,
            consent_date: None,
            created_at: now,
        };

        self.fixtures.insert_user(user.clone()).map_err(|e| {
            warn!(email = %user.email, "Registration rejected: {}", e);
            ApiError::Rejected(op)
        })?;

        info!(user_id = %user.id, "User registered");
        let token = issue_token(user.id, now);
        Ok(AuthResponse { user, token })
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        let op = Operation::CurrentUser;
        self.simulate(op).await;

        let user_id = user_id_from_token(token).ok_or(ApiError::Rejected(op))?;
        self.require_user(op, user_id)
    }

    async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> ApiResult<User> {
        let op = Operation::UpdateProfile;
        self.simulate(op).await;

        self.fixtures
            .update_user(user_id, |user| {
                if let Some(first_name) = req.first_name {
                    user.first_name = first_name;
                }
                if let Some(last_name) = req.last_name {
                    user.last_name = last_name;
                }
                if let Some(department) = req.department {
                    user.department = department;
                }
                if let Some(position) = req.position {
                    user.position = position;
                }
            })
            .map_err(|e| fixture_error(op, e))
    }

    async fn record_consent(&self, user_id: Uuid, granted: bool) -> ApiResult<User> {
        let op = Operation::RecordConsent;
        self.simulate(op).await;

        let now = Utc::now();
        self.fixtures
            .update_user(user_id, |user| {
                user.has_consented = granted;
                user.consent_date = granted.then_some(now);
            })
            .map_err(|e| fixture_error(op, e))
    }

    async fn wellness_history(&self, user_id: Uuid) -> ApiResult<Vec<WellnessEntry>> {
        let op = Operation::WellnessHistory;
        self.simulate(op).await;

        self.require_user(op, user_id)?;
        self.fixtures
            .get_entries_for_user(user_id)
            .map_err(|e| fixture_error(op, e))
    }

    async fn submit_check_in(
        &self,
        user_id: Uuid,
        req: CheckInRequest,
    ) -> ApiResult<WellnessEntry> {
        let op = Operation::SubmitCheckIn;
        self.simulate(op).await;

        self.require_user(op, user_id)?;

        let out_of_range = req.scores.out_of_range();
        if !out_of_range.is_empty() {
            // Accepted anyway; scores are not validated.
            warn!(%user_id, fields = ?out_of_range, "Check-in scores outside 0-10");
        }

        let (recommendations, risk_indicators) = checkin::assess(&req.scores);
        let entry = WellnessEntry {
            id: Uuid::new_v4(),
            user_id,
            entry_type: req.entry_type,
            scores: req.scores,
            description: req.description,
            tags: req.tags,
            recommendations,
            risk_indicators,
            created_at: Utc::now(),
        };

        self.fixtures
            .insert_entry(entry.clone())
            .map_err(|e| fixture_error(op, e))?;

        debug!(entry_id = %entry.id, risks = entry.risk_indicators.len(), "Check-in stored");
        Ok(entry)
    }

    async fn organization_analytics(&self) -> ApiResult<AnalyticsSnapshot> {
        let op = Operation::OrganizationAnalytics;
        self.simulate(op).await;

        self.fixtures.get_analytics().map_err(|e| fixture_error(op, e))
    }

    async fn department_analytics(&self, department: &str) -> ApiResult<DepartmentMetrics> {
        let op = Operation::DepartmentAnalytics;
        self.simulate(op).await;

        self.fixtures
            .get_department(department)
            .map_err(|e| fixture_error(op, e))?
            .ok_or(ApiError::NotFound(op))
    }

    async fn personal_analytics(&self, user_id: Uuid) -> ApiResult<PersonalAnalytics> {
        let op = Operation::PersonalAnalytics;
        self.simulate(op).await;

        self.fixtures
            .get_personal_analytics(user_id)
            .map_err(|e| fixture_error(op, e))?
            .ok_or(ApiError::NotFound(op))
    }

    async fn resources(&self) -> ApiResult<Vec<Resource>> {
        let op = Operation::Resources;
        self.simulate(op).await;

        self.fixtures.get_resources().map_err(|e| fixture_error(op, e))
    }

    async fn resource(&self, id: Uuid) -> ApiResult<Resource> {
        let op = Operation::Resource;
        self.simulate(op).await;

        self.fixtures
            .get_resource(id)
            .map_err(|e| fixture_error(op, e))?
            .ok_or(ApiError::NotFound(op))
    }

    async fn conversations(&self, user_id: Uuid) -> ApiResult<Vec<Conversation>> {
        let op = Operation::Conversations;
        self.simulate(op).await;

        self.require_user(op, user_id)?;
        self.fixtures
            .get_conversations_for_user(user_id)
            .map_err(|e| fixture_error(op, e))
    }

    async fn send_message(&self, user_id: Uuid, req: SendMessageRequest) -> ApiResult<ChatReply> {
        let op = Operation::SendMessage;
        self.simulate(op).await;

        if req.content.trim().is_empty() {
            return Err(ApiError::Rejected(op));
        }
        self.require_user(op, user_id)?;

        let now = Utc::now();
        let user_message = ChatMessage {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            content: req.content.clone(),
            timestamp: now,
        };
        let assistant_message = ChatMessage {
            id: Uuid::new_v4(),
            role: MessageRole::Assistant,
            content: chat::canned_reply(&req.content),
            timestamp: now,
        };

        let title = self
            .fixtures
            .append_messages(
                req.conversation_id,
                user_id,
                &chat::title_from(&req.content),
                &[user_message.clone(), assistant_message.clone()],
            )
            .map_err(|e| fixture_error(op, e))?;

        Ok(ChatReply {
            conversation_id: req.conversation_id,
            title,
            user_message,
            assistant_message,
        })
    }

    async fn notifications(&self, user_id: Uuid) -> ApiResult<Vec<Notification>> {
        let op = Operation::Notifications;
        self.simulate(op).await;

        self.require_user(op, user_id)?;
        self.fixtures
            .get_notifications_for_user(user_id)
            .map_err(|e| fixture_error(op, e))
    }
}
