//! Slice lifecycle against the seeded mock backend. Time is paused so every
//! simulated latency is deterministic.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use wellness_api::{MemoryTokenStore, MockApi, TokenStore, TokenStoreError};
use wellness_fixtures::seed::{BOX_BREATHING_ID, EMPLOYEE_EMAIL, EMPLOYEE_ID};
use wellness_store::chat::ChatState;
use wellness_store::{Settled, Store};
use wellness_types::api::{CheckInRequest, LoginRequest, UpdateProfileRequest};
use wellness_types::events::{Phase, SliceName, StoreEvent};
use wellness_types::models::{EntryType, MessageRole, ResourceCategory, Severity, WellnessScores};

fn store_with_tokens(tokens: Arc<MemoryTokenStore>) -> Store {
    Store::new(Arc::new(MockApi::seeded()), tokens)
}

fn store() -> Store {
    store_with_tokens(Arc::new(MemoryTokenStore::new()))
}

/// Shorter than every simulated latency.
async fn mid_flight() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: EMPLOYEE_EMAIL.into(),
        password: "password123".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn loading_flag_is_set_only_while_in_flight() {
    let store = store();
    let scope = store.scope();
    assert!(!store.wellness().await.is_loading);

    let task = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move { store.fetch_wellness_history(&scope, EMPLOYEE_ID).await })
    };

    mid_flight().await;
    assert!(store.wellness().await.is_loading);

    assert_eq!(task.await.unwrap(), Settled::Fulfilled);
    let wellness = store.wellness().await;
    assert!(!wellness.is_loading);
    assert_eq!(wellness.error, None);
    assert!(!wellness.data.entries.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_resource_lookup_keeps_current_resource() {
    let store = store();
    let scope = store.scope();

    assert!(store.fetch_resource(&scope, BOX_BREATHING_ID).await.is_fulfilled());
    let settled = store.fetch_resource(&scope, Uuid::new_v4()).await;
    assert_eq!(settled, Settled::Rejected("Resource not found".into()));

    let resources = store.resources().await;
    assert!(!resources.is_loading);
    assert_eq!(resources.error.as_deref(), Some("Resource not found"));
    assert_eq!(resources.data.current_resource.map(|r| r.id), Some(BOX_BREATHING_ID));
}

#[tokio::test(start_paused = true)]
async fn failed_history_fetch_keeps_entries() {
    let store = store();
    let scope = store.scope();

    store.fetch_wellness_history(&scope, EMPLOYEE_ID).await;
    let before = store.wellness().await.data;

    let settled = store.fetch_wellness_history(&scope, Uuid::new_v4()).await;
    assert_eq!(settled, Settled::Rejected("Failed to fetch wellness history".into()));

    let after = store.wellness().await;
    assert_eq!(after.data, before);
    assert_eq!(after.error.as_deref(), Some("Failed to fetch wellness history"));

    store.clear_wellness_error().await;
    assert_eq!(store.wellness().await.error, None);
}

#[tokio::test(start_paused = true)]
async fn breathing_filter_within_stress_management() {
    let store = store();
    let scope = store.scope();
    store.fetch_resources(&scope).await;

    store.set_resource_category(Some(ResourceCategory::StressManagement)).await;
    store.set_resource_query("breathing").await;

    let resources = store.resources().await.data;
    assert!(!resources.filtered.is_empty());
    for resource in &resources.filtered {
        assert_eq!(resource.category, ResourceCategory::StressManagement);
        let hit = resource.title.to_lowercase().contains("breathing")
            || resource.description.to_lowercase().contains("breathing")
            || resource.tags.iter().any(|t| t.to_lowercase().contains("breathing"));
        assert!(hit, "{} does not mention breathing", resource.title);
    }
    // The mindfulness breathing meditation is excluded by category.
    assert_eq!(resources.filtered.len(), 1);
    assert_eq!(resources.filtered[0].id, BOX_BREATHING_ID);

    store.clear_resource_filters().await;
    let resources = store.resources().await.data;
    assert_eq!(resources.filtered.len(), resources.resources.len());
}

#[tokio::test(start_paused = true)]
async fn check_in_is_prepended_and_current() {
    let store = store();
    let scope = store.scope();
    store.fetch_wellness_history(&scope, EMPLOYEE_ID).await;
    let before = store.wellness().await.data;

    let settled = store
        .submit_check_in(
            &scope,
            EMPLOYEE_ID,
            CheckInRequest {
                entry_type: EntryType::DailyCheckin,
                scores: WellnessScores {
                    mood_score: 9,
                    stress_level: 2,
                    energy_level: 8,
                    sleep_quality: 8,
                    work_life_balance: 8,
                    job_satisfaction: 9,
                },
                description: "Great day".into(),
                tags: vec!["win".into()],
            },
        )
        .await;
    assert!(settled.is_fulfilled());

    let after = store.wellness().await.data;
    assert_eq!(after.entries.len(), before.entries.len() + 1);
    assert_eq!(after.entries[0].description, "Great day");
    assert_eq!(after.current_entry.as_ref(), Some(&after.entries[0]));
    // Averages wait for the next fetch.
    assert_eq!(after.analytics, before.analytics);

    assert!(store.set_current_entry(Some(before.entries[0].id)).await);
    assert!(!store.set_current_entry(Some(Uuid::new_v4())).await);
}

#[tokio::test(start_paused = true)]
async fn cancelled_scope_writes_nothing() {
    let store = store();
    let scope = store.scope();

    let task = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move { store.fetch_resources(&scope).await })
    };

    mid_flight().await;
    assert!(store.resources().await.is_loading);
    scope.cancel();

    assert_eq!(task.await.unwrap(), Settled::Cancelled);
    let resources = store.resources().await;
    assert!(!resources.is_loading);
    assert_eq!(resources.error, None);
    assert!(resources.data.resources.is_empty());
}

#[tokio::test(start_paused = true)]
async fn unmount_guard_cancels_scope() {
    let store = store();
    let scope = store.scope();
    {
        let _guard = scope.unmount_guard();
    }
    assert!(scope.is_cancelled());
    assert_eq!(store.fetch_resources(&scope).await, Settled::Cancelled);
    assert!(!store.resources().await.is_loading);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_every_scope() {
    let store = store();
    let first = store.scope();
    let second = store.scope();
    store.shutdown();
    assert!(first.is_cancelled());
    assert!(second.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn session_survives_in_token_store() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with_tokens(tokens.clone());
    let scope = store.scope();

    assert!(store.login(&scope, login_request()).await.is_fulfilled());
    let auth = store.auth().await.data;
    assert!(auth.is_authenticated());
    assert_eq!(tokens.load().unwrap(), auth.token);

    // A fresh store over the same token slot picks the session back up.
    let restored = store_with_tokens(tokens.clone());
    let scope = restored.scope();
    assert!(restored.restore_session(&scope).await.is_fulfilled());
    assert_eq!(restored.auth().await.data.user.map(|u| u.id), Some(EMPLOYEE_ID));

    restored.logout().await;
    assert!(!restored.auth().await.data.is_authenticated());
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn restore_without_token_does_nothing() {
    let store = store();
    let mut events = store.subscribe();
    let scope = store.scope();

    assert!(store.restore_session(&scope).await.is_fulfilled());
    assert!(!store.auth().await.data.is_authenticated());
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn stale_token_is_forgotten() {
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.save("garbage").unwrap();
    let store = store_with_tokens(tokens.clone());
    let scope = store.scope();

    assert_eq!(
        store.restore_session(&scope).await,
        Settled::Rejected("Session expired".into())
    );
    assert_eq!(tokens.load().unwrap(), None);
}

/// Token slot whose backing storage cannot be read.
struct UnreadableTokens;

impl TokenStore for UnreadableTokens {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Err(TokenStoreError::Poisoned)
    }

    fn save(&self, _token: &str) -> Result<(), TokenStoreError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn unreadable_token_store_rejects_restore() {
    let store = Store::new(Arc::new(MockApi::seeded()), Arc::new(UnreadableTokens));
    let scope = store.scope();

    assert_eq!(
        store.restore_session(&scope).await,
        Settled::Rejected("Session expired".into())
    );
    let auth = store.auth().await;
    assert!(!auth.is_loading);
    assert_eq!(auth.error.as_deref(), Some("Session expired"));
    assert!(!auth.data.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn wrong_password_sets_auth_error() {
    let store = store();
    let scope = store.scope();
    let req = LoginRequest {
        password: "nope".into(),
        ..login_request()
    };

    store.login(&scope, req).await;
    let auth = store.auth().await;
    assert_eq!(auth.error.as_deref(), Some("Invalid email or password"));
    assert!(!auth.data.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn profile_update_needs_a_session() {
    let store = store();
    let scope = store.scope();
    let req = UpdateProfileRequest {
        position: Some("Staff Engineer".into()),
        ..Default::default()
    };

    let settled = store.update_profile(&scope, req.clone()).await;
    assert_eq!(settled, Settled::Rejected("Failed to update profile".into()));

    store.login(&scope, login_request()).await;
    assert!(store.update_profile(&scope, req).await.is_fulfilled());
    let user = store.auth().await.data.user.unwrap();
    assert_eq!(user.position, "Staff Engineer");

    assert!(store.record_consent(&scope, false).await.is_fulfilled());
    let user = store.auth().await.data.user.unwrap();
    assert!(!user.has_consented);
    assert_eq!(user.consent_date, None);
}

#[tokio::test(start_paused = true)]
async fn chat_message_is_optimistic() {
    let store = store();
    let scope = store.scope();

    let task = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move {
            store
                .send_chat_message(&scope, EMPLOYEE_ID, "Work has been stressful")
                .await
        })
    };

    mid_flight().await;
    let chat = store.chat().await.data;
    assert!(chat.is_typing);
    let active = chat.active().unwrap();
    assert_eq!(active.messages.len(), 1);
    assert_eq!(active.messages[0].role, MessageRole::User);

    assert!(task.await.unwrap().is_fulfilled());
    let chat = store.chat().await.data;
    assert!(!chat.is_typing);
    let active = chat.active().unwrap();
    assert_eq!(active.title, "Work has been stressful");
    assert_eq!(active.messages.len(), 2);
    assert_eq!(active.messages[1].role, MessageRole::Assistant);
}

#[tokio::test(start_paused = true)]
async fn failed_chat_message_stays_visible() {
    let store = store();
    let scope = store.scope();

    let settled = store.send_chat_message(&scope, Uuid::new_v4(), "hello?").await;
    assert_eq!(settled, Settled::Rejected("Failed to send message".into()));

    let chat = store.chat().await;
    assert!(!chat.data.is_typing);
    assert_eq!(chat.data.active().unwrap().messages.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn send_under_cancelled_scope_changes_nothing() {
    let store = store();
    let mut events = store.subscribe();
    let scope = store.scope();
    scope.cancel();

    let settled = store.send_chat_message(&scope, EMPLOYEE_ID, "hello").await;
    assert_eq!(settled, Settled::Cancelled);

    let chat = store.chat().await;
    assert_eq!(chat.data, ChatState::default());
    assert!(!chat.is_loading);
    assert_eq!(chat.error, None);
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn abandoned_chat_send_clears_typing() {
    let store = store();
    let scope = store.scope();

    let task = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move {
            store
                .send_chat_message(&scope, EMPLOYEE_ID, "Can't sleep lately")
                .await
        })
    };

    mid_flight().await;
    assert!(store.chat().await.data.is_typing);
    scope.cancel();

    assert_eq!(task.await.unwrap(), Settled::Cancelled);
    let chat = store.chat().await;
    assert!(!chat.is_loading);
    assert_eq!(chat.error, None);
    assert!(!chat.data.is_typing);
    // Only the optimistic user message; the reply was never written.
    let active = chat.data.active().unwrap();
    assert_eq!(active.messages.len(), 1);
    assert_eq!(active.messages[0].role, MessageRole::User);

    // Nothing arrives later either.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(store.chat().await.data.active().unwrap().messages.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn conversations_load_and_select() {
    let store = store();
    let scope = store.scope();

    store.fetch_conversations(&scope, EMPLOYEE_ID).await;
    let chat = store.chat().await.data;
    assert_eq!(chat.conversations.len(), 1);
    assert_eq!(chat.active_conversation, None);

    let id = chat.conversations[0].id;
    assert!(store.select_conversation(id).await);
    assert!(!store.select_conversation(Uuid::new_v4()).await);
    assert_eq!(store.chat().await.data.active_conversation, Some(id));
}

#[tokio::test(start_paused = true)]
async fn notification_auto_dismisses() {
    let store = store();
    let id = store.notify("Check-in saved", Severity::Success).await;
    assert_eq!(store.notifications().await.data.items.len(), 1);

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(store.notifications().await.data.items.len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(store.notifications().await.data.items.is_empty());
    assert!(!store.dismiss_notification(id).await);
}

#[tokio::test(start_paused = true)]
async fn analytics_feed_is_independent_of_entries() {
    let store = store();
    let scope = store.scope();

    store.fetch_organization_analytics(&scope).await;
    store.fetch_department_analytics(&scope, "Sales").await;
    store.fetch_personal_analytics(&scope, EMPLOYEE_ID).await;

    let analytics = store.analytics().await.data;
    assert_eq!(analytics.organization.unwrap().total_employees, 1247);
    assert_eq!(analytics.department.unwrap().department, "Sales");
    assert_eq!(analytics.personal.unwrap().user_id, EMPLOYEE_ID);

    // Nothing was loaded into the wellness slice.
    assert!(store.wellness().await.data.entries.is_empty());
}

#[tokio::test(start_paused = true)]
async fn transitions_are_broadcast() {
    let store = store();
    let mut events = store.subscribe();
    let scope = store.scope();

    store.fetch_resources(&scope).await;
    store.toggle_favorite(BOX_BREATHING_ID).await;

    let pending = events.recv().await.unwrap();
    assert_eq!(pending.slice(), SliceName::Resources);
    assert_eq!(pending.phase(), Some(Phase::Pending));

    let fulfilled = events.recv().await.unwrap();
    assert_eq!(fulfilled.phase(), Some(Phase::Fulfilled));

    let updated = events.recv().await.unwrap();
    assert_eq!(
        updated,
        StoreEvent::Updated {
            slice: SliceName::Resources,
            intent: "toggle_favorite".into(),
        }
    );

    let resources = store.resources().await.data;
    assert_eq!(resources.favorite_resources().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn overlapping_intents_settle_last_wins() {
    let store = store();
    let scope = store.scope();

    // 1200 ms, fulfills.
    let organization = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move { store.fetch_organization_analytics(&scope).await })
    };
    // 900 ms, rejects.
    let department = {
        let store = store.clone();
        let scope = scope.clone();
        tokio::spawn(async move { store.fetch_department_analytics(&scope, "Legal").await })
    };

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(
        department.await.unwrap(),
        Settled::Rejected("Failed to fetch department analytics".into())
    );
    // The earlier settle already cleared the flag while the slower fetch is in flight.
    let analytics = store.analytics().await;
    assert!(!analytics.is_loading);
    assert_eq!(analytics.error.as_deref(), Some("Failed to fetch department analytics"));
    assert!(analytics.data.organization.is_none());

    assert_eq!(organization.await.unwrap(), Settled::Fulfilled);
    let analytics = store.analytics().await;
    assert!(!analytics.is_loading);
    assert_eq!(analytics.error, None);
    assert_eq!(analytics.data.organization.unwrap().total_employees, 1247);
    assert!(analytics.data.department.is_none());
}
