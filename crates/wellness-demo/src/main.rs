mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use wellness_api::{FileTokenStore, MemoryTokenStore, MockApi, TokenStore};
use wellness_fixtures::FixtureStore;
use wellness_store::{Settled, Store};
use wellness_types::api::{CheckInRequest, LoginRequest};
use wellness_types::events::StoreEvent;
use wellness_types::models::{EntryType, ResourceCategory, Role, Severity, WellnessScores};

use crate::config::DemoConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wellness_demo=debug,wellness_store=debug,wellness_api=info".into()
            }),
        )
        .init();

    let config = DemoConfig::from_env()?;
    info!(
        variant = ?config.variant,
        latency_scale = config.latency_scale,
        "Starting wellness demo"
    );

    let tokens: Arc<dyn TokenStore> = match &config.token_path {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => Arc::new(MemoryTokenStore::new()),
    };
    let api = MockApi::new(Arc::new(FixtureStore::seeded()), config.api_config());
    let store = Store::new(Arc::new(api), tokens);

    let logger = tokio::spawn(log_events(store.subscribe()));

    run_session(&store, &config).await?;

    store.shutdown();
    drop(store);
    // The logger ends once every store handle is gone.
    let _ = logger.await;
    Ok(())
}

/// Relay store change notifications to the log, standing in for a view that
/// re-renders on every change.
async fn log_events(mut events: tokio::sync::broadcast::Receiver<StoreEvent>) {
    use tokio::sync::broadcast::error::RecvError;

    loop {
        match events.recv().await {
            Ok(StoreEvent::Intent { slice, intent, phase, error }) => match error {
                Some(error) => info!(%slice, %intent, %phase, %error, "state change"),
                None => info!(%slice, %intent, %phase, "state change"),
            },
            Ok(StoreEvent::Updated { slice, intent }) => info!(%slice, %intent, "state change"),
            Err(RecvError::Lagged(skipped)) => warn!("Event log lagged, skipped {}", skipped),
            Err(RecvError::Closed) => break,
        }
    }
}

async fn run_session(store: &Store, config: &DemoConfig) -> anyhow::Result<()> {
    let app = store.scope();

    // Sign in, preferring a stored session.
    store.restore_session(&app).await;
    if !store.auth().await.data.is_authenticated() {
        let req = LoginRequest {
            email: config.email.clone(),
            password: config.password.clone(),
        };
        if let Settled::Rejected(message) = store.login(&app, req).await {
            anyhow::bail!("login failed: {}", message);
        }
    }

    let user = store
        .auth()
        .await
        .data
        .user
        .ok_or_else(|| anyhow::anyhow!("no user after sign-in"))?;
    info!(user = %user.display_name(), role = %user.role, "Signed in as");

    // Dashboard
    {
        let dashboard = store.scope();
        let _unmount = dashboard.unmount_guard();
        tokio::join!(
            store.fetch_wellness_history(&dashboard, user.id),
            store.fetch_personal_analytics(&dashboard, user.id),
            store.fetch_notifications(&dashboard, user.id),
        );

        let wellness = store.wellness().await.data;
        info!(
            entries = wellness.entries.len(),
            average_mood = wellness.analytics.average_mood,
            average_stress = wellness.analytics.average_stress,
            trend = ?wellness.analytics.trend,
            "Wellness summary"
        );
        for notification in store.notifications().await.data.items {
            info!(severity = ?notification.severity, "{}", notification.message);
        }
    }

    // Check-in page
    {
        let check_in = store.scope();
        let _unmount = check_in.unmount_guard();
        let req = CheckInRequest {
            entry_type: EntryType::DailyCheckin,
            scores: WellnessScores {
                mood_score: 6,
                stress_level: 7,
                energy_level: 5,
                sleep_quality: 4,
                work_life_balance: 5,
                job_satisfaction: 7,
            },
            description: "Busy sprint, a bit tired.".into(),
            tags: vec!["sprint".into(), "tired".into()],
        };

        match store.submit_check_in(&check_in, user.id, req).await {
            Settled::Fulfilled => {
                store.notify("Check-in saved", Severity::Success).await;
                if let Some(entry) = store.wellness().await.data.current_entry {
                    info!(
                        risks = ?entry.risk_indicators,
                        "Recommendations: {:?}",
                        entry.recommendations
                    );
                }
            }
            Settled::Rejected(message) => {
                store.notify(message, Severity::Error).await;
            }
            Settled::Cancelled => {}
        }
    }

    // Resource library
    {
        let library = store.scope();
        let _unmount = library.unmount_guard();
        store.fetch_resources(&library).await;
        store
            .set_resource_category(Some(ResourceCategory::StressManagement))
            .await;
        store.set_resource_query("breathing").await;

        let resources = store.resources().await.data;
        for resource in &resources.filtered {
            info!(
                minutes = resource.duration_minutes,
                rating = resource.rating,
                "Suggested: {}",
                resource.title
            );
        }
        if let Some(first) = resources.filtered.first() {
            store.toggle_favorite(first.id).await;
        }
    }

    // Chat
    {
        let chat = store.scope();
        let _unmount = chat.unmount_guard();
        store.fetch_conversations(&chat, user.id).await;
        store.start_new_conversation(user.id).await;
        store
            .send_chat_message(&chat, user.id, "I've been feeling stressed about deadlines")
            .await;

        if let Some(conversation) = store.chat().await.data.active() {
            if let Some(reply) = conversation.messages.last() {
                info!(title = %conversation.title, "Assistant: {}", reply.content);
            }
        }
    }

    // Organization analytics, for roles that can see them.
    if matches!(user.role, Role::Manager | Role::Admin | Role::Hr) {
        let analytics = store.scope();
        let _unmount = analytics.unmount_guard();
        store.fetch_organization_analytics(&analytics).await;
        if let Some(snapshot) = store.analytics().await.data.organization {
            let json = serde_json::to_string_pretty(&snapshot.departments)?;
            info!(
                health = snapshot.organization_health_score,
                participation = snapshot.participation_rate,
                "Departments:\n{}",
                json
            );
        }
    }

    // Navigate away from a page before its data arrives.
    {
        let page = store.scope();
        let guard = page.unmount_guard();
        let fetch = store.fetch_organization_analytics(&page);
        let navigate_away = async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            drop(guard);
        };
        let (settled, ()) = tokio::join!(fetch, navigate_away);
        info!(?settled, "Abandoned analytics request");
    }

    let final_user = serde_json::to_string(&store.auth().await.data.user)?;
    info!("Session user: {}", final_user);
    Ok(())
}
