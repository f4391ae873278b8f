use std::collections::HashMap;

use uuid::Uuid;
use wellness_types::models::{
    AnalyticsSnapshot, Conversation, Notification, PersonalAnalytics, Resource, User,
    WellnessEntry,
};

/// The fixture tables. Relationships through `user_id` are nominal and never
/// joined; the analytics snapshot is not derived from `entries`.
#[derive(Debug, Clone)]
pub struct FixtureData {
    pub users: Vec<User>,
    pub entries: Vec<WellnessEntry>,
    pub resources: Vec<Resource>,
    pub analytics: AnalyticsSnapshot,
    pub personal: HashMap<Uuid, PersonalAnalytics>,
    pub conversations: Vec<Conversation>,
    pub notifications: HashMap<Uuid, Vec<Notification>>,
}
