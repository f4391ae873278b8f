use anyhow::{Result, anyhow};
use chrono::Utc;
use uuid::Uuid;
use wellness_types::models::{
    AnalyticsSnapshot, ChatMessage, Conversation, DepartmentMetrics, Notification,
    PersonalAnalytics, Resource, User, WellnessEntry,
};

use crate::FixtureStore;

impl FixtureStore {
    // -- Users --

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_data(|data| {
            Ok(data
                .users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        })
    }

    pub fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.with_data(|data| Ok(data.users.iter().find(|u| u.id == id).cloned()))
    }

    pub fn insert_user(&self, user: User) -> Result<()> {
        self.with_data_mut(|data| {
            if data.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(anyhow!("Email already registered: {}", user.email));
            }
            data.users.push(user);
            Ok(())
        })
    }

    /// Replace the stored copy of a user and return the new copy.
    pub fn update_user<F>(&self, id: Uuid, f: F) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        self.with_data_mut(|data| {
            let user = data
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| anyhow!("User not found: {}", id))?;
            f(user);
            Ok(user.clone())
        })
    }

    // -- Wellness entries --

    /// All entries for a user, newest first.
    pub fn get_entries_for_user(&self, user_id: Uuid) -> Result<Vec<WellnessEntry>> {
        self.with_data(|data| {
            let mut entries: Vec<WellnessEntry> = data
                .entries
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect();
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(entries)
        })
    }

    pub fn insert_entry(&self, entry: WellnessEntry) -> Result<()> {
        self.with_data_mut(|data| {
            data.entries.insert(0, entry);
            Ok(())
        })
    }

    // -- Resources --

    pub fn get_resources(&self) -> Result<Vec<Resource>> {
        self.with_data(|data| Ok(data.resources.clone()))
    }

    pub fn get_resource(&self, id: Uuid) -> Result<Option<Resource>> {
        self.with_data(|data| Ok(data.resources.iter().find(|r| r.id == id).cloned()))
    }

    // -- Analytics --

    pub fn get_analytics(&self) -> Result<AnalyticsSnapshot> {
        self.with_data(|data| Ok(data.analytics.clone()))
    }

    pub fn get_department(&self, name: &str) -> Result<Option<DepartmentMetrics>> {
        self.with_data(|data| {
            Ok(data
                .analytics
                .departments
                .iter()
                .find(|d| d.department.eq_ignore_ascii_case(name))
                .cloned())
        })
    }

    pub fn get_personal_analytics(&self, user_id: Uuid) -> Result<Option<PersonalAnalytics>> {
        self.with_data(|data| Ok(data.personal.get(&user_id).cloned()))
    }

    // -- Conversations --

    pub fn get_conversations_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>> {
        self.with_data(|data| {
            Ok(data
                .conversations
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        })
    }

    /// Append messages to a conversation, creating it under `id` when it does
    /// not exist yet. Returns the conversation title.
    pub fn append_messages(
        &self,
        id: Uuid,
        user_id: Uuid,
        new_title: &str,
        messages: &[ChatMessage],
    ) -> Result<String> {
        self.with_data_mut(|data| {
            let now = Utc::now();
            let position = data.conversations.iter().position(|c| c.id == id);
            let conversation = match position {
                Some(idx) => &mut data.conversations[idx],
                None => {
                    data.conversations.push(Conversation {
                        id,
                        user_id,
                        title: new_title.to_string(),
                        messages: vec![],
                        created_at: now,
                        updated_at: now,
                    });
                    let last = data.conversations.len() - 1;
                    &mut data.conversations[last]
                }
            };

            if conversation.user_id != user_id {
                return Err(anyhow!("Conversation {} belongs to another user", id));
            }

            conversation.messages.extend_from_slice(messages);
            conversation.updated_at = now;
            Ok(conversation.title.clone())
        })
    }

    // -- Notifications --

    pub fn get_notifications_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        self.with_data(|data| Ok(data.notifications.get(&user_id).cloned().unwrap_or_default()))
    }
}
