use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    ChatMessage, Difficulty, EntryType, Resource, ResourceCategory, User, WellnessScores,
};

// -- Auth --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
}

/// Returned by login and register. The token is opaque to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Partial profile update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

// -- Wellness --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub entry_type: EntryType,
    #[serde(flatten)]
    pub scores: WellnessScores,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// -- Analytics --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

// -- Resources --

/// Client-side resource filter. Every set criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilter {
    pub category: Option<ResourceCategory>,
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub query: String,
}

impl ResourceFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none() && self.query.trim().is_empty()
    }

    /// Exact match on category and difficulty, case-insensitive substring
    /// match of the query against title, description and tags.
    pub fn matches(&self, resource: &Resource) -> bool {
        if self.category.is_some_and(|c| c != resource.category) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != resource.difficulty) {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        resource.title.to_lowercase().contains(&query)
            || resource.description.to_lowercase().contains(&query)
            || resource.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

// -- Chat --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMessageRequest {
    pub conversation_id: Uuid,
    pub content: String,
}

/// Both sides of one exchange. The conversation is created on first message
/// if `conversation_id` was not known yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub conversation_id: Uuid,
    pub title: String,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    fn resource(title: &str, description: &str, tags: &[&str]) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            category: ResourceCategory::Mindfulness,
            difficulty: Difficulty::Beginner,
            duration_minutes: 10,
            rating: 4.5,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content_type: ContentType::Article,
            url: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ResourceFilter {
            query: "   ".into(),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&resource("Anything", "", &[])));
    }

    #[test]
    fn query_matches_tags_case_insensitively() {
        let filter = ResourceFilter {
            query: "FOCUS".into(),
            ..Default::default()
        };
        assert!(filter.matches(&resource("Desk routine", "", &["focus", "work"])));
        assert!(!filter.matches(&resource("Desk routine", "", &["posture"])));
    }

    #[test]
    fn difficulty_must_match_exactly() {
        let filter = ResourceFilter {
            difficulty: Some(Difficulty::Advanced),
            ..Default::default()
        };
        assert!(!filter.matches(&resource("Yoga", "", &[])));
    }

    #[test]
    fn login_request_rejects_unknown_fields() {
        let result: Result<LoginRequest, _> =
            serde_json::from_str(r#"{"email":"a@b.c","password":"x","remember":true}"#);
        assert!(result.is_err());
    }
}
