use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Users --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Admin,
    Hr,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::Manager => write!(f, "manager"),
            Role::Admin => write!(f, "admin"),
            Role::Hr => write!(f, "hr"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: String,
    pub position: String,
    pub has_consented: bool,
    pub consent_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// -- Wellness entries --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    DailyCheckin,
    WeeklySurvey,
    MoodLog,
    StressAssessment,
}

/// Upper bound of every wellness score. Scores are expected in `0..=MAX_SCORE`
/// but nothing rejects values outside it.
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessScores {
    pub mood_score: u8,
    pub stress_level: u8,
    pub energy_level: u8,
    pub sleep_quality: u8,
    pub work_life_balance: u8,
    pub job_satisfaction: u8,
}

impl WellnessScores {
    /// Names of the scores that fall outside `0..=MAX_SCORE`.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        [
            ("moodScore", self.mood_score),
            ("stressLevel", self.stress_level),
            ("energyLevel", self.energy_level),
            ("sleepQuality", self.sleep_quality),
            ("workLifeBalance", self.work_life_balance),
            ("jobSatisfaction", self.job_satisfaction),
        ]
        .into_iter()
        .filter(|(_, v)| *v > MAX_SCORE)
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_type: EntryType,
    #[serde(flatten)]
    pub scores: WellnessScores,
    pub description: String,
    pub tags: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_indicators: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// -- Conversations --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Resources --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    StressManagement,
    Mindfulness,
    Sleep,
    PhysicalActivity,
    Nutrition,
    MentalHealth,
    WorkLifeBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Video,
    Exercise,
    Audio,
}

/// Read-only catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ResourceCategory,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub rating: f32,
    pub tags: Vec<String>,
    pub content_type: ContentType,
    pub url: Option<String>,
}

// -- Analytics --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetrics {
    pub department: String,
    pub employee_count: u32,
    pub average_wellness: f64,
    pub participation_rate: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: String,
    pub severity: RiskLevel,
    pub affected_employees: u32,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub wellness_score: f64,
    pub stress_level: f64,
    pub engagement: f64,
}

/// Precomputed organization aggregates. Independent of the wellness entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub organization_health_score: f64,
    pub total_employees: u32,
    pub participation_rate: f64,
    pub departments: Vec<DepartmentMetrics>,
    pub risk_factors: Vec<RiskFactor>,
    pub trends: Vec<TrendPoint>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAnalytics {
    pub user_id: Uuid,
    pub weekly_mood: Vec<f64>,
    pub streak_days: u32,
    pub check_in_count: u32,
    pub top_stressors: Vec<String>,
}

// -- Notifications --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Ephemeral toast. `auto_dismiss_ms` of `None` means it stays until dismissed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub auto_dismiss_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        severity: Severity,
        auto_dismiss_ms: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            auto_dismiss_ms,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_scores_flat_in_camel_case() {
        let entry = WellnessEntry {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            entry_type: EntryType::DailyCheckin,
            scores: WellnessScores {
                mood_score: 7,
                stress_level: 4,
                energy_level: 6,
                sleep_quality: 8,
                work_life_balance: 5,
                job_satisfaction: 7,
            },
            description: String::new(),
            tags: vec![],
            recommendations: vec![],
            risk_indicators: vec![],
            created_at: DateTime::default(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["moodScore"], 7);
        assert_eq!(json["workLifeBalance"], 5);
        assert_eq!(json["entryType"], "daily_checkin");
    }

    #[test]
    fn out_of_range_scores_are_reported_not_rejected() {
        let scores = WellnessScores {
            mood_score: 11,
            stress_level: 3,
            energy_level: 12,
            sleep_quality: 0,
            work_life_balance: 10,
            job_satisfaction: 5,
        };
        assert_eq!(scores.out_of_range(), vec!["moodScore", "energyLevel"]);
    }

    #[test]
    fn role_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }
}
