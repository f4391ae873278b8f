use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use wellness_types::models::{
    AnalyticsSnapshot, ChatMessage, ContentType, Conversation, DepartmentMetrics, Difficulty,
    EntryType, MessageRole, Notification, PersonalAnalytics, Resource, ResourceCategory,
    RiskFactor, RiskLevel, Role, Severity, Trend, TrendPoint, User, WellnessEntry,
    WellnessScores,
};

use crate::models::FixtureData;

pub const EMPLOYEE_ID: Uuid = Uuid::from_u128(0x0000_0001_0000_0000_0000_0000_0000_0001);
pub const MANAGER_ID: Uuid = Uuid::from_u128(0x0000_0001_0000_0000_0000_0000_0000_0002);
pub const ADMIN_ID: Uuid = Uuid::from_u128(0x0000_0001_0000_0000_0000_0000_0000_0003);
pub const HR_ID: Uuid = Uuid::from_u128(0x0000_0001_0000_0000_0000_0000_0000_0004);

pub const EMPLOYEE_EMAIL: &str = "sarah.johnson@company.com";

pub const BOX_BREATHING_ID: Uuid = Uuid::from_u128(0x0000_0003_0000_0000_0000_0000_0000_0001);

const CONVERSATION_ID: Uuid = Uuid::from_u128(0x0000_0004_0000_0000_0000_0000_0000_0001);

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|ndt| ndt.and_utc())
        .unwrap_or_default()
}

fn fixture_id(table: u128, n: u128) -> Uuid {
    Uuid::from_u128((table << 96) | n)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_data() -> FixtureData {
    FixtureData {
        users: users(),
        entries: entries(),
        resources: resources(),
        analytics: analytics(),
        personal: personal(),
        conversations: conversations(),
        notifications: notifications(),
    }
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: Uuid,
    email: &str,
    first: &str,
    last: &str,
    role: Role,
    department: &str,
    position: &str,
    consented: bool,
) -> User {
    User {
        id,
        email: email.into(),
        first_name: first.into(),
        last_name: last.into(),
        role,
        department: department.into(),
        position: position.into(),
        has_consented: consented,
        consent_date: consented.then(|| at(2024, 1, 2, 9)),
        created_at: at(2023, 11, 1, 9),
    }
}

fn users() -> Vec<User> {
    vec![
        user(
            EMPLOYEE_ID,
            EMPLOYEE_EMAIL,
            "Sarah",
            "Johnson",
            Role::Employee,
            "Engineering",
            "Senior Software Engineer",
            true,
        ),
        user(
            MANAGER_ID,
            "michael.chen@company.com",
            "Michael",
            "Chen",
            Role::Manager,
            "Engineering",
            "Engineering Manager",
            true,
        ),
        user(
            ADMIN_ID,
            "admin@company.com",
            "Alex",
            "Rivera",
            Role::Admin,
            "IT",
            "Platform Administrator",
            true,
        ),
        user(
            HR_ID,
            "emily.davis@company.com",
            "Emily",
            "Davis",
            Role::Hr,
            "Human Resources",
            "HR Business Partner",
            false,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn entry(
    n: u128,
    day: u32,
    entry_type: EntryType,
    scores: [u8; 6],
    description: &str,
    tags: &[&str],
    recommendations: &[&str],
    risks: &[&str],
) -> WellnessEntry {
    WellnessEntry {
        id: fixture_id(2, n),
        user_id: EMPLOYEE_ID,
        entry_type,
        scores: WellnessScores {
            mood_score: scores[0],
            stress_level: scores[1],
            energy_level: scores[2],
            sleep_quality: scores[3],
            work_life_balance: scores[4],
            job_satisfaction: scores[5],
        },
        description: description.into(),
        tags: strings(tags),
        recommendations: strings(recommendations),
        risk_indicators: strings(risks),
        created_at: at(2024, 1, day, 17),
    }
}

fn entries() -> Vec<WellnessEntry> {
    // Newest first.
    vec![
        entry(
            1,
            19,
            EntryType::DailyCheckin,
            [7, 4, 7, 7, 6, 8],
            "Good focus day, shipped the release.",
            &["productive", "team"],
            &["Keep the short afternoon walks going"],
            &[],
        ),
        entry(
            2,
            18,
            EntryType::MoodLog,
            [6, 5, 6, 6, 6, 7],
            "Lots of meetings but manageable.",
            &["meetings"],
            &["Block an hour of focus time tomorrow"],
            &[],
        ),
        entry(
            3,
            17,
            EntryType::StressAssessment,
            [4, 8, 4, 4, 3, 6],
            "Deadline pressure, stayed late again.",
            &["deadline", "overtime"],
            &["Try the box breathing exercise", "Talk to your manager about workload"],
            &["High stress level", "Poor work-life balance"],
        ),
        entry(
            4,
            16,
            EntryType::DailyCheckin,
            [5, 6, 5, 5, 5, 7],
            "Slept badly, slow start.",
            &["sleep"],
            &["Review the sleep hygiene guide"],
            &[],
        ),
        entry(
            5,
            15,
            EntryType::WeeklySurvey,
            [8, 3, 8, 8, 7, 8],
            "Rested after the weekend.",
            &["rested", "exercise"],
            &["Maintain your weekend routine"],
            &[],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: Uuid,
    title: &str,
    description: &str,
    category: ResourceCategory,
    difficulty: Difficulty,
    minutes: u32,
    rating: f32,
    tags: &[&str],
    content_type: ContentType,
) -> Resource {
    Resource {
        id,
        title: title.into(),
        description: description.into(),
        category,
        difficulty,
        duration_minutes: minutes,
        rating,
        tags: strings(tags),
        content_type,
        url: None,
    }
}

fn resources() -> Vec<Resource> {
    vec![
        resource(
            BOX_BREATHING_ID,
            "Box Breathing for Stress Relief",
            "A four-count breathing pattern used to calm the nervous system in minutes.",
            ResourceCategory::StressManagement,
            Difficulty::Beginner,
            5,
            4.8,
            &["breathing", "quick", "anxiety"],
            ContentType::Exercise,
        ),
        resource(
            fixture_id(3, 2),
            "Managing Deadline Pressure",
            "Practical strategies for prioritising work when everything feels urgent.",
            ResourceCategory::StressManagement,
            Difficulty::Intermediate,
            12,
            4.5,
            &["workload", "planning"],
            ContentType::Article,
        ),
        resource(
            fixture_id(3, 3),
            "Progressive Muscle Relaxation",
            "Release physical tension with guided breathing and muscle groups.",
            ResourceCategory::StressManagement,
            Difficulty::Beginner,
            15,
            4.6,
            &["relaxation", "body"],
            ContentType::Audio,
        ),
        resource(
            fixture_id(3, 4),
            "Mindful Breathing Meditation",
            "A guided meditation anchoring attention on the breath.",
            ResourceCategory::Mindfulness,
            Difficulty::Beginner,
            10,
            4.7,
            &["meditation", "breathing"],
            ContentType::Audio,
        ),
        resource(
            fixture_id(3, 5),
            "Sleep Hygiene Essentials",
            "Evening habits that improve sleep quality and consistency.",
            ResourceCategory::Sleep,
            Difficulty::Beginner,
            8,
            4.4,
            &["sleep", "routine"],
            ContentType::Article,
        ),
        resource(
            fixture_id(3, 6),
            "Desk Stretches Every Hour",
            "Short stretches to counter long periods of sitting.",
            ResourceCategory::PhysicalActivity,
            Difficulty::Beginner,
            5,
            4.3,
            &["stretching", "posture"],
            ContentType::Video,
        ),
        resource(
            fixture_id(3, 7),
            "Setting Boundaries After Hours",
            "How to disconnect from work notifications and protect personal time.",
            ResourceCategory::WorkLifeBalance,
            Difficulty::Intermediate,
            10,
            4.5,
            &["boundaries", "remote work"],
            ContentType::Article,
        ),
        resource(
            fixture_id(3, 8),
            "Fuel for Focus",
            "Meal timing and snacks that keep energy stable through the workday.",
            ResourceCategory::Nutrition,
            Difficulty::Beginner,
            7,
            4.1,
            &["energy", "meals"],
            ContentType::Article,
        ),
        resource(
            fixture_id(3, 9),
            "Recognising Burnout Early",
            "Warning signs of burnout and when to reach out for support.",
            ResourceCategory::MentalHealth,
            Difficulty::Advanced,
            20,
            4.9,
            &["burnout", "support"],
            ContentType::Video,
        ),
    ]
}

fn analytics() -> AnalyticsSnapshot {
    let department = |name: &str, count, wellness, participation, risk| DepartmentMetrics {
        department: name.into(),
        employee_count: count,
        average_wellness: wellness,
        participation_rate: participation,
        risk_level: risk,
    };
    let risk = |name: &str, severity, affected, trend| RiskFactor {
        name: name.into(),
        severity,
        affected_employees: affected,
        trend,
    };
    let point = |label: &str, wellness, stress, engagement| TrendPoint {
        label: label.into(),
        wellness_score: wellness,
        stress_level: stress,
        engagement,
    };

    AnalyticsSnapshot {
        organization_health_score: 7.2,
        total_employees: 1247,
        participation_rate: 0.78,
        departments: vec![
            department("Engineering", 342, 6.8, 0.82, RiskLevel::Medium),
            department("Marketing", 156, 7.4, 0.75, RiskLevel::Low),
            department("Sales", 289, 6.2, 0.69, RiskLevel::High),
            department("Human Resources", 48, 7.9, 0.91, RiskLevel::Low),
            department("Operations", 412, 7.1, 0.77, RiskLevel::Medium),
        ],
        risk_factors: vec![
            risk("Excessive overtime", RiskLevel::High, 187, Trend::Declining),
            risk("Meeting overload", RiskLevel::Medium, 243, Trend::Stable),
            risk("Poor sleep quality", RiskLevel::Medium, 156, Trend::Improving),
        ],
        trends: vec![
            point("Oct", 6.9, 5.8, 7.1),
            point("Nov", 7.0, 5.6, 7.3),
            point("Dec", 6.8, 6.1, 6.9),
            point("Jan", 7.2, 5.4, 7.5),
        ],
        generated_at: at(2024, 1, 20, 6),
    }
}

fn personal() -> HashMap<Uuid, PersonalAnalytics> {
    let stats = |user_id, weekly: &[f64], streak, count, stressors: &[&str]| {
        (
            user_id,
            PersonalAnalytics {
                user_id,
                weekly_mood: weekly.to_vec(),
                streak_days: streak,
                check_in_count: count,
                top_stressors: strings(stressors),
            },
        )
    };

    HashMap::from([
        stats(EMPLOYEE_ID, &[6.5, 6.0, 7.0, 7.5], 5, 23, &["Deadlines", "Meetings", "Sleep"]),
        stats(MANAGER_ID, &[7.0, 6.5, 6.5, 7.0], 2, 11, &["Headcount planning", "Meetings"]),
    ])
}

fn conversations() -> Vec<Conversation> {
    let message = |n, role, content: &str, hour| ChatMessage {
        id: fixture_id(5, n),
        role,
        content: content.into(),
        timestamp: at(2024, 1, 18, hour),
    };

    vec![Conversation {
        id: CONVERSATION_ID,
        user_id: EMPLOYEE_ID,
        title: "Handling a stressful sprint".into(),
        messages: vec![
            message(
                1,
                MessageRole::User,
                "I've been really stressed with the sprint deadline.",
                12,
            ),
            message(
                2,
                MessageRole::Assistant,
                "That sounds hard. Would it help to break the remaining work into smaller \
                 pieces and pick the one that matters most today?",
                12,
            ),
        ],
        created_at: at(2024, 1, 18, 12),
        updated_at: at(2024, 1, 18, 12),
    }]
}

fn notifications() -> HashMap<Uuid, Vec<Notification>> {
    let notification = |n, message: &str, severity| Notification {
        id: fixture_id(6, n),
        message: message.into(),
        severity,
        auto_dismiss_ms: None,
        created_at: at(2024, 1, 20, 8),
    };

    HashMap::from([(
        EMPLOYEE_ID,
        vec![
            notification(1, "Time for your daily check-in", Severity::Info),
            notification(2, "You're on a 5 day check-in streak!", Severity::Success),
        ],
    )])
}
