use wellness_types::models::WellnessScores;

/// Stress at or above this is a risk indicator.
const HIGH_STRESS: u8 = 7;
/// Any of these at or below their threshold is a risk indicator.
const POOR_SLEEP: u8 = 4;
const LOW_MOOD: u8 = 3;
const LOW_ENERGY: u8 = 3;
const POOR_BALANCE: u8 = 4;

/// Fixed threshold rules turning a score snapshot into
/// (recommendations, risk indicators).
pub fn assess(scores: &WellnessScores) -> (Vec<String>, Vec<String>) {
    let rules: [(bool, &str, &str); 5] = [
        (
            scores.stress_level >= HIGH_STRESS,
            "Try the box breathing exercise",
            "High stress level",
        ),
        (
            scores.sleep_quality <= POOR_SLEEP,
            "Review the sleep hygiene guide",
            "Poor sleep quality",
        ),
        (
            scores.mood_score <= LOW_MOOD,
            "Consider talking to someone you trust or the employee assistance programme",
            "Low mood",
        ),
        (
            scores.energy_level <= LOW_ENERGY,
            "Take short movement breaks during the day",
            "Low energy",
        ),
        (
            scores.work_life_balance <= POOR_BALANCE,
            "Set a firm end time for work today",
            "Poor work-life balance",
        ),
    ];

    let mut recommendations = Vec::new();
    let mut risks = Vec::new();
    for (triggered, recommendation, risk) in rules {
        if triggered {
            recommendations.push(recommendation.to_string());
            risks.push(risk.to_string());
        }
    }

    if recommendations.is_empty() {
        recommendations.push("Keep up your current routine".to_string());
    }

    (recommendations, risks)
}
