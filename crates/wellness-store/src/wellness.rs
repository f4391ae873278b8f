use uuid::Uuid;

use wellness_types::api::CheckInRequest;
use wellness_types::events::SliceName;
use wellness_types::models::{Trend, WellnessEntry};

use crate::scope::ViewScope;
use crate::slice::Settled;
use crate::store::Store;

/// Mean mood above this is `improving`.
const IMPROVING_ABOVE: f64 = 7.0;
/// Mean mood below this is `declining`.
const DECLINING_BELOW: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellnessState {
    /// Most recent first.
    pub entries: Vec<WellnessEntry>,
    pub current_entry: Option<WellnessEntry>,
    pub analytics: WellnessAnalytics,
}

/// Averages over the loaded entries. The only value in the store computed
/// rather than copied from a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellnessAnalytics {
    pub average_mood: f64,
    pub average_stress: f64,
    pub average_energy: f64,
    pub trend: Trend,
}

impl Default for WellnessAnalytics {
    fn default() -> Self {
        Self {
            average_mood: 0.0,
            average_stress: 0.0,
            average_energy: 0.0,
            trend: Trend::Stable,
        }
    }
}

impl WellnessAnalytics {
    /// Recompute from scratch over every entry.
    pub fn compute(entries: &[WellnessEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let n = entries.len() as f64;
        let mean = |score: fn(&WellnessEntry) -> u8| {
            entries.iter().map(|e| f64::from(score(e))).sum::<f64>() / n
        };

        let average_mood = mean(|e| e.scores.mood_score);
        let trend = if average_mood > IMPROVING_ABOVE {
            Trend::Improving
        } else if average_mood < DECLINING_BELOW {
            Trend::Declining
        } else {
            Trend::Stable
        };

        Self {
            average_mood,
            average_stress: mean(|e| e.scores.stress_level),
            average_energy: mean(|e| e.scores.energy_level),
            trend,
        }
    }
}

impl Store {
    /// Load a user's history and recompute the averages.
    pub async fn fetch_wellness_history(&self, scope: &ViewScope, user_id: Uuid) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.wellness,
            SliceName::Wellness,
            "fetch_history",
            scope,
            async move { api.wellness_history(user_id).await },
            |state: &mut WellnessState, entries: Vec<WellnessEntry>| {
                state.analytics = WellnessAnalytics::compute(&entries);
                state.entries = entries;
            },
        )
        .await
    }

    /// Prepend the stored entry and make it current. Averages are left until
    /// the next history fetch.
    pub async fn submit_check_in(
        &self,
        scope: &ViewScope,
        user_id: Uuid,
        req: CheckInRequest,
    ) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.wellness,
            SliceName::Wellness,
            "submit_check_in",
            scope,
            async move { api.submit_check_in(user_id, req).await },
            |state: &mut WellnessState, entry: WellnessEntry| {
                state.entries.insert(0, entry.clone());
                state.current_entry = Some(entry);
            },
        )
        .await
    }

    /// Select one of the loaded entries, or clear the selection with `None`.
    /// Returns false when the id is not among the loaded entries.
    pub async fn set_current_entry(&self, id: Option<Uuid>) -> bool {
        self.update(&self.inner.wellness, SliceName::Wellness, "set_current_entry", |slice| {
            match id {
                None => {
                    slice.data.current_entry = None;
                    true
                }
                Some(id) => match slice.data.entries.iter().find(|e| e.id == id) {
                    Some(entry) => {
                        slice.data.current_entry = Some(entry.clone());
                        true
                    }
                    None => false,
                },
            }
        })
        .await
    }

    pub async fn clear_wellness_error(&self) {
        self.update(&self.inner.wellness, SliceName::Wellness, "clear_error", |slice| {
            slice.clear_error()
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wellness_types::models::{EntryType, WellnessScores};

    fn entry(mood: u8, stress: u8, energy: u8) -> WellnessEntry {
        WellnessEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            entry_type: EntryType::MoodLog,
            scores: WellnessScores {
                mood_score: mood,
                stress_level: stress,
                energy_level: energy,
                sleep_quality: 5,
                work_life_balance: 5,
                job_satisfaction: 5,
            },
            description: String::new(),
            tags: vec![],
            recommendations: vec![],
            risk_indicators: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn mean_of_six_is_stable() {
        let entries = [entry(8, 2, 6), entry(6, 4, 6), entry(4, 6, 6)];
        let analytics = WellnessAnalytics::compute(&entries);
        assert_eq!(analytics.average_mood, 6.0);
        assert_eq!(analytics.average_stress, 4.0);
        assert_eq!(analytics.average_energy, 6.0);
        assert_eq!(analytics.trend, Trend::Stable);
    }

    #[test]
    fn high_mood_is_improving() {
        let analytics = WellnessAnalytics::compute(&[entry(9, 3, 7), entry(8, 3, 7)]);
        assert_eq!(analytics.average_mood, 8.5);
        assert_eq!(analytics.trend, Trend::Improving);
    }

    #[test]
    fn low_mood_is_declining() {
        let analytics = WellnessAnalytics::compute(&[entry(4, 8, 3), entry(3, 9, 2)]);
        assert_eq!(analytics.trend, Trend::Declining);
    }

    #[test]
    fn boundaries_are_stable() {
        assert_eq!(WellnessAnalytics::compute(&[entry(7, 0, 0)]).trend, Trend::Stable);
        assert_eq!(WellnessAnalytics::compute(&[entry(5, 0, 0)]).trend, Trend::Stable);
    }

    #[test]
    fn no_entries_is_zero_and_stable() {
        assert_eq!(WellnessAnalytics::compute(&[]), WellnessAnalytics::default());
    }
}
