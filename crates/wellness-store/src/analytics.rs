use uuid::Uuid;

use wellness_types::api::TimeRange;
use wellness_types::events::SliceName;
use wellness_types::models::{AnalyticsSnapshot, DepartmentMetrics, PersonalAnalytics};

use crate::scope::ViewScope;
use crate::slice::Settled;
use crate::store::Store;

/// Organization figures come straight from the analytics feed; they are not
/// derived from the wellness slice's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsState {
    pub organization: Option<AnalyticsSnapshot>,
    pub department: Option<DepartmentMetrics>,
    pub personal: Option<PersonalAnalytics>,
    pub time_range: TimeRange,
}

impl Store {
    pub async fn fetch_organization_analytics(&self, scope: &ViewScope) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.analytics,
            SliceName::Analytics,
            "fetch_organization",
            scope,
            async move { api.organization_analytics().await },
            |state: &mut AnalyticsState, snapshot: AnalyticsSnapshot| {
                state.organization = Some(snapshot)
            },
        )
        .await
    }

    pub async fn fetch_department_analytics(&self, scope: &ViewScope, department: &str) -> Settled {
        let api = self.inner.api.clone();
        let department = department.to_string();
        self.dispatch(
            &self.inner.analytics,
            SliceName::Analytics,
            "fetch_department",
            scope,
            async move { api.department_analytics(&department).await },
            |state: &mut AnalyticsState, metrics: DepartmentMetrics| {
                state.department = Some(metrics)
            },
        )
        .await
    }

    pub async fn fetch_personal_analytics(&self, scope: &ViewScope, user_id: Uuid) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.analytics,
            SliceName::Analytics,
            "fetch_personal",
            scope,
            async move { api.personal_analytics(user_id).await },
            |state: &mut AnalyticsState, personal: PersonalAnalytics| {
                state.personal = Some(personal)
            },
        )
        .await
    }

    pub async fn set_time_range(&self, range: TimeRange) {
        self.update(&self.inner.analytics, SliceName::Analytics, "set_time_range", |slice| {
            slice.data.time_range = range
        })
        .await;
    }

    pub async fn clear_analytics_error(&self) {
        self.update(&self.inner.analytics, SliceName::Analytics, "clear_error", |slice| {
            slice.clear_error()
        })
        .await;
    }
}
