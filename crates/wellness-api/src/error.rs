use std::fmt;
use std::time::Duration;

/// Every remote operation the UI can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    CurrentUser,
    UpdateProfile,
    RecordConsent,
    WellnessHistory,
    SubmitCheckIn,
    OrganizationAnalytics,
    DepartmentAnalytics,
    PersonalAnalytics,
    Resources,
    Resource,
    Conversations,
    SendMessage,
    Notifications,
}

impl Operation {
    /// The fixed human-readable string stored in a slice when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Invalid email or password",
            Self::Register => "An account with this email already exists",
            Self::CurrentUser => "Session expired",
            Self::UpdateProfile => "Failed to update profile",
            Self::RecordConsent => "Failed to record consent",
            Self::WellnessHistory => "Failed to fetch wellness history",
            Self::SubmitCheckIn => "Failed to submit wellness check-in",
            Self::OrganizationAnalytics => "Failed to fetch analytics",
            Self::DepartmentAnalytics => "Failed to fetch department analytics",
            Self::PersonalAnalytics => "Failed to fetch personal analytics",
            Self::Resources => "Failed to fetch resources",
            Self::Resource => "Resource not found",
            Self::Conversations => "Failed to fetch conversations",
            Self::SendMessage => "Failed to send message",
            Self::Notifications => "Failed to fetch notifications",
        }
    }

    /// Simulated round-trip time before scaling.
    pub fn base_latency(self) -> Duration {
        let ms = match self {
            Self::Login => 1000,
            Self::Register => 1200,
            Self::CurrentUser => 500,
            Self::UpdateProfile => 800,
            Self::RecordConsent => 600,
            Self::WellnessHistory => 800,
            Self::SubmitCheckIn => 1000,
            Self::OrganizationAnalytics => 1200,
            Self::DepartmentAnalytics => 900,
            Self::PersonalAnalytics => 700,
            Self::Resources => 600,
            Self::Resource => 500,
            Self::Conversations => 600,
            Self::SendMessage => 1200,
            Self::Notifications => 500,
        };
        Duration::from_millis(ms)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::CurrentUser => "current_user",
            Self::UpdateProfile => "update_profile",
            Self::RecordConsent => "record_consent",
            Self::WellnessHistory => "wellness_history",
            Self::SubmitCheckIn => "submit_check_in",
            Self::OrganizationAnalytics => "organization_analytics",
            Self::DepartmentAnalytics => "department_analytics",
            Self::PersonalAnalytics => "personal_analytics",
            Self::Resources => "resources",
            Self::Resource => "resource",
            Self::Conversations => "conversations",
            Self::SendMessage => "send_message",
            Self::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shim failure. There is one failure kind as far as callers are concerned:
/// every variant displays as the operation's fixed message. The variants only
/// exist so logs can say what actually happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{}", .0.failure_message())]
    NotFound(Operation),

    #[error("{}", .0.failure_message())]
    Rejected(Operation),

    #[error("{}", .operation.failure_message())]
    Fixture { operation: Operation, detail: String },
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::NotFound(op) | Self::Rejected(op) => *op,
            Self::Fixture { operation, .. } => *operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_displays_the_fixed_message() {
        let op = Operation::WellnessHistory;
        let errors = [
            ApiError::NotFound(op),
            ApiError::Rejected(op),
            ApiError::Fixture {
                operation: op,
                detail: "lock poisoned".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.to_string(), "Failed to fetch wellness history");
            assert_eq!(err.operation(), op);
        }
    }

    #[test]
    fn latencies_stay_in_observed_band() {
        let ops = [
            Operation::Login,
            Operation::Register,
            Operation::CurrentUser,
            Operation::Resource,
            Operation::OrganizationAnalytics,
            Operation::SendMessage,
        ];
        for op in ops {
            let ms = op.base_latency().as_millis();
            assert!((500..=1200).contains(&ms), "{op} latency {ms}ms");
        }
    }
}
