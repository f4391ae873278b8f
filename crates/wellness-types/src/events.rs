use std::fmt;

use serde::{Deserialize, Serialize};

/// Named region of the client state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceName {
    Auth,
    Wellness,
    Analytics,
    Resources,
    Chat,
    Notifications,
}

impl fmt::Display for SliceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::Wellness => "wellness",
            Self::Analytics => "analytics",
            Self::Resources => "resources",
            Self::Chat => "chat",
            Self::Notifications => "notifications",
        };
        f.write_str(name)
    }
}

/// Settlement phase of an async intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
    /// The view scope went away before the shim settled. Nothing was written.
    Cancelled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Change notifications broadcast by the store to every subscribed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    /// An async intent moved to a new phase
    Intent {
        slice: SliceName,
        intent: String,
        phase: Phase,
        error: Option<String>,
    },

    /// A synchronous intent mutated the slice
    Updated { slice: SliceName, intent: String },
}

impl StoreEvent {
    pub fn slice(&self) -> SliceName {
        match self {
            Self::Intent { slice, .. } | Self::Updated { slice, .. } => *slice,
        }
    }

    pub fn intent(&self) -> &str {
        match self {
            Self::Intent { intent, .. } | Self::Updated { intent, .. } => intent,
        }
    }

    /// Returns the phase for async intents, `None` for synchronous updates.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Intent { phase, .. } => Some(*phase),
            Self::Updated { .. } => None,
        }
    }
}
