pub mod models;
pub mod queries;
pub mod seed;

use anyhow::Result;
use std::sync::Mutex;
use tracing::info;

use crate::models::FixtureData;

/// In-memory fixture tables, loaded once at construction.
///
/// Fake mutations (register, profile edits, check-ins, chat) replace the
/// in-memory copy and are lost when the store is dropped.
pub struct FixtureStore {
    data: Mutex<FixtureData>,
}

impl FixtureStore {
    /// Load the bundled demo dataset.
    pub fn seeded() -> Self {
        let data = seed::demo_data();
        info!(
            users = data.users.len(),
            entries = data.entries.len(),
            resources = data.resources.len(),
            "Fixture store loaded"
        );
        Self::from_data(data)
    }

    pub fn from_data(data: FixtureData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn with_data<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FixtureData) -> Result<T>,
    {
        let data = self.data.lock().map_err(|e| anyhow::anyhow!("Fixture lock poisoned: {}", e))?;
        f(&data)
    }

    pub fn with_data_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut FixtureData) -> Result<T>,
    {
        let mut data = self
            .data
            .lock()
            .map_err(|e| anyhow::anyhow!("Fixture lock poisoned: {}", e))?;
        f(&mut data)
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::seeded()
    }
}
