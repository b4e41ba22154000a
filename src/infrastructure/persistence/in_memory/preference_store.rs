//! # In-Memory Preference Store
//!
//! In-memory implementation of [`PreferenceStore`].
//!
//! Preferences live for the lifetime of the process. Unknown callers get
//! default preferences.

use crate::domain::entities::{PreferencesUpdate, RecordedChoice, UserPreferences};
use crate::infrastructure::sources::error::SourceResult;
use crate::infrastructure::sources::traits::PreferenceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory implementation of [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    storage: Arc<RwLock<HashMap<String, UserPreferences>>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of callers with stored preferences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merges `update` into the caller's preferences and returns the result.
    pub async fn update(&self, caller_id: &str, update: PreferencesUpdate) -> UserPreferences {
        let mut storage = self.storage.write().await;
        let prefs = storage.entry(caller_id.to_string()).or_default();
        prefs.apply(update);
        info!(caller_id, "preferences updated");
        prefs.clone()
    }

    /// Records a choice in the caller's history.
    pub async fn record_choice(&self, caller_id: &str, choice: RecordedChoice) {
        let mut storage = self.storage.write().await;
        storage
            .entry(caller_id.to_string())
            .or_default()
            .record(choice);
        info!(caller_id, "choice recorded");
    }

    /// Removes every stored caller.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, caller_id: &str) -> SourceResult<UserPreferences> {
        let storage = self.storage.read().await;
        Ok(storage.get(caller_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PlatformId, Price};

    #[tokio::test]
    async fn unknown_caller_gets_defaults() {
        let store = InMemoryPreferenceStore::new();
        let prefs = store.get("nobody").await.unwrap();
        assert_eq!(prefs, UserPreferences::default());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_then_get() {
        let store = InMemoryPreferenceStore::new();
        let weights = HashMap::from([("price".to_string(), 0.9)]);
        store
            .update(
                "u1",
                PreferencesUpdate {
                    ranking_weights: Some(weights.clone()),
                    ..PreferencesUpdate::default()
                },
            )
            .await;

        let prefs = store.get("u1").await.unwrap();
        assert_eq!(prefs.ranking_weights, Some(weights));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn record_choice_increments_history() {
        let store = InMemoryPreferenceStore::new();
        store
            .record_choice(
                "u1",
                RecordedChoice::new(PlatformId::new("lyft"), "Lyft XL", Price::ZERO),
            )
            .await;

        let prefs = store.get("u1").await.unwrap();
        assert_eq!(prefs.search_history_count, 1);
        assert_eq!(prefs.choice_history.len(), 1);

        store.clear().await;
        assert!(store.is_empty());
    }
}
