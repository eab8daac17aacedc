//! Persistence layout over a pluggable key-value backend.
//!
//! All durable state lives under the `atelier:` key namespace as JSON
//! strings. The backend is abstracted behind [`KeyValueStore`] so the
//! archive works identically against the in-memory map used in tests
//! and a real key-value server in production.
//!
//! # Key Patterns
//!
//! | Key | Type | Description |
//! |-----|------|-------------|
//! | `atelier:projects` | JSON | Saved project list |
//! | `atelier:project:current` | JSON | Project currently being edited |
//! | `atelier:enrichment` | JSON | Organism population state |
//! | `atelier:trails` | JSON | Interaction trails |

use std::future::Future;

use atelier_types::{Organism, Project, Trail};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Key namespace
// ---------------------------------------------------------------------------

/// Well-known keys in the archive namespace.
pub mod keys {
    /// Saved project list.
    pub const PROJECT_LIST: &str = "atelier:projects";
    /// Project currently being edited.
    pub const CURRENT_PROJECT: &str = "atelier:project:current";
    /// Organism population state.
    pub const ENRICHMENT: &str = "atelier:enrichment";
    /// Interaction trails.
    pub const TRAILS: &str = "atelier:trails";
}

// ---------------------------------------------------------------------------
// KeyValueStore
// ---------------------------------------------------------------------------

/// Minimal string key-value backend the archive layers JSON on top of.
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value at `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Writes `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Deletes the value at `key`; deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Lists every key that starts with `prefix`.
    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// Typed JSON records over a [`KeyValueStore`] backend.
#[derive(Debug, Clone)]
pub struct Archive<S> {
    backend: S,
}

impl<S: KeyValueStore> Archive<S> {
    /// Wraps a backend in the archive layout.
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Serializes `value` as JSON and stores it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] when encoding fails and
    /// propagates backend failures.
    pub async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, json).await
    }

    /// Reads the value at `key` and decodes it from JSON.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] when decoding fails and
    /// propagates backend failures.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Typed records
    // -----------------------------------------------------------------------

    /// Persists the project currently being edited.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn save_current_project(&self, project: &Project) -> Result<(), StoreError> {
        tracing::debug!(project_id = %project.id, "current project saved");
        self.set_json(keys::CURRENT_PROJECT, project).await
    }

    /// Loads the project currently being edited, if one was saved.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn load_current_project(&self) -> Result<Option<Project>, StoreError> {
        self.get_json(keys::CURRENT_PROJECT).await
    }

    /// Persists the saved project list.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn save_project_list(&self, projects: &[Project]) -> Result<(), StoreError> {
        self.set_json(keys::PROJECT_LIST, &projects).await
    }

    /// Loads the saved project list, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn load_project_list(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.get_json(keys::PROJECT_LIST).await?.unwrap_or_default())
    }

    /// Persists the organism population state.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn save_enrichment(&self, organisms: &[Organism]) -> Result<(), StoreError> {
        self.set_json(keys::ENRICHMENT, &organisms).await
    }

    /// Loads the organism population state, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn load_enrichment(&self) -> Result<Vec<Organism>, StoreError> {
        Ok(self.get_json(keys::ENRICHMENT).await?.unwrap_or_default())
    }

    /// Persists the interaction trails.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn save_trails(&self, trails: &[Trail]) -> Result<(), StoreError> {
        self.set_json(keys::TRAILS, &trails).await
    }

    /// Loads the interaction trails, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend failures.
    pub async fn load_trails(&self) -> Result<Vec<Trail>, StoreError> {
        Ok(self.get_json(keys::TRAILS).await?.unwrap_or_default())
    }

    /// Removes every record under the archive namespace.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn clear(&self) -> Result<(), StoreError> {
        for key in self.backend.list_keys("atelier:").await? {
            self.backend.delete(&key).await?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use atelier_types::{Component, ComponentType, Project, ProjectId};
    use chrono::Utc;

    use super::*;
    use crate::memory::MemoryStore;

    fn sample_project() -> Project {
        Project {
            id: ProjectId::new(),
            name: "persisted".to_string(),
            components: vec![Component::new(ComponentType::Card, "hero")],
            last_modified: Utc::now(),
        }
    }

    #[tokio::test]
    async fn current_project_round_trips() {
        let archive = Archive::new(MemoryStore::new());
        let project = sample_project();

        archive.save_current_project(&project).await.ok();
        let loaded = archive.load_current_project().await.ok().flatten();

        assert_eq!(loaded.map(|p| p.id), Some(project.id));
    }

    #[tokio::test]
    async fn missing_records_default_to_empty() {
        let archive = Archive::new(MemoryStore::new());

        let current = archive.load_current_project().await.ok().flatten();
        let list = archive.load_project_list().await.unwrap_or_default();
        let trails = archive.load_trails().await.unwrap_or_default();

        assert!(current.is_none());
        assert!(list.is_empty());
        assert!(trails.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_the_namespace() {
        let archive = Archive::new(MemoryStore::new());
        archive.save_current_project(&sample_project()).await.ok();
        archive.save_project_list(&[sample_project()]).await.ok();

        archive.clear().await.ok();

        let current = archive.load_current_project().await.ok().flatten();
        let list = archive.load_project_list().await.unwrap_or_default();
        assert!(current.is_none());
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn corrupt_record_surfaces_serialization_error() {
        let backend = MemoryStore::new();
        backend
            .set(keys::CURRENT_PROJECT, "not json".to_string())
            .await
            .ok();
        let archive = Archive::new(backend);

        let result = archive.load_current_project().await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
