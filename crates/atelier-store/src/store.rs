//! In-memory holder for the currently edited project.

use atelier_types::Project;
use chrono::Utc;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

/// Owns the single canonical [`Project`] value for an editing session.
///
/// The store never mutates the project itself. Callers derive a new
/// project with the pure operators in [`crate::ops`] and install it
/// with [`ProjectStore::replace`], which stamps `last_modified`.
#[derive(Debug, Default)]
pub struct ProjectStore {
    current: Option<Project>,
}

impl ProjectStore {
    /// Creates an empty store with no project loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Loads a project into the store, replacing any previous one.
    pub fn open(&mut self, project: Project) {
        tracing::debug!(project_id = %project.id, name = %project.name, "project opened");
        self.current = Some(project);
    }

    /// Returns the current project, if one is loaded.
    #[must_use]
    pub const fn get(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Installs a new project value and stamps its modification time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoProject`] when no project has been
    /// opened yet; `replace` is for updating an existing session, not
    /// for loading one.
    pub fn replace(&mut self, mut project: Project) -> Result<(), StoreError> {
        if self.current.is_none() {
            return Err(StoreError::NoProject);
        }
        project.last_modified = Utc::now();
        self.current = Some(project);
        Ok(())
    }

    /// Unloads the current project.
    pub fn close(&mut self) -> Option<Project> {
        self.current.take()
    }

    /// Whether a project is currently loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
