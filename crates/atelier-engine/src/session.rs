//! Editing session wiring: store, history, and problem detection.
//!
//! The session enforces the mutation ordering every edit path follows:
//! install the new project in the store, commit a snapshot, then rescan
//! problems from the committed state. Undo and redo push the restored
//! component list back through the same store-then-rescan path, but
//! bypass `commit` so they never invalidate forward history.

use atelier_history::HistoryManager;
use atelier_problems::scan;
use atelier_store::ProjectStore;
use atelier_types::{Problem, Project, Snapshot, SnapshotId};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One editing session over a single project.
#[derive(Debug, Default)]
pub struct Session {
    store: ProjectStore,
    history: HistoryManager,
    problems: Vec<Problem>,
}

impl Session {
    /// Creates a session sized from the engine configuration.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            store: ProjectStore::new(),
            history: HistoryManager::with_capacity(config.history.window),
            problems: Vec::new(),
        }
    }

    /// Opens a project, committing its initial state and scanning it.
    pub fn open(&mut self, project: Project) {
        self.history.commit(&project, "project opened", false);
        self.store.open(project);
        self.rescan();
    }

    /// The current project, if one is open.
    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        self.store.get()
    }

    /// Problems found by the most recent scan.
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// The underlying history manager.
    #[must_use]
    pub const fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Pauses snapshot recording; edits still apply.
    pub const fn pause_recording(&mut self) {
        self.history.pause();
    }

    /// Resumes snapshot recording.
    pub const fn resume_recording(&mut self) {
        self.history.resume();
    }

    // -----------------------------------------------------------------------
    // Edit paths
    // -----------------------------------------------------------------------

    /// Installs an edited project: store, then snapshot, then rescan.
    ///
    /// Returns the committed snapshot id, or `None` while recording is
    /// paused.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when no project is open.
    pub fn apply(
        &mut self,
        project: Project,
        description: &str,
    ) -> Result<Option<SnapshotId>, EngineError> {
        self.store.replace(project)?;
        let snapshot = match self.store.get() {
            Some(current) => self.history.commit(current, description, false),
            None => None,
        };
        self.rescan();
        Ok(snapshot)
    }

    /// Commits an automatic snapshot of the current project.
    ///
    /// Returns `None` when no project is open or recording is paused.
    pub fn autosave_commit(&mut self) -> Option<SnapshotId> {
        let project = self.store.get()?;
        self.history.commit(project, "auto-save", true)
    }

    /// Runs the constraint solver over the current project and installs
    /// the solved layout as a new edit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoProject`] when no project is open.
    pub fn solve_layout(&mut self) -> Result<Option<SnapshotId>, EngineError> {
        let current = self.store.get().ok_or(EngineError::NoProject)?;
        let mut solved = current.clone();
        solved.components = atelier_layout::solve(&current.components);
        self.apply(solved, "layout solved")
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Steps back one snapshot, restoring its components.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::History`] when there is nothing to undo
    /// and [`EngineError::NoProject`] when no project is open.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let components = self.history.undo()?;
        self.restore(components)
    }

    /// Steps forward one snapshot, restoring its components.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::History`] when there is nothing to redo
    /// and [`EngineError::NoProject`] when no project is open.
    pub fn redo(&mut self) -> Result<(), EngineError> {
        let components = self.history.redo()?;
        self.restore(components)
    }

    /// Reads a snapshot by timeline position without changing any state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::History`] for an out-of-range index.
    pub fn preview(&self, index: usize) -> Result<&Snapshot, EngineError> {
        Ok(self.history.jump_to(index)?)
    }

    fn restore(&mut self, components: Vec<atelier_types::Component>) -> Result<(), EngineError> {
        let current = self.store.get().ok_or(EngineError::NoProject)?;
        let mut restored = current.clone();
        restored.components = components;
        self.store.replace(restored)?;
        self.rescan();
        Ok(())
    }

    fn rescan(&mut self) {
        self.problems = self.store.get().map(scan).unwrap_or_default();
        info!(problems = self.problems.len(), "problem scan complete");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
