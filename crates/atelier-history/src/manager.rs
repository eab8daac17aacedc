//! The history manager: undo/redo stacks over project snapshots.
//!
//! State machine: `Recording <-> Paused`, toggled explicitly and
//! independent of undo/redo availability. While paused, commits are
//! silently dropped; undo, redo, and timeline jumps keep working.
//!
//! The undo stack's last entry is always the *current* state, so undo
//! needs at least two entries: the current one and something to return
//! to. New commits invalidate forward history (the redo stack clears),
//! and the undo stack keeps only a bounded trailing window.

use chrono::Utc;
use tracing::debug;

use atelier_types::{Component, Project, Snapshot, SnapshotId};

use crate::error::HistoryError;

/// Trailing window of retained snapshots.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 50;

/// Snapshot-based undo/redo over a project's component list.
#[derive(Debug)]
pub struct HistoryManager {
    /// Ordered snapshots, oldest first; the last entry is the current state.
    undo_stack: Vec<Snapshot>,
    /// States undone and available for redo, most recently undone last.
    redo_stack: Vec<Snapshot>,
    /// Whether commits are currently captured.
    recording: bool,
    /// Trailing-window size for the undo stack.
    max_snapshots: usize,
}

impl HistoryManager {
    /// Create a recording manager with the default trailing window.
    pub const fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SNAPSHOTS)
    }

    /// Create a recording manager with a custom trailing window.
    ///
    /// A window of 0 is treated as 1: the current state is always kept.
    pub const fn with_capacity(max_snapshots: usize) -> Self {
        let max_snapshots = if max_snapshots == 0 { 1 } else { max_snapshots };
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            recording: true,
            max_snapshots,
        }
    }

    // -----------------------------------------------------------------------
    // Recording toggle
    // -----------------------------------------------------------------------

    /// Stop capturing commits. Undo/redo remain available.
    pub const fn pause(&mut self) {
        self.recording = false;
    }

    /// Resume capturing commits.
    pub const fn resume(&mut self) {
        self.recording = true;
    }

    /// Whether commits are currently captured.
    pub const fn is_recording(&self) -> bool {
        self.recording
    }

    // -----------------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------------

    /// Capture a snapshot of the project's components.
    ///
    /// Deep-copies the component list, appends to the undo stack, clears
    /// the redo stack, and prunes the trailing window. Returns `None`
    /// when recording is paused.
    pub fn commit(
        &mut self,
        project: &Project,
        description: &str,
        auto: bool,
    ) -> Option<SnapshotId> {
        if !self.recording {
            debug!(project = %project.id, "recording paused, commit dropped");
            return None;
        }

        let snapshot = Snapshot {
            id: SnapshotId::new(),
            timestamp: Utc::now(),
            components: project.components.clone(),
            description: description.to_owned(),
            auto,
        };
        let id = snapshot.id;

        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        self.prune();

        debug!(
            project = %project.id,
            snapshot = %id,
            auto,
            retained = self.undo_stack.len(),
            "snapshot committed"
        );
        Some(id)
    }

    /// Discard snapshots beyond the trailing window, oldest first.
    fn prune(&mut self) {
        if self.undo_stack.len() > self.max_snapshots {
            let excess = self.undo_stack.len().saturating_sub(self.max_snapshots);
            self.undo_stack.drain(..excess);
        }
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Step back one snapshot and return the components to restore.
    ///
    /// Pops the current state onto the redo stack and returns a copy of
    /// the state below it.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NoHistory`] when fewer than two snapshots
    /// are retained (the current state plus one prior).
    pub fn undo(&mut self) -> Result<Vec<Component>, HistoryError> {
        if self.undo_stack.len() < 2 {
            return Err(HistoryError::NoHistory {
                context: format!(
                    "undo needs the current state plus one prior, have {}",
                    self.undo_stack.len()
                ),
            });
        }

        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }

        self.undo_stack
            .last()
            .map(|snapshot| snapshot.components.clone())
            .ok_or_else(|| HistoryError::NoHistory {
                context: "undo stack emptied unexpectedly".to_owned(),
            })
    }

    /// Step forward one snapshot and return the components to restore.
    ///
    /// Pops the most recently undone state and re-commits it as the
    /// current state.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NoHistory`] when nothing has been undone.
    pub fn redo(&mut self) -> Result<Vec<Component>, HistoryError> {
        let snapshot = self.redo_stack.pop().ok_or_else(|| HistoryError::NoHistory {
            context: "redo stack is empty".to_owned(),
        })?;

        let components = snapshot.components.clone();
        self.undo_stack.push(snapshot);
        self.prune();
        Ok(components)
    }

    /// Whether an undo step is currently possible.
    pub const fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    /// Whether a redo step is currently possible.
    pub const fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // -----------------------------------------------------------------------
    // Timeline
    // -----------------------------------------------------------------------

    /// Random access into the retained snapshot list, oldest first.
    ///
    /// Jumping previews a past state without touching the undo/redo
    /// stacks: scrubbing the timeline does not rewrite forward history
    /// until the user commits a new change from that point.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::IndexOutOfRange`] for an invalid index.
    pub fn jump_to(&self, index: usize) -> Result<&Snapshot, HistoryError> {
        self.undo_stack
            .get(index)
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.undo_stack.len(),
            })
    }

    /// The retained snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    /// Number of retained snapshots.
    pub const fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Whether any snapshot is retained.
    pub const fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use atelier_types::{Component, ComponentType};
    use rust_decimal::Decimal;

    use super::*;

    /// A project whose single component's x position encodes a version.
    fn project_version(project: &mut Project, version: i64) {
        let component = Component::new(ComponentType::Text, "Marker")
            .at(Decimal::from(version), Decimal::ZERO);
        project.components = vec![component];
    }

    fn version_of(components: &[Component]) -> Option<Decimal> {
        components.first().map(|c| c.x)
    }

    #[test]
    fn commit_returns_snapshot_id() {
        let mut history = HistoryManager::new();
        let project = Project::new("Commits");
        assert!(history.commit(&project, "initial", false).is_some());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn paused_recording_drops_commits() {
        let mut history = HistoryManager::new();
        let project = Project::new("Paused");

        history.pause();
        assert!(!history.is_recording());
        assert!(history.commit(&project, "dropped", false).is_none());
        assert!(history.is_empty());

        history.resume();
        assert!(history.commit(&project, "captured", false).is_some());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_requires_two_snapshots() {
        let mut history = HistoryManager::new();
        assert!(matches!(history.undo(), Err(HistoryError::NoHistory { .. })));

        let project = Project::new("One");
        history.commit(&project, "only", false);
        assert!(!history.can_undo());
        assert!(matches!(history.undo(), Err(HistoryError::NoHistory { .. })));
    }

    #[test]
    fn redo_requires_prior_undo() {
        let mut history = HistoryManager::new();
        assert!(matches!(history.redo(), Err(HistoryError::NoHistory { .. })));
    }

    #[test]
    fn undo_returns_prior_state() {
        let mut history = HistoryManager::new();
        let mut project = Project::new("Undo");

        project_version(&mut project, 1);
        history.commit(&project, "v1", false);
        project_version(&mut project, 2);
        history.commit(&project, "v2", false);

        let restored = history.undo();
        assert!(restored.is_ok());
        assert_eq!(
            restored.ok().as_deref().and_then(version_of),
            Some(Decimal::from(1))
        );
        assert!(history.can_redo());
    }

    #[test]
    fn new_commit_clears_redo() {
        let mut history = HistoryManager::new();
        let mut project = Project::new("Fork");

        project_version(&mut project, 1);
        history.commit(&project, "v1", false);
        project_version(&mut project, 2);
        history.commit(&project, "v2", false);

        assert!(history.undo().is_ok());
        assert!(history.can_redo());

        project_version(&mut project, 3);
        history.commit(&project, "v3", false);
        assert!(!history.can_redo());
        assert!(matches!(history.redo(), Err(HistoryError::NoHistory { .. })));
    }

    #[test]
    fn undo_redo_round_trip_law() {
        // For N commits: N-1 undos followed by N-1 redos lands back on
        // the state captured by the Nth commit.
        let n: i64 = 7;
        let mut history = HistoryManager::new();
        let mut project = Project::new("Round trip");

        for version in 1..=n {
            project_version(&mut project, version);
            history.commit(&project, &format!("v{version}"), false);
        }

        for _ in 1..n {
            assert!(history.undo().is_ok());
        }

        let mut last = None;
        for _ in 1..n {
            let redone = history.redo();
            assert!(redone.is_ok());
            last = redone.ok();
        }

        assert_eq!(last.as_deref().and_then(version_of), Some(Decimal::from(n)));
        assert!(!history.can_redo());
    }

    #[test]
    fn sixty_commits_retain_most_recent_fifty() {
        let mut history = HistoryManager::new();
        let mut project = Project::new("Pruned");

        for version in 1..=60 {
            project_version(&mut project, version);
            history.commit(&project, &format!("v{version}"), false);
        }

        assert_eq!(history.len(), 50);
        // Oldest retained is v11, newest is v60, in commit order.
        let versions: Vec<Option<Decimal>> = history
            .snapshots()
            .iter()
            .map(|s| version_of(&s.components))
            .collect();
        assert_eq!(versions.first(), Some(&Some(Decimal::from(11))));
        assert_eq!(versions.last(), Some(&Some(Decimal::from(60))));
    }

    #[test]
    fn jump_to_leaves_stacks_untouched() {
        let mut history = HistoryManager::new();
        let mut project = Project::new("Timeline");

        for version in 1..=3 {
            project_version(&mut project, version);
            history.commit(&project, &format!("v{version}"), false);
        }

        let preview = history.jump_to(0);
        assert!(preview.is_ok());
        assert_eq!(
            preview.ok().map(|s| version_of(&s.components)),
            Some(Some(Decimal::from(1)))
        );

        // Neither stack moved: undo still walks back from v3.
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.undo().ok().as_deref().and_then(version_of),
            Some(Decimal::from(2))
        );
    }

    #[test]
    fn jump_to_out_of_range_errors() {
        let history = HistoryManager::new();
        assert!(matches!(
            history.jump_to(5),
            Err(HistoryError::IndexOutOfRange { index: 5, len: 0 })
        ));
    }

    #[test]
    fn auto_commits_are_tagged() {
        let mut history = HistoryManager::new();
        let project = Project::new("Autosave");
        history.commit(&project, "auto-save", true);
        assert_eq!(history.snapshots().first().map(|s| s.auto), Some(true));
    }
}
