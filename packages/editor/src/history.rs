//! # Version History
//!
//! Linear sequence of tree snapshots with a cursor.
//!
//! ## Design
//!
//! - `versions[cursor]` is the current snapshot
//! - Commit discards everything after the cursor, appends, and advances
//! - Amend overwrites the current snapshot (keystrokes within one field edit)
//! - Finalizing an amend drops the current snapshot when it equals its
//!   predecessor, so an edit that was typed and then reverted leaves no trace
//! - Undo/redo only move the cursor; snapshots are never mutated
//!
//! ## Example
//!
//! ```rust
//! use prooftree_core::{IdGenerator, ProofTree};
//! use prooftree_editor::History;
//!
//! let mut ids = IdGenerator::new("doc");
//! let blank = ProofTree::blank(&mut ids);
//! let mut history = History::new(blank.clone());
//!
//! let mut edited = blank.clone();
//! edited.root_mut().conclusion.value = "A".to_string();
//! history.commit(edited);
//!
//! assert!(history.undo());
//! assert_eq!(history.current(), &blank);
//! assert!(history.redo());
//! ```

use prooftree_core::ProofTree;
use tracing::debug;

/// Undo/redo history of proof tree snapshots
#[derive(Debug)]
pub struct History {
    /// All retained versions, oldest first (never empty)
    versions: Vec<ProofTree>,

    /// Index of the current version
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history holding only `initial`, with unlimited undo levels
    pub fn new(initial: ProofTree) -> Self {
        Self::with_max_levels(initial, 0)
    }

    /// Create a history with custom max levels
    pub fn with_max_levels(initial: ProofTree, max_levels: usize) -> Self {
        Self {
            versions: vec![initial],
            cursor: 0,
            max_levels,
        }
    }

    pub fn current(&self) -> &ProofTree {
        &self.versions[self.cursor]
    }

    /// Record `snapshot` as a new undo step, abandoning any redo branch
    pub fn commit(&mut self, snapshot: ProofTree) {
        let abandoned = self.versions.len() - 1 - self.cursor;
        self.versions.truncate(self.cursor + 1);
        self.versions.push(snapshot);
        self.cursor += 1;

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.versions.len() > self.max_levels + 1 {
            let excess = self.versions.len() - (self.max_levels + 1);
            self.versions.drain(..excess);
            self.cursor -= excess;
        }

        debug!(cursor = self.cursor, versions = self.versions.len(), abandoned, "Committed version");
    }

    /// Replace the current snapshot without creating an undo step
    pub fn amend(&mut self, snapshot: ProofTree) {
        self.versions[self.cursor] = snapshot;
    }

    /// Drop the current snapshot if it is identical to the previous one.
    ///
    /// Returns `true` when a version was dropped.
    pub fn finalize_amend(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        if self.versions[self.cursor] != self.versions[self.cursor - 1] {
            return false;
        }

        self.versions.remove(self.cursor);
        self.cursor -= 1;
        debug!(cursor = self.cursor, "Collapsed no-op edit");
        true
    }

    /// Step back one version. Returns `false` when nothing can be undone.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "Undo");
        true
    }

    /// Step forward one version. Returns `false` when nothing can be redone.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.versions.len()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.versions.len() - 1 - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Always false: a history holds at least its initial version
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn version(&self, index: usize) -> Option<&ProofTree> {
        self.versions.get(index)
    }
}
