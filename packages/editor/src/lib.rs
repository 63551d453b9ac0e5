//! # Prooftree Editor
//!
//! Editing engine for proof trees: immutable snapshots, undo/redo history
//! and per-field focus and validity.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ core: tree model, locator, prftree markup   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Mutations produce fresh snapshots        │
//! │  - History with amend/finalize for typing   │
//! │  - Focus and validity reporting             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer (external): FieldPresentation      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are immutable**: every edit builds a new tree
//! 2. **IDs, not references**: callbacks re-locate their target by ID
//! 3. **Stale callbacks are no-ops**: a vanished target is not an error
//!
//! ## Usage
//!
//! ```rust
//! use prooftree_editor::EditSession;
//!
//! let mut session = EditSession::new();
//! let root = session.tree().root().id.clone();
//!
//! let child = session.add_assumption(&root).tree.root().assumptions[0].conclusion.id.clone();
//! session.set_focused_field(Some(child.clone()));
//! session.set_field_value(&child, "A");
//! session.set_focused_field(None);
//!
//! assert_eq!(session.markup(), "\\prftree\n{\n    \\prftree\n    { A }\n}\n{  }\n");
//! assert!(session.undo().can_redo);
//! ```

mod commands;
mod config;
mod errors;
mod focus;
mod history;
mod mutations;
mod presentation;
mod session;
mod validity;

pub use commands::EditCommand;
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use focus::FocusTracker;
pub use history::History;
pub use mutations::{apply_to_field, apply_to_node, Mutation, MutationError, MutationResult};
pub use presentation::{
    is_visible, present_field, present_node, typeset_source, FieldPresentation, PresentationMode, PLACEHOLDER,
};
pub use session::{EditSession, SessionState};
pub use validity::{BraceBalanceChecker, ValidityChecker};

// Re-export common types for convenience
pub use prooftree_core::{FieldId, FieldRole, NodeId, ProofTree};
