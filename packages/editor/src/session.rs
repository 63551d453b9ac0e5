//! # Edit Session
//!
//! One user's editing session: the version history, the ID generator that
//! feeds it, and the focus state of the field being edited.
//!
//! Every affordance returns a [`SessionState`] with the current snapshot and
//! undo/redo availability. Targets are addressed by ID and re-located in the
//! current snapshot; a target that has disappeared makes the call a silent
//! no-op, since callbacks may arrive after the node or field was removed.
//!
//! ## Field edits
//!
//! The first keystroke in a field commits a new version; further keystrokes
//! in the same field amend it. Leaving the field (blur, focusing another
//! field, undo/redo or a structural edit) finalizes the edit, dropping it
//! entirely if the text ended up unchanged.

use crate::config::EditorConfig;
use crate::focus::FocusTracker;
use crate::history::History;
use crate::mutations::Mutation;
use crate::presentation::{present_field, present_node, FieldPresentation};
use crate::validity::ValidityChecker;
use crate::EditorError;
use prooftree_core::locator::field_by_id;
use prooftree_core::{read_markup, serialize, FieldId, IdGenerator, NodeId, ProofTree, Validity};
use tracing::{debug, info};

/// Snapshot and control availability after an operation
#[derive(Debug, Clone, Copy)]
pub struct SessionState<'a> {
    pub tree: &'a ProofTree,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Whether the operation had any effect
    pub changed: bool,
}

/// Single-user proof tree editing session
#[derive(Debug)]
pub struct EditSession {
    history: History,
    ids: IdGenerator,
    focus: FocusTracker,

    /// Field whose edit is currently being amended
    open_edit: Option<FieldId>,
}

impl EditSession {
    /// Session starting from a single blank node
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        let mut ids = IdGenerator::new(&config.session_seed);
        let initial = ProofTree::blank(&mut ids);
        Self::start(initial, ids, config)
    }

    /// Session starting from existing prftree markup
    pub fn from_markup(source: &str, config: &EditorConfig) -> Result<Self, EditorError> {
        let mut ids = IdGenerator::new(&config.session_seed);
        let initial = read_markup(source, &mut ids)?;
        Ok(Self::start(initial, ids, config))
    }

    fn start(initial: ProofTree, ids: IdGenerator, config: &EditorConfig) -> Self {
        info!(
            seed = %ids.seed(),
            nodes = initial.node_count(),
            history_limit = config.history_limit,
            "Started edit session"
        );

        Self {
            history: History::with_max_levels(initial, config.history_limit),
            ids,
            focus: FocusTracker::new(),
            open_edit: None,
        }
    }

    pub fn tree(&self) -> &ProofTree {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> SessionState<'_> {
        self.state_with(false)
    }

    fn state_with(&self, changed: bool) -> SessionState<'_> {
        SessionState {
            tree: self.history.current(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            changed,
        }
    }

    /// Current snapshot as prftree markup
    pub fn markup(&self) -> String {
        serialize(self.history.current())
    }

    pub fn add_assumption(&mut self, node_id: &NodeId) -> SessionState<'_> {
        let changed = self.commit_mutation(Mutation::AddAssumption {
            node_id: node_id.clone(),
        });
        self.state_with(changed)
    }

    pub fn remove_assumption(&mut self, node_id: &NodeId) -> SessionState<'_> {
        let changed = self.commit_mutation(Mutation::RemoveAssumption {
            node_id: node_id.clone(),
        });
        self.state_with(changed)
    }

    pub fn cycle_line_style(&mut self, node_id: &NodeId) -> SessionState<'_> {
        let changed = self.commit_mutation(Mutation::CycleLineStyle {
            node_id: node_id.clone(),
        });
        self.state_with(changed)
    }

    /// Keystroke in a field: first change commits, later ones amend
    pub fn set_field_value(&mut self, field_id: &FieldId, text: &str) -> SessionState<'_> {
        let unchanged = field_by_id(self.history.current().root(), field_id).map(|field| field.value == text);
        match unchanged {
            None => {
                debug!(field = %field_id, "Ignoring edit of missing field");
                return self.state_with(false);
            }
            Some(true) => return self.state_with(false),
            Some(false) => {}
        }

        let continuing = self.open_edit.as_ref() == Some(field_id);
        if !continuing {
            self.close_edit();
        }

        let mutation = Mutation::SetFieldValue {
            field_id: field_id.clone(),
            value: text.to_string(),
        };

        match mutation.apply(self.history.current(), &mut self.ids) {
            Ok(result) if continuing => self.history.amend(result.tree),
            Ok(result) => {
                self.history.commit(result.tree);
                self.open_edit = Some(field_id.clone());
            }
            Err(err) => {
                debug!(error = %err, "Ignoring field edit");
                return self.state_with(false);
            }
        }

        self.state_with(true)
    }

    /// Blur: finalize the open edit on `field_id`, if any
    pub fn commit_field_edit(&mut self, field_id: &FieldId) -> SessionState<'_> {
        let collapsed = if self.open_edit.as_ref() == Some(field_id) {
            self.close_edit()
        } else {
            false
        };
        self.state_with(collapsed)
    }

    pub fn undo(&mut self) -> SessionState<'_> {
        self.close_edit();
        let changed = self.history.undo();
        self.state_with(changed)
    }

    pub fn redo(&mut self) -> SessionState<'_> {
        self.close_edit();
        let changed = self.history.redo();
        self.state_with(changed)
    }

    /// Move focus to a field, or clear it with `None`
    pub fn set_focused_field(&mut self, field_id: Option<FieldId>) -> SessionState<'_> {
        if self.open_edit.is_some() && self.open_edit != field_id {
            self.close_edit();
        }

        match field_id {
            Some(id) => self.focus.focus(id),
            None => self.focus.clear(),
        }
        self.state_with(false)
    }

    pub fn focused_field(&self) -> Option<&FieldId> {
        self.focus.focused()
    }

    /// Error text for the focused field, empty when there is none
    pub fn error_message(&self) -> String {
        self.focus.error_message(self.history.current())
    }

    /// Result of the external checker for a field.
    ///
    /// Amends the current snapshot; reports for fields that no longer
    /// exist are dropped.
    pub fn report_validation(&mut self, field_id: &FieldId, result: Result<(), String>) -> SessionState<'_> {
        let validity = match result {
            Ok(()) => Validity::Valid,
            Err(message) => Validity::Invalid(message),
        };

        let Some(field) = field_by_id(self.history.current().root(), field_id) else {
            debug!(field = %field_id, "Dropping stale validation report");
            return self.state_with(false);
        };
        if field.validity == validity {
            return self.state_with(false);
        }

        let mutation = Mutation::SetFieldValidity {
            field_id: field_id.clone(),
            validity,
        };
        match mutation.apply(self.history.current(), &mut self.ids) {
            Ok(result) => {
                self.history.amend(result.tree);
                self.state_with(true)
            }
            Err(err) => {
                debug!(error = %err, "Dropping validation report");
                self.state_with(false)
            }
        }
    }

    pub fn on_validation_error(&mut self, field_id: &FieldId, message: impl Into<String>) -> SessionState<'_> {
        self.report_validation(field_id, Err(message.into()))
    }

    pub fn on_validation_success(&mut self, field_id: &FieldId) -> SessionState<'_> {
        self.report_validation(field_id, Ok(()))
    }

    /// Run `checker` on a field's current text and record the outcome
    pub fn check_field(&mut self, field_id: &FieldId, checker: &dyn ValidityChecker) -> SessionState<'_> {
        let Some(field) = field_by_id(self.history.current().root(), field_id) else {
            return self.state_with(false);
        };
        let result = checker.check(&field.value);
        self.report_validation(field_id, result)
    }

    /// Run `checker` on every field of the current snapshot
    pub fn check_all_fields(&mut self, checker: &dyn ValidityChecker) -> SessionState<'_> {
        let field_ids: Vec<FieldId> = self
            .history
            .current()
            .field_ids()
            .into_iter()
            .cloned()
            .collect();

        let mut changed = false;
        for field_id in &field_ids {
            changed |= self.check_field(field_id, checker).changed;
        }
        self.state_with(changed)
    }

    pub fn present_field(&self, field_id: &FieldId) -> Option<FieldPresentation> {
        present_field(self.history.current(), &self.focus, field_id)
    }

    pub fn present_node(&self, node_id: &NodeId) -> Vec<FieldPresentation> {
        present_node(self.history.current(), &self.focus, node_id)
    }

    fn commit_mutation(&mut self, mutation: Mutation) -> bool {
        self.close_edit();

        match mutation.apply(self.history.current(), &mut self.ids) {
            Ok(result) => {
                self.history.commit(result.tree);
                true
            }
            Err(err) => {
                debug!(error = %err, "Ignoring edit");
                false
            }
        }
    }

    /// Finalize the open field edit. Returns `true` if it collapsed to nothing.
    fn close_edit(&mut self) -> bool {
        let Some(field_id) = self.open_edit.take() else {
            return false;
        };
        let collapsed = self.history.finalize_amend();
        debug!(field = %field_id, collapsed, "Closed field edit");
        collapsed
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validity::BraceBalanceChecker;

    #[test]
    fn test_session_creation() {
        let session = EditSession::new();
        let state = session.state();

        assert_eq!(state.tree.node_count(), 1);
        assert!(!state.can_undo);
        assert!(!state.can_redo);
        assert!(session.focused_field().is_none());
        assert_eq!(session.markup(), "\\prftree\n{  }\n");
    }

    #[test]
    fn test_typing_creates_one_undo_step() {
        let mut session = EditSession::new();
        let field = session.tree().root().conclusion.id.clone();

        session.set_focused_field(Some(field.clone()));
        for text in ["A", "A ", "A \\", "A \\land", "A \\land B"] {
            session.set_field_value(&field, text);
        }
        let state = session.commit_field_edit(&field);

        assert!(state.can_undo);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.tree().root().conclusion.value, "A \\land B");

        session.undo();
        assert_eq!(session.tree().root().conclusion.value, "");
    }

    #[test]
    fn test_reverted_typing_leaves_no_history() {
        let mut session = EditSession::new();
        let field = session.tree().root().label.id.clone();

        session.set_focused_field(Some(field.clone()));
        session.set_field_value(&field, "1");
        session.set_field_value(&field, "");
        assert_eq!(session.history().len(), 2);

        let state = session.commit_field_edit(&field);
        assert!(state.changed);
        assert!(!state.can_undo);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_same_value_is_no_op() {
        let mut session = EditSession::new();
        let field = session.tree().root().label.id.clone();

        let state = session.set_field_value(&field, "");
        assert!(!state.changed);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_switching_fields_finalizes_edit() {
        let mut session = EditSession::new();
        let label = session.tree().root().label.id.clone();
        let rule = session.tree().root().rule_name.id.clone();

        session.set_focused_field(Some(label.clone()));
        session.set_field_value(&label, "1");
        session.set_focused_field(Some(rule.clone()));
        session.set_field_value(&rule, "E");
        session.set_field_value(&rule, "E_1");
        session.set_focused_field(None);

        assert_eq!(session.history().len(), 3);
        session.undo();
        assert_eq!(session.tree().root().label.value, "1");
        assert_eq!(session.tree().root().rule_name.value, "");
    }

    #[test]
    fn test_stale_targets_are_ignored() {
        let mut session = EditSession::new();
        let root = session.tree().root().id.clone();
        let child = session.add_assumption(&root).tree.root().assumptions[0].clone();

        session.remove_assumption(&child.id);
        let versions = session.history().len();

        assert!(!session.set_field_value(&child.conclusion.id, "x").changed);
        assert!(!session.on_validation_error(&child.conclusion.id, "bad").changed);
        assert!(!session.cycle_line_style(&child.id).changed);
        assert!(!session.add_assumption(&child.id).changed);
        assert_eq!(session.history().len(), versions);
    }

    #[test]
    fn test_removing_root_is_ignored() {
        let mut session = EditSession::new();
        let root = session.tree().root().id.clone();
        let state = session.remove_assumption(&root);
        assert!(!state.changed);
        assert!(!state.can_undo);
    }

    #[test]
    fn test_validation_amends_without_new_version() {
        let mut session = EditSession::new();
        let field = session.tree().root().conclusion.id.clone();

        session.set_focused_field(Some(field.clone()));
        session.set_field_value(&field, "\\frac{");
        let state = session.on_validation_error(&field, "Missing close brace");
        assert!(state.changed);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.error_message(), "Missing close brace");

        // Repeating the same report changes nothing
        assert!(!session.on_validation_error(&field, "Missing close brace").changed);

        session.set_field_value(&field, "\\frac{a}{b}");
        session.on_validation_success(&field);
        assert_eq!(session.error_message(), "");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_check_all_fields() {
        let mut session = EditSession::new();
        let label = session.tree().root().label.id.clone();
        session.set_field_value(&label, "{");
        session.commit_field_edit(&label);

        let state = session.check_all_fields(&BraceBalanceChecker);
        assert!(state.changed);
        assert!(!session.tree().root().label.validity.is_valid());
        assert!(session.tree().root().conclusion.validity.is_valid());
    }

    #[test]
    fn test_undo_closes_open_edit() {
        let mut session = EditSession::new();
        let field = session.tree().root().conclusion.id.clone();

        session.set_focused_field(Some(field.clone()));
        session.set_field_value(&field, "A");
        session.undo();
        assert_eq!(session.tree().root().conclusion.value, "");

        // Typing again starts a fresh step instead of overwriting the initial version
        session.set_field_value(&field, "B");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().version(0).unwrap().root().conclusion.value, "");
    }

    #[test]
    fn test_from_markup() {
        let session = EditSession::from_markup("\\prftree[r]{E}\n{ B }\n", &EditorConfig::default()).unwrap();
        assert_eq!(session.tree().root().rule_name.value, "E");
        assert_eq!(session.markup(), "\\prftree[r]{E}\n{ B }\n");

        let err = EditSession::from_markup("\\prftree", &EditorConfig::default()).unwrap_err();
        assert!(matches!(err, EditorError::Parse(_)));
    }
}
