//! Tracks which field is being edited.
//!
//! Focus is display state only: it never enters history, and the focused
//! field is always re-located in the current snapshot before use.

use prooftree_core::locator::field_by_id;
use prooftree_core::{FieldId, ProofTree};

#[derive(Debug, Default, Clone)]
pub struct FocusTracker {
    focused: Option<FieldId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self, field_id: FieldId) {
        self.focused = Some(field_id);
    }

    /// Click outside any field
    pub fn clear(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<&FieldId> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, field_id: &FieldId) -> bool {
        self.focused.as_ref() == Some(field_id)
    }

    /// Validity message of the focused field, or an empty string
    pub fn error_message(&self, tree: &ProofTree) -> String {
        self.focused
            .as_ref()
            .and_then(|id| field_by_id(tree.root(), id))
            .and_then(|field| field.validity.message())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prooftree_core::{IdGenerator, Validity};

    #[test]
    fn test_error_message_follows_focus() {
        let mut ids = IdGenerator::new("focus");
        let mut tree = ProofTree::blank(&mut ids);
        tree.root_mut().label.validity = Validity::Invalid("Undefined control sequence".to_string());

        let mut focus = FocusTracker::new();
        assert_eq!(focus.error_message(&tree), "");

        focus.focus(tree.root().conclusion.id.clone());
        assert_eq!(focus.error_message(&tree), "");

        focus.focus(tree.root().label.id.clone());
        assert!(focus.is_focused(&tree.root().label.id));
        assert_eq!(focus.error_message(&tree), "Undefined control sequence");

        focus.clear();
        assert!(focus.focused().is_none());
        assert_eq!(focus.error_message(&tree), "");
    }

    #[test]
    fn test_error_message_for_removed_field() {
        let mut ids = IdGenerator::new("focus");
        let tree = ProofTree::blank(&mut ids);

        let mut focus = FocusTracker::new();
        focus.focus(FieldId::new("removed"));
        assert_eq!(focus.error_message(&tree), "");
    }
}
