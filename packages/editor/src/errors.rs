//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] prooftree_core::ParseError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No node at path {0:?}")]
    PathNotFound(Vec<usize>),

    #[error("No field is focused")]
    NothingFocused,
}
