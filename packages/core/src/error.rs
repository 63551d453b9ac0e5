//! Error types for the proof tree core

use crate::ast::{FieldId, NodeId};
use crate::lexer::TokenSpan;
use thiserror::Error;

/// Result type for markup reading
pub type ParseResult<T> = Result<T, ParseError>;

/// Markup reader error with location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: TokenSpan,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Unknown option [{option}] at {span:?}")]
    UnknownOption { span: TokenSpan, option: String },

    #[error("Lexer error at {span:?}: {message}")]
    LexError { span: TokenSpan, message: String },
}

impl ParseError {
    pub fn span(&self) -> Option<TokenSpan> {
        match self {
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::UnknownOption { span, .. } => Some(*span),
            ParseError::LexError { span, .. } => Some(*span),
        }
    }

    /// Short message for the error label
    pub fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
            ParseError::UnexpectedEof { expected } => format!("expected {}", expected),
            ParseError::UnknownOption { option, .. } => format!("unknown option '{}'", option),
            ParseError::LexError { message, .. } => message.clone(),
        }
    }
}

/// Violation of a tree snapshot's structural invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("Root node has a parent: {0}")]
    RootHasParent(NodeId),

    #[error("Duplicate node ID: {0}")]
    DuplicateNodeId(NodeId),

    #[error("Duplicate field ID: {0}")]
    DuplicateFieldId(FieldId),

    #[error("Node {node} is an assumption of {expected} but points at {found:?}")]
    ParentMismatch {
        node: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_errors(source: &str, filename: &str, errors: &[ParseError]) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();

    for error in errors {
        let span = error.span().unwrap_or(TokenSpan {
            start: source.len().saturating_sub(1),
            end: source.len(),
        });

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_color(Color::Red)
                    .with_message(error.label()),
            )
            .finish();

        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            output.extend_from_slice(error.to_string().as_bytes());
            output.push(b'\n');
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}

/// Plain rendering used when ariadne is disabled
#[cfg(not(feature = "pretty-errors"))]
pub fn format_errors(_source: &str, filename: &str, errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}\n", filename, error))
        .collect()
}
