pub mod check;
pub mod fmt;
pub mod replay;

pub use check::{check, CheckArgs};
pub use fmt::{fmt, FmtArgs};
pub use replay::{replay, ReplayArgs};

use anyhow::{anyhow, Context, Result};
use prooftree_core::format_errors;
use prooftree_editor::{EditSession, EditorConfig, EditorError};
use std::fs;
use std::path::Path;

/// Extensions picked up when a directory is given
pub const PRFTREE_EXTENSIONS: &[&str] = &["prf", "tex"];

/// Open a session on a markup file, rendering parse errors against the source
pub fn load_session(path: &Path, config: &EditorConfig) -> Result<EditSession> {
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    match EditSession::from_markup(&source, config) {
        Ok(session) => Ok(session),
        Err(EditorError::Parse(err)) => Err(anyhow!(
            "Failed to parse {}\n{}",
            path.display(),
            format_errors(&source, &path.to_string_lossy(), &[err])
        )),
        Err(err) => Err(err.into()),
    }
}
