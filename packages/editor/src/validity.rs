//! Seam for the external math checker.
//!
//! The real checker is the typesetter itself and reports asynchronously
//! through [`EditSession::report_validation`](crate::EditSession::report_validation).
//! [`BraceBalanceChecker`] is a synchronous, purely syntactic stand-in.

/// Checks whether a field's text is acceptable math source
pub trait ValidityChecker {
    fn check(&self, tex: &str) -> Result<(), String>;
}

/// Accepts text whose braces balance, treating `\{` and `\}` as literals
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceBalanceChecker;

impl ValidityChecker for BraceBalanceChecker {
    fn check(&self, tex: &str) -> Result<(), String> {
        let mut depth = 0usize;
        let mut chars = tex.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if chars.next().is_none() {
                        return Err("Dangling backslash at end of input".to_string());
                    }
                }
                '{' => depth += 1,
                '}' => {
                    if depth == 0 {
                        return Err("Extra close brace or missing open brace".to_string());
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }

        if depth > 0 {
            return Err("Missing close brace".to_string());
        }
        Ok(())
    }
}
