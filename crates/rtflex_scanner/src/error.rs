//! Errors raised before scanning begins.
//!
//! Document content never produces an error; only an argument that is not a
//! character sequence does.

use rtflex_diagnostics::{messages, Diagnostic};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The argument is not a character sequence the scanner accepts.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Why an argument was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Bytes that do not decode as UTF-8.
    #[error("source is not valid UTF-8 (invalid sequence at byte {valid_up_to}).")]
    Utf8 { valid_up_to: usize },

    /// A dynamically typed value that is not a string.
    #[error("expected a string, found {found}.")]
    NotText { found: &'static str },
}

impl ScanError {
    /// Convert into an error diagnostic for reporting next to scan warnings.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScanError::InvalidInput(reason) => {
                Diagnostic::new(&messages::INVALID_INPUT, &[&reason.to_string()])
            }
        }
    }
}
