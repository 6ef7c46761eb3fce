//! rtflex_diagnostics: Diagnostic messages and reporting infrastructure.
//!
//! The scanner never fails on document content. Anomalies it normalizes
//! (a trailing backslash, an out-of-range parameter) are recorded here as
//! non-fatal diagnostics so callers can surface them next to the token
//! stream.

use rtflex_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// The source span this diagnostic refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_span")]
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

fn serialize_span<S: serde::Serializer>(
    span: &Option<TextSpan>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match span {
        Some(span) => serializer.collect_seq([span.start, span.end()]),
        None => serializer.serialize_none(),
    }
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic attached to a source span.
    pub fn with_span(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach a file name, consuming and returning the diagnostic.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} RTF{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Suggestion, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Suggestion, message: $msg }
        };
    }

    // ========================================================================
    // Scanner anomalies (1000-1099)
    // ========================================================================
    pub const TRAILING_BACKSLASH: DiagnosticMessage = diag!(1001, Warning, "Backslash at end of input was kept as literal text.");
    pub const PARAMETER_OUT_OF_RANGE: DiagnosticMessage = diag!(1002, Warning, "Parameter '{0}' of control word '\\{1}' is out of range and was clamped to {2}.");
    pub const DIGIT_CONTROL_SYMBOL: DiagnosticMessage = diag!(1003, Suggestion, "'\\{0}' was scanned as a control symbol; control words must start with a letter.");

    // ========================================================================
    // Input errors (1100-1199)
    // ========================================================================
    pub const INVALID_INPUT: DiagnosticMessage = diag!(1100, Error, "Invalid input: {0}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let text = format_message("'{0}' then '{1}'", &["a", "b"]);
        assert_eq!(text, "'a' then 'b'");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_span(
            TextSpan::new(7, 1),
            &messages::TRAILING_BACKSLASH,
            &[],
        )
        .in_file("doc.rtf");
        assert_eq!(
            diag.to_string(),
            "doc.rtf(7): warning RTF1001: Backslash at end of input was kept as literal text."
        );
        assert!(!diag.is_error());
    }

    #[test]
    fn test_parameter_message_args() {
        let diag = Diagnostic::new(
            &messages::PARAMETER_OUT_OF_RANGE,
            &["99999999999", "fs", "2147483647"],
        );
        assert_eq!(
            diag.message_text,
            "Parameter '99999999999' of control word '\\fs' is out of range and was clamped to 2147483647."
        );
    }

    #[test]
    fn test_collection() {
        let mut diags = DiagnosticCollection::new();
        assert!(diags.is_empty());
        diags.add(Diagnostic::new(&messages::TRAILING_BACKSLASH, &[]));
        assert!(!diags.has_errors());
        diags.add(Diagnostic::new(&messages::INVALID_INPUT, &["not a string"]));
        assert!(diags.has_errors());
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.iter().filter(|d| d.is_error()).count(), 1);
    }

    #[test]
    fn test_serialize_span_as_pair() {
        let diag = Diagnostic::with_span(TextSpan::new(3, 2), &messages::DIGIT_CONTROL_SYMBOL, &["1"]);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["span"], serde_json::json!([3, 5]));
        assert_eq!(json["category"], "suggestion");
        assert_eq!(json["code"], 1003);
        assert!(json.get("file").is_none());
    }
}
