//! The RTF body scanner.
//!
//! A single left-to-right pass over the source with at most two bytes of
//! lookahead. Literal characters accumulate in a pending text run that is
//! flushed as one `Text` token right before any other token is emitted, and
//! at the end of input.

use crate::char_codes::*;
use crate::error::{InputError, ScanError};
use crate::token::{Token, TokenInfo};
use log::{debug, trace};
use rtflex_core::text::TextSpan;
use rtflex_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use serde_json::Value;

/// The result of scanning one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// Tokens in source order, each with the span it was scanned from.
    pub tokens: Vec<TokenInfo>,
    /// Non-fatal anomalies that were normalized during the scan.
    pub diagnostics: DiagnosticCollection,
}

impl ScanOutput {
    /// Drop the spans and keep the bare tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens.into_iter().map(Token::from).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().map(|info| &info.token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The scanner converts an RTF body into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current byte position in the text. Always on a char boundary.
    pos: usize,
    /// Literal characters not yet emitted.
    pending: String,
    /// Byte range of the pending text run in the source.
    pending_start: usize,
    pending_end: usize,
    /// Tokens emitted so far.
    tokens: Vec<TokenInfo>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            pending: String::new(),
            pending_start: 0,
            pending_end: 0,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Create a scanner over raw bytes, rejecting anything that is not UTF-8.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ScanError> {
        let text = simdutf8::compat::from_utf8(bytes).map_err(|e| InputError::Utf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        Ok(Self::new(text))
    }

    /// Create a scanner over a dynamically typed value, which must be a string.
    pub fn from_value(value: &'a Value) -> Result<Self, ScanError> {
        match value {
            Value::String(text) => Ok(Self::new(text)),
            other => Err(InputError::NotText {
                found: value_kind(other),
            }
            .into()),
        }
    }

    /// The source text being scanned.
    pub fn source(&self) -> &'a str {
        self.text
    }

    /// Get the full source text length in bytes.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the whole source.
    pub fn scan(mut self) -> ScanOutput {
        while let Some(ch) = self.current_char() {
            match ch {
                OPEN_BRACE => {
                    let start = self.pos;
                    self.pos += 1;
                    self.emit(Token::GroupOpen, start);
                }
                CLOSE_BRACE => {
                    let start = self.pos;
                    self.pos += 1;
                    self.emit(Token::GroupClose, start);
                }
                BACKSLASH => self.scan_backslash(),
                TAB => {
                    let start = self.pos;
                    self.pos += 1;
                    self.emit(Token::word("tab"), start);
                }
                // Unescaped line breaks only wrap the markup; they carry no content.
                LINE_FEED | CARRIAGE_RETURN => self.pos += 1,
                _ => self.scan_text_run(),
            }
        }
        self.flush_text();

        debug!(
            "scanned {} bytes into {} tokens ({} diagnostics)",
            self.text.len(),
            self.tokens.len(),
            self.diagnostics.len()
        );

        ScanOutput {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    /// The character starting at byte `pos`, if `pos` is a char boundary.
    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Copy a run of literal characters into the pending text.
    fn scan_text_run(&mut self) {
        let start = self.pos;
        let text = self.text;
        debug_assert!(!is_special_byte(text.as_bytes()[start]));
        let end = start + find_special_byte(&text.as_bytes()[start..]);
        self.pos = end;
        self.append_str(start, &text[start..end]);
    }

    fn scan_backslash(&mut self) {
        let start = self.pos;
        match self.char_at(start + 1) {
            None => {
                self.pos += 1;
                self.diagnostics.add(Diagnostic::with_span(
                    TextSpan::new(start, 1),
                    &messages::TRAILING_BACKSLASH,
                    &[],
                ));
                self.append_char(start, BACKSLASH);
            }
            Some(ch) if is_letter(ch) => self.scan_control_word(start),
            Some(ch) if is_escapable_literal(ch) => {
                self.pos += 2;
                self.append_char(start, ch);
            }
            Some(ch) if is_line_break(ch) => {
                self.pos += 2;
                self.emit(Token::word("par"), start);
            }
            Some(ch) => {
                self.pos += 1 + ch.len_utf8();
                if is_digit(ch) {
                    self.diagnostics.add(Diagnostic::with_span(
                        TextSpan::from_bounds(start, self.pos),
                        &messages::DIGIT_CONTROL_SYMBOL,
                        &[&ch.to_string()],
                    ));
                }
                self.emit(Token::symbol(ch), start);
            }
        }
    }

    /// Scan `\name[-]digits[ ]` starting at the backslash.
    fn scan_control_word(&mut self, start: usize) {
        let name_start = start + 1;
        let mut end = name_start;
        while self.byte_at(end).is_some_and(|b| is_letter(b as char)) {
            end += 1;
        }
        let text = self.text;
        let name = &text[name_start..end];
        self.pos = end;

        let parameter = self.scan_parameter(name);

        // A single space delimits the word and belongs to it.
        if self.byte_at(self.pos) == Some(SPACE as u8) {
            self.pos += 1;
        }

        self.emit(
            Token::ControlWord {
                name: name.to_string(),
                parameter,
            },
            start,
        );
    }

    /// Scan an optional signed decimal parameter directly after a name.
    ///
    /// A `-` that is not followed by a digit is left in place.
    fn scan_parameter(&mut self, name: &str) -> Option<i32> {
        let start = self.pos;
        let mut end = start;
        if self.byte_at(end) == Some(MINUS as u8) {
            end += 1;
        }
        let digits_start = end;
        while self.byte_at(end).is_some_and(|b| is_digit(b as char)) {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        self.pos = end;

        let text = self.text;
        let literal = &text[start..end];
        match literal.parse::<i32>() {
            Ok(value) => Some(value),
            Err(_) => {
                // Only overflow can fail here: the literal is `-?[0-9]+`.
                let clamped = if digits_start > start { i32::MIN } else { i32::MAX };
                self.diagnostics.add(Diagnostic::with_span(
                    TextSpan::from_bounds(start, end),
                    &messages::PARAMETER_OUT_OF_RANGE,
                    &[literal, name, &clamped.to_string()],
                ));
                Some(clamped)
            }
        }
    }

    // ========================================================================
    // Token emission
    // ========================================================================

    /// Add literal content ending at the current position to the pending run.
    fn append_str(&mut self, start: usize, literal: &str) {
        self.extend_pending(start);
        self.pending.push_str(literal);
    }

    fn append_char(&mut self, start: usize, ch: char) {
        self.extend_pending(start);
        self.pending.push(ch);
    }

    fn extend_pending(&mut self, start: usize) {
        if self.pending.is_empty() {
            self.pending_start = start;
        }
        self.pending_end = self.pos;
    }

    fn flush_text(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let span = TextSpan::from_bounds(self.pending_start, self.pending_end);
        let token = Token::Text {
            content: std::mem::take(&mut self.pending),
        };
        self.push(TokenInfo::new(token, span));
    }

    /// Emit a non-text token spanning `start..pos`, flushing pending text first.
    fn emit(&mut self, token: Token, start: usize) {
        self.flush_text();
        self.push(TokenInfo::new(token, TextSpan::from_bounds(start, self.pos)));
    }

    fn push(&mut self, info: TokenInfo) {
        trace!("{} at {:?}", info.token, info.span);
        self.tokens.push(info);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Scan an RTF body into tokens.
///
/// Total over all strings: malformed constructs fall back to literal text.
pub fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source).scan().into_tokens()
}

/// Scan raw bytes, failing with [`ScanError::InvalidInput`] if they are not UTF-8.
pub fn scan_bytes(source: &[u8]) -> Result<Vec<Token>, ScanError> {
    Ok(Scanner::from_bytes(source)?.scan().into_tokens())
}

/// Scan a dynamically typed value, failing with [`ScanError::InvalidInput`]
/// unless it is a string.
pub fn scan_value(value: &Value) -> Result<Vec<Token>, ScanError> {
    Ok(Scanner::from_value(value)?.scan().into_tokens())
}
