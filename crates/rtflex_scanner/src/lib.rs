//! rtflex_scanner: Lexer for Rich Text Format document bodies.
//!
//! Turns an in-memory RTF body into an ordered sequence of tokens for a
//! structural parser to consume:
//! - Group delimiters `{` and `}`
//! - Control words with optional signed parameters (`\fs20`, `\li-360`)
//! - Control symbols (`\*`, `\~`)
//! - Text runs, with `\\`, `\{` and `\}` unescaped into them
//!
//! The whole source is scanned in one call. Nothing in the document content
//! makes a scan fail; only input that is not a string is rejected.

mod char_codes;
mod error;
mod scanner;
mod token;

pub use error::{InputError, ScanError};
pub use scanner::{scan, scan_bytes, scan_value, ScanOutput, Scanner};
pub use token::{Token, TokenInfo, TokenKind};
