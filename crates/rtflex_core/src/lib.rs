//! rtflex_core: Core utilities shared by the rtflex crates.
//!
//! Provides byte-offset text spans and line maps used to attach source
//! locations to scanned tokens and diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
