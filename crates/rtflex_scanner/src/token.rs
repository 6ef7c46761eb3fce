//! Tokens produced by the scanner.

use rtflex_core::text::TextSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lexical token of an RTF body.
///
/// Tokens are plain values: they carry no source positions and compare by
/// structure. Use [`TokenInfo`] when the originating span is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// `{`: entry into a nested group.
    GroupOpen,
    /// `}`: exit from a nested group.
    GroupClose,
    /// A backslash, one or more ASCII letters, and an optional signed
    /// decimal parameter, e.g. `\b`, `\fs20`, `\li-360`.
    ControlWord {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameter: Option<i32>,
    },
    /// A backslash followed by a single non-letter character, e.g. `\*`.
    ControlSymbol { symbol: char },
    /// A maximal run of literal characters.
    Text { content: String },
}

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    GroupOpen,
    GroupClose,
    ControlWord,
    ControlSymbol,
    Text,
}

impl Token {
    /// A control word without a parameter.
    pub fn word(name: impl Into<String>) -> Self {
        Token::ControlWord {
            name: name.into(),
            parameter: None,
        }
    }

    /// A control word with a numeric parameter.
    pub fn word_with_param(name: impl Into<String>, parameter: i32) -> Self {
        Token::ControlWord {
            name: name.into(),
            parameter: Some(parameter),
        }
    }

    pub fn symbol(symbol: char) -> Self {
        Token::ControlSymbol { symbol }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Token::Text {
            content: content.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::GroupOpen => TokenKind::GroupOpen,
            Token::GroupClose => TokenKind::GroupClose,
            Token::ControlWord { .. } => TokenKind::ControlWord,
            Token::ControlSymbol { .. } => TokenKind::ControlSymbol,
            Token::Text { .. } => TokenKind::Text,
        }
    }

    #[inline]
    pub fn is_group_open(&self) -> bool {
        matches!(self, Token::GroupOpen)
    }

    #[inline]
    pub fn is_group_close(&self) -> bool {
        matches!(self, Token::GroupClose)
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::GroupOpen => write!(f, "GroupOpen"),
            Token::GroupClose => write!(f, "GroupClose"),
            Token::ControlWord {
                name,
                parameter: None,
            } => write!(f, "ControlWord({})", name),
            Token::ControlWord {
                name,
                parameter: Some(parameter),
            } => write!(f, "ControlWord({}, {})", name, parameter),
            Token::ControlSymbol { symbol } => write!(f, "ControlSymbol({:?})", symbol),
            Token::Text { content } => write!(f, "Text({:?})", content),
        }
    }
}

/// A token together with the source bytes it was scanned from.
///
/// A control word's span includes the space delimiter it consumed. A text
/// span runs from its first to its last literal character, so it covers any
/// unescaped line breaks discarded in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub token: Token,
    pub span: TextSpan,
}

impl TokenInfo {
    pub fn new(token: Token, span: TextSpan) -> Self {
        Self { token, span }
    }

    /// The length of the scanned source in bytes.
    pub fn len(&self) -> usize {
        self.span.length
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

impl From<TokenInfo> for Token {
    fn from(info: TokenInfo) -> Self {
        info.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Token::GroupOpen.to_string(), "GroupOpen");
        assert_eq!(Token::word("par").to_string(), "ControlWord(par)");
        assert_eq!(Token::word_with_param("fs", 20).to_string(), "ControlWord(fs, 20)");
        assert_eq!(Token::symbol('*').to_string(), "ControlSymbol('*')");
        assert_eq!(Token::text("a \"b\"").to_string(), r#"Text("a \"b\"")"#);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Token::GroupClose.kind(), TokenKind::GroupClose);
        assert_eq!(Token::word("b").kind(), TokenKind::ControlWord);
        assert_eq!(Token::symbol('~').kind(), TokenKind::ControlSymbol);
        assert!(Token::text("x").is_text());
        assert!(Token::GroupOpen.is_group_open());
        assert!(!Token::GroupOpen.is_group_close());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Token::word_with_param("li", -360)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "control_word", "name": "li", "parameter": -360 })
        );

        let json = serde_json::to_value(Token::word("pard")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "control_word", "name": "pard" }));

        let back: Token = serde_json::from_value(serde_json::json!({ "kind": "group_open" })).unwrap();
        assert_eq!(back, Token::GroupOpen);
    }
}
