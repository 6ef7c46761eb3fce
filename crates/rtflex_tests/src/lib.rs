//! Whole-document fixtures and helpers for the rtflex conformance tests.

use rtflex_scanner::Token;

/// A short WordPad-style document: header, font table, generator
/// destination, and four paragraphs separated by `\par` and line feeds.
pub const SMALL_DOCUMENT: &str = concat!(
    r"{",
    r"\rtf1\ansi\deff0",
    r"{",
    r"\fonttbl",
    r"{",
    r"\f0\fnil\fcharset0 Courier New;",
    r"}",
    r"}",
    r"{",
    r"\*\generator Msftedit 5.41.15.1516;",
    r"}",
    r"\viewkind4\uc1\pard\lang1033\f0\fs20",
    "My dog is not like other dogs.\\par\n",
    "He doesn't care to walk, \\par\n",
    "He doesn't bark, he doesn't howl.\\par\n",
    "He goes \"Tick, tock. Tick, tock.\"\\par",
    r"}",
);

/// The same kind of document with CRLF line endings, a color table, a
/// Unicode escape with its fallback, and escaped braces in the body.
pub const CRLF_DOCUMENT: &str = concat!(
    "{\\rtf1\\ansi\\ansicpg1252\\deff0\r\n",
    "{\\colortbl ;\\red255\\green0\\blue0;}\r\n",
    "\\pard\\li-360\\cf1 Price: 5\\u8364?\\par\r\n",
    "Set \\{x\\} and C:\\\\temp\\tab end\r\n",
    "}",
);

/// Count the group delimiters in a token stream as `(opens, closes)`.
pub fn group_balance(tokens: &[Token]) -> (usize, usize) {
    tokens.iter().fold((0, 0), |(open, close), token| match token {
        Token::GroupOpen => (open + 1, close),
        Token::GroupClose => (open, close + 1),
        _ => (open, close),
    })
}

/// Concatenate the content of every text token.
pub fn plain_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text { content } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}

/// Names of all control words, in order.
pub fn control_words(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::ControlWord { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}
