//! Conformance tests over whole RTF documents.

use pretty_assertions::assert_eq;
use rtflex_scanner::{scan, scan_bytes, Scanner, Token};
use rtflex_tests::{control_words, group_balance, plain_text, CRLF_DOCUMENT, SMALL_DOCUMENT};

#[test]
fn test_small_document() {
    let expected = vec![
        Token::GroupOpen,
        Token::word_with_param("rtf", 1),
        Token::word("ansi"),
        Token::word_with_param("deff", 0),
        Token::GroupOpen,
        Token::word("fonttbl"),
        Token::GroupOpen,
        Token::word_with_param("f", 0),
        Token::word("fnil"),
        Token::word_with_param("fcharset", 0),
        Token::text("Courier New;"),
        Token::GroupClose,
        Token::GroupClose,
        Token::GroupOpen,
        Token::symbol('*'),
        Token::word("generator"),
        Token::text("Msftedit 5.41.15.1516;"),
        Token::GroupClose,
        Token::word_with_param("viewkind", 4),
        Token::word_with_param("uc", 1),
        Token::word("pard"),
        Token::word_with_param("lang", 1033),
        Token::word_with_param("f", 0),
        Token::word_with_param("fs", 20),
        Token::text("My dog is not like other dogs."),
        Token::word("par"),
        Token::text("He doesn't care to walk, "),
        Token::word("par"),
        Token::text("He doesn't bark, he doesn't howl."),
        Token::word("par"),
        Token::text("He goes \"Tick, tock. Tick, tock.\""),
        Token::word("par"),
        Token::GroupClose,
    ];
    let tokens = scan(SMALL_DOCUMENT);
    assert_eq!(tokens.len(), 33);
    assert_eq!(tokens, expected);
}

#[test]
fn test_crlf_document() {
    let expected = vec![
        Token::GroupOpen,
        Token::word_with_param("rtf", 1),
        Token::word("ansi"),
        Token::word_with_param("ansicpg", 1252),
        Token::word_with_param("deff", 0),
        Token::GroupOpen,
        Token::word("colortbl"),
        Token::text(";"),
        Token::word_with_param("red", 255),
        Token::word_with_param("green", 0),
        Token::word_with_param("blue", 0),
        Token::text(";"),
        Token::GroupClose,
        Token::word("pard"),
        Token::word_with_param("li", -360),
        Token::word_with_param("cf", 1),
        Token::text("Price: 5"),
        Token::word_with_param("u", 8364),
        Token::text("?"),
        Token::word("par"),
        Token::text(r"Set {x} and C:\temp"),
        Token::word("tab"),
        Token::text("end"),
        Token::GroupClose,
    ];
    assert_eq!(scan(CRLF_DOCUMENT), expected);
}

#[test]
fn test_documents_have_no_diagnostics() {
    for source in [SMALL_DOCUMENT, CRLF_DOCUMENT] {
        let output = Scanner::new(source).scan();
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    }
}

#[test]
fn test_group_balance() {
    assert_eq!(group_balance(&scan(SMALL_DOCUMENT)), (4, 4));
    assert_eq!(group_balance(&scan(CRLF_DOCUMENT)), (2, 2));
}

#[test]
fn test_plain_text_extraction() {
    let text = plain_text(&scan(SMALL_DOCUMENT));
    assert!(text.starts_with("Courier New;Msftedit"));
    assert!(text.ends_with("He goes \"Tick, tock. Tick, tock.\""));
    assert!(!text.contains('\n'));
}

#[test]
fn test_line_wrapping_does_not_change_tokens() {
    let wrapped = SMALL_DOCUMENT.replace(r"\pard", "\n\\pard").replace(r"{\fonttbl", "\r\n{\\fonttbl");
    assert_eq!(scan(&wrapped), scan(SMALL_DOCUMENT));
}

#[test]
fn test_control_word_names() {
    let tokens = scan(SMALL_DOCUMENT);
    let words = control_words(&tokens);
    assert_eq!(&words[..4], &["rtf", "ansi", "deff", "fonttbl"]);
    assert_eq!(words.iter().filter(|w| **w == "par").count(), 4);
}

#[test]
fn test_bytes_and_str_agree() {
    assert_eq!(scan_bytes(CRLF_DOCUMENT.as_bytes()).unwrap(), scan(CRLF_DOCUMENT));
}

#[test]
fn test_json_round_trip() {
    let tokens = scan(SMALL_DOCUMENT);
    let json = serde_json::to_string(&tokens).unwrap();
    let back: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tokens);
}

#[test]
fn test_concurrent_scans_agree() {
    let expected = scan(SMALL_DOCUMENT);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| scan(SMALL_DOCUMENT)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
