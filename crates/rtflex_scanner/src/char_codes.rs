//! Character constants and classification predicates used by the scanner.

pub const BACKSLASH: char = '\\';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';
pub const TAB: char = '\t';
pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const SPACE: char = ' ';
pub const MINUS: char = '-';

/// Bytes that end a run of literal text: the structural characters plus the
/// whitespace-control characters that the body normalizes.
pub const STRUCTURAL_BYTES: [u8; 3] = [b'\\', b'{', b'}'];
pub const WHITESPACE_CONTROL_BYTES: [u8; 3] = [b'\t', b'\n', b'\r'];

/// Check if a character is a line terminator (LF or CR).
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == LINE_FEED || ch == CARRIAGE_RETURN
}

/// Check if a character can appear in a control word name.
#[inline]
pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Characters that a backslash turns into literal text instead of a control.
#[inline]
pub fn is_escapable_literal(ch: char) -> bool {
    matches!(ch, BACKSLASH | OPEN_BRACE | CLOSE_BRACE)
}

/// Whether a byte ends a literal text run.
#[inline]
pub fn is_special_byte(byte: u8) -> bool {
    STRUCTURAL_BYTES.contains(&byte) || WHITESPACE_CONTROL_BYTES.contains(&byte)
}

/// Offset of the first byte in `bytes` that ends a literal text run, or
/// `bytes.len()` if the whole slice is literal.
pub fn find_special_byte(bytes: &[u8]) -> usize {
    let [a, b, c] = STRUCTURAL_BYTES;
    let structural = memchr::memchr3(a, b, c, bytes).unwrap_or(bytes.len());
    let [d, e, f] = WHITESPACE_CONTROL_BYTES;
    memchr::memchr3(d, e, f, &bytes[..structural]).unwrap_or(structural)
}
