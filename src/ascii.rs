//! ASCII character predicates used by the parser and the number codec.
//!
//! All functions are total over `char`; anything outside ASCII is simply
//! rejected by the predicates and left untouched by [`to_upper`].

/// Returns `true` for every character in the ASCII range `'-'..='9'`.
///
/// This covers the decimal digits and the minus sign, but also `.` and `/`.
/// Callers that need strict digits must use [`is_digit`].
#[must_use]
pub fn is_digit_or_sign(c: char) -> bool {
    ('-'..='9').contains(&c)
}

#[must_use]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[must_use]
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[must_use]
pub fn is_alnum(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

/// Printable ASCII, `' '` through `'~'` inclusive.
#[must_use]
pub fn is_printable(c: char) -> bool {
    (' '..='~').contains(&c)
}

/// Only space and line feed count; tabs and carriage returns do not.
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\n'
}

#[must_use]
pub fn to_upper(c: char) -> char {
    c.to_ascii_uppercase()
}

/// Strips leading [`is_whitespace`] characters.
pub(crate) fn skip_whitespace(text: &str) -> &str {
    text.trim_start_matches(is_whitespace)
}
