use thiserror::Error;

/// Failures of the integer and fixed-decimal codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    #[error("unsupported base {base}; expected 2, 8, 10, or 16")]
    UnsupportedBase { base: u32 },
    #[error("invalid digit: {c:?}")]
    InvalidDigit { c: char },
    #[error("number has no digits")]
    Empty,
    #[error("number does not fit in 64 bits")]
    Overflow,
    #[error("output buffer of {capacity} bytes is too small")]
    BufferTooSmall { capacity: usize },
}

/// Failures scoped to a single line of input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid character: {c:?}")]
    InvalidCharacter { c: char },
    #[error("expected a key")]
    MissingKey,
    #[error("key is too long")]
    KeyTooLong,
    #[error("unterminated section header")]
    UnterminatedSection,
    #[error("expected '=' after key")]
    MissingEquals,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("string value is too long")]
    ValueTooLong,
    #[error(transparent)]
    Number(#[from] NumberError),
}

/// A [`ParseError`] tagged with the 1-based line it occurred on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    pub source: ParseError,
}
