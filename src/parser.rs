use std::iter::{Enumerate, FusedIterator};

use tracing::{debug, trace};

use crate::ascii;
use crate::error::{LineError, ParseError};
use crate::limits::Limits;
use crate::lines::Lines;
use crate::number;
use crate::section::{Entry, Value};

/// The shape of a single line, before its value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    SectionHeader(&'a str),
    /// `raw_value` starts right after the key, so it still holds the `=`.
    KeyValue { key: &'a str, raw_value: &'a str },
}

/// Line-at-a-time parser that remembers the most recent section header.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    limits: Limits,
    current_section: String,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            current_section: String::new(),
        }
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Name set by the last successful section header; empty before any.
    #[must_use]
    pub fn current_section(&self) -> &str {
        &self.current_section
    }

    /// Parses one line. Section headers update the current section and, like blank lines,
    /// produce no entry.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] from [`Parser::classify_line`] or [`Parser::parse_value`]. A failed
    /// header leaves the current section unchanged.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<Entry>, ParseError> {
        match self.classify_line(line)? {
            LineKind::Blank => Ok(None),
            LineKind::SectionHeader(name) => {
                debug!(section = name, "entering section");
                name.clone_into(&mut self.current_section);
                Ok(None)
            }
            LineKind::KeyValue { key, raw_value } => {
                let value = self.parse_value(raw_value)?;
                Ok(Some(Entry::new(self.current_section.clone(), key, value)))
            }
        }
    }

    /// Decides whether `line` is blank, a `[section]` header, or a `key = value` pair.
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnterminatedSection`] when a header has no `]` within the section limit.
    /// - [`ParseError::MissingKey`] when a line does not start with an alphanumeric key.
    /// - [`ParseError::KeyTooLong`] when the key exceeds the key limit.
    /// - [`ParseError::InvalidCharacter`] for anything else out of place in a header or key.
    pub fn classify_line<'l>(&self, line: &'l str) -> Result<LineKind<'l>, ParseError> {
        let line = ascii::skip_whitespace(line);

        if line.is_empty() {
            return Ok(LineKind::Blank);
        }

        if let Some(rest) = line.strip_prefix('[') {
            return self.parse_section_name(rest).map(LineKind::SectionHeader);
        }

        let (key, raw_value) = self.parse_key(line)?;
        Ok(LineKind::KeyValue { key, raw_value })
    }

    /// Reads the text following `[` up to the closing `]`.
    fn parse_section_name<'l>(&self, text: &'l str) -> Result<&'l str, ParseError> {
        for (i, c) in text.char_indices() {
            if c == ']' {
                // Only whitespace may follow the header.
                return match ascii::skip_whitespace(&text[i + 1..]).chars().next() {
                    Some(c) => Err(ParseError::InvalidCharacter { c }),
                    None => Ok(&text[..i]),
                };
            }

            if i >= self.limits.section {
                return Err(ParseError::UnterminatedSection);
            }

            if !ascii::is_alnum(c) {
                return Err(ParseError::InvalidCharacter { c });
            }
        }

        Err(ParseError::UnterminatedSection)
    }

    /// Splits a line into its key and everything after it.
    fn parse_key<'l>(&self, line: &'l str) -> Result<(&'l str, &'l str), ParseError> {
        let end = line.find(' ').unwrap_or(line.len());
        let (key, rest) = line.split_at(end);

        // Characters before `i` are ASCII alphanumerics, so `i` is also a character count.
        for (i, c) in key.char_indices() {
            if !ascii::is_alnum(c) {
                return Err(if i == 0 {
                    ParseError::MissingKey
                } else {
                    ParseError::InvalidCharacter { c }
                });
            }

            if i >= self.limits.key {
                return Err(ParseError::KeyTooLong);
            }
        }

        // `bad key = 1`: the key ran into a space but the `=` is still further along.
        let after = ascii::skip_whitespace(rest);
        if let Some((before, _)) = after.split_once('=') {
            if !before.is_empty() && !before.contains('"') {
                return Err(ParseError::InvalidCharacter { c: ' ' });
            }
        }

        Ok((key, rest))
    }

    /// Interprets the text after a key: `= "string"`, `= true`, `= false`, or `= <integer>`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingEquals`] when the text does not start with `=`.
    /// - [`ParseError::UnterminatedString`] when a quoted string is not closed on the line.
    /// - [`ParseError::ValueTooLong`] when a quoted string exceeds the string limit.
    /// - [`ParseError::InvalidCharacter`] for non-printable characters inside quotes or text
    ///   after the closing quote.
    /// - [`ParseError::Number`] when the value is parsed as an integer and fails.
    pub fn parse_value(&self, raw_value: &str) -> Result<Value, ParseError> {
        let rest = ascii::skip_whitespace(raw_value)
            .strip_prefix('=')
            .ok_or(ParseError::MissingEquals)?;
        let rest = ascii::skip_whitespace(rest);

        if let Some(quoted) = rest.strip_prefix('"') {
            return self.parse_string(quoted).map(Value::String);
        }

        let token = rest.trim_end_matches(ascii::is_whitespace);
        match token {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Ok(Value::Integer(number::decode_literal(token)?)),
        }
    }

    /// Reads the body of a string whose opening quote has already been consumed.
    fn parse_string(&self, text: &str) -> Result<String, ParseError> {
        let end = text.find('"').ok_or(ParseError::UnterminatedString)?;
        let (body, rest) = text.split_at(end);

        for (i, c) in body.char_indices() {
            if !ascii::is_printable(c) {
                return Err(ParseError::InvalidCharacter { c });
            }

            if i >= self.limits.string {
                return Err(ParseError::ValueTooLong);
            }
        }

        if let Some(c) = ascii::skip_whitespace(&rest[1..]).chars().next() {
            return Err(ParseError::InvalidCharacter { c });
        }

        Ok(body.to_owned())
    }
}

/// Iterator over the entries and line errors of a text buffer.
///
/// Errors are line-local: after yielding one, decoding resumes with the next line.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    lines: Enumerate<Lines<'a>>,
    parser: Parser,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_parser(text, Parser::new())
    }

    #[must_use]
    pub fn with_parser(text: &'a str, parser: Parser) -> Self {
        Self {
            lines: Lines::new(text).enumerate(),
            parser,
        }
    }

    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Entry, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.lines.next()?;
            let line_number = index + 1;

            match self.parser.parse_line(line) {
                Ok(Some(entry)) => {
                    trace!(line = line_number, key = entry.key(), "decoded entry");
                    return Some(Ok(entry));
                }
                Ok(None) => {}
                Err(source) => {
                    debug!(line = line_number, error = %source, "rejected line");
                    return Some(Err(LineError {
                        line: line_number,
                        source,
                    }));
                }
            }
        }
    }
}

impl FusedIterator for Decoder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::NumberError;

    fn value(raw: &str) -> Result<Value, ParseError> {
        Parser::new().parse_value(raw)
    }

    #[test]
    fn classifies_lines() {
        let parser = Parser::new();

        assert_eq!(parser.classify_line(""), Ok(LineKind::Blank));
        assert_eq!(parser.classify_line("    "), Ok(LineKind::Blank));
        assert_eq!(
            parser.classify_line("  [server]"),
            Ok(LineKind::SectionHeader("server"))
        );
        assert_eq!(
            parser.classify_line("port = 8080"),
            Ok(LineKind::KeyValue {
                key: "port",
                raw_value: " = 8080"
            })
        );
    }

    #[test]
    fn section_header_errors() {
        let parser = Parser::new();

        assert_eq!(
            parser.classify_line("[unterminated"),
            Err(ParseError::UnterminatedSection)
        );
        assert_eq!(
            parser.classify_line("[two words]"),
            Err(ParseError::InvalidCharacter { c: ' ' })
        );
        assert_eq!(
            parser.classify_line("[a.b]"),
            Err(ParseError::InvalidCharacter { c: '.' })
        );
        assert_eq!(
            parser.classify_line("[ok] trailing"),
            Err(ParseError::InvalidCharacter { c: 't' })
        );
        assert_eq!(parser.classify_line("[ok]  "), Ok(LineKind::SectionHeader("ok")));
        assert_eq!(parser.classify_line("[]"), Ok(LineKind::SectionHeader("")));
    }

    #[test]
    fn section_name_capacity() {
        let parser = Parser::new();
        let longest = format!("[{}]", "s".repeat(31));
        let too_long = format!("[{}]", "s".repeat(32));

        assert!(matches!(
            parser.classify_line(&longest),
            Ok(LineKind::SectionHeader(name)) if name.len() == 31
        ));
        assert_eq!(
            parser.classify_line(&too_long),
            Err(ParseError::UnterminatedSection)
        );
    }

    #[test]
    fn key_errors() {
        let parser = Parser::new();

        assert_eq!(parser.classify_line("= 1"), Err(ParseError::MissingKey));
        assert_eq!(parser.classify_line("-x = 1"), Err(ParseError::MissingKey));
        assert_eq!(
            parser.classify_line("key! = 1"),
            Err(ParseError::InvalidCharacter { c: '!' })
        );
        assert_eq!(
            parser.classify_line("key=1"),
            Err(ParseError::InvalidCharacter { c: '=' })
        );
        assert_eq!(
            parser.classify_line("bad key! = 1"),
            Err(ParseError::InvalidCharacter { c: ' ' })
        );
        assert_eq!(
            parser.classify_line(&format!("{} = 1", "k".repeat(32))),
            Err(ParseError::KeyTooLong)
        );
        assert!(parser.classify_line(&format!("{} = 1", "k".repeat(31))).is_ok());
    }

    #[test]
    fn custom_limits_apply() {
        let parser = Parser::with_limits(Limits {
            section: 3,
            key: 2,
            string: 4,
        });

        assert_eq!(
            parser.classify_line("[abcd]"),
            Err(ParseError::UnterminatedSection)
        );
        assert_eq!(parser.classify_line("abc = 1"), Err(ParseError::KeyTooLong));
        assert_eq!(
            parser.parse_value("= \"abcde\""),
            Err(ParseError::ValueTooLong)
        );
        assert_eq!(
            parser.parse_value("= \"abcd\""),
            Ok(Value::String("abcd".to_owned()))
        );
    }

    #[test]
    fn parses_values() {
        assert_eq!(value(" = \"local\""), Ok(Value::String("local".to_owned())));
        assert_eq!(value(" = \"\""), Ok(Value::String(String::new())));
        assert_eq!(value(" = \"a = b\"  "), Ok(Value::String("a = b".to_owned())));
        assert_eq!(value(" = true"), Ok(Value::Bool(true)));
        assert_eq!(value("=false "), Ok(Value::Bool(false)));
        assert_eq!(value(" = 8080"), Ok(Value::Integer(8080)));
        assert_eq!(value(" = -12"), Ok(Value::Integer(-12)));
        assert_eq!(value(" = 0xFF"), Ok(Value::Integer(255)));
        assert_eq!(value(" = 0b101"), Ok(Value::Integer(5)));
        assert_eq!(value(" = -0o17"), Ok(Value::Integer(-15)));
    }

    #[test]
    fn value_errors() {
        assert_eq!(value(" 1"), Err(ParseError::MissingEquals));
        assert_eq!(value(""), Err(ParseError::MissingEquals));
        assert_eq!(value(" = \"open"), Err(ParseError::UnterminatedString));
        assert_eq!(
            value(" = \"a\tb\""),
            Err(ParseError::InvalidCharacter { c: '\t' })
        );
        assert_eq!(
            value(" = \"a\" b"),
            Err(ParseError::InvalidCharacter { c: 'b' })
        );
        assert_eq!(
            value(&format!(" = \"{}\"", "x".repeat(64))),
            Err(ParseError::ValueTooLong)
        );
        assert_eq!(
            value(" = trueish"),
            Err(ParseError::Number(NumberError::InvalidDigit { c: 't' }))
        );
        assert_eq!(value(" = "), Err(ParseError::Number(NumberError::Empty)));
        assert_eq!(
            value(" = 0x1G"),
            Err(ParseError::Number(NumberError::InvalidDigit { c: 'G' }))
        );
        assert_eq!(
            value(" = 99999999999999999999"),
            Err(ParseError::Number(NumberError::Overflow))
        );
    }

    #[test]
    fn header_sets_section_for_following_entries() {
        let mut parser = Parser::new();

        assert_eq!(parser.parse_line("a = 1"), Ok(Some(Entry::new("", "a", 1_i64))));
        assert_eq!(parser.parse_line("[db]"), Ok(None));
        assert_eq!(parser.current_section(), "db");
        assert_eq!(parser.parse_line(""), Ok(None));
        assert_eq!(parser.parse_line("b = 2"), Ok(Some(Entry::new("db", "b", 2_i64))));
    }

    #[test]
    fn failed_header_keeps_previous_section() {
        let mut parser = Parser::new();

        parser.parse_line("[first]").unwrap();
        assert_eq!(
            parser.parse_line("[sec ond]"),
            Err(ParseError::InvalidCharacter { c: ' ' })
        );
        assert_eq!(parser.current_section(), "first");
    }

    #[test]
    fn decoder_reports_errors_and_continues() {
        let mut decoder = Decoder::new("a = 1\nb = ?\n[end]\nc = 3");
        let results = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(decoder.parser().current_section(), "end");

        assert_eq!(
            results,
            vec![
                Ok(Entry::new("", "a", 1_i64)),
                Err(LineError {
                    line: 2,
                    source: ParseError::Number(NumberError::InvalidDigit { c: '?' }),
                }),
                Ok(Entry::new("end", "c", 3_i64)),
            ]
        );
    }
}
