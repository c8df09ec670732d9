use std::fmt;

use crate::error::NumberError;
use crate::number;

/// Entries that share a section name, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String, entries: Vec<Entry>) -> Self {
        Self { name, entries }
    }

    /// The section name; empty for entries that precede every header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the value of the last entry assigned to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(Entry::value)
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

/// One decoded `key = value` line together with the section it appeared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    section: String,
    key: String,
    value: Value,
}

impl Entry {
    #[must_use]
    pub fn new(section: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Bool(bool),
    Integer(i64),
}

impl Value {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Self::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Renders the value as it would appear after `=`, writing integers in `base` with the
    /// matching literal prefix.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::UnsupportedBase`] for a base outside {2, 8, 10, 16}.
    pub fn render(&self, base: u32) -> Result<String, NumberError> {
        number::base_prefix(base)?;
        match *self {
            Self::Integer(n) => number::format_signed(n, base),
            _ => Ok(self.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => b.fmt(f),
            Self::Integer(n) => n.fmt(f),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_source_form() {
        assert_eq!(Entry::new("", "host", "local").to_string(), "host = \"local\"");
        assert_eq!(Entry::new("", "on", true).to_string(), "on = true");
        assert_eq!(Entry::new("", "n", -3_i64).to_string(), "n = -3");
    }

    #[test]
    fn render_uses_base_for_integers_only() {
        assert_eq!(Value::Integer(255).render(16), Ok("0xFF".to_owned()));
        assert_eq!(Value::Integer(-5).render(2), Ok("-0b101".to_owned()));
        assert_eq!(Value::Bool(false).render(16), Ok("false".to_owned()));
        assert_eq!(Value::from("x").render(8), Ok("\"x\"".to_owned()));
        assert_eq!(
            Value::Bool(true).render(7),
            Err(NumberError::UnsupportedBase { base: 7 })
        );
    }

    #[test]
    fn accessors_are_variant_specific() {
        let value = Value::Integer(1);
        assert_eq!(value.as_integer(), Some(1));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_str(), None);
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
    }

    #[test]
    fn section_lookup_prefers_last_assignment() {
        let section = Section::new(
            "server".to_owned(),
            vec![
                Entry::new("server", "port", 80_i64),
                Entry::new("server", "host", "a"),
                Entry::new("server", "port", 8080_i64),
            ],
        );

        assert_eq!(section.get("port"), Some(&Value::Integer(8080)));
        assert_eq!(section.get("host"), Some(&Value::from("a")));
        assert_eq!(section.get("missing"), None);
    }
}
