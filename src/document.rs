use crate::error::LineError;
use crate::parser::Decoder;
use crate::section::{Entry, Section, Value};

/// A complete decode pass, grouped by section.
///
/// Repeated headers are merged into the first section of that name, and decoding errors are
/// kept alongside the entries instead of aborting the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
    errors: Vec<LineError>,
}

impl Document {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Decoder::new(text).collect()
    }

    /// Sections in order of first appearance. Entries before any header form a section with an
    /// empty name.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name() == name)
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section)?.get(key)
    }

    #[must_use]
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, entry: Entry) {
        // Duplicate section names are merged rather than repeated.
        if let Some(section) = self
            .sections
            .iter_mut()
            .find(|section| section.name() == entry.section())
        {
            section.push(entry);
        } else {
            let name = entry.section().to_owned();
            self.sections.push(Section::new(name, vec![entry]));
        }
    }
}

impl FromIterator<Result<Entry, LineError>> for Document {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<Entry, LineError>>,
    {
        let mut document = Self::default();

        for result in iter {
            match result {
                Ok(entry) => document.push(entry),
                Err(error) => document.errors.push(error),
            }
        }

        document
    }
}
