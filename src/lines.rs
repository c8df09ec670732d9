use std::iter::FusedIterator;

/// Splits text on `'\n'` without copying.
///
/// Text containing N line feeds yields exactly N + 1 slices: a trailing line feed produces a
/// final empty slice and a last line without one is still yielded.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    data: &'a str,
    /// Byte offset of the next line, `None` once the final line has been produced.
    position: Option<usize>,
}

impl<'a> Lines<'a> {
    #[must_use]
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            position: Some(0),
        }
    }
}

/// Shorthand for [`Lines::new`].
#[must_use]
pub fn scan(text: &str) -> Lines<'_> {
    Lines::new(text)
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.position?;
        let rest = &self.data[start..];

        match rest.find('\n') {
            Some(end) => {
                self.position = Some(start + end + 1);
                Some(&rest[..end])
            }
            None => {
                self.position = None;
                Some(rest)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.position {
            Some(start) => {
                let remaining = self.data.len() - start;
                (1, Some(remaining + 1))
            }
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Lines<'_> {}
