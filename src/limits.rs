/// Longest section name accepted by default.
pub const MAX_SECTION_LEN: usize = 31;

/// Longest key accepted by default.
pub const MAX_KEY_LEN: usize = 31;

/// Longest quoted string accepted by default, excluding the quotes.
pub const MAX_STRING_LEN: usize = 63;

/// Capacities enforced while parsing, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub section: usize,
    pub key: usize,
    pub string: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            section: MAX_SECTION_LEN,
            key: MAX_KEY_LEN,
            string: MAX_STRING_LEN,
        }
    }
}
