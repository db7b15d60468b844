//! Plain-text find over a document snapshot.
//!
//! Queries are literal text (regex-escaped before compilation), matched
//! case-sensitively or not, optionally restricted to whole words. All
//! public offsets are character offsets; byte mapping stays internal.
//! Searches do not wrap: a host that wants wrap-around restarts from the
//! document start explicitly.

use regex::{Regex, RegexBuilder};

/// Options that control how a find is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, matching is case-sensitive.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (ASCII-alphanumeric and `_`
    /// count as word characters).
    pub whole_word: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
        }
    }
}

/// A find result, as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Match length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for an empty range.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The escaped query failed to compile (should not happen for literal
    /// queries; kept for the internal compile path).
    InvalidPattern(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern(err) => write!(f, "Invalid search pattern: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

/// Character-offset to byte-offset mapping for one text snapshot.
struct OffsetMap {
    char_to_byte: Vec<usize>,
}

impl OffsetMap {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self { char_to_byte }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    fn to_byte(&self, char_offset: usize) -> usize {
        self.char_to_byte[char_offset.min(self.char_count())]
    }

    fn to_char(&self, byte_offset: usize) -> usize {
        match self.char_to_byte.binary_search(&byte_offset) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}

fn compile(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(SearchError::InvalidPattern)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn whole_word_at(text: &str, map: &OffsetMap, m: SearchMatch) -> bool {
    let before = m
        .start
        .checked_sub(1)
        .and_then(|i| text[map.to_byte(i)..].chars().next());
    let after = if m.end < map.char_count() {
        text[map.to_byte(m.end)..].chars().next()
    } else {
        None
    };
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find the next occurrence of `query` at or after `from_char`.
///
/// Returns `Ok(None)` for an empty query or when nothing matches between
/// `from_char` and the end of the text.
pub fn find_next(
    text: &str,
    query: &str,
    options: SearchOptions,
    from_char: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile(query, options)?;
    let map = OffsetMap::new(text);
    let mut start_char = from_char.min(map.char_count());

    while let Some(m) = re.find_at(text, map.to_byte(start_char)) {
        let candidate = SearchMatch {
            start: map.to_char(m.start()),
            end: map.to_char(m.end()),
        };
        if options.whole_word && !whole_word_at(text, &map, candidate) {
            if candidate.end >= map.char_count() {
                return Ok(None);
            }
            start_char = candidate.start + 1;
            continue;
        }
        return Ok(Some(candidate));
    }

    Ok(None)
}

/// Find the last occurrence of `query` that ends at or before `from_char`.
pub fn find_prev(
    text: &str,
    query: &str,
    options: SearchOptions,
    from_char: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile(query, options)?;
    let map = OffsetMap::new(text);
    let limit = map.to_byte(from_char.min(map.char_count()));

    let mut last = None;
    for m in re.find_iter(&text[..limit]) {
        let candidate = SearchMatch {
            start: map.to_char(m.start()),
            end: map.to_char(m.end()),
        };
        if options.whole_word && !whole_word_at(text, &map, candidate) {
            continue;
        }
        last = Some(candidate);
    }

    Ok(last)
}

/// Find every occurrence of `query` in `text`, in document order.
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile(query, options)?;
    let map = OffsetMap::new(text);

    Ok(re
        .find_iter(text)
        .map(|m| SearchMatch {
            start: map.to_char(m.start()),
            end: map.to_char(m.end()),
        })
        .filter(|m| !options.whole_word || whole_word_at(text, &map, *m))
        .collect())
}
