//! Auto-pairing input filter for delimiter characters.
//!
//! Sits between the host's key handling and the document: openers insert
//! their counterpart and park the cursor between the pair, closers typed
//! against an identical character to the right skip over it instead of
//! inserting, and everything else passes through to default handling.

use crate::document::TextDocument;
use overlay_core_lang::PairTable;

/// What the filter did with a character-input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The filter handled the event; the host must not apply its default
    /// input handling on top.
    Consumed,
    /// The event was not touched; default handling applies.
    Passthrough,
}

/// Intercepts character input and inserts/skips delimiter counterparts.
#[derive(Debug, Clone)]
pub struct AutoPairFilter {
    pairs: PairTable,
}

impl AutoPairFilter {
    /// Create a filter with the default C-family pair table.
    pub fn new() -> Self {
        Self {
            pairs: PairTable::default(),
        }
    }

    /// Create a filter with an explicit pair table.
    pub fn with_pairs(pairs: PairTable) -> Self {
        Self { pairs }
    }

    /// The active pair table.
    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// Apply the filter to a character-input event.
    ///
    /// The opener rule is checked first, so symmetric delimiters (quotes)
    /// always insert a fresh pair even when the same character sits to the
    /// right of the cursor.
    pub fn filter(&self, document: &mut TextDocument, ch: char) -> InputDisposition {
        if document.is_read_only() {
            return InputDisposition::Passthrough;
        }

        if let Some(closer) = self.pairs.closer_for(ch) {
            document.insert_at_cursor(&ch.to_string());
            document.insert_at_cursor(&closer.to_string());
            document.move_cursor(-1);
            return InputDisposition::Consumed;
        }

        if self.pairs.is_closer(ch) && document.char_at(document.cursor()) == Some(ch) {
            document.move_cursor(1);
            return InputDisposition::Consumed;
        }

        InputDisposition::Passthrough
    }
}

impl Default for AutoPairFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_inserts_pair_with_cursor_between() {
        let mut doc = TextDocument::new();
        let filter = AutoPairFilter::new();

        let disposition = filter.filter(&mut doc, '(');
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(doc.text(), "()");
        assert_eq!(doc.cursor(), 1);
    }

    #[test]
    fn test_closer_skips_over_existing() {
        let mut doc = TextDocument::from_text("()");
        doc.set_cursor(1);
        let filter = AutoPairFilter::new();

        let disposition = filter.filter(&mut doc, ')');
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(doc.text(), "()");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_closer_without_matching_right_char_passes_through() {
        let mut doc = TextDocument::from_text("(x");
        doc.set_cursor(2);
        let filter = AutoPairFilter::new();

        let disposition = filter.filter(&mut doc, ')');
        assert_eq!(disposition, InputDisposition::Passthrough);
        assert_eq!(doc.text(), "(x");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_ordinary_character_passes_through() {
        let mut doc = TextDocument::new();
        let filter = AutoPairFilter::new();
        assert_eq!(filter.filter(&mut doc, 'a'), InputDisposition::Passthrough);
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_quote_always_inserts_pair() {
        // The opener rule wins for symmetric delimiters: typing " with "
        // already to the right inserts a new pair rather than skipping.
        let mut doc = TextDocument::from_text("\"\"");
        doc.set_cursor(1);
        let filter = AutoPairFilter::new();

        let disposition = filter.filter(&mut doc, '"');
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(doc.text(), "\"\"\"\"");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_pair_insertion_in_middle_of_text() {
        let mut doc = TextDocument::from_text("ab");
        doc.set_cursor(1);
        let filter = AutoPairFilter::new();

        filter.filter(&mut doc, '[');
        assert_eq!(doc.text(), "a[]b");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_angle_bracket_pairs() {
        let mut doc = TextDocument::new();
        let filter = AutoPairFilter::new();
        filter.filter(&mut doc, '<');
        assert_eq!(doc.text(), "<>");
        assert_eq!(doc.cursor(), 1);

        // > to the right is skipped.
        let disposition = filter.filter(&mut doc, '>');
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(doc.text(), "<>");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_read_only_document_is_untouched() {
        let mut doc = TextDocument::from_text("x");
        doc.set_read_only(true);
        let filter = AutoPairFilter::new();
        assert_eq!(filter.filter(&mut doc, '('), InputDisposition::Passthrough);
        assert_eq!(doc.text(), "x");
    }
}
