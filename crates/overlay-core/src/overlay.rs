//! Highlight overlay recomputation.
//!
//! The overlay manager owns the set of highlight ranges layered on top of
//! plain text: the current-line tint and, when the cursor sits on a
//! bracket, the bracket pair emphasis. The set is recomputed on every
//! cursor move and **replaced wholesale**; it is never merged with the
//! previous set, so there is no stale-state risk and recomputation is
//! idempotent between cursor moves.

use crate::document::TextDocument;
use crate::scanner;
use std::ops::Range;

/// Visual style tag for a highlight range. The host maps these to actual
/// colors/attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStyle {
    /// Soft full-width background tint on the line containing the cursor.
    CurrentLine,
    /// Distinct emphasis on a bracket character and its match.
    BracketMatch,
}

/// A single highlight: a half-open character range plus its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Anchor range in character offsets (`start..end`).
    pub range: Range<usize>,
    /// Style tag the host renders with.
    pub style: HighlightStyle,
}

/// Recomputes and owns the active highlight set.
#[derive(Debug, Default)]
pub struct OverlayManager {
    current: Vec<Highlight>,
}

impl OverlayManager {
    /// Create a manager with an empty highlight set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active highlight set, as last computed.
    pub fn highlights(&self) -> &[Highlight] {
        &self.current
    }

    /// Recompute the highlight set for the document's current cursor.
    ///
    /// - Editable documents always get the current-line highlight.
    /// - If the character at the cursor is a bracket, the scanner runs and a
    ///   successful match adds one-character highlights on both ends.
    ///
    /// The bracket check reads the raw character only and does not consult
    /// lexical state: a bracket sitting inside a string or comment still
    /// triggers a scan, which then succeeds or fails under the scanner's own
    /// lexical tracking. Out-of-range cursors and failed scans degrade to
    /// the current-line highlight alone.
    pub fn recompute(&mut self, document: &TextDocument) {
        let mut next = Vec::new();

        if !document.is_read_only() {
            let line = document.line_of_offset(document.cursor());
            if let Some(range) = document.line_range(line) {
                next.push(Highlight {
                    range,
                    style: HighlightStyle::CurrentLine,
                });
            }
        }

        let pos = document.cursor();
        if let Some(bracket_pair) = Self::matched_pair(document, pos) {
            let (origin, matched) = bracket_pair;
            next.push(Highlight {
                range: origin..origin + 1,
                style: HighlightStyle::BracketMatch,
            });
            next.push(Highlight {
                range: matched..matched + 1,
                style: HighlightStyle::BracketMatch,
            });
        }

        self.current = next;
    }

    fn matched_pair(document: &TextDocument, pos: usize) -> Option<(usize, usize)> {
        let ch = document.char_at(pos)?;
        if !scanner::is_bracket(ch) {
            return None;
        }
        let text = document.text();
        let matched = scanner::find_match(&text, pos)?;
        Some((pos, matched))
    }
}
