//! Editor surface: the composition hosts embed.
//!
//! An [`EditorSurface`] owns one [`TextDocument`] together with the
//! auto-pairing filter, the overlay manager, and the gutter metrics, and
//! keeps them consistent: every mutating or cursor-moving operation
//! recomputes the highlight overlay before returning, so by the time the
//! host repaints, the overlay reflects the new state. Document listeners
//! (registered via [`TextDocument::subscribe`]) fire synchronously inside
//! the mutation, before the overlay recompute.
//!
//! The surface boundary is deliberately small: hosts push character input
//! and cursor moves in, and read text, highlights, and gutter paint lists
//! back out. File I/O, processes, and anything network-shaped stay on the
//! host side of this line.

use crate::autopair::{AutoPairFilter, InputDisposition};
use crate::document::TextDocument;
use crate::gutter::{self, GutterMetrics, GutterStrip, PaintRegion};
use crate::overlay::{Highlight, OverlayManager};
use crate::viewport::ViewportGeometry;
use overlay_core_lang::PairTable;

/// One editable text surface with overlays, gutter sizing, and auto-pairing.
///
/// # Example
///
/// ```rust
/// use overlay_core::EditorSurface;
///
/// let mut surface = EditorSurface::new();
/// surface.handle_char('(');
/// assert_eq!(surface.text(), "()");
/// // The cursor sits between the pair and on a bracket, so the overlay
/// // holds the current-line tint plus both bracket highlights... once the
/// // cursor is on the bracket itself:
/// surface.set_cursor(0);
/// assert_eq!(surface.highlights().len(), 3);
/// ```
pub struct EditorSurface {
    document: TextDocument,
    overlay: OverlayManager,
    filter: AutoPairFilter,
    gutter_metrics: GutterMetrics,
}

impl EditorSurface {
    /// Create an empty surface with default pair table and cell metrics.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a surface over initial text.
    pub fn from_text(text: &str) -> Self {
        let document = TextDocument::from_text(text);
        let mut overlay = OverlayManager::new();
        overlay.recompute(&document);
        Self {
            document,
            overlay,
            filter: AutoPairFilter::new(),
            gutter_metrics: GutterMetrics::default(),
        }
    }

    /// Replace the auto-pairing table.
    pub fn set_pairs(&mut self, pairs: PairTable) {
        self.filter = AutoPairFilter::with_pairs(pairs);
    }

    /// Replace the gutter font metrics.
    pub fn set_gutter_metrics(&mut self, metrics: GutterMetrics) {
        self.gutter_metrics = metrics;
    }

    /// The underlying document (read access).
    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Mutable access to the underlying document, for hosts that need to
    /// edit outside the surface operations. Call
    /// [`recompute_highlights`](Self::recompute_highlights) afterwards to
    /// bring the overlay back in sync.
    pub fn document_mut(&mut self) -> &mut TextDocument {
        &mut self.document
    }

    /// Route one character of keyboard input through the auto-pairing
    /// filter, falling back to default handling (plain insertion at the
    /// cursor) when the filter passes the event through.
    ///
    /// The returned disposition reports which path ran; in both cases the
    /// document has already been updated and the overlay recomputed.
    pub fn handle_char(&mut self, ch: char) -> InputDisposition {
        let disposition = self.filter.filter(&mut self.document, ch);
        if disposition == InputDisposition::Passthrough {
            let mut buf = [0u8; 4];
            self.document.insert_at_cursor(ch.encode_utf8(&mut buf));
        }
        self.overlay.recompute(&self.document);
        disposition
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.document.insert_at_cursor("\n");
        self.overlay.recompute(&self.document);
    }

    /// Delete the character before the cursor, if any.
    pub fn backspace(&mut self) {
        let cursor = self.document.cursor();
        if cursor > 0 {
            self.document.delete(cursor - 1..cursor);
        }
        self.overlay.recompute(&self.document);
    }

    /// Delete the character after the cursor, if any.
    pub fn delete_forward(&mut self) {
        let cursor = self.document.cursor();
        if cursor < self.document.len_chars() {
            self.document.delete(cursor..cursor + 1);
        }
        self.overlay.recompute(&self.document);
    }

    /// Current cursor offset.
    pub fn cursor(&self) -> usize {
        self.document.cursor()
    }

    /// Move the cursor to `offset` (clamped) and recompute the overlay.
    pub fn set_cursor(&mut self, offset: usize) {
        self.document.set_cursor(offset);
        self.overlay.recompute(&self.document);
    }

    /// Move the cursor by a relative amount and recompute the overlay.
    pub fn move_cursor(&mut self, delta: isize) {
        self.document.move_cursor(delta);
        self.overlay.recompute(&self.document);
    }

    /// Full text snapshot (the host boundary for saving).
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// Replace the whole document text (the host boundary for loading).
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
        self.overlay.recompute(&self.document);
    }

    /// Recompute the highlight overlay against the current document state.
    ///
    /// Idempotent between cursor moves; the previous set is replaced, never
    /// appended to.
    pub fn recompute_highlights(&mut self) {
        self.overlay.recompute(&self.document);
    }

    /// The active highlight set.
    pub fn highlights(&self) -> &[Highlight] {
        self.overlay.highlights()
    }

    /// Gutter width for the current line count, in host units.
    pub fn gutter_width(&self) -> usize {
        self.gutter_metrics.width_for(self.document.line_count())
    }

    /// Paint the gutter for `region` against the host's viewport geometry.
    pub fn paint_gutter<V: ViewportGeometry>(
        &self,
        viewport: &V,
        region: PaintRegion,
    ) -> GutterStrip {
        gutter::paint(&self.gutter_metrics, viewport, region)
    }
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new()
    }
}
