//! Line-number gutter geometry and headless painting.
//!
//! The gutter is sized from the document's line count and painted as a
//! headless span list the host draws: one right-aligned 1-based line number
//! per visible text line. Geometry is recomputed on every paint from the
//! viewport's current state; nothing is cached between paints.

use crate::viewport::ViewportGeometry;

/// Host font metrics used to size the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterMetrics {
    /// Fixed padding added to the digit columns, in host units.
    pub fixed_margin: usize,
    /// Width of one digit glyph, in host units.
    pub digit_width: usize,
}

impl GutterMetrics {
    /// Create metrics from explicit host measurements.
    pub fn new(fixed_margin: usize, digit_width: usize) -> Self {
        Self {
            fixed_margin,
            digit_width,
        }
    }

    /// Metrics for character-cell hosts (terminals): one cell per digit,
    /// one cell of padding.
    pub fn cells() -> Self {
        Self::new(1, 1)
    }

    /// Gutter width for a document of `line_count` lines.
    ///
    /// The width grows by one digit column exactly when the line count
    /// crosses a power of ten (9 to 10, 99 to 100, ...). The host applies
    /// this as its viewport left margin so text never overlaps the gutter.
    pub fn width_for(&self, line_count: usize) -> usize {
        self.fixed_margin + self.digit_width * digit_count(line_count.max(1))
    }
}

impl Default for GutterMetrics {
    fn default() -> Self {
        Self::cells()
    }
}

/// Number of decimal digits in `max(1, n)`.
pub fn digit_count(n: usize) -> usize {
    let mut digits = 1;
    let mut rest = n.max(1);
    while rest >= 10 {
        rest /= 10;
        digits += 1;
    }
    digits
}

/// Vertical region to repaint, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRegion {
    /// Top edge (inclusive).
    pub top: isize,
    /// Bottom edge (inclusive).
    pub bottom: isize,
}

impl PaintRegion {
    /// Create a paint region.
    pub fn new(top: isize, bottom: isize) -> Self {
        Self { top, bottom }
    }
}

/// One painted line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterSpan {
    /// 1-based line number to draw, right-aligned within the gutter width.
    pub line_number: usize,
    /// Top edge of the line's extent, in viewport coordinates.
    pub top: isize,
    /// Bottom edge of the line's extent.
    pub bottom: isize,
}

/// Headless result of one gutter paint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterStrip {
    /// Gutter width the spans were computed for.
    pub width: usize,
    /// Visible line-number spans, top to bottom.
    pub spans: Vec<GutterSpan>,
}

/// Paint the gutter for the given region.
///
/// Walks visible lines from the first one intersecting the region,
/// accumulating each line's vertical extent from the viewport's heights and
/// scroll translation; emits a span for every line whose extent intersects
/// the region and stops once a line's top passes the region bottom.
pub fn paint<V: ViewportGeometry>(
    metrics: &GutterMetrics,
    viewport: &V,
    region: PaintRegion,
) -> GutterStrip {
    let width = metrics.width_for(viewport.line_count());
    let mut spans = Vec::new();

    let mut line = viewport.first_visible_line();
    let mut top = viewport.content_offset();

    while line < viewport.line_count() && top <= region.bottom {
        let bottom = top + viewport.line_height(line) as isize;
        if bottom >= region.top {
            spans.push(GutterSpan {
                line_number: line + 1,
                top,
                bottom,
            });
        }
        top = bottom;
        line += 1;
    }

    GutterStrip { width, spans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::FixedRowViewport;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(1), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
        assert_eq!(digit_count(100_000), 6);
    }

    #[test]
    fn test_width_steps_exactly_at_digit_boundaries() {
        let metrics = GutterMetrics::new(3, 8);
        assert_eq!(metrics.width_for(9), metrics.width_for(1));
        assert_eq!(metrics.width_for(10), metrics.width_for(9) + 8);
        assert_eq!(metrics.width_for(99), metrics.width_for(10));
        assert_eq!(metrics.width_for(100), metrics.width_for(99) + 8);
    }

    #[test]
    fn test_empty_document_still_has_one_digit_column() {
        let metrics = GutterMetrics::new(3, 8);
        assert_eq!(metrics.width_for(0), 3 + 8);
    }

    #[test]
    fn test_paint_visible_rows() {
        let metrics = GutterMetrics::cells();
        let mut vp = FixedRowViewport::new(100, 16);
        vp.scroll_to(10);

        let strip = paint(&metrics, &vp, PaintRegion::new(0, 47));
        let numbers: Vec<usize> = strip.spans.iter().map(|s| s.line_number).collect();
        // Rows 10..=12 fit in 0..=47 (16 units each); row 13 starts at 48.
        assert_eq!(numbers, vec![11, 12, 13]);
        assert_eq!(strip.spans[0].top, 0);
        assert_eq!(strip.spans[0].bottom, 16);
        assert_eq!(strip.width, metrics.width_for(100));
    }

    #[test]
    fn test_paint_partial_region_skips_rows_above() {
        let metrics = GutterMetrics::cells();
        let vp = FixedRowViewport::new(10, 16);

        // Region covering only the third row.
        let strip = paint(&metrics, &vp, PaintRegion::new(33, 40));
        let numbers: Vec<usize> = strip.spans.iter().map(|s| s.line_number).collect();
        assert_eq!(numbers, vec![3]);
    }

    #[test]
    fn test_paint_stops_at_document_end() {
        let metrics = GutterMetrics::cells();
        let vp = FixedRowViewport::new(2, 16);
        let strip = paint(&metrics, &vp, PaintRegion::new(0, 1000));
        let numbers: Vec<usize> = strip.spans.iter().map(|s| s.line_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_paint_nothing_when_region_above_content() {
        let metrics = GutterMetrics::cells();
        let mut vp = FixedRowViewport::new(10, 16);
        vp.scroll_to(5);
        let strip = paint(&metrics, &vp, PaintRegion::new(-100, -1));
        assert!(strip.spans.is_empty());
    }
}
