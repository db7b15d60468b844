use overlay_core::{EditorSurface, FixedRowViewport, PaintRegion};

fn main() {
    let text = (1..=120).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
    let surface = EditorSurface::from_text(&text);

    // 120 lines: three digit columns plus the fixed margin.
    println!("gutter width: {} cells", surface.gutter_width());
    assert_eq!(surface.gutter_width(), 4);

    // Paint a 10-row terminal viewport scrolled to line 50.
    let mut viewport = FixedRowViewport::new(surface.document().line_count(), 1);
    viewport.scroll_to(49);
    let strip = surface.paint_gutter(&viewport, PaintRegion::new(0, 9));

    for span in &strip.spans {
        println!("{:>width$}", span.line_number, width = strip.width);
    }
    assert_eq!(strip.spans.first().map(|s| s.line_number), Some(50));
    assert_eq!(strip.spans.last().map(|s| s.line_number), Some(59));
}
