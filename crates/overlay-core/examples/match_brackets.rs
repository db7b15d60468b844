use overlay_core::{EditorSurface, HighlightStyle};

fn main() {
    let mut surface = EditorSurface::from_text("int main(){ return 0; }");

    // Cursor on the ( after main: the overlay holds the current-line tint
    // plus both ends of the pair.
    surface.set_cursor(8);
    for highlight in surface.highlights() {
        println!("{:?} at {:?}", highlight.style, highlight.range);
    }
    assert_eq!(surface.highlights().len(), 3);
    assert_eq!(surface.highlights()[2].range, 9..10);

    // Cursor on the {: matched with the closing brace near the end.
    surface.set_cursor(10);
    let bracket_ranges: Vec<_> = surface
        .highlights()
        .iter()
        .filter(|h| h.style == HighlightStyle::BracketMatch)
        .map(|h| h.range.clone())
        .collect();
    assert_eq!(bracket_ranges, vec![10..11, 22..23]);
    println!("brace pair: {:?}", bracket_ranges);
}
