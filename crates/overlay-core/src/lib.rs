#![warn(missing_docs)]
//! Overlay Core - Headless Editor Overlay Engine
//!
//! # Overview
//!
//! `overlay-core` is the overlay engine of a code-editing surface: the parts
//! that must stay correct and cheap on every keystroke and cursor move. It
//! is UI-toolkit agnostic: hosts provide input events and viewport
//! geometry, and read back text, highlight sets, and gutter paint lists.
//!
//! # Core Features
//!
//! - **Bracket Matching**: directional scanner with lexical-state tracking
//!   (strings, char literals, `//` and `/* */` comments)
//! - **Highlight Overlays**: current-line + matched-bracket set, recomputed
//!   and replaced wholesale on every cursor move
//! - **Gutter Geometry**: digit-count-driven width and a headless paint list
//!   of visible line numbers
//! - **Auto-Pairing**: opener insertion and closer skip-over on character
//!   input
//! - **Document**: Rope-backed text with char/line addressing, a clamped
//!   cursor, and deterministic change notifications
//! - **Buffer Registry**: stable ids, path lookup, and saved-snapshot
//!   modified tracking for multi-tab hosts
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorSurface & BufferRegistry             │  ← Host API
//! ├─────────────────────────────────────────────┤
//! │  Overlay / Gutter / Auto-Pairing / Search   │  ← Per-event recompute
//! ├─────────────────────────────────────────────┤
//! │  Bracket Scanner (lexical state machine)    │  ← Pure scan
//! ├─────────────────────────────────────────────┤
//! │  TextDocument (Rope storage + notifications)│  ← Text access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything executes synchronously on the caller's thread inside the
//! triggering event; nothing persists across events except the document and
//! the last computed highlight set, so there is no stale-state risk and no
//! background work.
//!
//! # Quick Start
//!
//! ```rust
//! use overlay_core::{EditorSurface, HighlightStyle, InputDisposition};
//!
//! let mut surface = EditorSurface::from_text("int main(){ return 0; }");
//!
//! // Put the cursor on the brace: the overlay picks up the pair.
//! surface.set_cursor(10);
//! let styles: Vec<HighlightStyle> =
//!     surface.highlights().iter().map(|h| h.style).collect();
//! assert_eq!(
//!     styles,
//!     vec![
//!         HighlightStyle::CurrentLine,
//!         HighlightStyle::BracketMatch,
//!         HighlightStyle::BracketMatch,
//!     ]
//! );
//!
//! // Typed openers pair up; the cursor lands between them.
//! let mut surface = EditorSurface::new();
//! assert_eq!(surface.handle_char('{'), InputDisposition::Consumed);
//! assert_eq!(surface.text(), "{}");
//! assert_eq!(surface.cursor(), 1);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Rope-backed document with change notifications
//! - [`scanner`] - directional bracket matcher
//! - [`overlay`] - highlight-set recomputation
//! - [`gutter`] - gutter width and headless painting
//! - [`viewport`] - viewport-geometry capability consumed by the gutter
//! - [`autopair`] - delimiter auto-pairing input filter
//! - [`search`] - plain-text find over a snapshot
//! - [`registry`] - multi-buffer arena with modified tracking
//! - [`surface`] - the composition hosts embed
//! - [`layout`] - cell metrics for character-grid hosts

pub mod autopair;
pub mod document;
pub mod gutter;
pub mod layout;
pub mod overlay;
pub mod registry;
pub mod scanner;
pub mod search;
pub mod surface;
pub mod viewport;

pub use autopair::{AutoPairFilter, InputDisposition};
pub use document::{DocumentChange, DocumentChangeCallback, DocumentChangeType, TextDocument};
pub use gutter::{GutterMetrics, GutterSpan, GutterStrip, PaintRegion};
pub use overlay::{Highlight, HighlightStyle, OverlayManager};
pub use registry::{BufferId, BufferRegistry, RegistryError};
pub use search::{SearchError, SearchMatch, SearchOptions};
pub use surface::EditorSurface;
pub use viewport::{FixedRowViewport, ViewportGeometry};
