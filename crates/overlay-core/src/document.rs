//! Rope-backed text document with a cursor and a change-notification stream.
//!
//! The document is the single mutable collaborator the overlay components
//! read from. It exposes random character access and line addressing in
//! **character offsets** (Rope-backed, O(log n)), a clamped cursor, and a
//! listener list that is invoked in registration order on every text,
//! line-count, or cursor change; a host can wire "recompute overlays,
//! then repaint" deterministically.

use ropey::Rope;
use std::ops::Range;

/// What changed in a [`TextDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChangeType {
    /// Text was inserted or deleted.
    TextChanged,
    /// The total line count changed (a subset of text changes).
    LineCountChanged,
    /// The cursor moved.
    CursorMoved,
}

/// A versioned change record delivered to document listeners.
#[derive(Debug, Clone)]
pub struct DocumentChange {
    /// What changed.
    pub change_type: DocumentChangeType,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
    /// Affected character range, for text changes.
    pub affected_region: Option<Range<usize>>,
}

/// Listener callback type for document changes.
pub type DocumentChangeCallback = Box<dyn FnMut(&DocumentChange) + Send>;

/// An editable, line-decomposed character sequence.
///
/// All public offsets are character offsets; the cursor is clamped to
/// `0..=len_chars()`. Listeners registered with [`subscribe`](Self::subscribe)
/// are invoked synchronously, in registration order, inside the mutating
/// call.
pub struct TextDocument {
    rope: Rope,
    cursor: usize,
    read_only: bool,
    version: u64,
    callbacks: Vec<DocumentChangeCallback>,
}

impl TextDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a document from initial text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            read_only: false,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Register a change listener. Listeners fire in registration order.
    pub fn subscribe(&mut self, callback: DocumentChangeCallback) {
        self.callbacks.push(callback);
    }

    /// Current document version (incremented once per emitted change).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` if the document rejects edits.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Toggle edit protection. Read-only documents still move their cursor.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Full text snapshot.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total character count.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character at `offset`, or `None` when out of range.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// Total line count. An empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The line containing `offset` (clamped to the last line).
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Character range of `line`, excluding its trailing newline.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(line);
        let end = if line + 1 < self.rope.len_lines() {
            // -1 strips the newline that terminates this line.
            self.rope.line_to_char(line + 1) - 1
        } else {
            self.rope.len_chars()
        };
        Some(start..end)
    }

    /// Text of `line`, excluding its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let range = self.line_range(line)?;
        Some(self.rope.slice(range).to_string())
    }

    /// Current cursor offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `offset` (clamped to the document length).
    pub fn set_cursor(&mut self, offset: usize) {
        let clamped = offset.min(self.rope.len_chars());
        if clamped != self.cursor {
            self.cursor = clamped;
            self.emit(DocumentChangeType::CursorMoved, None);
        }
    }

    /// Move the cursor by a relative amount, clamped at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.set_cursor(target);
    }

    /// Insert `text` at `offset` (clamped). The cursor shifts right when it
    /// sits at or after the insertion point. No-op on read-only documents
    /// and for empty text.
    pub fn insert(&mut self, offset: usize, text: &str) {
        if self.read_only || text.is_empty() {
            return;
        }
        let offset = offset.min(self.rope.len_chars());
        let lines_before = self.rope.len_lines();
        self.rope.insert(offset, text);
        let inserted = text.chars().count();

        self.emit(
            DocumentChangeType::TextChanged,
            Some(offset..offset + inserted),
        );
        if self.rope.len_lines() != lines_before {
            self.emit(DocumentChangeType::LineCountChanged, None);
        }
        if self.cursor >= offset {
            self.cursor += inserted;
            self.emit(DocumentChangeType::CursorMoved, None);
        }
    }

    /// Insert `text` at the cursor; the cursor ends up after the insertion.
    pub fn insert_at_cursor(&mut self, text: &str) {
        self.insert(self.cursor, text);
    }

    /// Delete the character range (clamped). The cursor collapses toward the
    /// deletion start when it sits inside or after the range. No-op on
    /// read-only documents and for empty ranges.
    pub fn delete(&mut self, range: Range<usize>) {
        if self.read_only {
            return;
        }
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }

        let lines_before = self.rope.len_lines();
        self.rope.remove(start..end);

        self.emit(DocumentChangeType::TextChanged, Some(start..start));
        if self.rope.len_lines() != lines_before {
            self.emit(DocumentChangeType::LineCountChanged, None);
        }
        if self.cursor > start {
            self.cursor = if self.cursor <= end {
                start
            } else {
                self.cursor - (end - start)
            };
            self.emit(DocumentChangeType::CursorMoved, None);
        }
    }

    /// Replace the entire document text and reset the cursor to the start.
    ///
    /// This is the host boundary: file loading, external tooling, and any
    /// other producer of whole-document text goes through here.
    pub fn set_text(&mut self, text: &str) {
        let lines_before = self.rope.len_lines();
        let cursor_before = self.cursor;
        self.rope = Rope::from_str(text);
        self.cursor = 0;

        self.emit(DocumentChangeType::TextChanged, Some(0..self.rope.len_chars()));
        if self.rope.len_lines() != lines_before {
            self.emit(DocumentChangeType::LineCountChanged, None);
        }
        if cursor_before != 0 {
            self.emit(DocumentChangeType::CursorMoved, None);
        }
    }

    fn emit(&mut self, change_type: DocumentChangeType, affected_region: Option<Range<usize>>) {
        let change = DocumentChange {
            change_type,
            old_version: self.version,
            new_version: self.version + 1,
            affected_region,
        };
        self.version += 1;
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}
