//! Rope-based text buffer abstraction.
//!
//! Positions are absolute character offsets (not bytes). A line is addressed
//! by any point inside it; `line` yields the content span without the newline
//! while `full_line` includes it. Buffers are expected to be `\n` normalized.

use ropey::Rope;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

pub mod motion;
pub mod region;

pub use region::{Region, Selection};

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone, Default)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("chars", &self.rope.len_chars())
            .field("lines", &self.rope.len_lines())
            .finish()
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            name: name.into(),
        }
    }

    /// Total number of characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines (a trailing newline opens a final empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character at `pt`, or `None` past the end.
    pub fn char_at(&self, pt: usize) -> Option<char> {
        (pt < self.len()).then(|| self.rope.char(pt))
    }

    /// Content span of the line containing `pt` (newline excluded).
    pub fn line(&self, pt: usize) -> Region {
        let row = self.row_of(pt);
        let start = self.rope.line_to_char(row);
        Region::new(start, start + self.line_content_len(row))
    }

    /// Span of the line containing `pt` including its newline, if any.
    pub fn full_line(&self, pt: usize) -> Region {
        let row = self.row_of(pt);
        let start = self.rope.line_to_char(row);
        Region::new(start, start + self.rope.line(row).len_chars())
    }

    /// Zero-based (row, column) for `pt`, clamped to the buffer.
    pub fn row_col(&self, pt: usize) -> (usize, usize) {
        let pt = pt.min(self.len());
        let row = self.rope.char_to_line(pt);
        (row, pt - self.rope.line_to_char(row))
    }

    /// Offset of (row, col). Rows past the end map to the end of the buffer; the
    /// column is clamped to the line content.
    pub fn text_point(&self, row: usize, col: usize) -> usize {
        if row >= self.line_count() {
            return self.len();
        }
        self.rope.line_to_char(row) + col.min(self.line_content_len(row))
    }

    /// Text covered by `r`, clamped to the buffer.
    pub fn substr(&self, r: Region) -> String {
        let (begin, end) = self.clamp(r);
        self.rope.slice(begin..end).to_string()
    }

    /// Insert `text` at `pt`; returns the number of characters inserted.
    pub fn insert(&mut self, pt: usize, text: &str) -> usize {
        let pt = pt.min(self.len());
        self.rope.insert(pt, text);
        text.chars().count()
    }

    /// Remove the characters covered by `r`; returns the number removed.
    pub fn erase(&mut self, r: Region) -> usize {
        let (begin, end) = self.clamp(r);
        if begin < end {
            self.rope.remove(begin..end);
        }
        end - begin
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Content hash used to skip no-op undo snapshots.
    pub fn content_hash(&self) -> u64 {
        let mut h = DefaultHasher::new();
        for chunk in self.rope.chunks() {
            h.write(chunk.as_bytes());
        }
        h.finish()
    }

    fn row_of(&self, pt: usize) -> usize {
        self.rope.char_to_line(pt.min(self.len()))
    }

    fn line_content_len(&self, row: usize) -> usize {
        let line = self.rope.line(row);
        let n = line.len_chars();
        if n > 0 && line.char(n - 1) == '\n' {
            n - 1
        } else {
            n
        }
    }

    fn clamp(&self, r: Region) -> (usize, usize) {
        let len = self.len();
        (r.begin().min(len), r.end().min(len))
    }
}
