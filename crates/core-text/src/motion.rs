//! Point motion helpers.
//!
//! These operate purely on a `Buffer` + offset pair and are free of selection or
//! editor state; host commands lift them over every region of a selection.

use crate::Buffer;

/// Character classes used for word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Word,
    Punctuation,
    Whitespace,
    LineBreak,
}

pub fn classify(c: char) -> CharClass {
    if c == '\n' {
        CharClass::LineBreak
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

fn class_at(buf: &Buffer, pt: usize) -> Option<CharClass> {
    buf.char_at(pt).map(classify)
}

/// Start of the next word after `pt`. An empty line counts as a word.
pub fn next_word_start(buf: &Buffer, pt: usize) -> usize {
    let len = buf.len();
    let mut i = pt;
    if i >= len {
        return len;
    }
    if let Some(start @ (CharClass::Word | CharClass::Punctuation)) = class_at(buf, i) {
        while class_at(buf, i) == Some(start) {
            i += 1;
        }
    }
    while let Some(class) = class_at(buf, i) {
        match class {
            CharClass::Whitespace => i += 1,
            CharClass::LineBreak => {
                i += 1;
                if class_at(buf, i) == Some(CharClass::LineBreak) {
                    return i;
                }
            }
            _ => break,
        }
    }
    i
}

/// Start of the word before `pt`. An empty line counts as a word.
pub fn prev_word_start(buf: &Buffer, pt: usize) -> usize {
    let mut i = pt.min(buf.len());
    while i > 0 {
        match class_at(buf, i - 1) {
            Some(CharClass::Whitespace) => i -= 1,
            Some(CharClass::LineBreak) => {
                if i >= 2 && class_at(buf, i - 2) == Some(CharClass::LineBreak) && i - 1 != pt {
                    return i - 1;
                }
                i -= 1;
            }
            _ => break,
        }
    }
    if i == 0 {
        return 0;
    }
    let class = class_at(buf, i - 1);
    while i > 0 && class_at(buf, i - 1) == class {
        i -= 1;
    }
    i
}

/// Exclusive end of the word at or after `pt`, skipping leading blanks.
pub fn next_word_end(buf: &Buffer, pt: usize) -> usize {
    let len = buf.len();
    let mut i = pt;
    while matches!(
        class_at(buf, i),
        Some(CharClass::Whitespace | CharClass::LineBreak)
    ) {
        i += 1;
    }
    if i >= len {
        return len;
    }
    let class = class_at(buf, i);
    while i < len && class_at(buf, i) == class {
        i += 1;
    }
    i
}

/// First character of `pt`'s line that is neither a space nor a tab.
pub fn first_non_whitespace(buf: &Buffer, pt: usize) -> usize {
    let line = buf.line(pt);
    let mut i = line.begin();
    while i < line.end() && matches!(buf.char_at(i), Some(' ' | '\t')) {
        i += 1;
    }
    i
}

/// Same column on the adjacent line, clamped to that line's content.
pub fn vertical(buf: &Buffer, pt: usize, forward: bool) -> usize {
    let (row, col) = buf.row_col(pt);
    let target = if forward {
        row + 1
    } else if row == 0 {
        return pt;
    } else {
        row - 1
    };
    if target >= buf.line_count() {
        return pt;
    }
    buf.text_point(target, col)
}
