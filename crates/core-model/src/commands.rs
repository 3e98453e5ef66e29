//! Primitive editor commands provided by the host.
//!
//! | name | params |
//! |------|--------|
//! | `move` | `by` = characters, words, word_ends, lines; `forward`; `extend` |
//! | `move_to` | `to` = bol, hardbol, eol, hardeol, bof, eof; `extend` |
//! | `left_delete` / `right_delete` | |
//! | `insert` | `characters` |
//! | `expand_selection` | `to` = line, line_without_eol |
//! | `add_to_kill_ring` | `forward` |

use crate::{CommandError, CommandRegistry, Host};
use core_state::CommandArgs;
use core_text::{Region, Selection, motion};

pub(crate) fn register_builtins(r: &mut CommandRegistry) {
    r.register("move", move_by);
    r.register("move_to", move_to);
    r.register("left_delete", left_delete);
    r.register("right_delete", right_delete);
    r.register("insert", insert);
    r.register("expand_selection", expand_selection);
    r.register("add_to_kill_ring", add_to_kill_ring);
}

/// Where the caret lands after a `RegionEdit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPlacement {
    Start,
    End,
}

/// Replace `span` (in pre-edit coordinates) with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEdit {
    pub span: Region,
    pub text: String,
    pub caret: CaretPlacement,
}

impl RegionEdit {
    pub fn erase(span: Region) -> Self {
        Self {
            span,
            text: String::new(),
            caret: CaretPlacement::Start,
        }
    }

    pub fn replace(span: Region, text: impl Into<String>, caret: CaretPlacement) -> Self {
        Self {
            span,
            text: text.into(),
            caret,
        }
    }
}

fn shift(pt: usize, delta: isize) -> usize {
    pt.saturating_add_signed(delta)
}

/// Apply non-overlapping edits front to back, shifting later spans by the
/// length change of earlier ones, then replace the selection with one caret
/// per edit.
pub fn apply_region_edits(host: &mut dyn Host, mut edits: Vec<RegionEdit>) {
    edits.sort_by_key(|e| e.span.begin());
    let mut delta: isize = 0;
    let mut carets = Vec::with_capacity(edits.len());
    for e in edits {
        let begin = shift(e.span.begin(), delta);
        let end = shift(e.span.end(), delta);
        if begin < end {
            host.erase(Region::new(begin, end));
        }
        let inserted = if e.text.is_empty() {
            0
        } else {
            host.insert(begin, &e.text)
        };
        carets.push(Region::caret(match e.caret {
            CaretPlacement::Start => begin,
            CaretPlacement::End => begin + inserted,
        }));
        delta += inserted as isize - (end - begin) as isize;
    }
    host.set_selection(Selection::from_regions(carets));
}

/// Replace every region with `f(region)`.
pub fn map_regions(host: &mut dyn Host, f: impl Fn(&dyn Host, Region) -> Region) {
    let regions: Vec<Region> = host.selection().iter().map(|r| f(&*host, *r)).collect();
    host.set_selection(Selection::from_regions(regions));
}

fn move_by(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let by = args
        .param_str("by")
        .ok_or_else(|| CommandError::invalid("move", "missing `by`"))?;
    let forward = args.is_forward();
    let step: fn(&dyn Host, usize, bool) -> usize = match by {
        "characters" => |h, pt, fwd| {
            if fwd {
                (pt + 1).min(h.size())
            } else {
                pt.saturating_sub(1)
            }
        },
        "words" => |h, pt, fwd| {
            if fwd {
                motion::next_word_start(h.buffer(), pt)
            } else {
                motion::prev_word_start(h.buffer(), pt)
            }
        },
        "word_ends" => |h, pt, fwd| {
            if fwd {
                motion::next_word_end(h.buffer(), pt)
            } else {
                motion::prev_word_start(h.buffer(), pt)
            }
        },
        "lines" => |h, pt, fwd| motion::vertical(h.buffer(), pt, fwd),
        other => {
            return Err(CommandError::invalid(
                "move",
                format!("unknown `by` value {other:?}"),
            ));
        }
    };
    let extend = args.extend;
    map_regions(host, |h, r| {
        let b = step(h, r.b, forward);
        if extend {
            Region::new(r.a, b)
        } else {
            Region::caret(b)
        }
    });
    Ok(())
}

fn move_to(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let to = args
        .param_str("to")
        .ok_or_else(|| CommandError::invalid("move_to", "missing `to`"))?;
    let target: fn(&dyn Host, usize) -> usize = match to {
        "bol" | "hardbol" => |h, pt| h.line(pt).begin(),
        "eol" | "hardeol" => |h, pt| h.line(pt).end(),
        "bof" => |_, _| 0,
        "eof" => |h, _| h.size(),
        other => {
            return Err(CommandError::invalid(
                "move_to",
                format!("unknown `to` value {other:?}"),
            ));
        }
    };
    let extend = args.extend;
    map_regions(host, |h, r| {
        let b = target(h, r.b);
        if extend {
            Region::new(r.a, b)
        } else {
            Region::caret(b)
        }
    });
    Ok(())
}

fn left_delete(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    let edits: Vec<RegionEdit> = host
        .selection()
        .iter()
        .map(|r| {
            if !r.is_empty() || r.b == 0 {
                RegionEdit::erase(*r)
            } else {
                RegionEdit::erase(Region::new(r.b - 1, r.b))
            }
        })
        .collect();
    apply_region_edits(host, edits);
    Ok(())
}

fn right_delete(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    let size = host.size();
    let edits: Vec<RegionEdit> = host
        .selection()
        .iter()
        .map(|r| {
            if !r.is_empty() || r.b >= size {
                RegionEdit::erase(*r)
            } else {
                RegionEdit::erase(Region::new(r.b, r.b + 1))
            }
        })
        .collect();
    apply_region_edits(host, edits);
    Ok(())
}

fn insert(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let text = args
        .param_str("characters")
        .ok_or_else(|| CommandError::invalid("insert", "missing `characters`"))?
        .to_string();
    let edits: Vec<RegionEdit> = host
        .selection()
        .iter()
        .map(|r| RegionEdit::replace(*r, text.clone(), CaretPlacement::End))
        .collect();
    apply_region_edits(host, edits);
    Ok(())
}

fn expand_selection(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let include_eol = match args.param_str("to") {
        Some("line") => true,
        Some("line_without_eol") => false,
        other => {
            return Err(CommandError::invalid(
                "expand_selection",
                format!("unsupported `to` value {other:?}"),
            ));
        }
    };
    map_regions(host, |h, r| {
        let begin = h.line(r.begin()).begin();
        let end = if include_eol {
            h.full_line(r.end()).end()
        } else {
            h.line(r.end()).end()
        };
        Region::new(begin, end)
    });
    Ok(())
}

fn add_to_kill_ring(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let text = host
        .selection()
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| host.substr(*r))
        .collect::<Vec<_>>()
        .join("\n");
    let forward = args.is_forward();
    host.kill_ring_mut().push(&text, forward);
    Ok(())
}
