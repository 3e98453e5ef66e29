//! Selection transform library shared by vi motions and the evaluator.
//!
//! Every helper rewrites the whole selection set of a `Host` in one step. Line
//! expansions keep each region's direction: a backward region (anchor after
//! the active end) expands anchor-side to its line end and active-side to its
//! line start.

use core_model::Host;
use core_text::{Region, Selection};

fn replace_selection(host: &mut dyn Host, regions: Vec<Region>) {
    host.set_selection(Selection::from_regions(regions));
}

/// `f(pt)` clamped to the content of `pt`'s line: never onto the newline, never
/// into the previous line. An empty line pins the point to its start.
pub fn clip_point_to_line(host: &dyn Host, f: impl Fn(&dyn Host, usize) -> usize, pt: usize) -> usize {
    let line = host.line(pt);
    if line.is_empty() {
        return line.a;
    }
    let new_pt = f(host, pt);
    if new_pt < line.begin() {
        line.begin()
    } else if new_pt >= line.end() - 1 {
        line.end() - 1
    } else {
        new_pt
    }
}

/// Move the active end of every region to `f(active_end)`. With `extend` the
/// anchor stays put, otherwise each region collapses to a caret.
pub fn transform_each_caret(
    host: &mut dyn Host,
    f: impl Fn(&dyn Host, usize) -> usize,
    extend: bool,
    clip_to_line: bool,
) {
    let regions = host
        .selection()
        .iter()
        .map(|r| {
            let new_pt = if clip_to_line {
                clip_point_to_line(&*host, &f, r.b)
            } else {
                f(&*host, r.b)
            };
            if extend {
                Region::new(r.a, new_pt)
            } else {
                Region::caret(new_pt)
            }
        })
        .collect();
    replace_selection(host, regions);
}

/// Replace every region with `f(region)`; `None` drops it.
pub fn transform_each_range(host: &mut dyn Host, f: impl Fn(&dyn Host, Region) -> Option<Region>) {
    let regions = host
        .selection()
        .iter()
        .filter_map(|r| f(&*host, *r))
        .collect();
    replace_selection(host, regions);
}

fn expand_with(host: &mut dyn Host, span: fn(&dyn Host, usize) -> Region) {
    transform_each_range(host, |h, s| {
        Some(if s.is_empty() {
            span(h, s.a)
        } else if s.a < s.b {
            Region::new(span(h, s.a).begin(), span(h, s.b).end())
        } else {
            Region::new(span(h, s.a).end(), span(h, s.b).begin())
        })
    });
}

/// Expand each region to the content of the lines it touches (newline excluded).
pub fn expand_to_line(host: &mut dyn Host) {
    expand_with(host, |h, pt| h.line(pt));
}

/// Expand each region to the lines it touches, newline included.
pub fn expand_to_full_line(host: &mut dyn Host) {
    expand_with(host, |h, pt| h.full_line(pt));
}

/// Like `expand_to_full_line`, but only for regions whose ends lie on
/// different lines; carets and single-line regions are left alone.
pub fn expand_spanning_selections_to_full_line(host: &mut dyn Host) {
    transform_each_range(host, |h, s| {
        if s.is_empty() {
            return Some(s);
        }
        let la = h.full_line(s.a);
        let lb = h.full_line(s.b);
        Some(if la == lb {
            s
        } else if s.a < s.b {
            Region::new(la.begin(), lb.end())
        } else {
            Region::new(la.end(), lb.begin())
        })
    });
}

/// A caret resting one past the last character of a non-empty line moves back
/// onto that character.
pub fn clip_empty_carets_to_line_content(host: &mut dyn Host) {
    transform_each_range(host, |h, s| {
        if s.is_empty() {
            let line = h.line(s.b);
            if s.b == line.end() && !line.is_empty() {
                return Some(Region::caret(line.end() - 1));
            }
        }
        Some(s)
    });
}

/// Collapse to the last included character of a forward region, else to the
/// active end.
pub fn shrink_inclusive(r: Region) -> Region {
    if r.a < r.b {
        Region::caret(r.b - 1)
    } else {
        Region::caret(r.b)
    }
}

/// Collapse to the active end.
pub fn shrink_exclusive(r: Region) -> Region {
    Region::caret(r.b)
}

/// Collapse non-empty regions inclusively; carets are left alone.
pub fn shrink_selections(host: &mut dyn Host) {
    transform_each_range(host, |_, r| {
        Some(if r.is_empty() { r } else { shrink_inclusive(r) })
    });
}
