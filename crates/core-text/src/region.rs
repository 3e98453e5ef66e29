//! Directional regions and the multi-range selection set.

use smallvec::SmallVec;

/// A span between an anchor `a` and an active end `b`. `a > b` is a backward
/// region; `a == b` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub a: usize,
    pub b: usize,
}

impl Region {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub const fn caret(pt: usize) -> Self {
        Self { a: pt, b: pt }
    }

    pub fn begin(&self) -> usize {
        self.a.min(self.b)
    }

    pub fn end(&self) -> usize {
        self.a.max(self.b)
    }

    pub fn size(&self) -> usize {
        self.end() - self.begin()
    }

    pub fn is_empty(&self) -> bool {
        self.a == self.b
    }

    pub fn is_reversed(&self) -> bool {
        self.a > self.b
    }

    /// True when `pt` lies strictly inside the span.
    fn contains_interior(&self, pt: usize) -> bool {
        self.begin() < pt && pt < self.end()
    }
}

impl From<usize> for Region {
    fn from(pt: usize) -> Self {
        Region::caret(pt)
    }
}

/// Ordered, non-overlapping set of regions.
///
/// Invariants: regions are sorted by `begin()`; non-empty regions never
/// overlap; a caret never sits strictly inside a non-empty region; duplicate
/// carets collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    regions: SmallVec<[Region; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(r: impl Into<Region>) -> Self {
        let mut s = Self::new();
        s.regions.push(r.into());
        s
    }

    pub fn from_regions<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut s = Self {
            regions: iter.into_iter().collect(),
        };
        s.normalize();
        s
    }

    pub fn add(&mut self, r: impl Into<Region>) {
        self.regions.push(r.into());
        self.normalize();
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn first(&self) -> Option<Region> {
        self.regions.first().copied()
    }

    /// True when any region has distinct endpoints.
    pub fn has_non_empty_region(&self) -> bool {
        self.regions.iter().any(|r| !r.is_empty())
    }

    fn normalize(&mut self) {
        self.regions.sort_by_key(|r| (r.begin(), r.end()));
        let mut out: SmallVec<[Region; 4]> = SmallVec::with_capacity(self.regions.len());
        for r in self.regions.drain(..) {
            let Some(last) = out.last_mut() else {
                out.push(r);
                continue;
            };
            if *last == r || (r.is_empty() && last.contains_interior(r.b)) {
                continue;
            }
            if last.is_empty() && r.contains_interior(last.b) {
                *last = r;
                continue;
            }
            if !r.is_empty() && !last.is_empty() && r.begin() < last.end() {
                let (begin, end) = (last.begin(), last.end().max(r.end()));
                *last = if last.is_reversed() {
                    Region::new(end, begin)
                } else {
                    Region::new(begin, end)
                };
                continue;
            }
            out.push(r);
        }
        self.regions = out;
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_orientation_helpers() {
        let r = Region::new(7, 3);
        assert!(r.is_reversed());
        assert_eq!((r.begin(), r.end(), r.size()), (3, 7, 4));
        assert!(Region::caret(2).is_empty());
    }

    #[test]
    fn overlapping_regions_merge_keeping_direction() {
        let s = Selection::from_regions([Region::new(6, 2), Region::new(4, 9)]);
        assert_eq!(s.regions(), &[Region::new(9, 2)]);
    }

    #[test]
    fn duplicate_and_interior_carets_are_absorbed() {
        let s = Selection::from_regions([
            Region::caret(3),
            Region::new(1, 5),
            Region::caret(3),
            Region::caret(8),
            Region::caret(8),
        ]);
        assert_eq!(s.regions(), &[Region::new(1, 5), Region::caret(8)]);
    }

    #[test]
    fn touching_regions_stay_separate() {
        let s = Selection::from_regions([Region::new(0, 2), Region::new(2, 4)]);
        assert_eq!(s.len(), 2);
        assert!(s.has_non_empty_region());
        assert!(!Selection::single(4).has_non_empty_region());
    }
}
