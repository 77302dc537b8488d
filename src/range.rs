use crate::value::Value;

/// Inclusive interval `[lo, hi]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: Value> Range<T> {
    /// Panics if `lo > hi`.
    pub fn new(lo: T, hi: T) -> Self {
        assert!(lo <= hi, "invalid range bounds");
        Range { lo, hi }
    }

    /// Number of values covered by this range.
    #[inline]
    pub fn size(&self) -> u64 {
        T::span(self.lo, self.hi)
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl<T: Value> From<(T, T)> for Range<T> {
    fn from((lo, hi): (T, T)) -> Self {
        Range::new(lo, hi)
    }
}

/// Sorted sequence of disjoint, non-adjacent inclusive ranges covering
/// exactly the currently-available values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeSet<T> {
    ranges: Vec<Range<T>>,
}

impl<T: Value> RangeSet<T> {
    pub fn new() -> Self {
        RangeSet { ranges: vec![] }
    }

    /// Builds a set from arbitrary ranges, sorting them and merging any
    /// that overlap or touch.
    pub fn from_ranges(mut ranges: Vec<Range<T>>) -> Self {
        ranges.sort_by(|a, b| a.lo.cmp(&b.lo));
        let mut merged: Vec<Range<T>> = Vec::with_capacity(ranges.len());
        for r in ranges {
            match merged.last_mut() {
                Some(last) if r.lo <= last.hi || r.lo.prev() == last.hi => {
                    if r.hi > last.hi {
                        last.hi = r.hi;
                    }
                }
                _ => merged.push(r),
            }
        }
        RangeSet { ranges: merged }
    }

    /// Removes `value`, erasing, shrinking or splitting the range that
    /// covers it. Returns `false` if no range covers `value`.
    pub fn remove(&mut self, value: T) -> bool {
        let i = match self.find(value) {
            Some(i) => i,
            None => return false,
        };
        let Range { lo, hi } = self.ranges[i];
        if lo == hi {
            self.ranges.remove(i);
        } else if value == lo {
            self.ranges[i].lo = value.next();
        } else if value == hi {
            self.ranges[i].hi = value.prev();
        } else {
            self.ranges[i].hi = value.prev();
            self.ranges.insert(i + 1, Range::new(value.next(), hi));
        }
        true
    }

    /// Makes `value` available again, extending a neighboring range or
    /// creating a new one. Returns `false` if `value` is already covered.
    pub fn insert(&mut self, value: T) -> bool {
        // Index of the first range starting above value; the range before
        // it, if any, is the only one that could already cover value.
        let i = self.ranges.partition_point(|r| r.lo <= value);
        if i > 0 && self.ranges[i - 1].hi >= value {
            return false;
        }
        let above = i < self.ranges.len() && self.ranges[i].lo.prev() == value;
        let below = i > 0 && self.ranges[i - 1].hi.next() == value;
        if above && below {
            // value closes a one-value gap
            self.ranges[i - 1].hi = self.ranges[i].hi;
            self.ranges.remove(i);
        } else if above {
            self.ranges[i].lo = value;
        } else if below {
            self.ranges[i - 1].hi = value;
        } else {
            self.ranges.insert(i, Range::new(value, value));
        }
        true
    }

    /// Total number of available values.
    pub fn size(&self) -> u64 {
        self.ranges.iter().map(Range::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, value: T) -> bool {
        self.find(value).is_some()
    }

    pub fn min(&self) -> Option<T> {
        self.ranges.first().map(|r| r.lo)
    }

    pub fn max(&self) -> Option<T> {
        self.ranges.last().map(|r| r.hi)
    }

    pub fn as_slice(&self) -> &[Range<T>] {
        &self.ranges
    }

    fn find(&self, value: T) -> Option<usize> {
        let i = self.ranges.partition_point(|r| r.hi < value);
        if i < self.ranges.len() && self.ranges[i].lo <= value {
            Some(i)
        } else {
            None
        }
    }

    #[cfg(test)]
    fn check(&self) {
        for r in &self.ranges {
            assert!(r.lo <= r.hi);
        }
        for w in self.ranges.windows(2) {
            // w[0].hi < w[1].lo <= T::MAX, so stepping cannot wrap
            assert!(w[0].hi.next() < w[1].lo);
        }
    }
}

impl<T: Value> Default for RangeSet<T> {
    fn default() -> Self {
        RangeSet::new()
    }
}
