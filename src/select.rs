use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use std::iter::FromIterator;

use crate::error::{Error, Result};
use crate::random::{new_rng, DEFAULT_SEED};
use crate::range::{Range, RangeSet};
use crate::value::Value;

/// Draws random values from a set of disjoint inclusive ranges, weighting
/// each range by the number of values it covers so that every available
/// value is equally likely.
///
/// A draw picks a range from the weighted distribution, then a uniform
/// value within that range's bounds. Removing or reinserting a value
/// rebuilds the distribution before the operation returns, so the weights
/// always reflect the current ranges.
///
/// The engine is a type parameter defaulting to [`XorShiftRng`]; any other
/// [`Rng`] can be injected with [`RandomRange::with_rng`]. Selectors built
/// by the convenience constructors start from a fixed seed and are
/// reproducible until reseeded.
#[derive(Clone)]
pub struct RandomRange<T, R = XorShiftRng> {
    ranges: RangeSet<T>,
    weights: Vec<u64>,
    dist: Option<WeightedIndex<u64>>,
    rng: R,
}

impl<T: Value> RandomRange<T> {
    /// Selector over every value in `[min, max]`.
    pub fn new(min: T, max: T) -> Self {
        Self::from_range(Range::new(min, max))
    }

    pub fn from_range(range: Range<T>) -> Self {
        Self::from_ranges(vec![range])
    }

    /// Selector over the union of `ranges`, which are normalized (sorted,
    /// overlapping and adjacent ranges merged) before use.
    pub fn from_ranges(ranges: Vec<Range<T>>) -> Self {
        Self::with_rng(ranges, new_rng(DEFAULT_SEED))
    }
}

impl<T: Value> Default for RandomRange<T> {
    /// An empty selector; every draw fails until values are inserted.
    fn default() -> Self {
        Self::from_ranges(vec![])
    }
}

impl<T: Value> FromIterator<(T, T)> for RandomRange<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        Self::from_ranges(iter.into_iter().map(Range::from).collect())
    }
}

impl<T: Value, R: Rng> RandomRange<T, R> {
    /// Selector over the union of `ranges` drawing from `rng`.
    pub fn with_rng(ranges: Vec<Range<T>>, rng: R) -> Self {
        let mut new = RandomRange {
            ranges: RangeSet::from_ranges(ranges),
            weights: vec![],
            dist: None,
            rng,
        };
        new.update_weights();
        new
    }

    /// Draws a value, leaving it available for future draws.
    pub fn select_with_replacement(&mut self) -> Result<T> {
        let dist = self.dist.as_ref().ok_or(Error::EmptyDomain)?;
        let range = self.ranges.as_slice()[dist.sample(&mut self.rng)];
        Ok(self.rng.gen_range(range.lo..=range.hi))
    }

    /// Draws a value and removes it from future draws.
    pub fn select_without_replacement(&mut self) -> Result<T> {
        let value = self.select_with_replacement()?;
        let removed = self.ranges.remove(value);
        debug_assert!(removed);
        self.update_weights();
        Ok(value)
    }

    /// Puts a previously drawn value back into the set of possibilities.
    pub fn insert(&mut self, value: T) -> Result<()> {
        if !self.ranges.insert(value) {
            return Err(Error::AlreadyPresent);
        }
        self.update_weights();
        Ok(())
    }

    /// Removes a value from the set of possibilities without drawing it.
    pub fn remove(&mut self, value: T) -> Result<()> {
        if !self.ranges.remove(value) {
            return Err(Error::OutOfDomain);
        }
        self.update_weights();
        Ok(())
    }

    /// Number of values currently available.
    pub fn size(&self) -> u64 {
        self.ranges.size()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, value: T) -> bool {
        self.ranges.contains(value)
    }

    /// Smallest available value.
    pub fn min(&self) -> Result<T> {
        self.ranges.min().ok_or(Error::EmptyDomain)
    }

    /// Largest available value.
    pub fn max(&self) -> Result<T> {
        self.ranges.max().ok_or(Error::EmptyDomain)
    }

    /// The current ranges, sorted and disjoint.
    pub fn ranges(&self) -> &[Range<T>] {
        self.ranges.as_slice()
    }

    /// One weight per range, equal to the range's size. Empty when no
    /// values are available.
    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    fn update_weights(&mut self) {
        self.weights.clear();
        self.weights.extend(self.ranges.as_slice().iter().map(Range::size));
        // None when there are no ranges; draws report the empty domain
        // without consulting a distribution.
        self.dist = WeightedIndex::new(&self.weights).ok();
        trace!("weights rebuilt for {} ranges", self.weights.len());
    }
}

impl<T: Value, R: Rng + SeedableRng> RandomRange<T, R> {
    /// Resets the engine from a scalar seed. Selectors seeded alike and
    /// given the same call sequence draw the same values.
    pub fn seed(&mut self, seed: u64) {
        debug!("seeding engine from scalar {}", seed);
        self.rng = R::seed_from_u64(seed);
    }

    /// Resets the engine from a full seed sequence.
    pub fn seed_from(&mut self, seed: R::Seed) {
        self.rng = R::from_seed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::init_logger;
    use rand::rngs::StdRng;
    use std::collections::{BTreeMap, HashSet};

    fn check_internals<T: Value, R: Rng>(select: &RandomRange<T, R>) {
        assert_eq!(select.ranges().len(), select.weights().len());
        for (range, &weight) in select.ranges().iter().zip(select.weights()) {
            assert!(weight > 0);
            assert_eq!(range.size(), weight);
        }
    }

    #[test]
    fn with_replacement() {
        let mut select = RandomRange::new(-1, 5);
        check_internals(&select);
        for _ in 0..100 {
            let value = select.select_with_replacement().unwrap();
            assert!(select.min().unwrap() <= value);
            assert!(value <= select.max().unwrap());
            assert_eq!(select.size(), 7);
            check_internals(&select);
        }
    }

    #[test]
    fn without_replacement() {
        let mut select = RandomRange::new(-1, 5);
        check_internals(&select);
        let mut values = HashSet::new();
        for _ in 0..7 {
            let min = select.min().unwrap();
            let max = select.max().unwrap();
            let value = select.select_without_replacement().unwrap();
            assert!(min <= value);
            assert!(value <= max);
            assert!(values.insert(value));
            check_internals(&select);
        }
        assert_eq!(select.size(), 0);
        assert!(select.is_empty());
        assert!(select.weights().is_empty());
        assert_eq!(
            select.select_without_replacement(),
            Err(Error::EmptyDomain)
        );
    }

    #[test]
    fn draw_and_reinsert_round_trip() {
        let mut select: RandomRange<u32> = vec![(1, 5), (10, 20)].into_iter().collect();
        let before = select.ranges().to_vec();
        let before_size = select.size();
        for _ in 0..100 {
            let value = select.select_without_replacement().unwrap();
            assert!(!select.contains(value));
            select.insert(value).unwrap();
            assert_eq!(select.ranges(), &before[..]);
            assert_eq!(select.size(), before_size);
        }
    }

    fn check_distribution<R: Rng>(select: &mut RandomRange<i32, R>, draws_per_value: u64) {
        let mut counts = BTreeMap::new();
        for _ in 0..select.size() * draws_per_value {
            *counts.entry(select.select_with_replacement().unwrap()).or_insert(0u64) += 1;
        }
        assert_eq!(select.size(), counts.len() as u64);
        // every value within ±10% of the expected uniform count
        let lo = draws_per_value - draws_per_value / 10;
        let hi = draws_per_value + draws_per_value / 10;
        for (value, count) in counts {
            assert!(
                lo <= count && count <= hi,
                "{} drawn {} times, expected about {}",
                value,
                count,
                draws_per_value
            );
        }
    }

    #[test]
    fn distribution() {
        init_logger("error");
        let mut select = RandomRange::new(1, 100);
        check_distribution(&mut select, 10_000);
        // removing a value reshapes the ranges; the rest must stay uniform
        select.select_without_replacement().unwrap();
        check_distribution(&mut select, 10_000);
    }

    #[test]
    fn seeding_reproduces_sequences() {
        let mut select = RandomRange::new(1, 100);
        select.seed(0);
        let first: Vec<_> = (0..1000)
            .map(|_| select.select_with_replacement().unwrap())
            .collect();
        select.seed(0);
        let second: Vec<_> = (0..1000)
            .map(|_| select.select_with_replacement().unwrap())
            .collect();
        assert_eq!(first, second);

        select.seed_from([7; 16]);
        let first: Vec<_> = (0..1000)
            .map(|_| select.select_with_replacement().unwrap())
            .collect();
        select.seed_from([7; 16]);
        let second: Vec<_> = (0..1000)
            .map(|_| select.select_with_replacement().unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn identical_selectors_draw_identically() {
        let mut a = RandomRange::new(1, 100);
        let mut b = RandomRange::new(1, 100);
        a.seed(99);
        b.seed(99);
        for _ in 0..1000 {
            assert_eq!(
                a.select_without_replacement(),
                b.select_without_replacement()
            );
            if a.is_empty() {
                a.insert(42).unwrap();
                b.insert(42).unwrap();
            }
        }
    }

    #[test]
    fn empty_selector_fails_every_draw() {
        let mut select = RandomRange::<i64>::default();
        assert!(select.is_empty());
        assert_eq!(select.size(), 0);
        assert_eq!(select.select_with_replacement(), Err(Error::EmptyDomain));
        assert_eq!(select.select_without_replacement(), Err(Error::EmptyDomain));
        assert_eq!(select.min(), Err(Error::EmptyDomain));
        assert_eq!(select.max(), Err(Error::EmptyDomain));
        assert!(select.weights().is_empty());

        select.insert(5).unwrap();
        assert_eq!(select.select_with_replacement(), Ok(5));
        assert_eq!(select.select_without_replacement(), Ok(5));
        assert!(select.is_empty());
    }

    #[test]
    fn mutation_error_policy() {
        let mut select = RandomRange::new(1, 5);
        assert_eq!(select.remove(0), Err(Error::OutOfDomain));
        assert_eq!(select.insert(3), Err(Error::AlreadyPresent));
        assert_eq!(select.size(), 5);

        select.remove(3).unwrap();
        assert_eq!(select.ranges(), &[Range::new(1, 2), Range::new(4, 5)][..]);
        assert_eq!(select.weights(), &[2u64, 2][..]);
        select.insert(3).unwrap();
        assert_eq!(select.ranges(), &[Range::new(1, 5)][..]);
        assert_eq!(select.weights(), &[5u64][..]);
    }

    #[test]
    fn injected_engine() {
        let ranges = vec![Range::new(-5i32, -1), Range::new(3, 3)];
        let mut select = RandomRange::with_rng(ranges, StdRng::seed_from_u64(7));
        let mut values = HashSet::new();
        for _ in 0..6 {
            values.insert(select.select_without_replacement().unwrap());
            check_internals(&select);
        }
        assert_eq!(values.len(), 6);
        assert!(select.is_empty());
    }

    #[test]
    fn weighting_favors_larger_ranges() {
        // one range of 90 values against one of 10; the larger range must
        // receive about 90% of the draws
        let mut select: RandomRange<u32> = vec![(0, 89), (1000, 1009)].into_iter().collect();
        assert_eq!(select.weights(), &[90u64, 10][..]);
        let mut large = 0u32;
        let draws = 10_000;
        for _ in 0..draws {
            if select.select_with_replacement().unwrap() < 90 {
                large += 1;
            }
        }
        assert!(8_500 < large && large < 9_500, "{} draws in large range", large);
    }
}
