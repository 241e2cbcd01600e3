//! Half-open intervals and first-match range tables.
//!
//! A [`RangeTable`] classifies a scalar into one of several bands, each band
//! mapping to an output. Entries are searched in declaration order and the
//! first interval containing the input wins, so overlapping intervals are
//! allowed and resolved by position rather than by numeric sort.

use core::fmt;

/// Half-open interval `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<K> {
    pub lower: K,
    pub upper: K,
}

impl<K: PartialOrd + Copy> Interval<K> {
    pub fn new(lower: K, upper: K) -> Self {
        Self { lower, upper }
    }

    /// `lower <= x < upper`
    pub fn contains(&self, x: K) -> bool {
        self.lower <= x && x < self.upper
    }

    /// An interval whose lower bound is not below its upper bound never matches.
    pub fn is_empty(&self) -> bool {
        !(self.lower < self.upper)
    }
}

impl<K: fmt::Display> fmt::Display for Interval<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

/// Ordered list of `(interval, output)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable<K, T> {
    entries: Vec<(Interval<K>, T)>,
}

impl<K, T> Default for RangeTable<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialOrd + Copy, T> RangeTable<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry after all existing ones.
    pub fn push(&mut self, interval: Interval<K>, output: T) {
        self.entries.push((interval, output));
    }

    /// Output of the first interval containing `x`, or `None`.
    pub fn find(&self, x: K) -> Option<&T> {
        self.entries
            .iter()
            .find(|(interval, _)| interval.contains(x))
            .map(|(_, output)| output)
    }

    pub fn entries(&self) -> &[(Interval<K>, T)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialOrd + Copy, T> FromIterator<(Interval<K>, T)> for RangeTable<K, T> {
    fn from_iter<I: IntoIterator<Item = (Interval<K>, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: fmt::Display, T> fmt::Display for RangeTable<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (interval, _)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{interval}")?;
        }
        write!(f, "]")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn single_band_matches_exactly_its_interval(
            lower in -1e3_f64..1e3_f64,
            width in 0.001_f64..1e3_f64,
            x in -3e3_f64..3e3_f64,
        ) {
            let upper = lower + width;
            let mut table = RangeTable::new();
            table.push(Interval::new(lower, upper), ());
            prop_assert_eq!(table.find(x).is_some(), lower <= x && x < upper);
        }

        #[test]
        fn adjacent_bands_cover_their_union(
            split in 1_u32..86_399,
            x in 0_u32..86_400,
        ) {
            let table: RangeTable<u32, u8> = [
                (Interval::new(0, split), 0),
                (Interval::new(split, 86_400), 1),
            ]
            .into_iter()
            .collect();
            let expected = if x < split { 0 } else { 1 };
            prop_assert_eq!(table.find(x), Some(&expected));
        }
    }
}
