//! Sparse histograms and running-average correlation tables.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, btree_map},
    hash::{Hash, Hasher},
};

/// An `f64` usable as an ordered map key.
///
/// Buckets compare by exact value: `-0.0` is stored as `0.0` and every NaN
/// collapses onto one canonical NaN, so each bucket has a single
/// representation. Ordering follows [`f64::total_cmp`], which places NaN after
/// `+∞`.
#[derive(Clone, Copy, Debug)]
pub struct Bucket(f64);

impl Bucket {
    /// Canonicalises `value` into a bucket.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(f64::NAN)
        } else if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Canonical value stored in the bucket.
    #[must_use]
    #[rustfmt::skip]
    pub fn value(self) -> f64 { self.0 }
}

impl From<f64> for Bucket {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Bucket {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Bucket {}

impl PartialOrd for Bucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Bucket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Sparse frequency table over `N`-dimensional `f64` keys.
///
/// Only keys with a non-zero count are stored; iteration is in ascending key
/// order. Two histograms merge by summing counts, which is commutative and
/// associative, so partial histograms built on different threads combine to
/// the same result in any order.
///
/// # Examples
/// ```
/// use graphstat_core::Histogram;
///
/// let mut hist: Histogram<2> = [[1.0, 2.0], [1.0, 2.0], [0.0, 1.0]].into_iter().collect();
/// hist.increment([-0.0, 1.0]);
/// assert_eq!(hist.count([0.0, 1.0]), 2);
/// assert_eq!(hist.count([1.0, 2.0]), 2);
/// assert_eq!(hist.total(), 4);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Histogram<const N: usize> {
    counts: BTreeMap<[Bucket; N], usize>,
}

impl<const N: usize> Default for Histogram<N> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<const N: usize> Histogram<N> {
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn increment(&mut self, key: [f64; N]) {
        self.add(key, 1);
    }

    /// Adds `count` occurrences of `key`. A zero count leaves the histogram
    /// unchanged.
    pub fn add(&mut self, key: [f64; N], count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(key.map(Bucket::new)).or_default() += count;
    }

    /// Returns the count stored for `key`, or zero.
    #[must_use]
    pub fn count(&self, key: [f64; N]) -> usize {
        self.counts
            .get(&key.map(Bucket::new))
            .copied()
            .unwrap_or(0)
    }

    /// Iterates over `(key, count)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = ([f64; N], usize)> + '_ {
        self.counts
            .iter()
            .map(|(key, &count)| (key.map(Bucket::value), count))
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.counts.len() }

    /// Returns whether no key has been counted.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Adds every count of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        if self.counts.len() < other.counts.len() {
            let smaller = std::mem::replace(&mut self.counts, other.counts);
            self.absorb(smaller);
        } else {
            self.absorb(other.counts);
        }
    }

    /// Projects the histogram onto one axis by summing the other coordinates
    /// out. An `axis` outside `0..N` yields an empty histogram.
    #[must_use]
    pub fn marginal(&self, axis: usize) -> Histogram<1> {
        let mut projected = Histogram::new();
        for (key, &count) in &self.counts {
            if let Some(bucket) = key.get(axis) {
                projected.add([bucket.value()], count);
            }
        }
        projected
    }

    fn absorb(&mut self, counts: BTreeMap<[Bucket; N], usize>) {
        for (key, count) in counts {
            match self.counts.entry(key) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(count);
                }
                btree_map::Entry::Occupied(mut slot) => *slot.get_mut() += count,
            }
        }
    }
}

impl<const N: usize> FromIterator<[f64; N]> for Histogram<N> {
    fn from_iter<I: IntoIterator<Item = [f64; N]>>(iter: I) -> Self {
        let mut hist = Self::new();
        hist.extend(iter);
        hist
    }
}

impl<const N: usize> Extend<[f64; N]> for Histogram<N> {
    fn extend<I: IntoIterator<Item = [f64; N]>>(&mut self, iter: I) {
        for key in iter {
            self.increment(key);
        }
    }
}

/// Streaming mean and variance of one sample series (Welford's method).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningMean {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMean {
    /// Folds one sample into the running statistics.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Combines two series as if every sample had been pushed into one
    /// (Chan et al. parallel update).
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let total = self.count + other.count;
        let delta = other.mean - self.mean;
        let weight = other.count as f64 / total as f64;
        self.mean += delta * weight;
        self.m2 += other.m2 + delta * delta * self.count as f64 * weight;
        self.count = total;
    }

    /// Number of samples folded in.
    #[must_use]
    #[rustfmt::skip]
    pub fn count(&self) -> usize { self.count }

    /// Mean of the samples; NaN before the first sample.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    /// Unbiased sample variance; NaN with fewer than two samples.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Square root of [`Self::variance`].
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the mean.
    #[must_use]
    pub fn std_error(&self) -> f64 {
        self.std_dev() / (self.count as f64).sqrt()
    }
}

/// Running statistics of a value, grouped by an `f64` key.
///
/// # Examples
/// ```
/// use graphstat_core::AverageCorrelation;
///
/// let mut table = AverageCorrelation::new();
/// table.push(2.0, 1.0);
/// table.push(2.0, 3.0);
/// let entry = table.get(2.0).expect("key present");
/// assert_eq!(entry.count(), 2);
/// assert_eq!(entry.mean(), 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AverageCorrelation {
    entries: BTreeMap<Bucket, RunningMean>,
}

impl AverageCorrelation {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` as a sample under `key`.
    pub fn push(&mut self, key: f64, value: f64) {
        self.entries.entry(Bucket::new(key)).or_default().push(value);
    }

    /// Returns the statistics recorded under `key`.
    #[must_use]
    pub fn get(&self, key: f64) -> Option<&RunningMean> {
        self.entries.get(&Bucket::new(key))
    }

    /// Iterates over keys in ascending order with their statistics.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &RunningMean)> + '_ {
        self.entries.iter().map(|(key, stats)| (key.value(), stats))
    }

    /// Number of distinct keys.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns whether no sample has been recorded.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Combines every series of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (key, stats) in &other.entries {
            self.entries.entry(*key).or_default().merge(stats);
        }
    }
}
