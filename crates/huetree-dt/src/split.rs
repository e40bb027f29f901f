use std::ops::Index;

use crate::color::ColorClass;
use crate::feature::Feature;
use crate::node::SplitCost;
use crate::sample::Sample;

/// `x · ln(x)`, with `xlogx(0) = 0`.
#[must_use]
pub fn xlogx(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x * x.ln() }
}

/// Starting cost for the split search, `5 · n`.
///
/// Any real split costs at most `n · ln(ColorClass::COUNT)`, and
/// `2^5 > ColorClass::COUNT`, so the first genuine candidate always
/// beats it.
#[must_use]
pub fn initial_bound(n_samples: usize) -> SplitCost {
    SplitCost::new(5.0 * n_samples as f64)
}

/// Per-class sample counts for one side of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassCounts {
    counts: [usize; ColorClass::COUNT],
    total: usize,
}

impl ClassCounts {
    /// Count the labels of the given samples.
    #[must_use]
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        let mut counts = Self::default();
        for sample in samples {
            counts.add(sample.label());
        }
        counts
    }

    /// Record one more sample of `class`.
    pub fn add(&mut self, class: ColorClass) {
        self.counts[class.index()] += 1;
        self.total += 1;
    }

    /// Remove one sample of `class`.
    ///
    /// Panics in debug builds if no sample of `class` is recorded.
    pub fn remove(&mut self, class: ColorClass) {
        debug_assert!(self.counts[class.index()] > 0, "removing absent {class}");
        self.counts[class.index()] -= 1;
        self.total -= 1;
    }

    /// Number of samples across all classes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterate `(class, count)` pairs in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorClass, usize)> + '_ {
        ColorClass::ALL.iter().map(|&c| (c, self.counts[c.index()]))
    }
}

impl Index<ColorClass> for ClassCounts {
    type Output = usize;

    fn index(&self, class: ColorClass) -> &usize {
        &self.counts[class.index()]
    }
}

/// Cost of partitioning a node into `below` and `above`.
///
/// `xlogx(|below|) + xlogx(|above|) − Σ_j [xlogx(below_j) + xlogx(above_j)]`.
/// This is the total within-partition entropy in nats scaled by sample
/// count; 0 means both sides are pure.
#[must_use]
pub fn split_cost(below: &ClassCounts, above: &ClassCounts) -> SplitCost {
    let mut cost = xlogx(below.total() as f64) + xlogx(above.total() as f64);
    for class in ColorClass::ALL {
        cost -= xlogx(above[class] as f64) + xlogx(below[class] as f64);
    }
    SplitCost::new(cost)
}

/// Result of finding the best split for a node.
#[derive(Debug, Clone)]
pub(crate) struct SplitResult {
    /// Feature used for the split.
    pub(crate) feature: Feature,
    /// Largest feature value routed to `lo`.
    pub(crate) threshold: u32,
    /// Cost of the winning candidate.
    pub(crate) cost: SplitCost,
    /// Sample indices with `feature > threshold`, in input order.
    pub(crate) hi_indices: Vec<usize>,
    /// Sample indices with `feature <= threshold`, in input order.
    pub(crate) lo_indices: Vec<usize>,
}

/// Find the cheapest `(feature, threshold)` split over every feature and
/// every distinct observed value.
///
/// For each feature in [`Feature::ALL`] order, sorts the node's samples by
/// that feature, then sweeps upward moving samples from `above` into
/// `below` one at a time. The cost is evaluated once per distinct value,
/// after all samples sharing it have moved. The largest value is never
/// evaluated since it would leave `above` empty.
///
/// A candidate replaces the current best only when strictly cheaper, so
/// ties go to the earlier feature and then the lower threshold.
///
/// Returns `None` when no candidate beats [`initial_bound`], which happens
/// when every feature is constant over the node (including zero or one
/// sample).
pub(crate) fn find_best_split(samples: &[Sample], sample_indices: &[usize]) -> Option<SplitResult> {
    let n_samples = sample_indices.len();
    if n_samples == 0 {
        return None;
    }

    let parent_counts = ClassCounts::from_samples(sample_indices.iter().map(|&si| &samples[si]));

    let mut best_cost = initial_bound(n_samples);
    let mut best: Option<(Feature, u32)> = None;

    for feature in Feature::ALL {
        let mut sorted: Vec<(u32, ColorClass)> = sample_indices
            .iter()
            .map(|&si| (samples[si].feature(feature), samples[si].label()))
            .collect();
        sorted.sort_unstable_by_key(|&(value, _)| value);

        // Each feature starts from a full `above` and an empty `below`.
        let mut below = ClassCounts::default();
        let mut above = parent_counts;

        let mut i = 0;
        while i < n_samples {
            let value = sorted[i].0;
            while i < n_samples && sorted[i].0 == value {
                let class = sorted[i].1;
                above.remove(class);
                below.add(class);
                i += 1;
            }

            if above.total() == 0 {
                break;
            }

            let cost = split_cost(&below, &above);
            if cost < best_cost {
                best_cost = cost;
                best = Some((feature, value));
            }
        }
    }

    let (feature, threshold) = best?;

    let mut hi_indices = Vec::new();
    let mut lo_indices = Vec::new();
    for &si in sample_indices {
        if samples[si].feature(feature) > threshold {
            hi_indices.push(si);
        } else {
            lo_indices.push(si);
        }
    }

    Some(SplitResult {
        feature,
        threshold,
        cost: best_cost,
        hi_indices,
        lo_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::{ClassCounts, find_best_split, initial_bound, split_cost, xlogx};
    use crate::color::ColorClass;
    use crate::feature::Feature;
    use crate::sample::Sample;

    fn all(samples: &[Sample]) -> Vec<usize> {
        (0..samples.len()).collect()
    }

    #[test]
    fn xlogx_edge_values() {
        assert_eq!(xlogx(0.0), 0.0);
        assert_eq!(xlogx(1.0), 0.0);
        assert!((xlogx(std::f64::consts::E) - std::f64::consts::E).abs() < 1e-12);
        assert!((xlogx(4.0) - 4.0 * 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn class_counts_track_totals() {
        let mut counts = ClassCounts::default();
        counts.add(ColorClass::Red);
        counts.add(ColorClass::Red);
        counts.add(ColorClass::Blue);
        counts.remove(ColorClass::Red);
        assert_eq!(counts.total(), 2);
        assert_eq!(counts[ColorClass::Red], 1);
        assert_eq!(counts[ColorClass::Blue], 1);
        assert_eq!(counts[ColorClass::Green], 0);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 2);
    }

    #[test]
    fn pure_partition_costs_zero() {
        let mut below = ClassCounts::default();
        let mut above = ClassCounts::default();
        for _ in 0..4 {
            below.add(ColorClass::Red);
        }
        for _ in 0..3 {
            above.add(ColorClass::Blue);
        }
        assert!(split_cost(&below, &above).value().abs() < 1e-12);
    }

    #[test]
    fn mixed_partition_cost() {
        // below: {red, blue}, above: {}  -> 2 ln 2
        let mut below = ClassCounts::default();
        below.add(ColorClass::Red);
        below.add(ColorClass::Blue);
        let above = ClassCounts::default();
        let cost = split_cost(&below, &above).value();
        assert!((cost - 2.0 * 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn initial_bound_dominates_worst_case() {
        // One sample of each class on each side is as impure as it gets.
        let mut below = ClassCounts::default();
        let mut above = ClassCounts::default();
        for class in ColorClass::ALL {
            below.add(class);
            above.add(class);
        }
        let n = below.total() + above.total();
        assert!(split_cost(&below, &above) < initial_bound(n));
    }

    #[test]
    fn separates_red_from_blue() {
        let mut samples = vec![Sample::new("red", 255, 0, 0); 3];
        samples.push(Sample::new("blue", 0, 0, 255));
        let split = find_best_split(&samples, &all(&samples)).expect("split exists");
        assert_eq!(split.feature, Feature::Red);
        assert_eq!(split.threshold, 0);
        assert!(split.cost.value().abs() < 1e-12);
        assert_eq!(split.hi_indices, vec![0, 1, 2]);
        assert_eq!(split.lo_indices, vec![3]);
    }

    #[test]
    fn constant_features_yield_no_split() {
        let samples = vec![
            Sample::new("red", 90, 90, 90),
            Sample::new("blue", 90, 90, 90),
            Sample::new("blue", 90, 90, 90),
        ];
        assert!(find_best_split(&samples, &all(&samples)).is_none());
    }

    #[test]
    fn empty_and_single_sample_yield_no_split() {
        let samples = vec![Sample::new("red", 255, 0, 0)];
        assert!(find_best_split(&samples, &[]).is_none());
        assert!(find_best_split(&samples, &[0]).is_none());
    }

    #[test]
    fn ties_prefer_first_feature_then_lowest_threshold() {
        // Red, green, blue and value all give the same costs; red is
        // scanned first, and thresholds 0 and 100 tie on red.
        let samples = vec![
            Sample::new("white", 0, 0, 0),
            Sample::new("black", 100, 100, 100),
            Sample::new("white", 200, 200, 200),
        ];
        let split = find_best_split(&samples, &all(&samples)).expect("split exists");
        assert_eq!(split.feature, Feature::Red);
        assert_eq!(split.threshold, 0);
        assert_eq!(split.lo_indices, vec![0]);
        assert_eq!(split.hi_indices, vec![1, 2]);
    }

    #[test]
    fn later_feature_wins_only_when_strictly_better() {
        // Red is constant and green only half separates; blue is pure.
        let samples = vec![
            Sample::new("red", 200, 0, 0),
            Sample::new("purple", 200, 0, 200),
            Sample::new("red", 200, 10, 0),
            Sample::new("purple", 200, 0, 180),
        ];
        let split = find_best_split(&samples, &all(&samples)).expect("split exists");
        assert_eq!(split.feature, Feature::Blue);
        assert_eq!(split.threshold, 0);
        assert_eq!(split.hi_indices, vec![1, 3]);
        assert_eq!(split.lo_indices, vec![0, 2]);
    }
}
