//! Domain types for huetree-io.

use huetree_dt::{ClassCounts, Sample};

/// Every pixel loaded from a sample file, in file order.
///
/// Produced by [`SampleReader`](crate::SampleReader). Duplicate pixels are
/// kept; each one counts toward the majority vote at the leaf it reaches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub(crate) fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Return the number of loaded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` if the file held no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Return the samples in load order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Tally samples per color class.
    #[must_use]
    pub fn class_counts(&self) -> ClassCounts {
        ClassCounts::from_samples(&self.samples)
    }

    /// Consume the set, returning the owned samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}
