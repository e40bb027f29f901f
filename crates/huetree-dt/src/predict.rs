//! Batch classification.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::color::ColorClass;
use crate::confusion::ConfusionMatrix;
use crate::error::DtError;
use crate::sample::Sample;
use crate::tree::DecisionTree;

impl DecisionTree {
    /// Classify a batch of samples in parallel, preserving input order.
    #[must_use]
    pub fn classify_batch(&self, samples: &[Sample]) -> Vec<ColorClass> {
        samples
            .into_par_iter()
            .map(|sample| self.classify(sample))
            .collect()
    }

    /// Compare the tree's predictions against the samples' own labels.
    ///
    /// # Errors
    ///
    /// Returns [`DtError::EmptyDataset`] when `samples` is empty.
    pub fn evaluate(&self, samples: &[Sample]) -> Result<ConfusionMatrix, DtError> {
        let truth: Vec<ColorClass> = samples.iter().map(Sample::label).collect();
        let predicted = self.classify_batch(samples);
        ConfusionMatrix::from_labels(&truth, &predicted)
    }
}
