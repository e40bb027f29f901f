//! Confusion matrix and per-class classification metrics.

use std::fmt;

use crate::color::ColorClass;
use crate::error::DtError;

/// A confusion matrix over the color palette.
///
/// Entry `matrix[true][predicted]` counts how many samples labeled `true`
/// were classified as `predicted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: [[usize; ColorClass::COUNT]; ColorClass::COUNT],
}

/// Per-class precision, recall, and F1 score.
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    /// The class.
    pub class: ColorClass,
    /// Precision: TP / (TP + FP). 0.0 if no predictions for this class.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if no true samples for this class.
    pub recall: f64,
    /// F1: 2 * precision * recall / (precision + recall). 0.0 if both are zero.
    pub f1: f64,
    /// Number of true samples in this class.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from paired true and predicted labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtError::LabelCountMismatch`] | the slices differ in length |
    /// | [`DtError::EmptyDataset`] | zero labels are provided |
    pub fn from_labels(
        true_labels: &[ColorClass],
        predicted: &[ColorClass],
    ) -> Result<Self, DtError> {
        if true_labels.len() != predicted.len() {
            return Err(DtError::LabelCountMismatch {
                n_true: true_labels.len(),
                n_predicted: predicted.len(),
            });
        }
        if true_labels.is_empty() {
            return Err(DtError::EmptyDataset);
        }
        let mut matrix = [[0usize; ColorClass::COUNT]; ColorClass::COUNT];
        for (&t, &p) in true_labels.iter().zip(predicted) {
            matrix[t.index()][p.index()] += 1;
        }
        Ok(Self { matrix })
    }

    /// Count of samples labeled `truth` and classified as `predicted`.
    #[must_use]
    pub fn count(&self, truth: ColorClass, predicted: ColorClass) -> usize {
        self.matrix[truth.index()][predicted.index()]
    }

    /// Overall accuracy: proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..ColorClass::COUNT).map(|i| self.matrix[i][i]).sum();
        let total: usize = self.matrix.iter().flat_map(|row| row.iter()).sum();
        if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        }
    }

    /// Per-class precision, recall, F1, and support, in palette order.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        ColorClass::ALL
            .iter()
            .map(|&class| {
                let c = class.index();
                let tp = self.matrix[c][c];
                let fp: usize = (0..ColorClass::COUNT)
                    .filter(|&i| i != c)
                    .map(|i| self.matrix[i][c])
                    .sum();
                let fn_: usize = (0..ColorClass::COUNT)
                    .filter(|&j| j != c)
                    .map(|j| self.matrix[c][j])
                    .sum();
                let support = tp + fn_;
                let precision = if tp + fp == 0 {
                    0.0
                } else {
                    tp as f64 / (tp + fp) as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    class,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for class in ColorClass::ALL {
            write!(f, " {:>7}", class.name())?;
        }
        writeln!(f)?;

        for (class, row) in ColorClass::ALL.iter().zip(&self.matrix) {
            write!(f, "{:>8}", class.name())?;
            for val in row {
                write!(f, " {val:>7}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorClass::{Blue, Green, Red};

    #[test]
    fn perfect_predictions() {
        let labels = vec![Red, Red, Green, Blue];
        let cm = ConfusionMatrix::from_labels(&labels, &labels).unwrap();
        assert!((cm.accuracy() - 1.0).abs() < f64::EPSILON);
        for m in cm.class_metrics() {
            if m.support > 0 {
                assert!((m.f1 - 1.0).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn known_confusion_matrix() {
        let truth = vec![Red, Red, Red, Green, Green, Green, Blue, Blue, Blue];
        let predicted = vec![Red, Red, Green, Green, Green, Blue, Blue, Blue, Red];
        let cm = ConfusionMatrix::from_labels(&truth, &predicted).unwrap();

        assert_eq!(cm.count(Red, Green), 1);
        assert_eq!(cm.count(Blue, Red), 1);

        let metrics = cm.class_metrics();
        let red = &metrics[Red.index()];
        assert!((red.precision - 2.0 / 3.0).abs() < 1e-10);
        assert!((red.recall - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(red.support, 3);

        assert!((cm.accuracy() - 6.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn empty_labels_error() {
        let err = ConfusionMatrix::from_labels(&[], &[]).unwrap_err();
        assert!(matches!(err, DtError::EmptyDataset));
    }

    #[test]
    fn mismatched_lengths_error() {
        let err = ConfusionMatrix::from_labels(&[Red, Green], &[Red]).unwrap_err();
        assert!(matches!(
            err,
            DtError::LabelCountMismatch {
                n_true: 2,
                n_predicted: 1
            }
        ));
    }

    #[test]
    fn zero_support_class_metrics() {
        let labels = vec![Red, Blue];
        let cm = ConfusionMatrix::from_labels(&labels, &labels).unwrap();
        let metrics = cm.class_metrics();
        let yellow = &metrics[ColorClass::Yellow.index()];
        assert_eq!(yellow.support, 0);
        assert!(yellow.recall.abs() < f64::EPSILON);
    }

    #[test]
    fn display_lists_class_names() {
        let cm = ConfusionMatrix::from_labels(&[Red], &[Blue]).unwrap();
        let output = cm.to_string();
        assert!(output.contains("yellow"));
        assert_eq!(output.lines().count(), ColorClass::COUNT + 1);
    }
}
