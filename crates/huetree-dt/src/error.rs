use std::path::PathBuf;

/// Errors from tree description parsing, model persistence, and evaluation.
///
/// Building a tree is infallible and has no variant here.
#[derive(Debug, thiserror::Error)]
pub enum DtError {
    /// Returned when a description ends before the tree is complete.
    #[error("unexpected end of tree description at offset {offset}, expected {expected}")]
    UnexpectedEnd {
        /// Byte offset where input ran out.
        offset: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// Returned when a description contains text the grammar does not allow.
    #[error("unexpected token at offset {offset}: expected {expected}, found \"{found}\"")]
    UnexpectedToken {
        /// Byte offset of the offending text.
        offset: usize,
        /// What the parser was looking for.
        expected: &'static str,
        /// A short excerpt of what was found.
        found: String,
    },

    /// Returned when a branch names a feature outside the feature index.
    #[error("unknown feature \"{name}\" at offset {offset}")]
    UnknownFeature {
        /// The unrecognized feature name.
        name: String,
        /// Byte offset of the name.
        offset: usize,
    },

    /// Returned when a leaf names a color outside the palette.
    #[error("unknown color label \"{name}\" at offset {offset}")]
    UnknownLabel {
        /// The unrecognized label.
        name: String,
        /// Byte offset of the label.
        offset: usize,
    },

    /// Returned when a branch threshold is not a non-negative integer.
    #[error("invalid threshold \"{raw}\" at offset {offset}")]
    InvalidThreshold {
        /// The raw threshold text.
        raw: String,
        /// Byte offset of the threshold.
        offset: usize,
    },

    /// Returned when text follows a complete tree description.
    #[error("trailing input after tree description at offset {offset}")]
    TrailingInput {
        /// Byte offset of the first trailing character.
        offset: usize,
    },

    /// Returned when evaluating against zero samples.
    #[error("evaluation set has zero samples")]
    EmptyDataset,

    /// Returned when model serialization fails.
    #[error("failed to serialize model")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize model from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write model to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read model from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible model version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },

    /// Returned when a decoded model does not form a valid tree.
    #[error("corrupt model in {path}: {reason}")]
    CorruptModel {
        /// Path to the model file.
        path: PathBuf,
        /// Which structural rule the arena breaks.
        reason: String,
    },

    /// Returned when paired label slices differ in length.
    #[error("label count mismatch: {n_true} true labels, {n_predicted} predictions")]
    LabelCountMismatch {
        /// Number of true labels.
        n_true: usize,
        /// Number of predicted labels.
        n_predicted: usize,
    },
}
