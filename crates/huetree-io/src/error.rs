//! I/O error types for huetree-io.

use std::path::PathBuf;

/// Errors from reading and writing labeled pixel sample files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or cannot be opened.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the file opened but its contents could not be read
    /// (for example, invalid UTF-8).
    #[error("cannot read {path}")]
    Read {
        /// Path to the sample file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when input ends right after a label line.
    #[error("missing `width height` line after label \"{label}\" (line {line}) in {path}")]
    MissingDimensions {
        /// Path to the sample file.
        path: PathBuf,
        /// One-based line number of the label.
        line: usize,
        /// The block's label as written.
        label: String,
    },

    /// Returned when a numeric token does not parse as the expected kind.
    #[error("malformed {expected} \"{raw}\" at line {line} in {path}")]
    MalformedToken {
        /// Path to the sample file.
        path: PathBuf,
        /// One-based line number of the token.
        line: usize,
        /// The raw token text.
        raw: String,
        /// What the token should have been.
        expected: &'static str,
    },

    /// Returned when input ends before a block supplied `width * height`
    /// pixel triples.
    #[error("block \"{label}\" in {path} ends after {got} of {expected} pixels")]
    TruncatedBlock {
        /// Path to the sample file.
        path: PathBuf,
        /// The block's label as written.
        label: String,
        /// Pixels declared by the block's dimensions.
        expected: usize,
        /// Complete pixel triples actually read.
        got: usize,
    },

    /// Returned when the last pixel line of a block carries extra values.
    #[error("block \"{label}\" in {path} has extra values on line {line} beyond its {expected} pixels")]
    PixelCountMismatch {
        /// Path to the sample file.
        path: PathBuf,
        /// The block's label as written.
        label: String,
        /// One-based line number carrying the surplus.
        line: usize,
        /// Pixels declared by the block's dimensions.
        expected: usize,
    },

    /// Returned when a sample file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
