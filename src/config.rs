//! Run configuration assembled from free-form positional tokens.

use std::path::PathBuf;

use huetree_dt::{DecisionTreeConfig, RenderMode};

/// Usage line printed when a positional token is not understood.
pub const USAGE: &str = "usage: huetree [filename.txt] [code|condensed|super-brief] [depth]";

/// Sample file read when no `.txt` token is given.
pub const DEFAULT_SAMPLE_PATH: &str = "peri.txt";

/// Errors from interpreting positional tokens.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a token is neither a render mode, a `.txt` path, nor a
    /// non-negative integer depth.
    #[error("unrecognized argument \"{token}\"")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
}

/// Everything one run needs: where the samples live, how deep to grow the
/// tree, and how to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub sample_path: PathBuf,
    pub depth: usize,
    pub render_mode: RenderMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_path: PathBuf::from(DEFAULT_SAMPLE_PATH),
            depth: DecisionTreeConfig::DEFAULT_DEPTH,
            render_mode: RenderMode::default(),
        }
    }
}

impl RunConfig {
    /// Apply `tokens` left to right over the defaults; a later token of the
    /// same kind overrides an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidToken`] for the first token that is not
    /// a render mode, does not end in `.txt`, and is not a non-negative
    /// integer.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if let Ok(mode) = token.parse::<RenderMode>() {
                config.render_mode = mode;
            } else if token.ends_with(".txt") {
                config.sample_path = PathBuf::from(token);
            } else {
                config.depth = token.parse().map_err(|_| ConfigError::InvalidToken {
                    token: token.to_string(),
                })?;
            }
        }
        Ok(config)
    }
}
