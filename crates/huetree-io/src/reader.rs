//! Labeled pixel block reader with full input validation.

use std::io::Read;
use std::iter::Enumerate;
use std::path::{Path, PathBuf};
use std::str::{FromStr, Lines, SplitAsciiWhitespace};

use huetree_dt::{ColorClass, Sample};
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::SampleSet;

/// Reads labeled pixel samples from a text file.
///
/// Expected format, repeated until end of input:
/// - a label line naming the color of every pixel in the block
/// - a `width height` line
/// - `width * height` triples of `r g b` integers in `0..=255`
///
/// Numeric tokens are whitespace-delimited and may wrap across lines.
/// Blank lines between blocks and at the end of the file are ignored.
/// The label line is matched exactly against the lowercase palette names;
/// anything else, including other capitalizations or padding, loads as
/// [`ColorClass::FALLBACK`].
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or cannot be opened |
/// | [`IoError::Read`] | File contents are unreadable or not UTF-8 |
/// | [`IoError::MissingDimensions`] | Input ends right after a label |
/// | [`IoError::MalformedToken`] | A dimension or channel is not an integer in range |
/// | [`IoError::TruncatedBlock`] | Input ends before `width * height` pixels |
/// | [`IoError::PixelCountMismatch`] | Extra values follow the last pixel on its line |
pub struct SampleReader {
    path: PathBuf,
}

impl SampleReader {
    /// Create a new reader for the given sample file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the sample file, returning a [`SampleSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SampleSet, IoError> {
        let mut file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        let mut text = String::new();
        file.read_to_string(&mut text).map_err(|e| IoError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        self.parse(&text)
    }

    fn parse(&self, text: &str) -> Result<SampleSet, IoError> {
        let mut tokens = Tokens::new(text);
        let mut samples = Vec::new();
        let mut n_blocks = 0usize;

        while let Some((label_line, raw_label)) = tokens.next_line() {
            let label = ColorClass::from_name_or_fallback(raw_label);

            let Some(width_token) = tokens.next_token() else {
                return Err(IoError::MissingDimensions {
                    path: self.path.clone(),
                    line: label_line,
                    label: raw_label.to_string(),
                });
            };
            let width: usize = self.parse_token(width_token, "width")?;
            let height: usize = match tokens.next_token() {
                Some(token) => self.parse_token(token, "height")?,
                None => {
                    return Err(IoError::MissingDimensions {
                        path: self.path.clone(),
                        line: label_line,
                        label: raw_label.to_string(),
                    });
                }
            };
            let n_pixels = width.saturating_mul(height);
            debug!(label = %label, width, height, line = label_line, "reading block");

            for got in 0..n_pixels {
                let mut rgb = [0u8; 3];
                for channel in &mut rgb {
                    let Some(token) = tokens.next_token() else {
                        return Err(IoError::TruncatedBlock {
                            path: self.path.clone(),
                            label: raw_label.to_string(),
                            expected: n_pixels,
                            got,
                        });
                    };
                    *channel = self.parse_token(token, "color channel")?;
                }
                let [red, green, blue] = rgb;
                samples.push(Sample::with_class(label, red, green, blue));
            }

            if tokens.has_leftover() {
                return Err(IoError::PixelCountMismatch {
                    path: self.path.clone(),
                    label: raw_label.to_string(),
                    line: tokens.line,
                    expected: n_pixels,
                });
            }
            n_blocks += 1;
        }

        info!(n_samples = samples.len(), n_blocks, "samples loaded");

        Ok(SampleSet::new(samples))
    }

    fn parse_token<T: FromStr>(
        &self,
        (line, raw): (usize, &str),
        expected: &'static str,
    ) -> Result<T, IoError> {
        raw.parse().map_err(|_| IoError::MalformedToken {
            path: self.path.clone(),
            line,
            raw: raw.to_string(),
            expected,
        })
    }
}

/// Whitespace tokens and whole lines drawn from the same input.
struct Tokens<'a> {
    lines: Enumerate<Lines<'a>>,
    current: SplitAsciiWhitespace<'a>,
    /// One-based number of the line `current` came from.
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            current: "".split_ascii_whitespace(),
            line: 0,
        }
    }

    /// Next whitespace-delimited token and its line number.
    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some(token) = self.current.next() {
                return Some((self.line, token));
            }
            let (i, line) = self.lines.next()?;
            self.line = i + 1;
            self.current = line.split_ascii_whitespace();
        }
    }

    /// Next non-blank line as written, starting after the current one.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.current = "".split_ascii_whitespace();
        for (i, line) in self.lines.by_ref() {
            if !line.trim().is_empty() {
                self.line = i + 1;
                return Some((self.line, line));
            }
        }
        None
    }

    fn has_leftover(&self) -> bool {
        self.current.clone().next().is_some()
    }
}
