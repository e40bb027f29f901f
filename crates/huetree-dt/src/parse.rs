//! Parser for the single-line tree description.
//!
//! Grammar:
//!
//! ```text
//! node := "Terminal(" label ")"
//!       | "NonTerminal(" feature ">" threshold "?" node ":" node ")"
//! ```

use crate::color::ColorClass;
use crate::error::DtError;
use crate::feature::Feature;
use crate::node::{Node, NodeIndex, SplitCost};
use crate::tree::DecisionTree;

impl DecisionTree {
    /// Rebuild a tree from the output of [`DecisionTree::describe`].
    ///
    /// The description carries no training counts, so every leaf weight,
    /// branch sample count, and branch cost is 0. The recorded depth limit
    /// is the depth of the parsed tree. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtError::UnexpectedEnd`] | Input stops mid-node |
    /// | [`DtError::UnexpectedToken`] | Text outside the grammar |
    /// | [`DtError::UnknownFeature`] | Branch feature not in the feature index |
    /// | [`DtError::UnknownLabel`] | Leaf label not in the palette |
    /// | [`DtError::InvalidThreshold`] | Threshold is not a non-negative integer |
    /// | [`DtError::TrailingInput`] | Text after the root node |
    pub fn from_description(description: &str) -> Result<Self, DtError> {
        let trimmed = description.trim_end();
        let start = trimmed.len() - trimmed.trim_start().len();
        let mut parser = Parser {
            input: trimmed,
            pos: start,
            arena: Vec::new(),
        };
        parser.node()?;
        if parser.pos < trimmed.len() {
            return Err(DtError::TrailingInput { offset: parser.pos });
        }
        let mut tree = DecisionTree {
            nodes: parser.arena,
            max_depth: 0,
        };
        tree.max_depth = tree.depth();
        Ok(tree)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    arena: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn excerpt(&self) -> String {
        self.rest().chars().take(16).collect()
    }

    fn expect(&mut self, literal: &'static str) -> Result<(), DtError> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else if self.rest().is_empty() {
            Err(DtError::UnexpectedEnd {
                offset: self.pos,
                expected: literal,
            })
        } else {
            Err(DtError::UnexpectedToken {
                offset: self.pos,
                expected: literal,
                found: self.excerpt(),
            })
        }
    }

    /// Consume characters up to (not including) the first of `stops`.
    fn take_until(
        &mut self,
        stops: &[char],
        expected: &'static str,
    ) -> Result<(usize, &'a str), DtError> {
        let start = self.pos;
        let rest: &'a str = &self.input[start..];
        match rest.find(stops) {
            Some(len) => {
                self.pos += len;
                Ok((start, &rest[..len]))
            }
            None => Err(DtError::UnexpectedEnd {
                offset: self.input.len(),
                expected,
            }),
        }
    }

    fn node(&mut self) -> Result<NodeIndex, DtError> {
        if self.rest().starts_with("Terminal(") {
            self.leaf()
        } else if self.rest().starts_with("NonTerminal(") {
            self.branch()
        } else if self.rest().is_empty() {
            Err(DtError::UnexpectedEnd {
                offset: self.pos,
                expected: "Terminal( or NonTerminal(",
            })
        } else {
            Err(DtError::UnexpectedToken {
                offset: self.pos,
                expected: "Terminal( or NonTerminal(",
                found: self.excerpt(),
            })
        }
    }

    fn leaf(&mut self) -> Result<NodeIndex, DtError> {
        self.expect("Terminal(")?;
        let (offset, name) = self.take_until(&[')'], "label")?;
        let label = ColorClass::from_name(name).ok_or_else(|| DtError::UnknownLabel {
            name: name.to_string(),
            offset,
        })?;
        self.expect(")")?;
        self.arena.push(Node::Leaf { label, weight: 0 });
        Ok(NodeIndex::new(self.arena.len() - 1))
    }

    fn branch(&mut self) -> Result<NodeIndex, DtError> {
        self.expect("NonTerminal(")?;

        let (offset, name) = self.take_until(&['>'], "feature")?;
        let feature: Feature = name.parse().map_err(|_| DtError::UnknownFeature {
            name: name.to_string(),
            offset,
        })?;
        self.expect(">")?;

        let (offset, raw) = self.take_until(&['?'], "threshold")?;
        let threshold: u32 = raw.parse().map_err(|_| DtError::InvalidThreshold {
            raw: raw.to_string(),
            offset,
        })?;
        self.expect("?")?;

        let node_idx = self.arena.len();
        self.arena.push(Node::Leaf {
            label: ColorClass::FALLBACK,
            weight: 0,
        });

        let hi = self.node()?;
        self.expect(":")?;
        let lo = self.node()?;
        self.expect(")")?;

        self.arena[node_idx] = Node::Branch {
            feature,
            threshold,
            hi,
            lo,
            n_samples: 0,
            cost: SplitCost::new(0.0),
        };
        Ok(NodeIndex::new(node_idx))
    }
}
