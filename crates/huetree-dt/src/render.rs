//! Text renderings of a fitted tree.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

/// How [`DecisionTree::render`] lays out a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Nested `if`/`else` blocks with `return LABEL;` leaves, ready to paste
    /// into a hand-written classifier.
    #[default]
    Code,
    /// One `feature>threshold?` line per branch followed by its indented
    /// `hi` then `lo` subtrees; leaves show `label  (weight)`.
    Condensed,
    /// The single-line form produced by [`DecisionTree::describe`].
    UltraCondensed,
}

impl RenderMode {
    /// Every mode.
    pub const ALL: [RenderMode; 3] = [
        RenderMode::Code,
        RenderMode::Condensed,
        RenderMode::UltraCondensed,
    ];
}

/// Error returned when a string names no render mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown render mode \"{0}\"")]
pub struct UnknownRenderMode(pub String);

impl FromStr for RenderMode {
    type Err = UnknownRenderMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" | "java" | "verbose" => Ok(RenderMode::Code),
            "condensed" | "brief" => Ok(RenderMode::Condensed),
            "super-brief" => Ok(RenderMode::UltraCondensed),
            other => Err(UnknownRenderMode(other.to_string())),
        }
    }
}

impl DecisionTree {
    /// Fully parenthesized single-line form, for example
    /// `NonTerminal(hue>120?Terminal(red):Terminal(blue))`.
    ///
    /// [`DecisionTree::from_description`] parses it back.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Render the tree as newline-terminated text, starting `indent_level`
    /// tabs deep.
    #[must_use]
    pub fn render(&self, indent_level: usize, mode: RenderMode) -> String {
        Rendered {
            tree: self,
            indent_level,
            mode,
        }
        .to_string()
    }

    fn describe_node(&self, idx: NodeIndex, out: &mut impl Write) -> fmt::Result {
        match self.node(idx) {
            Node::Leaf { label, .. } => write!(out, "Terminal({label})"),
            Node::Branch {
                feature,
                threshold,
                hi,
                lo,
                ..
            } => {
                write!(out, "NonTerminal({feature}>{threshold}?")?;
                self.describe_node(*hi, out)?;
                out.write_char(':')?;
                self.describe_node(*lo, out)?;
                out.write_char(')')
            }
        }
    }

    fn render_node(
        &self,
        idx: NodeIndex,
        indent_level: usize,
        mode: RenderMode,
        out: &mut impl Write,
    ) -> fmt::Result {
        let indent = "\t".repeat(indent_level);
        match (self.node(idx), mode) {
            (Node::Leaf { label, .. }, RenderMode::Code) => {
                writeln!(out, "{indent}return {};", label.name().to_uppercase())
            }
            (Node::Leaf { label, weight }, _) => writeln!(out, "{indent}{label}  ({weight})"),
            (
                Node::Branch {
                    feature,
                    threshold,
                    hi,
                    lo,
                    ..
                },
                RenderMode::Code,
            ) => {
                writeln!(out, "{indent}if({feature} > {threshold}) {{")?;
                self.render_node(*hi, indent_level + 1, mode, out)?;
                writeln!(out, "{indent}}}")?;
                writeln!(out, "{indent}else {{")?;
                self.render_node(*lo, indent_level + 1, mode, out)?;
                writeln!(out, "{indent}}}")
            }
            (
                Node::Branch {
                    feature,
                    threshold,
                    hi,
                    lo,
                    ..
                },
                _,
            ) => {
                writeln!(out, "{indent}{feature}>{threshold}?")?;
                self.render_node(*hi, indent_level + 1, mode, out)?;
                self.render_node(*lo, indent_level + 1, mode, out)
            }
        }
    }
}

/// The single-line description.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe_node(self.root(), f)
    }
}

struct Rendered<'a> {
    tree: &'a DecisionTree,
    indent_level: usize,
    mode: RenderMode,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            RenderMode::UltraCondensed => {
                writeln!(f, "{}{}", "\t".repeat(self.indent_level), self.tree)
            }
            RenderMode::Code | RenderMode::Condensed => {
                self.tree
                    .render_node(self.tree.root(), self.indent_level, self.mode, f)
            }
        }
    }
}
