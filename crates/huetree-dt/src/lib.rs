//! Fixed-depth decision trees that name colors.
//!
//! Raw `(label, r, g, b)` pixels become [`Sample`]s with eight derived
//! integer features. [`DecisionTree::build`] grows a binary tree to a fixed
//! depth, choosing each split by exhaustive scan over every feature and
//! observed value. The fitted tree classifies new colors and renders itself
//! as code, as a condensed outline, or as a one-line description that
//! [`DecisionTree::from_description`] parses back.

mod color;
mod confusion;
mod error;
mod feature;
mod node;
mod parse;
mod predict;
mod render;
mod sample;
mod serialize;
mod split;
mod tree;

pub use color::ColorClass;
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use error::DtError;
pub use feature::{Feature, UnknownFeature};
pub use node::{Node, NodeIndex, SplitCost};
pub use render::{RenderMode, UnknownRenderMode};
pub use sample::Sample;
pub use split::{ClassCounts, initial_bound, split_cost, xlogx};
pub use tree::{DecisionTree, DecisionTreeConfig};
