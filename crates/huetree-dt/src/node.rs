use std::fmt;

use crate::color::ColorClass;
use crate::feature::Feature;

/// Index into a `Vec<Node>` arena, identifying a specific node in a decision tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Create a new node index from a zero-based arena position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split cost of a chosen branch (lower is purer).
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd,
    serde::Serialize, serde::Deserialize,
)]
pub struct SplitCost(f64);

impl SplitCost {
    /// Create a new cost value.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw cost value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SplitCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A node in a decision tree arena.
///
/// Trees are stored as `Vec<Node>` where children are referenced by
/// [`NodeIndex`] rather than pointers.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node {
    /// An interior two-way split.
    Branch {
        /// Feature compared at this node.
        feature: Feature,
        /// Samples with `feature > threshold` go to `hi`, the rest to `lo`.
        threshold: u32,
        /// Child taken when the feature exceeds the threshold.
        hi: NodeIndex,
        /// Child taken otherwise.
        lo: NodeIndex,
        /// Number of training samples that reached this node.
        n_samples: usize,
        /// Cost of the chosen split.
        cost: SplitCost,
    },
    /// A terminal node naming one class.
    Leaf {
        /// The class every sample reaching this leaf is assigned.
        label: ColorClass,
        /// Number of training samples that reached this leaf.
        weight: usize,
    },
}

impl Node {
    /// Return the number of training samples that reached this node.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Branch { n_samples, .. } => *n_samples,
            Node::Leaf { weight, .. } => *weight,
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeIndex, SplitCost};
    use crate::color::ColorClass;
    use crate::feature::Feature;

    #[test]
    fn node_index_roundtrip() {
        let ni = NodeIndex::new(42);
        assert_eq!(ni.index(), 42);
        assert_eq!(format!("{ni}"), "42");
    }

    #[test]
    fn split_cost_display() {
        assert_eq!(format!("{}", SplitCost::new(0.0)), "0.000000");
        assert_eq!(format!("{}", SplitCost::new(1.5)), "1.500000");
    }

    #[test]
    fn leaf_and_branch_counts() {
        let leaf = Node::Leaf { label: ColorClass::Red, weight: 7 };
        let branch = Node::Branch {
            feature: Feature::Hue,
            threshold: 120,
            hi: NodeIndex::new(1),
            lo: NodeIndex::new(2),
            n_samples: 20,
            cost: SplitCost::new(3.2),
        };
        assert!(leaf.is_leaf());
        assert!(!branch.is_leaf());
        assert_eq!(leaf.n_samples(), 7);
        assert_eq!(branch.n_samples(), 20);
    }
}
