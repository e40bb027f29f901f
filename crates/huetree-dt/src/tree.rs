use tracing::{debug, instrument};

use crate::{
    color::ColorClass,
    node::{Node, NodeIndex},
    sample::Sample,
    split::find_best_split,
};

/// Configuration for growing a fixed-depth decision tree.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `depth`   | 4       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionTreeConfig {
    pub(crate) depth: usize,
}

impl DecisionTreeConfig {
    /// Default number of branch levels.
    pub const DEFAULT_DEPTH: usize = 4;

    /// Create a config that grows branches down to `depth` levels.
    ///
    /// A depth of 0 yields a single leaf.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Return the maximum number of branch levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Grow a tree from `samples`.
    ///
    /// Every node up to the configured depth takes the cheapest split
    /// found by an exhaustive scan over all features and observed values;
    /// nodes at the depth limit, or where no split beats the initial bound,
    /// become majority-label leaves. Never fails: an empty sample set gives
    /// a single zero-weight [`ColorClass::FALLBACK`] leaf.
    #[instrument(skip(self, samples), fields(n_samples = samples.len(), depth = self.depth))]
    pub fn fit(&self, samples: &[Sample]) -> DecisionTree {
        let sample_indices: Vec<usize> = (0..samples.len()).collect();
        let mut arena: Vec<Node> = Vec::new();

        let root = build_tree(samples, &sample_indices, self.depth, &mut arena);

        debug!(
            root_index = root.index(),
            n_nodes = arena.len(),
            "decision tree built"
        );

        DecisionTree {
            nodes: arena,
            max_depth: self.depth,
        }
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}

/// Leaf labeled with the most frequent class among `sample_indices`.
///
/// The winner is the first class to reach the highest count while scanning
/// in index order, so ties go to whichever class gets there first.
fn majority_leaf(samples: &[Sample], sample_indices: &[usize]) -> Node {
    let mut frequencies = [0usize; ColorClass::COUNT];
    let mut best_freq = 0;
    let mut best = ColorClass::FALLBACK;
    for &si in sample_indices {
        let class = samples[si].label();
        frequencies[class.index()] += 1;
        if frequencies[class.index()] > best_freq {
            best_freq = frequencies[class.index()];
            best = class;
        }
    }
    Node::Leaf {
        label: best,
        weight: sample_indices.len(),
    }
}

/// Recursively build the arena-based decision tree.
///
/// Returns the [`NodeIndex`] of the node just created in `arena`.
fn build_tree(
    samples: &[Sample],
    sample_indices: &[usize],
    depth: usize,
    arena: &mut Vec<Node>,
) -> NodeIndex {
    let push = |arena: &mut Vec<Node>, node: Node| -> NodeIndex {
        arena.push(node);
        NodeIndex::new(arena.len() - 1)
    };

    if depth < 1 {
        return push(arena, majority_leaf(samples, sample_indices));
    }

    let Some(split) = find_best_split(samples, sample_indices) else {
        return push(arena, majority_leaf(samples, sample_indices));
    };

    debug!(
        feature = %split.feature,
        threshold = split.threshold,
        cost = %split.cost,
        n_hi = split.hi_indices.len(),
        n_lo = split.lo_indices.len(),
        depth,
        "split chosen"
    );

    // Arena pattern: reserve index, recurse, then overwrite with the branch.
    let node_idx = arena.len();
    arena.push(Node::Leaf {
        label: ColorClass::FALLBACK,
        weight: 0,
    });

    let hi = build_tree(samples, &split.hi_indices, depth - 1, arena);
    let lo = build_tree(samples, &split.lo_indices, depth - 1, arena);

    arena[node_idx] = Node::Branch {
        feature: split.feature,
        threshold: split.threshold,
        hi,
        lo,
        n_samples: sample_indices.len(),
        cost: split.cost,
    };

    NodeIndex::new(node_idx)
}

/// A fitted fixed-depth decision tree over color features.
///
/// Stored as an arena-based `Vec<Node>` with the root at index 0. The tree
/// is never mutated after building, so it can be shared freely across
/// threads for classification.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) max_depth: usize,
}

impl DecisionTree {
    /// Build a tree from `samples` with at most `depth` branch levels.
    ///
    /// Shorthand for `DecisionTreeConfig::new(depth).fit(samples)`.
    #[must_use]
    pub fn build(samples: &[Sample], depth: usize) -> Self {
        DecisionTreeConfig::new(depth).fit(samples)
    }

    /// Classify a sample by walking from the root: at each branch, go to
    /// `hi` when the sample's feature value exceeds the threshold and to
    /// `lo` otherwise.
    #[must_use]
    pub fn classify(&self, sample: &Sample) -> ColorClass {
        match self.node(self.leaf_index(sample)) {
            Node::Leaf { label, .. } => *label,
            Node::Branch { .. } => unreachable!("traversal always ends at a leaf"),
        }
    }

    /// Classify a raw RGB color.
    #[must_use]
    pub fn classify_rgb(&self, red: u8, green: u8, blue: u8) -> ColorClass {
        self.classify(&Sample::unlabeled(red, green, blue))
    }

    /// Return the index of the leaf `sample` ends up in.
    #[must_use]
    pub fn leaf_index(&self, sample: &Sample) -> NodeIndex {
        let mut idx = self.root();
        loop {
            match self.node(idx) {
                Node::Leaf { .. } => return idx,
                Node::Branch {
                    feature,
                    threshold,
                    hi,
                    lo,
                    ..
                } => {
                    idx = if sample.feature(*feature) > *threshold { *hi } else { *lo };
                }
            }
        }
    }

    /// Return the index of the root node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    /// Return the node at `idx`.
    ///
    /// Panics if `idx` did not come from this tree.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.index()]
    }

    /// Return all nodes in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the depth limit the tree was built with.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return the total number of nodes in the tree (both branches and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Iterate over leaves as `(index, label, weight)` in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeIndex, ColorClass, usize)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Leaf { label, weight } => Some((NodeIndex::new(i), *label, *weight)),
            Node::Branch { .. } => None,
        })
    }

    /// Return the sum of all leaf weights, which equals the number of
    /// training samples.
    #[must_use]
    pub fn total_weight(&self) -> usize {
        self.leaves().map(|(_, _, weight)| weight).sum()
    }

    /// Return the number of branch levels on the longest root-to-leaf path.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((idx, d)) = stack.pop() {
            match self.node(idx) {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Branch { hi, lo, .. } => {
                    stack.push((*hi, d + 1));
                    stack.push((*lo, d + 1));
                }
            }
        }
        max_depth
    }
}
