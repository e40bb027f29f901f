//! Structural properties of fitted trees on deterministic synthetic data.

use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use huetree_dt::{ColorClass, DecisionTree, Node, NodeIndex, RenderMode, Sample};

// ---------------------------------------------------------------------------
// Helper: noisy pixels scattered around a prototype per class
// ---------------------------------------------------------------------------

const PROTOTYPES: [(&str, (i32, i32, i32)); 8] = [
    ("red", (220, 30, 30)),
    ("orange", (240, 140, 20)),
    ("yellow", (235, 225, 40)),
    ("green", (40, 170, 60)),
    ("blue", (30, 60, 210)),
    ("purple", (120, 40, 160)),
    ("black", (15, 15, 15)),
    ("white", (240, 240, 240)),
];

fn make_samples(per_class: usize, seed: u64) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(per_class * PROTOTYPES.len());
    for i in 0..per_class * PROTOTYPES.len() {
        let (label, (r, g, b)) = PROTOTYPES[i % PROTOTYPES.len()];
        let mut jitter = |c: i32| (c + rng.gen_range(-15..=15)).clamp(0, 255) as u8;
        samples.push(Sample::new(label, jitter(r), jitter(g), jitter(b)));
    }
    samples
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn separates_three_red_from_one_blue() {
    let mut samples = vec![Sample::new("red", 255, 0, 0); 3];
    samples.push(Sample::new("blue", 0, 0, 255));
    let tree = DecisionTree::build(&samples, 1);

    let Node::Branch { hi, lo, cost, .. } = tree.node(tree.root()) else {
        panic!("root should be a branch");
    };
    assert!(*cost < huetree_dt::initial_bound(samples.len()));
    assert_eq!(tree.node(*hi), &Node::Leaf { label: ColorClass::Red, weight: 3 });
    assert_eq!(tree.node(*lo), &Node::Leaf { label: ColorClass::Blue, weight: 1 });
    assert_eq!(tree.classify_rgb(255, 0, 0), ColorClass::Red);
    assert_eq!(tree.classify_rgb(0, 0, 255), ColorClass::Blue);
}

#[test]
fn identical_pixels_collapse_to_majority_leaf() {
    let samples = vec![
        Sample::new("brown", 120, 80, 40),
        Sample::new("orange", 120, 80, 40),
        Sample::new("orange", 120, 80, 40),
        Sample::new("brown", 120, 80, 40),
        Sample::new("orange", 120, 80, 40),
    ];
    let tree = DecisionTree::build(&samples, 4);
    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(
        tree.node(tree.root()),
        &Node::Leaf { label: ColorClass::Orange, weight: 5 }
    );
}

#[test]
fn empty_collection_gives_zero_weight_fallback() {
    let tree = DecisionTree::build(&[], 4);
    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(
        tree.node(tree.root()),
        &Node::Leaf { label: ColorClass::FALLBACK, weight: 0 }
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn depth_zero_is_always_one_leaf() {
    for per_class in [1, 5, 40] {
        let samples = make_samples(per_class, 7);
        let tree = DecisionTree::build(&samples, 0);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.node(tree.root()).n_samples(), samples.len());
    }
}

#[test]
fn height_never_exceeds_depth() {
    let samples = make_samples(30, 11);
    for depth in 0..7 {
        let tree = DecisionTree::build(&samples, depth);
        assert!(tree.depth() <= depth, "depth {} > {depth}", tree.depth());
        assert_eq!(tree.total_weight(), samples.len());
    }
}

#[test]
fn training_samples_land_in_leaves_that_counted_them() {
    let samples = make_samples(25, 3);
    let tree = DecisionTree::build(&samples, 5);

    let mut arrivals: HashMap<NodeIndex, usize> = HashMap::new();
    for sample in &samples {
        *arrivals.entry(tree.leaf_index(sample)).or_default() += 1;
    }

    assert!(arrivals.keys().all(|idx| tree.node(*idx).is_leaf()));
    assert_eq!(tree.leaves().count(), tree.n_leaves());
    for (idx, label, weight) in tree.leaves() {
        let reached = arrivals.get(&idx).copied().unwrap_or(0);
        assert_eq!(reached, weight, "leaf {idx} ({label})");
    }
}

#[test]
fn rebuilding_is_idempotent() {
    let samples = make_samples(20, 99);
    let first = DecisionTree::build(&samples, 4);
    let second = DecisionTree::build(&samples, 4);
    assert_eq!(first, second);
    assert_eq!(first.describe(), second.describe());
}

#[test]
fn description_round_trip_classifies_identically() {
    let samples = make_samples(20, 5);
    let tree = DecisionTree::build(&samples, 4);
    let parsed = DecisionTree::from_description(&tree.describe()).unwrap();

    assert_eq!(parsed.n_nodes(), tree.n_nodes());
    assert_eq!(parsed.describe(), tree.describe());
    for sample in &samples {
        assert_eq!(parsed.classify(sample), tree.classify(sample));
    }
    let probes = make_samples(10, 6);
    for sample in &probes {
        assert_eq!(parsed.classify(sample), tree.classify(sample));
    }
}

#[test]
fn well_separated_prototypes_are_learned() {
    let samples = make_samples(30, 42);
    let tree = DecisionTree::build(&samples, 6);
    let cm = tree.evaluate(&samples).unwrap();
    assert!(
        cm.accuracy() > 0.9,
        "training accuracy {} <= 0.9",
        cm.accuracy()
    );
}

#[test]
fn every_render_mode_mentions_every_leaf_label() {
    let samples = make_samples(10, 8);
    let tree = DecisionTree::build(&samples, 3);
    let labels: Vec<ColorClass> = tree
        .nodes()
        .iter()
        .filter_map(|n| match n {
            Node::Leaf { label, .. } => Some(*label),
            Node::Branch { .. } => None,
        })
        .collect();

    for mode in RenderMode::ALL {
        let text = tree.render(0, mode);
        for label in &labels {
            let needle = match mode {
                RenderMode::Code => label.name().to_uppercase(),
                _ => label.name().to_string(),
            };
            assert!(text.contains(&needle), "{mode:?} output lacks {needle}");
        }
    }
}
