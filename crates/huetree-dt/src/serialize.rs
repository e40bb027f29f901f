//! Tree serialization and deserialization via bincode.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::DtError;
use crate::node::Node;
use crate::tree::DecisionTree;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// Versioned envelope for the serialized tree.
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelEnvelope {
    /// Format version for compatibility checking.
    format_version: u32,
    /// Number of nodes in the arena.
    n_nodes: usize,
    /// Number of training samples the tree was built from.
    n_samples: usize,
    /// The serialized tree.
    tree: DecisionTree,
}

impl DecisionTree {
    /// Save the tree to a binary file.
    ///
    /// Uses bincode encoding wrapped in a versioned envelope.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtError::SerializeModel`] | bincode encoding failed |
    /// | [`DtError::WriteModel`] | file write failed |
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DtError> {
        let path = path.as_ref();

        let envelope = ModelEnvelope {
            format_version: FORMAT_VERSION,
            n_nodes: self.n_nodes(),
            n_samples: self.total_weight(),
            tree: self.clone(),
        };

        let bytes = bincode::serialize(&envelope)
            .map_err(|e| DtError::SerializeModel { source: e })?;

        std::fs::write(path, &bytes).map_err(|e| DtError::WriteModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(
            size_bytes = bytes.len(),
            n_nodes = self.n_nodes(),
            "model saved"
        );

        Ok(())
    }

    /// Load a tree from a binary file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtError::ReadModel`] | file read failed |
    /// | [`DtError::DeserializeModel`] | bincode decoding failed |
    /// | [`DtError::IncompatibleModelVersion`] | format version mismatch |
    /// | [`DtError::CorruptModel`] | decoded arena is not a valid tree |
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DtError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| DtError::ReadModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        let envelope: ModelEnvelope =
            bincode::deserialize(&bytes).map_err(|e| DtError::DeserializeModel {
                path: path.to_path_buf(),
                source: e,
            })?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(DtError::IncompatibleModelVersion {
                expected: FORMAT_VERSION,
                found: envelope.format_version,
                path: path.to_path_buf(),
            });
        }

        check_arena(&envelope).map_err(|reason| DtError::CorruptModel {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(
            n_nodes = envelope.n_nodes,
            n_samples = envelope.n_samples,
            "model loaded"
        );

        Ok(envelope.tree)
    }
}

/// Children always sit after their parent in the arena, which also rules
/// out cycles.
fn check_arena(envelope: &ModelEnvelope) -> Result<(), String> {
    let nodes = envelope.tree.nodes();
    if nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }
    if envelope.n_nodes != nodes.len() {
        return Err(format!(
            "header records {} nodes but arena holds {}",
            envelope.n_nodes,
            nodes.len()
        ));
    }
    for (i, node) in nodes.iter().enumerate() {
        if let Node::Branch { hi, lo, .. } = node {
            for child in [hi.index(), lo.index()] {
                if child <= i || child >= nodes.len() {
                    return Err(format!("branch {i} points to node {child}"));
                }
            }
        }
    }
    Ok(())
}
