use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

pub type Hash = [u8; 32];

/// Filler for the leaves padding a tree up to the next power of two.
pub const EMPTY_NODE: Hash = [0u8; 32];

#[must_use]
pub fn leaf(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"NOMOS_DA_MERKLE_LEAF");
    hasher.update(data);
    hasher.finalize().into()
}

#[must_use]
pub fn node(a: &Hash, b: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"NOMOS_DA_MERKLE_NODE");
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathNode {
    Left(#[serde(with = "nomos_utils::serde::hex_array")] Hash),
    Right(#[serde(with = "nomos_utils::serde::hex_array")] Hash),
}

#[must_use]
pub fn path_root(leaf: Hash, path: &[PathNode]) -> Hash {
    let mut computed_hash = leaf;

    for path_node in path {
        match path_node {
            PathNode::Left(sibling_hash) => {
                computed_hash = node(sibling_hash, &computed_hash);
            }
            PathNode::Right(sibling_hash) => {
                computed_hash = node(&computed_hash, sibling_hash);
            }
        }
    }

    computed_hash
}

/// Leaf position encoded by the sides of the siblings along the path.
#[must_use]
pub fn path_index(path: &[PathNode]) -> usize {
    path.iter()
        .enumerate()
        .fold(0, |idx, (height, path_node)| match path_node {
            PathNode::Left(_) => idx | (1 << height),
            PathNode::Right(_) => idx,
        })
}

/// Binary merkle tree keeping every layer, so multiple paths can be served
/// without rehashing.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree from already hashed leaves, padding with [`EMPTY_NODE`].
    #[must_use]
    pub fn new(mut leaves: Vec<Hash>) -> Self {
        leaves.resize(leaves.len().next_power_of_two(), EMPTY_NODE);
        let mut layers = vec![leaves];
        while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
            let parent = layer
                .chunks_exact(2)
                .map(|pair| node(&pair[0], &pair[1]))
                .collect();
            layers.push(parent);
        }
        Self { layers }
    }

    #[must_use]
    pub fn from_data<T: AsRef<[u8]>>(elements: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            elements
                .into_iter()
                .map(|element| leaf(element.as_ref()))
                .collect(),
        )
    }

    #[must_use]
    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(EMPTY_NODE)
    }

    /// Number of leaves, padding included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn path(&self, idx: usize) -> Vec<PathNode> {
        assert!(idx < self.len());

        let mut idx = idx;
        let mut path = Vec::with_capacity(self.layers.len() - 1);
        for layer in &self.layers[..self.layers.len() - 1] {
            if idx % 2 == 0 {
                path.push(PathNode::Right(layer[idx + 1]));
            } else {
                path.push(PathNode::Left(layer[idx - 1]));
            }
            idx /= 2;
        }
        path
    }
}
