//! Octree over triangles answering "which triangles touch another one".
//!
//! The tree is built once and is immutable afterwards. Nodes live in a
//! slotmap arena owned by the [`Octree`]; children are referenced by
//! [`NodeId`]. Both construction and the query run on a pool of scoped
//! worker threads draining a shared work stack of node ids.

pub mod config;
mod build;
mod pool;
mod query;

use std::collections::BTreeSet;

use slotmap::{new_key_type, SlotMap};
use tracing::{info, instrument};

use crate::geometry::{Range3, Triangle3};
use crate::tolerance::Real;

pub use config::OctreeConfig;

new_key_type! {
    pub struct NodeId;
}

/// A triangle tagged with its position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedTriangle<T> {
    pub triangle: Triangle3<T>,
    pub index: usize,
}

/// One octree cell.
///
/// The triangles stored directly in a node are those that could not be
/// moved into a single child octant (or all of them, for a leaf).
#[derive(Debug, Clone)]
pub struct Node<T> {
    bounds: Range3<T>,
    triangles: Vec<IndexedTriangle<T>>,
    children: [NodeId; 8],
    valid_children: u8,
    depth: usize,
}

impl<T> Node<T> {
    fn new(bounds: Range3<T>, triangles: Vec<IndexedTriangle<T>>, depth: usize) -> Self {
        Self {
            bounds,
            triangles,
            children: [NodeId::default(); 8],
            valid_children: 0,
            depth,
        }
    }

    pub fn bounds(&self) -> &Range3<T> {
        &self.bounds
    }

    pub fn triangles(&self) -> &[IndexedTriangle<T>] {
        &self.triangles
    }

    /// Bit `i` is set when octant `i` has a child.
    pub fn valid_children(&self) -> u8 {
        self.valid_children
    }

    pub fn child(&self, octant: usize) -> Option<NodeId> {
        (octant < 8 && self.valid_children & (1 << octant) != 0).then(|| self.children[octant])
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..8).filter_map(|octant| self.child(octant))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.valid_children == 0
    }
}

/// Spatial index over a fixed set of triangles.
#[derive(Debug, Clone)]
pub struct Octree<T> {
    nodes: SlotMap<NodeId, Node<T>>,
    root: Option<NodeId>,
    len: usize,
    config: OctreeConfig,
}

impl<T: Real> Octree<T> {
    pub fn new(triangles: &[Triangle3<T>]) -> Self {
        Self::with_config(triangles, OctreeConfig::default())
    }

    /// Builds the tree. Triangle `i` of the input is reported as index `i`.
    #[instrument(skip_all, fields(triangles = triangles.len()))]
    pub fn with_config(triangles: &[Triangle3<T>], config: OctreeConfig) -> Self {
        let (nodes, root) = build::build(triangles, &config);
        let tree = Self {
            nodes,
            root,
            len: triangles.len(),
            config,
        };

        info!(
            nodes = tree.node_count(),
            depth = tree.depth(),
            workers = tree.config.worker_count(),
            "octree built"
        );
        tree
    }

    /// Sorted indices of all triangles intersecting at least one other
    /// triangle. Repeated calls return the same set.
    #[instrument(skip(self), fields(triangles = self.len))]
    pub fn intersections(&self) -> BTreeSet<usize> {
        let Some(root) = self.root else {
            return BTreeSet::new();
        };

        let workers = self.config.worker_count();
        let found = query::intersections(&self.nodes, root, workers);
        info!(found = found.len(), workers, "octree query complete");
        found
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> + '_ {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of triangles indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Depth of the deepest node; 0 for a root-only or empty tree.
    pub fn depth(&self) -> usize {
        self.nodes.values().map(Node::depth).max().unwrap_or(0)
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }
}

impl<T: Real> FromIterator<Triangle3<T>> for Octree<T> {
    fn from_iter<I: IntoIterator<Item = Triangle3<T>>>(iter: I) -> Self {
        let triangles: Vec<_> = iter.into_iter().collect();
        Self::new(&triangles)
    }
}
