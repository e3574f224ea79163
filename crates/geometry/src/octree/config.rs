//! Tuning knobs for octree construction and traversal.
//!
//! None of these settings changes the query result; they only trade tree
//! depth against per-node work and choose how many threads run it.

use std::num::NonZeroUsize;
use std::thread;

/// Configuration for building and querying an [`Octree`](super::Octree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Nodes holding this many triangles or fewer are not split further.
    pub min_node_size: usize,
    /// Nodes at this depth are leaves regardless of their triangle count.
    pub max_depth: usize,
    /// Worker threads per phase. `None` uses the available parallelism.
    pub workers: Option<NonZeroUsize>,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            min_node_size: 8,
            max_depth: 32,
            workers: None,
        }
    }
}

impl OctreeConfig {
    /// Maximal subdivision: every node with more than one triangle is split.
    pub fn fine() -> Self {
        Self {
            min_node_size: 1,
            ..Self::default()
        }
    }

    /// Shallow trees with large leaves.
    pub fn coarse() -> Self {
        Self {
            min_node_size: 256,
            ..Self::default()
        }
    }

    /// Single worker thread for both phases.
    pub fn sequential() -> Self {
        Self {
            workers: Some(NonZeroUsize::MIN),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers);
        self
    }

    /// Resolved worker count, never zero.
    pub fn worker_count(&self) -> usize {
        self.workers
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}
