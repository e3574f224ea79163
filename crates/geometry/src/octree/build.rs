//! Parallel octant partitioning.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use slotmap::SlotMap;
use tracing::debug;

use super::pool::{drain, Ticket, WorkStack};
use super::{IndexedTriangle, Node, NodeId, OctreeConfig};
use crate::geometry::{Range3, Triangle3, Vector3};
use crate::tolerance::{is_close, Real};

type Arena<T> = SlotMap<NodeId, Node<T>>;

/// Builds the node arena for `triangles`, returning it with the root id.
///
/// Indices are assigned by input position.
pub(crate) fn build<T: Real>(triangles: &[Triangle3<T>], config: &OctreeConfig) -> (Arena<T>, Option<NodeId>) {
    let mut nodes = Arena::with_key();
    if triangles.is_empty() {
        return (nodes, None);
    }

    let entries: Vec<_> = triangles
        .iter()
        .enumerate()
        .map(|(index, triangle)| IndexedTriangle {
            triangle: *triangle,
            index,
        })
        .collect();
    let bounds = entries
        .iter()
        .fold(Range3::empty(), |acc, e| acc.union(&e.triangle.range()));
    let root = nodes.insert(Node::new(bounds, entries, 0));

    let arena = Mutex::new(nodes);
    let stack = WorkStack::new(vec![root]);
    drain(&stack, config.worker_count(), || (), |id, ticket, _| {
        partition(&arena, id, config, ticket);
    });

    let nodes = arena.into_inner().unwrap_or_else(PoisonError::into_inner);
    (nodes, Some(root))
}

fn lock<T>(arena: &Mutex<Arena<T>>) -> MutexGuard<'_, Arena<T>> {
    arena.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Splits one node, pushing every non-empty child for further partitioning.
///
/// The arena lock is held only to take the node's triangles and to insert
/// the children; the geometric work runs unlocked.
fn partition<T: Real>(arena: &Mutex<Arena<T>>, id: NodeId, config: &OctreeConfig, ticket: &mut Ticket<'_, NodeId>) {
    let (bounds, depth, entries) = {
        let mut nodes = lock(arena);
        let Some(node) = nodes.get_mut(id) else {
            return;
        };
        if node.triangles.len() <= config.min_node_size
            || node.depth >= config.max_depth
            || !node.bounds.is_splittable()
        {
            return;
        }
        (node.bounds, node.depth, mem::take(&mut node.triangles))
    };

    let total = entries.len();
    let split = split_node(&bounds, entries);
    debug!(
        ?id,
        depth,
        total,
        kept = split.kept.len(),
        children = split.children.len(),
        "partitioned node"
    );

    let mut nodes = lock(arena);
    let mut children = [NodeId::default(); 8];
    let mut valid_children = 0u8;
    for (octant, entries) in split.children {
        let child = nodes.insert(Node::new(bounds.octant(octant), entries, depth + 1));
        children[octant] = child;
        valid_children |= 1 << octant;
        ticket.push(child);
    }
    if let Some(node) = nodes.get_mut(id) {
        node.triangles = split.kept;
        node.children = children;
        node.valid_children = valid_children;
    }
}

pub(crate) struct Split<T> {
    /// Triangles that stay at the split node.
    pub(crate) kept: Vec<IndexedTriangle<T>>,
    /// Non-empty octants with the triangles moved into them.
    pub(crate) children: Vec<(usize, Vec<IndexedTriangle<T>>)>,
}

/// Distributes `entries` over the eight octants of `bounds`.
pub(crate) fn split_node<T: Real>(bounds: &Range3<T>, entries: Vec<IndexedTriangle<T>>) -> Split<T> {
    let center = bounds.center();
    let axes = bounds.split_axes();
    let mut buckets: [Vec<IndexedTriangle<T>>; 8] = Default::default();
    let mut kept = Vec::new();

    for entry in entries {
        let range = entry.triangle.range();
        match octant_of(&range, &center, axes) {
            Some(octant) => {
                debug_assert!(bounds.octant(octant).contains_range(&range));
                buckets[octant].push(entry);
            }
            None => kept.push(entry),
        }
    }

    let children = buckets
        .into_iter()
        .enumerate()
        .filter(|(_, bucket)| !bucket.is_empty())
        .collect();
    Split { kept, children }
}

/// The single octant around `center` that holds `range`, or `None` when the
/// range touches or crosses a split plane.
///
/// Only the axes flagged in `axes` are split; the others always take the
/// lower bit. Two ranges placed in different octants are then apart by more
/// than the tolerance on a split axis, so their triangles cannot intersect.
pub(crate) fn octant_of<T: Real>(range: &Range3<T>, center: &Vector3<T>, axes: [bool; 3]) -> Option<usize> {
    let x = side(axes[0], range.min.x, range.max.x, center.x)?;
    let y = side(axes[1], range.min.y, range.max.y, center.y)?;
    let z = side(axes[2], range.min.z, range.max.z, center.z)?;
    Some(x | (y << 1) | (z << 2))
}

fn side<T: Real>(split: bool, lo: T, hi: T, mid: T) -> Option<usize> {
    if !split {
        Some(0)
    } else if hi < mid && !is_close(hi, mid) {
        Some(0)
    } else if lo > mid && !is_close(lo, mid) {
        Some(1)
    } else {
        None
    }
}
