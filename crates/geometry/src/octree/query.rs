//! Parallel all-intersections traversal.

use std::collections::BTreeSet;

use slotmap::SlotMap;

use super::pool::{drain, WorkStack};
use super::{IndexedTriangle, Node, NodeId};
use crate::tolerance::Real;

/// Indices of every triangle that touches another triangle in the tree.
///
/// Each node is visited once. A visit compares the node's own triangles
/// pairwise and against every triangle below it, so every pair of triangles
/// is compared at exactly the node where the shallower one lives.
pub(crate) fn intersections<T: Real>(nodes: &SlotMap<NodeId, Node<T>>, root: NodeId, workers: usize) -> BTreeSet<usize> {
    let stack = WorkStack::new(vec![root]);
    let found = drain(&stack, workers, BTreeSet::new, |id, ticket, found| {
        let Some(node) = nodes.get(id) else {
            return;
        };
        visit(nodes, node, found);
        for child in node.children() {
            ticket.push(child);
        }
    });

    found.into_iter().fold(BTreeSet::new(), |mut acc, mut local| {
        acc.append(&mut local);
        acc
    })
}

fn visit<T: Real>(nodes: &SlotMap<NodeId, Node<T>>, node: &Node<T>, found: &mut BTreeSet<usize>) {
    let own = node.triangles();

    for (i, first) in own.iter().enumerate() {
        for second in &own[i + 1..] {
            check(first, second, found);
        }
    }

    if own.is_empty() {
        return;
    }
    for child in node.children() {
        for_each_below(nodes, child, |below| {
            for mine in own {
                check(mine, below, found);
            }
        });
    }
}

fn check<T: Real>(first: &IndexedTriangle<T>, second: &IndexedTriangle<T>, found: &mut BTreeSet<usize>) {
    if first.index != second.index && first.triangle.intersects(&second.triangle) {
        found.insert(first.index);
        found.insert(second.index);
    }
}

/// Calls `f` for every triangle stored in the subtree rooted at `id`.
fn for_each_below<T, F>(nodes: &SlotMap<NodeId, Node<T>>, id: NodeId, mut f: F)
where
    F: FnMut(&IndexedTriangle<T>),
{
    let mut pending = vec![id];
    while let Some(id) = pending.pop() {
        let Some(node) = nodes.get(id) else {
            continue;
        };
        node.triangles().iter().for_each(&mut f);
        pending.extend(node.children());
    }
}
