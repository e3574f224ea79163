//! Reference answer for the octree query.
//!
//! Compares every pair directly with [`Triangle3::intersects`]. Quadratic,
//! so only suitable for small inputs and for checking the octree.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::geometry::Triangle3;
use crate::tolerance::Real;

/// Indices of all triangles that intersect at least one other triangle.
#[instrument(skip_all, fields(triangles = triangles.len()))]
pub fn brute_force_intersections<T: Real>(triangles: &[Triangle3<T>]) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    for (i, first) in triangles.iter().enumerate() {
        for (j, second) in triangles.iter().enumerate().skip(i + 1) {
            if first.intersects(second) {
                found.insert(i);
                found.insert(j);
            }
        }
    }
    info!(found = found.len(), "brute-force query complete");
    found
}
