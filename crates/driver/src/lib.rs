//! Text boundary around the triangle intersection core: parses the
//! triangle stream, runs the query and formats the reported indices.

pub mod errors;
pub mod input;
pub mod output;

use std::collections::BTreeSet;
use std::str::FromStr;

use triangles_geometry::{brute_force_intersections, Octree, OctreeConfig, Real, Triangle3};

pub use errors::InputError;
pub use input::parse_triangles;
pub use output::{render, IndexBase, OutputFormat};

/// How the intersecting set is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    Octree(OctreeConfig),
    BruteForce,
}

impl Default for Method {
    fn default() -> Self {
        Method::Octree(OctreeConfig::default())
    }
}

/// 0-based indices of all triangles touching at least one other triangle.
pub fn find_intersections<T: Real>(triangles: &[Triangle3<T>], method: &Method) -> BTreeSet<usize> {
    match method {
        Method::Octree(config) => Octree::with_config(triangles, config.clone()).intersections(),
        Method::BruteForce => brute_force_intersections(triangles),
    }
}

/// Parses `input` with scalar type `T` and runs the query.
pub fn solve<T>(input: &str, method: &Method) -> Result<BTreeSet<usize>, InputError>
where
    T: Real + FromStr,
{
    let triangles = parse_triangles::<T>(input)?;
    Ok(find_intersections(&triangles, method))
}
