//! Tolerance-aware 3D primitives and a parallel octree that reports which
//! triangles of a set touch at least one other triangle.

pub mod tolerance;
pub mod geometry;
pub mod octree;
pub mod oracle;

pub use geometry::{Line3, Plane3, Range3, Segment3, Triangle3, Vector3};
pub use octree::{IndexedTriangle, Node, NodeId, Octree, OctreeConfig};
pub use oracle::brute_force_intersections;
pub use tolerance::{Real, Tolerance};
