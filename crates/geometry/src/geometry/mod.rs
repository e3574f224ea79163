pub mod vector;
pub mod range;
pub mod line;
pub mod plane;
pub mod segment;
pub mod triangle;

pub use line::Line3;
pub use plane::Plane3;
pub use range::Range3;
pub use segment::Segment3;
pub use triangle::Triangle3;
pub use vector::Vector3;
