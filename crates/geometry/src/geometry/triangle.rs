use serde::{Deserialize, Serialize};

use super::plane::Plane3;
use super::range::Range3;
use super::segment::Segment3;
use super::vector::Vector3;
use crate::tolerance::{is_close, Real};

/// A triangle given by its three vertices.
///
/// Vertices may coincide or be collinear; such a triangle is *degenerate*
/// and behaves as the segment (or point) it collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle3<T> {
    pub a: Vector3<T>,
    pub b: Vector3<T>,
    pub c: Vector3<T>,
}

impl<T: Real> Triangle3<T> {
    pub fn new(a: Vector3<T>, b: Vector3<T>, c: Vector3<T>) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vector3<T>; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges `ab`, `bc`, `ca`.
    pub fn edges(&self) -> [Segment3<T>; 3] {
        [
            Segment3::new(self.a, self.b),
            Segment3::new(self.b, self.c),
            Segment3::new(self.c, self.a),
        ]
    }

    /// Supporting plane, or `None` for a degenerate triangle.
    pub fn plane(&self) -> Option<Plane3<T>> {
        Plane3::from_points(self.a, self.b, self.c)
    }

    pub fn is_degenerate(&self) -> bool {
        self.plane().is_none()
    }

    pub fn range(&self) -> Range3<T> {
        Range3::from_points(&self.vertices())
    }

    pub fn area(&self) -> T {
        area(&self.a, &self.b, &self.c)
    }

    /// The segment a degenerate triangle collapses to: the edge whose extent
    /// covers the remaining vertex. For a point triangle every edge is that
    /// point.
    pub fn to_segment(&self) -> Segment3<T> {
        let ab = Segment3::new(self.a, self.b);
        if ab.range().contains_point(&self.c) {
            return ab;
        }
        let bc = Segment3::new(self.b, self.c);
        if bc.range().contains_point(&self.a) {
            return bc;
        }
        Segment3::new(self.c, self.a)
    }

    /// Point containment, boundary included.
    ///
    /// The point is inside when the three sub-triangles it forms with the
    /// edges add up to the whole area.
    pub fn contains(&self, p: &Vector3<T>) -> bool {
        if self.is_degenerate() {
            return self.to_segment().contains(p);
        }
        let parts = area(&self.a, &self.b, p) + area(&self.b, &self.c, p) + area(&self.c, &self.a, p);
        is_close(self.area(), parts)
    }

    /// True when some edge of `self` meets some edge of `other`.
    pub fn intersects_edges(&self, other: &Self) -> bool {
        let theirs = other.edges();
        self.edges()
            .iter()
            .any(|mine| theirs.iter().any(|e| mine.intersects(e)))
    }

    /// True when the two triangles share at least one point.
    ///
    /// Triangles whose bounding ranges are apart by more than the tolerance
    /// on some axis never intersect, however the planar tests below round.
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.range().overlaps(&other.range()) {
            return false;
        }
        match (self.plane(), other.plane()) {
            (None, None) => self.to_segment().intersects(&other.to_segment()),
            (None, Some(plane)) => segment_hits(&self.to_segment(), other, &plane),
            (Some(plane), None) => segment_hits(&other.to_segment(), self, &plane),
            (Some(mine), Some(theirs)) if mine.is_close(&theirs) => self.intersects_coplanar(other),
            (Some(mine), Some(theirs)) => {
                self.edges().iter().any(|e| segment_hits(e, other, &theirs))
                    || other.edges().iter().any(|e| segment_hits(e, self, &mine))
            }
        }
    }

    fn intersects_coplanar(&self, other: &Self) -> bool {
        other.vertices().iter().any(|v| self.contains(v))
            || self.vertices().iter().any(|v| other.contains(v))
            || self.intersects_edges(other)
    }
}

fn area<T: Real>(a: &Vector3<T>, b: &Vector3<T>, c: &Vector3<T>) -> T {
    (*a - *b).cross(&(*a - *c)).norm() * T::HALF
}

/// Does `segment` touch `triangle`, whose supporting plane is `plane`?
fn segment_hits<T: Real>(segment: &Segment3<T>, triangle: &Triangle3<T>, plane: &Plane3<T>) -> bool {
    // A segment lying in the plane can cross the triangle without a single
    // piercing point.
    if plane.contains_segment(segment) {
        return triangle.contains(&segment.begin)
            || triangle.contains(&segment.end)
            || triangle.edges().iter().any(|e| e.intersects(segment));
    }

    plane
        .segment_intersection(segment)
        .is_some_and(|p| triangle.contains(&p))
}
