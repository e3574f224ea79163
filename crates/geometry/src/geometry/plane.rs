use serde::{Deserialize, Serialize};

use super::line::Line3;
use super::segment::Segment3;
use super::vector::Vector3;
use crate::tolerance::{is_close, Real};

/// A plane in Hessian normal form: `normal . p = distance` for every `p` on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3<T> {
    normal: Vector3<T>,
    distance: T,
}

impl<T: Real> Plane3<T> {
    /// The plane through three points, or `None` when they are collinear
    /// or coincident.
    pub fn from_points(a: Vector3<T>, b: Vector3<T>, c: Vector3<T>) -> Option<Self> {
        let normal = (a - b).cross(&(a - c)).normalized()?;
        let distance = normal.dot(&a);
        distance.is_finite().then_some(Self { normal, distance })
    }

    pub fn from_normal_and_point(normal: Vector3<T>, point: Vector3<T>) -> Option<Self> {
        let normal = normal.normalized()?;
        let distance = normal.dot(&point);
        distance.is_finite().then_some(Self { normal, distance })
    }

    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    pub fn distance(&self) -> T {
        self.distance
    }

    pub fn contains(&self, p: &Vector3<T>) -> bool {
        is_close(self.normal.dot(p), self.distance)
    }

    pub fn contains_segment(&self, segment: &Segment3<T>) -> bool {
        self.contains(&segment.begin) && self.contains(&segment.end)
    }

    /// Same plane within tolerance; a flipped normal with negated distance
    /// describes the same plane.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.normal.is_close(&other.normal) && is_close(self.distance, other.distance))
            || (self.normal.is_close(&-other.normal) && is_close(self.distance, -other.distance))
    }

    /// Line shared with `other`, or `None` when the planes are parallel
    /// (including coincident).
    pub fn intersection_line(&self, other: &Self) -> Option<Line3<T>> {
        let normal_dot = self.normal.dot(&other.normal);
        let denom = T::ONE - normal_dot * normal_dot;
        if is_close(denom, T::ZERO) {
            return None;
        }

        let c1 = (self.distance - other.distance * normal_dot) / denom;
        let c2 = (other.distance - self.distance * normal_dot) / denom;
        Line3::new(
            self.normal.cross(&other.normal),
            self.normal * c1 + other.normal * c2,
        )
    }

    /// Point where `line` crosses the plane.
    ///
    /// A line lying in the plane yields its origin as a representative
    /// point; callers that need to tell the two cases apart check
    /// [`Plane3::contains`] on a second point of the line.
    pub fn intersection_point(&self, line: &Line3<T>) -> Option<Vector3<T>> {
        let denom = self.normal.dot(line.direction());
        if is_close(denom, T::ZERO) {
            return self.contains(line.origin()).then_some(*line.origin());
        }

        let t = (self.distance - line.origin().dot(&self.normal)) / denom;
        Some(line.point_at(t))
    }

    /// Point where `segment` crosses the plane, if it reaches it.
    pub fn segment_intersection(&self, segment: &Segment3<T>) -> Option<Vector3<T>> {
        let Some(line) = segment.line() else {
            return self.contains(&segment.begin).then_some(segment.begin);
        };

        self.intersection_point(&line)
            .filter(|p| segment.range().contains_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::is_close;

    type V = Vector3<f64>;

    #[test]
    fn test_from_points() {
        let p1 = Plane3::from_points(
            V::new(16.0, 7.0, 8.0),
            V::new(7.8, 19100.0, 89.0),
            V::new(100.0, 2.2, 4.3),
        );
        let p2 = Plane3::from_points(V::new(0.0, 0.0, 0.0), V::new(1.0, 0.0, 0.0), V::new(-1000.0, 0.0, 0.0));
        let p1 = p1.unwrap();
        assert!(is_close(p1.normal().norm(), 1.0));
        assert!(p1.contains(&V::new(16.0, 7.0, 8.0)));
        assert!(p1.contains(&V::new(100.0, 2.2, 4.3)));
        assert!(p2.is_none());
    }

    #[test]
    fn test_coincident_points_have_no_plane() {
        let a = V::new(0.1, 0.2, 0.3);
        assert!(Plane3::from_points(a, a, a).is_none());
    }

    #[test]
    fn test_is_close_accepts_flipped_normal() {
        let a = V::new(0.0, 0.0, 1.0);
        let b = V::new(1.0, 0.0, 1.0);
        let c = V::new(0.0, 1.0, 1.0);
        let p = Plane3::from_points(a, b, c).unwrap();
        let flipped = Plane3::from_points(a, c, b).unwrap();
        assert!(p.normal().is_close(&-*flipped.normal()));
        assert!(p.is_close(&flipped));

        let shifted = Plane3::from_points(a * 2.0, b * 2.0, c * 2.0).unwrap();
        assert!(!p.is_close(&shifted));
    }

    #[test]
    fn test_intersection_line() {
        let p1 = Plane3::from_points(V::new(16.0, 7.0, 8.0), V::new(7.8, 19.0, 89.0), V::new(100.0, 2.2, 4.3)).unwrap();
        let p2 = Plane3::from_points(V::new(16.0, 7.0, 8.0), V::new(7.8, 19.0, 89.0), V::new(0.0, 0.0, 0.0)).unwrap();
        let line = p1.intersection_line(&p2).unwrap();
        let expected = Line3::new(V::new(-8.2, 12.0, 81.0), V::new(7.8, 19.0, 89.0)).unwrap();
        assert!(line.is_close(&expected));
    }

    #[test]
    fn test_parallel_planes_have_no_line() {
        let p1 = Plane3::from_normal_and_point(V::new(0.0, 0.0, 1.0), V::ZERO).unwrap();
        let p2 = Plane3::from_normal_and_point(V::new(0.0, 0.0, -2.0), V::new(0.0, 0.0, 5.0)).unwrap();
        assert!(p1.intersection_line(&p2).is_none());
        assert!(p1.intersection_line(&p1).is_none());
    }

    #[test]
    fn test_intersection_point() {
        let p = Plane3::from_points(V::new(0.0, 0.0, 0.0), V::new(1.0, 0.0, 0.0), V::new(1.0, 1.0, 1.0)).unwrap();
        let s1 = Segment3::new(V::new(5.0, -1.0, 0.0), V::new(7.0, 1.0, 0.0));
        let s2 = Segment3::new(V::new(0.0, 0.0, 1.0), V::new(0.0, 1.0, 2.0));

        let on_line = p.intersection_point(&s1.line().unwrap()).unwrap();
        assert!(on_line.is_close(&V::new(6.0, 0.0, 0.0)));
        let on_segment = p.segment_intersection(&s1).unwrap();
        assert!(on_segment.is_close(&V::new(6.0, 0.0, 0.0)));

        assert!(p.segment_intersection(&s2).is_none());
    }

    #[test]
    fn test_segment_short_of_plane() {
        let p = Plane3::from_normal_and_point(V::new(0.0, 0.0, 1.0), V::ZERO).unwrap();
        let s = Segment3::new(V::new(0.0, 0.0, 1.0), V::new(0.0, 0.0, 2.0));
        assert!(p.intersection_point(&s.line().unwrap()).is_some());
        assert!(p.segment_intersection(&s).is_none());
    }

    #[test]
    fn test_line_parallel_to_plane() {
        let p = Plane3::from_normal_and_point(V::new(0.0, 0.0, 1.0), V::ZERO).unwrap();
        let above = Line3::new(V::new(1.0, 0.0, 0.0), V::new(0.0, 0.0, 1.0)).unwrap();
        let inside = Line3::new(V::new(1.0, 1.0, 0.0), V::new(3.0, 4.0, 0.0)).unwrap();
        assert!(p.intersection_point(&above).is_none());
        assert_eq!(p.intersection_point(&inside), Some(V::new(3.0, 4.0, 0.0)));
    }

    #[test]
    fn test_point_segment_against_plane() {
        let p = Plane3::from_normal_and_point(V::new(0.0, 0.0, 1.0), V::ZERO).unwrap();
        let on = Segment3::new(V::new(1.0, 2.0, 0.0), V::new(1.0, 2.0, 0.0));
        let off = Segment3::new(V::new(1.0, 2.0, 0.5), V::new(1.0, 2.0, 0.5));
        assert_eq!(p.segment_intersection(&on), Some(V::new(1.0, 2.0, 0.0)));
        assert!(p.segment_intersection(&off).is_none());
        assert!(p.contains_segment(&on));
        assert!(!p.contains_segment(&off));
    }
}
