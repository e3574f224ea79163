use serde::{Deserialize, Serialize};

use super::vector::Vector3;
use crate::tolerance::{is_close, is_less_close_with, Real, Tolerance};

/// Axis-aligned bounding box.
///
/// `min >= max` on an axis denotes an empty extent on that axis; the
/// dimension accessors report it as zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range3<T> {
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

impl<T: Real> Range3<T> {
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Self { min, max }
    }

    /// The identity for [`Range3::union`].
    pub fn empty() -> Self {
        Self {
            min: Vector3::splat(T::INFINITY),
            max: Vector3::splat(T::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vector3<T>]) -> Self {
        let mut range = Self::empty();
        for p in points {
            range.expand_to_include(p);
        }
        range
    }

    pub fn expand_to_include(&mut self, p: &Vector3<T>) {
        self.min = self.min.component_min(p);
        self.max = self.max.component_max(p);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.component_min(&other.min),
            max: self.max.component_max(&other.max),
        }
    }

    pub fn contains_point(&self, p: &Vector3<T>) -> bool {
        self.contains_point_with(p, Tolerance::default())
    }

    pub fn contains_point_with(&self, p: &Vector3<T>, tol: Tolerance<T>) -> bool {
        is_less_close_with(self.min.x, p.x, tol)
            && is_less_close_with(p.x, self.max.x, tol)
            && is_less_close_with(self.min.y, p.y, tol)
            && is_less_close_with(p.y, self.max.y, tol)
            && is_less_close_with(self.min.z, p.z, tol)
            && is_less_close_with(p.z, self.max.z, tol)
    }

    pub fn contains_range(&self, other: &Self) -> bool {
        self.contains_range_with(other, Tolerance::default())
    }

    pub fn contains_range_with(&self, other: &Self, tol: Tolerance<T>) -> bool {
        is_less_close_with(self.min.x, other.min.x, tol)
            && is_less_close_with(other.max.x, self.max.x, tol)
            && is_less_close_with(self.min.y, other.min.y, tol)
            && is_less_close_with(other.max.y, self.max.y, tol)
            && is_less_close_with(self.min.z, other.min.z, tol)
            && is_less_close_with(other.max.z, self.max.z, tol)
    }

    /// True when the boxes share a point, allowing a gap up to the
    /// tolerance on each axis.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_with(other, Tolerance::default())
    }

    pub fn overlaps_with(&self, other: &Self, tol: Tolerance<T>) -> bool {
        is_less_close_with(self.min.x, other.max.x, tol)
            && is_less_close_with(other.min.x, self.max.x, tol)
            && is_less_close_with(self.min.y, other.max.y, tol)
            && is_less_close_with(other.min.y, self.max.y, tol)
            && is_less_close_with(self.min.z, other.max.z, tol)
            && is_less_close_with(other.min.z, self.max.z, tol)
    }

    pub fn dim_x(&self) -> T {
        self.max.x - self.min.x
    }

    pub fn dim_y(&self) -> T {
        self.max.y - self.min.y
    }

    pub fn dim_z(&self) -> T {
        self.max.z - self.min.z
    }

    /// Axes along which the box has an extent beyond tolerance, in x, y, z
    /// order.
    pub fn split_axes(&self) -> [bool; 3] {
        let wide = |lo: T, hi: T| hi > lo && !is_close(lo, hi);
        [
            wide(self.min.x, self.max.x),
            wide(self.min.y, self.max.y),
            wide(self.min.z, self.max.z),
        ]
    }

    /// True when at least one axis can be split.
    pub fn is_splittable(&self) -> bool {
        self.split_axes().contains(&true)
    }

    pub fn center(&self) -> Vector3<T> {
        self.min.midpoint(&self.max)
    }

    /// One of the eight boxes obtained by splitting at the center.
    ///
    /// Bit 0 of `index` selects the upper half along x, bit 1 along y,
    /// bit 2 along z. An axis missing from [`Range3::split_axes`] is not
    /// split: the box keeps its full extent there whatever the bit.
    pub fn octant(&self, index: usize) -> Self {
        let c = self.center();
        let axes = self.split_axes();
        let pick = |bit: usize, lo: T, mid: T, hi: T| {
            if !axes[bit] {
                (lo, hi)
            } else if index & (1 << bit) == 0 {
                (lo, mid)
            } else {
                (mid, hi)
            }
        };
        let (min_x, max_x) = pick(0, self.min.x, c.x, self.max.x);
        let (min_y, max_y) = pick(1, self.min.y, c.y, self.max.y);
        let (min_z, max_z) = pick(2, self.min.z, c.z, self.max.z);
        Self {
            min: Vector3::new(min_x, min_y, min_z),
            max: Vector3::new(max_x, max_y, max_z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Vector3<f64>;

    fn unit_box() -> Range3<f64> {
        Range3::new(V::new(0.0, 0.0, 0.0), V::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_from_points() {
        let r = Range3::from_points(&[
            V::new(1.0, -2.0, 3.0),
            V::new(-1.0, 2.0, 0.0),
            V::new(0.5, 0.0, 5.0),
        ]);
        assert_eq!(r.min, V::new(-1.0, -2.0, 0.0));
        assert_eq!(r.max, V::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_contains_point_tolerant_on_boundary() {
        let r = unit_box();
        assert!(r.contains_point(&V::new(0.5, 0.5, 0.5)));
        assert!(r.contains_point(&V::new(1.0, 0.0, 1.0)));
        assert!(r.contains_point(&V::new(1.0 + 1e-12, 0.5, 0.5)));
        assert!(!r.contains_point(&V::new(1.1, 0.5, 0.5)));
        assert!(!r.contains_point(&V::new(0.5, -0.1, 0.5)));
    }

    #[test]
    fn test_contains_point_explicit_tolerance() {
        let r = unit_box();
        let loose = Tolerance::new(0.2, 0.0);
        assert!(r.contains_point_with(&V::new(1.1, 0.5, 0.5), loose));
    }

    #[test]
    fn test_contains_range() {
        let r = unit_box();
        let inner = Range3::new(V::new(0.2, 0.2, 0.2), V::new(0.8, 1.0, 0.3));
        let outer = Range3::new(V::new(-0.2, 0.2, 0.2), V::new(0.8, 0.9, 0.3));
        assert!(r.contains_range(&inner));
        assert!(r.contains_range(&r));
        assert!(!r.contains_range(&outer));
    }

    #[test]
    fn test_union_with_empty() {
        let r = unit_box();
        assert_eq!(Range3::empty().union(&r), r);
    }

    #[test]
    fn test_dimensions_may_be_non_positive() {
        let flat = Range3::new(V::new(0.0, 0.0, 1.0), V::new(2.0, 3.0, 1.0));
        assert_eq!(flat.dim_x(), 2.0);
        assert_eq!(flat.dim_y(), 3.0);
        assert_eq!(flat.dim_z(), 0.0);
        assert!(Range3::<f64>::empty().dim_x() < 0.0);
    }

    #[test]
    fn test_split_axes() {
        let flat = Range3::new(V::new(0.0, 0.0, 1.0), V::new(2.0, 3.0, 1.0));
        assert_eq!(flat.split_axes(), [true, true, false]);
        assert!(flat.is_splittable());

        let sliver = Range3::new(V::new(0.0, 0.0, 1.0), V::new(2.0, 1e-12, 1.0));
        assert_eq!(sliver.split_axes(), [true, false, false]);

        let point = Range3::new(V::splat(1.0), V::splat(1.0));
        assert!(!point.is_splittable());
        assert!(!Range3::<f64>::empty().is_splittable());
        assert!(unit_box().is_splittable());
    }

    #[test]
    fn test_flat_octants_keep_the_flat_axis() {
        let flat = Range3::new(V::new(0.0, 0.0, 1.0), V::new(2.0, 4.0, 1.0));
        let upper = flat.octant(0b111);
        assert_eq!(upper.min, V::new(1.0, 2.0, 1.0));
        assert_eq!(upper.max, V::new(2.0, 4.0, 1.0));
        assert_eq!(flat.octant(0b011), upper);
    }

    #[test]
    fn test_overlaps() {
        let r = unit_box();
        let touching = Range3::new(V::new(1.0, 0.2, 0.2), V::new(2.0, 0.8, 0.8));
        let within_tolerance = Range3::new(V::new(1.0 + 5e-10, 0.2, 0.2), V::new(2.0, 0.8, 0.8));
        let gap = Range3::new(V::new(1.0 + 3e-9, 0.2, 0.2), V::new(2.0, 0.8, 0.8));
        let above = Range3::new(V::new(0.2, 0.2, 1.5), V::new(0.8, 0.8, 2.0));

        assert!(r.overlaps(&r));
        assert!(r.overlaps(&touching) && touching.overlaps(&r));
        assert!(r.overlaps(&within_tolerance));
        assert!(!r.overlaps(&gap) && !gap.overlaps(&r));
        assert!(!r.overlaps(&above));
    }

    #[test]
    fn test_octants_tile_the_box() {
        let r = Range3::new(V::new(-2.0, 0.0, 4.0), V::new(2.0, 2.0, 8.0));
        let mut total = 0.0;
        for i in 0..8 {
            let o = r.octant(i);
            assert!(r.contains_range(&o));
            total += o.dim_x() * o.dim_y() * o.dim_z();
        }
        assert!((total - 32.0).abs() < 1e-12);

        let upper = r.octant(0b111);
        assert_eq!(upper.min, V::new(0.0, 1.0, 6.0));
        assert_eq!(upper.max, r.max);
        let lower = r.octant(0);
        assert_eq!(lower.min, r.min);
        assert_eq!(lower.max, r.center());
    }
}
