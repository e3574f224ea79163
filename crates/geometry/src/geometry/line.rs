use serde::{Deserialize, Serialize};

use super::vector::Vector3;
use crate::tolerance::{is_close, Real};

/// An infinite line through `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3<T> {
    direction: Vector3<T>,
    origin: Vector3<T>,
}

impl<T: Real> Line3<T> {
    /// Normalizes `direction`. Returns `None` when the direction is
    /// (close to) zero or either vector is not finite.
    pub fn new(direction: Vector3<T>, origin: Vector3<T>) -> Option<Self> {
        let direction = direction.normalized()?;
        origin.is_valid().then_some(Self { direction, origin })
    }

    /// The line through `a` and `b`, or `None` if the points coincide.
    pub fn from_points(a: Vector3<T>, b: Vector3<T>) -> Option<Self> {
        Self::new(b - a, a)
    }

    pub fn direction(&self) -> &Vector3<T> {
        &self.direction
    }

    pub fn origin(&self) -> &Vector3<T> {
        &self.origin
    }

    pub fn point_at(&self, t: T) -> Vector3<T> {
        self.origin + self.direction * t
    }

    pub fn contains(&self, p: &Vector3<T>) -> bool {
        (*p - self.origin).collinear(&self.direction)
    }

    /// Same line within tolerance, regardless of origin or orientation.
    pub fn is_close(&self, other: &Self) -> bool {
        self.direction.collinear(&other.direction)
            && (other.origin - self.origin).collinear(&self.direction)
    }

    /// The single point shared with `other`.
    ///
    /// Returns `None` for skew lines and for parallel lines; coincident
    /// lines are detected with [`Line3::is_close`] instead.
    pub fn intersection_point(&self, other: &Self) -> Option<Vector3<T>> {
        let origin_diff = other.origin - self.origin;
        if !is_close(origin_diff.triple(&self.direction, &other.direction), T::ZERO) {
            return None;
        }

        let dir_cross = self.direction.cross(&other.direction);
        if dir_cross.is_close(&Vector3::ZERO) {
            return None;
        }

        let t = origin_diff.cross(&other.direction).dot(&dir_cross) / dir_cross.norm2();
        Some(self.point_at(t))
    }
}
