use serde::{Deserialize, Serialize};

use super::line::Line3;
use super::range::Range3;
use super::vector::Vector3;
use crate::tolerance::Real;

/// A bounded segment between two points. `begin ≈ end` is a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment3<T> {
    pub begin: Vector3<T>,
    pub end: Vector3<T>,
}

impl<T: Real> Segment3<T> {
    pub fn new(begin: Vector3<T>, end: Vector3<T>) -> Self {
        Self { begin, end }
    }

    /// Supporting line, or `None` when the segment degenerates to a point.
    pub fn line(&self) -> Option<Line3<T>> {
        Line3::from_points(self.begin, self.end)
    }

    pub fn range(&self) -> Range3<T> {
        Range3::from_points(&[self.begin, self.end])
    }

    pub fn is_point(&self) -> bool {
        self.line().is_none()
    }

    pub fn contains(&self, p: &Vector3<T>) -> bool {
        match self.line() {
            Some(line) => line.contains(p) && self.range().contains_point(p),
            None => self.begin.is_close(p),
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        let (this_line, other_line) = match (self.line(), other.line()) {
            (None, _) => return other.contains(&self.begin),
            (_, None) => return self.contains(&other.begin),
            (Some(a), Some(b)) => (a, b),
        };

        // On a common line the test is a 1D overlap of the two extents.
        if this_line.is_close(&other_line) {
            return self.contains(&other.begin)
                || self.contains(&other.end)
                || other.contains(&self.begin)
                || other.contains(&self.end);
        }

        this_line
            .intersection_point(&other_line)
            .is_some_and(|p| self.range().contains_point(&p) && other.range().contains_point(&p))
    }
}
