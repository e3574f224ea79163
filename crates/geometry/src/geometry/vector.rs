use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::tolerance::{is_close, Real};

/// A point or direction in 3D Euclidean space.
///
/// A vector with any non-finite component is *invalid*. Invalid vectors are
/// produced by normalizing a (near-)zero vector and propagate through
/// arithmetic; [`Vector3::is_valid`] detects them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Real> Vector3<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ZERO,
    };

    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Triple scalar product: self . (b x c)
    pub fn triple(&self, b: &Self, c: &Self) -> T {
        self.dot(&b.cross(c))
    }

    pub fn norm2(&self) -> T {
        self.dot(self)
    }

    pub fn norm(&self) -> T {
        self.norm2().sqrt()
    }

    /// Scale to unit length in place.
    ///
    /// A vector whose norm is close to zero becomes invalid (all NaN).
    pub fn normalize(&mut self) -> &mut Self {
        let n = self.norm();
        if is_close(n, T::ZERO) {
            *self = Self::splat(T::NAN);
        } else {
            *self /= n;
        }
        self
    }

    /// Unit-length copy, or `None` for a (near-)zero or invalid vector.
    pub fn normalized(&self) -> Option<Self> {
        let mut v = *self;
        v.normalize();
        v.is_valid().then_some(v)
    }

    /// Component-wise tolerant equality.
    pub fn is_close(&self, other: &Self) -> bool {
        is_close(self.x, other.x) && is_close(self.y, other.y) && is_close(self.z, other.z)
    }

    /// True when `self x other` is close to the zero vector.
    pub fn collinear(&self, other: &Self) -> bool {
        self.cross(other).is_close(&Self::ZERO)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        (*self + *other) * T::HALF
    }

    pub fn component_min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn component_max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [T; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl<T: Real> AddAssign for Vector3<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Real> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T: Real> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl<T: Real> DivAssign<T> for Vector3<T> {
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl<T: Real> Add for Vector3<T> {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Real> Sub for Vector3<T> {
    type Output = Self;
    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<T: Real> Mul<T> for Vector3<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self::Output {
        self *= rhs;
        self
    }
}

impl Mul<Vector3<f64>> for f64 {
    type Output = Vector3<f64>;
    fn mul(self, rhs: Vector3<f64>) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vector3<f32>> for f32 {
    type Output = Vector3<f32>;
    fn mul(self, rhs: Vector3<f32>) -> Self::Output {
        rhs * self
    }
}

impl<T: Real> Div<T> for Vector3<T> {
    type Output = Self;
    fn div(mut self, rhs: T) -> Self::Output {
        self /= rhs;
        self
    }
}

impl<T: Real> Neg for Vector3<T> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Real> From<[T; 3]> for Vector3<T> {
    fn from(arr: [T; 3]) -> Self {
        Self::from_array(arr)
    }
}
