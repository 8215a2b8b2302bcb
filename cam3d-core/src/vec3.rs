//! 3-component vector with both in-place and allocating arithmetic.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::MathError;

/// Lengths at or below this are treated as zero when a direction is required.
const LENGTH_EPSILON: f32 = 1e-6;

/// A 3-component single-precision vector.
///
/// In-place methods return `&mut Self` so updates can be chained; allocating
/// arithmetic goes through the `Add`/`Sub`/`Mul`/`Neg` operators.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Overwrite all three components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copy the components of `other` into `self`.
    #[inline]
    pub fn copy_from(&mut self, other: &Vec3) -> &mut Self {
        *self = *other;
        self
    }

    /// Copy the components of `self` into `target`.
    #[inline]
    pub fn copy_to(&self, target: &mut Vec3) {
        *target = *self;
    }

    /// Componentwise add, in place.
    #[inline]
    pub fn add_with(&mut self, other: &Vec3) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self
    }

    /// Componentwise subtract, in place.
    #[inline]
    pub fn sub_with(&mut self, other: &Vec3) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self
    }

    /// Multiply all components by a scalar, in place.
    #[inline]
    pub fn scale_by(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Rescale to the given magnitude.
    ///
    /// Fails with `InvalidArgument` when the current length is (near) zero,
    /// leaving `self` untouched.
    pub fn set_length(&mut self, length: f32) -> Result<&mut Self, MathError> {
        let current = self.length();
        if current <= LENGTH_EPSILON {
            return Err(MathError::InvalidArgument {
                what: "cannot set the length of a zero-length vector",
            });
        }
        Ok(self.scale_by(length / current))
    }

    /// Scale to unit length, in place.
    ///
    /// Fails with `InvalidArgument` on the zero vector, leaving `self`
    /// untouched.
    pub fn normalize(&mut self) -> Result<&mut Self, MathError> {
        let len = self.length();
        if len <= LENGTH_EPSILON {
            return Err(MathError::InvalidArgument {
                what: "cannot normalize a zero-length vector",
            });
        }
        Ok(self.scale_by(1.0 / len))
    }

    /// Consuming variant of [`Vec3::normalize`].
    pub fn normalized(mut self) -> Result<Vec3, MathError> {
        self.normalize()?;
        Ok(self)
    }

    /// Cross product `self × other`, allocating.
    #[inline]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Overwrite `self` with `a × b`.
    #[inline]
    pub fn set_cross(&mut self, a: &Vec3, b: &Vec3) -> &mut Self {
        *self = a.cross(b);
        self
    }

    /// Scalar dot product.
    #[inline]
    pub fn dot(&self, other: &Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut v = Vec3::new(3.0, -4.0, 12.0);
        v.normalize().unwrap();
        assert!(approx_eq(v.length(), 1.0));
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let mut v = Vec3::ZERO;
        let err = v.normalize().unwrap_err();
        assert!(matches!(err, MathError::InvalidArgument { .. }));
        // Receiver must be untouched after a failed call
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_normalized_consuming() {
        let v = Vec3::new(0.0, 5.0, 0.0).normalized().unwrap();
        assert!(approx_eq(v.y, 1.0));
        assert!(Vec3::ZERO.normalized().is_err());
    }

    #[test]
    fn test_length_squared_matches_length() {
        // Regression: length_squared must use all three components
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert!(approx_eq(v.length_squared(), v.length() * v.length()));
        assert!(approx_eq(v.length_squared(), 49.0));
    }

    #[test]
    fn test_set_length() {
        let mut v = Vec3::new(1.0, 2.0, 2.0);
        v.set_length(6.0).unwrap();
        assert!(approx_eq(v.length(), 6.0));
        assert!(approx_eq(v.x, 2.0));

        let before = Vec3::new(0.0, 0.0, 0.0);
        let mut zero = before;
        assert!(zero.set_length(2.0).is_err());
        assert_eq!(zero, before);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        let mut c = Vec3::ZERO;
        c.set_cross(&a, &b);
        assert!(approx_eq(c.dot(&a), 0.0));
        assert!(approx_eq(c.dot(&b), 0.0));
    }

    #[test]
    fn test_cross_basis_vectors() {
        assert_eq!(Vec3::X.cross(&Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(&Vec3::Z), Vec3::X);
    }

    #[test]
    fn test_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);
        assert!(approx_eq(a.dot(&b), 12.0));
    }

    #[test]
    fn test_in_place_chaining() {
        let mut v = Vec3::ZERO;
        v.set(1.0, 1.0, 1.0)
            .add_with(&Vec3::new(1.0, 0.0, 0.0))
            .sub_with(&Vec3::new(0.0, 1.0, 0.0))
            .scale_by(2.0);
        assert_eq!(v, Vec3::new(4.0, 0.0, 2.0));
    }

    #[test]
    fn test_copy_from_to() {
        let src = Vec3::new(7.0, 8.0, 9.0);
        let mut dst = Vec3::ZERO;
        dst.copy_from(&src);
        assert_eq!(dst, src);

        let mut out = Vec3::ZERO;
        src.copy_to(&mut out);
        assert_eq!(out, src);
    }

    #[test]
    fn test_operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }
}
