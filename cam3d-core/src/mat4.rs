//! 4x4 column-major matrix for the model/view/projection pipeline.

use std::ops::Mul;

use crate::error::MathError;
use crate::vec3::Vec3;

/// Axis lengths at or below this are treated as zero.
const AXIS_EPSILON: f32 = 1e-6;
/// Determinants at or below this magnitude mark a matrix as singular.
const DET_EPSILON: f32 = 1e-6;

/// A 4x4 single-precision matrix, stored column-major.
///
/// The element layout matches what graphics APIs expect for a 4x4 uniform
/// upload: consecutive elements in [`Mat4::elements`] form a column.
/// In-place methods return `&mut Self` (or `Result<&mut Self, _>` where the
/// input can be rejected) so transform chains compose left to right, while
/// the `Mul` operator builds allocating chains such as
/// `projection * view * model`.
///
/// `multiply` post-composes: `a.multiply(&b)` leaves `a · b` in `a`, which is
/// the composition order required for column-major MVP pipelines.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    elements: [f32; 16],
}

impl Mat4 {
    /// A fresh identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// The flat column-major buffer, as handed to a 4x4 uniform upload.
    ///
    /// Read-only: mutation goes through the transform methods so the matrix
    /// invariants hold between frames.
    #[inline]
    pub fn elements(&self) -> &[f32; 16] {
        &self.elements
    }

    /// Reset to the multiplicative identity.
    #[inline]
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Overwrite `self` with a copy of `m`.
    #[inline]
    pub fn set(&mut self, m: &Mat4) -> &mut Self {
        *self = *m;
        self
    }

    /// Post-compose: `self = self · m`.
    #[inline]
    pub fn multiply(&mut self, m: &Mat4) -> &mut Self {
        *self = *self * *m;
        self
    }

    /// In-place transpose.
    pub fn transpose(&mut self) -> &mut Self {
        let e = &mut self.elements;
        for col in 0..4 {
            for row in (col + 1)..4 {
                e.swap(col * 4 + row, row * 4 + col);
            }
        }
        self
    }

    /// Set to a rotation of `angle_deg` degrees about the given axis.
    ///
    /// The axis need not be normalized; a zero axis is rejected with
    /// `InvalidArgument` before any mutation.
    pub fn set_rotate(
        &mut self,
        angle_deg: f32,
        ax: f32,
        ay: f32,
        az: f32,
    ) -> Result<&mut Self, MathError> {
        let len = (ax * ax + ay * ay + az * az).sqrt();
        if len <= AXIS_EPSILON {
            return Err(MathError::InvalidArgument {
                what: "rotation axis must be non-zero",
            });
        }
        let (x, y, z) = (ax / len, ay / len, az / len);

        // Rodrigues rotation, written out column by column.
        let rad = angle_deg.to_radians();
        let c = rad.cos();
        let s = rad.sin();
        let t = 1.0 - c;

        self.elements = [
            t * x * x + c,
            t * x * y + s * z,
            t * x * z - s * y,
            0.0,
            t * x * y - s * z,
            t * y * y + c,
            t * y * z + s * x,
            0.0,
            t * x * z + s * y,
            t * y * z - s * x,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ];
        Ok(self)
    }

    /// Post-multiply by a rotation about the given axis.
    pub fn rotate(
        &mut self,
        angle_deg: f32,
        ax: f32,
        ay: f32,
        az: f32,
    ) -> Result<&mut Self, MathError> {
        let mut r = Mat4::identity();
        r.set_rotate(angle_deg, ax, ay, az)?;
        Ok(self.multiply(&r))
    }

    /// Set to a pure translation.
    pub fn set_translate(&mut self, dx: f32, dy: f32, dz: f32) -> &mut Self {
        self.set_identity();
        self.elements[12] = dx;
        self.elements[13] = dy;
        self.elements[14] = dz;
        self
    }

    /// Post-multiply by a translation, in place.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> &mut Self {
        let e = &mut self.elements;
        for row in 0..4 {
            e[12 + row] += e[row] * dx + e[4 + row] * dy + e[8 + row] * dz;
        }
        self
    }

    /// Set to a pure (possibly non-uniform) scale.
    pub fn set_scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.set_identity();
        self.elements[0] = sx;
        self.elements[5] = sy;
        self.elements[10] = sz;
        self
    }

    /// Post-multiply by a scale, in place.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        let e = &mut self.elements;
        for row in 0..4 {
            e[row] *= sx;
            e[4 + row] *= sy;
            e[8 + row] *= sz;
        }
        self
    }

    /// Set to a right-handed view matrix looking from `eye` toward `center`.
    ///
    /// Fails with `DegenerateTransform` (before any mutation) when `eye`
    /// coincides with `center` or when `up` is parallel to the view
    /// direction; the silent-NaN behavior of textbook implementations is
    /// explicitly not reproduced.
    pub fn set_look_at(
        &mut self,
        eye: Vec3,
        center: Vec3,
        up: Vec3,
    ) -> Result<&mut Self, MathError> {
        let forward = (center - eye).normalized().map_err(|_| {
            MathError::DegenerateTransform {
                what: "look-at eye coincides with center",
            }
        })?;
        let side = forward.cross(&up).normalized().map_err(|_| {
            MathError::DegenerateTransform {
                what: "look-at up vector is parallel to the view direction",
            }
        })?;
        let upright = side.cross(&forward);

        self.elements = [
            side.x, upright.x, -forward.x, 0.0, //
            side.y, upright.y, -forward.y, 0.0, //
            side.z, upright.z, -forward.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        Ok(self.translate(-eye.x, -eye.y, -eye.z))
    }

    /// Post-multiply by a look-at view matrix.
    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> Result<&mut Self, MathError> {
        let mut view = Mat4::identity();
        view.set_look_at(eye, center, up)?;
        Ok(self.multiply(&view))
    }

    /// Set to a right-handed perspective projection with GL-style -1..1 depth.
    ///
    /// Requires `fov_deg` in `(0, 180)`, `aspect > 0` and `0 < near < far`;
    /// anything else is rejected with `InvalidArgument` before any mutation.
    pub fn set_perspective(
        &mut self,
        fov_deg: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self, MathError> {
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(MathError::InvalidArgument {
                what: "field of view must be in (0, 180) degrees",
            });
        }
        if !(aspect > 0.0) {
            return Err(MathError::InvalidArgument {
                what: "aspect ratio must be positive",
            });
        }
        if !(near > 0.0 && far > near) {
            return Err(MathError::InvalidArgument {
                what: "clip planes must satisfy 0 < near < far",
            });
        }

        let cot = 1.0 / (fov_deg.to_radians() / 2.0).tan();
        let rd = 1.0 / (far - near);

        self.elements = [
            cot / aspect, 0.0, 0.0, 0.0, //
            0.0, cot, 0.0, 0.0, //
            0.0, 0.0, -(far + near) * rd, -1.0, //
            0.0, 0.0, -2.0 * near * far * rd, 0.0,
        ];
        Ok(self)
    }

    /// Set to a right-handed orthographic projection with GL-style -1..1 depth.
    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self, MathError> {
        if left == right || bottom == top || near == far {
            return Err(MathError::InvalidArgument {
                what: "orthographic planes must be pairwise distinct",
            });
        }

        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let rd = 1.0 / (far - near);

        self.elements = [
            2.0 * rw, 0.0, 0.0, 0.0, //
            0.0, 2.0 * rh, 0.0, 0.0, //
            0.0, 0.0, -2.0 * rd, 0.0, //
            -(right + left) * rw,
            -(top + bottom) * rh,
            -(far + near) * rd,
            1.0,
        ];
        Ok(self)
    }

    /// Overwrite `self` with the inverse of `m`, computed by cofactor
    /// expansion.
    ///
    /// Fails with `DegenerateTransform` (before any mutation) when `m` is
    /// singular.
    pub fn set_inverse_of(&mut self, m: &Mat4) -> Result<&mut Self, MathError> {
        let a = &m.elements;

        // 2x2 sub-determinants shared between the cofactors.
        let b00 = a[0] * a[5] - a[1] * a[4];
        let b01 = a[0] * a[6] - a[2] * a[4];
        let b02 = a[0] * a[7] - a[3] * a[4];
        let b03 = a[1] * a[6] - a[2] * a[5];
        let b04 = a[1] * a[7] - a[3] * a[5];
        let b05 = a[2] * a[7] - a[3] * a[6];
        let b06 = a[8] * a[13] - a[9] * a[12];
        let b07 = a[8] * a[14] - a[10] * a[12];
        let b08 = a[8] * a[15] - a[11] * a[12];
        let b09 = a[9] * a[14] - a[10] * a[13];
        let b10 = a[9] * a[15] - a[11] * a[13];
        let b11 = a[10] * a[15] - a[11] * a[14];

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        if det.abs() <= DET_EPSILON {
            return Err(MathError::DegenerateTransform {
                what: "matrix is singular and cannot be inverted",
            });
        }
        let d = 1.0 / det;

        self.elements = [
            (a[5] * b11 - a[6] * b10 + a[7] * b09) * d,
            (a[2] * b10 - a[1] * b11 - a[3] * b09) * d,
            (a[13] * b05 - a[14] * b04 + a[15] * b03) * d,
            (a[10] * b04 - a[9] * b05 - a[11] * b03) * d,
            (a[6] * b08 - a[4] * b11 - a[7] * b07) * d,
            (a[0] * b11 - a[2] * b08 + a[3] * b07) * d,
            (a[14] * b02 - a[12] * b05 - a[15] * b01) * d,
            (a[8] * b05 - a[10] * b02 + a[11] * b01) * d,
            (a[4] * b10 - a[5] * b08 + a[7] * b06) * d,
            (a[1] * b08 - a[0] * b10 - a[3] * b06) * d,
            (a[12] * b04 - a[13] * b02 + a[15] * b00) * d,
            (a[9] * b02 - a[8] * b04 - a[11] * b00) * d,
            (a[5] * b07 - a[4] * b09 - a[6] * b06) * d,
            (a[0] * b09 - a[1] * b07 + a[2] * b06) * d,
            (a[13] * b01 - a[12] * b03 - a[14] * b00) * d,
            (a[8] * b03 - a[9] * b01 + a[10] * b00) * d,
        ];
        Ok(self)
    }

    /// Invert in place.
    pub fn invert(&mut self) -> Result<&mut Self, MathError> {
        let m = *self;
        self.set_inverse_of(&m)
    }

    /// Apply to a point, returning the un-divided clip-space coordinates and
    /// their `w` component.
    #[inline]
    pub fn transform_homogeneous(&self, p: Vec3) -> (Vec3, f32) {
        let e = &self.elements;
        let x = e[0] * p.x + e[4] * p.y + e[8] * p.z + e[12];
        let y = e[1] * p.x + e[5] * p.y + e[9] * p.z + e[13];
        let z = e[2] * p.x + e[6] * p.y + e[10] * p.z + e[14];
        let w = e[3] * p.x + e[7] * p.y + e[11] * p.z + e[15];
        (Vec3::new(x, y, z), w)
    }

    /// Transform a point (w = 1), with perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let (v, w) = self.transform_homogeneous(p);
        if w.abs() > AXIS_EPSILON {
            Vec3::new(v.x / w, v.y / w, v.z / w)
        } else {
            v
        }
    }

    /// Transform a direction (w = 0): rotation and scale only.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * v.x + e[4] * v.y + e[8] * v.z,
            e[1] * v.x + e[5] * v.y + e[9] * v.z,
            e[2] * v.x + e[6] * v.y + e[10] * v.z,
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.elements;
        let b = &rhs.elements;
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        Self { elements: out }
    }
}
