//! 2D affine matrix type for coordinate transforms.
//!
//! [`Affine2`] encodes `p' = A * p + b` with a 2x2 linear part and a
//! translation vector, six `f32` values in total.
//!
//! # Convention
//!
//! The rotation constructor uses screen coordinates (y grows downward):
//!
//! ```text
//! | x' |   |  cos t   sin t | | x |   | tx |
//! | y' | = | -sin t   cos t | | y | + | ty |
//! ```
//!
//! Composition follows function application: `(A * B)(p) = A(B(p))`.
//!
//! # Usage
//!
//! ```rust
//! use plin_math::Affine2;
//! use glam::Vec2;
//!
//! let m = Affine2::from_scale(2.0, 2.0) * Affine2::from_translation(Vec2::new(1.0, 0.0));
//! assert_eq!(m.transform(Vec2::new(1.0, 1.0)), Vec2::new(4.0, 2.0));
//! ```

use glam::Vec2;
use std::ops::Mul;

/// Determinants smaller than this are treated as singular.
const DET_EPSILON: f32 = 1e-12;

/// A 2D affine transform: 2x2 linear part plus translation.
///
/// # Example
///
/// ```rust
/// use plin_math::Affine2;
/// use glam::Vec2;
///
/// let identity = Affine2::IDENTITY;
/// let p = Vec2::new(3.0, 4.0);
/// assert_eq!(identity.transform(p), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Affine2 {
    /// Row 0, column 0 of the linear part
    pub xx: f32,
    /// Row 0, column 1 of the linear part
    pub xy: f32,
    /// Row 1, column 0 of the linear part
    pub yx: f32,
    /// Row 1, column 1 of the linear part
    pub yy: f32,
    /// X translation
    pub tx: f32,
    /// Y translation
    pub ty: f32,
}

impl Affine2 {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Creates a transform from its six components.
    #[inline]
    pub const fn new(xx: f32, xy: f32, yx: f32, yy: f32, tx: f32, ty: f32) -> Self {
        Self {
            xx,
            xy,
            yx,
            yy,
            tx,
            ty,
        }
    }

    /// Creates a pure translation.
    #[inline]
    pub fn from_translation(t: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, t.x, t.y)
    }

    /// Creates an axis-aligned scale.
    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a rotation about the origin by `angle` radians.
    ///
    /// Positive angles rotate counter-clockwise on screen (y-down
    /// coordinates).
    #[inline]
    pub fn from_rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Returns the translation component.
    #[inline]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn transform(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.xx * p.x + self.xy * p.y + self.tx,
            self.yx * p.x + self.yy * p.y + self.ty,
        )
    }

    /// Returns the determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Returns the inverse transform, or `None` when the matrix is
    /// singular.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plin_math::Affine2;
    /// use glam::Vec2;
    ///
    /// let m = Affine2::from_scale(2.0, 4.0);
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(inv.transform(Vec2::new(2.0, 4.0)), Vec2::new(1.0, 1.0));
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < DET_EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let xx = self.yy * inv;
        let xy = -self.xy * inv;
        let yx = -self.yx * inv;
        let yy = self.xx * inv;
        Some(Self::new(
            xx,
            xy,
            yx,
            yy,
            -(xx * self.tx + xy * self.ty),
            -(yx * self.tx + yy * self.ty),
        ))
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine2 {
    type Output = Self;

    /// Composes two transforms: `(a * b)(p) == a(b(p))`.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.xx * rhs.xx + self.xy * rhs.yx,
            self.xx * rhs.xy + self.xy * rhs.yy,
            self.yx * rhs.xx + self.yy * rhs.yx,
            self.yx * rhs.xy + self.yy * rhs.yy,
            self.xx * rhs.tx + self.xy * rhs.ty + self.tx,
            self.yx * rhs.tx + self.yy * rhs.ty + self.ty,
        )
    }
}
