//! Declarative transformation setup and builder.
//!
//! [`TransformSetup`] collects the parameters of a combined
//! translate / scale / rotate / expand transformation; [`build`]
//! (see [`TransformSetup::build`]) turns it into a forward
//! (source-to-target) and inverse (target-to-source) matrix pair plus
//! the enclosing target dimensions.
//!
//! The forward and inverse matrices are maintained in lockstep: every
//! step composed onto the forward matrix prepends its exact inverse on
//! the inverse matrix. The pair therefore always composes to the
//! identity without a separate numeric inversion at the end.
//!
//! # Operation Order
//!
//! 1. Expansion (unless [`TransformSetup::apply_expansion_last`])
//! 2. Translation
//! 3. Scaling (relative factors or absolute target dimensions)
//! 4. Rotation, re-anchoring the rotated bounding box into the
//!    positive quadrant
//! 5. Expansion last, when selected
//!
//! # Usage
//!
//! ```rust
//! use plin_math::TransformSetup;
//!
//! let built = TransformSetup {
//!     scaling_x: 2.0,
//!     scaling_y: 2.0,
//!     original_width: 32.0,
//!     original_height: 16.0,
//!     ..Default::default()
//! }
//! .build()
//! .unwrap();
//!
//! assert_eq!((built.target_width, built.target_height), (64, 32));
//! ```

use crate::Affine2;
use glam::Vec2;
use plin_core::{Error, Result};

/// Declarative description of a combined affine transformation.
///
/// All fields default to the identity transformation. Dimensions and
/// expansion borders are measured in pixels; scale factors are
/// multipliers in relative mode and absolute target dimensions
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSetup {
    /// Rotation angle, in degrees when [`Self::rotation_in_degrees`].
    pub rotation_angle: f32,
    /// Interpret [`Self::rotation_angle`] as degrees (default) or radians.
    pub rotation_in_degrees: bool,
    /// Grow the target to the rotated bounding box (default). When
    /// false the target keeps the pre-rotation dimensions and the
    /// rotated content is re-centred, cropping the corners.
    pub rotation_rescaling: bool,
    /// Horizontal scale factor, or absolute target width when
    /// [`Self::relative_scaling`] is false.
    pub scaling_x: f32,
    /// Vertical scale factor, or absolute target height.
    pub scaling_y: f32,
    /// Interpret the scaling fields as factors (default) or dimensions.
    pub relative_scaling: bool,
    /// Horizontal translation in pixels.
    pub translate_x: f32,
    /// Vertical translation in pixels.
    pub translate_y: f32,
    /// Border added on the left edge.
    pub expand_left: f32,
    /// Border added on the top edge.
    pub expand_top: f32,
    /// Border added on the right edge.
    pub expand_right: f32,
    /// Border added on the bottom edge.
    pub expand_bottom: f32,
    /// Apply the expansion after scaling and rotation instead of first.
    pub apply_expansion_last: bool,
    /// Source image width in pixels.
    pub original_width: f32,
    /// Source image height in pixels.
    pub original_height: f32,
}

impl Default for TransformSetup {
    fn default() -> Self {
        Self {
            rotation_angle: 0.0,
            rotation_in_degrees: true,
            rotation_rescaling: true,
            scaling_x: 1.0,
            scaling_y: 1.0,
            relative_scaling: true,
            translate_x: 0.0,
            translate_y: 0.0,
            expand_left: 0.0,
            expand_top: 0.0,
            expand_right: 0.0,
            expand_bottom: 0.0,
            apply_expansion_last: false,
            original_width: 0.0,
            original_height: 0.0,
        }
    }
}

/// Result of [`TransformSetup::build`]: the matrix pair and the target
/// dimensions that enclose the transformed source rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltTransform {
    /// Source-to-target mapping.
    pub forward: Affine2,
    /// Target-to-source mapping.
    pub inverse: Affine2,
    /// Enclosing target width in pixels.
    pub target_width: u32,
    /// Enclosing target height in pixels.
    pub target_height: u32,
}

/// Forward/inverse pair under construction. `push` composes `op` onto
/// the forward side and `op_inv` onto the inverse side.
struct MatrixPair {
    forward: Affine2,
    inverse: Affine2,
}

impl MatrixPair {
    fn identity() -> Self {
        Self {
            forward: Affine2::IDENTITY,
            inverse: Affine2::IDENTITY,
        }
    }

    fn push(&mut self, op: Affine2, op_inv: Affine2) {
        self.forward = op * self.forward;
        self.inverse = self.inverse * op_inv;
    }

    fn push_translation(&mut self, t: Vec2) {
        self.push(
            Affine2::from_translation(t),
            Affine2::from_translation(-t),
        );
    }
}

impl TransformSetup {
    /// Builds the forward/inverse matrix pair and target dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when the original
    /// dimensions, relative scale factors, or absolute target
    /// dimensions are not positive.
    pub fn build(&self) -> Result<BuiltTransform> {
        if self.original_width <= 0.0 || self.original_height <= 0.0 {
            return Err(Error::invalid_dimensions(
                self.original_width.max(0.0) as u32,
                self.original_height.max(0.0) as u32,
                1,
                "original dimensions must be positive",
            ));
        }

        let mut width = self.original_width;
        let mut height = self.original_height;
        let mut pair = MatrixPair::identity();

        let expands = self.expand_left != 0.0
            || self.expand_top != 0.0
            || self.expand_right != 0.0
            || self.expand_bottom != 0.0;

        if expands && !self.apply_expansion_last {
            pair.push_translation(Vec2::new(self.expand_left, self.expand_top));
            width += self.expand_left + self.expand_right;
            height += self.expand_top + self.expand_bottom;
        }

        if self.translate_x != 0.0 || self.translate_y != 0.0 {
            pair.push_translation(Vec2::new(self.translate_x, self.translate_y));
        }

        let (sx, sy) = if self.relative_scaling {
            (self.scaling_x, self.scaling_y)
        } else {
            (
                self.scaling_x / self.original_width,
                self.scaling_y / self.original_height,
            )
        };
        if sx <= 0.0 || sy <= 0.0 {
            return Err(Error::invalid_dimensions(
                0,
                0,
                1,
                "scale factors must be positive",
            ));
        }
        if sx != 1.0 || sy != 1.0 {
            pair.push(
                Affine2::from_scale(sx, sy),
                Affine2::from_scale(1.0 / sx, 1.0 / sy),
            );
        }
        if self.relative_scaling {
            width *= sx;
            height *= sy;
        } else {
            width = self.scaling_x;
            height = self.scaling_y;
        }

        let angle = if self.rotation_in_degrees {
            self.rotation_angle.to_radians()
        } else {
            self.rotation_angle
        };
        if angle != 0.0 {
            let (sin, cos) = angle.sin_cos();

            // Anchor translation re-homes the rotated bounding box into
            // the positive quadrant; the four sign cases cover each
            // quadrant of the angle.
            let mut tx = 0.0;
            let mut ty = 0.0;
            if sin >= 0.0 {
                ty += width * sin;
            } else {
                tx -= height * sin;
            }
            if cos < 0.0 {
                tx -= width * cos;
                ty -= height * cos;
            }

            let rot = Affine2::new(cos, sin, -sin, cos, tx, ty);
            // Inverse: transpose of the rotation with anchor -R^T * t.
            let rot_inv = Affine2::new(
                cos,
                -sin,
                sin,
                cos,
                -(cos * tx - sin * ty),
                -(sin * tx + cos * ty),
            );
            pair.push(rot, rot_inv);

            let rotated_w = cos.abs() * width + sin.abs() * height;
            let rotated_h = sin.abs() * width + cos.abs() * height;
            if self.rotation_rescaling {
                width = rotated_w;
                height = rotated_h;
            } else {
                // Keep the original canvas and centre the rotated box on it.
                let shift = Vec2::new((width - rotated_w) * 0.5, (height - rotated_h) * 0.5);
                pair.push_translation(shift);
            }
        }

        if expands && self.apply_expansion_last {
            pair.push_translation(Vec2::new(self.expand_left, self.expand_top));
            width += self.expand_left + self.expand_right;
            height += self.expand_top + self.expand_bottom;
        }

        Ok(BuiltTransform {
            forward: pair.forward,
            inverse: pair.inverse,
            target_width: (width.round() as u32).max(1),
            target_height: (height.round() as u32).max(1),
        })
    }
}
