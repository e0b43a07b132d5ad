//! Coordinate casting: target pixel indices to fractional source
//! coordinates.
//!
//! A resampler works backwards: for every target pixel it asks where in
//! the source that pixel samples from. [`Cast1d`] answers that per axis
//! for plain resizes, [`SourceMap`] generalises to full inverse-affine
//! mapping for rotated output.
//!
//! # Casts
//!
//! - [`Cast1d::Proper`] - centre-aligned `(i + 0.5) / scale - 0.5`;
//!   pixel centres map onto pixel centres, edges gain a half-pixel
//!   fringe that the clamped source read extends.
//! - [`Cast1d::Fast`] - edge-to-edge `i * (orig - 1) / (target - 1)`;
//!   first and last samples map exactly, cropping the half-pixel
//!   borders.
//! - [`Cast1d::Table`] - pre-baked lookup of either of the above, built
//!   once per resize so the hot loop is an indexed load.

use crate::Affine2;
use glam::Vec2;

/// Default half-pixel coordinate correction for affine mapping.
const PIXEL_CENTRE: Vec2 = Vec2::new(0.5, 0.5);

/// One-dimensional cast from a target index to a source coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Cast1d {
    /// Centre-aligned scaling: `(i + 0.5) / scale - 0.5`.
    Proper {
        /// Target length divided by source length.
        scale: f32,
    },
    /// Edge-to-edge scaling: `i * step` with `step = (orig-1)/(target-1)`.
    Fast {
        /// Source step per target pixel.
        step: f32,
    },
    /// Pre-baked lookup table, one source coordinate per target index.
    Table(Vec<f32>),
}

impl Cast1d {
    /// Creates a centre-aligned cast for the given axis lengths.
    pub fn proper(orig: u32, target: u32) -> Self {
        Self::Proper {
            scale: target as f32 / orig as f32,
        }
    }

    /// Creates an edge-to-edge cast for the given axis lengths.
    ///
    /// A single-pixel target degenerates to sampling the first source
    /// pixel.
    pub fn fast(orig: u32, target: u32) -> Self {
        let step = if target > 1 {
            (orig as f32 - 1.0) / (target as f32 - 1.0)
        } else {
            0.0
        };
        Self::Fast { step }
    }

    /// Evaluates the cast at target index `i`.
    #[inline]
    pub fn at(&self, i: u32) -> f32 {
        match self {
            Self::Proper { scale } => (i as f32 + 0.5) / scale - 0.5,
            Self::Fast { step } => i as f32 * step,
            Self::Table(table) => table[i as usize],
        }
    }

    /// Bakes this cast into a lookup table covering `len` indices.
    ///
    /// A [`Cast1d::Table`] input is passed through unchanged.
    pub fn buffered(&self, len: u32) -> Self {
        match self {
            Self::Table(_) => self.clone(),
            _ => Self::Table((0..len).map(|i| self.at(i)).collect()),
        }
    }
}

/// Target-to-source mapping for the whole image.
///
/// Plain resizes use a separable per-axis cast; rotated or otherwise
/// affine-transformed output maps each target pixel through the inverse
/// matrix with a half-pixel centre correction:
/// `s = M * (p + c) - c`.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceMap {
    /// Independent per-axis casts.
    Separable {
        /// Horizontal cast.
        x: Cast1d,
        /// Vertical cast.
        y: Cast1d,
    },
    /// Inverse-affine mapping with coordinate correction.
    Affine {
        /// Target-to-source matrix.
        inverse: Affine2,
        /// Sample-point correction, normally (0.5, 0.5).
        correction: Vec2,
    },
}

impl SourceMap {
    /// Creates a separable map from two per-axis casts.
    pub fn separable(x: Cast1d, y: Cast1d) -> Self {
        Self::Separable { x, y }
    }

    /// Creates an affine map with the default half-pixel correction.
    pub fn affine(inverse: Affine2) -> Self {
        Self::Affine {
            inverse,
            correction: PIXEL_CENTRE,
        }
    }

    /// Creates an affine map with an explicit coordinate correction.
    pub fn affine_with_correction(inverse: Affine2, correction: Vec2) -> Self {
        Self::Affine {
            inverse,
            correction,
        }
    }

    /// Maps a target pixel index to its fractional source coordinate.
    #[inline]
    pub fn map(&self, x: u32, y: u32) -> Vec2 {
        match self {
            Self::Separable { x: cx, y: cy } => Vec2::new(cx.at(x), cy.at(y)),
            Self::Affine {
                inverse,
                correction,
            } => inverse.transform(Vec2::new(x as f32, y as f32) + *correction) - *correction,
        }
    }

    /// Bakes separable casts into lookup tables sized for a
    /// `width` x `height` target. Affine maps are returned unchanged.
    pub fn buffered(&self, width: u32, height: u32) -> Self {
        match self {
            Self::Separable { x, y } => Self::Separable {
                x: x.buffered(width),
                y: y.buffered(height),
            },
            Self::Affine { .. } => self.clone(),
        }
    }
}
