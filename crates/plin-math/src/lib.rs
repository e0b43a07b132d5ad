//! # plin-math
//!
//! Transform algebra and coordinate mapping for the plin-rs resampling
//! engine.
//!
//! This crate provides the geometric half of the pipeline:
//!
//! - [`Affine2`] - 2D affine matrices (scale, rotation, translation)
//! - [`TransformSetup`] - declarative builder producing a forward and
//!   inverse matrix pair plus the enclosing target dimensions
//! - [`Cast1d`], [`SourceMap`] - target-pixel-index to fractional
//!   source-coordinate mapping
//! - [`Coverage`], [`Transition`] - per-target-pixel alpha describing
//!   how the mapped source rectangle covers the output
//!
//! # Design
//!
//! The affine type is hand-rolled (six `f32` values); [`glam`] supplies
//! the `Vec2` point type. All mapping runs target-to-source: the
//! resampler asks, for each output pixel, where in the source it should
//! sample.
//!
//! # Usage
//!
//! ```rust
//! use plin_math::TransformSetup;
//!
//! let built = TransformSetup {
//!     rotation_angle: 45.0,
//!     original_width: 100.0,
//!     original_height: 100.0,
//!     ..Default::default()
//! }
//! .build()
//! .unwrap();
//!
//! assert!(built.target_width >= 100);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `Vec2` point type
//! - [`plin_core`] - shared error type
//!
//! # Used By
//!
//! - `plin-ops` - kernels and the resampler

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod affine;
mod cast;
mod coverage;
mod setup;

pub use affine::*;
pub use cast::*;
pub use coverage::*;
pub use setup::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::Vec2;
}
