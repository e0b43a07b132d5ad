//! # plin-core
//!
//! Core types for the plin-rs resampling engine.
//!
//! This crate provides the foundational types used by the rest of the
//! workspace:
//!
//! - [`Image`] - Interleaved 8-bit image buffer with edge-extending reads
//! - [`Error`], [`Result`] - Shared error handling
//!
//! ## Design Philosophy
//!
//! The buffer is deliberately forgiving at its edges: reads outside the
//! image clamp to the nearest valid sample and writes outside the image
//! are dropped. Interpolation kernels walk a 2x2 window whose base index
//! comes from `floor(source_coordinate)`, so the window legitimately
//! straddles the image border near the right and bottom edges. Clamped
//! access turns that into "extend the last row/column" instead of a
//! bounds failure.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of plin-rs and has no internal
//! dependencies. The other workspace crates depend on `plin-core`:
//!
//! ```text
//! plin-core (this crate)
//!    ^
//!    |
//!    +-- plin-math (affine transforms, coordinate casting)
//!    +-- plin-ops  (kernels, resampler)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::Image;
