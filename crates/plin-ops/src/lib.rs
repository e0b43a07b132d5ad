//! # plin-ops
//!
//! Interpolation kernels and the resampler for the plin-rs engine.
//!
//! This crate implements the pixel-art-oriented resampling pipeline:
//! two-point interpolation kernels (nearest, linear and the rational
//! p-lin blend), proximity-based coefficient correction, transition
//! area restriction, and the [`Resampler`] that drives them over a
//! target image serially or in parallel.
//!
//! # Modules
//!
//! - [`kernel`] - weight generation, positioning, PBCC, TAR
//! - [`resample`] - configuration, coefficient cache, execution
//! - [`mask`] - coverage mask rendering
//!
//! # Example
//!
//! ```rust
//! use plin_core::Image;
//! use plin_ops::{resample, Algorithm, Execution, Interp, PbccMode};
//!
//! let src = Image::from_data(2, 1, 1, vec![0, 255]).unwrap();
//!
//! let mut interp = Interp::new();
//! interp.init_resize(2, 1, 8, 1);
//! interp.init_functions(Algorithm::PLin, PbccMode::None, 0.0);
//!
//! let dst = resample(&src, interp, Execution::Serial).unwrap();
//! assert_eq!(dst.dimensions(), (8, 1));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod kernel;
pub mod mask;
pub mod resample;

pub use error::{ResampleError, ResampleResult};
pub use kernel::{Algorithm, PbccMode, TransitionArea};
pub use resample::{resample, Execution, Interp, Resampler};
