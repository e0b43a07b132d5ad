//! Error types for resampling operations.

use thiserror::Error;

/// Error type for resampling operations.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// The resampler configuration is incomplete.
    ///
    /// Returned by `optimize()`, `bake()` or `resize()` when a required
    /// piece of configuration is missing; the target is left untouched.
    #[error("resampler not ready: {0}")]
    NotReady(String),

    /// An image does not match the configured dimensions.
    #[error("{what} is {actual_w}x{actual_h}, configured for {expected_w}x{expected_h}")]
    DimensionMismatch {
        /// Which image failed the check.
        what: &'static str,
        /// Configured width
        expected_w: u32,
        /// Configured height
        expected_h: u32,
        /// Actual width
        actual_w: u32,
        /// Actual height
        actual_h: u32,
    },

    /// Source and target channel counts differ.
    #[error("channel mismatch: source has {source_channels}, target has {target}")]
    ChannelMismatch {
        /// Source channel count
        source_channels: u32,
        /// Target channel count
        target: u32,
    },
}

/// Result type for resampling operations.
pub type ResampleResult<T> = Result<T, ResampleError>;
