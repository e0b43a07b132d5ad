//! Coverage mask rendering.
//!
//! Rotated output does not fill its bounding box; compositing it over a
//! background needs a per-pixel alpha. [`coverage_mask`] renders a
//! [`Coverage`] function into a single-channel image the host can use
//! as that alpha.

use plin_core::Image;
use plin_math::Coverage;

/// Renders a coverage function into a `width` x `height` single-channel
/// mask. Alpha 1.0 maps to 255.
///
/// # Example
///
/// ```rust
/// use plin_math::{Affine2, Coverage, SourceMap, Transition};
/// use plin_ops::mask::coverage_mask;
///
/// let cov = Coverage::new(SourceMap::affine(Affine2::IDENTITY), 8, 8, Transition::Linear);
/// let mask = coverage_mask(&cov, 8, 8);
/// assert_eq!(mask.get(4, 4, 0), 255);
/// assert!(mask.get(0, 0, 0) < 255);
/// ```
pub fn coverage_mask(coverage: &Coverage, width: u32, height: u32) -> Image {
    let mut mask = Image::new(width, height, 1);
    mask.make_mut();
    for y in 0..height {
        let row = mask.row_mut(y);
        for (x, sample) in row.iter_mut().enumerate() {
            let alpha = coverage.alpha(x as u32, y);
            *sample = (alpha * 255.0).round() as u8;
        }
    }
    mask
}
