//! Coverage: how much of a target pixel the mapped source rectangle
//! fills.
//!
//! A rotated source does not fill its axis-aligned bounding box; the
//! pixels outside the rotated rectangle should composite as
//! transparent, and the pixels straddling its edge should blend. The
//! [`Coverage`] function gives every target pixel an alpha in [0, 1]:
//! 1 deep inside the mapped source rectangle, 0 outside a soft border
//! of half a pixel on each side, and a [`Transition`]-shaped ramp in
//! between. The two axis contributions multiply.

use crate::SourceMap;

/// Shape of the coverage ramp across the soft border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Straight ramp: `1 - d`.
    #[default]
    Linear,
    /// Hard edge at the border midpoint.
    Step,
    /// Rational S-curve, flat near both ends of the border.
    PLin,
}

impl Transition {
    /// Evaluates the coverage contribution at normalised border depth
    /// `d` (0 at the inner edge, 1 at the outer edge).
    ///
    /// Depths outside [0, 1] are clamped.
    #[inline]
    pub fn profile(&self, d: f32) -> f32 {
        let d = d.clamp(0.0, 1.0);
        match self {
            Self::Linear => 1.0 - d,
            Self::Step => {
                if d < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::PLin => {
                let q = d * d;
                let r = 1.0 - d;
                let den = r * r + q;
                if den == 0.0 {
                    0.5
                } else {
                    1.0 - q / den
                }
            }
        }
    }
}

/// Per-target-pixel alpha describing source coverage.
///
/// # Example
///
/// ```rust
/// use plin_math::{Affine2, Coverage, SourceMap, Transition};
///
/// // Identity mapping over an 8x8 source: interior pixels are fully
/// // covered, the outermost ring is feathered.
/// let cov = Coverage::new(SourceMap::affine(Affine2::IDENTITY), 8, 8, Transition::Linear);
/// assert_eq!(cov.alpha(4, 4), 1.0);
/// assert!(cov.alpha(0, 4) < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Coverage {
    map: SourceMap,
    x_range: f32,
    y_range: f32,
    src_w: f32,
    src_h: f32,
    transition: Transition,
}

impl Coverage {
    /// Creates a coverage function with the default half-pixel soft
    /// border on each side.
    pub fn new(map: SourceMap, src_w: u32, src_h: u32, transition: Transition) -> Self {
        Self::with_ranges(map, src_w, src_h, transition, 0.5, 0.5)
    }

    /// Creates a coverage function with explicit per-axis half-ranges.
    pub fn with_ranges(
        map: SourceMap,
        src_w: u32,
        src_h: u32,
        transition: Transition,
        x_range: f32,
        y_range: f32,
    ) -> Self {
        Self {
            map,
            x_range,
            y_range,
            src_w: src_w as f32,
            src_h: src_h as f32,
            transition,
        }
    }

    /// Evaluates the coverage alpha for target pixel (x, y).
    pub fn alpha(&self, x: u32, y: u32) -> f32 {
        let s = self.map.map(x, y);
        let ax = axis_alpha(s.x, self.src_w, self.x_range, self.transition);
        let ay = axis_alpha(s.y, self.src_h, self.y_range, self.transition);
        ax * ay
    }
}

/// One axis of the coverage product.
///
/// The outer box is `[-range, len - 1 + range]`, the inner box
/// `[range, len - 1 - range]`; between them the transition profile is
/// evaluated on the normalised depth. The depth clamp keeps sources
/// narrower than the two borders well-defined.
fn axis_alpha(s: f32, len: f32, range: f32, transition: Transition) -> f32 {
    let outer_lo = -range;
    let outer_hi = len - 1.0 + range;
    if s <= outer_lo || s >= outer_hi {
        return 0.0;
    }
    let inner_lo = range;
    let inner_hi = len - 1.0 - range;
    let band = 2.0 * range;
    let mut alpha = 1.0;
    if s < inner_lo {
        alpha = transition.profile((inner_lo - s) / band);
    }
    if s > inner_hi {
        alpha = alpha.min(transition.profile((s - inner_hi) / band));
    }
    alpha
}
