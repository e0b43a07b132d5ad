//! Interpolation kernels and coefficient shaping.
//!
//! All kernels here are two-point in 1D; the 2D kernel is the outer
//! product of the per-axis weights over the 2x2 neighbourhood based at
//! `floor(source_coordinate)`.
//!
//! # Kernels
//!
//! - [`Algorithm::Nearest`] - picks the closer sample (blocky)
//! - [`Algorithm::Linear`] - straight blend (smooth but blurry)
//! - [`Algorithm::PLin`] - rational blend `n^2 / ((1-n)^2 + n^2)`:
//!   flat near the sample centres like nearest, monotone S-shaped in
//!   the transition band. Keeps pixel art crisp without the stair-step
//!   artefacts of nearest at non-integer scales.
//!
//! # Coefficient shaping
//!
//! - [`pbcc_correct`] re-weights the 2x2 matrix toward the closest
//!   source sample and renormalises (Proximity-Based Coefficient
//!   Correction).
//! - [`TransitionArea`] remaps the fractional offsets so the blend
//!   happens in a band of fixed width in target pixels, snapping the
//!   rest to the nearest sample (Transition Area Restriction).

/// Interpolation algorithm for the two-point kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Nearest-neighbour (no blending).
    Nearest,
    /// Linear interpolation.
    Linear,
    /// Rational p-lin blend.
    #[default]
    PLin,
}

impl Algorithm {
    /// Returns the two 1D weights `[left, right]` for a normalised
    /// offset `n` in [0, 1].
    ///
    /// The weights always sum to 1.
    #[inline]
    pub fn weights(&self, n: f32) -> [f32; 2] {
        match self {
            Self::Nearest => {
                if n < 0.5 {
                    [1.0, 0.0]
                } else {
                    [0.0, 1.0]
                }
            }
            Self::Linear => [1.0 - n, n],
            Self::PLin => {
                let a = plin_blend(n);
                [1.0 - a, a]
            }
        }
    }
}

/// The p-lin blend factor `n^2 / ((1-n)^2 + n^2)`.
///
/// The denominator is computed directly so the n-near-1 case stays
/// exact; a zero denominator falls back to the symmetric tie 0.5.
#[inline]
pub fn plin_blend(n: f32) -> f32 {
    let q = n * n;
    let r = 1.0 - n;
    let den = r * r + q;
    if den == 0.0 { 0.5 } else { q / den }
}

/// Splits a fractional source coordinate into the base index and the
/// normalised offset in [0, 1).
///
/// The base rounds toward negative infinity, so coordinates just left
/// of zero (rotated or translated borders) produce base -1 with a
/// large offset instead of truncating toward the image. For a
/// coordinate a hair below an integer the subtraction can round the
/// offset up to exactly 1.0; every kernel accepts that.
///
/// # Example
///
/// ```rust
/// use plin_ops::kernel::split;
///
/// assert_eq!(split(2.25), (2, 0.25));
/// assert_eq!(split(-0.25), (-1, 0.75));
/// ```
#[inline]
pub fn split(s: f32) -> (i32, f32) {
    let base = s.floor();
    let n = s - base;
    debug_assert!((0.0..=1.0).contains(&n) || !s.is_finite());
    (base as i32, n)
}

/// Combines per-axis weights into the 2x2 matrix, flattened in corner
/// order (0,0), (1,0), (0,1), (1,1).
#[inline]
pub fn weights2(wx: [f32; 2], wy: [f32; 2]) -> [f32; 4] {
    [
        wx[0] * wy[0],
        wx[1] * wy[0],
        wx[0] * wy[1],
        wx[1] * wy[1],
    ]
}

/// Proximity-Based Coefficient Correction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PbccMode {
    /// No correction.
    #[default]
    None,
    /// Full proximity correction.
    Full,
}

/// Proximity factor for a corner at normalised distance (u, v):
/// `1 - sqrt((u^2 + v^2) / 2)`.
#[inline]
fn proximity(u: f32, v: f32) -> f32 {
    1.0 - ((u * u + v * v) * 0.5).sqrt()
}

/// Applies Proximity-Based Coefficient Correction to a 2x2 weight
/// matrix at fractional position (nx, ny).
///
/// Each corner weight is multiplied by its proximity factor and the
/// matrix is renormalised, biasing the contribution toward the closest
/// source sample while keeping the weights a partition of unity.
#[inline]
pub fn pbcc_correct(w: [f32; 4], nx: f32, ny: f32) -> [f32; 4] {
    let dx = [nx, 1.0 - nx];
    let dy = [ny, 1.0 - ny];
    let corrected = [
        w[0] * proximity(dx[0], dy[0]),
        w[1] * proximity(dx[1], dy[0]),
        w[2] * proximity(dx[0], dy[1]),
        w[3] * proximity(dx[1], dy[1]),
    ];
    let sum = corrected[0] + corrected[1] + corrected[2] + corrected[3];
    if sum <= 0.0 {
        // Cannot renormalise; leave the input weights as they are.
        return w;
    }
    let inv = 1.0 / sum;
    let out = [
        corrected[0] * inv,
        corrected[1] * inv,
        corrected[2] * inv,
        corrected[3] * inv,
    ];
    debug_assert!((out.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    out
}

/// Transition Area Restriction: compresses the interpolation band
/// around the midpoint between source samples.
///
/// Built from a transition width in *target* pixels, it locks offsets
/// near 0 and 1 to the adjacent sample and linearly rescales the
/// remaining band across the full [0, 1] range before the kernel sees
/// it. A band width of zero degrades to the nearest-neighbour step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionArea {
    px: f32,
    py: f32,
    lx: f32,
    ly: f32,
}

impl TransitionArea {
    /// Creates the restriction for a transition width of `tau` target
    /// pixels and the given source and target dimensions.
    pub fn new(tau: f32, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Self {
        let px = (tau * src_w as f32 / dst_w as f32).clamp(0.0, 1.0);
        let py = (tau * src_h as f32 / dst_h as f32).clamp(0.0, 1.0);
        Self {
            px,
            py,
            lx: (1.0 - px) * 0.5,
            ly: (1.0 - py) * 0.5,
        }
    }

    /// Remaps the fractional offsets into the restricted band.
    #[inline]
    pub fn remap(&self, nx: f32, ny: f32) -> (f32, f32) {
        (
            Self::axis(nx, self.px, self.lx),
            Self::axis(ny, self.py, self.ly),
        )
    }

    #[inline]
    fn axis(n: f32, p: f32, lock: f32) -> f32 {
        if p <= 0.0 {
            // Zero-width transition: pure nearest-neighbour split.
            return if n < 0.5 { 0.0 } else { 1.0 };
        }
        ((n - lock) / p).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALGORITHMS: [Algorithm; 3] = [Algorithm::Nearest, Algorithm::Linear, Algorithm::PLin];

    #[test]
    fn test_weights_partition_of_unity() {
        for algorithm in ALGORITHMS {
            for i in 0..=100 {
                let n = i as f32 / 100.0;
                let [a, b] = algorithm.weights(n);
                assert_abs_diff_eq!(a + b, 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_weights2_partition_of_unity() {
        for algorithm in ALGORITHMS {
            for i in 0..=10 {
                for j in 0..=10 {
                    let w = weights2(
                        algorithm.weights(i as f32 / 10.0),
                        algorithm.weights(j as f32 / 10.0),
                    );
                    assert_abs_diff_eq!(w.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_nearest_switches_at_half() {
        assert_eq!(Algorithm::Nearest.weights(0.49), [1.0, 0.0]);
        assert_eq!(Algorithm::Nearest.weights(0.5), [0.0, 1.0]);
    }

    #[test]
    fn test_plin_shape() {
        // Flat near the samples, symmetric tie at the midpoint.
        assert_eq!(plin_blend(0.0), 0.0);
        assert_eq!(plin_blend(1.0), 1.0);
        assert_abs_diff_eq!(plin_blend(0.5), 0.5, epsilon = 1e-6);
        assert!(plin_blend(0.25) < 0.25);
        assert!(plin_blend(0.75) > 0.75);
        // Symmetry: a(n) + a(1-n) == 1
        for i in 0..=20 {
            let n = i as f32 / 20.0;
            assert_abs_diff_eq!(plin_blend(n) + plin_blend(1.0 - n), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_split_floor_semantics() {
        assert_eq!(split(0.0), (0, 0.0));
        assert_eq!(split(2.25), (2, 0.25));
        assert_eq!(split(-0.25), (-1, 0.75));
        assert_eq!(split(-1.0), (-1, 0.0));
    }

    #[test]
    fn test_pbcc_preserves_partition_of_unity() {
        for algorithm in ALGORITHMS {
            for i in 0..=10 {
                for j in 0..=10 {
                    let nx = i as f32 / 10.0;
                    let ny = j as f32 / 10.0;
                    let w = weights2(algorithm.weights(nx), algorithm.weights(ny));
                    let c = pbcc_correct(w, nx, ny);
                    assert_abs_diff_eq!(c.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
                    assert!(c.iter().all(|&v| v >= 0.0));
                }
            }
        }
    }

    #[test]
    fn test_pbcc_biases_toward_near_corner() {
        // Linear weights at (0.25, 0.25): the near corner gains, the far
        // corner loses.
        let w = weights2(Algorithm::Linear.weights(0.25), Algorithm::Linear.weights(0.25));
        let c = pbcc_correct(w, 0.25, 0.25);
        assert!(c[0] > w[0]);
        assert!(c[3] < w[3]);
        assert_abs_diff_eq!(c.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pbcc_identity_at_sample() {
        // Exactly on a sample the full weight sits on one corner with
        // proximity 1; correction is a no-op.
        let w = weights2(Algorithm::Linear.weights(0.0), Algorithm::Linear.weights(0.0));
        assert_eq!(pbcc_correct(w, 0.0, 0.0), w);
    }

    #[test]
    fn test_tar_identity_at_full_band() {
        // Band as wide as the sample spacing: no restriction.
        let tar = TransitionArea::new(2.0, 8, 8, 16, 16);
        for i in 0..=10 {
            let n = i as f32 / 10.0;
            let (nx, ny) = tar.remap(n, n);
            assert_abs_diff_eq!(nx, n, epsilon = 1e-6);
            assert_abs_diff_eq!(ny, n, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_tar_locks_and_rescales() {
        // Half-width band: lock below 0.25 and above 0.75, stretch the
        // middle across [0, 1].
        let tar = TransitionArea::new(1.0, 8, 8, 16, 16);
        assert_eq!(tar.remap(0.1, 0.9), (0.0, 1.0));
        assert_eq!(tar.remap(0.25, 0.75), (0.0, 1.0));
        let (nx, _) = tar.remap(0.5, 0.5);
        assert_abs_diff_eq!(nx, 0.5, epsilon = 1e-6);
        let (nx, _) = tar.remap(0.375, 0.375);
        assert_abs_diff_eq!(nx, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_tar_zero_width_is_nearest_step() {
        let tar = TransitionArea::new(0.0, 8, 8, 16, 16);
        assert_eq!(tar.remap(0.49, 0.51), (0.0, 1.0));
        assert_eq!(tar.remap(0.0, 0.999), (0.0, 1.0));
    }
}
