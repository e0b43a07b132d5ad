//! The resampler: configuration, coefficient cache and execution.
//!
//! A resample run is configured in three steps:
//!
//! 1. Build an [`Interp`]: where each target pixel samples the source
//!    ([`Interp::init_resize`] / [`Interp::init_transformation`]) and
//!    how the samples are blended ([`Interp::init_functions`]).
//! 2. Freeze it with [`Resampler::optimize`], which validates the
//!    configuration and takes an immutable execution plan (separable
//!    casts are baked to lookup tables, the transition restriction is
//!    derived from the dimensions).
//! 3. Run [`Resampler::resize`] as often as needed; optionally call
//!    [`Resampler::bake`] first to precompute the per-pixel coefficient
//!    taps so repeated resizes only accumulate.
//!
//! Per target pixel the plan performs, in order: inverse coordinate
//! mapping, positioning split, transition remap, kernel weights,
//! proximity correction, then the weighted 2x2 accumulation per
//! channel. The cached, uncached, serial and parallel paths all share
//! the same per-pixel code, so their outputs are byte-identical.

use crate::kernel::{pbcc_correct, split, weights2, Algorithm, PbccMode, TransitionArea};
use crate::{ResampleError, ResampleResult};
use plin_core::Image;
use plin_math::{Affine2, Cast1d, SourceMap};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Execution strategy for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Single-threaded row loop.
    #[default]
    Serial,
    /// Rayon-parallel rows. Falls back to serial when the `parallel`
    /// feature is disabled.
    Parallel,
}

/// Interpolation configuration: coordinate mapping plus kernel setup.
///
/// # Example
///
/// ```rust
/// use plin_ops::{Algorithm, Interp, PbccMode};
///
/// let mut interp = Interp::new();
/// interp.init_resize(16, 16, 32, 32);
/// interp.init_functions(Algorithm::PLin, PbccMode::Full, 2.0);
/// assert_eq!(interp.target_dims(), (32, 32));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interp {
    algorithm: Algorithm,
    pbcc: PbccMode,
    transition_reduction: f32,
    map: Option<SourceMap>,
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
}

impl Interp {
    /// Creates an unconfigured interpolation setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures a plain resize with centre-aligned casts on both
    /// axes.
    pub fn init_resize(&mut self, orig_w: u32, orig_h: u32, target_w: u32, target_h: u32) {
        self.init_resize_with(
            orig_w,
            orig_h,
            target_w,
            target_h,
            Cast1d::proper(orig_w, target_w),
            Cast1d::proper(orig_h, target_h),
        );
    }

    /// Configures a plain resize with caller-supplied per-axis casts.
    pub fn init_resize_with(
        &mut self,
        orig_w: u32,
        orig_h: u32,
        target_w: u32,
        target_h: u32,
        cast_x: Cast1d,
        cast_y: Cast1d,
    ) {
        self.src_w = orig_w;
        self.src_h = orig_h;
        self.dst_w = target_w;
        self.dst_h = target_h;
        self.map = Some(SourceMap::separable(cast_x, cast_y));
    }

    /// Configures an affine transformation resample from the
    /// target-to-source matrix.
    pub fn init_transformation(
        &mut self,
        orig_w: u32,
        orig_h: u32,
        target_w: u32,
        target_h: u32,
        inverse: Affine2,
    ) {
        self.init_transformation_with(orig_w, orig_h, target_w, target_h, SourceMap::affine(inverse));
    }

    /// Configures a resample with an arbitrary caller-supplied
    /// target-to-source mapping.
    pub fn init_transformation_with(
        &mut self,
        orig_w: u32,
        orig_h: u32,
        target_w: u32,
        target_h: u32,
        map: SourceMap,
    ) {
        self.src_w = orig_w;
        self.src_h = orig_h;
        self.dst_w = target_w;
        self.dst_h = target_h;
        self.map = Some(map);
    }

    /// Selects the kernel, the proximity correction mode and the
    /// transition width in target pixels (0 disables the restriction).
    pub fn init_functions(&mut self, algorithm: Algorithm, pbcc: PbccMode, transition_reduction: f32) {
        self.algorithm = algorithm;
        self.pbcc = pbcc;
        self.transition_reduction = transition_reduction;
    }

    /// Returns the configured source dimensions.
    #[inline]
    pub fn source_dims(&self) -> (u32, u32) {
        (self.src_w, self.src_h)
    }

    /// Returns the configured target dimensions.
    #[inline]
    pub fn target_dims(&self) -> (u32, u32) {
        (self.dst_w, self.dst_h)
    }

    /// Returns the configured target-to-source mapping, if any.
    #[inline]
    pub fn map(&self) -> Option<&SourceMap> {
        self.map.as_ref()
    }
}

/// One pre-clamped source sample with its weight.
#[derive(Debug, Clone, Copy)]
struct Tap {
    sx: u32,
    sy: u32,
    weight: f32,
}

/// Immutable execution plan taken at [`Resampler::optimize`] time.
#[derive(Debug, Clone)]
struct Plan {
    parallel: bool,
    algorithm: Algorithm,
    pbcc: bool,
    tar: Option<TransitionArea>,
    map: SourceMap,
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
}

impl Plan {
    /// Runs the per-pixel pipeline up to the weights: map, split,
    /// transition remap, kernel, proximity correction. Tap coordinates
    /// come out clamped into the source.
    #[inline]
    fn taps(&self, xt: u32, yt: u32) -> [Tap; 4] {
        let s = self.map.map(xt, yt);
        let (bx, nx) = split(s.x);
        let (by, ny) = split(s.y);
        let (nx, ny) = match &self.tar {
            Some(tar) => tar.remap(nx, ny),
            None => (nx, ny),
        };
        let w = weights2(self.algorithm.weights(nx), self.algorithm.weights(ny));
        let w = if self.pbcc { pbcc_correct(w, nx, ny) } else { w };

        let max_x = self.src_w as i32 - 1;
        let max_y = self.src_h as i32 - 1;
        let x0 = bx.clamp(0, max_x) as u32;
        let x1 = (bx + 1).clamp(0, max_x) as u32;
        let y0 = by.clamp(0, max_y) as u32;
        let y1 = (by + 1).clamp(0, max_y) as u32;
        [
            Tap { sx: x0, sy: y0, weight: w[0] },
            Tap { sx: x1, sy: y0, weight: w[1] },
            Tap { sx: x0, sy: y1, weight: w[2] },
            Tap { sx: x1, sy: y1, weight: w[3] },
        ]
    }
}

/// Renders one target row. `cache` holds four taps per target pixel
/// when a coefficient cache has been baked.
fn render_row(
    plan: &Plan,
    cache: Option<&[Tap]>,
    src: &[u8],
    channels: usize,
    yt: u32,
    row: &mut [u8],
) {
    let dst_w = plan.dst_w as usize;
    let src_w = plan.src_w as usize;
    for xt in 0..dst_w {
        let taps: [Tap; 4] = match cache {
            Some(entries) => {
                let at = (yt as usize * dst_w + xt) * 4;
                [entries[at], entries[at + 1], entries[at + 2], entries[at + 3]]
            }
            None => plan.taps(xt as u32, yt),
        };
        let out = &mut row[xt * channels..(xt + 1) * channels];
        for (c, sample) in out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for tap in &taps {
                let idx = (tap.sy as usize * src_w + tap.sx as usize) * channels + c;
                acc += src[idx] as f32 * tap.weight;
            }
            // Weights partition unity so acc sits in [0, 255] up to
            // rounding; conversion truncates like the byte cast it
            // mirrors.
            *sample = acc.clamp(0.0, 255.0) as u8;
        }
    }
}

/// Drives a configured [`Interp`] over source and target images.
///
/// State machine: an unconfigured resampler rejects everything with
/// [`ResampleError::NotReady`]; [`Self::optimize`] makes it ready;
/// [`Self::bake`] additionally precomputes the coefficient cache;
/// [`Self::invalidate`] drops both. Reconfiguring through
/// [`Self::interp_mut`] also invalidates, so a stale plan or cache can
/// never be executed.
///
/// # Example
///
/// ```rust
/// use plin_core::Image;
/// use plin_ops::{Algorithm, Execution, Interp, PbccMode, Resampler};
///
/// let src = Image::filled(4, 4, 1, 200);
/// let mut dst = Image::new(8, 8, 1);
///
/// let mut interp = Interp::new();
/// interp.init_resize(4, 4, 8, 8);
/// interp.init_functions(Algorithm::Linear, PbccMode::None, 0.0);
///
/// let mut resampler = Resampler::new(interp);
/// resampler.optimize(Execution::Serial).unwrap();
/// resampler.resize(&src, &mut dst).unwrap();
/// assert_eq!(dst.get(3, 3, 0), 200);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    interp: Interp,
    plan: Option<Plan>,
    cache: Option<Vec<Tap>>,
}

impl Resampler {
    /// Creates a resampler around an interpolation setup.
    pub fn new(interp: Interp) -> Self {
        Self {
            interp,
            plan: None,
            cache: None,
        }
    }

    /// Returns the interpolation setup.
    #[inline]
    pub fn interp(&self) -> &Interp {
        &self.interp
    }

    /// Returns the interpolation setup for reconfiguration.
    ///
    /// Any change may alter the per-pixel coefficients, so the current
    /// plan and cache are dropped; call [`Self::optimize`] (and
    /// [`Self::bake`] if wanted) again afterwards.
    pub fn interp_mut(&mut self) -> &mut Interp {
        self.invalidate();
        &mut self.interp
    }

    /// Returns `true` once [`Self::optimize`] has succeeded.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.plan.is_some()
    }

    /// Returns `true` while a baked coefficient cache is held.
    #[inline]
    pub fn is_baked(&self) -> bool {
        self.cache.is_some()
    }

    /// Validates the configuration and freezes the execution plan.
    ///
    /// Any previously baked cache is dropped; the configuration backing
    /// it may have changed.
    ///
    /// # Errors
    ///
    /// [`ResampleError::NotReady`] when the mapping has not been
    /// initialised or a dimension is zero.
    pub fn optimize(&mut self, execution: Execution) -> ResampleResult<()> {
        let map = self
            .interp
            .map()
            .ok_or_else(|| ResampleError::NotReady("interpolation mapping is not initialised".into()))?;
        let (src_w, src_h) = self.interp.source_dims();
        let (dst_w, dst_h) = self.interp.target_dims();
        if src_w == 0 || src_h == 0 {
            return Err(ResampleError::NotReady("source dimensions are zero".into()));
        }
        if dst_w == 0 || dst_h == 0 {
            return Err(ResampleError::NotReady("target dimensions are zero".into()));
        }
        if let SourceMap::Affine { inverse, .. } = map {
            if inverse.determinant().abs() < 1e-12 {
                return Err(ResampleError::NotReady(
                    "target-to-source matrix is degenerate".into(),
                ));
            }
        }

        let tau = self.interp.transition_reduction;
        let tar =
            (tau > 0.0).then(|| TransitionArea::new(tau, src_w, src_h, dst_w, dst_h));

        let plan = Plan {
            parallel: execution == Execution::Parallel,
            algorithm: self.interp.algorithm,
            pbcc: self.interp.pbcc == PbccMode::Full,
            tar,
            map: map.buffered(dst_w, dst_h),
            src_w,
            src_h,
            dst_w,
            dst_h,
        };
        debug!(
            src_w,
            src_h,
            dst_w,
            dst_h,
            parallel = plan.parallel,
            "Resampling plan frozen"
        );
        self.cache = None;
        self.plan = Some(plan);
        Ok(())
    }

    /// Precomputes the coefficient cache: four source taps per target
    /// pixel, ready for accumulation-only resizes.
    ///
    /// # Errors
    ///
    /// [`ResampleError::NotReady`] when [`Self::optimize`] has not run.
    pub fn bake(&mut self) -> ResampleResult<()> {
        let plan = self
            .plan
            .as_ref()
            .ok_or_else(|| ResampleError::NotReady("optimize() must run before bake()".into()))?;
        let mut taps = Vec::with_capacity(plan.dst_w as usize * plan.dst_h as usize * 4);
        for yt in 0..plan.dst_h {
            for xt in 0..plan.dst_w {
                taps.extend_from_slice(&plan.taps(xt, yt));
            }
        }
        debug!(entries = taps.len(), "Coefficient cache baked");
        self.cache = Some(taps);
        Ok(())
    }

    /// Resamples `src` into `dst` according to the frozen plan.
    ///
    /// The call is idempotent and leaves `dst` untouched on any error.
    ///
    /// # Errors
    ///
    /// - [`ResampleError::NotReady`] before [`Self::optimize`] or for
    ///   channel-less images
    /// - [`ResampleError::DimensionMismatch`] when an image does not
    ///   match the configured dimensions
    /// - [`ResampleError::ChannelMismatch`] when source and target
    ///   channel counts differ
    pub fn resize(&self, src: &Image, dst: &mut Image) -> ResampleResult<()> {
        let plan = self
            .plan
            .as_ref()
            .ok_or_else(|| ResampleError::NotReady("optimize() has not been called".into()))?;
        if src.dimensions() != (plan.src_w, plan.src_h) {
            return Err(ResampleError::DimensionMismatch {
                what: "source image",
                expected_w: plan.src_w,
                expected_h: plan.src_h,
                actual_w: src.width(),
                actual_h: src.height(),
            });
        }
        if dst.dimensions() != (plan.dst_w, plan.dst_h) {
            return Err(ResampleError::DimensionMismatch {
                what: "target image",
                expected_w: plan.dst_w,
                expected_h: plan.dst_h,
                actual_w: dst.width(),
                actual_h: dst.height(),
            });
        }
        if src.channels() != dst.channels() {
            return Err(ResampleError::ChannelMismatch {
                source_channels: src.channels(),
                target: dst.channels(),
            });
        }
        if src.channels() == 0 {
            return Err(ResampleError::NotReady(
                "images must have at least one channel".into(),
            ));
        }

        let channels = src.channels() as usize;
        let row_len = plan.dst_w as usize * channels;
        let cache = self.cache.as_deref();
        let src_data = src.data();

        #[cfg(feature = "parallel")]
        if plan.parallel {
            dst.data_mut()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(yt, row)| {
                    render_row(plan, cache, src_data, channels, yt as u32, row);
                });
            debug!(parallel = true, "Resize complete");
            return Ok(());
        }

        for (yt, row) in dst.data_mut().chunks_mut(row_len).enumerate() {
            render_row(plan, cache, src_data, channels, yt as u32, row);
        }
        debug!(parallel = false, "Resize complete");
        Ok(())
    }

    /// Drops the plan and cache, returning the resampler to its
    /// unconfigured state.
    pub fn invalidate(&mut self) {
        self.plan = None;
        self.cache = None;
    }
}

/// One-shot resample: freezes a plan for `interp` and produces the
/// target image in a single call.
///
/// # Example
///
/// ```rust
/// use plin_core::Image;
/// use plin_ops::{resample, Algorithm, Execution, Interp, PbccMode};
///
/// let src = Image::from_data(4, 1, 1, vec![0, 64, 192, 255]).unwrap();
/// let mut interp = Interp::new();
/// interp.init_resize(4, 1, 8, 1);
/// interp.init_functions(Algorithm::Nearest, PbccMode::None, 0.0);
///
/// let dst = resample(&src, interp, Execution::Serial).unwrap();
/// assert_eq!(dst.data(), &[0, 0, 64, 64, 192, 192, 255, 255]);
/// ```
pub fn resample(src: &Image, interp: Interp, execution: Execution) -> ResampleResult<Image> {
    let (dst_w, dst_h) = interp.target_dims();
    let mut resampler = Resampler::new(interp);
    resampler.optimize(execution)?;
    let mut dst = Image::new(dst_w, dst_h, src.channels());
    resampler.resize(src, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u32) -> Image {
        let mut data = Vec::with_capacity((width * height * channels) as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push((x * 31 + y * 7 + c * 13) as u8);
                }
            }
        }
        Image::from_data(width, height, channels, data).unwrap()
    }

    fn interp_for(
        src: (u32, u32),
        dst: (u32, u32),
        algorithm: Algorithm,
        pbcc: PbccMode,
        tau: f32,
    ) -> Interp {
        let mut interp = Interp::new();
        interp.init_resize(src.0, src.1, dst.0, dst.1);
        interp.init_functions(algorithm, pbcc, tau);
        interp
    }

    #[test]
    fn test_resize_before_optimize_is_not_ready() {
        let resampler = Resampler::new(interp_for((4, 4), (8, 8), Algorithm::Linear, PbccMode::None, 0.0));
        let src = gradient(4, 4, 1);
        let mut dst = Image::new(8, 8, 1);
        assert!(matches!(
            resampler.resize(&src, &mut dst),
            Err(ResampleError::NotReady(_))
        ));
        // Target untouched
        assert!(dst.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_optimize_without_mapping_fails() {
        let mut resampler = Resampler::new(Interp::new());
        assert!(matches!(
            resampler.optimize(Execution::Serial),
            Err(ResampleError::NotReady(_))
        ));
    }

    #[test]
    fn test_degenerate_matrix_is_rejected() {
        let mut interp = Interp::new();
        interp.init_transformation(4, 4, 4, 4, Affine2::new(1.0, 0.0, 1.0, 0.0, 0.0, 0.0));
        interp.init_functions(Algorithm::Linear, PbccMode::None, 0.0);
        let mut resampler = Resampler::new(interp);
        assert!(matches!(
            resampler.optimize(Execution::Serial),
            Err(ResampleError::NotReady(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let mut resampler =
            Resampler::new(interp_for((4, 4), (8, 8), Algorithm::Linear, PbccMode::None, 0.0));
        resampler.optimize(Execution::Serial).unwrap();
        let src = gradient(5, 4, 1);
        let mut dst = Image::new(8, 8, 1);
        assert!(matches!(
            resampler.resize(&src, &mut dst),
            Err(ResampleError::DimensionMismatch { what: "source image", .. })
        ));
    }

    #[test]
    fn test_channel_mismatch_is_reported() {
        let mut resampler =
            Resampler::new(interp_for((4, 4), (8, 8), Algorithm::Linear, PbccMode::None, 0.0));
        resampler.optimize(Execution::Serial).unwrap();
        let src = gradient(4, 4, 3);
        let mut dst = Image::new(8, 8, 1);
        assert!(matches!(
            resampler.resize(&src, &mut dst),
            Err(ResampleError::ChannelMismatch { source_channels: 3, target: 1 })
        ));
    }

    #[test]
    fn test_identity_resize_is_exact() {
        for algorithm in [Algorithm::Nearest, Algorithm::Linear, Algorithm::PLin] {
            let src = gradient(9, 7, 3);
            let dst = resample(
                &src,
                interp_for((9, 7), (9, 7), algorithm, PbccMode::None, 0.0),
                Execution::Serial,
            )
            .unwrap();
            assert_eq!(dst.data(), src.data(), "{algorithm:?}");
        }
    }

    #[test]
    fn test_nearest_integer_upscale_replicates_blocks() {
        let src = gradient(3, 2, 1);
        let dst = resample(
            &src,
            interp_for((3, 2), (9, 6), Algorithm::Nearest, PbccMode::None, 0.0),
            Execution::Serial,
        )
        .unwrap();
        for y in 0..6 {
            for x in 0..9 {
                assert_eq!(dst.get(x, y, 0), src.get(x / 3, y / 3, 0));
            }
        }
    }

    #[test]
    fn test_cache_equivalence() {
        let src = gradient(7, 5, 3);
        let interp = interp_for((7, 5), (13, 11), Algorithm::PLin, PbccMode::Full, 1.5);

        let mut direct = Resampler::new(interp.clone());
        direct.optimize(Execution::Serial).unwrap();
        let mut out_direct = Image::new(13, 11, 3);
        direct.resize(&src, &mut out_direct).unwrap();

        let mut baked = Resampler::new(interp);
        baked.optimize(Execution::Serial).unwrap();
        baked.bake().unwrap();
        assert!(baked.is_baked());
        let mut out_baked = Image::new(13, 11, 3);
        baked.resize(&src, &mut out_baked).unwrap();

        assert_eq!(out_direct.data(), out_baked.data());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let src = gradient(11, 9, 3);
        let interp = interp_for((11, 9), (17, 13), Algorithm::PLin, PbccMode::Full, 2.0);
        let serial = resample(&src, interp.clone(), Execution::Serial).unwrap();
        let parallel = resample(&src, interp, Execution::Parallel).unwrap();
        assert_eq!(serial.data(), parallel.data());
    }

    #[test]
    fn test_invalidate_resets_state() {
        let mut resampler =
            Resampler::new(interp_for((4, 4), (8, 8), Algorithm::Linear, PbccMode::None, 0.0));
        resampler.optimize(Execution::Serial).unwrap();
        resampler.bake().unwrap();
        assert!(resampler.is_ready() && resampler.is_baked());

        resampler.invalidate();
        assert!(!resampler.is_ready() && !resampler.is_baked());

        // Reconfiguring through interp_mut also invalidates.
        resampler.optimize(Execution::Serial).unwrap();
        resampler.interp_mut().init_resize(4, 4, 16, 16);
        assert!(!resampler.is_ready());
    }

    #[test]
    fn test_optimize_drops_stale_cache() {
        let mut resampler =
            Resampler::new(interp_for((4, 4), (8, 8), Algorithm::Linear, PbccMode::None, 0.0));
        resampler.optimize(Execution::Serial).unwrap();
        resampler.bake().unwrap();
        resampler.optimize(Execution::Parallel).unwrap();
        assert!(!resampler.is_baked());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let src = gradient(6, 6, 1);
        let mut resampler =
            Resampler::new(interp_for((6, 6), (9, 9), Algorithm::PLin, PbccMode::None, 0.0));
        resampler.optimize(Execution::Serial).unwrap();

        let mut first = Image::new(9, 9, 1);
        resampler.resize(&src, &mut first).unwrap();
        let mut second = Image::new(9, 9, 1);
        resampler.resize(&src, &mut second).unwrap();
        assert_eq!(first.data(), second.data());
    }
}
