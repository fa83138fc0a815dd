//! Canny edge detector on 8-bit planes.
//!
//! Sobel gradients (replicate border) → direction-aligned non‑maximum
//! suppression with double thresholds → 8-connected hysteresis. No
//! smoothing is applied beforehand; callers blur or resample as they see fit.
//! Thresholds live on the raw Sobel magnitude scale (0..2040 for L1).
use crate::edges::grad::{sobel_gradients, GradientNorm};
use crate::edges::hysteresis::track_edges;
use crate::edges::nms::run_nms;
use crate::image::{GrayImageU8, ImageU8};

/// Thresholds and gradient norm for a Canny run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CannyParams {
    pub low: f32,
    pub high: f32,
    pub norm: GradientNorm,
}

impl CannyParams {
    pub fn new(low: f32, high: f32) -> Self {
        Self {
            low,
            high,
            norm: GradientNorm::L1,
        }
    }
}

/// Binary edge mask (`0` / `255`) with L1 gradient magnitude.
pub fn canny(plane: &ImageU8<'_>, low: f32, high: f32) -> GrayImageU8 {
    canny_with(plane, &CannyParams::new(low, high))
}

/// Binary edge mask with explicit parameters. Swapped thresholds are
/// reordered.
pub fn canny_with(plane: &ImageU8<'_>, params: &CannyParams) -> GrayImageU8 {
    let (low, high) = if params.low > params.high {
        (params.high, params.low)
    } else {
        (params.low, params.high)
    };
    let grad = sobel_gradients(plane, params.norm);
    let classes = run_nms(&grad, low, high);
    track_edges(&classes, plane.w, plane.h)
}
