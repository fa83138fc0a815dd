//! Canny with thresholds centred on a reference intensity.
//!
//! Given a centre value `c` (typically the channel median), the low/high
//! thresholds are placed at `(1 − σ)·c` and `(1 + σ)·c` with σ = 0.4, which
//! keeps the detector's sensitivity proportional to the image's own
//! brightness instead of a fixed absolute level.
use crate::edges::canny::canny;
use crate::error::{Error, Result};
use crate::image::{ColorImage, EdgeVolume, ImageF32, ImageU8, CHANNELS};

/// Relative spread of the thresholds around the centre value.
pub const SIGMA: f32 = 0.4;

/// `(lower, upper)` thresholds around `center`, floored and clamped to 0..=255.
pub fn centered_thresholds(center: f32) -> (u8, u8) {
    let lower = ((1.0 - SIGMA) * center).floor().clamp(0.0, 255.0);
    let upper = ((1.0 + SIGMA) * center).floor().clamp(0.0, 255.0);
    (lower as u8, upper as u8)
}

/// Edge map of one plane with values in {0.0, 1.0}.
pub fn centered_canny(plane: &ImageU8<'_>, center: f32) -> ImageF32 {
    let (lower, upper) = centered_thresholds(center);
    let mask = canny(plane, lower as f32, upper as f32);
    let mut out = ImageF32::new(plane.w, plane.h);
    for (dst, &m) in out.data.iter_mut().zip(mask.as_raw()) {
        *dst = m as f32 / 255.0;
    }
    out
}

/// Per-channel centred Canny stacked into an edge volume.
///
/// `centers` must hold one value per channel.
pub fn centered_canny_color(image: &ColorImage, centers: &[f32]) -> Result<EdgeVolume> {
    if centers.len() != CHANNELS {
        return Err(Error::invalid(format!(
            "expected {CHANNELS} channel centers, got {}",
            centers.len()
        )));
    }
    let planes: [ImageF32; CHANNELS] = std::array::from_fn(|c| {
        let channel = image.channel(c);
        centered_canny(&channel.as_view(), centers[c])
    });
    EdgeVolume::from_planes(planes)
}
