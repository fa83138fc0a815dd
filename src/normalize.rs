//! Order statistics and percentile-based contrast stretching.
//!
//! `norm255` maps the 4th/96th percentiles of a float plane onto 0/255. A
//! constant plane has a zero-width percentile range; the division then
//! produces NaN/±inf on purpose and `clip_to_u8` folds those into the valid
//! range (NaN → 0, +inf → 255).
use crate::error::{Error, Result};
use crate::image::{ColorImage, GrayImageU8, ImageF32, CHANNELS};
use log::debug;

/// Lower percentile mapped to 0.
pub const LOW_PERCENTILE: f32 = 4.0;
/// Upper percentile mapped to 255.
pub const HIGH_PERCENTILE: f32 = 96.0;

/// Percentile `q` (0..=100) with linear interpolation between closest ranks.
///
/// Returns `None` for an empty slice.
pub fn percentile(values: &[f32], q: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);
    Some(percentile_sorted(&sorted, q))
}

fn percentile_sorted(sorted: &[f32], q: f32) -> f32 {
    let rank = (q.clamp(0.0, 100.0) as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;
    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    (a + (b - a) * frac) as f32
}

/// Per-channel median over all pixels. Even counts average the two middle
/// values.
pub fn channel_medians(image: &ColorImage) -> [f32; CHANNELS] {
    let mut hist = [[0usize; 256]; CHANNELS];
    for px in image.pixels() {
        for (h, &v) in hist.iter_mut().zip(px) {
            h[v as usize] += 1;
        }
    }
    let n = image.width() * image.height();
    std::array::from_fn(|c| median_from_histogram(&hist[c], n))
}

fn median_from_histogram(hist: &[usize; 256], n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let nth = |k: usize| -> f32 {
        let mut seen = 0usize;
        for (v, &count) in hist.iter().enumerate() {
            seen += count;
            if seen > k {
                return v as f32;
            }
        }
        255.0
    };
    if n % 2 == 1 {
        nth(n / 2)
    } else {
        0.5 * (nth(n / 2 - 1) + nth(n / 2))
    }
}

/// Stretch `plane` so its 4th/96th percentiles land on 0/255.
///
/// Fails only for an empty plane. The output is not clipped.
pub fn norm255(mut plane: ImageF32) -> Result<ImageF32> {
    if plane.is_empty() {
        return Err(Error::invalid("cannot normalize an empty plane"));
    }
    let mut sorted = plane.data.clone();
    sorted.sort_unstable_by(f32::total_cmp);
    let v_min = percentile_sorted(&sorted, LOW_PERCENTILE);
    let v_max = percentile_sorted(&sorted, HIGH_PERCENTILE);
    if v_max == v_min {
        debug!("norm255: degenerate percentile range at {v_min}");
    }

    let range = v_max - v_min;
    for v in &mut plane.data {
        *v = (*v - v_min) / range * 255.0;
    }
    Ok(plane)
}

/// Clamp to [0, 255] and truncate to 8 bits.
pub fn clip_to_u8(plane: &ImageF32) -> GrayImageU8 {
    // `as u8` saturates and maps NaN to 0
    let data = plane.data.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect();
    GrayImageU8::from_raw_parts(plane.w, plane.h, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&v, 0.0), Some(1.0));
        assert_eq!(percentile(&v, 100.0), Some(5.0));
        assert_eq!(percentile(&v, 50.0), Some(3.0));
        assert_abs_diff_eq!(percentile(&v, 4.0).unwrap(), 1.16, epsilon = 1e-6);
        assert_abs_diff_eq!(percentile(&[4.0, 0.0, 10.0, 2.0], 96.0).unwrap(), 9.28, epsilon = 1e-5);
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn medians_match_odd_and_even_counts() {
        let odd = ColorImage::from_fn(3, 1, |x, _| [x as u8 * 10, 7, 255 - x as u8]);
        assert_eq!(channel_medians(&odd), [10.0, 7.0, 254.0]);
        let even = ColorImage::from_fn(2, 2, |x, y| [(x + 2 * y) as u8, 0, 9]);
        assert_eq!(channel_medians(&even), [1.5, 0.0, 9.0]);
    }

    #[test]
    fn stretches_percentile_range() {
        let data: Vec<f32> = (0..=100).map(|v| v as f32).collect();
        let plane = ImageF32::from_shape_vec(&[1, 101], data).unwrap();
        let out = norm255(plane).unwrap();
        assert_abs_diff_eq!(out.get(4, 0), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(out.get(96, 0), 255.0, epsilon = 1e-3);
        assert!(out.get(0, 0) < 0.0);
        assert!(out.get(100, 0) > 255.0);
    }

    #[test]
    fn constant_plane_is_degenerate_then_clipped_to_zero() {
        let plane = ImageF32::from_shape_vec(&[3, 3], vec![42.0; 9]).unwrap();
        let out = norm255(plane).unwrap();
        assert!(out.data.iter().all(|v| v.is_nan()));
        assert!(clip_to_u8(&out).as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn clip_saturates_and_truncates() {
        let plane =
            ImageF32::from_shape_vec(&[1, 5], vec![-3.0, 12.9, 300.0, f32::INFINITY, f32::NAN])
                .unwrap();
        assert_eq!(clip_to_u8(&plane).as_raw(), &[0, 12, 255, 255, 0]);
    }

    #[test]
    fn empty_plane_is_rejected() {
        assert!(norm255(ImageF32::new(0, 0)).is_err());
    }
}
