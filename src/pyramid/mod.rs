//! Multi-resolution Canny compositing.
//!
//! Canny with a fixed absolute threshold responds differently depending on
//! how wide an edge is in pixels, so structures show up at some resolutions
//! and vanish at others. The compositor runs the centred color extractor on
//! the input area-downscaled to each factor in `SCALE_FACTORS` and folds the
//! responses coarse-to-fine:
//!
//! ```text
//! acc_0 = E(k_0)
//! acc_i = resize_linear(acc_{i-1}, size(k_i)) * 0.75 + E(k_i) * 0.25
//! ```
//!
//! Every scale's contribution persists but decays geometrically as finer
//! scales are layered on top. The fold is order dependent: the accumulator
//! always ends at the size of the last scale in the list.
//!
//! Channel medians are computed once on the full-resolution input and reused
//! as the threshold centres at every scale.

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{PyramidLevelReport, PyramidStage};
use crate::edges::centered_canny_color;
use crate::error::{Error, Result};
use crate::filters::{resize_color, Interpolation};
use crate::image::{ColorImage, EdgeVolume, CHANNELS};
use crate::normalize::channel_medians;
use log::debug;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resolution factors, coarse to fine.
pub const SCALE_FACTORS: [f32; 9] = [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
/// Weight kept by the (upsampled) accumulator at each blend.
pub const ACCUMULATOR_WEIGHT: f32 = 0.75;
/// Weight given to the edge volume of the newly added scale.
pub const LEVEL_WEIGHT: f32 = 0.25;

/// Size of the level at `scale`: `(round(W·k), round(H·k))`, at least 1×1.
pub fn level_dimensions(width: usize, height: usize, scale: f32) -> (usize, usize) {
    let dim = |n: usize| ((n as f64 * scale as f64).round() as usize).max(1);
    (dim(width), dim(height))
}

/// Composite edge volume over `SCALE_FACTORS`, at full input resolution.
pub fn pyramid_canny_color(image: &ColorImage) -> Result<EdgeVolume> {
    composite_edges(image, &SCALE_FACTORS)
}

/// Composite edge volume over an explicit scale list, folded in list order.
///
/// Fails with `InvalidInput` for an empty image, an empty list or a
/// non-positive/non-finite factor.
pub fn composite_edges(image: &ColorImage, scales: &[f32]) -> Result<EdgeVolume> {
    composite_edges_traced(image, scales).map(|(volume, _)| volume)
}

struct Level {
    scale: f32,
    edges: EdgeVolume,
    elapsed_ms: f64,
}

pub(crate) fn composite_edges_traced(
    image: &ColorImage,
    scales: &[f32],
) -> Result<(EdgeVolume, PyramidStage)> {
    if image.is_empty() {
        return Err(Error::invalid("cannot build an edge pyramid of an empty image"));
    }
    if scales.is_empty() {
        return Err(Error::invalid("edge pyramid needs at least one scale"));
    }
    if let Some(bad) = scales.iter().find(|k| !k.is_finite() || **k <= 0.0) {
        return Err(Error::invalid(format!("invalid pyramid scale factor {bad}")));
    }

    let centers = channel_medians(image);
    debug!("edge pyramid: {}x{} centers={centers:?}", image.width(), image.height());

    let levels = compute_levels(image, &centers, scales)?;

    let reports = levels
        .iter()
        .enumerate()
        .map(|(level_index, level)| PyramidLevelReport {
            level_index,
            scale: level.scale,
            width: level.edges.width(),
            height: level.edges.height(),
            edge_fraction: level.edges.coverage(),
            elapsed_ms: level.elapsed_ms,
        })
        .collect();

    let mut levels = levels.into_iter();
    let first = match levels.next() {
        Some(level) => level.edges,
        None => return Err(Error::invalid("edge pyramid produced no levels")),
    };
    let acc = levels.try_fold(first, |acc, level| {
        let (w, h) = (level.edges.width(), level.edges.height());
        acc.resize_linear(w, h)
            .blend(&level.edges, ACCUMULATOR_WEIGHT, LEVEL_WEIGHT)
    })?;

    Ok((
        acc,
        PyramidStage {
            centers,
            levels: reports,
        },
    ))
}

fn level_edges(image: &ColorImage, centers: &[f32; CHANNELS], scale: f32) -> Result<Level> {
    let start = Instant::now();
    let (w, h) = level_dimensions(image.width(), image.height(), scale);
    let small = resize_color(image, w, h, Interpolation::Area);
    let edges = centered_canny_color(&small, centers)?;
    debug!(
        "edge pyramid: scale {scale} -> {w}x{h}, coverage {:.4}",
        edges.coverage()
    );
    Ok(Level {
        scale,
        edges,
        elapsed_ms: elapsed_ms(start),
    })
}

// Per-scale extraction is independent; only the blend fold is sequential.
fn compute_levels(
    image: &ColorImage,
    centers: &[f32; CHANNELS],
    scales: &[f32],
) -> Result<Vec<Level>> {
    #[cfg(feature = "parallel")]
    {
        scales
            .par_iter()
            .map(|&k| level_edges(image, centers, k))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        scales
            .iter()
            .map(|&k| level_edges(image, centers, k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed_square(size: usize) -> ColorImage {
        let lo = size / 3;
        let hi = 2 * size / 3;
        ColorImage::from_fn(size, size, |x, y| {
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                [230, 200, 180]
            } else {
                [20, 30, 40]
            }
        })
    }

    #[test]
    fn level_dimensions_round_and_floor_at_one() {
        assert_eq!(level_dimensions(64, 64, 0.2), (13, 13));
        assert_eq!(level_dimensions(64, 48, 0.7), (45, 34));
        assert_eq!(level_dimensions(3, 2, 0.2), (1, 1));
        assert_eq!(level_dimensions(100, 80, 1.0), (100, 80));
    }

    #[test]
    fn output_matches_input_resolution() {
        let img = framed_square(50);
        let vol = pyramid_canny_color(&img).unwrap();
        assert_eq!((vol.width(), vol.height()), (50, 50));
        assert!(vol.as_slice().iter().all(|&v| (0.0..=1.0 + 1e-5).contains(&v)));
        assert!(vol.coverage() > 0.0);
    }

    #[test]
    fn single_scale_equals_centered_extractor() {
        let img = framed_square(30);
        let centers = channel_medians(&img);
        let expected = centered_canny_color(&img, &centers).unwrap();
        assert_eq!(composite_edges(&img, &[1.0]).unwrap(), expected);
    }

    #[test]
    fn traced_run_reports_every_scale() {
        let img = framed_square(40);
        let (_, stage) = composite_edges_traced(&img, &SCALE_FACTORS).unwrap();
        assert_eq!(stage.levels.len(), SCALE_FACTORS.len());
        assert_eq!((stage.levels[0].width, stage.levels[0].height), (8, 8));
        assert_eq!(stage.levels[8].width, 40);
    }

    #[test]
    fn rejects_bad_scale_lists() {
        let img = framed_square(20);
        assert!(composite_edges(&img, &[]).is_err());
        assert!(composite_edges(&img, &[0.5, 0.0]).is_err());
        assert!(composite_edges(&img, &[f32::NAN]).is_err());
        assert!(composite_edges(&ColorImage::new(0, 0), &SCALE_FACTORS).is_err());
    }
}
