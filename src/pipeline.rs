//! Public entry points: the Canny-pyramid edge map and the CPDS map.
//!
//! Both stages end the same way: a float plane is stretched with
//! [`norm255`] and clipped to 8 bits, so the returned map always has the
//! input's dimensions.

use crate::decolor::decolorize;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{CannyPyramidReport, CpdsReport, InputDescriptor, TimingBreakdown};
use crate::error::{Error, Result};
use crate::filters::gaussian_blur;
use crate::image::{ColorImage, GrayImageU8, ImageF32};
use crate::normalize::{clip_to_u8, norm255};
use crate::pyramid::{composite_edges_traced, SCALE_FACTORS};
use log::debug;
use std::time::Instant;

/// Pre-blur applied before decolorization in `cpds`.
pub const CPDS_BLUR_SIGMA: f32 = 0.8;

/// Multi-resolution Canny edge map of `image`.
pub fn canny_pyramid(image: &ColorImage) -> Result<GrayImageU8> {
    canny_pyramid_with_report(image).map(|(map, _)| map)
}

/// Color-probability-density surface of `image`.
pub fn cpds(image: &ColorImage) -> Result<GrayImageU8> {
    cpds_with_report(image).map(|(map, _)| map)
}

/// `canny_pyramid` plus per-stage timings and per-scale statistics.
pub fn canny_pyramid_with_report(image: &ColorImage) -> Result<(GrayImageU8, CannyPyramidReport)> {
    let start = Instant::now();
    ensure_not_empty(image, "canny_pyramid")?;
    let mut timings = TimingBreakdown::default();

    let (volume, pyramid) =
        timings.time("pyramid", || composite_edges_traced(image, &SCALE_FACTORS))?;
    let map = timings.time("normalize", || {
        norm255(volume.sum_channels()).map(|plane| clip_to_u8(&plane))
    })?;

    timings.total_ms = elapsed_ms(start);
    debug!(
        "canny_pyramid: {}x{} in {:.2} ms",
        image.width(),
        image.height(),
        timings.total_ms
    );
    let report = CannyPyramidReport {
        input: describe(image),
        timings,
        pyramid,
    };
    Ok((map, report))
}

/// `cpds` plus per-stage timings and the decolorization summary.
pub fn cpds_with_report(image: &ColorImage) -> Result<(GrayImageU8, CpdsReport)> {
    let start = Instant::now();
    ensure_not_empty(image, "cpds")?;
    let mut timings = TimingBreakdown::default();

    let blurred = timings.time("blur", || gaussian_blur(image, CPDS_BLUR_SIGMA));
    let decolorized = timings.time("decolor", || decolorize(&blurred));

    let (surface, offset_max) = timings.time("residual", || {
        let mut surface = ImageF32::new(image.width(), image.height());
        let mut offset_max = 0.0f32;
        let residuals = blurred.pixels().zip(decolorized.boost.pixels());
        for ((out, (a, b)), &d) in surface
            .data
            .iter_mut()
            .zip(residuals)
            .zip(decolorized.density.as_raw())
        {
            let offset = a
                .iter()
                .zip(b)
                .map(|(&p, &q)| {
                    let diff = p as f32 - q as f32;
                    diff * diff
                })
                .sum::<f32>()
                .sqrt();
            offset_max = offset_max.max(offset);
            *out = d as f32 + offset;
        }
        (surface, offset_max)
    });
    let map = timings.time("normalize", || norm255(surface).map(|plane| clip_to_u8(&plane)))?;

    timings.total_ms = elapsed_ms(start);
    debug!(
        "cpds: {}x{} offset_max={offset_max:.2} in {:.2} ms",
        image.width(),
        image.height(),
        timings.total_ms
    );
    let report = CpdsReport {
        input: describe(image),
        timings,
        decolor: decolorized.stage,
        offset_max,
    };
    Ok((map, report))
}

fn ensure_not_empty(image: &ColorImage, stage: &str) -> Result<()> {
    if image.is_empty() {
        return Err(Error::invalid(format!("{stage}: input image is empty")));
    }
    Ok(())
}

fn describe(image: &ColorImage) -> InputDescriptor {
    InputDescriptor {
        width: image.width(),
        height: image.height(),
    }
}
