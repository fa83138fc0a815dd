//! Contrast-preserving decolorization (Lu, Xu & Jia, 2012).
//!
//! Produces two images from an RGB input:
//!
//! - `density`: an 8-bit grayscale whose local contrast follows the Lab color
//!   contrast of the input, including edges that exist only in chroma.
//! - `boost`: the input with its Lab lightness replaced by `density`, i.e. a
//!   recolored reconstruction. Where the grayscale had to give up chromatic
//!   structure, `boost` drifts away from the input.
//!
//! Weight fitting runs on a copy shrunk so that `width + height` stays near
//! `working_side_sum`; the fitted polynomial is then evaluated on the
//! full-resolution image.

pub mod lab;
mod solver;

use crate::diagnostics::DecolorStage;
use crate::filters::resample::resize_linear_f32;
use crate::image::{ColorImage, GrayImageU8, ImageF32, CHANNELS};
use lab::{lab_to_srgb, srgb_to_lab};
use log::debug;
use serde::Deserialize;
use solver::{eval_monomial, monomials, RgbF32};

/// Numeric parameters of the decolorization solver.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecolorOptions {
    /// Width of the contrast likelihood.
    pub sigma: f64,
    /// Iteration cap; the solver stops after `max_iterations + 1` updates.
    pub max_iterations: usize,
    /// Convergence threshold on the energy change.
    pub tolerance: f64,
    /// Inputs with `width + height` above this are shrunk for fitting.
    pub max_side_sum: usize,
    /// Target `width + height` of the shrunk copy.
    pub working_side_sum: usize,
}

impl Default for DecolorOptions {
    fn default() -> Self {
        Self {
            sigma: 0.02,
            max_iterations: 15,
            tolerance: 1e-4,
            max_side_sum: 800,
            working_side_sum: 400,
        }
    }
}

/// Output of `decolorize`.
#[derive(Clone, Debug)]
pub struct Decolorized {
    pub density: GrayImageU8,
    pub boost: ColorImage,
    pub stage: DecolorStage,
}

/// Decolorize with default options.
pub fn decolorize(image: &ColorImage) -> Decolorized {
    decolorize_with(image, &DecolorOptions::default())
}

pub fn decolorize_with(image: &ColorImage, options: &DecolorOptions) -> Decolorized {
    let full = to_unit_float(image);
    let work = working_copy(&full, options);
    let basis = monomials();

    let solution = solver::solve(&work, &basis, options);
    debug!(
        "decolorize: {}x{} (fit at {}x{}) iterations={} energy={:.6}",
        full.w, full.h, work.w, work.h, solution.iterations, solution.energy
    );

    let density = gray_from_weights(&full, &basis, &solution.weights);
    let boost = recolor(image, &density);

    Decolorized {
        density,
        boost,
        stage: DecolorStage {
            iterations: solution.iterations,
            energy: solution.energy,
            weights: solution.weights,
            working_width: work.w,
            working_height: work.h,
        },
    }
}

fn to_unit_float(image: &ColorImage) -> RgbF32 {
    RgbF32 {
        w: image.width(),
        h: image.height(),
        data: image.as_raw().iter().map(|&v| v as f32 / 255.0).collect(),
    }
}

fn working_copy(full: &RgbF32, options: &DecolorOptions) -> RgbF32 {
    let side_sum = full.w + full.h;
    if side_sum <= options.max_side_sum {
        return full.clone();
    }
    let factor = options.working_side_sum as f64 / side_sum as f64;
    let w = ((full.w as f64 * factor).round() as usize).max(1);
    let h = ((full.h as f64 * factor).round() as usize).max(1);
    RgbF32 {
        w,
        h,
        data: resize_linear_f32(&full.data, full.w, full.h, CHANNELS, w, h),
    }
}

/// Evaluate the fitted polynomial, stretch to [0, 1] and quantize.
fn gray_from_weights(img: &RgbF32, basis: &[[u32; 3]], weights: &[f64]) -> GrayImageU8 {
    let mut gray = ImageF32::new(img.w, img.h);
    for (dst, px) in gray.data.iter_mut().zip(img.pixels()) {
        *dst = basis
            .iter()
            .zip(weights)
            .map(|(&e, &w)| w as f32 * eval_monomial(px, e))
            .sum();
    }

    let data = match gray.min_max() {
        Some((min, max)) if max > min && (max - min).is_finite() => gray
            .data
            .iter()
            .map(|&v| ((v - min) / (max - min) * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect(),
        _ => vec![0; gray.data.len()],
    };
    GrayImageU8::from_raw_parts(img.w, img.h, data)
}

/// Replace the Lab lightness of `image` with `density`.
fn recolor(image: &ColorImage, density: &GrayImageU8) -> ColorImage {
    let mut data = Vec::with_capacity(image.as_raw().len());
    for (px, &d) in image.pixels().zip(density.as_raw()) {
        let mut lab = srgb_to_lab([px[0], px[1], px[2]].map(|v| v as f32 / 255.0));
        lab[0] = d as f32 * 100.0 / 255.0;
        let rgb = lab_to_srgb(lab);
        data.extend(rgb.map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8));
    }
    ColorImage::from_raw_parts(image.width(), image.height(), data)
}
