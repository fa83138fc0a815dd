//! Separable Gaussian blur with a sigma-driven kernel size.
//!
//! The kernel size is derived from sigma the way 8-bit blurs usually do it:
//! `round(6σ + 1)` forced odd, i.e. the kernel spans ±3σ. Borders reflect
//! without repeating the edge sample (`dcb|abcd|cba`).
use crate::image::{ColorImage, CHANNELS};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Normalised sampled Gaussian.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    taps: Vec<f32>,
}

impl GaussianFilter {
    /// Kernel for `sigma` with the size picked automatically.
    pub fn from_sigma(sigma: f32) -> Self {
        Self::with_size(auto_kernel_size(sigma), sigma)
    }

    /// Kernel of `size` taps (forced odd, at least 1).
    pub fn with_size(size: usize, sigma: f32) -> Self {
        let size = size.max(1) | 1;
        let radius = (size / 2) as f32;
        let scale = -0.5 / (sigma * sigma).max(f32::EPSILON);
        let mut taps: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - radius;
                (d * d * scale).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

fn auto_kernel_size(sigma: f32) -> usize {
    ((sigma * 6.0 + 1.0).round().max(1.0) as usize) | 1
}

/// Blur an RGB image with a Gaussian of standard deviation `sigma`.
pub fn gaussian_blur(image: &ColorImage, sigma: f32) -> ColorImage {
    let filter = GaussianFilter::from_sigma(sigma);
    let src: Vec<f32> = image.as_raw().iter().map(|&v| v as f32).collect();
    let out = convolve_separable(&src, image.width(), image.height(), CHANNELS, &filter);
    let data = out.iter().map(|&v| v.round().clamp(0.0, 255.0) as u8).collect();
    ColorImage::from_raw_parts(image.width(), image.height(), data)
}

/// Horizontal then vertical pass over an interleaved buffer.
pub(crate) fn convolve_separable(
    src: &[f32],
    w: usize,
    h: usize,
    channels: usize,
    filter: &dyn SeparableFilter,
) -> Vec<f32> {
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;
    let row_len = w * channels;
    let mut tmp = vec![0.0f32; src.len()];
    if w == 0 || h == 0 {
        return tmp;
    }

    // horizontal
    for y in 0..h {
        let src_row = &src[y * row_len..(y + 1) * row_len];
        let dst_row = &mut tmp[y * row_len..(y + 1) * row_len];
        for x in 0..w {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &tap) in taps.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - radius, w);
                    acc += tap * src_row[sx * channels + c];
                }
                dst_row[x * channels + c] = acc;
            }
        }
    }

    // vertical
    let mut out = vec![0.0f32; src.len()];
    for y in 0..h {
        let dst_row = &mut out[y * row_len..(y + 1) * row_len];
        for (k, &tap) in taps.iter().enumerate() {
            let sy = reflect_101(y as isize + k as isize - radius, h);
            let src_row = &tmp[sy * row_len..(sy + 1) * row_len];
            for (d, &s) in dst_row.iter_mut().zip(src_row) {
                *d += tap * s;
            }
        }
    }
    out
}

fn reflect_101(mut i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}
