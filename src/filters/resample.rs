//! Image resampling with area-averaging and bilinear kernels.
//!
//! Both kernels are separable, so each is expressed as a per-axis table of
//! `(source index, weight)` taps and applied in two passes. Buffers are
//! interleaved with `channels` samples per pixel.
//!
//! - `Area`: every destination pixel averages the source pixels it covers,
//!   weighted by overlap. The natural choice for decimation (no aliasing).
//! - `Linear`: half-pixel-centred bilinear interpolation with source
//!   coordinates clamped to the image.
use crate::image::{ColorImage, CHANNELS};

/// Interpolation kernel used by `resize_color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Area,
    Linear,
}

type AxisTaps = Vec<Vec<(usize, f32)>>;

fn area_taps(src_len: usize, dst_len: usize) -> AxisTaps {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then(|| (s, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

fn linear_taps(src_len: usize, dst_len: usize) -> AxisTaps {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|i| {
            let f = (i as f64 + 0.5) * scale - 0.5;
            let mut s = f.floor() as isize;
            let mut frac = f - s as f64;
            if s < 0 {
                s = 0;
                frac = 0.0;
            }
            if s as usize >= last {
                s = last as isize;
                frac = 0.0;
            }
            let s = s as usize;
            if frac == 0.0 {
                vec![(s, 1.0)]
            } else {
                vec![(s, (1.0 - frac) as f32), (s + 1, frac as f32)]
            }
        })
        .collect()
}

fn resample(
    src: &[f32],
    w: usize,
    h: usize,
    channels: usize,
    (dw, dh): (usize, usize),
    taps_x: &AxisTaps,
    taps_y: &AxisTaps,
) -> Vec<f32> {
    // horizontal: h rows of dw pixels
    let mut tmp = vec![0.0f32; dw * h * channels];
    for y in 0..h {
        let src_row = &src[y * w * channels..(y + 1) * w * channels];
        let dst_row = &mut tmp[y * dw * channels..(y + 1) * dw * channels];
        for (x, taps) in taps_x.iter().enumerate() {
            for &(sx, wt) in taps {
                let s = &src_row[sx * channels..(sx + 1) * channels];
                let d = &mut dst_row[x * channels..(x + 1) * channels];
                for (dv, &sv) in d.iter_mut().zip(s) {
                    *dv += wt * sv;
                }
            }
        }
    }

    // vertical
    let row_len = dw * channels;
    let mut out = vec![0.0f32; dw * dh * channels];
    for (y, taps) in taps_y.iter().enumerate() {
        let dst_row = &mut out[y * row_len..(y + 1) * row_len];
        for &(sy, wt) in taps {
            let src_row = &tmp[sy * row_len..(sy + 1) * row_len];
            for (dv, &sv) in dst_row.iter_mut().zip(src_row) {
                *dv += wt * sv;
            }
        }
    }
    out
}

fn is_degenerate(w: usize, h: usize, dw: usize, dh: usize) -> bool {
    w == 0 || h == 0 || dw == 0 || dh == 0
}

/// Area-averaging resize of an interleaved 8-bit buffer (rounded, saturated).
pub fn resize_area_u8(
    src: &[u8],
    w: usize,
    h: usize,
    channels: usize,
    dw: usize,
    dh: usize,
) -> Vec<u8> {
    if is_degenerate(w, h, dw, dh) {
        return vec![0; dw * dh * channels];
    }
    if (w, h) == (dw, dh) {
        return src.to_vec();
    }
    let srcf: Vec<f32> = src.iter().map(|&v| v as f32).collect();
    let out = resample(
        &srcf,
        w,
        h,
        channels,
        (dw, dh),
        &area_taps(w, dw),
        &area_taps(h, dh),
    );
    out.iter().map(|&v| v.round().clamp(0.0, 255.0) as u8).collect()
}

/// Bilinear resize of an interleaved float buffer.
pub fn resize_linear_f32(
    src: &[f32],
    w: usize,
    h: usize,
    channels: usize,
    dw: usize,
    dh: usize,
) -> Vec<f32> {
    if is_degenerate(w, h, dw, dh) {
        return vec![0.0; dw * dh * channels];
    }
    if (w, h) == (dw, dh) {
        return src.to_vec();
    }
    resample(
        src,
        w,
        h,
        channels,
        (dw, dh),
        &linear_taps(w, dw),
        &linear_taps(h, dh),
    )
}

/// Resize an RGB image to `width × height` with the given kernel.
pub fn resize_color(
    image: &ColorImage,
    width: usize,
    height: usize,
    interpolation: Interpolation,
) -> ColorImage {
    let (w, h) = (image.width(), image.height());
    let data = match interpolation {
        Interpolation::Area => resize_area_u8(image.as_raw(), w, h, CHANNELS, width, height),
        Interpolation::Linear => {
            let srcf: Vec<f32> = image.as_raw().iter().map(|&v| v as f32).collect();
            resize_linear_f32(&srcf, w, h, CHANNELS, width, height)
                .iter()
                .map(|&v| v.round().clamp(0.0, 255.0) as u8)
                .collect()
        }
    };
    ColorImage::from_raw_parts(width, height, data)
}
