//! Sobel image gradients with L1 or L2 magnitude.
//!
//! - Convolves the 3×3 Sobel pair with border clamping (replicate).
//! - Outputs per‑pixel `gx`, `gy` and the magnitude selected by
//!   `GradientNorm`.
//!
//! Complexity: O(W·H) per pass; memory: three float buffers.
use crate::image::{ImageF32, ImageU8, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Norm used to turn `(gx, gy)` into a scalar magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientNorm {
    /// `|gx| + |gy|`
    #[default]
    L1,
    /// `sqrt(gx^2 + gy^2)`
    L2,
}

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: ImageF32,
    /// Magnitude per pixel under the requested norm
    pub mag: ImageF32,
}

/// Compute Sobel gradients on an 8-bit plane; values stay on the 0..255 scale.
pub fn sobel_gradients(plane: &ImageU8<'_>, norm: GradientNorm) -> Grad {
    let gx = correlate3x3(plane, &SOBEL_KERNEL_X);
    let gy = correlate3x3(plane, &SOBEL_KERNEL_Y);
    let mut mag = ImageF32::new(plane.w, plane.h);
    for ((m, &dx), &dy) in mag.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *m = match norm {
            GradientNorm::L1 => dx.abs() + dy.abs(),
            GradientNorm::L2 => (dx * dx + dy * dy).sqrt(),
        };
    }
    Grad { gx, gy, mag }
}

/// 3×3 correlation with replicated borders.
fn correlate3x3(plane: &ImageU8<'_>, kernel: &Kernel3) -> ImageF32 {
    let (w, h) = (plane.w, plane.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let clamp_x = |x: usize, dx: usize| (x + dx).saturating_sub(1).min(w - 1);
    for y in 0..h {
        let window: [&[u8]; 3] =
            std::array::from_fn(|ky| plane.row((y + ky).saturating_sub(1).min(h - 1)));
        for (x, dst) in out.row_mut(y).iter_mut().enumerate() {
            *dst = window
                .iter()
                .zip(kernel)
                .map(|(row, k)| {
                    (0..3)
                        .map(|kx| k[kx] * row[clamp_x(x, kx)] as f32)
                        .sum::<f32>()
                })
                .sum();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize, split: usize) -> Vec<u8> {
        (0..w * h)
            .map(|i| if i % w < split { 0 } else { 100 })
            .collect()
    }

    #[test]
    fn vertical_step_has_horizontal_gradient_only() {
        let data = vertical_step(6, 4, 3);
        let plane = ImageU8 {
            w: 6,
            h: 4,
            stride: 6,
            data: &data,
        };
        let grad = sobel_gradients(&plane, GradientNorm::L1);
        assert_eq!(grad.gx.get(2, 1), 400.0);
        assert_eq!(grad.gx.get(3, 1), 400.0);
        assert_eq!(grad.gx.get(0, 1), 0.0);
        assert!(grad.gy.data.iter().all(|&v| v == 0.0));
        assert_eq!(grad.mag.get(2, 2), 400.0);
    }

    #[test]
    fn border_pixels_replicate_their_neighbours() {
        // single bright column at the left border
        let data = [90u8, 0, 0, 90, 0, 0];
        let plane = ImageU8 {
            w: 3,
            h: 2,
            stride: 3,
            data: &data,
        };
        let gx = correlate3x3(&plane, &SOBEL_KERNEL_X);
        // x = 0 sees [90, 90, 0] horizontally
        assert_eq!(gx.row(0), &[-360.0, -360.0, 0.0]);
        let gy = correlate3x3(&plane, &SOBEL_KERNEL_Y);
        assert!(gy.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn l2_norm_combines_components() {
        let data = [0u8, 0, 0, 0, 30, 0, 0, 0, 0];
        let plane = ImageU8 {
            w: 3,
            h: 3,
            stride: 3,
            data: &data,
        };
        let l1 = sobel_gradients(&plane, GradientNorm::L1);
        let l2 = sobel_gradients(&plane, GradientNorm::L2);
        // corner (0,0): gx = 30, gy = 30
        assert_eq!(l1.mag.get(0, 0), 60.0);
        assert!((l2.mag.get(0, 0) - 30.0 * 2f32.sqrt()).abs() < 1e-4);
    }
}
