//! Weight fitting for contrast-preserving decolorization.
//!
//! The grayscale is modelled as a polynomial of the RGB values,
//! `G = Σ wₖ · r^i g^j b^k` over all monomials of degree 1..=2. The weights
//! are chosen so that the gray gradients reproduce the Lab color contrast
//! `Cg` in magnitude, with the sign left free where the RGB channels do not
//! agree on an ordering. This is a bimodal likelihood maximized by a
//! fixed-point iteration whose linear step is a 9×9 least-squares solve.
use super::DecolorOptions;
use crate::decolor::lab::srgb_to_lab;
use nalgebra::{DMatrix, DVector};

/// Degree of the RGB polynomial.
pub(crate) const ORDER: u32 = 2;
/// Gradient magnitude above which a channel counts as increasing.
const WEAK_ORDER_LEVEL: f64 = 0.05;
/// Initial weight of each linear term.
const INITIAL_LINEAR_WEIGHT: f64 = 0.33;

/// Interleaved RGB float image with samples in [0, 1].
#[derive(Clone, Debug)]
pub(crate) struct RgbF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl RgbF32 {
    pub fn pixels(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data.chunks_exact(3).map(|px| [px[0], px[1], px[2]])
    }

    fn plane(&self, mut f: impl FnMut([f32; 3]) -> f32) -> Vec<f32> {
        self.pixels().map(&mut f).collect()
    }
}

/// Exponents `[i, j, k]` of every monomial with `1 <= i + j + k <= ORDER`.
pub(crate) fn monomials() -> Vec<[u32; 3]> {
    let mut out = Vec::new();
    for r in 0..=ORDER {
        for g in 0..=ORDER {
            for b in 0..=ORDER {
                let degree = r + g + b;
                if degree > 0 && degree <= ORDER {
                    out.push([r, g, b]);
                }
            }
        }
    }
    out
}

#[inline]
pub(crate) fn eval_monomial(px: [f32; 3], e: [u32; 3]) -> f32 {
    px[0].powi(e[0] as i32) * px[1].powi(e[1] as i32) * px[2].powi(e[2] as i32)
}

/// Forward differences `p(x) − p(x+1)` then `p(y) − p(y+1)`; the last column
/// and last row are zero. Length `2·w·h`.
fn gradient_vector(plane: &[f32], w: usize, h: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; 2 * w * h];
    let (gx, gy) = out.split_at_mut(w * h);
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if x + 1 < w {
                gx[i] = (plane[i] - plane[i + 1]) as f64;
            }
            if y + 1 < h {
                gy[i] = (plane[i] - plane[i + w]) as f64;
            }
        }
    }
    out
}

/// Lab color contrast per gradient sample, scaled by 1/100.
fn color_contrast(img: &RgbF32) -> Vec<f64> {
    let lab: Vec<[f32; 3]> = img.pixels().map(srgb_to_lab).collect();
    let grads: Vec<Vec<f64>> = (0..3)
        .map(|c| {
            let plane: Vec<f32> = lab.iter().map(|px| px[c]).collect();
            gradient_vector(&plane, img.w, img.h)
        })
        .collect();
    (0..grads[0].len())
        .map(|i| (grads[0][i].powi(2) + grads[1][i].powi(2) + grads[2][i].powi(2)).sqrt() / 100.0)
        .collect()
}

/// +1 where all RGB channels increase together, −1 where all decrease, else 0.
fn weak_order(img: &RgbF32) -> Vec<f64> {
    let grads: Vec<Vec<f64>> = (0..3)
        .map(|c| gradient_vector(&img.plane(|px| px[c]), img.w, img.h))
        .collect();
    (0..grads[0].len())
        .map(|i| {
            let up = grads.iter().all(|g| g[i] > WEAK_ORDER_LEVEL);
            let down = grads.iter().all(|g| g[i] < -WEAK_ORDER_LEVEL);
            f64::from(up as u8) - f64::from(down as u8)
        })
        .collect()
}

/// One row per monomial holding that monomial's gradient vector.
fn polynomial_gradients(img: &RgbF32, basis: &[[u32; 3]]) -> DMatrix<f64> {
    let n = 2 * img.w * img.h;
    let mut p = DMatrix::zeros(basis.len(), n);
    for (k, &e) in basis.iter().enumerate() {
        let plane = img.plane(|px| eval_monomial(px, e));
        let grad = gradient_vector(&plane, img.w, img.h);
        for (dst, v) in p.row_mut(k).iter_mut().zip(grad) {
            *dst = v;
        }
    }
    p
}

fn energy(projection: &DVector<f64>, cg: &[f64], sigma: f64) -> f64 {
    if cg.is_empty() {
        return 0.0;
    }
    let total: f64 = projection
        .iter()
        .zip(cg)
        .map(|(&v, &c)| {
            let a = -(v - c).powi(2) / sigma;
            let b = -(v + c).powi(2) / sigma;
            let m = a.max(b);
            -(m + ((a - m).exp() + (b - m).exp()).ln())
        })
        .sum();
    total / cg.len() as f64
}

/// Fitted weights and convergence details.
#[derive(Clone, Debug)]
pub(crate) struct Solution {
    pub weights: Vec<f64>,
    pub iterations: usize,
    pub energy: f64,
}

pub(crate) fn solve(img: &RgbF32, basis: &[[u32; 3]], options: &DecolorOptions) -> Solution {
    let cg = color_contrast(img);
    let alf = weak_order(img);
    let p = polynomial_gradients(img, basis);

    let normal = &p * p.transpose();
    let svd = normal.svd(true, true);
    let eps = svd.singular_values.max() * 1e-12;

    let mut weights = DVector::from_iterator(
        basis.len(),
        basis.iter().map(|e| {
            if e.iter().sum::<u32>() == 1 {
                INITIAL_LINEAR_WEIGHT
            } else {
                0.0
            }
        }),
    );

    let sq_sigma = options.sigma * options.sigma;
    let mut e = 0.0f64;
    let mut prev_e = f64::INFINITY;
    let mut iterations = 0usize;
    while (e - prev_e).abs() > options.tolerance {
        iterations += 1;
        prev_e = e;

        let projection = p.tr_mul(&weights);
        let target = DVector::from_iterator(
            cg.len(),
            projection.iter().zip(&cg).zip(&alf).map(|((&v, &c), &a)| {
                let pos = (1.0 + a) / 2.0 * (-0.5 * (v - c).powi(2) / sq_sigma).exp();
                let neg = (1.0 - a) / 2.0 * (-0.5 * (v + c).powi(2) / sq_sigma).exp();
                let sum = pos + neg;
                let denom = if sum == 0.0 { 1.0 } else { sum };
                c * (pos - neg) / denom
            }),
        );
        let rhs = &p * target;
        weights = svd
            .solve(&rhs, eps)
            .unwrap_or_else(|_| DVector::zeros(basis.len()));

        e = energy(&p.tr_mul(&weights), &cg, options.sigma);
        if iterations > options.max_iterations {
            break;
        }
    }

    Solution {
        weights: weights.iter().copied().collect(),
        iterations,
        energy: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(w: usize, h: usize, f: impl Fn(usize, usize) -> [f32; 3]) -> RgbF32 {
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&f(x, y));
            }
        }
        RgbF32 { w, h, data }
    }

    #[test]
    fn second_order_basis_has_nine_terms() {
        let basis = monomials();
        assert_eq!(basis.len(), 9);
        assert_eq!(basis.iter().filter(|e| e.iter().sum::<u32>() == 1).count(), 3);
        assert_eq!(basis[0], [0, 0, 1]);
        assert_eq!(basis[8], [2, 0, 0]);
    }

    #[test]
    fn forward_differences_zero_last_row_and_column() {
        let plane = [1.0, 3.0, 6.0, 2.0, 2.0, 2.0];
        let g = gradient_vector(&plane, 3, 2);
        assert_eq!(&g[..6], &[-2.0, -3.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(&g[6..], &[-1.0, 1.0, 4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn weak_order_tracks_joint_channel_direction() {
        let img = rgb(3, 1, |x, _| match x {
            0 => [0.9, 0.9, 0.9],
            1 => [0.1, 0.1, 0.1],
            _ => [0.9, 0.1, 0.5],
        });
        let alf = weak_order(&img);
        assert_eq!(&alf[..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn flat_image_converges_to_zero_weights() {
        let img = rgb(6, 5, |_, _| [0.5, 0.5, 0.5]);
        let sol = solve(&img, &monomials(), &DecolorOptions::default());
        assert!(sol.weights.iter().all(|&w| w == 0.0));
        assert!(sol.iterations >= 1);
    }

    #[test]
    fn iteration_count_is_bounded() {
        let img = rgb(12, 10, |x, y| {
            [
                (x as f32 / 11.0),
                ((x + y) % 5) as f32 / 4.0,
                (y as f32 / 9.0),
            ]
        });
        let options = DecolorOptions::default();
        let sol = solve(&img, &monomials(), &options);
        assert!(sol.iterations <= options.max_iterations + 1);
        assert!(sol.energy.is_finite());
    }
}
