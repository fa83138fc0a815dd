//! sRGB ↔ CIE L*a*b* (D65) for values in [0, 1].
//!
//! L lies in [0, 100]; a and b roughly in [-127, 127].

const XYZ_FROM_RGB: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];
const RGB_FROM_XYZ: [[f32; 3]; 3] = [
    [3.240_479, -1.537_150, -0.498_535],
    [-0.969_256, 1.875_991, 0.041_556],
    [0.055_648, -0.204_043, 1.057_311],
];
const WHITE_X: f32 = 0.950_456;
const WHITE_Z: f32 = 1.088_754;

const EPSILON: f32 = 0.008_856;
const KAPPA: f32 = 903.3;
const LINEAR_SLOPE: f32 = 7.787;
const LINEAR_OFFSET: f32 = 16.0 / 116.0;

fn to_linear(v: f32) -> f32 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn to_gamma(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

fn mul3(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    std::array::from_fn(|i| m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2])
}

fn f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

fn f_inv(t: f32) -> f32 {
    let cube = t * t * t;
    if cube > EPSILON {
        cube
    } else {
        (t - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

/// Gamma-encoded sRGB in [0, 1] to Lab.
pub fn srgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let [x, y, z] = mul3(&XYZ_FROM_RGB, rgb.map(to_linear));
    let (x, z) = (x / WHITE_X, z / WHITE_Z);
    let l = if y > EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        KAPPA * y
    };
    let (fx, fy, fz) = (f(x), f(y), f(z));
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Lab to gamma-encoded sRGB, clamped to [0, 1].
pub fn lab_to_srgb(lab: [f32; 3]) -> [f32; 3] {
    let [l, a, b] = lab;
    let (y, fy) = if l <= KAPPA * EPSILON {
        let y = l / KAPPA;
        (y, LINEAR_SLOPE * y + LINEAR_OFFSET)
    } else {
        let fy = (l + 16.0) / 116.0;
        (fy * fy * fy, fy)
    };
    let x = f_inv(fy + a / 500.0) * WHITE_X;
    let z = f_inv(fy - b / 200.0) * WHITE_Z;
    mul3(&RGB_FROM_XYZ, [x, y, z]).map(|v| to_gamma(v.max(0.0)).clamp(0.0, 1.0))
}
