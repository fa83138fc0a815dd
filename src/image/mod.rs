//! Image containers used throughout the crate.
//!
//! - `ImageU8`: borrowed 8-bit single-channel view with stride.
//! - `GrayImageU8`: owned 8-bit single-channel buffer (edge masks, output maps).
//! - `ImageF32`: owned single-channel float plane.
//! - `ColorImage`: owned interleaved 8-bit RGB image.
//! - `EdgeVolume`: owned interleaved 3-channel float edge response.
//!
//! Owned containers that accept caller-provided buffers validate the shape
//! once in `from_shape_vec`; everything downstream trusts the type.
pub mod color;
pub mod f32;
pub mod traits;
pub mod u8;
pub mod volume;

pub use self::color::ColorImage;
pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::{GrayImageU8, ImageU8};
pub use self::volume::EdgeVolume;

use crate::error::{Error, Result};

/// Number of interleaved channels in `ColorImage` and `EdgeVolume`.
pub const CHANNELS: usize = 3;

/// Check a numpy-style `shape` against the expected rank and buffer length.
///
/// Returns `(height, width)` on success.
pub(crate) fn check_shape(
    shape: &[usize],
    rank: usize,
    channels: Option<usize>,
    len: usize,
) -> Result<(usize, usize)> {
    if shape.len() != rank {
        return Err(Error::invalid(format!(
            "expected a {rank}-dimensional array, got shape {shape:?}"
        )));
    }
    if let Some(c) = channels {
        if shape[rank - 1] != c {
            return Err(Error::invalid(format!(
                "expected {c} channels, got {} (shape {shape:?})",
                shape[rank - 1]
            )));
        }
    }
    let expected: usize = shape.iter().product();
    if expected != len {
        return Err(Error::invalid(format!(
            "shape {shape:?} needs {expected} elements, buffer holds {len}"
        )));
    }
    Ok((shape[0], shape[1]))
}
