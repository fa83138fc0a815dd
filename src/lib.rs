#![doc = include_str!("../README.md")]

// Public entry points and their inputs/outputs
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;

// Building blocks, public for tooling and experiments.
pub mod decolor;
pub mod edges;
pub mod filters;
pub mod normalize;
pub mod pyramid;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::image::{ColorImage, GrayImageU8};
pub use crate::pipeline::{canny_pyramid, canny_pyramid_with_report, cpds, cpds_with_report};

pub use crate::diagnostics::{CannyPyramidReport, CpdsReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use control_maps::prelude::*;
///
/// let image = ColorImage::from_fn(32, 24, |x, _| if x < 16 { [0, 0, 0] } else { [255, 255, 255] });
/// let edges = canny_pyramid(&image).unwrap();
/// assert_eq!((edges.width(), edges.height()), (32, 24));
/// ```
pub mod prelude {
    pub use crate::image::{ColorImage, GrayImageU8, ImageF32};
    pub use crate::{canny_pyramid, cpds, Error, Result};
}
