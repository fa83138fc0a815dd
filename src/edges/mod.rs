//! Edge extraction: gradients, Canny and centred-threshold extractors.
//!
//! - Sobel gradients with L1/L2 magnitude and replicate borders.
//! - Non‑maximum suppression with double-threshold classification and
//!   8-connected hysteresis, assembled into a Canny detector.
//! - Centred-threshold wrappers turning a per-channel reference intensity
//!   into Canny thresholds, for single planes and RGB images.

pub mod canny;
pub mod centered;
pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use canny::{canny, canny_with, CannyParams};
pub use centered::{centered_canny, centered_canny_color, centered_thresholds, SIGMA};
pub use grad::{sobel_gradients, Grad, GradientNorm};
pub use nms::{run_nms, EdgeClass};
