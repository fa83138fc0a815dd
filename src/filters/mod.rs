//! Low-level filtering primitives: separable Gaussian blur and resampling.
//!
//! Both operate on interleaved row-major buffers with an arbitrary channel
//! count, and wrap those buffers in the typed containers at the edges.

pub mod gaussian;
pub mod resample;

pub use gaussian::{gaussian_blur, GaussianFilter, SeparableFilter};
pub use resample::{resize_color, Interpolation};
