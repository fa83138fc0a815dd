//! Serializable reports describing what the pipelines did.
//!
//! `CannyPyramidReport` and `CpdsReport` are returned by the `*_with_report`
//! entry points next to the regular output map. They carry per-stage timings
//! and a few summary statistics for tooling and regression tracking.

pub mod pipeline;
pub mod pyramid;
pub mod timing;

pub use pipeline::{CannyPyramidReport, CpdsReport, DecolorStage, InputDescriptor};
pub use pyramid::{PyramidLevelReport, PyramidStage};
pub use timing::{StageTiming, TimingBreakdown};
