use crate::diagnostics::{PyramidStage, TimingBreakdown};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Trace of a `canny_pyramid` run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CannyPyramidReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub pyramid: PyramidStage,
}

/// Convergence summary of the decolorization solver.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecolorStage {
    pub iterations: usize,
    pub energy: f64,
    pub weights: Vec<f64>,
    /// Size the solver worked at (may be smaller than the input).
    pub working_width: usize,
    pub working_height: usize,
}

/// Trace of a `cpds` run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpdsReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub decolor: DecolorStage,
    /// Largest chromatic residual before normalization.
    pub offset_max: f32,
}
