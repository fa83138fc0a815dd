use serde::{Deserialize, Serialize};

/// Statistics for a single scale of the edge pyramid.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevelReport {
    pub level_index: usize,
    pub scale: f32,
    pub width: usize,
    pub height: usize,
    /// Fraction of pixels with an edge in at least one channel.
    pub edge_fraction: f32,
    pub elapsed_ms: f64,
}

/// Pyramid compositing details captured by `canny_pyramid_with_report`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidStage {
    pub centers: [f32; 3],
    pub levels: Vec<PyramidLevelReport>,
}
