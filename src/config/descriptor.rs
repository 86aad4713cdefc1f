use crate::descriptor::{DescriptorError, DescriptorParams, PcaProjection};
use nalgebra::{DMatrix, RowDVector};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

/// Synthetic input used by the demo when no backbone is attached.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SyntheticInputConfig {
    pub batch: usize,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl Default for SyntheticInputConfig {
    fn default() -> Self {
        Self {
            batch: 2,
            width: 7,
            height: 7,
            channels: 16,
        }
    }
}

/// Fitted PCA parameters, `components` given row by row.
#[derive(Clone, Debug, Deserialize)]
pub struct ProjectionConfig {
    pub components: Vec<Vec<f32>>,
    #[serde(default)]
    pub mean: Option<Vec<f32>>,
    #[serde(default)]
    pub explained_variance: Option<Vec<f32>>,
}

impl ProjectionConfig {
    pub fn to_projection(&self) -> Result<PcaProjection, DescriptorError> {
        let rows = self.components.len();
        let cols = self.components.first().map_or(0, Vec::len);
        if let Some(row) = self.components.iter().find(|r| r.len() != cols) {
            return Err(DescriptorError::InvalidProjection {
                reason: format!("ragged components ({} != {cols})", row.len()),
            });
        }
        let flat: Vec<f32> = self.components.iter().flatten().copied().collect();
        let mut projection = PcaProjection::new(DMatrix::from_row_slice(rows, cols, &flat))?;
        if let Some(mean) = &self.mean {
            projection = projection.with_mean(RowDVector::from_row_slice(mean))?;
        }
        if let Some(variance) = &self.explained_variance {
            projection = projection.with_whitening(RowDVector::from_row_slice(variance))?;
        }
        Ok(projection)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DescriptorToolConfig {
    #[serde(default)]
    pub params: DescriptorParams,
    #[serde(default)]
    pub input: SyntheticInputConfig,
    #[serde(default)]
    pub projection: Option<ProjectionConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<DescriptorToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
