//! Linear projections applied to descriptor batches.
//!
//! Fitting happens elsewhere; this module only applies an already fitted
//! transform. Implementations must be `Send + Sync` because RMAC projects
//! samples in parallel.
use super::DescriptorError;
use crate::types::DescriptorBatch;
use nalgebra::{DMatrix, RowDVector};

/// Row-wise linear map from `input_dim` to `output_dim` features.
pub trait Projection: Send + Sync {
    fn input_dim(&self) -> usize;
    fn output_dim(&self) -> usize;

    /// Transform a `(n, input_dim)` batch into `(n, output_dim)`.
    fn apply(&self, vectors: &DescriptorBatch) -> DescriptorBatch;
}

/// Fitted PCA transform with optional centering and whitening.
///
/// `apply` computes `((x - mean) * componentsᵀ) / sqrt(explained_variance)`
/// per row, the same contract as a fitted PCA's `transform`.
#[derive(Clone, Debug, PartialEq)]
pub struct PcaProjection {
    /// `(output_dim, input_dim)` principal axes, one per row
    components: DMatrix<f32>,
    mean: Option<RowDVector<f32>>,
    /// Reciprocal standard deviation per output component
    whitening: Option<RowDVector<f32>>,
}

impl PcaProjection {
    pub fn new(components: DMatrix<f32>) -> Result<Self, DescriptorError> {
        if components.nrows() == 0 || components.ncols() == 0 {
            return Err(DescriptorError::InvalidProjection {
                reason: format!(
                    "components must be non-empty (got {}x{})",
                    components.nrows(),
                    components.ncols()
                ),
            });
        }
        Ok(Self {
            components,
            mean: None,
            whitening: None,
        })
    }

    /// Subtract `mean` from every input row before projecting.
    pub fn with_mean(mut self, mean: RowDVector<f32>) -> Result<Self, DescriptorError> {
        if mean.len() != self.components.ncols() {
            return Err(DescriptorError::InvalidProjection {
                reason: format!(
                    "mean has {} entries, components expect {}",
                    mean.len(),
                    self.components.ncols()
                ),
            });
        }
        self.mean = Some(mean);
        Ok(self)
    }

    /// Divide each output component by the square root of its variance.
    pub fn with_whitening(
        mut self,
        explained_variance: RowDVector<f32>,
    ) -> Result<Self, DescriptorError> {
        if explained_variance.len() != self.components.nrows() {
            return Err(DescriptorError::InvalidProjection {
                reason: format!(
                    "explained variance has {} entries, expected {}",
                    explained_variance.len(),
                    self.components.nrows()
                ),
            });
        }
        if let Some(v) = explained_variance.iter().find(|v| v.is_nan() || **v <= 0.0) {
            return Err(DescriptorError::InvalidProjection {
                reason: format!("explained variance must be positive (got {v})"),
            });
        }
        self.whitening = Some(explained_variance.map(|v| 1.0 / v.sqrt()));
        Ok(self)
    }

    pub fn components(&self) -> &DMatrix<f32> {
        &self.components
    }

    pub fn is_whitening(&self) -> bool {
        self.whitening.is_some()
    }
}

impl Projection for PcaProjection {
    fn input_dim(&self) -> usize {
        self.components.ncols()
    }

    fn output_dim(&self) -> usize {
        self.components.nrows()
    }

    fn apply(&self, vectors: &DescriptorBatch) -> DescriptorBatch {
        let mut centered = vectors.clone();
        if let Some(mean) = &self.mean {
            for mut row in centered.row_iter_mut() {
                row -= mean;
            }
        }
        let mut out = centered * self.components.transpose();
        if let Some(scale) = &self.whitening {
            for mut row in out.row_iter_mut() {
                row.component_mul_assign(scale);
            }
        }
        out
    }
}
