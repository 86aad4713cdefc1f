use nalgebra::DMatrix;
use serde::Serialize;

/// Batch of descriptors, one row per sample.
pub type DescriptorBatch = DMatrix<f32>;

/// Binary relevance matrix, `(num_queries, num_references)`.
pub type GroundTruthMatrix = DMatrix<i32>;

/// Axis-aligned square tile over a feature map's spatial extent.
///
/// `x` runs along the width axis and `y` along the height axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub side: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, side: usize) -> Self {
        Self { x, y, side }
    }

    /// Exclusive end along `x`, saturating at `usize::MAX`.
    #[inline]
    pub fn x_end(&self) -> usize {
        self.x.saturating_add(self.side)
    }

    #[inline]
    pub fn y_end(&self) -> usize {
        self.y.saturating_add(self.side)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[x={}, y={}, side={}]", self.x, self.y, self.side)
    }
}
