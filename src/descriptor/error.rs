use crate::types::Region;

/// Reasons why descriptor aggregation may fail.
///
/// A zero-norm vector is not an error: normalization passes it through.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorError {
    EmptySpatialExtent {
        width: usize,
        height: usize,
    },
    EmptyRegion {
        region: Region,
        width: usize,
        height: usize,
    },
    InvalidLevels {
        levels: usize,
    },
    DataLength {
        expected: usize,
        found: usize,
    },
    ProjectionMismatch {
        expected: usize,
        found: usize,
    },
    InvalidProjection {
        reason: String,
    },
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorError::EmptySpatialExtent { width, height } => {
                write!(f, "feature map has no spatial extent ({width}x{height})")
            }
            DescriptorError::EmptyRegion {
                region,
                width,
                height,
            } => write!(
                f,
                "region {region} yields an empty slice of a {width}x{height} map"
            ),
            DescriptorError::InvalidLevels { levels } => {
                write!(f, "region tiling needs at least one level (got {levels})")
            }
            DescriptorError::DataLength { expected, found } => {
                write!(f, "feature data length mismatch ({found} != {expected})")
            }
            DescriptorError::ProjectionMismatch { expected, found } => write!(
                f,
                "projection expects {expected}-dim input, descriptors have {found} channels"
            ),
            DescriptorError::InvalidProjection { reason } => {
                write!(f, "invalid projection: {reason}")
            }
        }
    }
}

impl std::error::Error for DescriptorError {}
