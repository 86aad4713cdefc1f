//! Compact image descriptors from convolutional feature maps.
//!
//! The crate turns `(batch, width, height, channels)` activation tensors into
//! L2-normalized vectors for content-based image retrieval:
//!
//! - **MAC**: channel-wise max over the whole map.
//! - **RMAC**: MACs of a multi-scale square tiling with ~40% overlap between
//!   neighbouring tiles, summed per sample and normalized once.
//!
//! Both accept an externally fitted [`Projection`] (e.g. PCA whitening).
//! The [`evaluation`] module builds the query/reference split and the binary
//! ground-truth matrix used to score a retrieval model.

// Public modules (stable-ish surface)
pub mod descriptor;
pub mod evaluation;
pub mod extractor;
pub mod feature;
pub mod regions;
pub mod types;

// Tooling support
pub mod config;
pub mod diagnostics;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::descriptor::{
    calculate_mac, calculate_rmac, global_max_pool, l2_normalize, DescriptorError,
    DescriptorKind, DescriptorParams, PcaProjection, Projection,
};
pub use crate::evaluation::{
    build_evaluation_set, EvaluationError, EvaluationSet, LabelBinarizer, LabelEncoder,
};
pub use crate::extractor::{DescriptorExtractor, DescriptorReport};
pub use crate::feature::FeatureMap;
pub use crate::regions::{compute_regions, RegionCache};
pub use crate::types::{DescriptorBatch, GroundTruthMatrix, Region};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rmac_retrieval::prelude::*;
///
/// # fn main() -> Result<(), DescriptorError> {
/// let map = FeatureMap::new(1, 7, 7, 512);
/// let rmac = calculate_rmac(&map, 3, None)?;
/// println!("dim={}", rmac.ncols());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::descriptor::{calculate_mac, calculate_rmac, DescriptorError, Projection};
    pub use crate::evaluation::build_evaluation_set;
    pub use crate::feature::FeatureMap;
    pub use crate::{DescriptorExtractor, DescriptorParams};
}
