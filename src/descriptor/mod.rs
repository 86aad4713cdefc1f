//! MAC and RMAC descriptors.
//!
//! - `pooling`: channel-wise spatial max pooling and row-wise L2 normalization.
//! - `mac`: global (MAC) and regional (RMAC) aggregation, with an optional
//!   externally fitted [`Projection`] applied after the first normalization.
//! - `projection`: the projection contract and a fitted PCA/whitening transform.
//! - `params`: descriptor selection knobs shared with the extractor and config.

pub mod error;
pub mod mac;
pub mod params;
pub mod pooling;
pub mod projection;

pub use self::error::DescriptorError;
pub use self::mac::{calculate_mac, calculate_rmac, rmac_with_regions};
pub use self::params::{DescriptorKind, DescriptorParams};
pub use self::pooling::{global_max_pool, l2_normalize, max_pool_view, normalize_rows_mut};
pub use self::projection::{PcaProjection, Projection};
