use serde::{Deserialize, Serialize};

/// Which aggregation the extractor runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    /// Global max pooling over the full map.
    Mac,
    /// Sum of per-region MACs over a multi-scale tiling.
    #[default]
    Rmac,
}

/// Descriptor selection shared by the extractor and tool configs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorParams {
    pub kind: DescriptorKind,
    /// Number of RMAC scale levels (>= 1). Ignored for MAC.
    pub levels: usize,
}

impl Default for DescriptorParams {
    fn default() -> Self {
        Self {
            kind: DescriptorKind::Rmac,
            levels: 3,
        }
    }
}

impl DescriptorParams {
    pub fn mac() -> Self {
        Self {
            kind: DescriptorKind::Mac,
            ..Default::default()
        }
    }

    pub fn rmac(levels: usize) -> Self {
        Self {
            kind: DescriptorKind::Rmac,
            levels,
        }
    }
}
