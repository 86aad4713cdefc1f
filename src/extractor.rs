//! Stateful descriptor extraction over repeated batches.
//!
//! [`DescriptorExtractor`] owns the descriptor parameters and a
//! [`RegionCache`], so batches sharing a spatial extent reuse one tiling.
use crate::descriptor::{
    calculate_mac, rmac_with_regions, DescriptorError, DescriptorKind, DescriptorParams,
    Projection,
};
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::feature::FeatureMap;
use crate::regions::RegionCache;
use crate::types::DescriptorBatch;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Descriptors of one batch with the work that produced them.
#[derive(Clone, Debug, Serialize)]
pub struct DescriptorReport {
    pub kind: DescriptorKind,
    /// `(batch, dim)`, rows L2-normalized
    pub descriptors: DescriptorBatch,
    /// Tiles pooled per sample; 1 for MAC
    pub num_regions: usize,
    pub timing: TimingBreakdown,
}

#[derive(Debug, Default)]
pub struct DescriptorExtractor {
    params: DescriptorParams,
    regions: RegionCache,
}

impl DescriptorExtractor {
    pub fn new(params: DescriptorParams) -> Self {
        Self {
            params,
            regions: RegionCache::new(),
        }
    }

    pub fn params(&self) -> &DescriptorParams {
        &self.params
    }

    pub fn cached_tilings(&self) -> usize {
        self.regions.len()
    }

    pub fn process(
        &mut self,
        map: &FeatureMap,
        projection: Option<&dyn Projection>,
    ) -> Result<DescriptorReport, DescriptorError> {
        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();

        let (descriptors, num_regions) = match self.params.kind {
            DescriptorKind::Mac => {
                let stage = Instant::now();
                let descriptors = calculate_mac(map, projection)?;
                timing.push("mac", elapsed_ms(stage));
                (descriptors, 1)
            }
            DescriptorKind::Rmac => {
                let stage = Instant::now();
                let regions =
                    self.regions
                        .get_or_compute(map.width(), map.height(), self.params.levels)?;
                timing.push("tiling", elapsed_ms(stage));

                let stage = Instant::now();
                let descriptors = rmac_with_regions(map, regions, projection)?;
                timing.push("rmac", elapsed_ms(stage));
                (descriptors, regions.len())
            }
        };

        timing.total_ms = elapsed_ms(t0);
        debug!(
            "DescriptorExtractor::process kind={:?} batch={} dim={} regions={} total_ms={:.3}",
            self.params.kind,
            descriptors.nrows(),
            descriptors.ncols(),
            num_regions,
            timing.total_ms
        );

        Ok(DescriptorReport {
            kind: self.params.kind,
            descriptors,
            num_regions,
            timing,
        })
    }
}
