//! Global and regional maximum activations of convolutions.
//!
//! MAC pools each sample over its full extent, normalizes, and optionally
//! projects and renormalizes (a linear projection does not preserve unit
//! norm). RMAC computes that MAC for every tile of the region tiling, sums the
//! per-region vectors of a sample in tiling order, and normalizes the summed
//! batch once at the end.
use super::pooling::{global_max_pool, max_pool_view, normalize_rows_mut};
use super::projection::Projection;
use super::DescriptorError;
use crate::feature::FeatureMap;
use crate::regions::compute_regions;
use crate::types::{DescriptorBatch, Region};
use log::debug;
use nalgebra::DMatrix;
use rayon::prelude::*;

/// MAC descriptors, `(batch, channels)` or `(batch, projection.output_dim())`.
pub fn calculate_mac(
    map: &FeatureMap,
    projection: Option<&dyn Projection>,
) -> Result<DescriptorBatch, DescriptorError> {
    check_projection(projection, map.channels())?;
    let pooled = global_max_pool(map)?;
    finish_mac(pooled, projection)
}

/// RMAC descriptors over an `levels`-scale tiling of the map's extent.
pub fn calculate_rmac(
    map: &FeatureMap,
    levels: usize,
    projection: Option<&dyn Projection>,
) -> Result<DescriptorBatch, DescriptorError> {
    let regions = compute_regions(map.width(), map.height(), levels)?;
    rmac_with_regions(map, &regions, projection)
}

/// RMAC descriptors against a precomputed tiling.
///
/// Samples are processed in parallel; each sample's sum runs in `regions`
/// order and rows keep batch order.
pub fn rmac_with_regions(
    map: &FeatureMap,
    regions: &[Region],
    projection: Option<&dyn Projection>,
) -> Result<DescriptorBatch, DescriptorError> {
    if !map.has_spatial_extent() {
        return Err(DescriptorError::EmptySpatialExtent {
            width: map.width(),
            height: map.height(),
        });
    }
    check_projection(projection, map.channels())?;
    let dim = projection.map_or(map.channels(), |p| p.output_dim());

    let sums = (0..map.batch())
        .into_par_iter()
        .map(|b| sample_rmac(map, b, regions, projection))
        .collect::<Result<Vec<_>, _>>()?;

    let mut flat = Vec::with_capacity(map.batch() * dim);
    for sum in &sums {
        flat.extend_from_slice(sum);
    }

    debug!(
        "rmac batch={} regions={} dim={} projected={}",
        map.batch(),
        regions.len(),
        dim,
        projection.is_some()
    );

    let mut out = DMatrix::from_row_slice(map.batch(), dim, &flat);
    normalize_rows_mut(&mut out);
    Ok(out)
}

/// Un-normalized sum of the per-region MACs of sample `b`.
fn sample_rmac(
    map: &FeatureMap,
    b: usize,
    regions: &[Region],
    projection: Option<&dyn Projection>,
) -> Result<Vec<f32>, DescriptorError> {
    let mut pooled = Vec::with_capacity(regions.len() * map.channels());
    for region in regions {
        let window = map.window(b, region)?;
        pooled.extend(max_pool_view(&window));
    }
    let pooled = DMatrix::from_row_slice(regions.len(), map.channels(), &pooled);
    let macs = finish_mac(pooled, projection)?;

    let mut sum = vec![0.0f32; macs.ncols()];
    for row in macs.row_iter() {
        for (acc, v) in sum.iter_mut().zip(row.iter()) {
            *acc += v;
        }
    }
    Ok(sum)
}

/// Normalize pooled rows, then project and renormalize when a projection is given.
///
/// The projected width must match the projection's declared `output_dim`.
fn finish_mac(
    mut pooled: DescriptorBatch,
    projection: Option<&dyn Projection>,
) -> Result<DescriptorBatch, DescriptorError> {
    normalize_rows_mut(&mut pooled);
    let p = match projection {
        Some(p) => p,
        None => return Ok(pooled),
    };
    let mut projected = p.apply(&pooled);
    if projected.shape() != (pooled.nrows(), p.output_dim()) {
        return Err(DescriptorError::InvalidProjection {
            reason: format!(
                "projection produced {}x{} features, declared {}x{}",
                projected.nrows(),
                projected.ncols(),
                pooled.nrows(),
                p.output_dim()
            ),
        });
    }
    normalize_rows_mut(&mut projected);
    Ok(projected)
}

fn check_projection(
    projection: Option<&dyn Projection>,
    channels: usize,
) -> Result<(), DescriptorError> {
    match projection {
        Some(p) if p.input_dim() != channels => Err(DescriptorError::ProjectionMismatch {
            expected: p.input_dim(),
            found: channels,
        }),
        _ => Ok(()),
    }
}
