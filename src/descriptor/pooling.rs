use super::DescriptorError;
use crate::feature::{FeatureMap, FeatureView};
use crate::types::DescriptorBatch;
use nalgebra::DMatrix;

/// Channel-wise maximum over every position of `view`.
///
/// A NaN activation makes its channel NaN. An empty view yields `-inf` for
/// every channel; callers reject empty windows before pooling.
pub fn max_pool_view<V: FeatureView>(view: &V) -> Vec<f32> {
    let mut out = vec![f32::NEG_INFINITY; view.channels()];
    for channels in view.positions() {
        for (m, &v) in out.iter_mut().zip(channels) {
            if v > *m || v.is_nan() {
                *m = v;
            }
        }
    }
    out
}

/// Max over the full spatial extent, per sample and channel.
///
/// Returns a `(batch, channels)` matrix.
pub fn global_max_pool(map: &FeatureMap) -> Result<DescriptorBatch, DescriptorError> {
    if !map.has_spatial_extent() {
        return Err(DescriptorError::EmptySpatialExtent {
            width: map.width(),
            height: map.height(),
        });
    }
    let mut flat = Vec::with_capacity(map.batch() * map.channels());
    for b in 0..map.batch() {
        flat.extend(max_pool_view(&map.full_window(b)));
    }
    Ok(DMatrix::from_row_slice(map.batch(), map.channels(), &flat))
}

/// Scale each row to unit L2 norm. Zero rows are returned unchanged.
pub fn l2_normalize(vectors: &DescriptorBatch) -> DescriptorBatch {
    let mut out = vectors.clone();
    normalize_rows_mut(&mut out);
    out
}

/// In-place variant of [`l2_normalize`].
pub fn normalize_rows_mut(vectors: &mut DescriptorBatch) {
    for mut row in vectors.row_iter_mut() {
        let norm = row.norm();
        if norm != 0.0 {
            row.unscale_mut(norm);
        }
    }
}
