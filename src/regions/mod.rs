//! Multi-scale square tiling used by regional max pooling.
//!
//! For a `W × H` map the tiler picks how many tiles to lay along the long side
//! so that neighbouring tiles overlap by roughly [`TARGET_OVERLAP`], then emits
//! `L` levels of progressively smaller square tiles. Level `l` uses tiles of
//! side `floor(2 * min(W, H) / (l + 1))`.
//!
//! Output order is levels ascending, then rows (`y`) outer, columns (`x`) inner.

pub mod cache;

pub use self::cache::RegionCache;

use crate::descriptor::DescriptorError;
use crate::types::Region;
use log::debug;

/// Desired overlap between neighbouring tiles.
pub const TARGET_OVERLAP: f64 = 0.4;

/// Candidate tile counts along the long dimension.
const STEP_CANDIDATES: [f64; 6] = [2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

/// Compute the RMAC tiling for a `width × height` map over `levels` scales.
pub fn compute_regions(
    width: usize,
    height: usize,
    levels: usize,
) -> Result<Vec<Region>, DescriptorError> {
    if width == 0 || height == 0 {
        return Err(DescriptorError::EmptySpatialExtent { width, height });
    }
    if levels == 0 {
        return Err(DescriptorError::InvalidLevels { levels });
    }

    let (w_extra, h_extra) = region_overplus(width, height);
    let short_side = width.min(height) as f64;

    let mut regions = Vec::new();
    for l in 1..=levels {
        let side = (2.0 * short_side / (l as f64 + 1.0)).floor();
        if side <= 0.0 {
            continue;
        }
        let half = (side / 2.0 - 1.0).floor();

        let centers_x = tile_origins(width as f64, side, half, l + w_extra);
        let centers_y = tile_origins(height as f64, side, half, l + h_extra);

        let side = side as usize;
        for &y in &centers_y {
            for &x in &centers_x {
                regions.push(Region::new(x, y, side));
            }
        }
    }

    debug!(
        "compute_regions {}x{} L={} -> {} regions (overplus w={} h={})",
        width,
        height,
        levels,
        regions.len(),
        w_extra,
        h_extra
    );
    Ok(regions)
}

/// Index into [`STEP_CANDIDATES`] whose neighbour overlap is closest to
/// [`TARGET_OVERLAP`]. Ties resolve to the smallest step count.
pub fn select_step_index(width: usize, height: usize) -> usize {
    let short = width.min(height) as f64;
    let long = width.max(height) as f64;
    let mut best = (0, f64::INFINITY);
    for (idx, steps) in STEP_CANDIDATES.iter().enumerate() {
        let b = (long - short) / (steps - 1.0);
        let overlap = (short * short - short * b) / (short * short);
        let deviation = (overlap - TARGET_OVERLAP).abs();
        if deviation < best.1 {
            best = (idx, deviation);
        }
    }
    best.0
}

/// Extra tile centers along `(width, height)`. Only the long axis gets any.
fn region_overplus(width: usize, height: usize) -> (usize, usize) {
    let extra = select_step_index(width, height) + 1;
    match height.cmp(&width) {
        std::cmp::Ordering::Less => (extra, 0),
        std::cmp::Ordering::Greater => (0, extra),
        std::cmp::Ordering::Equal => (0, 0),
    }
}

/// Origins of `count` evenly spaced tiles of `side` along an axis of `extent`.
///
/// A single tile gets spacing 0.
fn tile_origins(extent: f64, side: f64, half: f64, count: usize) -> Vec<usize> {
    let spacing = if count > 1 {
        (extent - side) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count)
        .map(|k| ((half + k as f64 * spacing).floor() - half).max(0.0) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_map_three_levels() {
        let regions = compute_regions(7, 7, 3).unwrap();
        assert_eq!(regions.len(), 1 + 4 + 9);
        assert_eq!(regions[0], Region::new(0, 0, 7));

        let level2: Vec<_> = regions[1..5].iter().map(|r| (r.x, r.y, r.side)).collect();
        assert_eq!(level2, vec![(0, 0, 4), (3, 0, 4), (0, 3, 4), (3, 3, 4)]);

        let level3: Vec<_> = regions[5..].iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(
            level3,
            vec![
                (0, 0),
                (2, 0),
                (4, 0),
                (0, 2),
                (2, 2),
                (4, 2),
                (0, 4),
                (2, 4),
                (4, 4)
            ]
        );
        assert!(regions[5..].iter().all(|r| r.side == 3));
    }

    #[test]
    fn wide_map_adds_columns() {
        // 10x7: long/short gap 3, overlap closest to 0.4 at 2 steps -> one extra column.
        assert_eq!(select_step_index(10, 7), 0);
        let regions = compute_regions(10, 7, 1).unwrap();
        assert_eq!(regions, vec![Region::new(0, 0, 7), Region::new(3, 0, 7)]);
    }

    #[test]
    fn tall_map_adds_rows() {
        let regions = compute_regions(7, 10, 1).unwrap();
        assert_eq!(regions, vec![Region::new(0, 0, 7), Region::new(0, 3, 7)]);
    }

    #[test]
    fn regions_stay_inside_map() {
        for &(w, h) in &[(7, 7), (10, 7), (7, 13), (32, 24), (3, 9), (1, 5)] {
            for r in compute_regions(w, h, 4).unwrap() {
                assert!(r.side >= 1);
                assert!(r.x_end() <= w, "{r} exceeds width {w}");
                assert!(r.y_end() <= h, "{r} exceeds height {h}");
            }
        }
    }

    #[test]
    fn unit_map_drops_empty_tiles() {
        // side = floor(2 / (l + 1)) is 1 at level 1 and 0 afterwards.
        let regions = compute_regions(1, 1, 3).unwrap();
        assert_eq!(regions, vec![Region::new(0, 0, 1)]);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            compute_regions(0, 4, 3),
            Err(DescriptorError::EmptySpatialExtent { .. })
        ));
        assert!(matches!(
            compute_regions(4, 4, 0),
            Err(DescriptorError::InvalidLevels { levels: 0 })
        ));
    }
}
