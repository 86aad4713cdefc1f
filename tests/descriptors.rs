mod common;

use common::synthetic_map::{blob_map, noise_map};
use nalgebra::DMatrix;
use rmac_retrieval::descriptor::rmac_with_regions;
use rmac_retrieval::{
    calculate_mac, calculate_rmac, compute_regions, l2_normalize, DescriptorError,
    DescriptorExtractor, DescriptorParams, FeatureMap, PcaProjection, Region,
};

const TOL: f32 = 1e-6;

fn assert_unit_rows(batch: &DMatrix<f32>) {
    for (i, row) in batch.row_iter().enumerate() {
        assert!(
            (row.norm() - 1.0).abs() < TOL,
            "row {i} has norm {}",
            row.norm()
        );
    }
}

#[test]
fn square_tiling_grows_with_levels() {
    let regions = compute_regions(7, 7, 3).unwrap();
    assert_eq!(regions[0], Region::new(0, 0, 7));
    assert_eq!(regions.iter().filter(|r| r.side == 7).count(), 1);

    let mut prev_side = 7;
    let mut prev_count = 1;
    for side in [4, 3] {
        let count = regions.iter().filter(|r| r.side == side).count();
        assert!(side < prev_side);
        assert!(count > prev_count, "level with side {side} has {count} tiles");
        prev_side = side;
        prev_count = count;
    }

    let mut last = 0;
    for levels in 1..=6 {
        let n = compute_regions(7, 7, levels).unwrap().len();
        assert!(n >= last, "L={levels} produced {n} < {last} regions");
        last = n;
    }
}

#[test]
fn normalization_properties() {
    let v = DMatrix::from_row_slice(3, 4, &[
        1.0, -2.0, 3.0, 0.5, //
        0.0, 0.0, 0.0, 0.0, //
        1e-3, 0.0, 0.0, 2e-3,
    ]);
    let n = l2_normalize(&v);
    assert!((n.row(0).norm() - 1.0).abs() < TOL);
    assert!((n.row(2).norm() - 1.0).abs() < TOL);
    assert_eq!(n.row(1), v.row(1));
}

#[test]
fn mac_has_unit_norm_for_nonzero_maps() {
    let map = noise_map(4, 9, 6, 32, 7);
    let mac = calculate_mac(&map, None).unwrap();
    assert_eq!(mac.shape(), (4, 32));
    assert_unit_rows(&mac);
}

#[test]
fn rmac_on_unit_map_degenerates_to_mac() {
    let map = noise_map(3, 1, 1, 16, 11);
    let mac = calculate_mac(&map, None).unwrap();
    let rmac = calculate_rmac(&map, 1, None).unwrap();
    assert!((mac - rmac).amax() < TOL);
}

#[test]
fn rmac_shape_is_independent_of_region_count() {
    for &(w, h) in &[(7, 7), (12, 7), (5, 17), (2, 2)] {
        let map = noise_map(2, w, h, 8, (w * h) as u32);
        for levels in 1..=4 {
            let rmac = calculate_rmac(&map, levels, None).unwrap();
            assert_eq!(rmac.shape(), (2, 8));
            assert_unit_rows(&rmac);
        }
    }
}

#[test]
fn rmac_matches_manual_region_sum() {
    let map = blob_map(2, 10, 7, 4, |b, c| ((c * 3 + b) % 10, (c + 2 * b) % 7));
    let regions = compute_regions(10, 7, 3).unwrap();
    let rmac = calculate_rmac(&map, 3, None).unwrap();

    for b in 0..2 {
        let sample = map.sample(b);
        let mut sum = DMatrix::<f32>::zeros(1, 4);
        for region in &regions {
            sum += calculate_mac(&sample.crop(region).unwrap(), None).unwrap();
        }
        let expected = l2_normalize(&sum);
        for c in 0..4 {
            assert!(
                (rmac[(b, c)] - expected[(0, c)]).abs() < 1e-5,
                "sample {b} channel {c}: {} vs {}",
                rmac[(b, c)],
                expected[(0, c)]
            );
        }
    }
}

#[test]
fn identity_projection_preserves_descriptors() {
    let map = noise_map(2, 8, 8, 6, 3);
    let identity = PcaProjection::new(DMatrix::identity(6, 6)).unwrap();
    let plain = calculate_rmac(&map, 3, None).unwrap();
    let projected = calculate_rmac(&map, 3, Some(&identity)).unwrap();
    assert!((plain - projected).amax() < 1e-5);
}

#[test]
fn projection_reduces_dimension_with_unit_norm() {
    let _ = env_logger::builder().is_test(true).try_init();
    let map = noise_map(3, 7, 7, 5, 21);
    let components = DMatrix::from_row_slice(2, 5, &[
        0.5, 0.5, 0.5, 0.5, 0.0, //
        0.0, 1.0, -1.0, 0.0, 0.5,
    ]);
    let projection = PcaProjection::new(components)
        .unwrap()
        .with_mean(nalgebra::RowDVector::from_element(5, 0.2))
        .unwrap()
        .with_whitening(nalgebra::RowDVector::from_row_slice(&[2.0, 0.5]))
        .unwrap();

    let mac = calculate_mac(&map, Some(&projection)).unwrap();
    assert_eq!(mac.shape(), (3, 2));
    assert_unit_rows(&mac);

    let rmac = calculate_rmac(&map, 3, Some(&projection)).unwrap();
    assert_eq!(rmac.shape(), (3, 2));
    assert_unit_rows(&rmac);
}

#[test]
fn rmac_tolerates_small_translation() {
    // The same blob pattern shifted by one cell should keep a high cosine similarity.
    let a = blob_map(1, 9, 9, 8, |_, c| (2 + c % 4, 3 + c % 3));
    let b = blob_map(1, 9, 9, 8, |_, c| (3 + c % 4, 3 + c % 3));
    let ra = calculate_rmac(&a, 3, None).unwrap();
    let rb = calculate_rmac(&b, 3, None).unwrap();
    let cosine = ra.row(0).dot(&rb.row(0));
    assert!(cosine > 0.95, "cosine similarity {cosine}");
}

#[test]
fn empty_spatial_extent_is_a_shape_error() {
    let map = FeatureMap::new(1, 0, 5, 4);
    assert!(matches!(
        calculate_mac(&map, None),
        Err(DescriptorError::EmptySpatialExtent { .. })
    ));
    assert!(matches!(
        calculate_rmac(&map, 3, None),
        Err(DescriptorError::EmptySpatialExtent { .. })
    ));
}

#[test]
fn regions_outside_the_map_are_rejected() {
    let map = noise_map(1, 4, 4, 2, 5);
    let regions = [Region::new(0, 0, 4), Region::new(4, 0, 2)];
    assert!(matches!(
        rmac_with_regions(&map, &regions, None),
        Err(DescriptorError::EmptyRegion { .. })
    ));
}

#[test]
fn extractor_agrees_with_free_functions() {
    let map = noise_map(2, 10, 6, 12, 9);
    let mut extractor = DescriptorExtractor::new(DescriptorParams::rmac(3));
    let report = extractor.process(&map, None).unwrap();
    let expected = calculate_rmac(&map, 3, None).unwrap();
    assert_eq!(report.descriptors, expected);
    assert_eq!(report.num_regions, compute_regions(10, 6, 3).unwrap().len());
}
