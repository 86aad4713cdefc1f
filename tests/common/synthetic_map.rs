use rmac_retrieval::FeatureMap;

/// Map whose channel `c` of sample `b` is a blob of height `1 + c` centered at `center(b, c)`.
pub fn blob_map(
    batch: usize,
    width: usize,
    height: usize,
    channels: usize,
    center: impl Fn(usize, usize) -> (usize, usize),
) -> FeatureMap {
    assert!(width > 0 && height > 0, "map dimensions must be positive");
    let mut map = FeatureMap::new(batch, width, height, channels);
    for b in 0..batch {
        for c in 0..channels {
            let (cx, cy) = center(b, c);
            for x in 0..width {
                for y in 0..height {
                    let d2 = (x as f32 - cx as f32).powi(2) + (y as f32 - cy as f32).powi(2);
                    map.set(b, x, y, c, (1.0 + c as f32) * (-0.25 * d2).exp());
                }
            }
        }
    }
    map
}

/// Deterministic pseudo-random activations in `[0, 1)`.
pub fn noise_map(batch: usize, width: usize, height: usize, channels: usize, seed: u32) -> FeatureMap {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let data = (0..batch * width * height * channels)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 10_000) as f32 / 10_000.0
        })
        .collect();
    FeatureMap::from_vec(batch, width, height, channels, data).expect("shape matches data")
}
