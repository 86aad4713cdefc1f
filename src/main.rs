use rmac_retrieval::config::descriptor::{load_config, DescriptorToolConfig};
use rmac_retrieval::io::write_json_file;
use rmac_retrieval::{DescriptorExtractor, FeatureMap, Projection};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo stub: without a backbone attached, descriptors are computed on a
    // synthetic activation map shaped by the config.
    let config = match env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => DescriptorToolConfig::default(),
    };
    let map = synthetic_map(&config);
    let projection = config
        .projection
        .as_ref()
        .map(|p| p.to_projection())
        .transpose()
        .map_err(|e| e.to_string())?;

    let mut extractor = DescriptorExtractor::new(config.params);
    let report = extractor
        .process(&map, projection.as_ref().map(|p| p as &dyn Projection))
        .map_err(|e| e.to_string())?;

    println!(
        "kind={:?} levels={} batch={} dim={} regions={} total_ms={:.3}",
        report.kind,
        extractor.params().levels,
        report.descriptors.nrows(),
        report.descriptors.ncols(),
        report.num_regions,
        report.timing.total_ms
    );
    for (i, row) in report.descriptors.row_iter().enumerate() {
        println!("sample {i}: norm={:.6}", row.norm());
    }

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

/// Smooth per-channel bumps centered at different positions in every sample.
fn synthetic_map(config: &DescriptorToolConfig) -> FeatureMap {
    let input = &config.input;
    let mut map = FeatureMap::new(input.batch, input.width, input.height, input.channels);
    for b in 0..input.batch {
        for c in 0..input.channels {
            let cx = ((c * 3 + b) % input.width.max(1)) as f32;
            let cy = ((c * 5 + 2 * b) % input.height.max(1)) as f32;
            for x in 0..input.width {
                for y in 0..input.height {
                    let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
                    map.set(b, x, y, c, (-0.5 * d2).exp());
                }
            }
        }
    }
    map
}
