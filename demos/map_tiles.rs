//! Split scattered map entities into named tiles.
//!
//! ```sh
//! RUST_LOG=lodgroup=debug cargo run --example map_tiles
//! ```

use std::collections::BTreeMap;

use lodgroup::hierarchy::{HierarchyBuilder, HierarchyConfig};
use lodgroup::tile_name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(11);
    let points: Vec<Vec<f64>> = (0..800)
        .map(|_| {
            vec![
                rng.random_range(-4000.0..4000.0),
                rng.random_range(-2500.0..2500.0),
                rng.random_range(0.0..120.0),
            ]
        })
        .collect();

    let paths = HierarchyBuilder::new(HierarchyConfig::map_tiles()).build(&points, None)?;

    // path = [tile, tile group]
    let num_groups = paths.iter().map(|p| p[1] + 1).max().unwrap_or(0);
    let num_tiles = paths.iter().map(|p| p[0] + 1).max().unwrap_or(0);

    let mut tiles: BTreeMap<String, usize> = BTreeMap::new();
    for path in &paths {
        *tiles
            .entry(tile_name(path[1], path[0], num_groups, num_tiles))
            .or_default() += 1;
    }

    println!("{} tile groups, {} tiles", num_groups, num_tiles);
    for (name, count) in &tiles {
        println!("  {:>8}: {} entities", name, count);
    }
    Ok(())
}
