//! Build the five-level LOD hierarchy over a synthetic vegetation layout.
//!
//! ```sh
//! RUST_LOG=lodgroup=info cargo run --example lod_hierarchy
//! ```

use lodgroup::hierarchy::{validate_paths, HierarchyBuilder, HierarchyConfig, ProxyForest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Base draw distance for proxies, and the hard cap.
const LOD_DISTANCE: f64 = 750.0;
const LOD_DISTANCE_CAP: f64 = 1500.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Forest patches scattered over a 6 km square; each tree has a culling distance.
    let mut rng = StdRng::seed_from_u64(7);
    let mut points = Vec::new();
    let mut culling = Vec::new();
    for _ in 0..12 {
        let (cx, cy) = (rng.random_range(0.0..6000.0), rng.random_range(0.0..6000.0));
        for _ in 0..rng.random_range(20..120) {
            points.push(vec![
                cx + rng.random_range(-300.0..300.0),
                cy + rng.random_range(-300.0..300.0),
                rng.random_range(0.0..40.0),
            ]);
            culling.push(if rng.random_bool(0.3) { 350.0 } else { 150.0 });
        }
    }

    let config = HierarchyConfig::lod();
    let paths = HierarchyBuilder::new(config.clone()).build(&points, Some(&culling))?;

    let report = validate_paths(&paths, config.depth());
    println!("{}", report);

    let forest = ProxyForest::from_paths(&paths, &points)?;
    for level in 0..forest.depth() {
        let nodes = forest.level(level);
        let largest = nodes.iter().map(|n| n.len()).max().unwrap_or(0);
        println!("level {}: {} groups, largest {}", level, nodes.len(), largest);
    }
    for node in forest.roots() {
        println!(
            "  {} -> {} children, lod distance {}",
            node,
            node.child_count(),
            node.lod_distance(LOD_DISTANCE, LOD_DISTANCE_CAP)
        );
    }
    Ok(())
}
