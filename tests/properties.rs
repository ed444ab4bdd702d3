//! End-to-end properties of search and hierarchy building.

use lodgroup::hierarchy::{validate_paths, HierarchyBuilder, HierarchyConfig, LevelConfig};
use lodgroup::metrics::is_contiguous;
use lodgroup::{search, ClusterEngine, ConstrainedSearch, DistanceAggregate, SearchConfig, Strategy};
use proptest::prelude::*;

fn three_clusters_along_x() -> Vec<Vec<f64>> {
    let mut points = Vec::new();
    for cx in [2400.0, 0.0, 1200.0] {
        for j in 0..4 {
            points.push(vec![cx + (j % 2) as f64 * 6.0, (j / 2) as f64 * 6.0]);
        }
    }
    points
}

#[test]
fn three_clusters_are_labeled_by_ascending_x() {
    let points = three_clusters_along_x();
    for strategy in [Strategy::Balanced, Strategy::Uneven] {
        let result = search(&points, Some(5), 50.0, strategy).unwrap();
        assert_eq!(result.n_groups(), 3);
        // Input order is x = 2400, 0, 1200.
        let expected: Vec<usize> = (0..12).map(|i| [2, 0, 1][i / 4]).collect();
        assert_eq!(result.assignment, expected);
    }
}

#[test]
fn engine_is_reproducible_across_seeds() {
    let points = three_clusters_along_x();
    let labels: Vec<Vec<usize>> = [0, 1, 2, 42]
        .iter()
        .map(|&seed| {
            ClusterEngine::new()
                .with_seed(seed)
                .cluster(&points, 3, Strategy::Balanced)
                .unwrap()
        })
        .collect();
    assert!(labels.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn max_aggregate_is_stricter() {
    // One wide pair next to a tight run: the weighted mean hides the pair.
    let mut points: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64 * 0.5, 0.0]).collect();
    points.push(vec![1000.0, 0.0]);
    points.push(vec![1080.0, 0.0]);

    let search = ConstrainedSearch::default();
    let mean = search.search(&points, &SearchConfig::new(40.0)).unwrap();
    let max = search
        .search(
            &points,
            &SearchConfig::new(40.0).with_aggregate(DistanceAggregate::Max),
        )
        .unwrap();
    assert_eq!(mean.result.n_groups(), 2);
    assert_eq!(max.result.n_groups(), 3);
    assert!(max.result.aggregate_distance(DistanceAggregate::Max) <= 40.0);
}

#[test]
fn lod_hierarchy_on_flat_grid() {
    let points: Vec<Vec<f64>> = (0..400)
        .map(|i| vec![(i % 20) as f64 * 150.0, (i / 20) as f64 * 150.0, 0.0])
        .collect();
    let culling: Vec<f64> = (0..400).map(|i| if i % 7 == 0 { 400.0 } else { 180.0 }).collect();

    let config = HierarchyConfig::lod();
    let paths = HierarchyBuilder::new(config.clone())
        .build(&points, Some(&culling))
        .unwrap();

    assert_eq!(paths.len(), 400);
    let report = validate_paths(&paths, config.depth());
    assert!(report.is_healthy(), "{}", report);

    // Finest level respects the 255 member cap.
    let finest: Vec<usize> = paths.iter().map(|p| p[0]).collect();
    let sizes = lodgroup::metrics::group_sizes(&finest);
    assert!(sizes.iter().all(|&s| s <= 255));
}

fn cloud() -> impl proptest::strategy::Strategy<Value = Vec<Vec<f64>>> {
    proptest::collection::vec(proptest::collection::vec(0.0f64..2000.0, 2), 1..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn search_respects_size_cap(points in cloud(), cap in 1usize..12) {
        let result = search(&points, Some(cap), 1.0e9, Strategy::Uneven).unwrap();
        prop_assert!(result.max_group_size <= cap);
        prop_assert!(is_contiguous(&result.assignment));
    }

    #[test]
    fn search_result_is_minimal(points in cloud(), max_distance in 50.0f64..1500.0) {
        let engine = ClusterEngine::new();
        let result = search(&points, None, max_distance, Strategy::Uneven).unwrap();
        prop_assert!(result.aggregate_distance(DistanceAggregate::WeightedMean) <= max_distance);

        let k = result.n_groups();
        if k > 1 {
            let fewer = engine.cluster_with_stats(&points, k - 1, Strategy::Uneven).unwrap();
            prop_assert!(fewer.aggregate_distance(DistanceAggregate::WeightedMean) > max_distance);
        }
    }

    #[test]
    fn hierarchy_paths_are_complete_and_consistent(points in cloud()) {
        let config = HierarchyConfig::new(vec![
            LevelConfig::position(1200.0),
            LevelConfig::position(500.0),
            LevelConfig::position(150.0).with_max_group_size(6).with_strategy(Strategy::Uneven),
        ]);
        let paths = HierarchyBuilder::new(config).build(&points, None).unwrap();

        prop_assert_eq!(paths.len(), points.len());
        prop_assert!(paths.iter().all(|p| p.len() == 3));
        let report = validate_paths(&paths, 3);
        prop_assert!(report.is_clean(), "{}", report);
    }
}
