//! Unit tests for ensemble averaging.

use std::collections::{BTreeMap, HashMap};

use rstest::rstest;

use super::{
    EnsembleAggregator, average_centrality, average_degree_histogram, ensemble_average,
};
use crate::{
    centrality::CentralityEngine,
    error::NetworkError,
    global::GlobalMetrics,
    graph::Graph,
};

#[test]
fn empty_trial_list_is_rejected() {
    let records: Vec<BTreeMap<u32, f64>> = Vec::new();
    let err = ensemble_average(&records).expect_err("nothing to average");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));
}

#[test]
fn records_without_keys_are_rejected() {
    let records = vec![BTreeMap::<u32, f64>::new(), BTreeMap::new()];
    let err = ensemble_average(&records).expect_err("no keys to average");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));
}

#[test]
fn averages_cover_the_union_of_keys_in_sorted_order() {
    let records = vec![
        BTreeMap::from([("b", 2.0), ("a", 1.0)]),
        BTreeMap::from([("a", 3.0), ("c", 5.0)]),
    ];
    let average = ensemble_average(&records).expect("records have keys");

    assert_eq!(average.keys(), &["a", "b", "c"]);
    assert_eq!(average.values(), &[2.0, 2.0, 5.0]);
    assert_eq!(average.samples(&"a"), Some(2));
    assert_eq!(average.samples(&"b"), Some(1));
    assert_eq!(average.get(&"z"), None);
}

#[rstest]
#[case::none(None)]
#[case::nan(Some(f64::NAN))]
#[case::infinite(Some(f64::INFINITY))]
#[case::negative_infinite(Some(f64::NEG_INFINITY))]
fn unusable_values_are_skipped(#[case] unusable: Option<f64>) {
    let records = vec![
        HashMap::from([(1_u8, Some(4.0)), (2, unusable)]),
        HashMap::from([(1_u8, unusable), (2, Some(6.0))]),
        HashMap::from([(1_u8, Some(2.0)), (2, unusable)]),
    ];
    let average = ensemble_average(&records).expect("records have keys");

    assert_eq!(average.get(&1), Some(3.0));
    assert_eq!(average.get(&2), Some(6.0));
}

#[test]
fn keys_without_usable_values_average_to_nan() {
    let records = vec![
        HashMap::from([("x", f64::NAN), ("y", 1.0)]),
        HashMap::from([("x", f64::NAN), ("y", 1.0)]),
    ];
    let average = ensemble_average(&records).expect("records have keys");

    assert!(average.get(&"x").is_some_and(f64::is_nan));
    assert_eq!(average.samples(&"x"), Some(0));
    assert_eq!(average.len(), 2);
}

#[test]
fn identical_records_average_to_themselves() {
    let record = BTreeMap::from([(0_usize, 0.125), (1, 0.5), (2, 0.375)]);
    let records = vec![record.clone(); 7];
    let average = ensemble_average(&records).expect("records have keys");

    for (key, value) in &record {
        assert_eq!(average.get(key), Some(*value));
    }
}

#[test]
fn custom_predicate_marks_additional_values_missing() {
    let records = vec![
        BTreeMap::from([("a", 0.0), ("b", 4.0)]),
        BTreeMap::from([("a", 2.0), ("b", 0.0)]),
    ];
    let skip_zero = EnsembleAggregator::new().with_missing_predicate(|value| value == 0.0);
    let average = skip_zero.average(&records).expect("records have keys");

    assert_eq!(average.values(), &[2.0, 4.0]);
    let plain = EnsembleAggregator::default()
        .average(&records)
        .expect("records have keys");
    assert_eq!(plain.into_values(), vec![1.0, 2.0]);
}

#[test]
fn centrality_scores_average_per_node() {
    let mut star = Graph::with_nodes(4);
    for leaf in 1..4 {
        star.add_edge(0, leaf);
    }
    let mut path = Graph::with_nodes(4);
    for node in 1..4 {
        path.add_edge(node - 1, node);
    }
    let trials = vec![
        CentralityEngine::new(&star)
            .and_then(|engine| engine.degree())
            .expect("star is valid"),
        CentralityEngine::new(&path)
            .and_then(|engine| engine.degree())
            .expect("path is valid"),
    ];
    let average = average_centrality(&trials).expect("trials have nodes");

    assert_eq!(average.keys(), &[0, 1, 2, 3]);
    let expected = [
        (1.0 + 1.0 / 3.0) / 2.0,
        (1.0 / 3.0 + 2.0 / 3.0) / 2.0,
        (1.0 / 3.0 + 2.0 / 3.0) / 2.0,
        (1.0 / 3.0 + 1.0 / 3.0) / 2.0,
    ];
    for ((_, actual), expected) in average.iter().zip(expected) {
        assert!((actual - expected).abs() < 1e-12);
    }
}

#[test]
fn global_metrics_average_by_statistic() {
    let trials = [
        GlobalMetrics {
            clustering: 0.2,
            average_path_length: 2.0,
            diameter: 4.0,
        },
        GlobalMetrics {
            clustering: 0.4,
            average_path_length: f64::NAN,
            diameter: f64::NAN,
        },
    ];
    let average = ensemble_average(&trials).expect("metrics have keys");

    assert_eq!(average.keys(), &["APL", "CC", "DIAM"]);
    assert_eq!(average.get(&"APL"), Some(2.0));
    assert_eq!(average.samples(&"DIAM"), Some(1));
    assert!(average.get(&"CC").is_some_and(|cc| (cc - 0.3).abs() < 1e-12));
}

#[test]
fn degree_histogram_requires_trials() {
    let lists: Vec<Vec<usize>> = Vec::new();
    let err = average_degree_histogram(&lists, 3).expect_err("no trials");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));
}

#[test]
fn degree_histogram_ignores_out_of_range_degrees() {
    let histogram = average_degree_histogram(&[vec![0_usize, 1, 9], vec![7, 8]], 1)
        .expect("trials are present");
    // The second trial has no degree in range and contributes zeros.
    assert_eq!(histogram, vec![0.25, 0.25]);
}

#[test]
fn degree_histogram_bins_sum_to_one_when_every_trial_is_in_range() {
    let lists = [vec![1_usize, 2, 2, 3], vec![3, 3, 1], vec![2]];
    let histogram = average_degree_histogram(&lists, 3).expect("trials are present");
    let total: f64 = histogram.iter().sum();
    assert_eq!(histogram.len(), 4);
    assert!((total - 1.0).abs() < 1e-12);
}
