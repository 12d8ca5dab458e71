mod common;

use std::collections::BTreeMap;

use nullnet_core::{
    CentralityEngine, Graph, Network, NullModel, RandomGraphGenerator, average_centrality,
    ensemble_average, global_metrics, largest_connected_component,
};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use common::{assert_close, path_graph, two_triangles};

#[rstest]
fn single_edge_has_unit_path_statistics() {
    let mut graph = Graph::new();
    graph.add_edge("u", "v");
    let metrics = global_metrics(&graph).expect("two nodes suffice");

    assert_close(metrics.clustering, 0.0);
    assert_close(metrics.average_path_length, 1.0);
    assert_close(metrics.diameter, 1.0);
}

#[rstest]
fn lcc_of_a_connected_graph_equals_the_input() {
    let graph = path_graph(7);
    let component = largest_connected_component(&graph).expect("path is simple");
    assert_eq!(component, graph);
    assert_eq!(
        largest_connected_component(&component).expect("component is simple"),
        graph
    );
}

#[rstest]
fn lcc_leaves_the_input_untouched() {
    let mut graph = two_triangles();
    graph.add_edge(5, 6);
    let before = graph.clone();

    let component = largest_connected_component(&graph).expect("graph is simple");
    assert_eq!(component.labels(), &[3, 4, 5, 6]);
    assert_eq!(graph, before);
}

#[rstest]
fn nan_entries_are_excluded_not_zero_filled() {
    let trials = vec![
        BTreeMap::from([("CC", 0.2), ("APL", f64::NAN)]),
        BTreeMap::from([("CC", 0.4), ("APL", 3.0)]),
    ];
    let average = ensemble_average(&trials).expect("trials have keys");

    assert_eq!(average.keys(), &["APL", "CC"]);
    assert_close(average.get(&"CC").unwrap_or_default(), 0.3);
    assert_close(average.get(&"APL").unwrap_or_default(), 3.0);
}

#[rstest]
fn ensemble_loop_over_a_null_model() {
    let generator = RandomGraphGenerator::new(30);
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut centralities = Vec::new();
    let mut metrics = Vec::new();
    for _ in 0..10 {
        let graph = generator
            .generate(NullModel::BarabasiAlbert { m: 2 }, &mut rng)
            .expect("parameters are valid");
        let engine = CentralityEngine::new(&graph).expect("generated graph has edges");
        centralities.push(engine.betweenness().expect("thirty nodes suffice"));
        metrics.push(global_metrics(&graph).expect("graph has nodes"));
    }

    let betweenness = average_centrality(&centralities).expect("trials have nodes");
    assert_eq!(betweenness.len(), 30);
    assert_eq!(betweenness.keys().first(), Some(&0));
    // Seed nodes accumulate the most attachments.
    let seed_mean: f64 = (0..5)
        .filter_map(|node| betweenness.get(&node))
        .sum::<f64>()
        / 5.0;
    let late_mean: f64 = (25..30)
        .filter_map(|node| betweenness.get(&node))
        .sum::<f64>()
        / 5.0;
    assert!(seed_mean > late_mean);

    let global = ensemble_average(&metrics).expect("metrics have keys");
    assert_eq!(global.keys(), &["APL", "CC", "DIAM"]);
    assert!(global.values().iter().all(|value| value.is_finite()));
    assert_eq!(global.samples(&"APL"), Some(10));
}

#[rstest]
fn disconnected_trials_still_contribute_clustering() {
    let graph = two_triangles();
    let metrics = global_metrics(&graph).expect("graph has nodes");
    assert_close(metrics.clustering, 1.0);
    assert_close(metrics.average_path_length, 1.0);
    assert_eq!(graph.node_count(), 6);
}
