//! Unit tests for the null-model generators.

use nullnet_test_support::tracing::record;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use super::{BARABASI_ALBERT_SEED_SIZE, NullModel, RandomGraphGenerator, chung_lu_probability};
use crate::{
    error::NetworkError,
    graph::{Graph, Network},
};

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

#[test]
fn degree_sequence_must_match_node_count() {
    let err = RandomGraphGenerator::new(3)
        .with_degree_sequence(vec![1, 1])
        .expect_err("length mismatch must be rejected");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));

    let generator = RandomGraphGenerator::new(3)
        .with_degree_sequence(Vec::new())
        .expect("an empty sequence is always accepted");
    assert!(generator.degrees().is_empty());
}

#[rstest]
#[case::negative(-0.1)]
#[case::above_one(1.5)]
#[case::nan(f64::NAN)]
fn erdos_renyi_rejects_probabilities_outside_unit_interval(mut rng: SmallRng, #[case] p: f64) {
    let err = RandomGraphGenerator::new(4)
        .erdos_renyi(p, &mut rng)
        .expect_err("probability must be rejected");
    assert!(matches!(err, NetworkError::InvalidParameter { name: "p", .. }));
}

#[rstest]
fn erdos_renyi_extremes_are_deterministic(mut rng: SmallRng) {
    let generator = RandomGraphGenerator::new(6);
    let empty = generator.erdos_renyi(0.0, &mut rng).expect("p = 0 is valid");
    let full = generator.erdos_renyi(1.0, &mut rng).expect("p = 1 is valid");

    assert_eq!(empty.node_count(), 6);
    assert_eq!(empty.edge_count(), 0);
    assert_eq!(full, Graph::complete(6));
}

#[rstest]
fn configuration_requires_a_degree_sequence(mut rng: SmallRng) {
    let err = RandomGraphGenerator::new(4)
        .configuration(&mut rng)
        .expect_err("missing sequence must be rejected");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));
}

#[rstest]
fn configuration_rejects_odd_stub_counts(mut rng: SmallRng) {
    let err = RandomGraphGenerator::from_degree_sequence(vec![1, 2, 2])
        .configuration(&mut rng)
        .expect_err("odd stub count must be rejected");
    assert!(matches!(err, NetworkError::InvalidParameter { name: "degrees", .. }));
}

#[rstest]
fn configuration_never_exceeds_target_degrees(mut rng: SmallRng) {
    let degrees = vec![3, 3, 2, 2, 2, 1, 1, 0];
    let generator = RandomGraphGenerator::from_degree_sequence(degrees.clone());
    for _ in 0..20 {
        let graph = generator.configuration(&mut rng).expect("sequence is valid");
        assert_eq!(graph.node_count(), degrees.len());
        for (node, &target) in degrees.iter().enumerate() {
            assert!(graph.degree(node) <= target);
        }
    }
}

#[rstest]
fn chung_lu_rejects_zero_total_degree(mut rng: SmallRng) {
    let err = RandomGraphGenerator::from_degree_sequence(vec![0, 0, 0])
        .chung_lu(&mut rng)
        .expect_err("zero total degree must be rejected");
    assert!(matches!(err, NetworkError::InvalidInput { .. }));
}

#[rstest]
#[case::plain(1, 2, 8, 2, 0.25)]
#[case::rescaled(5, 5, 10, 5, 1.0)]
#[case::zero_degree(0, 7, 10, 7, 0.0)]
#[case::zero_total(3, 3, 0, 3, 0.0)]
fn chung_lu_probability_cases(
    #[case] left: usize,
    #[case] right: usize,
    #[case] total: usize,
    #[case] max_degree: usize,
    #[case] expected: f64,
) {
    assert_eq!(chung_lu_probability(left, right, total, max_degree), expected);
}

#[rstest]
#[case::zero(0)]
#[case::too_many(BARABASI_ALBERT_SEED_SIZE + 1)]
fn barabasi_albert_rejects_out_of_range_m(mut rng: SmallRng, #[case] m: usize) {
    let err = RandomGraphGenerator::new(20)
        .barabasi_albert(m, &mut rng)
        .expect_err("m must be rejected");
    assert!(matches!(err, NetworkError::InvalidParameter { name: "m", .. }));
}

#[rstest]
fn barabasi_albert_needs_the_seed_clique(mut rng: SmallRng) {
    let err = RandomGraphGenerator::new(4)
        .barabasi_albert(2, &mut rng)
        .expect_err("four nodes are too few");
    assert!(matches!(
        err,
        NetworkError::InsufficientNodes {
            required: 5,
            actual: 4,
            ..
        }
    ));
}

#[rstest]
#[case::seed_only(5, 3)]
#[case::single_link(30, 1)]
#[case::maximal_m(40, 5)]
fn barabasi_albert_edge_count(mut rng: SmallRng, #[case] nodes: usize, #[case] m: usize) {
    let graph = RandomGraphGenerator::new(nodes)
        .barabasi_albert(m, &mut rng)
        .expect("parameters are valid");

    assert_eq!(graph.node_count(), nodes);
    assert_eq!(graph.edge_count(), 10 + m * (nodes - 5));
    for left in 0..5 {
        for right in (left + 1)..5 {
            assert!(graph.contains_edge(&left, &right));
        }
    }
    assert!(graph.is_connected());
}

#[test]
fn generate_matches_the_direct_call() {
    let generator = RandomGraphGenerator::from_degree_sequence(vec![2, 3, 1, 2, 2, 2]);
    let models = [
        NullModel::ErdosRenyi { p: 0.4 },
        NullModel::Configuration,
        NullModel::ChungLu,
        NullModel::BarabasiAlbert { m: 2 },
    ];
    for model in models {
        let mut left = SmallRng::seed_from_u64(11);
        let mut right = SmallRng::seed_from_u64(11);
        let dispatched = generator.generate(model, &mut left).expect("model is valid");
        let direct = match model {
            NullModel::ErdosRenyi { p } => generator.erdos_renyi(p, &mut right),
            NullModel::Configuration => generator.configuration(&mut right),
            NullModel::ChungLu => generator.chung_lu(&mut right),
            NullModel::BarabasiAlbert { m } => generator.barabasi_albert(m, &mut right),
        }
        .expect("model is valid");
        assert_eq!(dispatched, direct, "{model}");
    }
}

#[rstest]
#[case::erdos_renyi(NullModel::ErdosRenyi { p: 0.5 })]
#[case::configuration(NullModel::Configuration)]
#[case::chung_lu(NullModel::ChungLu)]
#[case::barabasi_albert(NullModel::BarabasiAlbert { m: 1 })]
fn direct_model_calls_report_the_generated_graph(mut rng: SmallRng, #[case] model: NullModel) {
    let generator = RandomGraphGenerator::from_degree_sequence(vec![2, 3, 1, 2, 2, 2]);
    let (graph, layer) = record(|| {
        match model {
            NullModel::ErdosRenyi { p } => generator.erdos_renyi(p, &mut rng),
            NullModel::Configuration => generator.configuration(&mut rng),
            NullModel::ChungLu => generator.chung_lu(&mut rng),
            NullModel::BarabasiAlbert { m } => generator.barabasi_albert(m, &mut rng),
        }
        .expect("model is valid")
    });

    let events = layer.events_with_message("generated graph");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("model"), Some(model.name()));
    let edges = graph.edge_count().to_string();
    assert_eq!(events[0].field("edges"), Some(edges.as_str()));
}

#[rstest]
fn generate_reports_each_graph_once(mut rng: SmallRng) {
    let generator = RandomGraphGenerator::new(6);
    let ((), layer) = record(|| {
        for _ in 0..3 {
            generator
                .generate(NullModel::ErdosRenyi { p: 0.3 }, &mut rng)
                .expect("p is valid");
        }
    });
    assert_eq!(layer.events_with_message("generated graph").len(), 3);
}

#[test]
fn model_names_are_stable() {
    assert_eq!(NullModel::ErdosRenyi { p: 0.1 }.name(), "erdos_renyi");
    assert_eq!(NullModel::Configuration.name(), "configuration");
    assert_eq!(NullModel::ChungLu.name(), "chung_lu");
    assert_eq!(NullModel::BarabasiAlbert { m: 1 }.name(), "barabasi_albert");
}
