use nullnet_core::{
    Graph, Network, NullModel, RandomGraphGenerator, chung_lu_probability, correct_stub_parity,
    degree_sequence,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

fn mean_degree(graph: &Graph) -> f64 {
    2.0 * graph.edge_count() as f64 / graph.node_count() as f64
}

#[rstest]
#[case::single(1)]
#[case::small(6)]
#[case::medium(25)]
fn erdos_renyi_extremes(#[case] nodes: usize) {
    let generator = RandomGraphGenerator::new(nodes);
    let mut rng = SmallRng::seed_from_u64(3);

    let empty = generator
        .generate(NullModel::ErdosRenyi { p: 0.0 }, &mut rng)
        .expect("p = 0 is valid");
    assert_eq!(empty.node_count(), nodes);
    assert_eq!(empty.edge_count(), 0);

    let complete = generator
        .generate(NullModel::ErdosRenyi { p: 1.0 }, &mut rng)
        .expect("p = 1 is valid");
    assert_eq!(complete, Graph::complete(nodes));
}

#[rstest]
fn seeded_runs_are_reproducible() {
    let generator = RandomGraphGenerator::from_degree_sequence(vec![3, 1, 2, 2, 4, 1, 1, 2]);
    for model in [
        NullModel::ErdosRenyi { p: 0.3 },
        NullModel::Configuration,
        NullModel::ChungLu,
        NullModel::BarabasiAlbert { m: 2 },
    ] {
        let first = generator
            .generate(model, &mut SmallRng::seed_from_u64(99))
            .expect("model is valid");
        let second = generator
            .generate(model, &mut SmallRng::seed_from_u64(99))
            .expect("model is valid");
        assert_eq!(first, second, "{model}");
    }
}

#[rstest]
fn observed_sequence_feeds_the_degree_based_models() {
    let mut observed = Graph::new();
    for (left, right) in [("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("d", "e")] {
        observed.add_edge(left, right);
    }
    let degrees = correct_stub_parity(degree_sequence(&observed));
    assert_eq!(degrees, vec![3, 2, 2, 2, 1]);

    let generator = RandomGraphGenerator::new(observed.node_count())
        .with_degree_sequence(degrees)
        .expect("one degree per node");
    let mut rng = SmallRng::seed_from_u64(5);
    for model in [NullModel::Configuration, NullModel::ChungLu] {
        let graph = generator.generate(model, &mut rng).expect("model is valid");
        assert_eq!(graph.node_count(), 5);
    }
}

fn even_degree_sequence() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1_usize..=4, 40..80).prop_map(correct_stub_parity)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn configuration_mean_degree_tracks_the_target(
        degrees in even_degree_sequence(),
        seed in any::<u64>(),
    ) {
        let target = degrees.iter().sum::<usize>() as f64 / degrees.len() as f64;
        let generator = RandomGraphGenerator::from_degree_sequence(degrees);
        let mut rng = SmallRng::seed_from_u64(seed);
        let trials = 30;
        let mut realised = 0.0;
        for _ in 0..trials {
            let graph = generator.configuration(&mut rng).expect("sequence is valid");
            realised += mean_degree(&graph);
        }
        realised /= f64::from(trials);
        prop_assert!(realised <= target);
        prop_assert!((target - realised) / target < 0.1, "target {target}, realised {realised}");
    }

    #[test]
    fn chung_lu_probabilities_are_clamped(
        left in 0_usize..200,
        right in 0_usize..200,
        total in 0_usize..400,
        max_degree in 0_usize..200,
    ) {
        let probability = chung_lu_probability(left, right, total, max_degree);
        prop_assert!((0.0..=1.0).contains(&probability));
    }

    #[test]
    fn chung_lu_handles_hub_heavy_sequences(
        hubs in prop::collection::vec(20_usize..60, 1..4),
        leaves in prop::collection::vec(0_usize..3, 5..30),
        seed in any::<u64>(),
    ) {
        let mut degrees = hubs;
        degrees.extend(leaves);
        let nodes = degrees.len();
        let generator = RandomGraphGenerator::from_degree_sequence(degrees);
        let graph = generator
            .chung_lu(&mut SmallRng::seed_from_u64(seed))
            .expect("hubs give a positive total");
        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert!(graph.is_simple());
    }

    #[test]
    fn barabasi_albert_edge_count_is_exact(
        nodes in 5_usize..60,
        m in 1_usize..=5,
        seed in any::<u64>(),
    ) {
        let graph = RandomGraphGenerator::new(nodes)
            .barabasi_albert(m, &mut SmallRng::seed_from_u64(seed))
            .expect("parameters are valid");
        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert_eq!(graph.edge_count(), 10 + m * (nodes - 5));
    }
}
