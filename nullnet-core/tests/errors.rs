use nullnet_core::{NetworkError, NetworkErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    NetworkError::InvalidInput { reason: "graph has no nodes".to_owned() },
    NetworkErrorCode::InvalidInput,
    "NETWORK_INVALID_INPUT",
)]
#[case(
    NetworkError::InvalidParameter { name: "p", reason: "must lie in [0, 1]".to_owned() },
    NetworkErrorCode::InvalidParameter,
    "NETWORK_INVALID_PARAMETER",
)]
#[case(
    NetworkError::InsufficientNodes { statistic: "betweenness centrality", required: 3, actual: 2 },
    NetworkErrorCode::InsufficientNodes,
    "NETWORK_INSUFFICIENT_NODES",
)]
fn returns_expected_network_code(
    #[case] error: NetworkError,
    #[case] expected: NetworkErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
fn messages_name_the_offending_input() {
    let error = NetworkError::InsufficientNodes {
        statistic: "degree centrality",
        required: 2,
        actual: 1,
    };
    assert_eq!(
        error.to_string(),
        "degree centrality requires at least 2 nodes but the graph has 1"
    );

    let error = NetworkError::InvalidParameter {
        name: "m",
        reason: "edges per new node must lie in 1..=5, got 9".to_owned(),
    };
    assert_eq!(
        error.to_string(),
        "parameter `m` is invalid: edges per new node must lie in 1..=5, got 9"
    );
}
