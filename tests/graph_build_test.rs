use follower_graph::graph::chunk_bounds;
use follower_graph::{
    build_parallel, delimited_rows, DelimitedRow, Edge, FollowGraph, GraphError, NodeId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_edges(seed: u64, count: usize, max_id: NodeId) -> Vec<(NodeId, NodeId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen_range(1..=max_id), rng.gen_range(1..=max_id)))
        .collect()
}

#[test]
fn test_parallel_build_independent_of_worker_count() {
    // Small id space so duplicates and self-loops occur
    let edges = random_edges(42, 2_000, 150);
    let sequential = FollowGraph::build(&edges).unwrap();

    for workers in [1, 2, 3, 4, 7, 16, 64] {
        let parallel = build_parallel(&edges, workers).unwrap();
        assert_eq!(parallel, sequential, "mismatch with {} workers", workers);
    }
}

#[test]
fn test_more_workers_than_edges() {
    let edges = vec![(1u64, 2u64), (2, 3)];
    let graph = build_parallel(&edges, 32).unwrap();
    assert_eq!(graph, FollowGraph::build(&edges).unwrap());
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn test_merge_order_does_not_matter() {
    let edges = random_edges(7, 900, 60);
    let whole = FollowGraph::build(&edges).unwrap();

    let parts: Vec<FollowGraph> = chunk_bounds(edges.len(), 5)
        .into_iter()
        .map(|range| FollowGraph::build(&edges[range]).unwrap())
        .collect();

    // Forward
    let mut forward = FollowGraph::default();
    for part in parts.iter().cloned() {
        forward.merge(part);
    }

    // Reverse
    let mut reverse = FollowGraph::default();
    for part in parts.iter().rev().cloned() {
        reverse.merge(part);
    }

    // Pairwise tree: (p0 + p1) + ((p2 + p3) + p4)
    let mut left = parts[0].clone();
    left.merge(parts[1].clone());
    let mut right = parts[2].clone();
    right.merge(parts[3].clone());
    right.merge(parts[4].clone());
    left.merge(right);

    assert_eq!(forward, whole);
    assert_eq!(reverse, whole);
    assert_eq!(left, whole);

    // Merging a graph into itself changes nothing
    let mut twice = whole.clone();
    twice.merge(whole.clone());
    assert_eq!(twice, whole);
}

#[test]
fn test_edge_count_is_distinct_edges() {
    let edges = random_edges(11, 1_500, 40);
    let graph = build_parallel(&edges, 4).unwrap();

    let mut distinct: Vec<Edge> = edges.iter().map(|&e| Edge::from(e)).collect();
    distinct.sort_unstable();
    distinct.dedup();

    assert_eq!(graph.edge_count(), distinct.len());
    assert_eq!(graph.edges(), distinct);

    let out_total: usize = graph.nodes().iter().map(|&n| graph.out_degree(n)).sum();
    let in_total: usize = graph.nodes().iter().map(|&n| graph.in_degree(n)).sum();
    assert_eq!(out_total, distinct.len());
    assert_eq!(in_total, distinct.len());
}

#[test]
fn test_delimited_rows() {
    let text = "1,2\n2, 3\n\n3 ,1\n";
    let rows: Vec<DelimitedRow> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| DelimitedRow::new(line, ','))
        .collect();

    let graph = build_parallel(&rows, 2).unwrap();
    assert_eq!(
        graph.edges(),
        vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]
    );

    let tabbed = [DelimitedRow::new("10\t20", '\t')];
    let graph = build_parallel(&tabbed, 1).unwrap();
    assert_eq!(graph.edges(), vec![Edge::new(10, 20)]);
}

#[test]
fn test_errors_report_file_lines() {
    // Blank lines 2 and 4 must not shift the reported line of the bad row
    let text = "1,2\n\n2,3\n\n3;1\n4,1\n";
    let rows = delimited_rows(text, ',');
    assert_eq!(rows.len(), 4);

    for workers in [1, 2, 4] {
        match build_parallel(&rows, workers) {
            Err(GraphError::MalformedInput { row, .. }) => assert_eq!(row, 5),
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    let fixed = text.replace("3;1", "3,1");
    let graph = build_parallel(&delimited_rows(&fixed, ','), 2).unwrap();
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_malformed_rows_are_rejected() {
    let cases = [
        ("1,2,3", 1usize),
        ("1", 1),
        ("a,2", 1),
        ("1,", 1),
        ("-1,2", 1),
    ];
    for (bad, expected_row) in cases {
        let rows = [
            DelimitedRow::new("1,2", ','),
            DelimitedRow::new(bad, ','),
            DelimitedRow::new("2,1", ','),
        ];
        match build_parallel(&rows, 3) {
            Err(GraphError::MalformedInput { row, .. }) => {
                assert_eq!(row, expected_row, "row for {:?}", bad)
            }
            other => panic!("expected malformed input for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_first_malformed_chunk_wins() {
    let mut rows: Vec<(String, String)> = (0..40)
        .map(|i| (i.to_string(), (i + 1).to_string()))
        .collect();
    rows[35].1 = "bad".into();
    rows[12].0 = "".into();

    for workers in [1, 2, 4, 8] {
        match build_parallel(&rows, workers) {
            Err(GraphError::MalformedInput { row, .. }) => assert_eq!(row, 12),
            other => panic!("expected malformed input, got {:?}", other),
        }
    }
}

#[test]
fn test_empty_and_worker_errors() {
    let none: Vec<(NodeId, NodeId)> = Vec::new();
    assert_eq!(build_parallel(&none, 4), Err(GraphError::EmptyGraph));
    assert_eq!(
        build_parallel(&[(1u64, 2u64)], 0),
        Err(GraphError::InvalidWorkerCount)
    );
}

#[test]
fn test_edges_of_and_ego() {
    let graph = build_parallel(
        &[(1u64, 2u64), (2, 1), (3, 1), (1, 4), (4, 5), (5, 1)],
        2,
    )
    .unwrap();

    let edges = graph.edges_of(1);
    assert_eq!(edges.outgoing, vec![Edge::new(1, 2), Edge::new(1, 4)]);
    assert_eq!(
        edges.incoming,
        vec![Edge::new(2, 1), Edge::new(3, 1), Edge::new(5, 1)]
    );

    // Unknown and leaf nodes
    assert!(graph.edges_of(1_000).is_empty());
    let leaf = graph.edges_of(3);
    assert!(leaf.incoming.is_empty());
    assert_eq!(leaf.outgoing, vec![Edge::new(3, 1)]);

    let ego = graph.ego_network(1);
    assert_eq!(ego.node_count(), 5);
    assert_eq!(ego.edge_count(), 5);
    // 4 -> 5 does not touch node 1
    assert_eq!(ego.out_degree(4), 0);
}

#[test]
fn test_induced_subgraph_keeps_internal_edges() {
    let graph = FollowGraph::build(vec![(1u64, 2u64), (2, 3), (3, 1), (3, 4)]).unwrap();
    let sub = graph.induced_subgraph([1, 2, 4, 99]);

    assert_eq!(sub.nodes(), vec![1, 2, 4]);
    assert_eq!(sub.edges(), vec![Edge::new(1, 2)]);
    assert!(sub.edges_of(4).is_empty());
}
