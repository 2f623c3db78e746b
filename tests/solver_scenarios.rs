use bmssp::graph::Graph;
use bmssp::{Bmssp, Dijkstra, DirectedGraph, ShortestPathAlgorithm};

fn build(n: usize, edges: &[(usize, usize, i64)]) -> DirectedGraph<i64> {
    let mut g = DirectedGraph::new(n);
    for &(u, v, w) in edges {
        g.add_edge(u, v, w).unwrap();
    }
    g
}

fn solve(g: &DirectedGraph<i64>, source: usize) -> bmssp::ShortestPathResult<i64> {
    let engine: Bmssp<i64, _> = Bmssp::new(g.vertex_count());
    engine.compute_shortest_paths(g, source).unwrap()
}

#[test]
fn textbook_five_vertex_graph() {
    let g = build(5, &[(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)]);
    let result = solve(&g, 0);

    assert_eq!(
        result.distances,
        vec![Some(0), Some(3), Some(1), Some(4), None]
    );
    assert_eq!(
        result.predecessors,
        vec![Some(0), Some(2), Some(0), Some(1), None]
    );

    assert_eq!(result.next_hop(0), None);
    assert_eq!(result.next_hop(1), Some(2));
    assert_eq!(result.next_hop(3), Some(2));
    assert_eq!(result.next_hop(4), None);
    assert_eq!(result.path(3), Some(vec![0, 2, 1, 3]));
}

#[test]
fn path_graph_distances_are_indices() {
    let edges: Vec<(usize, usize, i64)> = (0..100).map(|i| (i, i + 1, 1)).collect();
    let g = build(101, &edges);
    let result = solve(&g, 0);

    for i in 0..101 {
        assert_eq!(result.distances[i], Some(i as i64), "vertex {i}");
    }
    assert_eq!(result.path(100).unwrap().len(), 101);
}

#[test]
fn grid_distances_are_manhattan() {
    let side = 10usize;
    let id = |r: usize, c: usize| r * side + c;
    let mut g: DirectedGraph<i64> = DirectedGraph::new(side * side);
    for r in 0..side {
        for c in 0..side {
            if r + 1 < side {
                g.add_edge(id(r, c), id(r + 1, c), 2).unwrap();
                g.add_edge(id(r + 1, c), id(r, c), 2).unwrap();
            }
            if c + 1 < side {
                g.add_edge(id(r, c), id(r, c + 1), 2).unwrap();
                g.add_edge(id(r, c + 1), id(r, c), 2).unwrap();
            }
        }
    }

    let result = solve(&g, 0);
    for r in 0..side {
        for c in 0..side {
            assert_eq!(
                result.distances[id(r, c)],
                Some(2 * (r + c) as i64),
                "cell ({r}, {c})"
            );
        }
    }
}

#[test]
fn equal_length_paths_pick_either_predecessor() {
    let g = build(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
    let result = solve(&g, 0);

    assert_eq!(
        result.distances,
        vec![Some(0), Some(1), Some(1), Some(2)]
    );
    let pred = result.predecessors[3].unwrap();
    assert!(pred == 1 || pred == 2);
}

#[test]
fn disconnected_component_stays_unreached() {
    let g = build(4, &[(0, 1, 1), (2, 3, 1)]);
    let result = solve(&g, 0);

    assert_eq!(result.distances, vec![Some(0), Some(1), None, None]);
    assert_eq!(result.predecessors[2], None);
    assert_eq!(result.predecessors[3], None);
    assert_eq!(result.next_hop(3), None);
}

#[test]
fn single_vertex_graph() {
    let g: DirectedGraph<i64> = DirectedGraph::new(1);
    let result = solve(&g, 0);
    assert_eq!(result.distances, vec![Some(0)]);
    assert_eq!(result.predecessors, vec![Some(0)]);
}

#[test]
fn parallel_edges_use_the_lighter_one() {
    let g = build(2, &[(0, 1, 9), (0, 1, 3)]);
    let result = solve(&g, 0);
    assert_eq!(result.distances[1], Some(3));
}

#[test]
fn self_loop_on_source_is_harmless() {
    let g = build(2, &[(0, 0, 5), (0, 1, 2)]);
    let result = solve(&g, 0);
    assert_eq!(result.distances, vec![Some(0), Some(2)]);
    assert_eq!(result.predecessors[0], Some(0));
}

#[test]
fn zero_weight_edges_produce_equal_distances() {
    let g = build(
        4,
        &[(0, 1, 0), (1, 2, 0), (2, 3, 4), (0, 3, 5)],
    );
    let result = solve(&g, 0);
    assert_eq!(
        result.distances,
        vec![Some(0), Some(0), Some(0), Some(4)]
    );
}

// A cluster of vertices all at the same distance used to be the worst case
// for the truncated base case; the solve must still terminate and finish
// everything.
#[test]
fn zero_weight_star_and_cycle_settle() {
    let star = build(
        7,
        &[(0, 1, 0), (0, 2, 0), (0, 3, 0), (0, 4, 0), (0, 5, 0), (1, 6, 3)],
    );
    let result = solve(&star, 0);
    assert_eq!(
        result.distances,
        vec![Some(0), Some(0), Some(0), Some(0), Some(0), Some(0), Some(3)]
    );

    let cycle = build(4, &[(0, 1, 0), (1, 2, 0), (2, 0, 0), (2, 3, 1)]);
    let result = solve(&cycle, 0);
    assert_eq!(
        result.distances,
        vec![Some(0), Some(0), Some(0), Some(1)]
    );
}

#[test]
fn bmssp_matches_dijkstra_on_every_scenario() {
    let scenarios: Vec<(usize, Vec<(usize, usize, i64)>)> = vec![
        (5, vec![(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)]),
        (4, vec![(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]),
        (4, vec![(0, 1, 1), (2, 3, 1)]),
        (2, vec![(0, 1, 9), (0, 1, 3)]),
        (4, vec![(0, 1, 0), (1, 2, 0), (2, 3, 4), (0, 3, 5)]),
    ];

    for (n, edges) in scenarios {
        let g = build(n, &edges);
        let fast = solve(&g, 0);
        let oracle = Dijkstra::new().compute_shortest_paths(&g, 0).unwrap();
        assert_eq!(fast.distances, oracle.distances, "graph on {n} vertices");
    }
}

#[test]
fn solving_twice_is_idempotent() {
    let g = build(5, &[(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)]);
    let first = solve(&g, 0);
    let second = solve(&g, 0);
    assert_eq!(first.distances, second.distances);
}

#[test]
fn adding_an_edge_never_increases_distances() {
    let edges = vec![(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)];
    let g = build(5, &edges);
    let before = solve(&g, 0);

    let mut extended = edges.clone();
    extended.push((0, 4, 50));
    extended.push((2, 3, 1));
    let g2 = build(5, &extended);
    let after = solve(&g2, 0);

    for v in 0..5 {
        match (before.distances[v], after.distances[v]) {
            (Some(old), Some(new)) => assert!(new <= old, "vertex {v}"),
            (Some(_), None) => panic!("vertex {v} became unreachable"),
            _ => {}
        }
    }
}

#[test]
fn source_out_of_range_is_rejected() {
    let g: DirectedGraph<i64> = DirectedGraph::new(3);
    let engine: Bmssp<i64, _> = Bmssp::new(3);
    assert!(matches!(
        engine.compute_shortest_paths(&g, 3),
        Err(bmssp::Error::SourceNotFound)
    ));
}
