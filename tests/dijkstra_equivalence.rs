use bmssp::graph::Graph;
use bmssp::{Bmssp, Dijkstra, DirectedGraph, ShortestPathAlgorithm, ShortestPathResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(
    rng: &mut StdRng,
    n: usize,
    avg_degree: usize,
    max_weight: i64,
) -> DirectedGraph<i64> {
    let mut g = DirectedGraph::new(n);
    for u in 0..n {
        for _ in 0..avg_degree {
            let v = rng.gen_range(0..n);
            let w = rng.gen_range(0..=max_weight);
            g.add_edge(u, v, w).unwrap();
        }
    }
    g
}

fn assert_same_distances(g: &DirectedGraph<i64>, source: usize, context: &str) {
    let fast: Bmssp<i64, _> = Bmssp::new(g.vertex_count());
    let got = fast.compute_shortest_paths(g, source).unwrap();
    let want = Dijkstra::new().compute_shortest_paths(g, source).unwrap();
    assert_eq!(got.distances, want.distances, "{context}");
}

#[test]
fn random_sparse_graphs_match_dijkstra() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = random_graph(&mut rng, 200, 4, 20);
        assert_same_distances(&g, 0, &format!("seed {seed}"));
    }
}

#[test]
fn random_graphs_with_zero_weights_match_dijkstra() {
    for seed in 100..106 {
        let mut rng = StdRng::seed_from_u64(seed);
        // max weight 2 makes zero-weight ties common
        let g = random_graph(&mut rng, 150, 5, 2);
        assert_same_distances(&g, 0, &format!("seed {seed}"));
    }
}

#[test]
fn random_denser_graph_matches_dijkstra() {
    let mut rng = StdRng::seed_from_u64(7);
    let g = random_graph(&mut rng, 400, 12, 1_000);
    assert_same_distances(&g, 0, "dense");
}

#[test]
fn larger_sparse_graph_matches_dijkstra() {
    let mut rng = StdRng::seed_from_u64(42);
    let g = random_graph(&mut rng, 2_000, 3, 100);
    assert_same_distances(&g, 17, "large sparse");
}

#[test]
fn huge_weights_overflow_to_unreachable_consistently() {
    // Sums along these chains leave the i64 domain; both algorithms must
    // treat the overflowing relaxation as useless rather than wrap.
    let mut g: DirectedGraph<i64> = DirectedGraph::new(4);
    g.add_edge(0, 1, i64::MAX - 1).unwrap();
    g.add_edge(1, 2, i64::MAX - 1).unwrap();
    g.add_edge(2, 3, 1).unwrap();

    let fast: Bmssp<i64, _> = Bmssp::new(4);
    let got = fast.compute_shortest_paths(&g, 0).unwrap();
    let want = Dijkstra::new().compute_shortest_paths(&g, 0).unwrap();
    assert_eq!(got.distances, want.distances);
    assert_eq!(got.distances[1], Some(i64::MAX - 1));
    assert_eq!(got.distances[2], None);
    assert_eq!(got.distances[3], None);
}

fn check_predecessor_chains(g: &DirectedGraph<i64>, result: &ShortestPathResult<i64>) {
    use bmssp::graph::Graph;

    let n = result.distances.len();
    for v in 0..n {
        let Some(dv) = result.distances[v] else {
            assert_eq!(result.predecessors[v], None, "unreached vertex {v} has a predecessor");
            continue;
        };
        if v == result.source {
            assert_eq!(result.predecessors[v], Some(v));
            continue;
        }

        let p = result.predecessors[v].expect("reached vertex must have a predecessor");
        let dp = result.distances[p].expect("predecessor must be reached");
        // some edge p -> v must realize exactly the distance difference
        assert!(
            g.outgoing_edges(p).any(|(to, w)| to == v && dp + w == dv),
            "no tight edge {p} -> {v}"
        );

        // the chain reaches the source within n steps
        let mut current = v;
        let mut steps = 0;
        while current != result.source {
            current = result.predecessors[current].unwrap();
            steps += 1;
            assert!(steps <= n, "predecessor chain from {v} does not terminate");
        }
    }
}

#[test]
fn predecessor_chains_are_tight_and_terminate() {
    for seed in [3u64, 11, 23] {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = random_graph(&mut rng, 300, 4, 10);
        let fast: Bmssp<i64, _> = Bmssp::new(300);
        let result = fast.compute_shortest_paths(&g, 0).unwrap();
        check_predecessor_chains(&g, &result);
    }
}

#[test]
fn next_hop_agrees_with_path() {
    let mut rng = StdRng::seed_from_u64(5);
    let g = random_graph(&mut rng, 120, 4, 9);
    let fast: Bmssp<i64, _> = Bmssp::new(120);
    let result = fast.compute_shortest_paths(&g, 0).unwrap();

    for target in 0..120 {
        match result.path(target) {
            Some(path) if target != 0 => {
                assert_eq!(path[0], 0);
                assert_eq!(*path.last().unwrap(), target);
                assert_eq!(result.next_hop(target), Some(path[1]));
            }
            Some(path) => assert_eq!(path, vec![0]),
            None => assert_eq!(result.next_hop(target), None),
        }
    }
}

#[test]
fn repeated_solves_agree() {
    let mut rng = StdRng::seed_from_u64(99);
    let g = random_graph(&mut rng, 250, 4, 15);
    let fast: Bmssp<i64, _> = Bmssp::new(250);
    let a = fast.compute_shortest_paths(&g, 3).unwrap();
    let b = fast.compute_shortest_paths(&g, 3).unwrap();
    assert_eq!(a.distances, b.distances);
}
