use log::debug;
use num_traits::{CheckedAdd, PrimInt};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::algorithm::distance::DistanceTable;
use crate::algorithm::params::SolveParams;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::{BinaryHeapWrapper, BlockHeap};
use crate::graph::Graph;
use crate::{Error, Result};

/// The bounded multi-source shortest path engine from "Breaking the Sorting
/// Barrier for Directed Single-Source Shortest Paths" (Duan et al., 2025).
///
/// A solve runs `levels` nested rounds of: reduce the frontier to pivots
/// whose shortest-path subtrees are large, drive the pivots through a block
/// heap in batches of the M smallest, and recurse on each batch under the
/// separating bound the heap reports. Level 0 is a Dijkstra truncated at
/// distance bound B and count bound k.
#[derive(Debug)]
pub struct Bmssp<W, G>
where
    W: PrimInt + CheckedAdd + Debug,
    G: Graph<W>,
{
    params: SolveParams,

    _weight_marker: PhantomData<W>,
    _graph_marker: PhantomData<G>,
}

/// Result of one recursive call: the refined bound B' and the set U of
/// vertices whose distances became final during the call.
#[derive(Debug)]
pub struct BmsspOutcome<W>
where
    W: PrimInt + Debug,
{
    pub new_bound: W,
    pub completed: Vec<usize>,
}

impl<W, G> Bmssp<W, G>
where
    W: PrimInt + CheckedAdd + Debug,
    G: Graph<W>,
{
    /// Creates an engine with parameters derived from the vertex count
    pub fn new(vertex_count: usize) -> Self {
        Self::with_params(SolveParams::for_vertex_count(vertex_count))
    }

    /// Creates an engine with explicit parameters
    pub fn with_params(params: SolveParams) -> Self {
        Bmssp {
            params,
            _weight_marker: PhantomData,
            _graph_marker: PhantomData,
        }
    }

    pub fn params(&self) -> SolveParams {
        self.params
    }

    /// Computes shortest distances and predecessors from `source`
    pub fn solve(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        debug!(
            "bmssp solve: n={} m={} params={:?}",
            graph.vertex_count(),
            graph.edge_count(),
            self.params
        );

        let mut table = DistanceTable::new(graph.vertex_count(), source);
        let outcome = self.execute(
            graph,
            self.params.levels,
            W::max_value(),
            &[source],
            &mut table,
        );
        debug!(
            "bmssp solve done: |U|={} final bound {:?}",
            outcome.completed.len(),
            outcome.new_bound
        );
        Ok(table.into_result())
    }

    /// BMSSP(level, B, S). Every vertex of `frontier` must be complete with
    /// a distance below `bound`.
    pub fn execute(
        &self,
        graph: &G,
        level: usize,
        bound: W,
        frontier: &[usize],
        table: &mut DistanceTable<W>,
    ) -> BmsspOutcome<W> {
        if frontier.is_empty() {
            return BmsspOutcome {
                new_bound: bound,
                completed: Vec::new(),
            };
        }
        if level == 0 {
            return self.base_case(graph, bound, frontier, table);
        }

        let (pivots, reached) = self.find_pivots(graph, bound, frontier, table);

        let mut heap = BlockHeap::new(self.params.block_size(level), bound);
        for &pivot in &pivots {
            heap.insert(pivot, table.distance(pivot));
        }

        // B'_0; stays the returned bound when there are no pivots at all
        let mut current_bound = pivots
            .iter()
            .map(|&p| table.distance(p))
            .min()
            .map_or(bound, |m| m.min(bound));

        let limit = self.params.completion_limit(level);
        let mut completed: Vec<usize> = Vec::new();
        let mut in_completed: HashSet<usize> = HashSet::new();

        while completed.len() < limit && !heap.is_empty() {
            let (subset, sub_bound) = heap.pull();
            let outcome = self.execute(graph, level - 1, sub_bound, &subset, table);
            current_bound = outcome.new_bound;

            for &u in &outcome.completed {
                if in_completed.insert(u) {
                    completed.push(u);
                }
            }

            // Partial execution: once the completion budget is blown the
            // call returns immediately, skipping the relax/prepend work for
            // this batch; the caller relaxes out of U itself.
            if completed.len() > limit {
                debug!(
                    "bmssp level {} partial execution: |U|={} > {}",
                    level,
                    completed.len(),
                    limit
                );
                break;
            }

            // Relax out of the newly completed set. A strict improvement
            // rewrites the table and always re-queues the target, even a
            // previously completed one whose stale entry just got fixed. A
            // tie re-queues only incomplete targets: tie re-queues of
            // finished vertices are what lets zero-weight clusters cycle
            // forever.
            let mut prepend: Vec<(usize, W)> = Vec::new();
            for &u in &outcome.completed {
                for (v, weight) in graph.outgoing_edges(u) {
                    let Some(candidate) = table.candidate(u, weight) else {
                        continue;
                    };
                    if candidate > table.distance(v) {
                        continue;
                    }
                    let improved = table.improve(v, candidate, u);
                    if candidate >= bound || (!improved && in_completed.contains(&v)) {
                        continue;
                    }
                    if candidate >= sub_bound {
                        heap.insert(v, candidate);
                    } else if candidate >= current_bound {
                        prepend.push((v, candidate));
                    }
                }
            }

            // Frontier vertices the sub-call did not finish go back in front
            for &x in &subset {
                let dx = table.distance(x);
                if dx >= current_bound && dx < sub_bound && !in_completed.contains(&x) {
                    prepend.push((x, dx));
                }
            }
            heap.batch_prepend(prepend);
        }

        // Everything the pivot search reached below the final bound is done
        for &w in &reached {
            if table.distance(w) < current_bound && in_completed.insert(w) {
                completed.push(w);
            }
        }

        BmsspOutcome {
            new_bound: current_bound,
            completed,
        }
    }

    /// BaseCase(B, {x}): Dijkstra from the single frontier vertex, truncated
    /// at distance bound `bound` and at k + 1 settled vertices.
    fn base_case(
        &self,
        graph: &G,
        bound: W,
        frontier: &[usize],
        table: &mut DistanceTable<W>,
    ) -> BmsspOutcome<W> {
        debug_assert!(frontier.len() <= 1, "base case expects a singleton frontier");
        let Some(&start) = frontier.first() else {
            return BmsspOutcome {
                new_bound: bound,
                completed: Vec::new(),
            };
        };

        let mut heap = BinaryHeapWrapper::new();
        heap.push(start, table.distance(start));

        let mut settled: Vec<usize> = Vec::new();
        let mut is_settled: HashSet<usize> = HashSet::new();

        while let Some((u, key)) = heap.pop() {
            // Outdated entry or an equal-key re-push of a settled vertex
            if key != table.distance(u) || !is_settled.insert(u) {
                continue;
            }
            settled.push(u);
            if settled.len() == self.params.k + 1 {
                break;
            }

            for (v, weight) in graph.outgoing_edges(u) {
                let Some(candidate) = table.candidate(u, weight) else {
                    continue;
                };
                if candidate < bound && candidate <= table.distance(v) {
                    table.improve(v, candidate, u);
                    heap.push(v, candidate);
                }
            }
        }

        if settled.len() <= self.params.k {
            return BmsspOutcome {
                new_bound: bound,
                completed: settled,
            };
        }

        // Truncated: split below the largest settled distance
        let cutoff = settled
            .iter()
            .map(|&v| table.distance(v))
            .max()
            .expect("settled set is non-empty");
        let below: Vec<usize> = settled
            .iter()
            .copied()
            .filter(|&v| table.distance(v) < cutoff)
            .collect();
        debug!(
            "base case truncated at {:?}: {} settled, {} below cutoff",
            cutoff,
            settled.len(),
            below.len()
        );
        if below.is_empty() {
            // Every settled vertex sits exactly at the cutoff (zero-weight
            // ties). They are final, and returning them is what lets the
            // caller make progress instead of re-queueing the same frontier.
            return BmsspOutcome {
                new_bound: cutoff,
                completed: settled,
            };
        }
        BmsspOutcome {
            new_bound: cutoff,
            completed: below,
        }
    }

    /// FindPivots(B, S): k rounds of relaxation out of S, then the roots of
    /// large shortest-path subtrees. Returns (P, W).
    fn find_pivots(
        &self,
        graph: &G,
        bound: W,
        frontier: &[usize],
        table: &mut DistanceTable<W>,
    ) -> (Vec<usize>, Vec<usize>) {
        let k = self.params.k;

        let mut reached: Vec<usize> = frontier.to_vec();
        let mut in_reached: HashSet<usize> = frontier.iter().copied().collect();
        let mut current: Vec<usize> = frontier.to_vec();

        for _ in 0..k {
            let mut next: Vec<usize> = Vec::new();
            for &u in &current {
                for (v, weight) in graph.outgoing_edges(u) {
                    let Some(candidate) = table.candidate(u, weight) else {
                        continue;
                    };
                    // `<=` so that edges tying the current distance still
                    // count for the forest; the table write stays strict
                    if candidate > table.distance(v) {
                        continue;
                    }
                    table.improve(v, candidate, u);
                    if candidate < bound && in_reached.insert(v) {
                        next.push(v);
                        reached.push(v);
                    }
                }
            }
            current = next;

            if reached.len() > k.saturating_mul(frontier.len()) {
                debug!(
                    "find_pivots early exit: |W|={} > k|S|={}",
                    reached.len(),
                    k * frontier.len()
                );
                return (frontier.to_vec(), reached);
            }
            if current.is_empty() {
                break;
            }
        }

        // Forest F of tight edges inside W, oriented by ascending
        // (distance, id) so zero-weight ties cannot form cycles
        let mut parent: HashMap<usize, usize> = HashMap::new();
        for &u in &reached {
            let du = table.distance(u);
            for (v, weight) in graph.outgoing_edges(u) {
                if !in_reached.contains(&v) || parent.contains_key(&v) {
                    continue;
                }
                let Some(candidate) = table.candidate(u, weight) else {
                    continue;
                };
                let dv = table.distance(v);
                if candidate == dv && (du, u) < (dv, v) {
                    parent.insert(v, u);
                }
            }
        }

        // Subtree sizes in one pass over W by descending (distance, id):
        // every child is processed before its parent
        let mut order = reached.clone();
        order.sort_unstable_by(|&a, &b| {
            (table.distance(b), b).cmp(&(table.distance(a), a))
        });
        let mut subtree: HashMap<usize, usize> =
            reached.iter().map(|&v| (v, 1usize)).collect();
        for &v in &order {
            let size = subtree[&v];
            if let Some(&p) = parent.get(&v) {
                *subtree.get_mut(&p).expect("parent is in W") += size;
            }
        }

        let pivots: Vec<usize> = frontier
            .iter()
            .copied()
            .filter(|x| subtree.get(x).copied().unwrap_or(0) >= k)
            .collect();
        (pivots, reached)
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Bmssp<W, G>
where
    W: PrimInt + CheckedAdd + Debug,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP (O(m log^(2/3) n))"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        self.solve(graph, source)
    }
}
