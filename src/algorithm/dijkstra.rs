use num_traits::{CheckedAdd, PrimInt};
use std::fmt::Debug;

use crate::algorithm::distance::DistanceTable;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::Graph;
use crate::{Error, Result};

/// Classic binary-heap Dijkstra.
///
/// Kept alongside the sub-Dijkstra engine as the correctness oracle: on any
/// graph with non-negative weights both must produce identical distances.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: PrimInt + CheckedAdd + Debug,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let mut table = DistanceTable::new(graph.vertex_count(), source);
        let mut queue = BinaryHeapWrapper::new();
        queue.push(source, W::zero());

        while let Some((u, key)) = queue.pop() {
            // Stale entry: a shorter path to u was settled meanwhile
            if key > table.distance(u) {
                continue;
            }

            for (v, weight) in graph.outgoing_edges(u) {
                let Some(candidate) = table.candidate(u, weight) else {
                    continue;
                };
                if table.improve(v, candidate, u) {
                    queue.push(v, candidate);
                }
            }
        }

        Ok(table.into_result())
    }
}
