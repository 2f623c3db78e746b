use crate::graph::Graph;
use crate::Result;
use num_traits::{CheckedAdd, PrimInt};
use std::fmt::Debug;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// Distance from the source to each vertex; `None` means unreachable
    pub distances: Vec<Option<W>>,

    /// Predecessor of each vertex in the shortest path tree; the source is
    /// its own predecessor, unreached vertices have `None`
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// The neighbor of the source on the shortest path to `target`: the
    /// vertex a router at the source would forward to. `None` when `target`
    /// is the source itself, out of range, or unreachable.
    pub fn next_hop(&self, target: usize) -> Option<usize> {
        if target >= self.predecessors.len() || target == self.source {
            return None;
        }
        self.distances[target]?;

        let mut current = target;
        for _ in 0..self.predecessors.len() {
            let pred = self.predecessors[current]?;
            if pred == self.source {
                return Some(current);
            }
            current = pred;
        }
        // Predecessor chains terminate at the source within n steps; a
        // longer walk means the table is corrupt.
        None
    }

    /// The full path source → … → `target`, or `None` if unreachable
    pub fn path(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.predecessors.len() {
            return None;
        }
        self.distances[target]?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            let pred = self.predecessors[current]?;
            path.push(pred);
            if path.len() > self.predecessors.len() {
                return None;
            }
            current = pred;
        }
        path.reverse();
        Some(path)
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: PrimInt + CheckedAdd + Debug,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
