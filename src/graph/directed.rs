use crate::graph::traits::Graph;
use crate::{Error, Result};
use num_traits::{CheckedAdd, PrimInt};
use std::fmt::Debug;

/// A directed graph over dense vertex ids `[0, n)` using adjacency lists.
///
/// Parallel edges and self-loops are permitted. Edges can only be added,
/// never removed; a solve borrows the graph immutably, so the graph is
/// frozen for as long as any solve is running.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// Outgoing edges for each vertex: `adjacency[u]` holds `(v, w)` pairs
    adjacency: Vec<Vec<(usize, W)>>,

    /// Total number of edges
    edge_count: usize,
}

impl<W> DirectedGraph<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// Creates a new graph with `vertices` vertices and no edges
    pub fn new(vertices: usize) -> Self {
        DirectedGraph {
            adjacency: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Adds a directed edge from `from` to `to` with the given non-negative
    /// weight. Parallel edges and self-loops are accepted.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        if !self.has_vertex(from) {
            return Err(Error::InvalidVertex(from));
        }
        if !self.has_vertex(to) {
            return Err(Error::InvalidVertex(to));
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight(from, to));
        }
        self.adjacency[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.adjacency.len()
    }
}
