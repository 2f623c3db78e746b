use num_traits::{CheckedAdd, PrimInt};
use std::fmt::Debug;

/// Trait representing a weighted directed graph with dense integer vertex
/// ids in `[0, n)`.
///
/// The solve only ever reads: once constructed, a graph is frozen for the
/// duration of every solve that borrows it. Recursive callers may hold
/// several live `outgoing_edges` iterators over the same vertex.
pub trait Graph<W>: Debug
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges `(target, weight)` of a
    /// vertex, in arbitrary but stable order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool;
}
