//! Sub-Dijkstra single-source shortest paths.
//!
//! This library implements the deterministic O(m log^(2/3) n) SSSP algorithm
//! from "Breaking the Sorting Barrier for Directed Single-Source Shortest
//! Paths" by Duan et al. (2025), for directed graphs with non-negative
//! integer edge weights.
//!
//! The engine is the recursive bounded multi-source procedure ([`Bmssp`])
//! composed of a pivot-reduction pass, a truncated-Dijkstra base case, and
//! the two-sequence block heap of Lemma 3.3
//! ([`data_structures::BlockHeap`]). A classic Dijkstra ([`Dijkstra`]) is
//! included as the baseline oracle.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    bmssp::Bmssp, dijkstra::Dijkstra, params::SolveParams, ShortestPathAlgorithm,
    ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight on edge from {0} to {1}")]
    NegativeWeight(usize, usize),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
