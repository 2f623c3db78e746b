use log::debug;
use num_traits::{CheckedAdd, PrimInt};
use std::fmt::Debug;

/// Tentative distances and predecessors for one solve.
///
/// `W::max_value()` is the +∞ sentinel. Entries only ever decrease
/// (relaxation), so a finished solve holds final shortest distances.
#[derive(Debug)]
pub struct DistanceTable<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    dist: Vec<W>,
    pred: Vec<Option<usize>>,
    source: usize,
}

impl<W> DistanceTable<W>
where
    W: PrimInt + CheckedAdd + Debug,
{
    /// A fresh table with `dist[source] = 0`, everything else unreached
    pub fn new(vertex_count: usize, source: usize) -> Self {
        let mut dist = vec![W::max_value(); vertex_count];
        let mut pred = vec![None; vertex_count];
        dist[source] = W::zero();
        pred[source] = Some(source);
        DistanceTable { dist, pred, source }
    }

    pub fn distance(&self, vertex: usize) -> W {
        self.dist[vertex]
    }

    pub fn predecessor(&self, vertex: usize) -> Option<usize> {
        self.pred[vertex]
    }

    /// Candidate distance through `from` along an edge of weight `weight`.
    /// Returns `None` when `from` is unreached or the sum leaves the 64-bit
    /// domain; both count as +∞ and never improve anything.
    pub fn candidate(&self, from: usize, weight: W) -> Option<W> {
        let base = self.dist[from];
        if base == W::max_value() {
            return None;
        }
        let sum = base.checked_add(&weight);
        if sum.is_none() {
            debug!(
                "distance overflow relaxing out of {} (base {:?} + {:?}); treated as unreachable",
                from, base, weight
            );
        }
        sum
    }

    /// Writes `candidate` as the new distance of `to` via `from` iff it is a
    /// strict improvement. Returns whether it wrote.
    pub fn improve(&mut self, to: usize, candidate: W, from: usize) -> bool {
        if candidate < self.dist[to] {
            self.dist[to] = candidate;
            self.pred[to] = Some(from);
            true
        } else {
            false
        }
    }

    /// Consumes the table into the caller-facing arrays, mapping the
    /// sentinel to `None`
    pub fn into_result(self) -> super::traits::ShortestPathResult<W> {
        let distances = self
            .dist
            .into_iter()
            .map(|d| if d == W::max_value() { None } else { Some(d) })
            .collect();
        super::traits::ShortestPathResult {
            distances,
            predecessors: self.pred,
            source: self.source,
        }
    }
}
