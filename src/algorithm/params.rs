/// Parameters derived once per solve from the vertex count n:
/// `k = max(1, ⌊(log₂ n)^(1/3)⌋)` bounds the pivot-reduction rounds,
/// `t = max(1, ⌊(log₂ n)^(2/3)⌋)` is the branching exponent, and
/// `levels = max(1, ⌈log₂ n / t⌉)` is the recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveParams {
    pub k: usize,
    pub t: usize,
    pub levels: usize,
}

impl SolveParams {
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        let log_n = (vertex_count.max(2) as f64).log2();
        let k = (log_n.powf(1.0 / 3.0).floor() as usize).max(1);
        let t = (log_n.powf(2.0 / 3.0).floor() as usize).max(1);
        let levels = ((log_n / t as f64).ceil() as usize).max(1);
        SolveParams { k, t, levels }
    }

    /// Block size M = 2^((level - 1) · t) for the heap instantiated at
    /// `level >= 1`
    pub fn block_size(&self, level: usize) -> usize {
        pow2_saturating((level - 1).saturating_mul(self.t))
    }

    /// The completion budget k · 2^(level · t) that bounds |U| per call
    pub fn completion_limit(&self, level: usize) -> usize {
        self.k.saturating_mul(pow2_saturating(level.saturating_mul(self.t)))
    }
}

/// 2^exp, saturating instead of wrapping on huge exponents
fn pow2_saturating(exp: usize) -> usize {
    if exp >= usize::BITS as usize - 1 {
        usize::MAX
    } else {
        1usize << exp
    }
}
