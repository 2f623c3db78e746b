use num_traits::{CheckedAdd, PrimInt};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// The partial-order priority structure from Lemma 3.3 of the paper.
///
/// Keys live in bounded blocks arranged in two sequences: `D0` holds blocks
/// produced by [`BlockHeap::batch_prepend`] and logically precedes `D1`,
/// which holds blocks fed by [`BlockHeap::insert`] and kept in
/// non-decreasing value bands. [`BlockHeap::pull`] removes up to `M` keys
/// with the smallest `(value, key)` pairs and reports a separating bound.
///
/// All nodes are backed by a single arena and addressed by integer handles;
/// each node records the block that currently owns it, so displacing a
/// stale entry never scans across blocks.
#[derive(Debug)]
pub struct BlockHeap<K, W>
where
    K: Copy + Eq + Hash + Ord + Debug,
    W: PrimInt + CheckedAdd + Debug,
{
    /// Block size parameter M
    block_size: usize,

    /// Global upper bound B; no stored value is ever >= B
    bound: W,

    /// Node arena; `free_nodes` holds recycled handles
    nodes: Vec<Node<K, W>>,
    free_nodes: Vec<usize>,

    /// Block arena; `free_blocks` holds recycled handles
    blocks: Vec<Block<W>>,
    free_blocks: Vec<usize>,

    /// Prepend sequence, front first; block i holds smaller values than
    /// block i + 1
    d0: VecDeque<usize>,

    /// Insert sequence; block bands are ordered by `upper_bound`
    d1: Vec<usize>,

    /// Ordered index of `(upper_bound, position in d1)` for block routing
    d1_bounds: BTreeSet<(W, usize)>,

    /// Key to node handle, for duplicate displacement
    key_map: HashMap<K, usize>,
}

#[derive(Debug)]
struct Node<K, W> {
    key: K,
    value: W,
    prev: Option<usize>,
    next: Option<usize>,
    /// Handle of the owning block, kept current across every transition
    block: usize,
}

#[derive(Debug)]
struct Block<W> {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    /// Maximum value currently stored in the block
    upper_bound: W,
}

impl<K, W> BlockHeap<K, W>
where
    K: Copy + Eq + Hash + Ord + Debug,
    W: PrimInt + CheckedAdd + Debug,
{
    /// Creates a heap with block size `block_size` and global bound `bound`.
    /// D0 starts empty; D1 starts with a single empty block whose upper
    /// bound is `bound`.
    pub fn new(block_size: usize, bound: W) -> Self {
        let mut heap = BlockHeap {
            block_size: block_size.max(1),
            bound,
            nodes: Vec::new(),
            free_nodes: Vec::new(),
            blocks: Vec::new(),
            free_blocks: Vec::new(),
            d0: VecDeque::new(),
            d1: Vec::new(),
            d1_bounds: BTreeSet::new(),
            key_map: HashMap::new(),
        };
        let initial = heap.alloc_block(bound);
        heap.d1.push(initial);
        heap.d1_bounds.insert((bound, 0));
        heap
    }

    /// True iff no block holds any node
    pub fn is_empty(&self) -> bool {
        self.key_map.is_empty()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.key_map.len()
    }

    /// Current value for a key, if present
    pub fn get(&self, key: &K) -> Option<W> {
        self.key_map.get(key).map(|&h| self.nodes[h].value)
    }

    /// Inserts `key` with `value`, displacing an existing entry only when
    /// the new value is strictly smaller. Values above the global bound are
    /// a caller bug and are dropped; equality is tolerated because a pull
    /// separator can tie the values it leaves behind, and those keys come
    /// straight back as the next frontier.
    pub fn insert(&mut self, key: K, value: W) {
        debug_assert!(
            value <= self.bound,
            "block heap insert above bound: {:?} > {:?}",
            value,
            self.bound
        );
        if value > self.bound {
            return;
        }
        if !self.displace(key, value) {
            return;
        }

        let position = match self.d1_bounds.range((value, 0)..).next() {
            Some(&(_, position)) => position,
            None => self.d1.len() - 1,
        };
        let block_handle = self.d1[position];
        let node = self.alloc_node(key, value, block_handle);
        self.key_map.insert(key, node);
        self.append_node(block_handle, node);

        if value > self.blocks[block_handle].upper_bound {
            // Only reachable for the last band; raising its bound keeps the
            // band ordering intact.
            let old = self.blocks[block_handle].upper_bound;
            self.d1_bounds.remove(&(old, position));
            self.blocks[block_handle].upper_bound = value;
            self.d1_bounds.insert((value, position));
        }

        if self.blocks[block_handle].len > self.block_size {
            self.split(position);
        }
    }

    /// Prepends a batch whose values are all smaller than anything currently
    /// stored (the caller enforces this). Entries are sorted by
    /// `(value, key)`, deduplicated against the batch and the heap, chunked
    /// into blocks of at most `max(1, M/2)` nodes, and placed at the front
    /// of D0 in order.
    pub fn batch_prepend(&mut self, mut entries: Vec<(K, W)>) {
        entries.sort_unstable_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

        let mut accepted: Vec<(K, W)> = Vec::with_capacity(entries.len());
        let mut seen: HashSet<K> = HashSet::with_capacity(entries.len());
        for (key, value) in entries {
            debug_assert!(
                value < self.bound,
                "batch prepend at or above bound: {:?} >= {:?}",
                value,
                self.bound
            );
            if value >= self.bound {
                continue;
            }
            // Sorted ascending, so the first occurrence of a key is its best.
            if !seen.insert(key) {
                continue;
            }
            if !self.displace(key, value) {
                continue;
            }
            accepted.push((key, value));
        }
        if accepted.is_empty() {
            return;
        }

        let chunk_size = (self.block_size / 2).max(1);
        for chunk in accepted.chunks(chunk_size).rev() {
            let upper_bound = chunk.last().map(|&(_, v)| v).unwrap_or(self.bound);
            let block_handle = self.alloc_block(upper_bound);
            for &(key, value) in chunk {
                let node = self.alloc_node(key, value, block_handle);
                self.key_map.insert(key, node);
                self.append_node(block_handle, node);
            }
            self.d0.push_front(block_handle);
        }
    }

    /// Removes and returns up to `M` keys with the smallest `(value, key)`
    /// pairs, together with a separating bound `x`: every returned value is
    /// `< x` and every remaining value is `>= x`. When the heap held at most
    /// `M` keys, all of them are returned and `x` is the global bound.
    pub fn pull(&mut self) -> (Vec<K>, W) {
        if self.key_map.is_empty() {
            return (Vec::new(), self.bound);
        }

        if self.key_map.len() <= self.block_size {
            let mut keys = Vec::with_capacity(self.key_map.len());
            let all: Vec<usize> = self.collect_prefix(usize::MAX, usize::MAX);
            for handle in all {
                keys.push(self.nodes[handle].key);
                self.remove_node(handle);
            }
            self.clean_drained_blocks();
            return (keys, self.bound);
        }

        // Gather enough of the leading blocks of each sequence to be certain
        // the M smallest pairs are among the candidates.
        let mut candidates = self.collect_prefix(self.block_size, self.block_size);
        candidates.sort_unstable_by(|&a, &b| {
            (self.nodes[a].value, self.nodes[a].key).cmp(&(self.nodes[b].value, self.nodes[b].key))
        });

        let take = candidates.len().min(self.block_size);
        let mut keys = Vec::with_capacity(take);
        for &handle in &candidates[..take] {
            keys.push(self.nodes[handle].key);
            self.remove_node(handle);
        }
        self.clean_drained_blocks();

        let separator = self.smallest_remaining().unwrap_or(self.bound);
        (keys, separator)
    }

    // ---- internal helpers -------------------------------------------------

    /// Handles of every node in the leading blocks of D0 (until at least
    /// `d0_want` nodes were seen) followed by the leading blocks of D1
    /// (until at least `d1_want`).
    fn collect_prefix(&self, d0_want: usize, d1_want: usize) -> Vec<usize> {
        let mut handles = Vec::new();
        let mut seen = 0usize;
        for &block in &self.d0 {
            if seen >= d0_want {
                break;
            }
            self.push_block_nodes(block, &mut handles);
            seen = handles.len();
        }
        let d1_start = handles.len();
        for &block in &self.d1 {
            if handles.len() - d1_start >= d1_want {
                break;
            }
            self.push_block_nodes(block, &mut handles);
        }
        handles
    }

    fn push_block_nodes(&self, block: usize, out: &mut Vec<usize>) {
        let mut cursor = self.blocks[block].head;
        while let Some(handle) = cursor {
            out.push(handle);
            cursor = self.nodes[handle].next;
        }
    }

    /// Smallest value still stored, scanning only the first non-empty block
    /// of each sequence (each holds its sequence's minimum).
    fn smallest_remaining(&self) -> Option<W> {
        let front_min = |ids: &mut dyn Iterator<Item = usize>| -> Option<W> {
            for block in ids {
                if self.blocks[block].len == 0 {
                    continue;
                }
                let mut min = None;
                let mut cursor = self.blocks[block].head;
                while let Some(handle) = cursor {
                    let value = self.nodes[handle].value;
                    min = Some(min.map_or(value, |m: W| m.min(value)));
                    cursor = self.nodes[handle].next;
                }
                return min;
            }
            None
        };
        let d0_min = front_min(&mut self.d0.iter().copied());
        let d1_min = front_min(&mut self.d1.iter().copied());
        match (d0_min, d1_min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Makes room for a fresh entry of `key` at `value`. Returns false when
    /// an entry at least as good already exists; otherwise unlinks any stale
    /// entry and returns true.
    fn displace(&mut self, key: K, value: W) -> bool {
        if let Some(&existing) = self.key_map.get(&key) {
            if value >= self.nodes[existing].value {
                return false;
            }
            self.remove_node(existing);
        }
        true
    }

    /// Unlinks a node from its owning block and recycles both the handle and
    /// the key-map entry.
    fn remove_node(&mut self, handle: usize) {
        let (key, prev, next, block) = {
            let node = &self.nodes[handle];
            (node.key, node.prev, node.next, node.block)
        };
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.blocks[block].head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.blocks[block].tail = prev,
        }
        self.blocks[block].len -= 1;
        self.key_map.remove(&key);
        self.free_nodes.push(handle);
    }

    fn append_node(&mut self, block: usize, handle: usize) {
        let tail = self.blocks[block].tail;
        self.nodes[handle].prev = tail;
        self.nodes[handle].next = None;
        match tail {
            Some(t) => self.nodes[t].next = Some(handle),
            None => self.blocks[block].head = Some(handle),
        }
        self.blocks[block].tail = Some(handle);
        self.blocks[block].len += 1;
    }

    /// Splits the D1 block at `position` around its `(value, key)` median:
    /// the smaller half stays, the larger half moves to a new block placed
    /// immediately after, and both upper bounds become their actual maxima.
    fn split(&mut self, position: usize) {
        let block_handle = self.d1[position];
        let mut handles = Vec::with_capacity(self.blocks[block_handle].len);
        self.push_block_nodes(block_handle, &mut handles);
        handles.sort_unstable_by(|&a, &b| {
            (self.nodes[a].value, self.nodes[a].key).cmp(&(self.nodes[b].value, self.nodes[b].key))
        });

        let mid = handles.len() / 2;
        let upper = handles.split_off(mid);

        let low_bound = self.nodes[*handles.last().expect("split of empty block")].value;
        let high_bound = self.nodes[*upper.last().expect("split of empty block")].value;

        self.relink_block(block_handle, &handles, low_bound);
        let new_block = self.alloc_block(high_bound);
        self.relink_block(new_block, &upper, high_bound);
        for &handle in &upper {
            self.nodes[handle].block = new_block;
        }

        self.d1.insert(position + 1, new_block);
        self.rebuild_d1_bounds();
    }

    /// Rebuilds a block's linked list from an ordered slice of handles
    fn relink_block(&mut self, block: usize, handles: &[usize], upper_bound: W) {
        self.blocks[block].head = None;
        self.blocks[block].tail = None;
        self.blocks[block].len = 0;
        self.blocks[block].upper_bound = upper_bound;
        for &handle in handles {
            self.append_node(block, handle);
        }
    }

    /// Drops empty blocks left behind by a pull. D1 always keeps at least
    /// one block so inserts have a landing band.
    fn clean_drained_blocks(&mut self) {
        while let Some(&front) = self.d0.front() {
            if self.blocks[front].len != 0 {
                break;
            }
            self.d0.pop_front();
            self.free_blocks.push(front);
        }

        let before = self.d1.len();
        let mut kept = Vec::with_capacity(before);
        for &block in &self.d1 {
            if self.blocks[block].len == 0 {
                self.free_blocks.push(block);
            } else {
                kept.push(block);
            }
        }
        if kept.is_empty() {
            let fresh = self.alloc_block(self.bound);
            kept.push(fresh);
        }
        self.d1 = kept;
        self.rebuild_d1_bounds();
    }

    fn rebuild_d1_bounds(&mut self) {
        self.d1_bounds.clear();
        for (position, &block) in self.d1.iter().enumerate() {
            self.d1_bounds.insert((self.blocks[block].upper_bound, position));
        }
    }

    fn alloc_node(&mut self, key: K, value: W, block: usize) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
            block,
        };
        match self.free_nodes.pop() {
            Some(handle) => {
                self.nodes[handle] = node;
                handle
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn alloc_block(&mut self, upper_bound: W) -> usize {
        let block = Block {
            head: None,
            tail: None,
            len: 0,
            upper_bound,
        };
        match self.free_blocks.pop() {
            Some(handle) => {
                self.blocks[handle] = block;
                handle
            }
            None => {
                self.blocks.push(block);
                self.blocks.len() - 1
            }
        }
    }

    #[cfg(test)]
    fn max_d1_block_len(&self) -> usize {
        self.d1
            .iter()
            .map(|&block| self.blocks[block].len)
            .max()
            .unwrap_or(0)
    }
}
