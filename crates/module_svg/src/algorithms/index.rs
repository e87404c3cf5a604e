use crate::types::{Edge, Vertex};

/// Unconsumed boundary edges bucketed by start vertex.
///
/// Buckets live in a dense `(N + 1) x (N + 1)` array addressed by
/// `(y, x)`. Each bucket keeps its edges in insertion order, which is what
/// makes the tracer's tie-break reproducible.
#[derive(Debug, Clone)]
pub struct EdgeIndex {
    side: usize,
    buckets: Vec<Vec<Edge>>,
    len: usize,
}

impl EdgeIndex {
    /// Empty index for an `N x N` grid.
    pub fn new(module_count: usize) -> Self {
        let side = module_count + 1;
        Self {
            side,
            buckets: vec![Vec::new(); side * side],
            len: 0,
        }
    }

    /// Number of vertices per axis (`N + 1`).
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, vertex: Vertex) -> Option<usize> {
        (vertex.x < self.side && vertex.y < self.side).then(|| vertex.y * self.side + vertex.x)
    }

    /// Append `edge` to the bucket of its start vertex.
    pub fn insert(&mut self, edge: Edge) {
        let slot = self
            .slot(edge.start)
            .unwrap_or_else(|| panic!("edge start {} outside a {}-vertex lattice", edge.start, self.side));
        self.buckets[slot].push(edge);
        self.len += 1;
    }

    /// Remove `edge` from its bucket, keeping the order of the remaining
    /// edges. Returns false if it was not present.
    pub fn remove(&mut self, edge: &Edge) -> bool {
        let Some(slot) = self.slot(edge.start) else {
            return false;
        };
        let bucket = &mut self.buckets[slot];
        match bucket.iter().position(|candidate| candidate == edge) {
            Some(position) => {
                bucket.remove(position);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// First unconsumed edge starting at `vertex`.
    pub fn first_at(&self, vertex: Vertex) -> Option<Edge> {
        self.slot(vertex)
            .and_then(|slot| self.buckets[slot].first().copied())
    }

    /// Edges currently starting at `vertex`, in insertion order.
    pub fn edges_at(&self, vertex: Vertex) -> &[Edge] {
        match self.slot(vertex) {
            Some(slot) => &self.buckets[slot],
            None => &[],
        }
    }

    /// First edge of the first non-empty bucket, scanning rows (`y`) then
    /// columns (`x`).
    pub fn first_nonempty(&self) -> Option<Edge> {
        self.first_nonempty_from(0).map(|(_, edge)| edge)
    }

    /// Like [`EdgeIndex::first_nonempty`] but skips the first `slot`
    /// buckets. Returns the slot of the bucket found so a caller that only
    /// removes edges can resume the scan there.
    pub fn first_nonempty_from(&self, slot: usize) -> Option<(usize, Edge)> {
        self.buckets
            .iter()
            .enumerate()
            .skip(slot)
            .find_map(|(slot, bucket)| bucket.first().map(|edge| (slot, *edge)))
    }

    /// All remaining edges, bucket by bucket in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.buckets.iter().flatten()
    }

    pub fn out_degree(&self, vertex: Vertex) -> usize {
        self.edges_at(vertex).len()
    }

    pub fn in_degree(&self, vertex: Vertex) -> usize {
        self.iter().filter(|edge| edge.end() == vertex).count()
    }

    /// True when every vertex has as many incoming as outgoing edges,
    /// the precondition for the tracer to close every loop.
    pub fn is_balanced(&self) -> bool {
        let mut balance = vec![0isize; self.side * self.side];
        for edge in self.iter() {
            let Some(out_slot) = self.slot(edge.start) else {
                return false;
            };
            let Some(in_slot) = self.slot(edge.end()) else {
                return false;
            };
            balance[out_slot] += 1;
            balance[in_slot] -= 1;
        }
        balance.iter().all(|&b| b == 0)
    }
}
