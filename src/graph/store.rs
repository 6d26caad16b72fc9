//! GraphStore: densely indexed, append-only signed graph

use super::edge::Edge;
use super::node::{Node, NodeIndex, Slot};
use crate::error::{try_reserve, SignRankError, SignRankResult};

/// Mutable graph used during construction
///
/// Index `i` of the slot array holds node `i`. Referencing an index past the
/// end grows the array, filling skipped positions with vacant placeholders.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    slots: Vec<Slot>,
    edge_count: usize,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarantee that an occupied node exists at `index`
    ///
    /// Idempotent: an existing node (and its edges) is left untouched.
    pub fn ensure_node(&mut self, index: NodeIndex) -> SignRankResult<()> {
        let i = index.get();
        if i >= self.slots.len() {
            self.grow_to(i)?;
        }
        let slot = &mut self.slots[i];
        if !slot.is_occupied() {
            *slot = Slot::Occupied(Node::new(index));
        }
        Ok(())
    }

    /// Append a directed edge `src -> dest`, creating either endpoint if needed
    ///
    /// Parallel edges are kept. A weight of zero is stored but has no effect
    /// on propagation; non-finite weights are rejected.
    pub fn add_edge(&mut self, src: NodeIndex, dest: NodeIndex, weight: f64) -> SignRankResult<()> {
        if !weight.is_finite() {
            return Err(SignRankError::Validation(format!(
                "edge {} -> {} has non-finite weight {}",
                src, dest, weight
            )));
        }

        self.ensure_node(src)?;
        self.ensure_node(dest)?;

        let node = self.slots[src.get()]
            .as_node_mut()
            .ok_or_else(|| SignRankError::Logic(format!("source slot {} is vacant", src)))?;
        let edges = node.out_edges_mut();
        try_reserve(edges, 1, "edge list")?;
        edges.push(Edge::new(dest, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Number of index slots, placeholders included
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.slots.get(index.get()).and_then(Slot::as_node)
    }

    pub fn is_occupied(&self, index: NodeIndex) -> bool {
        self.node(index).is_some()
    }

    /// Finish construction and hand out a read-only view
    pub fn freeze(self) -> FrozenGraph {
        let occupied = self.slots.iter().filter(|s| s.is_occupied()).count();
        tracing::debug!(
            slots = self.slots.len(),
            occupied,
            edges = self.edge_count,
            "graph frozen"
        );
        FrozenGraph {
            slots: self.slots,
            edge_count: self.edge_count,
            occupied,
        }
    }

    fn grow_to(&mut self, last: usize) -> SignRankResult<()> {
        let len = last.checked_add(1).ok_or_else(|| {
            SignRankError::Resource(format!("node index {} exceeds addressable range", last))
        })?;
        let additional = len - self.slots.len();
        try_reserve(&mut self.slots, additional, "node array")?;
        self.slots.resize_with(len, Slot::default);
        Ok(())
    }
}

/// Read-only graph handed to the propagation engine
///
/// Produced by [`GraphStore::freeze`]; nothing can be added once frozen.
#[derive(Debug, Clone, Default)]
pub struct FrozenGraph {
    slots: Vec<Slot>,
    edge_count: usize,
    occupied: usize,
}

impl FrozenGraph {
    /// Number of index slots, placeholders included
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a node
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.slots.get(index.get()).and_then(Slot::as_node)
    }

    pub fn is_occupied(&self, index: NodeIndex) -> bool {
        self.node(index).is_some()
    }

    /// Outgoing edges of `index`; empty for vacant or out-of-range slots
    pub fn out_edges(&self, index: NodeIndex) -> &[Edge] {
        self.node(index).map(Node::out_edges).unwrap_or(&[])
    }

    /// Occupied nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().filter_map(Slot::as_node)
    }
}
