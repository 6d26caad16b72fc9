//! Identifier registry: opaque string ids to dense node indices

use crate::graph::NodeIndex;
use std::collections::HashMap;

/// Bidirectional map between external identifiers and node indices
///
/// Indices are handed out in first-seen order starting at zero, so the
/// graph built from them has no placeholder slots.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    by_id: HashMap<String, NodeIndex>,
    ids: Vec<String>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `id`, assigning the next free one on first sight
    pub fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.by_id.get(id) {
            return index;
        }
        let index = NodeIndex::new(self.ids.len());
        self.ids.push(id.to_string());
        self.by_id.insert(id.to_string(), index);
        index
    }

    pub fn get(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// External identifier of `index`
    pub fn resolve(&self, index: NodeIndex) -> Option<&str> {
        self.ids.get(index.get()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
