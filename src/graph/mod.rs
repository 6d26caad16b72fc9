//! Core graph data structures

mod edge;
mod node;
mod store;


pub use edge::{Edge, Sign};
pub use node::{Node, NodeIndex, Slot};
pub use store::{FrozenGraph, GraphStore};
