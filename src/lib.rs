//! An ordered map and set implemented with an AVL tree, a priority queue
//! built on the map, and Dijkstra's shortest paths driven by that queue.
//!
//! The tree keeps every node's subtree heights within one of each other
//! after every insert and remove. The priority queue keys its entries by
//! priority plus a sequence number, so equal priorities coexist and pop in
//! insertion order. The shortest path solver never updates queue entries in
//! place: improved distances are pushed again and outdated entries are
//! skipped when popped.
//!
//! ```
//! use avl_dijkstra::{DijkstraSolver, Graph};
//!
//! let mut graph = Graph::new();
//! graph.add_edge("Tatooine", "Naboo", 4u32);
//! graph.add_edge("Tatooine", "Coruscant", 2);
//! graph.add_edge("Naboo", "Coruscant", 1);
//! graph.add_edge("Naboo", "Kamino", 5);
//! graph.add_edge("Coruscant", "Kamino", 8);
//!
//! let solver = DijkstraSolver::new(&graph);
//! let path = solver.build_path(&"Tatooine", &"Kamino").unwrap().unwrap();
//! assert_eq!(path.vertices(), &["Tatooine", "Naboo", "Kamino"]);
//! assert_eq!(path.distance(), 9);
//! ```

pub mod compare;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod map;
pub mod queue;
pub mod set;

pub use compare::{Comparator, Natural, Reversed};
pub use dijkstra::{DijkstraSolver, Path, SearchStats, ShortestPaths, Weight};
pub use error::Error;
pub use graph::{Edge, Graph, Vertex, VertexIndex};
pub use map::{AvlTreeMap, Order};
pub use queue::PriorityQueue;
pub use set::AvlTreeSet;

#[cfg(test)]
mod tests;
