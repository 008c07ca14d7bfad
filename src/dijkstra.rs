//! Single-source shortest paths with Dijkstra's algorithm.
//!
//! The open set is a [`PriorityQueue`] over the AVL tree. The queue has no
//! decrease-key operation: an improved distance is pushed as a new entry and
//! the outdated entry is skipped when it is eventually popped.

use std::hash::Hash;

use crate::error::Error;
use crate::graph::{Graph, VertexIndex};
use crate::queue::PriorityQueue;

/// Types usable as edge weights and path distances.
///
/// `Default::default()` must be the zero distance. Weights must be
/// non-negative for results to be correct; this is not checked.
pub trait Weight: Ord + Copy + Default {
    /// Adds two weights, returning `None` if the sum is not representable.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Computes shortest paths over a borrowed graph.
///
/// ```
/// use avl_dijkstra::{DijkstraSolver, Graph};
///
/// let graph: Graph<_, u32> = vec![("A", "B", 4), ("A", "C", 2), ("C", "B", 1)]
///     .into_iter()
///     .collect();
/// let paths = DijkstraSolver::new(&graph).shortest_paths(&"A").unwrap();
/// assert_eq!(paths.distance(&"B"), Some(3));
///
/// let path = paths.path_to(&"B").unwrap().unwrap();
/// assert_eq!(path.vertices(), &["A", "C", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct DijkstraSolver<'g, I, W> {
    graph: &'g Graph<I, W>,
    relaxation_limit: Option<usize>,
    max_distance: Option<W>,
}

/// Counters collected during one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries pushed onto the queue, the source included.
    pub pushes: usize,
    /// Entries popped from the queue.
    pub pops: usize,
    /// Popped entries skipped because a shorter distance was already known.
    pub stale_pops: usize,
    /// Edges that improved the distance of their target.
    pub relaxations: usize,
}

/// Distances and predecessors from one source vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, I, W> {
    graph: &'g Graph<I, W>,
    source: VertexIndex,
    distances: Vec<Option<W>>,
    predecessors: Vec<Option<VertexIndex>>,
    stats: SearchStats,
}

/// A shortest path, from source to target inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<I, W> {
    vertices: Vec<I>,
    distance: W,
}

impl<'g, I, W> DijkstraSolver<'g, I, W>
where
    I: Clone + Eq + Hash,
    W: Weight,
{
    pub fn new(graph: &'g Graph<I, W>) -> Self {
        Self {
            graph,
            relaxation_limit: None,
            max_distance: None,
        }
    }

    /// Fails a search with [`Error::RelaxationLimitExceeded`] once it needs
    /// more than `limit` successful relaxations.
    pub fn relaxation_limit(mut self, limit: usize) -> Self {
        self.relaxation_limit = Some(limit);
        self
    }

    /// Ignores paths longer than `distance`. Vertices only reachable through
    /// such paths are reported as unreachable.
    pub fn max_distance(mut self, distance: W) -> Self {
        self.max_distance = Some(distance);
        self
    }

    /// Computes the shortest distance from `source` to every vertex.
    pub fn shortest_paths(&self, source: &I) -> Result<ShortestPaths<'g, I, W>, Error<I>> {
        let source = self
            .graph
            .index_of(source)
            .ok_or_else(|| Error::UnknownVertex(source.clone()))?;

        let num_vertices = self.graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; num_vertices];
        let mut predecessors: Vec<Option<VertexIndex>> = vec![None; num_vertices];
        let mut stats = SearchStats::default();

        #[cfg(feature = "tracing")]
        tracing::debug!(source = source.index(), num_vertices, "dijkstra search started");

        distances[source.index()] = Some(W::default());
        let mut queue = PriorityQueue::new();
        queue.push(W::default(), source);
        stats.pushes += 1;

        while let Some((distance, vertex)) = queue.pop() {
            stats.pops += 1;

            // Skip entries superseded by a later, shorter push for the same vertex
            if distances[vertex.index()].map_or(false, |current| distance > current) {
                stats.stale_pops += 1;
                #[cfg(feature = "tracing")]
                tracing::trace!(vertex = vertex.index(), "skipped stale queue entry");
                continue;
            }

            for edge in self.graph.vertex_at(vertex).edges() {
                // A sum past the weight type's range is longer than any
                // representable distance
                let alt = match distance.checked_add(*edge.weight()) {
                    Some(alt) => alt,
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(
                            from = vertex.index(),
                            to = edge.target().index(),
                            "skipped overflowing edge"
                        );
                        continue;
                    }
                };
                if self.max_distance.map_or(false, |max| alt > max) {
                    continue;
                }
                let target = edge.target();
                if distances[target.index()].map_or(true, |current| alt < current) {
                    if let Some(limit) = self.relaxation_limit {
                        if stats.relaxations >= limit {
                            return Err(Error::RelaxationLimitExceeded { limit });
                        }
                    }
                    #[cfg(feature = "tracing")]
                    tracing::trace!(from = vertex.index(), to = target.index(), "relaxed edge");
                    distances[target.index()] = Some(alt);
                    predecessors[target.index()] = Some(vertex);
                    queue.push(alt, target);
                    stats.relaxations += 1;
                    stats.pushes += 1;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pushes = stats.pushes,
            pops = stats.pops,
            stale_pops = stats.stale_pops,
            relaxations = stats.relaxations,
            "dijkstra search finished"
        );

        Ok(ShortestPaths {
            graph: self.graph,
            source,
            distances,
            predecessors,
            stats,
        })
    }

    /// Computes a shortest path from `source` to `target`.
    /// Returns `Ok(None)` if `target` is not reachable.
    pub fn build_path(&self, source: &I, target: &I) -> Result<Option<Path<I, W>>, Error<I>> {
        if !self.graph.contains(target) {
            return Err(Error::UnknownVertex(target.clone()));
        }
        self.shortest_paths(source)?.path_to(target)
    }
}

impl<'g, I, W> ShortestPaths<'g, I, W>
where
    I: Clone + Eq + Hash,
    W: Weight,
{
    /// Returns the source vertex of the search.
    pub fn source(&self) -> &'g I {
        self.graph.vertex_at(self.source).id()
    }

    /// Returns the shortest distance from the source to `id`.
    /// Returns `None` if `id` is unreachable or not in the graph.
    pub fn distance(&self, id: &I) -> Option<W> {
        self.graph
            .index_of(id)
            .and_then(|index| self.distances[index.index()])
    }

    /// Returns the vertex preceding `id` on its shortest path.
    /// The source and unreachable vertices have no predecessor.
    pub fn predecessor(&self, id: &I) -> Option<&'g I> {
        let index = self.graph.index_of(id)?;
        self.predecessors[index.index()].map(|prev| self.graph.vertex_at(prev).id())
    }

    pub fn is_reachable(&self, id: &I) -> bool {
        self.distance(id).is_some()
    }

    /// Gets an iterator over every reachable vertex and its distance,
    /// in graph insertion order. Unreachable vertices are omitted.
    pub fn distances(&self) -> impl Iterator<Item = (&'g I, W)> + '_ {
        let graph = self.graph;
        self.distances
            .iter()
            .zip(graph.vertices())
            .filter_map(|(distance, vertex)| distance.map(|d| (vertex.id(), d)))
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Reconstructs the shortest path from the source to `target` by walking
    /// predecessor links back to the source.
    /// Returns `Ok(None)` if `target` is not reachable.
    pub fn path_to(&self, target: &I) -> Result<Option<Path<I, W>>, Error<I>> {
        let target_index = self
            .graph
            .index_of(target)
            .ok_or_else(|| Error::UnknownVertex(target.clone()))?;
        let distance = match self.distances[target_index.index()] {
            Some(distance) => distance,
            None => return Ok(None),
        };

        let mut vertices = vec![target_index];
        let mut current = target_index;
        while current != self.source {
            match self.predecessors[current.index()] {
                // A chain longer than the graph has vertices can only come
                // from negative weights
                Some(prev) if vertices.len() < self.distances.len() => {
                    vertices.push(prev);
                    current = prev;
                }
                _ => return Ok(None),
            }
        }
        vertices.reverse();

        Ok(Some(Path {
            vertices: vertices
                .into_iter()
                .map(|index| self.graph.vertex_at(index).id().clone())
                .collect(),
            distance,
        }))
    }
}

impl<I, W: Copy> Path<I, W> {
    /// Returns the vertices of the path, starting at the source.
    pub fn vertices(&self) -> &[I] {
        &self.vertices
    }

    /// Returns the total weight of the path.
    pub fn distance(&self) -> W {
        self.distance
    }

    /// Returns the number of edges on the path.
    pub fn edge_count(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn into_vertices(self) -> Vec<I> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph<&'static str, u32> {
        vec![
            ("A", "B", 4),
            ("A", "C", 2),
            ("B", "C", 1),
            ("B", "D", 5),
            ("C", "D", 8),
            ("C", "E", 10),
            ("D", "E", 2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_stats() {
        let graph = sample_graph();
        let paths = DijkstraSolver::new(&graph).shortest_paths(&"A").unwrap();
        let stats = paths.stats();
        assert_eq!(stats.pushes, stats.relaxations + 1);
        assert_eq!(stats.pops, stats.pushes);
        // D is improved via B (10 -> 9) and E via D (12 -> 11)
        assert_eq!(stats.stale_pops, 2);
        assert_eq!(stats.relaxations, 6);
    }

    #[test]
    fn test_source_path_is_single_vertex() {
        let graph = sample_graph();
        let paths = DijkstraSolver::new(&graph).shortest_paths(&"C").unwrap();
        let path = paths.path_to(&"C").unwrap().unwrap();
        assert_eq!(path.vertices(), &["C"]);
        assert_eq!(path.distance(), 0);
        assert_eq!(path.edge_count(), 0);
        assert_eq!(paths.source(), &"C");
        assert!(paths.predecessor(&"C").is_none());
    }

    #[test]
    fn test_relaxation_limit() {
        let graph = sample_graph();
        let result = DijkstraSolver::new(&graph)
            .relaxation_limit(2)
            .shortest_paths(&"A");
        assert_eq!(
            result.unwrap_err(),
            Error::RelaxationLimitExceeded { limit: 2 }
        );

        let result = DijkstraSolver::new(&graph)
            .relaxation_limit(6)
            .shortest_paths(&"A");
        assert!(result.is_ok());
    }

    #[test]
    fn test_max_distance() {
        let graph = sample_graph();
        let paths = DijkstraSolver::new(&graph)
            .max_distance(9)
            .shortest_paths(&"A")
            .unwrap();
        assert_eq!(paths.distance(&"D"), Some(9));
        assert_eq!(paths.distance(&"E"), None);
        assert_eq!(paths.path_to(&"E").unwrap(), None);
    }
}
