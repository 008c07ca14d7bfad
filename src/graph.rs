//! A directed, weighted graph with adjacency lists.

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::slice;

use rustc_hash::FxHashMap;

/// Position of a vertex in its [`Graph`], assigned in insertion order.
///
/// Indices are only meaningful for the graph that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexIndex(usize);

impl VertexIndex {
    /// Returns the index as a `usize`, usable for side tables sized by
    /// [`Graph::vertex_count`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<W> {
    source: VertexIndex,
    target: VertexIndex,
    weight: W,
}

impl<W> Edge<W> {
    pub fn source(&self) -> VertexIndex {
        self.source
    }

    pub fn target(&self) -> VertexIndex {
        self.target
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }
}

/// A vertex and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Vertex<I, W> {
    id: I,
    index: VertexIndex,
    edges: Vec<Edge<W>>,
}

impl<I, W> Vertex<I, W> {
    /// Returns the identity of the vertex.
    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the outgoing edges in the order they were added.
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

/// A directed graph whose vertices are identified by values of type `I`
/// and whose edges carry weights of type `W`.
///
/// Parallel edges and self loops are allowed. Weights are not validated;
/// [`DijkstraSolver`](crate::DijkstraSolver) requires them to be non-negative.
///
/// ```
/// use avl_dijkstra::Graph;
/// let mut graph = Graph::new();
/// graph.add_edge("A", "B", 4);
/// graph.add_edge("A", "C", 2);
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.vertex(&"A").map(|v| v.out_degree()), Some(2));
/// ```
#[derive(Clone)]
pub struct Graph<I, W> {
    vertices: Vec<Vertex<I, W>>,
    index: FxHashMap<I, VertexIndex>,
    num_edges: usize,
}

impl<I, W> Graph<I, W> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: FxHashMap::default(),
            num_edges: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Returns the vertex at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index does not belong to this graph.
    pub fn vertex_at(&self, index: VertexIndex) -> &Vertex<I, W> {
        &self.vertices[index.0]
    }

    /// Gets an iterator over all vertices in insertion order.
    pub fn vertices(&self) -> slice::Iter<'_, Vertex<I, W>> {
        self.vertices.iter()
    }
}

impl<I: Clone + Eq + Hash, W> Graph<I, W> {
    /// Adds a vertex unless one with the same identity exists.
    /// Returns the index of the new or existing vertex.
    pub fn add_vertex(&mut self, id: I) -> VertexIndex {
        if let Some(&index) = self.index.get(&id) {
            return index;
        }
        let index = VertexIndex(self.vertices.len());
        self.index.insert(id.clone(), index);
        self.vertices.push(Vertex {
            id,
            index,
            edges: Vec::new(),
        });
        index
    }

    /// Adds a directed edge `source -> target`, creating missing endpoints.
    pub fn add_edge(&mut self, source: I, target: I, weight: W) {
        let source = self.add_vertex(source);
        let target = self.add_vertex(target);
        self.vertices[source.0].edges.push(Edge {
            source,
            target,
            weight,
        });
        self.num_edges += 1;
    }

    /// Returns the index of the vertex with the given identity.
    pub fn index_of(&self, id: &I) -> Option<VertexIndex> {
        self.index.get(id).copied()
    }

    /// Returns the vertex with the given identity.
    pub fn vertex(&self, id: &I) -> Option<&Vertex<I, W>> {
        self.index_of(id).map(|index| &self.vertices[index.0])
    }

    pub fn contains(&self, id: &I) -> bool {
        self.index.contains_key(id)
    }

    /// Gets an iterator over `(target, weight)` for the outgoing edges of a
    /// vertex, or `None` if the vertex is unknown.
    pub fn neighbors(&self, id: &I) -> Option<impl Iterator<Item = (&I, &W)> + '_> {
        let vertex = self.vertex(id)?;
        Some(
            vertex
                .edges
                .iter()
                .map(move |edge| (&self.vertices[edge.target.0].id, &edge.weight)),
        )
    }
}

impl<I, W> Default for Graph<I, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: fmt::Debug, W: fmt::Debug> fmt::Debug for Graph<I, W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for vertex in &self.vertices {
            let targets: Vec<_> = vertex
                .edges
                .iter()
                .map(|edge| (&self.vertices[edge.target.0].id, &edge.weight))
                .collect();
            map.entry(&vertex.id, &targets);
        }
        map.finish()
    }
}

impl<I: Clone + Eq + Hash, W> FromIterator<(I, I, W)> for Graph<I, W> {
    fn from_iter<T: IntoIterator<Item = (I, I, W)>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<I: Clone + Eq + Hash, W> Extend<(I, I, W)> for Graph<I, W> {
    fn extend<T: IntoIterator<Item = (I, I, W)>>(&mut self, iter: T) {
        for (source, target, weight) in iter {
            self.add_edge(source, target, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Graph;

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::<&str, u32>::new();
        let a = graph.add_vertex("A");
        let b = graph.add_vertex("B");
        assert_ne!(a, b);
        assert_eq!(graph.add_vertex("A"), a);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.vertex_at(b).id(), &"B");
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 4);
        graph.add_edge("A", "B", 1);
        assert!(graph.contains(&"A"));
        assert!(graph.contains(&"B"));
        assert_eq!(graph.edge_count(), 2);

        // Directed: nothing leaves B
        assert_eq!(graph.vertex(&"B").map(|v| v.out_degree()), Some(0));
        let neighbors: Vec<_> = graph.neighbors(&"A").into_iter().flatten().collect();
        assert_eq!(neighbors, vec![(&"B", &4), (&"B", &1)]);
        assert!(graph.neighbors(&"Z").is_none());
    }
}
