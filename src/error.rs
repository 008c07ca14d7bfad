//! Error types for shortest path queries.

use thiserror::Error;

/// Errors reported by [`DijkstraSolver`](crate::DijkstraSolver).
///
/// Absence is not an error anywhere else in this crate: missing keys, empty
/// queues and unreachable vertices are reported as `None`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error<I> {
    /// A source or target identity is not a vertex of the graph.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(I),

    /// The search needed more successful relaxations than the configured limit.
    #[error("relaxation limit of {limit} exceeded")]
    RelaxationLimitExceeded { limit: usize },
}
