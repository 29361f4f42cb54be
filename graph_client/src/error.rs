// graph_client/src/error.rs
use thiserror::Error;

/// Errors surfaced by the graph access facade.
#[derive(Debug, Error)]
pub enum MapStoreError {
    /// A write referenced a city that is not in the graph.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// The driver failed to reach or talk to the graph database.
    #[error("graph database error: {0}")]
    Graph(#[from] neo4rs::Error),

    /// A result record did not have the shape the query promises.
    #[error("malformed graph record: {0}")]
    Record(#[from] neo4rs::DeError),

    /// The database answered, but not with what the query guarantees.
    #[error("unexpected graph response: {0}")]
    UnexpectedResult(String),
}
