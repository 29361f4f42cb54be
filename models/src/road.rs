// models/src/road.rs
use serde::{Deserialize, Serialize};

/// A directed, weighted road between two cities, stored as an edge in the
/// graph database.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Road {
    /// Name of the city the road leaves from.
    pub source: String,

    /// Name of the city the road arrives at.
    pub destination: String,

    /// Length of the road. Stored as given, no sign validation.
    pub distance: i64,
}

impl Road {
    /// Creates a new road.
    pub fn new(source: impl Into<String>, destination: impl Into<String>, distance: i64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            distance,
        }
    }
}
