// models/src/city.rs
use serde::{Deserialize, Serialize};

/// A city, stored as a node in the graph database.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// City name. Doubles as the lookup key; the database enforces
    /// uniqueness through a constraint installed at startup.
    pub name: String,

    /// Number of residents. Stored as given, no validation.
    pub population: i64,
}

impl City {
    /// Creates a new city.
    pub fn new(name: impl Into<String>, population: i64) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }
}
