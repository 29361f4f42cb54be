// models/src/route.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of city names describing one traversal from a
/// source city to a destination city.
///
/// Routes are computed by the graph database per query, rendered into
/// response strings and discarded; they are never persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Route(Vec<String>);

impl Route {
    /// Creates a route from city names in traversal order.
    pub fn new(cities: Vec<String>) -> Self {
        Self(cities)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}
