// graph_client/src/lib.rs
//! Graph database access for the map API.
//!
//! Everything that speaks the graph query language lives in this crate,
//! behind the narrow [`MapStore`] trait: one named operation per endpoint,
//! typed parameters in, domain values out. The HTTP layer never sees a
//! query string, so the database (or its query dialect) can be swapped
//! without touching the handlers.

mod error;
mod neo4j;

pub use error::MapStoreError;
pub use neo4j::{GraphSettings, Neo4jMapStore};

use models::{City, Road, Route};

/// The named graph operations the map API is built on.
///
/// Implemented by [`Neo4jMapStore`] against a live database and by
/// in-memory doubles in tests.
#[async_trait::async_trait]
pub trait MapStore: Send + Sync + 'static {
    /// Stores a city, updating the population if the name already exists.
    async fn add_city(&self, city: &City) -> Result<(), MapStoreError>;

    /// All stored cities, in whatever order the database returns them.
    async fn cities(&self) -> Result<Vec<City>, MapStoreError>;

    /// Stores a directed road between two already-stored cities.
    ///
    /// Fails with [`MapStoreError::CityNotFound`] when either endpoint is
    /// missing from the graph; nothing is written in that case.
    async fn add_road(
        &self,
        source: &str,
        destination: &str,
        distance: i64,
    ) -> Result<(), MapStoreError>;

    /// The distance of every stored road, with no endpoint information.
    async fn road_distances(&self) -> Result<Vec<i64>, MapStoreError>;

    /// Every stored road as a (source, destination, distance) triple.
    async fn roads(&self) -> Result<Vec<Road>, MapStoreError>;

    /// Every route from `source` to `destination` that follows roads in
    /// their stored direction, over any number of hops.
    async fn routes(&self, source: &str, destination: &str) -> Result<Vec<Route>, MapStoreError>;

    /// The route with the fewest hops from `source` to `destination`, or
    /// `None` when no route connects them.
    async fn shortest_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Option<Route>, MapStoreError>;
}
