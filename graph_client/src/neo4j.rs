// graph_client/src/neo4j.rs
use neo4rs::{query, ConfigBuilder, Graph};
use serde::Deserialize;

use models::{City, Road, Route};

use crate::error::MapStoreError;
use crate::MapStore;

// Cypher statements, one per facade operation. Parameters are always bound
// through the driver, never spliced into the query text.

const MERGE_CITY: &str = "
    MERGE (city:City {name: $name})
    SET city.population = $population
";

const ALL_CITIES: &str = "
    MATCH (city:City)
    RETURN city.name AS name, city.population AS population
";

// Both endpoints are looked up first and the MERGE only runs when the two
// are present, so a missing city never gets created as a side effect. The
// returned flags tell the caller exactly which lookup failed, from the
// same round trip that performed the write.
const MERGE_ROAD: &str = "
    OPTIONAL MATCH (src:City {name: $source})
    OPTIONAL MATCH (dst:City {name: $destination})
    FOREACH (ignored IN CASE WHEN src IS NOT NULL AND dst IS NOT NULL THEN [1] ELSE [] END |
        MERGE (src)-[:ROAD {distance: $distance}]->(dst))
    RETURN src IS NOT NULL AS source_exists, dst IS NOT NULL AS destination_exists
";

const ALL_ROAD_DISTANCES: &str = "
    MATCH ()-[road:ROAD]->()
    RETURN road.distance AS distance
";

const ALL_ROADS: &str = "
    MATCH (src:City)-[road:ROAD]->(dst:City)
    RETURN src.name AS source, dst.name AS destination, road.distance AS distance
";

const ALL_ROUTES: &str = "
    MATCH route = (src:City {name: $source})-[:ROAD*]->(dst:City {name: $destination})
    RETURN [city IN nodes(route) | city.name] AS cities
";

const SHORTEST_ROUTE: &str = "
    MATCH route = shortestPath((src:City {name: $source})-[:ROAD*]->(dst:City {name: $destination}))
    RETURN [city IN nodes(route) | city.name] AS cities
";

const CITY_NAME_UNIQUE: &str = "
    CREATE CONSTRAINT city_name_unique IF NOT EXISTS
    FOR (city:City) REQUIRE city.name IS UNIQUE
";

/// Connection settings for the external graph database.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Bolt URI of the database, e.g. `bolt://127.0.0.1:7687`.
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Database to select; `None` keeps the server default.
    pub database: Option<String>,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://127.0.0.1:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: None,
            max_connections: 16,
            fetch_size: 500,
        }
    }
}

/// [`MapStore`] backed by a Neo4j-compatible server over Bolt.
///
/// Holds the shared connection pool; cloning the handle is cheap and every
/// operation checks a connection out of the pool for its own session.
#[derive(Clone)]
pub struct Neo4jMapStore {
    graph: Graph,
}

impl Neo4jMapStore {
    /// Builds the connection pool from settings.
    ///
    /// The pool is created once at process start and injected wherever a
    /// store is needed; connections are dialed lazily, so this succeeds
    /// even while the database is still coming up.
    pub fn connect(settings: &GraphSettings) -> Result<Self, MapStoreError> {
        let mut config = ConfigBuilder::default()
            .uri(&settings.uri)
            .user(&settings.user)
            .password(&settings.password)
            .max_connections(settings.max_connections)
            .fetch_size(settings.fetch_size);
        if let Some(database) = &settings.database {
            config = config.db(database.as_str());
        }

        let graph = Graph::connect(config.build()?)?;
        tracing::info!(uri = %settings.uri, "graph connection pool ready");
        Ok(Self { graph })
    }

    /// Installs the uniqueness constraint on city names.
    ///
    /// The constraint is what makes repeated `add_city` calls for one name
    /// converge on a single node, including under concurrency. Safe to run
    /// on every startup.
    pub async fn ensure_schema(&self) -> Result<(), MapStoreError> {
        self.graph.run(query(CITY_NAME_UNIQUE)).await?;
        tracing::info!("city name uniqueness constraint ensured");
        Ok(())
    }

    async fn collect_routes(
        &self,
        cypher: &str,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Route>, MapStoreError> {
        let mut rows = self
            .graph
            .execute(
                query(cypher)
                    .param("source", source)
                    .param("destination", destination),
            )
            .await?;

        let mut routes = Vec::new();
        while let Some(row) = rows.next().await? {
            routes.push(Route::new(row.get::<Vec<String>>("cities")?));
        }
        Ok(routes)
    }
}

#[async_trait::async_trait]
impl MapStore for Neo4jMapStore {
    async fn add_city(&self, city: &City) -> Result<(), MapStoreError> {
        tracing::debug!(name = %city.name, "merging city");
        self.graph
            .run(
                query(MERGE_CITY)
                    .param("name", city.name.as_str())
                    .param("population", city.population),
            )
            .await?;
        Ok(())
    }

    async fn cities(&self) -> Result<Vec<City>, MapStoreError> {
        let mut rows = self.graph.execute(query(ALL_CITIES)).await?;
        let mut cities = Vec::new();
        while let Some(row) = rows.next().await? {
            cities.push(City::new(
                row.get::<String>("name")?,
                row.get::<i64>("population")?,
            ));
        }
        Ok(cities)
    }

    async fn add_road(
        &self,
        source: &str,
        destination: &str,
        distance: i64,
    ) -> Result<(), MapStoreError> {
        tracing::debug!(%source, %destination, distance, "merging road");
        let mut rows = self
            .graph
            .execute(
                query(MERGE_ROAD)
                    .param("source", source)
                    .param("destination", destination)
                    .param("distance", distance),
            )
            .await?;

        // The RETURN clause always yields exactly one row; the uniqueness
        // constraint rules out duplicate matches.
        let row = rows.next().await?.ok_or_else(|| {
            MapStoreError::UnexpectedResult("road merge returned no verdict row".to_string())
        })?;

        if !row.get::<bool>("source_exists")? {
            return Err(MapStoreError::CityNotFound(source.to_string()));
        }
        if !row.get::<bool>("destination_exists")? {
            return Err(MapStoreError::CityNotFound(destination.to_string()));
        }
        Ok(())
    }

    async fn road_distances(&self) -> Result<Vec<i64>, MapStoreError> {
        let mut rows = self.graph.execute(query(ALL_ROAD_DISTANCES)).await?;
        let mut distances = Vec::new();
        while let Some(row) = rows.next().await? {
            distances.push(row.get::<i64>("distance")?);
        }
        Ok(distances)
    }

    async fn roads(&self) -> Result<Vec<Road>, MapStoreError> {
        let mut rows = self.graph.execute(query(ALL_ROADS)).await?;
        let mut roads = Vec::new();
        while let Some(row) = rows.next().await? {
            roads.push(Road::new(
                row.get::<String>("source")?,
                row.get::<String>("destination")?,
                row.get::<i64>("distance")?,
            ));
        }
        Ok(roads)
    }

    async fn routes(&self, source: &str, destination: &str) -> Result<Vec<Route>, MapStoreError> {
        self.collect_routes(ALL_ROUTES, source, destination).await
    }

    async fn shortest_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Option<Route>, MapStoreError> {
        let routes = self.collect_routes(SHORTEST_ROUTE, source, destination).await?;
        Ok(routes.into_iter().next())
    }
}
