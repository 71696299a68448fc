pub mod classifier;
pub mod normalizer;
pub mod schema;

pub use classifier::{EntityClassifier, HOLDING_MARKERS, Position};
pub use normalizer::GraphNormalizer;
pub use schema::{CompanyNode, NodeRole, OwnershipEdge, OwnershipGraph, OwnershipKind};

use wikidata::{FetchError, QueryOptions, WikidataClient, ownership_query};

/// The ownership pipeline: query builder -> fetcher -> normalizer.
pub struct OwnershipService {
    client: WikidataClient,
    normalizer: GraphNormalizer,
    options: QueryOptions,
}

impl OwnershipService {
    pub fn new(client: WikidataClient, normalizer: GraphNormalizer, options: QueryOptions) -> Self {
        Self {
            client,
            normalizer,
            options,
        }
    }

    pub fn default() -> Self {
        Self::new(
            WikidataClient::default(),
            GraphNormalizer::default(),
            QueryOptions::default(),
        )
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Fetch and normalize the ownership graph around one entity.
    ///
    /// Fetch failures propagate as typed errors; the normalizer never
    /// runs on a failed fetch. An empty result set is not an error and
    /// yields a root-only graph.
    pub async fn get_ownership_graph(&self, id: &str) -> Result<OwnershipGraph, FetchError> {
        let query = ownership_query(id, &self.options);
        let rows = self.client.select(&query).await?;

        tracing::debug!(root = id, rows = rows.len(), "normalizing ownership rows");
        Ok(self.normalizer.normalize(id, &rows))
    }
}
