pub mod bindings;
pub mod client;
pub mod error;
pub mod search;
pub mod sparql;

pub use bindings::{RdfTerm, ResultRow};
pub use client::WikidataClient;
pub use error::FetchError;
pub use search::{CompanySummary, search_companies};
pub use sparql::{QueryOptions, entity_url, ownership_query};
