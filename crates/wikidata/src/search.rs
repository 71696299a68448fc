use crate::client::WikidataClient;
use crate::error::FetchError;
use crate::sparql::QueryOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SEARCH_LIMIT: usize = 8;

/// One company search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// Search companies by name. The term is free text and gets escaped
/// before being embedded in the query.
pub async fn search_companies(
    client: &WikidataClient,
    term: &str,
    options: &QueryOptions,
) -> Result<Vec<CompanySummary>, FetchError> {
    let query = search_query(term, SEARCH_LIMIT, &options.languages);
    let rows = client.select(&query).await?;

    let mut seen = HashSet::new();
    let mut companies = Vec::new();

    for row in rows {
        let Some(id) = row.entity_id("company") else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        companies.push(CompanySummary {
            label: row.literal("companyLabel").unwrap_or(&id).to_string(),
            description: row
                .literal("companyDescription")
                .unwrap_or_default()
                .to_string(),
            id,
        });
    }

    Ok(companies)
}

fn search_query(term: &str, limit: usize, languages: &[String]) -> String {
    let escaped = escape_literal(term).to_lowercase();
    let languages = languages.join(",");

    format!(
        r#"SELECT DISTINCT ?company ?companyLabel ?companyDescription
WHERE {{
  ?company rdfs:label ?label .
  FILTER(CONTAINS(LCASE(?label), "{escaped}"))

  VALUES ?entityType {{
    wd:Q4830453
    wd:Q783794
    wd:Q891723
  }}
  ?company wdt:P31 ?entityType .

  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{languages}". }}
}}
ORDER BY ASC(STRLEN(?companyLabel))
LIMIT {limit}"#
    )
}

fn escape_literal(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}
