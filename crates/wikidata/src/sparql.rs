/// Knobs for the ownership traversal query. All of these are
/// deployment-tunable; the defaults match the public Wikidata endpoint.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of transitive owned-by hops requested per direction.
    pub max_depth: usize,
    /// Result row cap passed through as the SPARQL LIMIT.
    pub row_limit: usize,
    /// Label language preference chain, most preferred first.
    pub languages: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            row_limit: 100,
            languages: vec!["de".to_string(), "en".to_string()],
        }
    }
}

/// Build the ownership traversal query for one root entity.
///
/// Pure string assembly, no I/O. The identifier is embedded verbatim:
/// Wikidata ids are alphanumeric keys, not free text.
pub fn ownership_query(root_id: &str, options: &QueryOptions) -> String {
    let path = ownership_path(options.max_depth);
    let languages = options.languages.join(",");
    let description_langs = quoted_list(&options.languages);

    format!(
        r#"SELECT DISTINCT ?ancestor ?ancestorLabel ?subsidiary ?subsidiaryLabel ?percent
       ?industryLabel ?countryLabel ?inception ?description ?hqLabel
       ?logo ?revenue ?employees ?executiveLabel
WHERE {{
  VALUES ?root {{ wd:{root_id} }}

  {{
    # direct owner, no type filter so edge cases survive
    ?root wdt:P127 ?ancestor .
  }} UNION {{
    ?root {path} ?ancestor .
    ?ancestor wdt:P31/wdt:P279* wd:Q43229 .
  }} UNION {{
    # direct subsidiary, no type filter
    ?subsidiary wdt:P127 ?root .
  }} UNION {{
    ?subsidiary {path} ?root .
    ?subsidiary wdt:P31/wdt:P279* wd:Q43229 .
  }} UNION {{
    # the root itself, so its own descriptive fields come back as a row
    BIND(?root AS ?ancestor)
  }}

  BIND(COALESCE(?ancestor, ?subsidiary) AS ?company)

  OPTIONAL {{
    ?root p:P1830 ?stake .
    ?stake ps:P1830 ?subsidiary .
    OPTIONAL {{ ?stake pq:P1107 ?share . BIND(?share * 100 AS ?percent) }}
  }}

  OPTIONAL {{ ?company wdt:P452 ?industry . }}
  OPTIONAL {{ ?company wdt:P17 ?country . }}
  OPTIONAL {{ ?company wdt:P571 ?inception . }}
  OPTIONAL {{ ?company wdt:P159 ?hq . }}
  OPTIONAL {{ ?company wdt:P154 ?logo . }}
  OPTIONAL {{ ?company wdt:P2139 ?revenue . }}
  OPTIONAL {{ ?company wdt:P1128 ?employees . }}
  OPTIONAL {{ ?company wdt:P169 ?executive . }}
  OPTIONAL {{
    ?company schema:description ?description .
    FILTER(LANG(?description) IN ({description_langs}))
  }}

  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{languages}". }}
}}
LIMIT {limit}"#,
        limit = options.row_limit,
    )
}

/// Reference URL for an entity, derived from its identifier.
pub fn entity_url(id: &str) -> String {
    format!("https://www.wikidata.org/wiki/{id}")
}

/// Owned-by property path bounded to `depth` hops: the first hop is
/// mandatory, the remaining ones optional.
fn ownership_path(depth: usize) -> String {
    let mut path = String::from("wdt:P127");
    for _ in 1..depth.max(1) {
        path.push_str("/wdt:P127?");
    }
    path
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
