use serde::Deserialize;
use std::collections::HashMap;

/// SPARQL JSON results envelope. A body missing this shape is a
/// malformed response, never an empty result.
#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: ResultSet,
}

#[derive(Debug, Deserialize)]
pub struct ResultSet {
    pub bindings: Vec<HashMap<String, RdfTerm>>,
}

/// One bound value: a URI reference or a (possibly typed) literal.
#[derive(Debug, Clone, Deserialize)]
pub struct RdfTerm {
    #[serde(rename = "type")]
    pub term_type: String,
    pub value: String,
    #[serde(rename = "xml:lang")]
    pub lang: Option<String>,
    pub datatype: Option<String>,
}

impl RdfTerm {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            term_type: "uri".to_string(),
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            term_type: "literal".to_string(),
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }
}

/// One result row: a mapping from variable name to an optional term,
/// with typed accessors over the raw values.
#[derive(Debug, Clone)]
pub struct ResultRow {
    vars: HashMap<String, RdfTerm>,
}

impl ResultRow {
    pub fn new(vars: HashMap<String, RdfTerm>) -> Self {
        Self { vars }
    }

    /// Entity identifier bound to `var`: the last path segment of a URI
    /// term (`http://www.wikidata.org/entity/Q380` -> `Q380`).
    pub fn entity_id(&self, var: &str) -> Option<String> {
        let term = self.vars.get(var)?;
        if term.term_type != "uri" {
            return None;
        }
        term.value
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Raw bound value regardless of term type (URIs and literals).
    pub fn value(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(|term| term.value.as_str())
    }

    pub fn literal(&self, var: &str) -> Option<&str> {
        self.vars
            .get(var)
            .filter(|term| term.term_type == "literal")
            .map(|term| term.value.as_str())
    }

    pub fn number(&self, var: &str) -> Option<f64> {
        self.literal(var)?.parse().ok()
    }

    /// Leading year of an xsd:dateTime literal like `1937-05-28T00:00:00Z`.
    pub fn year(&self, var: &str) -> Option<i32> {
        self.literal(var)?
            .trim_start_matches('+')
            .split('-')
            .next()?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: Vec<(&str, RdfTerm)>) -> ResultRow {
        ResultRow::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_parse_envelope() {
        let body = r#"{
            "head": { "vars": ["ancestor", "ancestorLabel"] },
            "results": { "bindings": [
                {
                    "ancestor": { "type": "uri", "value": "http://www.wikidata.org/entity/Q156578" },
                    "ancestorLabel": { "type": "literal", "value": "Volkswagen", "xml:lang": "de" }
                }
            ] }
        }"#;

        let envelope: SparqlResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.results.bindings.len(), 1);

        let row = ResultRow::new(envelope.results.bindings[0].clone());
        assert_eq!(row.entity_id("ancestor").as_deref(), Some("Q156578"));
        assert_eq!(row.literal("ancestorLabel"), Some("Volkswagen"));
        assert_eq!(row.literal("missing"), None);
    }

    #[test]
    fn test_missing_envelope_is_an_error() {
        assert!(serde_json::from_str::<SparqlResponse>(r#"{"foo": 1}"#).is_err());
        assert!(serde_json::from_str::<SparqlResponse>(r#"{"results": {}}"#).is_err());
    }

    #[test]
    fn test_entity_id_requires_uri_term() {
        let r = row(vec![("company", RdfTerm::literal("Q380"))]);
        assert_eq!(r.entity_id("company"), None);
    }

    #[test]
    fn test_number_and_year() {
        let r = row(vec![
            ("percent", RdfTerm::literal("74.9")),
            ("inception", RdfTerm::literal("1937-05-28T00:00:00Z")),
            ("employees", RdfTerm::literal("not a number")),
        ]);

        assert_eq!(r.number("percent"), Some(74.9));
        assert_eq!(r.year("inception"), Some(1937));
        assert_eq!(r.number("employees"), None);
    }
}
