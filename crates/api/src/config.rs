use serde::{Deserialize, Serialize};
use wikidata::QueryOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_addr: String,
    /// SPARQL endpoint of the upstream knowledge graph.
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub max_depth: usize,
    pub row_limit: usize,
    pub languages: Vec<String>,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            endpoint: "https://query.wikidata.org/sparql".to_string(),
            request_timeout_secs: 8,
            max_depth: 3,
            row_limit: 100,
            languages: vec!["de".to_string(), "en".to_string()],
            cache: CacheConfig {
                enabled: true,
                max_entries: 1000,
            },
        }
    }
}

impl AppConfig {
    /// Defaults with `KONZERNATLAS_*` environment overrides; unparseable
    /// values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("KONZERNATLAS_BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Ok(v) = std::env::var("KONZERNATLAS_ENDPOINT") {
            config.endpoint = v;
        }
        if let Some(v) = env_parse("KONZERNATLAS_TIMEOUT_SECS") {
            config.request_timeout_secs = v;
        }
        if let Some(v) = env_parse("KONZERNATLAS_MAX_DEPTH") {
            config.max_depth = v;
        }
        if let Some(v) = env_parse("KONZERNATLAS_ROW_LIMIT") {
            config.row_limit = v;
        }
        if let Ok(v) = std::env::var("KONZERNATLAS_LANGUAGES") {
            let languages: Vec<String> = v
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if !languages.is_empty() {
                config.languages = languages;
            }
        }
        if let Some(v) = env_parse("KONZERNATLAS_CACHE_ENABLED") {
            config.cache.enabled = v;
        }
        if let Some(v) = env_parse("KONZERNATLAS_CACHE_MAX_ENTRIES") {
            config.cache.max_entries = v;
        }

        config
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            max_depth: self.max_depth,
            row_limit: self.row_limit,
            languages: self.languages.clone(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_public_endpoint() {
        let config = AppConfig::default();

        assert_eq!(config.endpoint, "https://query.wikidata.org/sparql");
        assert_eq!(config.request_timeout_secs, 8);
        assert_eq!(config.max_depth, 3);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_query_options_mapping() {
        let config = AppConfig::default();
        let options = config.query_options();

        assert_eq!(options.max_depth, config.max_depth);
        assert_eq!(options.row_limit, config.row_limit);
        assert_eq!(options.languages, config.languages);
    }
}
