use dashmap::DashMap;
use graph::OwnershipGraph;
use sha2::{Digest, Sha256};
use wikidata::QueryOptions;

/// In-memory cache of normalized graphs. The key covers the query
/// options too, so a config change never serves a stale shape.
pub struct GraphCache {
    graphs: DashMap<String, OwnershipGraph>,
    max_entries: usize,
}

impl GraphCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            graphs: DashMap::new(),
            max_entries,
        }
    }

    pub fn key(id: &str, options: &QueryOptions) -> String {
        let mut hasher = Sha256::new();
        hasher.update(id.as_bytes());
        hasher.update([0u8]);
        hasher.update(options.max_depth.to_le_bytes());
        hasher.update(options.row_limit.to_le_bytes());
        for language in &options.languages {
            hasher.update(language.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<OwnershipGraph> {
        self.graphs.get(key).map(|entry| entry.value().clone())
    }

    pub fn set(&self, key: String, graph: OwnershipGraph) {
        if self.graphs.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self
                .graphs
                .iter()
                .take(self.max_entries / 4)
                .map(|entry| entry.key().clone())
                .collect();
            for key in to_remove {
                self.graphs.remove(&key);
            }
        }
        self.graphs.insert(key, graph);
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph::{CompanyNode, NodeRole};

    fn root_only(id: &str) -> OwnershipGraph {
        OwnershipGraph {
            nodes: vec![CompanyNode::bare(id, NodeRole::Root, 0)],
            edges: vec![],
        }
    }

    #[test]
    fn test_set_then_get() {
        let cache = GraphCache::new(16);
        let key = GraphCache::key("Q380", &QueryOptions::default());

        assert!(cache.get(&key).is_none());
        cache.set(key.clone(), root_only("Q380"));

        let hit = cache.get(&key).unwrap();
        assert_eq!(hit.nodes[0].id, "Q380");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_depends_on_options() {
        let defaults = QueryOptions::default();
        let shallow = QueryOptions {
            max_depth: 1,
            ..QueryOptions::default()
        };

        assert_ne!(
            GraphCache::key("Q380", &defaults),
            GraphCache::key("Q380", &shallow)
        );
        assert_ne!(
            GraphCache::key("Q380", &defaults),
            GraphCache::key("Q312", &defaults)
        );
        assert_eq!(
            GraphCache::key("Q380", &defaults),
            GraphCache::key("Q380", &QueryOptions::default())
        );
    }

    #[test]
    fn test_eviction_keeps_cache_bounded() {
        let cache = GraphCache::new(8);
        for i in 0..32 {
            let id = format!("Q{i}");
            cache.set(GraphCache::key(&id, &QueryOptions::default()), root_only(&id));
        }
        assert!(cache.len() <= 8);
    }
}
