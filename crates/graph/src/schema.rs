use serde::{Deserialize, Serialize};

/// Node classification. Exactly one node per graph is `Root`; the rest
/// come out of the entity classifier. `Subsidiary` is the plain owned
/// entity without stake information, used by curated datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    Root,
    Parent,
    Subsidiary,
    FullyOwned,
    PartiallyOwned,
    Holding,
}

/// Edge semantics: `Owner` for ancestor->root edges, `Full`/`Partial`
/// for root->descendant edges split on the 50% stake threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipKind {
    Owner,
    Full,
    Partial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNode {
    pub id: String,
    pub label: String,
    pub role: NodeRole,
    /// Signed distance from the root: ancestors -1, descendants +1.
    pub depth: i32,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub founding_year: Option<i32>,
    pub description: Option<String>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub revenue: Option<f64>,
    pub employees: Option<u64>,
    pub executive: Option<String>,
    pub source_url: String,
}

impl CompanyNode {
    /// Bare node: identifier as the label until a row supplies one, all
    /// descriptive fields unset.
    pub fn bare(id: &str, role: NodeRole, depth: i32) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            role,
            depth,
            industry: None,
            country: None,
            founding_year: None,
            description: None,
            headquarters: None,
            logo: None,
            revenue: None,
            employees: None,
            executive: None,
            source_url: wikidata::entity_url(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipEdge {
    pub source: String,
    pub target: String,
    pub kind: OwnershipKind,
    /// Stake in percent, 0-100, when the upstream data carries one.
    /// The normalizer clamps out-of-range upstream values into this range.
    pub percentage: Option<f64>,
    /// Visualization strength, monotonic in the percentage.
    pub weight: f64,
}

/// The normalized graph handed to the presenter. Built fresh per
/// request, not mutated after being returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipGraph {
    pub nodes: Vec<CompanyNode>,
    pub edges: Vec<OwnershipEdge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&NodeRole::FullyOwned).unwrap(),
            "\"fully-owned\""
        );
        assert_eq!(serde_json::to_string(&NodeRole::Root).unwrap(), "\"root\"");
        assert_eq!(
            serde_json::to_string(&OwnershipKind::Owner).unwrap(),
            "\"owner\""
        );
    }

    #[test]
    fn test_node_json_uses_camel_case() {
        let node = CompanyNode::bare("Q380", NodeRole::Root, 0);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["sourceUrl"], "https://www.wikidata.org/wiki/Q380");
        assert!(json.get("foundingYear").is_some());
        assert!(json.get("founding_year").is_none());
    }
}
