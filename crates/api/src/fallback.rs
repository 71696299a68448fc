use graph::{CompanyNode, NodeRole, OwnershipEdge, OwnershipGraph, OwnershipKind};
use wikidata::CompanySummary;

/// Curated ownership graph for a handful of prominent companies, served
/// when the upstream fetch fails. Same output shape and invariants as
/// the normalizer's result.
pub fn fallback_graph(id: &str) -> Option<OwnershipGraph> {
    match id {
        "Q156578" => Some(volkswagen()),
        "Q26678" => Some(bmw()),
        "Q9611" => Some(deutsche_telekom()),
        "Q380" => Some(meta()),
        _ => None,
    }
}

/// Curated search hits for an exact (case-insensitive) term match.
pub fn fallback_search(term: &str) -> Option<Vec<CompanySummary>> {
    let hits = match term.to_lowercase().trim() {
        "volkswagen" => vec![
            summary("Q156578", "Volkswagen", "deutscher Automobilhersteller"),
            summary(
                "Q703889",
                "Volkswagen Financial Services",
                "Finanzdienstleistungsunternehmen der Volkswagen AG",
            ),
        ],
        "bmw" => vec![
            summary("Q26678", "BMW", "deutscher Automobil- und Motorradhersteller"),
            summary("Q708513", "BMW Bank", "deutsche Autobank"),
        ],
        "mercedes" => vec![
            summary("Q36993", "Mercedes-Benz", "deutsche Automobil- und Motorradmarke"),
            summary("Q752916", "Mercedes-Benz Group", "deutscher Automobilhersteller"),
        ],
        "deutsche" => vec![
            summary("Q9598", "Deutsche Bank", "deutsches Kreditinstitut"),
            summary("Q9611", "Deutsche Telekom", "deutsches Telekommunikationsunternehmen"),
            summary("Q896366", "Deutsche Post", "deutsches Logistik- und Postunternehmen"),
        ],
        "amazon" => vec![summary("Q3884", "Amazon", "US-amerikanisches Technologieunternehmen")],
        "apple" => vec![summary("Q312", "Apple", "US-amerikanisches Technologieunternehmen")],
        "microsoft" => vec![summary("Q2283", "Microsoft", "US-amerikanisches Technologieunternehmen")],
        "meta" => vec![summary(
            "Q380",
            "Meta Platforms",
            "US-amerikanisches Technologieunternehmen, ehemals Facebook",
        )],
        "google" => vec![
            summary("Q95", "Google", "US-amerikanisches Technologieunternehmen"),
            summary("Q20800404", "Google LLC", "US-amerikanisches Unternehmen"),
        ],
        "netflix" => vec![summary("Q907311", "Netflix", "US-amerikanischer Streaming-Anbieter")],
        "tesla" => vec![summary("Q478214", "Tesla, Inc.", "US-amerikanischer Automobilhersteller")],
        _ => return None,
    };
    Some(hits)
}

fn volkswagen() -> OwnershipGraph {
    OwnershipGraph {
        nodes: vec![
            root("Q156578", "Volkswagen", "Automobilindustrie", "Deutschland"),
            subsidiary("Q703889", "Volkswagen Financial Services", None, Some("Deutschland")),
            subsidiary("Q165284", "Audi", Some("Automobilindustrie"), Some("Deutschland")),
            subsidiary("Q40", "Porsche", Some("Automobilindustrie"), Some("Deutschland")),
            subsidiary("Q41318", "SEAT", Some("Automobilindustrie"), Some("Spanien")),
            subsidiary("Q25169", "Škoda Auto", Some("Automobilindustrie"), Some("Tschechien")),
            subsidiary("Q38495", "Lamborghini", Some("Automobilindustrie"), Some("Italien")),
            subsidiary(
                "Q152175",
                "Bentley",
                Some("Automobilindustrie"),
                Some("Vereinigtes Königreich"),
            ),
        ],
        edges: vec![
            owned("Q156578", "Q703889"),
            owned("Q156578", "Q165284"),
            owned("Q156578", "Q40"),
            owned("Q156578", "Q41318"),
            owned("Q156578", "Q25169"),
            owned("Q156578", "Q152175"),
            // Lamborghini hangs off Audi, not the root
            owned("Q165284", "Q38495"),
        ],
    }
}

fn bmw() -> OwnershipGraph {
    OwnershipGraph {
        nodes: vec![
            root("Q26678", "BMW", "Automobilindustrie", "Deutschland"),
            subsidiary("Q708513", "BMW Bank", Some("Finanzdienstleistungen"), Some("Deutschland")),
            subsidiary(
                "Q152982",
                "Mini",
                Some("Automobilindustrie"),
                Some("Vereinigtes Königreich"),
            ),
            subsidiary(
                "Q30304",
                "Rolls-Royce Motor Cars",
                Some("Automobilindustrie"),
                Some("Vereinigtes Königreich"),
            ),
        ],
        edges: vec![
            owned("Q26678", "Q708513"),
            owned("Q26678", "Q152982"),
            owned("Q26678", "Q30304"),
        ],
    }
}

fn deutsche_telekom() -> OwnershipGraph {
    OwnershipGraph {
        nodes: vec![
            root("Q9611", "Deutsche Telekom", "Telekommunikation", "Deutschland"),
            subsidiary(
                "Q1137652",
                "T-Mobile US",
                Some("Telekommunikation"),
                Some("Vereinigte Staaten"),
            ),
            subsidiary(
                "Q705229",
                "Telekom Deutschland",
                Some("Telekommunikation"),
                Some("Deutschland"),
            ),
        ],
        edges: vec![owned("Q9611", "Q1137652"), owned("Q9611", "Q705229")],
    }
}

fn meta() -> OwnershipGraph {
    OwnershipGraph {
        nodes: vec![
            root("Q380", "Meta Platforms", "Technologie", "Vereinigte Staaten"),
            subsidiary("Q355", "Facebook", Some("Soziale Medien"), Some("Vereinigte Staaten")),
            subsidiary("Q209330", "Instagram", Some("Soziale Medien"), Some("Vereinigte Staaten")),
            subsidiary("Q1029", "WhatsApp", Some("Messaging"), Some("Vereinigte Staaten")),
            subsidiary("Q2301597", "Oculus VR", Some("Virtual Reality"), Some("Vereinigte Staaten")),
        ],
        edges: vec![
            owned("Q380", "Q355"),
            owned("Q380", "Q209330"),
            owned("Q380", "Q1029"),
            owned("Q380", "Q2301597"),
        ],
    }
}

fn root(id: &str, label: &str, industry: &str, country: &str) -> CompanyNode {
    let mut node = CompanyNode::bare(id, NodeRole::Root, 0);
    node.label = label.to_string();
    node.industry = Some(industry.to_string());
    node.country = Some(country.to_string());
    node
}

fn subsidiary(id: &str, label: &str, industry: Option<&str>, country: Option<&str>) -> CompanyNode {
    let mut node = CompanyNode::bare(id, NodeRole::Subsidiary, 1);
    node.label = label.to_string();
    node.industry = industry.map(str::to_string);
    node.country = country.map(str::to_string);
    node
}

fn owned(source: &str, target: &str) -> OwnershipEdge {
    OwnershipEdge {
        source: source.to_string(),
        target: target.to_string(),
        kind: OwnershipKind::Partial,
        percentage: None,
        weight: 1.0,
    }
}

fn summary(id: &str, label: &str, description: &str) -> CompanySummary {
    CompanySummary {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_has_no_fallback() {
        assert!(fallback_graph("Q999999").is_none());
        assert!(fallback_search("unheard-of company").is_none());
    }

    #[test]
    fn test_fallback_graphs_keep_the_root_invariant() {
        for id in ["Q156578", "Q26678", "Q9611", "Q380"] {
            let graph = fallback_graph(id).unwrap();

            let roots: Vec<_> = graph
                .nodes
                .iter()
                .filter(|n| n.role == NodeRole::Root)
                .collect();
            assert_eq!(roots.len(), 1, "{id}");
            assert_eq!(roots[0].id, id);
            assert_eq!(roots[0].depth, 0);
        }
    }

    #[test]
    fn test_fallback_edges_are_referentially_intact() {
        for id in ["Q156578", "Q26678", "Q9611", "Q380"] {
            let graph = fallback_graph(id).unwrap();
            let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

            for edge in &graph.edges {
                assert!(ids.contains(&edge.source.as_str()), "{id}: {}", edge.source);
                assert!(ids.contains(&edge.target.as_str()), "{id}: {}", edge.target);
            }
        }
    }

    #[test]
    fn test_search_matches_exact_terms_only() {
        assert!(fallback_search("bmw").is_some());
        assert!(fallback_search("BMW ").is_some());
        assert!(fallback_search("bmw bank").is_none());
    }
}
