use crate::classifier::{EntityClassifier, Position};
use crate::schema::{CompanyNode, NodeRole, OwnershipEdge, OwnershipGraph, OwnershipKind};
use std::collections::HashMap;
use wikidata::ResultRow;

const ANCESTOR_VAR: &str = "ancestor";
const SUBSIDIARY_VAR: &str = "subsidiary";
const PERCENT_VAR: &str = "percent";

const MIN_EDGE_WEIGHT: f64 = 1.0;
const MAX_EDGE_WEIGHT: f64 = 3.0;
const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Turns raw result rows into a deduplicated, classified graph centered
/// on one root entity. Pure CPU work; a fresh node/edge accumulator per
/// call, nothing shared across invocations.
pub struct GraphNormalizer {
    classifier: EntityClassifier,
}

impl GraphNormalizer {
    pub fn new(classifier: EntityClassifier) -> Self {
        Self { classifier }
    }

    pub fn default() -> Self {
        Self::new(EntityClassifier::default())
    }

    /// Normalize one result set. Empty input is a valid outcome and
    /// yields a root-only graph; malformed rows are skipped, never fatal.
    pub fn normalize(&self, root_id: &str, rows: &[ResultRow]) -> OwnershipGraph {
        let mut builder = GraphBuilder::new(root_id);

        for row in rows {
            let saw_ancestor = self.apply_position(&mut builder, row, Position::Ancestor);
            let saw_subsidiary = self.apply_position(&mut builder, row, Position::Descendant);
            if !saw_ancestor && !saw_subsidiary {
                tracing::debug!(root = root_id, "skipping row without entity reference");
            }
        }

        builder.finish()
    }

    /// Handle one of the row's two entity positions. Returns whether the
    /// position carried a reference at all.
    fn apply_position(
        &self,
        builder: &mut GraphBuilder,
        row: &ResultRow,
        position: Position,
    ) -> bool {
        let (var, label_var, depth) = match position {
            Position::Ancestor => (ANCESTOR_VAR, "ancestorLabel", -1),
            Position::Descendant => (SUBSIDIARY_VAR, "subsidiaryLabel", 1),
        };
        let Some(id) = row.entity_id(var) else {
            return false;
        };
        let label = row.literal(label_var);

        // A reference to the root itself only backfills root metadata.
        if id == builder.root_id {
            builder.fill_node(&id, label, row);
            return true;
        }

        let percentage = match position {
            Position::Ancestor => None,
            Position::Descendant => sanitize_percentage(row.number(PERCENT_VAR)),
        };

        if builder.contains(&id) {
            builder.fill_node(&id, label, row);
        } else {
            let role = self
                .classifier
                .classify(label.unwrap_or(&id), position, percentage);
            let mut node = CompanyNode::bare(&id, role, depth);
            fill_missing(&mut node, label, row);
            builder.insert_node(node);
        }

        let root_id = builder.root_id.clone();
        let edge = match position {
            Position::Ancestor => OwnershipEdge {
                source: id,
                target: root_id,
                kind: OwnershipKind::Owner,
                percentage: None,
                weight: DEFAULT_EDGE_WEIGHT,
            },
            Position::Descendant => OwnershipEdge {
                source: root_id,
                target: id,
                kind: descendant_kind(percentage),
                percentage,
                weight: edge_weight(percentage),
            },
        };
        builder.push_edge(edge);

        true
    }
}

/// Stakes are 0-100 by contract; mis-scaled upstream values are clamped
/// into that range and non-finite ones dropped before they reach an edge.
fn sanitize_percentage(percentage: Option<f64>) -> Option<f64> {
    percentage
        .filter(|pct| pct.is_finite())
        .map(|pct| pct.clamp(0.0, 100.0))
}

fn descendant_kind(percentage: Option<f64>) -> OwnershipKind {
    match percentage {
        Some(pct) if pct > 50.0 => OwnershipKind::Full,
        _ => OwnershipKind::Partial,
    }
}

/// Visualization weight, monotonic in the stake, clamped to a small
/// fixed range so one 100% edge does not dwarf the rest of the layout.
fn edge_weight(percentage: Option<f64>) -> f64 {
    match percentage {
        Some(pct) => {
            let scaled = MIN_EDGE_WEIGHT + pct / 100.0 * (MAX_EDGE_WEIGHT - MIN_EDGE_WEIGHT);
            scaled.clamp(MIN_EDGE_WEIGHT, MAX_EDGE_WEIGHT)
        }
        None => DEFAULT_EDGE_WEIGHT,
    }
}

/// Fill descriptive fields that are still unset from this row; never
/// overwrite a value that is already there. The identifier-fallback
/// label counts as unset.
fn fill_missing(node: &mut CompanyNode, label: Option<&str>, row: &ResultRow) {
    if node.label == node.id {
        if let Some(label) = label {
            if label != node.id {
                node.label = label.to_string();
            }
        }
    }
    if node.industry.is_none() {
        node.industry = row.literal("industryLabel").map(str::to_string);
    }
    if node.country.is_none() {
        node.country = row.literal("countryLabel").map(str::to_string);
    }
    if node.founding_year.is_none() {
        node.founding_year = row.year("inception");
    }
    if node.description.is_none() {
        node.description = row.literal("description").map(str::to_string);
    }
    if node.headquarters.is_none() {
        node.headquarters = row.literal("hqLabel").map(str::to_string);
    }
    if node.logo.is_none() {
        node.logo = row.value("logo").map(str::to_string);
    }
    if node.revenue.is_none() {
        node.revenue = row.number("revenue");
    }
    if node.employees.is_none() {
        node.employees = row.number("employees").map(|n| n as u64);
    }
    if node.executive.is_none() {
        node.executive = row.literal("executiveLabel").map(str::to_string);
    }
}

/// First-seen-ordered node and edge accumulator, seeded with the
/// synthetic root node.
struct GraphBuilder {
    root_id: String,
    nodes: Vec<CompanyNode>,
    node_index: HashMap<String, usize>,
    edges: Vec<OwnershipEdge>,
    edge_index: HashMap<(String, String), usize>,
}

impl GraphBuilder {
    fn new(root_id: &str) -> Self {
        let mut builder = Self {
            root_id: root_id.to_string(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
        };
        builder.insert_node(CompanyNode::bare(root_id, NodeRole::Root, 0));
        builder
    }

    fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    fn insert_node(&mut self, node: CompanyNode) {
        if !self.contains(&node.id) {
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
    }

    fn fill_node(&mut self, id: &str, label: Option<&str>, row: &ResultRow) {
        if let Some(&idx) = self.node_index.get(id) {
            fill_missing(&mut self.nodes[idx], label, row);
        }
    }

    /// Deduplicate on the ordered (source, target) pair. A duplicate
    /// replaces the stored edge only when it carries a percentage the
    /// stored one lacks; otherwise first seen wins.
    fn push_edge(&mut self, edge: OwnershipEdge) {
        let key = (edge.source.clone(), edge.target.clone());
        match self.edge_index.get(&key) {
            Some(&idx) => {
                let existing = &mut self.edges[idx];
                if existing.percentage.is_none() && edge.percentage.is_some() {
                    *existing = edge;
                }
            }
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }

    fn finish(self) -> OwnershipGraph {
        OwnershipGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
