use crate::schema::NodeRole;

/// Label markers that flag a financial/control vehicle rather than an
/// operating company. Known heuristic, inherently incomplete; the list
/// is injectable for that reason.
pub const HOLDING_MARKERS: &[&str] = &["holding", "group", "capital"];

/// Where an entity sits relative to the root in one result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Ancestor,
    Descendant,
}

/// Heuristic role assignment from label text and structural position.
pub struct EntityClassifier {
    markers: Vec<String>,
}

impl EntityClassifier {
    pub fn new(markers: &[&str]) -> Self {
        Self {
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    pub fn default() -> Self {
        Self::new(HOLDING_MARKERS)
    }

    /// Classify one non-root entity. The holding-marker check takes
    /// priority over the position-based defaults.
    pub fn classify(
        &self,
        label: &str,
        position: Position,
        percentage: Option<f64>,
    ) -> NodeRole {
        if self.is_holding(label) {
            return NodeRole::Holding;
        }

        match position {
            Position::Ancestor => NodeRole::Parent,
            // strict threshold: exactly 50% is still partial
            Position::Descendant => match percentage {
                Some(pct) if pct > 50.0 => NodeRole::FullyOwned,
                _ => NodeRole::PartiallyOwned,
            },
        }
    }

    fn is_holding(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.markers.iter().any(|marker| label.contains(marker))
    }
}
