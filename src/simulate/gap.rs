//! Schema gap analysis
//!
//! Once a question is matched to a use-case pattern, the current schema is
//! checked against the classes, relationships, and properties that pattern
//! needs. Missing classes are fatal for the use case; missing relationships
//! or properties degrade it.

use serde::Serialize;

use crate::graph::GraphView;
use crate::simulate::patterns::QueryPattern;

/// Simulation verdict for one question against one schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    /// Required classes and relationships are present; property gaps are
    /// advisory and do not block success
    Success,
    /// Query runs, but required relationships are missing
    Partial,
    /// Required classes are missing, or no pattern matched at all
    Fail,
}

impl std::fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationStatus::Success => write!(f, "success"),
            SimulationStatus::Partial => write!(f, "partial"),
            SimulationStatus::Fail => write!(f, "fail"),
        }
    }
}

/// What kind of schema element a gap report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Nodes,
    Edges,
    Properties,
}

/// One human-readable block of the gap breakdown
#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub kind: GapKind,
    pub title: String,
    pub items: Vec<String>,
    pub suggestion: String,
}

/// Result of checking a pattern's requirements against a schema
#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    pub missing_nodes: Vec<String>,
    pub missing_edges: Vec<String>,
    pub missing_properties: Vec<String>,
}

impl GapAnalysis {
    pub fn is_complete(&self) -> bool {
        self.missing_nodes.is_empty()
            && self.missing_edges.is_empty()
            && self.missing_properties.is_empty()
    }

    /// Missing classes block the query outright; missing relationships
    /// degrade it. Missing properties alone never demote the status.
    pub fn status(&self) -> SimulationStatus {
        if self.missing_nodes.is_empty() && self.missing_edges.is_empty() {
            SimulationStatus::Success
        } else if !self.missing_nodes.is_empty() {
            SimulationStatus::Fail
        } else {
            SimulationStatus::Partial
        }
    }

    /// One report block per non-empty gap category
    pub fn reports(&self) -> Vec<GapReport> {
        let mut reports = Vec::new();
        if !self.missing_nodes.is_empty() {
            reports.push(GapReport {
                kind: GapKind::Nodes,
                title: "Missing classes".to_string(),
                items: self.missing_nodes.clone(),
                suggestion: "Add these classes to the schema so this question can be answered."
                    .to_string(),
            });
        }
        if !self.missing_edges.is_empty() {
            reports.push(GapReport {
                kind: GapKind::Edges,
                title: "Missing relationships".to_string(),
                items: self.missing_edges.clone(),
                suggestion:
                    "Connect the classes with these relationships for a complete answer."
                        .to_string(),
            });
        }
        if !self.missing_properties.is_empty() {
            reports.push(GapReport {
                kind: GapKind::Properties,
                title: "Missing properties".to_string(),
                items: self.missing_properties.clone(),
                suggestion: "Add these properties to make the answer more precise.".to_string(),
            });
        }
        reports
    }
}

/// Checks a pattern's required nodes, edges, and properties against a view.
///
/// Class matching compares the first word of the required node name against
/// class labels, case-insensitively, so "Recruitment Stage" is satisfied by
/// a class labeled "recruitment_stage" or "Recruitment". Relationship labels
/// are compared case-sensitively since they are conventionally uppercase.
pub fn analyze_gaps(pattern: &QueryPattern, view: &GraphView) -> GapAnalysis {
    let labels: Vec<&str> = view.labels().collect();
    let edge_labels: Vec<&str> = view.edge_labels().collect();
    let property_names: Vec<&str> = view.property_names().collect();

    let missing_nodes = pattern
        .required_nodes
        .iter()
        .copied()
        .filter(|name: &&str| {
            let token = name.split_whitespace().next().unwrap_or(*name).to_lowercase();
            !labels.iter().any(|label| label.to_lowercase().contains(&token))
        })
        .map(str::to_string)
        .collect();

    let missing_edges = pattern
        .required_edges
        .iter()
        .copied()
        .filter(|name: &&str| !edge_labels.iter().any(|label| label.contains(*name)))
        .map(str::to_string)
        .collect();

    let missing_properties = pattern
        .required_properties
        .iter()
        .copied()
        .filter(|name: &&str| !property_names.iter().any(|p| p.contains(*name)))
        .map(str::to_string)
        .collect();

    GapAnalysis {
        missing_nodes,
        missing_edges,
        missing_properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeProperty, SchemaEdge, SchemaNode};
    use crate::schema::{Cardinality, DataType};
    use crate::simulate::patterns::pattern_by_id;

    fn node(id: &str, label: &str, props: &[&str]) -> SchemaNode {
        SchemaNode {
            id: id.to_string(),
            label: label.to_string(),
            properties: props
                .iter()
                .map(|p| NodeProperty {
                    name: p.to_string(),
                    data_type: DataType::Text,
                    required: false,
                })
                .collect(),
        }
    }

    fn edge(id: &str, source: &str, target: &str, label: &str) -> SchemaEdge {
        SchemaEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
            cardinality: Cardinality::OneToMany,
        }
    }

    fn view(nodes: Vec<SchemaNode>, edges: Vec<SchemaEdge>) -> GraphView {
        GraphView { nodes, edges }
    }

    #[test]
    fn test_empty_schema_misses_everything() {
        let pattern = pattern_by_id("UC-007").unwrap();
        let analysis = analyze_gaps(pattern, &view(vec![], vec![]));
        assert_eq!(analysis.status(), SimulationStatus::Fail);
        assert_eq!(
            analysis.missing_nodes,
            vec!["Application", "Recruitment Stage", "Stage Transition"]
        );
    }

    #[test]
    fn test_first_token_matching_is_case_insensitive() {
        let pattern = pattern_by_id("UC-007").unwrap();
        let nodes = vec![
            node("c1", "application", &["current_stage", "timestamp"]),
            node("c2", "recruitment_stage", &["benchmark"]),
            node("c3", "stage_transition", &[]),
        ];
        let edges = vec![edge("r1", "c1", "c2", "PROGRESSES_TO")];
        let analysis = analyze_gaps(pattern, &view(nodes, edges));
        assert!(analysis.missing_nodes.is_empty());
        assert!(analysis.missing_edges.is_empty());
        assert_eq!(analysis.status(), SimulationStatus::Success);
    }

    #[test]
    fn test_edge_matching_is_case_sensitive() {
        let pattern = pattern_by_id("UC-007").unwrap();
        let nodes = vec![
            node("c1", "Application", &["current_stage", "timestamp"]),
            node("c2", "Recruitment Stage", &["benchmark"]),
            node("c3", "Stage Transition", &[]),
        ];
        let edges = vec![edge("r1", "c1", "c2", "progresses_to")];
        let analysis = analyze_gaps(pattern, &view(nodes, edges));
        assert_eq!(analysis.missing_edges, vec!["PROGRESSES_TO"]);
        assert_eq!(analysis.status(), SimulationStatus::Partial);
    }

    #[test]
    fn test_missing_properties_do_not_block_success() {
        let pattern = pattern_by_id("UC-007").unwrap();
        let nodes = vec![
            node("c1", "Application", &["current_stage"]),
            node("c2", "Recruitment Stage", &[]),
            node("c3", "Stage Transition", &[]),
        ];
        let edges = vec![edge("r1", "c1", "c2", "PROGRESSES_TO")];
        let analysis = analyze_gaps(pattern, &view(nodes, edges));
        assert_eq!(analysis.missing_properties, vec!["timestamp", "benchmark"]);
        assert_eq!(analysis.status(), SimulationStatus::Success);
        assert!(!analysis.is_complete());
        // Property gaps are still surfaced as an advisory report
        let reports = analysis.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, GapKind::Properties);
    }

    #[test]
    fn test_missing_nodes_take_priority_over_edges() {
        let pattern = pattern_by_id("UC-007").unwrap();
        let nodes = vec![node("c1", "Application", &[])];
        let analysis = analyze_gaps(pattern, &view(nodes, vec![]));
        assert!(!analysis.missing_nodes.is_empty());
        assert!(!analysis.missing_edges.is_empty());
        assert_eq!(analysis.status(), SimulationStatus::Fail);
    }
}
