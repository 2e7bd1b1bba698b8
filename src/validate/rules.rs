//! The standard validation rule set
//!
//! Five independent rules: duplicate class names, circular references,
//! recommended ATS properties, cardinality consistency, and orphan nodes.
//! Each is a pure function over the projected graph; none touches shared
//! state.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::graph::{SchemaEdge, SchemaNode};
use crate::validate::{ValidationIssue, ValidationLevel, Validator};

// =============================================================================
// Duplicate class names
// =============================================================================

/// Flags class nodes sharing a case-insensitive, trimmed name.
///
/// One issue per offending node, not per group, so every duplicate is
/// individually navigable in the editor.
pub struct DuplicateClassValidator;

impl Validator for DuplicateClassValidator {
    fn name(&self) -> &'static str {
        "DuplicateClassValidator"
    }

    fn description(&self) -> &'static str {
        "Detects classes sharing a name"
    }

    fn validate(&self, nodes: &[SchemaNode], _edges: &[SchemaEdge]) -> Vec<ValidationIssue> {
        let mut groups: BTreeMap<String, Vec<&SchemaNode>> = BTreeMap::new();
        for node in nodes {
            groups
                .entry(node.label.trim().to_lowercase())
                .or_default()
                .push(node);
        }

        let mut issues = Vec::new();
        for group in groups.values().filter(|g| g.len() > 1) {
            for node in group {
                issues.push(ValidationIssue {
                    id: format!("duplicate-{}", node.id),
                    level: ValidationLevel::Error,
                    message: format!("Duplicate class name: \"{}\"", node.label),
                    description: Some(format!(
                        "{} classes share this name. Class names should be unique.",
                        group.len()
                    )),
                    node_id: Some(node.id.clone()),
                    edge_id: None,
                    validator_name: self.name(),
                });
            }
        }
        issues
    }
}

// =============================================================================
// Circular references
// =============================================================================

/// Detects directed cycles (A → B → C → A) via DFS with a recursion stack.
///
/// DFS runs from every node so every cycle is reachable; cycles found from
/// multiple starting points are collapsed by their sorted label multiset,
/// first seen in node iteration order wins.
pub struct CircularReferenceValidator;

impl Validator for CircularReferenceValidator {
    fn name(&self) -> &'static str {
        "CircularReferenceValidator"
    }

    fn description(&self) -> &'static str {
        "Detects circular references (A -> B -> C -> A)"
    }

    fn validate(&self, nodes: &[SchemaNode], edges: &[SchemaEdge]) -> Vec<ValidationIssue> {
        let (graph, indices) = build_digraph(nodes, edges);

        let mut issues = Vec::new();
        let mut seen_cycles: HashSet<String> = HashSet::new();

        for node in nodes {
            let Some(&start) = indices.get(node.id.as_str()) else {
                continue;
            };
            let mut visited = HashSet::new();
            let mut stack = HashSet::new();
            let mut path = Vec::new();

            let Some(cycle) = detect_cycle(&graph, start, &mut visited, &mut stack, &mut path)
            else {
                continue;
            };

            let labels: Vec<&str> = cycle
                .iter()
                .map(|idx| graph[*idx])
                .map(|id| {
                    nodes
                        .iter()
                        .find(|n| n.id == id)
                        .map(|n| n.label.as_str())
                        .unwrap_or(id)
                })
                .collect();

            // Sorted-label key collapses the same cycle found from
            // different starting nodes. The path repeats its first node at
            // the end; drop that duplicate or the key differs per start.
            let mut key_parts = labels[..labels.len() - 1].to_vec();
            key_parts.sort_unstable();
            if !seen_cycles.insert(key_parts.join("\u{0}")) {
                continue;
            }

            issues.push(ValidationIssue {
                id: format!("circular-{}", node.id),
                level: ValidationLevel::Error,
                message: format!("Circular reference found: {}", labels.join(" -> ")),
                description: Some(
                    "Circular references undermine ontology consistency. Restructure the relations."
                        .to_string(),
                ),
                node_id: Some(node.id.clone()),
                edge_id: None,
                validator_name: self.name(),
            });
        }

        issues
    }
}

fn build_digraph<'a>(
    nodes: &'a [SchemaNode],
    edges: &'a [SchemaEdge],
) -> (DiGraph<&'a str, ()>, HashMap<&'a str, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut indices = HashMap::new();

    for node in nodes {
        indices.insert(node.id.as_str(), graph.add_node(node.id.as_str()));
    }
    for edge in edges {
        // Edges touching unknown nodes are dangling; skip them.
        if let (Some(&s), Some(&t)) = (
            indices.get(edge.source.as_str()),
            indices.get(edge.target.as_str()),
        ) {
            graph.add_edge(s, t, ());
        }
    }

    (graph, indices)
}

/// DFS returning the cycle path (first repeated node through its recurrence,
/// inclusive) or None.
fn detect_cycle(
    graph: &DiGraph<&str, ()>,
    node: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
    stack: &mut HashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    if stack.contains(&node) {
        let start = path.iter().position(|n| *n == node).unwrap_or(0);
        let mut cycle = path[start..].to_vec();
        cycle.push(node);
        return Some(cycle);
    }
    if visited.contains(&node) {
        return None;
    }

    visited.insert(node);
    stack.insert(node);
    path.push(node);

    for neighbor in graph.neighbors(node) {
        if let Some(cycle) = detect_cycle(graph, neighbor, visited, stack, path) {
            return Some(cycle);
        }
    }

    stack.remove(&node);
    path.pop();
    None
}

// =============================================================================
// Recommended ATS properties
// =============================================================================

/// ATS domain best practice: classes we recognize should carry these
/// properties. Advisory only, never blocks validity.
const RECOMMENDED_PROPERTIES: &[(&str, &[&str])] = &[
    ("Candidate", &["name", "email"]),
    ("Job Posting", &["title", "department_id"]),
    ("Application", &["applied_date", "current_stage"]),
    ("Interview", &["scheduled_date", "interview_type"]),
    ("Evaluation", &["overall_rating", "evaluation_date"]),
    ("Recruiter", &["name", "email"]),
    ("Interviewer", &["name", "email"]),
];

pub struct RequiredPropertyValidator;

impl Validator for RequiredPropertyValidator {
    fn name(&self) -> &'static str {
        "RequiredPropertyValidator"
    }

    fn description(&self) -> &'static str {
        "Checks ATS best-practice properties per class"
    }

    fn validate(&self, nodes: &[SchemaNode], _edges: &[SchemaEdge]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for node in nodes {
            // Classes outside the best-practice table are skipped.
            let Some((_, recommended)) = RECOMMENDED_PROPERTIES
                .iter()
                .find(|(name, _)| *name == node.label)
            else {
                continue;
            };

            let existing: HashSet<&str> = node.properties.iter().map(|p| p.name.as_str()).collect();

            for prop in recommended.iter().filter(|p| !existing.contains(**p)) {
                issues.push(ValidationIssue {
                    id: format!("missing-prop-{}-{}", node.id, prop),
                    level: ValidationLevel::Warning,
                    message: format!("Recommended property missing: \"{}\"", prop),
                    description: Some(format!(
                        "Adding a \"{}\" property to the {} class is recommended.",
                        prop, node.label
                    )),
                    node_id: Some(node.id.clone()),
                    edge_id: None,
                    validator_name: self.name(),
                });
            }
        }

        issues
    }
}

// =============================================================================
// Cardinality consistency
// =============================================================================

/// Parallel relations between the same (source, target) pair violate a
/// `1:1` or `N:1` cardinality: a functional direction admits only one edge.
/// One issue per offending class pair.
pub struct CardinalityConsistencyValidator;

impl Validator for CardinalityConsistencyValidator {
    fn name(&self) -> &'static str {
        "CardinalityConsistencyValidator"
    }

    fn description(&self) -> &'static str {
        "Checks edge cardinality consistency"
    }

    fn validate(&self, _nodes: &[SchemaNode], edges: &[SchemaEdge]) -> Vec<ValidationIssue> {
        let mut pairs: BTreeMap<(&str, &str), Vec<&SchemaEdge>> = BTreeMap::new();
        for edge in edges {
            pairs
                .entry((edge.source.as_str(), edge.target.as_str()))
                .or_default()
                .push(edge);
        }

        let mut issues = Vec::new();
        for group in pairs.values().filter(|g| g.len() > 1) {
            let Some(offender) = group.iter().find(|e| e.cardinality.is_functional()) else {
                // 1:N / N:M expect multiplicity; parallel edges are fine.
                continue;
            };
            issues.push(ValidationIssue {
                id: format!("cardinality-violation-{}", offender.id),
                level: ValidationLevel::Error,
                message: format!(
                    "Cardinality violation: duplicate {} relation",
                    offender.cardinality
                ),
                description: Some(format!(
                    "The {} relation is declared {} but {} parallel edges exist between the same classes.",
                    offender.label,
                    offender.cardinality,
                    group.len()
                )),
                node_id: None,
                edge_id: Some(offender.id.clone()),
                validator_name: self.name(),
            });
        }

        issues
    }
}

// =============================================================================
// Orphan nodes
// =============================================================================

/// Class nodes with no incident edge. Legal but suspicious, so a warning.
pub struct OrphanNodeValidator;

impl Validator for OrphanNodeValidator {
    fn name(&self) -> &'static str {
        "OrphanNodeValidator"
    }

    fn description(&self) -> &'static str {
        "Detects isolated classes with no relations"
    }

    fn validate(&self, nodes: &[SchemaNode], edges: &[SchemaEdge]) -> Vec<ValidationIssue> {
        let connected: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        nodes
            .iter()
            .filter(|n| !connected.contains(n.id.as_str()))
            .map(|node| ValidationIssue {
                id: format!("orphan-{}", node.id),
                level: ValidationLevel::Warning,
                message: format!("Isolated class: \"{}\"", node.label),
                description: Some(
                    "This class has no relations. Connect it to another class or remove it."
                        .to_string(),
                ),
                node_id: Some(node.id.clone()),
                edge_id: None,
                validator_name: self.name(),
            })
            .collect()
    }
}
