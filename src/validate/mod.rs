//! Schema Validation Engine
//!
//! A strategy-list engine: an ordered set of independent validators, each a
//! pure function over the projected `(nodes, edges)` graph. Every run is a
//! full recomputation; issues are never mutated incrementally.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::graph::{SchemaEdge, SchemaNode};

pub use rules::{
    CardinalityConsistencyValidator, CircularReferenceValidator, DuplicateClassValidator,
    OrphanNodeValidator, RequiredPropertyValidator,
};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation finding. Ephemeral, recomputed wholesale per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub id: String,
    pub level: ValidationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Offending node, for UI focus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Offending edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    pub validator_name: &'static str,
}

/// Issue count summary, by level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

/// Outcome of a full validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
}

/// A single validation rule over the projected graph
pub trait Validator {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn validate(&self, nodes: &[SchemaNode], edges: &[SchemaEdge]) -> Vec<ValidationIssue>;
}

/// Runs an ordered list of validators and aggregates their findings
pub struct ValidationEngine {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationEngine {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Engine with the standard rule set, in canonical order
    pub fn with_default_rules() -> Self {
        Self::new(vec![
            Box::new(DuplicateClassValidator),
            Box::new(CircularReferenceValidator),
            Box::new(RequiredPropertyValidator),
            Box::new(CardinalityConsistencyValidator),
            Box::new(OrphanNodeValidator),
        ])
    }

    pub fn validators(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(|v| v.as_ref())
    }

    /// Run every validator against the full graph
    pub fn validate(&self, nodes: &[SchemaNode], edges: &[SchemaEdge]) -> ValidationResult {
        let mut issues = Vec::new();

        for validator in &self.validators {
            let found = validator.validate(nodes, edges);
            debug!(validator = validator.name(), issues = found.len(), "validator run");
            issues.extend(found);
        }

        let summary = ValidationSummary {
            error_count: issues
                .iter()
                .filter(|i| i.level == ValidationLevel::Error)
                .count(),
            warning_count: issues
                .iter()
                .filter(|i| i.level == ValidationLevel::Warning)
                .count(),
            info_count: issues
                .iter()
                .filter(|i| i.level == ValidationLevel::Info)
                .count(),
        };

        ValidationResult {
            is_valid: summary.error_count == 0,
            issues,
            summary,
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphView;
    use crate::schema::{Cardinality, OntologyClass, OntologyRelation, OntologySchema};

    fn view_of(schema: &OntologySchema) -> GraphView {
        GraphView::from_schema(schema)
    }

    #[test]
    fn test_empty_schema_is_valid() {
        let engine = ValidationEngine::with_default_rules();
        let result = engine.validate(&[], &[]);
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("a", "Candidate"));
        schema.add_class(OntologyClass::new("b", "candidate"));
        schema.add_relation(OntologyRelation {
            id: "r1".into(),
            source_class_id: "a".into(),
            target_class_id: "b".into(),
            name: "REFERS".into(),
            cardinality: Cardinality::OneToOne,
            description: None,
        });
        let view = view_of(&schema);

        let engine = ValidationEngine::with_default_rules();
        let first = engine.validate(&view.nodes, &view.edges);
        let second = engine.validate(&view.nodes, &view.edges);
        assert_eq!(first.issues, second.issues);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn test_summary_counts_and_validity() {
        let mut schema = OntologySchema::new();
        // Duplicate names: two errors. Both orphans, and "Candidate" is in
        // the best-practice table with both properties missing: four warnings.
        schema.add_class(OntologyClass::new("a", "Candidate"));
        schema.add_class(OntologyClass::new("b", " candidate "));
        let view = view_of(&schema);

        let engine = ValidationEngine::with_default_rules();
        let result = engine.validate(&view.nodes, &view.edges);

        assert!(!result.is_valid);
        assert_eq!(result.summary.error_count, 2);
        assert_eq!(result.summary.warning_count, 4);
        assert_eq!(result.summary.info_count, 0);
    }

    #[test]
    fn test_warnings_do_not_block_validity() {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("a", "Department"));
        let view = view_of(&schema);

        let engine = ValidationEngine::with_default_rules();
        let result = engine.validate(&view.nodes, &view.edges);

        // A lone class is an orphan warning, but still valid.
        assert!(result.is_valid);
        assert_eq!(result.summary.warning_count, 1);
    }
}
