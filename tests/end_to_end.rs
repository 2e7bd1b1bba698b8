//! End-to-end tests: build a schema through the store, persist it, and run
//! both the validation engine and the question simulator against it.

use ats_ontology::schema::{Cardinality, DataType, OntologyClass, OntologyProperty, OntologyRelation};
use ats_ontology::simulate::SimulationStatus;
use ats_ontology::{
    GraphView, OntologySchema, SchemaDocument, SimulationOutcome, Simulator, ValidationEngine,
};

fn class(schema: &mut OntologySchema, id: &str, name: &str) {
    schema.add_class(OntologyClass::new(id, name));
}

fn prop(schema: &mut OntologySchema, class_id: &str, id: &str, name: &str) {
    let surviving = schema.add_property(OntologyProperty::new(id, name, DataType::Text));
    schema.link_property(class_id, &surviving, false);
}

fn relation(
    schema: &mut OntologySchema,
    id: &str,
    source: &str,
    target: &str,
    name: &str,
    cardinality: Cardinality,
) {
    schema.add_relation(OntologyRelation {
        id: id.to_string(),
        source_class_id: source.to_string(),
        target_class_id: target.to_string(),
        name: name.to_string(),
        cardinality,
        description: None,
    });
}

/// A schema rich enough to answer the bottleneck use case.
fn bottleneck_schema() -> OntologySchema {
    let mut schema = OntologySchema::new();
    class(&mut schema, "c1", "Application");
    class(&mut schema, "c2", "Recruitment Stage");
    class(&mut schema, "c3", "Stage Transition");
    prop(&mut schema, "c1", "p1", "current_stage");
    prop(&mut schema, "c3", "p2", "timestamp");
    prop(&mut schema, "c2", "p3", "benchmark");
    relation(
        &mut schema,
        "r1",
        "c1",
        "c2",
        "PROGRESSES_TO",
        Cardinality::OneToMany,
    );
    schema
}

fn analyze(schema: &OntologySchema, question: &str) -> SimulationOutcome {
    let view = GraphView::from_schema(schema);
    Simulator::default().analyze(question, &view).unwrap()
}

#[test]
fn test_clean_schema_validates_without_errors() {
    let schema = bottleneck_schema();
    let view = GraphView::from_schema(&schema);
    let result = ValidationEngine::with_default_rules().validate(&view.nodes, &view.edges);
    assert!(result.is_valid);
    assert_eq!(result.summary.error_count, 0);
}

#[test]
fn test_duplicate_and_cycle_are_reported_together() {
    let mut schema = bottleneck_schema();
    class(&mut schema, "c4", " application ");
    relation(&mut schema, "r2", "c2", "c1", "REVERTS_TO", Cardinality::OneToMany);

    let view = GraphView::from_schema(&schema);
    let result = ValidationEngine::with_default_rules().validate(&view.nodes, &view.edges);
    assert!(!result.is_valid);

    let validators: Vec<_> = result
        .issues
        .iter()
        .map(|i| i.validator_name)
        .collect();
    assert!(validators.contains(&"DuplicateClassValidator"));
    assert!(validators.contains(&"CircularReferenceValidator"));
}

#[test]
fn test_document_round_trip_preserves_validation_outcome() {
    let schema = bottleneck_schema();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");

    SchemaDocument::from_schema(&schema).save(&path).unwrap();
    let restored = SchemaDocument::load(&path).unwrap().into_schema().unwrap();

    assert_eq!(restored.class_count(), schema.class_count());
    let view = GraphView::from_schema(&restored);
    let result = ValidationEngine::with_default_rules().validate(&view.nodes, &view.edges);
    assert!(result.is_valid);
}

#[test]
fn test_simulator_succeeds_on_complete_schema() {
    let outcome = analyze(&bottleneck_schema(), "채용 프로세스에서 병목이 어디야?");
    assert_eq!(outcome.status, SimulationStatus::Success);
    assert_eq!(outcome.matched_use_case.as_deref(), Some("UC-007"));
    let table = outcome.table.expect("query should run");
    assert!(!table.rows.is_empty());
}

#[test]
fn test_simulator_reports_gaps_on_empty_schema() {
    let outcome = analyze(&OntologySchema::new(), "Why is hiring taking so long?");
    assert_eq!(outcome.status, SimulationStatus::Fail);
    assert!(outcome.generated_query.is_none());
    let gap = outcome.gap.expect("gap analysis should be present");
    assert_eq!(gap.missing_nodes.len(), 3);
}

#[test]
fn test_removing_a_required_class_fails_the_simulation() {
    let mut schema = bottleneck_schema();
    schema.remove_class("c1").unwrap();

    let outcome = analyze(&schema, "채용 프로세스에서 병목이 어디야?");
    assert_eq!(outcome.status, SimulationStatus::Fail);
    assert!(outcome.generated_query.is_none());
    let gap = outcome.gap.unwrap();
    assert_eq!(gap.missing_nodes, vec!["Application"]);
    // The relation cascaded away with its source class
    assert!(gap.missing_edges.contains(&"PROGRESSES_TO".to_string()));
}

#[test]
fn test_first_token_match_masks_a_removed_class() {
    // Class matching is a first-token substring check: with "Stage
    // Transition" gone, its token "stage" still matches the surviving
    // "Recruitment Stage" label, so the status stays success. The removed
    // class's property is still reported as an advisory gap.
    let mut schema = bottleneck_schema();
    schema.remove_class("c3").unwrap();

    let outcome = analyze(&schema, "채용 프로세스에서 병목이 어디야?");
    assert_eq!(outcome.status, SimulationStatus::Success);
    let gap = outcome.gap.unwrap();
    assert!(gap.missing_nodes.is_empty());
    assert!(gap.missing_properties.contains(&"timestamp".to_string()));
}
