//! Use-case simulation
//!
//! Answers "can this schema serve that question?" end to end: classify the
//! question against the pattern catalog, diff the schema against what the
//! pattern needs, and when the schema holds up, run the matching sample
//! query so the user sees concrete result rows.

pub mod dataset;
pub mod gap;
pub mod patterns;
pub mod queries;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use tracing::info;

use crate::graph::GraphView;
use crate::Result;

pub use gap::{analyze_gaps, GapAnalysis, GapKind, GapReport, SimulationStatus};
pub use patterns::{PatternMatcher, QueryPattern, DEFAULT_MIN_SCORE, QUERY_PATTERNS};
pub use queries::{execute_query, QueryTable};

/// Everything the simulator has to say about one question
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub status: SimulationStatus,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_use_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<GapAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<QueryTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SimulationOutcome {
    pub fn gap_reports(&self) -> Vec<GapReport> {
        self.gap.as_ref().map(|g| g.reports()).unwrap_or_default()
    }
}

/// Classifies questions and checks the schema against them
pub struct Simulator {
    matcher: PatternMatcher,
    suggester: SkimMatcherV2,
}

impl Simulator {
    pub fn new(min_match_score: u32) -> Self {
        Self {
            matcher: PatternMatcher::new(min_match_score),
            suggester: SkimMatcherV2::default(),
        }
    }

    /// Run the full pipeline for one question against one schema view
    pub fn analyze(&self, question: &str, view: &GraphView) -> Result<SimulationOutcome> {
        let Some((pattern, score)) = self.matcher.best_match(question) else {
            return Ok(self.unmatched(question));
        };
        info!(use_case = pattern.id, score, "question matched");

        let gap = analyze_gaps(pattern, view);
        let status = gap.status();
        let outcome = match status {
            SimulationStatus::Fail => SimulationOutcome {
                status,
                feedback: format!(
                    "The schema cannot answer \"{}\" yet: required classes are missing.",
                    pattern.name
                ),
                matched_use_case: Some(pattern.id.to_string()),
                gap: Some(gap),
                generated_query: None,
                table: None,
                suggestion: None,
            },
            SimulationStatus::Partial => SimulationOutcome {
                status,
                feedback: format!(
                    "The schema can partially answer \"{}\"; see the gaps below.",
                    pattern.name
                ),
                matched_use_case: Some(pattern.id.to_string()),
                generated_query: Some(pattern.template_query.to_string()),
                table: Some(execute_query(pattern.id, &dataset::sample_dataset())?),
                gap: Some(gap),
                suggestion: None,
            },
            SimulationStatus::Success => {
                let feedback = if gap.is_complete() {
                    format!("The schema fully supports \"{}\".", pattern.name)
                } else {
                    format!(
                        "The schema supports \"{}\"; the recommended properties below would sharpen the answer.",
                        pattern.name
                    )
                };
                SimulationOutcome {
                    status,
                    feedback,
                    matched_use_case: Some(pattern.id.to_string()),
                    generated_query: Some(pattern.template_query.to_string()),
                    table: Some(execute_query(pattern.id, &dataset::sample_dataset())?),
                    gap: Some(gap),
                    suggestion: None,
                }
            }
        };
        Ok(outcome)
    }

    /// No pattern cleared the score gate; point at the closest example
    /// question instead.
    fn unmatched(&self, question: &str) -> SimulationOutcome {
        let mut best: Option<(&str, i64)> = None;
        for pattern in QUERY_PATTERNS {
            for example in pattern.example_questions {
                if let Some(score) = self.suggester.fuzzy_match(example, question) {
                    match best {
                        Some((_, s)) if score <= s => {}
                        _ => best = Some((example, score)),
                    }
                }
            }
        }
        // Fall back to the catalog's first example when nothing is close.
        let example = best
            .map(|(example, _)| example)
            .or_else(|| {
                QUERY_PATTERNS
                    .first()
                    .and_then(|p| p.example_questions.first().copied())
            });

        SimulationOutcome {
            status: SimulationStatus::Fail,
            feedback: "The question does not match any supported use case.".to_string(),
            matched_use_case: None,
            gap: None,
            generated_query: None,
            table: None,
            suggestion: example.map(|e| format!("Try a question like: {e}")),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeProperty, SchemaEdge, SchemaNode};
    use crate::schema::{Cardinality, DataType};

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

    fn bottleneck_view() -> GraphView {
        GraphView {
            nodes: vec![
                node("c1", "Application", &["current_stage", "timestamp"]),
                node("c2", "Recruitment Stage", &["benchmark"]),
                node("c3", "Stage Transition", &[]),
            ],
            edges: vec![SchemaEdge {
                id: "r1".to_string(),
                source: "c1".to_string(),
                target: "c2".to_string(),
                label: "PROGRESSES_TO".to_string(),
                cardinality: Cardinality::OneToMany,
            }],
        }
    }

    #[test]
    fn test_complete_schema_succeeds_with_results() {
        let simulator = Simulator::default();
        let outcome = simulator
            .analyze("채용 프로세스에서 병목이 어디야?", &bottleneck_view())
            .unwrap();
        assert_eq!(outcome.status, SimulationStatus::Success);
        assert_eq!(outcome.matched_use_case.as_deref(), Some("UC-007"));
        assert!(outcome.generated_query.is_some());
        let table = outcome.table.unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Phone Screen");
    }

    #[test]
    fn test_empty_schema_fails_and_withholds_query() {
        let simulator = Simulator::default();
        let outcome = simulator
            .analyze("Why is hiring taking so long?", &GraphView::default())
            .unwrap();
        assert_eq!(outcome.status, SimulationStatus::Fail);
        assert!(outcome.generated_query.is_none());
        assert!(outcome.table.is_none());
        let gap = outcome.gap.unwrap();
        assert_eq!(
            gap.missing_nodes,
            vec!["Application", "Recruitment Stage", "Stage Transition"]
        );
    }

    #[test]
    fn test_partial_schema_still_runs_the_query() {
        let simulator = Simulator::default();
        let mut view = bottleneck_view();
        view.edges.clear();
        let outcome = simulator
            .analyze("채용 프로세스에서 병목이 어디야?", &view)
            .unwrap();
        assert_eq!(outcome.status, SimulationStatus::Partial);
        assert!(outcome.generated_query.is_some());
        assert!(outcome.table.is_some());
        let reports = outcome.gap_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, GapKind::Edges);
    }

    #[test]
    fn test_unmatched_question_suggests_an_example() {
        let simulator = Simulator::default();
        let outcome = simulator
            .analyze("what is the weather today", &bottleneck_view())
            .unwrap();
        assert_eq!(outcome.status, SimulationStatus::Fail);
        assert!(outcome.matched_use_case.is_none());
        assert!(outcome.gap.is_none());
        assert!(outcome.suggestion.is_some());
    }
}
