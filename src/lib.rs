//! ATS Ontology Editor Core
//!
//! The schema engine behind a recruiting-domain ontology editor: an
//! in-memory class/property/relation store with a pooled property model,
//! a rule-based validation engine over the schema graph, and a use-case
//! simulator that checks whether the schema can answer real recruiter
//! questions.
//!
//! ## Features
//!
//! - **Pooled Properties**: Properties are shared across classes and
//!   deduplicated by name and data type
//! - **Rule-Based Validation**: Duplicate classes, circular references,
//!   missing recommended properties, cardinality conflicts, orphan nodes
//! - **Use-Case Simulation**: Keyword matching of natural-language
//!   questions (Korean and English) against a catalog of recruiting use
//!   cases, with gap analysis and sample query execution
//! - **Checksum Validation**: SHA256 checksums ensure exported schemas
//!   are intact on re-import
//!
//! ## Architecture
//!
//! ```text
//! question ──▶ simulate::PatternMatcher ──▶ simulate::analyze_gaps ──▶ rows
//!                                │                    │
//! schema ──▶ graph::GraphView ───┴────────────────────┘
//!    │
//!    └──▶ validate::ValidationEngine ──▶ issues
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod graph;
pub mod revalidate;
pub mod schema;
pub mod simulate;
pub mod validate;
pub mod wire;

pub use checksum::Checksum;
pub use config::OntologyConfig;
pub use error::{OntologyError, Result};
pub use graph::GraphView;
pub use revalidate::Debouncer;
pub use schema::{Cardinality, DataType, OntologyClass, OntologyProperty, OntologyRelation, OntologySchema};
pub use simulate::{SimulationOutcome, SimulationStatus, Simulator};
pub use validate::{ValidationEngine, ValidationIssue, ValidationLevel, ValidationResult};
pub use wire::SchemaDocument;
