//! Persisted schema document
//!
//! The on-disk/wire representation is map-free: the two keyed collections
//! are encoded as ordered arrays of `(id, value)` entries so any JSON
//! consumer can read them without a native map type. Import reconstitutes
//! the BTreeMaps and re-applies property pool normalization; an embedded
//! checksum, when present, is verified before the schema is accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::checksum::Checksum;
use crate::error::{OntologyError, Result};
use crate::schema::{
    ClassPropertyLink, OntologyClass, OntologyProperty, OntologyRelation, OntologySchema,
};

/// Flat, map-free schema document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// (id, class) entries, in store iteration order
    pub classes: Vec<(String, OntologyClass)>,
    /// (id, property) entries, in store iteration order
    pub properties: Vec<(String, OntologyProperty)>,
    pub property_links: Vec<ClassPropertyLink>,
    pub relations: Vec<OntologyRelation>,
    pub version: u64,
    pub last_modified: DateTime<Utc>,
    /// SHA256 over the document body (all fields except this one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
}

impl SchemaDocument {
    /// Snapshot a schema into its wire form, with checksum
    pub fn from_schema(schema: &OntologySchema) -> Self {
        let mut doc = Self {
            classes: schema
                .classes()
                .map(|c| (c.id.clone(), c.clone()))
                .collect(),
            properties: schema
                .properties()
                .map(|p| (p.id.clone(), p.clone()))
                .collect(),
            property_links: schema.property_links().to_vec(),
            relations: schema.relations().to_vec(),
            version: schema.version(),
            last_modified: schema.last_modified(),
            checksum: None,
        };
        doc.checksum = Some(doc.body_checksum());
        doc
    }

    /// Reconstitute the schema. Verifies the checksum when one is present
    /// and re-normalizes the property pool.
    pub fn into_schema(self) -> Result<OntologySchema> {
        if let Some(expected) = &self.checksum {
            let actual = self.body_checksum();
            if *expected != actual {
                return Err(OntologyError::ChecksumMismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(OntologySchema::from_parts(
            self.classes.into_iter().map(|(_, c)| c).collect(),
            self.properties.into_iter().map(|(_, p)| p).collect(),
            self.property_links,
            self.relations,
            self.version,
            self.last_modified,
        ))
    }

    /// Checksum over the document with the checksum field cleared
    fn body_checksum(&self) -> Checksum {
        let body = Self {
            checksum: None,
            ..self.clone()
        };
        let value = serde_json::to_value(&body).unwrap_or_default();
        Checksum::from_json(&value)
    }

    /// Load a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let doc: Self = serde_json::from_str(&content)?;
        info!(path = %path.as_ref().display(), classes = doc.classes.len(), "loaded schema document");
        Ok(doc)
    }

    /// Write the document as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Cardinality, DataType};

    fn sample_schema() -> OntologySchema {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("candidate", "Candidate"));
        schema.add_class(OntologyClass::new("application", "Application"));
        schema.add_property(OntologyProperty::new("email", "email", DataType::Text));
        schema.link_property("candidate", "email", true);
        schema.add_relation(OntologyRelation {
            id: "r1".into(),
            source_class_id: "candidate".into(),
            target_class_id: "application".into(),
            name: "CREATES".into(),
            cardinality: Cardinality::OneToMany,
            description: None,
        });
        schema
    }

    #[test]
    fn test_round_trip() {
        let schema = sample_schema();
        let doc = SchemaDocument::from_schema(&schema);
        let restored = doc.into_schema().unwrap();

        assert_eq!(restored.class_count(), 2);
        assert_eq!(restored.property_count(), 1);
        assert_eq!(restored.property_links().len(), 1);
        assert_eq!(restored.relations().len(), 1);
        assert_eq!(restored.version(), schema.version());
    }

    #[test]
    fn test_tampered_document_fails_checksum() {
        let schema = sample_schema();
        let mut doc = SchemaDocument::from_schema(&schema);
        doc.classes[0].1.name = "Tampered".into();

        match doc.into_schema() {
            Err(OntologyError::ChecksumMismatch { .. }) => {}
            other => panic!("Expected ChecksumMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_import_without_checksum_is_accepted() {
        let schema = sample_schema();
        let mut doc = SchemaDocument::from_schema(&schema);
        doc.checksum = None;
        assert!(doc.into_schema().is_ok());
    }

    #[test]
    fn test_import_renormalizes_denormalized_pool() {
        let json = serde_json::json!({
            "classes": [["candidate", { "id": "candidate", "name": "Candidate" }]],
            "properties": [
                ["p1", { "id": "p1", "name": "Email", "data_type": "text" }],
                ["p2", { "id": "p2", "name": "email", "data_type": "text" }]
            ],
            "property_links": [
                { "class_id": "candidate", "property_id": "p2", "required": false }
            ],
            "relations": [],
            "version": 1,
            "last_modified": "2025-12-01T00:00:00Z"
        });
        let doc: SchemaDocument = serde_json::from_value(json).unwrap();
        let schema = doc.into_schema().unwrap();

        assert_eq!(schema.property_count(), 1);
        assert_eq!(schema.property_links()[0].property_id, "p1");
    }
}
