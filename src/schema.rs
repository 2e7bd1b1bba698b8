//! Ontology schema types and the schema store
//!
//! The store owns the canonical graph: classes, a deduplicated global
//! property pool, class↔property links, and directed relations. Validators
//! and the simulator consume read-only projections of it (see [`crate::graph`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{OntologyError, Result};

/// Data type of an ontology property
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Number,
    Date,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cardinality of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:N")]
    OneToMany,
    #[serde(rename = "N:1")]
    ManyToOne,
    #[serde(rename = "N:M")]
    ManyToMany,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1:1",
            Cardinality::OneToMany => "1:N",
            Cardinality::ManyToOne => "N:1",
            Cardinality::ManyToMany => "N:M",
        }
    }

    /// True for cardinalities that forbid parallel relations between the
    /// same (source, target) pair.
    pub fn is_functional(&self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::ManyToOne)
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named entity type in the ontology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyClass {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OntologyClass {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// A typed attribute in the global property pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyProperty {
    pub id: String,
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OntologyProperty {
    pub fn new(id: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type,
            description: None,
        }
    }

    /// Deduplication key: two properties with the same (lowercased name,
    /// data type) pair are semantically identical.
    pub fn pool_key(&self) -> (String, DataType) {
        (self.name.to_lowercase(), self.data_type)
    }
}

/// Links a property from the pool to a class. Unique by (class_id, property_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPropertyLink {
    pub class_id: String,
    pub property_id: String,
    pub required: bool,
}

/// A named, directed, cardinality-typed edge between two classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyRelation {
    pub id: String,
    pub source_class_id: String,
    pub target_class_id: String,
    pub name: String,
    pub cardinality: Cardinality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A property resolved for a specific class (pool entry + link flags)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProperty {
    pub id: String,
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
    pub description: Option<String>,
}

/// The canonical ontology schema.
///
/// Keyed collections use BTreeMap so iteration order is deterministic,
/// which keeps validation output stable across runs. Every mutation bumps
/// `version` and refreshes `last_modified`.
#[derive(Debug, Clone, PartialEq)]
pub struct OntologySchema {
    classes: BTreeMap<String, OntologyClass>,
    properties: BTreeMap<String, OntologyProperty>,
    property_links: Vec<ClassPropertyLink>,
    relations: Vec<OntologyRelation>,
    version: u64,
    last_modified: DateTime<Utc>,
}

impl Default for OntologySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologySchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
            properties: BTreeMap::new(),
            property_links: Vec::new(),
            relations: Vec::new(),
            version: 0,
            last_modified: Utc::now(),
        }
    }

    /// Rebuild a schema from raw parts (deserialization path).
    ///
    /// The property pool is re-normalized: entries sharing a (lowercased
    /// name, data type) key are merged to one id and links are remapped.
    /// Dedup must be reapplied here because imported documents are not
    /// assumed normalized.
    pub fn from_parts(
        classes: Vec<OntologyClass>,
        properties: Vec<OntologyProperty>,
        property_links: Vec<ClassPropertyLink>,
        relations: Vec<OntologyRelation>,
        version: u64,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let mut schema = Self {
            classes: classes.into_iter().map(|c| (c.id.clone(), c)).collect(),
            properties: BTreeMap::new(),
            property_links: Vec::new(),
            relations,
            version,
            last_modified,
        };

        let remap = normalize_properties(properties, &mut schema.properties);

        for link in property_links {
            let property_id = remap
                .get(&link.property_id)
                .cloned()
                .unwrap_or(link.property_id);
            schema.push_link(ClassPropertyLink {
                property_id,
                ..link
            });
        }

        schema
    }

    fn touch(&mut self) {
        self.version += 1;
        self.last_modified = Utc::now();
    }

    // push link unless the (class, property) pair already exists
    fn push_link(&mut self, link: ClassPropertyLink) -> bool {
        let exists = self
            .property_links
            .iter()
            .any(|l| l.class_id == link.class_id && l.property_id == link.property_id);
        if !exists {
            self.property_links.push(link);
        }
        !exists
    }

    // ========= Class operations =========

    pub fn add_class(&mut self, class: OntologyClass) {
        debug!(class_id = %class.id, name = %class.name, "add class");
        self.classes.insert(class.id.clone(), class);
        self.touch();
    }

    pub fn update_class(
        &mut self,
        id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<()> {
        let class = self
            .classes
            .get_mut(id)
            .ok_or_else(|| OntologyError::ClassNotFound(id.to_string()))?;
        if let Some(name) = name {
            class.name = name;
        }
        if description.is_some() {
            class.description = description;
        }
        self.touch();
        Ok(())
    }

    /// Remove a class, cascading to its property links and to relations
    /// where it is source or target.
    pub fn remove_class(&mut self, id: &str) -> Result<OntologyClass> {
        let class = self
            .classes
            .remove(id)
            .ok_or_else(|| OntologyError::ClassNotFound(id.to_string()))?;
        self.property_links.retain(|l| l.class_id != id);
        self.relations
            .retain(|r| r.source_class_id != id && r.target_class_id != id);
        self.touch();
        Ok(class)
    }

    pub fn class(&self, id: &str) -> Option<&OntologyClass> {
        self.classes.get(id)
    }

    pub fn classes(&self) -> impl Iterator<Item = &OntologyClass> {
        self.classes.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    // ========= Property operations (global pool) =========

    /// Add a property to the pool. If an entry with the same (name, data
    /// type) key already exists the existing id is returned and nothing
    /// changes.
    pub fn add_property(&mut self, prop: OntologyProperty) -> String {
        let key = prop.pool_key();
        if let Some(existing) = self.properties.values().find(|p| p.pool_key() == key) {
            return existing.id.clone();
        }
        let id = prop.id.clone();
        self.properties.insert(id.clone(), prop);
        self.touch();
        id
    }

    pub fn update_property(
        &mut self,
        id: &str,
        name: Option<String>,
        data_type: Option<DataType>,
        description: Option<String>,
    ) -> Result<()> {
        let prop = self
            .properties
            .get_mut(id)
            .ok_or_else(|| OntologyError::PropertyNotFound(id.to_string()))?;
        if let Some(name) = name {
            prop.name = name;
        }
        if let Some(data_type) = data_type {
            prop.data_type = data_type;
        }
        if description.is_some() {
            prop.description = description;
        }
        self.touch();
        Ok(())
    }

    /// Remove a property, cascading to links. Relations are unaffected.
    pub fn remove_property(&mut self, id: &str) -> Result<OntologyProperty> {
        let prop = self
            .properties
            .remove(id)
            .ok_or_else(|| OntologyError::PropertyNotFound(id.to_string()))?;
        self.property_links.retain(|l| l.property_id != id);
        self.touch();
        Ok(prop)
    }

    pub fn property(&self, id: &str) -> Option<&OntologyProperty> {
        self.properties.get(id)
    }

    pub fn properties(&self) -> impl Iterator<Item = &OntologyProperty> {
        self.properties.values()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    // ========= Property-class links =========

    /// Link a pool property to a class. Linking an existing pair is a no-op.
    pub fn link_property(&mut self, class_id: &str, property_id: &str, required: bool) {
        let added = self.push_link(ClassPropertyLink {
            class_id: class_id.to_string(),
            property_id: property_id.to_string(),
            required,
        });
        if added {
            self.touch();
        }
    }

    pub fn unlink_property(&mut self, class_id: &str, property_id: &str) {
        let before = self.property_links.len();
        self.property_links
            .retain(|l| !(l.class_id == class_id && l.property_id == property_id));
        if self.property_links.len() != before {
            self.touch();
        }
    }

    pub fn set_link_required(&mut self, class_id: &str, property_id: &str, required: bool) {
        let mut changed = false;
        for link in &mut self.property_links {
            if link.class_id == class_id && link.property_id == property_id {
                link.required = required;
                changed = true;
            }
        }
        if changed {
            self.touch();
        }
    }

    pub fn property_links(&self) -> &[ClassPropertyLink] {
        &self.property_links
    }

    /// Resolve the properties linked to a class. Links whose property no
    /// longer exists in the pool are skipped, not an error.
    pub fn class_properties(&self, class_id: &str) -> Vec<ClassProperty> {
        self.property_links
            .iter()
            .filter(|l| l.class_id == class_id)
            .filter_map(|l| {
                self.properties.get(&l.property_id).map(|p| ClassProperty {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    data_type: p.data_type,
                    required: l.required,
                    description: p.description.clone(),
                })
            })
            .collect()
    }

    // ========= Relation operations =========

    pub fn add_relation(&mut self, relation: OntologyRelation) {
        debug!(relation_id = %relation.id, name = %relation.name, "add relation");
        self.relations.push(relation);
        self.touch();
    }

    pub fn update_relation(
        &mut self,
        id: &str,
        name: Option<String>,
        cardinality: Option<Cardinality>,
        description: Option<String>,
    ) -> Result<()> {
        let rel = self
            .relations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| OntologyError::RelationNotFound(id.to_string()))?;
        if let Some(name) = name {
            rel.name = name;
        }
        if let Some(cardinality) = cardinality {
            rel.cardinality = cardinality;
        }
        if description.is_some() {
            rel.description = description;
        }
        self.touch();
        Ok(())
    }

    pub fn remove_relation(&mut self, id: &str) -> Result<OntologyRelation> {
        let pos = self
            .relations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| OntologyError::RelationNotFound(id.to_string()))?;
        let rel = self.relations.remove(pos);
        self.touch();
        Ok(rel)
    }

    pub fn relation(&self, id: &str) -> Option<&OntologyRelation> {
        self.relations.iter().find(|r| r.id == id)
    }

    pub fn relations(&self) -> &[OntologyRelation] {
        &self.relations
    }

    // ========= Metadata =========

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}

/// Merge pool entries sharing a (lowercased name, data type) key into a
/// single entry. Returns the old-id → surviving-id remap for link rewriting.
fn normalize_properties(
    properties: Vec<OntologyProperty>,
    pool: &mut BTreeMap<String, OntologyProperty>,
) -> BTreeMap<String, String> {
    let mut seen: BTreeMap<(String, DataType), String> = BTreeMap::new();
    let mut remap = BTreeMap::new();

    for prop in properties {
        let key = prop.pool_key();
        match seen.get(&key) {
            Some(existing_id) => {
                debug!(duplicate = %prop.id, kept = %existing_id, "merged duplicate pool property");
                remap.insert(prop.id.clone(), existing_id.clone());
            }
            None => {
                seen.insert(key, prop.id.clone());
                remap.insert(prop.id.clone(), prop.id.clone());
                pool.insert(prop.id.clone(), prop);
            }
        }
    }

    remap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class_schema() -> OntologySchema {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("candidate", "Candidate"));
        schema.add_class(OntologyClass::new("application", "Application"));
        schema
    }

    #[test]
    fn test_remove_class_cascades() {
        let mut schema = two_class_schema();
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

        schema.remove_class("candidate").unwrap();

        assert!(schema.class("candidate").is_none());
        assert!(schema.property_links().is_empty());
        assert!(schema.relations().is_empty());
        // The pool property survives
        assert!(schema.property("email").is_some());
    }

    #[test]
    fn test_remove_property_cascades_links_only() {
        let mut schema = two_class_schema();
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

        schema.remove_property("email").unwrap();

        assert!(schema.property_links().is_empty());
        assert_eq!(schema.relations().len(), 1);
    }

    #[test]
    fn test_duplicate_link_is_noop() {
        let mut schema = two_class_schema();
        schema.add_property(OntologyProperty::new("email", "email", DataType::Text));
        schema.link_property("candidate", "email", true);
        let version = schema.version();
        schema.link_property("candidate", "email", false);

        assert_eq!(schema.property_links().len(), 1);
        assert!(schema.property_links()[0].required);
        assert_eq!(schema.version(), version);
    }

    #[test]
    fn test_add_property_merges_by_key() {
        let mut schema = OntologySchema::new();
        let first = schema.add_property(OntologyProperty::new("email", "Email", DataType::Text));
        let second = schema.add_property(OntologyProperty::new("email2", "email", DataType::Text));

        assert_eq!(first, second);
        assert_eq!(schema.property_count(), 1);
    }

    #[test]
    fn test_pool_keys_order_deterministically() {
        // Pool normalization keys a BTreeMap by (name, data type), so the
        // key must order totally and consistently.
        let mut keys: BTreeMap<(String, DataType), &str> = BTreeMap::new();
        keys.insert(
            OntologyProperty::new("p1", "email", DataType::Text).pool_key(),
            "p1",
        );
        keys.insert(
            OntologyProperty::new("p2", "email", DataType::Number).pool_key(),
            "p2",
        );
        keys.insert(
            OntologyProperty::new("p3", "Email", DataType::Text).pool_key(),
            "p3",
        );

        // p3 collides with p1 and replaces it; the two survivors iterate
        // in a stable order.
        assert_eq!(keys.len(), 2);
        let ids: Vec<_> = keys.values().copied().collect();
        assert_eq!(ids, vec!["p3", "p2"]);
    }

    #[test]
    fn test_from_parts_renormalizes_pool() {
        let schema = OntologySchema::from_parts(
            vec![OntologyClass::new("candidate", "Candidate")],
            vec![
                OntologyProperty::new("p1", "Email", DataType::Text),
                OntologyProperty::new("p2", "email", DataType::Text),
                OntologyProperty::new("p3", "email", DataType::Number),
            ],
            vec![
                ClassPropertyLink {
                    class_id: "candidate".into(),
                    property_id: "p2".into(),
                    required: true,
                },
            ],
            vec![],
            3,
            Utc::now(),
        );

        // p2 merged into p1; p3 differs by data type and survives
        assert_eq!(schema.property_count(), 2);
        assert_eq!(schema.property_links().len(), 1);
        assert_eq!(schema.property_links()[0].property_id, "p1");
    }

    #[test]
    fn test_mutations_bump_version() {
        let mut schema = OntologySchema::new();
        assert_eq!(schema.version(), 0);
        schema.add_class(OntologyClass::new("a", "A"));
        assert_eq!(schema.version(), 1);
        schema.update_class("a", Some("B".into()), None).unwrap();
        assert_eq!(schema.version(), 2);
    }

    #[test]
    fn test_class_properties_skips_dangling_links() {
        let mut schema = two_class_schema();
        schema.add_property(OntologyProperty::new("email", "email", DataType::Text));
        schema.link_property("candidate", "email", true);
        // Simulate a dangling link by removing the property out from under it
        schema.remove_property("email").unwrap();
        schema.link_property("candidate", "ghost", false);

        assert!(schema.class_properties("candidate").is_empty());
    }
}
