//! Projected validation view
//!
//! Flattens the schema store into the `(nodes, edges)` shape both engines
//! consume. Links or relations pointing at entities that no longer exist
//! are treated as absent and excluded from the projection.

use serde::{Deserialize, Serialize};

use crate::schema::{Cardinality, DataType, OntologySchema};

/// A class node in the projected graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub id: String,
    pub label: String,
    pub properties: Vec<NodeProperty>,
}

/// A property as seen from a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProperty {
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
}

/// A relation edge in the projected graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub cardinality: Cardinality,
}

/// Read-only snapshot of the schema graph
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    pub nodes: Vec<SchemaNode>,
    pub edges: Vec<SchemaEdge>,
}

impl GraphView {
    /// Project a schema into nodes and edges
    pub fn from_schema(schema: &OntologySchema) -> Self {
        let nodes = schema
            .classes()
            .map(|class| SchemaNode {
                id: class.id.clone(),
                label: class.name.clone(),
                properties: schema
                    .class_properties(&class.id)
                    .into_iter()
                    .map(|p| NodeProperty {
                        name: p.name,
                        data_type: p.data_type,
                        required: p.required,
                    })
                    .collect(),
            })
            .collect();

        // Relations with a missing endpoint are dangling; skip them.
        let edges = schema
            .relations()
            .iter()
            .filter(|r| {
                schema.class(&r.source_class_id).is_some()
                    && schema.class(&r.target_class_id).is_some()
            })
            .map(|r| SchemaEdge {
                id: r.id.clone(),
                source: r.source_class_id.clone(),
                target: r.target_class_id.clone(),
                label: r.name.clone(),
                cardinality: r.cardinality,
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All class labels, for gap analysis
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.label.as_str())
    }

    /// All edge labels, for gap analysis
    pub fn edge_labels(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|e| e.label.as_str())
    }

    /// All property names, across nodes
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .flat_map(|n| n.properties.iter().map(|p| p.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{OntologyClass, OntologyProperty, OntologyRelation};

    #[test]
    fn test_projection_resolves_properties() {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("candidate", "Candidate"));
        schema.add_property(OntologyProperty::new("email", "email", DataType::Text));
        schema.link_property("candidate", "email", true);

        let view = GraphView::from_schema(&schema);
        assert_eq!(view.nodes.len(), 1);
        assert_eq!(view.nodes[0].properties.len(), 1);
        assert_eq!(view.nodes[0].properties[0].name, "email");
        assert!(view.nodes[0].properties[0].required);
    }

    #[test]
    fn test_projection_excludes_dangling_relations() {
        let mut schema = OntologySchema::new();
        schema.add_class(OntologyClass::new("candidate", "Candidate"));
        schema.add_relation(OntologyRelation {
            id: "r1".into(),
            source_class_id: "candidate".into(),
            target_class_id: "gone".into(),
            name: "CREATES".into(),
            cardinality: Cardinality::OneToMany,
            description: None,
        });

        let view = GraphView::from_schema(&schema);
        assert!(view.edges.is_empty());
    }
}
