//! Read-only, serializable export of a registry.

use crate::attribute::AttributeKind;
use crate::element::PropertyValue;
use crate::graph::Graph;
use crate::registry::ModelRegistry;
use crate::relation::{RelationField, RelationKind};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::info;

/// Point-in-time copy of a whole registry, classes sorted by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub classes: Vec<ClassSnapshot>,
}

impl RegistrySnapshot {
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassSnapshot> {
        self.classes.iter().find(|class| class.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSnapshot {
    pub id: String,
    pub type_name: &'static str,
    /// Id of the modeled super class, or the simple type name when it was never modeled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    pub properties: BTreeMap<String, PropertyValue>,
    pub attributes: Vec<AttributeSnapshot>,
    pub relations: Vec<RelationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSnapshot {
    pub id: String,
    pub name: &'static str,
    pub kind: AttributeKind,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSnapshot {
    pub id: String,
    pub kind: RelationKind,
    /// `None` when the relation is not navigable from its source.
    pub source_field: Option<&'static str>,
    pub target_class: String,
    pub target_field: Option<&'static str>,
    pub reverse: String,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl ModelRegistry {
    /// Copies the registry under a single read lock.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let snapshot = capture(&self.graph().read());
        info!(classes = snapshot.classes.len(), "Captured registry snapshot");
        snapshot
    }
}

fn capture(graph: &Graph) -> RegistrySnapshot {
    let mut classes: Vec<_> = graph
        .class_indices()
        .map(|index| {
            let class = graph.class(index);
            let super_class = class.super_kind.and_then(|kind| match graph.class_for(kind) {
                Some(index) => Some(graph.class(index).id.to_string()),
                None => kind.simple_name().map(Cow::into_owned),
            });

            let attributes = class
                .attributes
                .iter()
                .map(|index| {
                    let attribute = graph.attribute(*index);
                    AttributeSnapshot {
                        id: attribute.id.to_string(),
                        name: attribute.key.name(),
                        kind: attribute.kind,
                        properties: attribute.properties.sorted(),
                    }
                })
                .collect();

            let relations = class
                .relations
                .iter()
                .map(|index| {
                    let relation = graph.relation(*index);
                    RelationSnapshot {
                        id: relation.id.to_string(),
                        kind: relation.kind,
                        source_field: relation.source_field.as_ref().map(RelationField::name),
                        target_class: graph.class(relation.target_class).id.to_string(),
                        target_field: relation.target_field.as_ref().map(RelationField::name),
                        reverse: graph.relation(relation.reverse).id.to_string(),
                        properties: relation.properties.sorted(),
                    }
                })
                .collect();

            ClassSnapshot {
                id: class.id.to_string(),
                type_name: class.kind.type_name(),
                super_class,
                properties: class.properties.sorted(),
                attributes,
                relations,
            }
        })
        .collect();

    classes.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.type_name.cmp(b.type_name)));
    RegistrySnapshot { classes }
}
