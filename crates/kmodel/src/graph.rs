//! The arena behind a registry.
//!
//! Classes, attributes and relations live in flat vectors and refer to each other by
//! index. Public handles carry the shared graph plus an index, so the graph itself never
//! holds a cycle of owning pointers, including the relation/reverse pair.

use crate::attribute::AttributeKind;
use crate::element::{Properties, PropertyValue};
use crate::error::ModelError;
use crate::kind::{ClassKind, FieldKey};
use crate::relation::{RelationField, RelationKind};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

pub(crate) type SharedGraph = Arc<RwLock<Graph>>;

/// Rendered in relation ids for a side that has no field, e.g. `Order.reviewer - Employee.null`.
pub(crate) const ABSENT_FIELD: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClassIndex(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct AttributeIndex(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RelationIndex(usize);

/// Addresses the property bag of any element.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ElementRef {
    Class(ClassIndex),
    Attribute(AttributeIndex),
    Relation(RelationIndex),
}

#[derive(Debug)]
pub(crate) struct ClassNode {
    pub(crate) kind: ClassKind,
    pub(crate) id: Arc<str>,
    pub(crate) super_kind: Option<ClassKind>,
    pub(crate) attributes: Vec<AttributeIndex>,
    pub(crate) relations: Vec<RelationIndex>,
    pub(crate) properties: Properties,
}

#[derive(Debug)]
pub(crate) struct AttributeNode {
    pub(crate) class: ClassIndex,
    pub(crate) kind: AttributeKind,
    pub(crate) key: FieldKey,
    pub(crate) id: Arc<str>,
    pub(crate) accessor: Arc<dyn Any + Send + Sync>,
    pub(crate) properties: Properties,
}

#[derive(Debug)]
pub(crate) struct RelationNode {
    pub(crate) kind: RelationKind,
    pub(crate) source_class: ClassIndex,
    pub(crate) target_class: ClassIndex,
    pub(crate) source_field: Option<RelationField>,
    pub(crate) target_field: Option<RelationField>,
    pub(crate) reverse: RelationIndex,
    pub(crate) id: Arc<str>,
    pub(crate) properties: Properties,
}

/// An attribute about to be bound to a class.
pub(crate) struct AttributeRequest {
    pub(crate) class: ClassIndex,
    pub(crate) kind: AttributeKind,
    pub(crate) key: FieldKey,
    pub(crate) accessor: Arc<dyn Any + Send + Sync>,
}

/// A relation about to be bound, described from the source side.
pub(crate) struct RelationRequest {
    pub(crate) kind: RelationKind,
    pub(crate) source_class: ClassIndex,
    pub(crate) target_class: ClassIndex,
    pub(crate) source_field: Option<RelationField>,
    pub(crate) target_field: Option<RelationField>,
}

#[derive(Debug, Default)]
pub(crate) struct Graph {
    classes: Vec<ClassNode>,
    by_kind: FxHashMap<ClassKind, ClassIndex>,
    attributes: Vec<AttributeNode>,
    relations: Vec<RelationNode>,
}

impl Graph {
    pub(crate) fn class(&self, index: ClassIndex) -> &ClassNode {
        &self.classes[index.0]
    }

    pub(crate) fn attribute(&self, index: AttributeIndex) -> &AttributeNode {
        &self.attributes[index.0]
    }

    pub(crate) fn relation(&self, index: RelationIndex) -> &RelationNode {
        &self.relations[index.0]
    }

    pub(crate) fn class_for(&self, kind: ClassKind) -> Option<ClassIndex> {
        self.by_kind.get(&kind).copied()
    }

    pub(crate) fn class_indices(&self) -> impl Iterator<Item = ClassIndex> + '_ {
        (0..self.classes.len()).map(ClassIndex)
    }

    pub(crate) fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the class registered for `kind`, minting it on first use.
    pub(crate) fn get_or_insert_class(&mut self, kind: ClassKind) -> Result<ClassIndex, ModelError> {
        if let Some(index) = self.class_for(kind) {
            return Ok(index);
        }

        let Some(id) = kind.simple_name().map(Arc::<str>::from) else {
            return Err(ModelError::InvalidClassIdentity {
                message: format!("`{}` has no stable simple name", kind.type_name()).into(),
                context: None,
            });
        };

        let index = ClassIndex(self.classes.len());
        self.classes.push(ClassNode {
            kind,
            id: Arc::clone(&id),
            super_kind: None,
            attributes: Vec::new(),
            relations: Vec::new(),
            properties: Properties::default(),
        });
        self.by_kind.insert(kind, index);

        debug!(class = %id, type_name = kind.type_name(), "Registered model class");
        Ok(index)
    }

    pub(crate) fn set_super_kind(&mut self, class: ClassIndex, super_kind: ClassKind) {
        let node = &mut self.classes[class.0];
        if let Some(previous) = node.super_kind.replace(super_kind)
            && previous != super_kind
        {
            trace!(
                class = %node.id,
                previous = previous.type_name(),
                current = super_kind.type_name(),
                "Super class overwritten"
            );
        }
    }

    pub(crate) fn set_property(&mut self, element: ElementRef, key: String, value: PropertyValue) {
        let properties = match element {
            ElementRef::Class(index) => &mut self.classes[index.0].properties,
            ElementRef::Attribute(index) => &mut self.attributes[index.0].properties,
            ElementRef::Relation(index) => &mut self.relations[index.0].properties,
        };
        properties.insert(key, value);
    }

    /// Finds the attribute bound to the same field, or creates it.
    ///
    /// An existing attribute keeps its first declared kind.
    pub(crate) fn bind_attribute(&mut self, request: AttributeRequest) -> AttributeIndex {
        let class = &self.classes[request.class.0];
        let existing =
            class.attributes.iter().copied().find(|index| self.attributes[index.0].key == request.key);
        if let Some(index) = existing {
            let node = &self.attributes[index.0];
            trace!(attribute = %node.id, kind = ?node.kind, requested = ?request.kind, "Reusing attribute");
            return index;
        }

        let name = request.key.name();
        let id: Arc<str> = Arc::from(format!("{}.{name}", class.id));
        let index = AttributeIndex(self.attributes.len());
        debug!(attribute = %id, kind = ?request.kind, "Registered attribute");

        self.attributes.push(AttributeNode {
            class: request.class,
            kind: request.kind,
            key: request.key,
            id,
            accessor: request.accessor,
            properties: Properties::default(),
        });
        self.classes[request.class.0].attributes.push(index);
        index
    }

    /// Finds a compatible relation for the request's fields, or creates the relation
    /// together with its reverse.
    ///
    /// The source field is looked up in the source class and the target field in the
    /// target class, so a field already bound from the other side is detected whatever
    /// the declaration order. Nothing is mutated when the request conflicts with an
    /// existing relation.
    pub(crate) fn bind_relation(
        &mut self,
        request: RelationRequest,
    ) -> Result<RelationIndex, ModelError> {
        let source_key = request.source_field.as_ref().map(RelationField::key);
        let target_key = request.target_field.as_ref().map(RelationField::key);

        if let Some(index) = self.find_relation(request.source_class, source_key, target_key) {
            self.check_compatible(index, (request.target_class, target_key, request.kind), &request)?;
            trace!(relation = %self.relations[index.0].id, "Reusing relation");
            return Ok(index);
        }

        if target_key.is_some()
            && let Some(index) = self.find_relation(request.target_class, target_key, source_key)
        {
            let expected = (request.source_class, source_key, request.kind.reverse());
            self.check_compatible(index, expected, &request)?;
            let forward = self.relations[index.0].reverse;
            trace!(relation = %self.relations[forward.0].id, "Reusing relation from its reverse");
            return Ok(forward);
        }

        Ok(self.insert_relation_pair(request))
    }

    /// Relation of `class` anchored on `source`, or on `target` when `source` is absent.
    fn find_relation(
        &self,
        class: ClassIndex,
        source: Option<FieldKey>,
        target: Option<FieldKey>,
    ) -> Option<RelationIndex> {
        self.classes[class.0].relations.iter().copied().find(|index| {
            let node = &self.relations[index.0];
            if node.source_class != class {
                return false;
            }
            let node_source = node.source_field.as_ref().map(RelationField::key);
            match source {
                Some(_) => node_source == source,
                None => {
                    node_source.is_none()
                        && node.target_field.as_ref().map(RelationField::key) == target
                },
            }
        })
    }

    /// Fails unless the relation at `index` points to the expected target class and
    /// field with the expected kind.
    fn check_compatible(
        &self,
        index: RelationIndex,
        (target_class, target_key, kind): (ClassIndex, Option<FieldKey>, RelationKind),
        request: &RelationRequest,
    ) -> Result<(), ModelError> {
        let node = &self.relations[index.0];
        let same_target_field = node.target_field.as_ref().map(RelationField::key) == target_key;

        if node.target_class == target_class && same_target_field && node.kind == kind {
            return Ok(());
        }

        let requested = self.relation_id(
            request.source_class,
            request.source_field.as_ref(),
            request.target_class,
            request.target_field.as_ref(),
        );
        Err(ModelError::RelationConflict {
            message: format!(
                "`{}` is already bound as {:?} `{}`, cannot redeclare it as {:?} `{requested}`",
                source_label(node),
                node.kind,
                node.id,
                request.kind,
            )
            .into(),
            context: None,
        })
    }

    fn insert_relation_pair(&mut self, request: RelationRequest) -> RelationIndex {
        let RelationRequest { kind, source_class, target_class, source_field, target_field } =
            request;

        let forward_index = RelationIndex(self.relations.len());
        let forward_id =
            self.relation_id(source_class, source_field.as_ref(), target_class, target_field.as_ref());

        // A relation whose dual is structurally itself (same class, same field on both
        // sides, symmetric kind) is its own reverse.
        let self_dual = source_class == target_class
            && kind.reverse() == kind
            && source_field.as_ref().map(RelationField::key)
                == target_field.as_ref().map(RelationField::key);

        if self_dual {
            self.relations.push(RelationNode {
                kind,
                source_class,
                target_class,
                source_field,
                target_field,
                reverse: forward_index,
                id: forward_id.clone(),
                properties: Properties::default(),
            });
            self.classes[source_class.0].relations.push(forward_index);
            debug!(relation = %forward_id, ?kind, "Registered self-dual relation");
            return forward_index;
        }

        let reverse_index = RelationIndex(forward_index.0 + 1);
        let reverse_id =
            self.relation_id(target_class, target_field.as_ref(), source_class, source_field.as_ref());

        self.relations.push(RelationNode {
            kind,
            source_class,
            target_class,
            source_field: source_field.clone(),
            target_field: target_field.clone(),
            reverse: reverse_index,
            id: forward_id.clone(),
            properties: Properties::default(),
        });
        self.relations.push(RelationNode {
            kind: kind.reverse(),
            source_class: target_class,
            target_class: source_class,
            source_field: target_field,
            target_field: source_field,
            reverse: forward_index,
            id: reverse_id.clone(),
            properties: Properties::default(),
        });
        self.classes[source_class.0].relations.push(forward_index);
        self.classes[target_class.0].relations.push(reverse_index);

        debug!(relation = %forward_id, reverse = %reverse_id, ?kind, "Registered relation pair");
        forward_index
    }

    fn relation_id(
        &self,
        source_class: ClassIndex,
        source_field: Option<&RelationField>,
        target_class: ClassIndex,
        target_field: Option<&RelationField>,
    ) -> Arc<str> {
        Arc::from(format!(
            "{}.{} - {}.{}",
            self.classes[source_class.0].id,
            source_field.map_or(ABSENT_FIELD, RelationField::name),
            self.classes[target_class.0].id,
            target_field.map_or(ABSENT_FIELD, RelationField::name),
        ))
    }
}

fn source_label(node: &RelationNode) -> String {
    node.source_field
        .as_ref()
        .or(node.target_field.as_ref())
        .map_or_else(|| node.id.to_string(), |field| field.key().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MutableField;

    struct Left {
        right: Option<u32>,
    }
    struct Right {
        left: Option<u32>,
    }

    fn left_field() -> RelationField {
        let field: MutableField<Left, Option<u32>> = crate::mutable_field!(Left, right);
        RelationField::new(field.key(), field.accessor())
    }

    fn right_field() -> RelationField {
        let field: MutableField<Right, Option<u32>> = crate::mutable_field!(Right, left);
        RelationField::new(field.key(), field.accessor())
    }

    #[test]
    fn test_get_or_insert_class_is_idempotent() {
        let mut graph = Graph::default();
        let first = graph.get_or_insert_class(ClassKind::of::<Left>()).unwrap();
        let second = graph.get_or_insert_class(ClassKind::of::<Left>()).unwrap();

        assert_eq!(first, second);
        assert_eq!(graph.class_count(), 1);
        assert_eq!(&*graph.class(first).id, "Left");
    }

    #[test]
    fn test_invalid_class_identity_is_not_registered() {
        let mut graph = Graph::default();
        let err = graph.get_or_insert_class(ClassKind::of::<(Left, Right)>()).unwrap_err();

        assert!(matches!(err, ModelError::InvalidClassIdentity { .. }));
        assert_eq!(graph.class_count(), 0);
    }

    #[test]
    fn test_relation_pair_links_both_classes() {
        let mut graph = Graph::default();
        let left = graph.get_or_insert_class(ClassKind::of::<Left>()).unwrap();
        let right = graph.get_or_insert_class(ClassKind::of::<Right>()).unwrap();

        let forward = graph
            .bind_relation(RelationRequest {
                kind: RelationKind::OneToOne,
                source_class: left,
                target_class: right,
                source_field: Some(left_field()),
                target_field: Some(right_field()),
            })
            .unwrap();
        let reverse = graph.relation(forward).reverse;

        assert_eq!(graph.relation(reverse).reverse, forward);
        assert_eq!(graph.class(left).relations, [forward]);
        assert_eq!(graph.class(right).relations, [reverse]);
        assert_eq!(&*graph.relation(forward).id, "Left.right - Right.left");
        assert_eq!(&*graph.relation(reverse).id, "Right.left - Left.right");
    }

    #[test]
    fn test_conflicting_kind_leaves_graph_untouched() {
        let mut graph = Graph::default();
        let left = graph.get_or_insert_class(ClassKind::of::<Left>()).unwrap();
        let right = graph.get_or_insert_class(ClassKind::of::<Right>()).unwrap();
        let request = |kind| RelationRequest {
            kind,
            source_class: left,
            target_class: right,
            source_field: Some(left_field()),
            target_field: Some(right_field()),
        };

        graph.bind_relation(request(RelationKind::OneToOne)).unwrap();
        let err = graph.bind_relation(request(RelationKind::ManyToOne)).unwrap_err();

        assert!(matches!(err, ModelError::RelationConflict { .. }));
        assert_eq!(graph.relations.len(), 2);
    }
}
