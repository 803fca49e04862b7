//! Relations between model classes.
//!
//! Every relation is stored together with its dual. Declaring `B.partner -> C.partner`
//! as [`RelationKind::OneToOne`] also registers `C.partner -> B.partner` on `C`, and the
//! two are each other's [`ModelRelation::reverse`].

use crate::class::ModelClass;
use crate::element::{ModelElement, Properties, element_identity};
use crate::field::Accessor;
use crate::graph::{RelationIndex, SharedGraph};
use crate::kind::{ClassKind, FieldKey};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shape of a relation as seen from its source class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    /// Navigable from the source only; single target.
    OneTo,
    /// Navigable from the target only; single source.
    ToOne,
    OneToOne,
    /// The source holds a collection of targets, each target one back-reference.
    OneToMany,
    /// The source holds a single target, the target a collection of sources.
    ManyToOne,
}

impl RelationKind {
    /// Kind of the dual relation, seen from the other end.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::OneTo => Self::ToOne,
            Self::ToOne => Self::OneTo,
            Self::OneToOne => Self::OneToOne,
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
        }
    }

    #[must_use]
    pub const fn is_navigable_from_source(self) -> bool {
        !matches!(self, Self::ToOne)
    }

    #[must_use]
    pub const fn is_navigable_from_target(self) -> bool {
        !matches!(self, Self::OneTo)
    }

    /// Whether a source instance may reference several targets.
    #[must_use]
    pub const fn has_many_targets(self) -> bool {
        matches!(self, Self::OneToMany)
    }

    /// Whether a target instance may be referenced by several sources.
    #[must_use]
    pub const fn has_many_sources(self) -> bool {
        matches!(self, Self::ManyToOne)
    }
}

/// One end of a relation: the field that holds the association value.
#[derive(Clone)]
pub struct RelationField {
    key: FieldKey,
    writable: bool,
    accessor: Arc<dyn Any + Send + Sync>,
}

impl RelationField {
    pub(crate) fn new<C: 'static, V: 'static>(key: FieldKey, accessor: Accessor<C, V>) -> Self {
        Self { key, writable: accessor.set.is_some(), accessor: Arc::new(accessor) }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.key.name()
    }

    #[must_use]
    pub const fn key(&self) -> FieldKey {
        self.key
    }

    /// The class that declares this field.
    #[must_use]
    pub const fn owner(&self) -> ClassKind {
        self.key.owner()
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Typed read function, if `C` and `V` match the declared field.
    #[must_use]
    pub fn getter<C: 'static, V: 'static>(&self) -> Option<fn(&C) -> V> {
        self.accessor.downcast_ref::<Accessor<C, V>>().map(|accessor| accessor.get)
    }

    /// Typed write function, if `C` and `V` match and the field is writable.
    #[must_use]
    pub fn setter<C: 'static, V: 'static>(&self) -> Option<fn(&mut C, V)> {
        self.accessor.downcast_ref::<Accessor<C, V>>().and_then(|accessor| accessor.set)
    }
}

impl PartialEq for RelationField {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RelationField {}

impl fmt::Debug for RelationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationField")
            .field("key", &self.key)
            .field("writable", &self.writable)
            .finish_non_exhaustive()
    }
}

/// Handle to a relation registered in a [`ModelRegistry`](crate::ModelRegistry).
#[derive(Clone)]
pub struct ModelRelation {
    graph: SharedGraph,
    index: RelationIndex,
    id: Arc<str>,
}

impl ModelRelation {
    pub(crate) fn new(graph: SharedGraph, index: RelationIndex) -> Self {
        let id = graph.read().relation(index).id.clone();
        Self { graph, index, id }
    }

    pub(crate) const fn index(&self) -> RelationIndex {
        self.index
    }

    pub(crate) const fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    #[must_use]
    pub fn kind(&self) -> RelationKind {
        self.graph.read().relation(self.index).kind
    }

    #[must_use]
    pub fn source_class(&self) -> ModelClass {
        let class = self.graph.read().relation(self.index).source_class;
        ModelClass::new(self.graph.clone(), class)
    }

    #[must_use]
    pub fn target_class(&self) -> ModelClass {
        let class = self.graph.read().relation(self.index).target_class;
        ModelClass::new(self.graph.clone(), class)
    }

    /// Field on the source class; `None` when the relation is not navigable from there.
    #[must_use]
    pub fn source_field(&self) -> Option<RelationField> {
        self.graph.read().relation(self.index).source_field.clone()
    }

    /// Field on the target class; `None` when the relation is not navigable from there.
    #[must_use]
    pub fn target_field(&self) -> Option<RelationField> {
        self.graph.read().relation(self.index).target_field.clone()
    }

    /// The dual relation. `r.reverse().reverse()` is `r` itself.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let reverse = self.graph.read().relation(self.index).reverse;
        Self::new(self.graph.clone(), reverse)
    }

    /// Whether both handles address the same relation of the same registry.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.index == other.index
    }
}

impl ModelElement for ModelRelation {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> Properties {
        self.graph.read().relation(self.index).properties.clone()
    }
}

element_identity!(ModelRelation);

impl fmt::Debug for ModelRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRelation").field("id", &self.id).field("kind", &self.kind()).finish()
    }
}
