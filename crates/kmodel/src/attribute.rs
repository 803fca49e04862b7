use crate::class::ModelClass;
use crate::element::{ModelElement, Properties, element_identity};
use crate::field::Accessor;
use crate::graph::{AttributeIndex, SharedGraph};
use crate::kind::FieldKey;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// How an attribute reaches its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeKind {
    /// Stored field, read-only through the model.
    Immutable,
    /// Stored field, readable and writable.
    Mutable,
    /// Value computed by a method.
    Function,
}

/// Untyped handle to an attribute registered on a [`ModelClass`].
#[derive(Clone)]
pub struct ModelAttribute {
    graph: SharedGraph,
    index: AttributeIndex,
    id: Arc<str>,
}

impl ModelAttribute {
    pub(crate) fn new(graph: SharedGraph, index: AttributeIndex) -> Self {
        let id = graph.read().attribute(index).id.clone();
        Self { graph, index, id }
    }

    pub(crate) const fn index(&self) -> AttributeIndex {
        self.index
    }

    pub(crate) const fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.field_key().name()
    }

    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.graph.read().attribute(self.index).kind
    }

    #[must_use]
    pub fn field_key(&self) -> FieldKey {
        self.graph.read().attribute(self.index).key
    }

    #[must_use]
    pub fn model_class(&self) -> ModelClass {
        let class = self.graph.read().attribute(self.index).class;
        ModelClass::new(self.graph.clone(), class)
    }

    /// Read-only typed view; `None` if `T`/`V` do not match the declared field.
    #[must_use]
    pub fn typed<T: 'static, V: 'static>(&self) -> Option<Attribute<T, V>> {
        let get = self.accessor::<T, V>()?.get;
        Some(Attribute { attribute: self.clone(), get })
    }

    /// Read/write typed view; `None` unless the attribute is [`AttributeKind::Mutable`]
    /// and `T`/`V` match.
    #[must_use]
    pub fn mutable<T: 'static, V: 'static>(&self) -> Option<MutableAttribute<T, V>> {
        let accessor = self.accessor::<T, V>()?;
        let set = accessor.set?;
        Some(MutableAttribute { attribute: self.clone(), get: accessor.get, set })
    }

    fn accessor<T: 'static, V: 'static>(&self) -> Option<Accessor<T, V>> {
        self.graph.read().attribute(self.index).accessor.downcast_ref::<Accessor<T, V>>().copied()
    }
}

impl ModelElement for ModelAttribute {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> Properties {
        self.graph.read().attribute(self.index).properties.clone()
    }
}

element_identity!(ModelAttribute);

impl fmt::Debug for ModelAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAttribute").field("id", &self.id).field("kind", &self.kind()).finish()
    }
}

/// Typed, read-only view of an attribute of `T` holding a `V`.
///
/// Returned for [`AttributeKind::Immutable`] and [`AttributeKind::Function`] declarations.
pub struct Attribute<T, V> {
    attribute: ModelAttribute,
    get: fn(&T) -> V,
}

impl<T, V> Attribute<T, V> {
    pub(crate) fn from_parts(attribute: ModelAttribute, get: fn(&T) -> V) -> Self {
        Self { attribute, get }
    }

    pub fn get(&self, instance: &T) -> V {
        (self.get)(instance)
    }

    #[must_use]
    pub fn untyped(&self) -> &ModelAttribute {
        &self.attribute
    }
}

/// Typed view of a mutable attribute of `T` holding a `V`.
pub struct MutableAttribute<T, V> {
    attribute: ModelAttribute,
    get: fn(&T) -> V,
    set: fn(&mut T, V),
}

impl<T, V> MutableAttribute<T, V> {
    pub(crate) fn from_parts(attribute: ModelAttribute, get: fn(&T) -> V, set: fn(&mut T, V)) -> Self {
        Self { attribute, get, set }
    }

    pub fn get(&self, instance: &T) -> V {
        (self.get)(instance)
    }

    pub fn set(&self, instance: &mut T, value: V) {
        (self.set)(instance, value);
    }

    #[must_use]
    pub fn as_readonly(&self) -> Attribute<T, V> {
        Attribute { attribute: self.attribute.clone(), get: self.get }
    }

    #[must_use]
    pub fn untyped(&self) -> &ModelAttribute {
        &self.attribute
    }
}

impl<T, V> Deref for Attribute<T, V> {
    type Target = ModelAttribute;

    fn deref(&self) -> &Self::Target {
        &self.attribute
    }
}

impl<T, V> Deref for MutableAttribute<T, V> {
    type Target = ModelAttribute;

    fn deref(&self) -> &Self::Target {
        &self.attribute
    }
}

impl<T, V> Clone for Attribute<T, V> {
    fn clone(&self) -> Self {
        Self { attribute: self.attribute.clone(), get: self.get }
    }
}

impl<T, V> Clone for MutableAttribute<T, V> {
    fn clone(&self) -> Self {
        Self { attribute: self.attribute.clone(), get: self.get, set: self.set }
    }
}

impl<T, V> fmt::Debug for Attribute<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Attribute").field(&self.attribute.id).finish()
    }
}

impl<T, V> fmt::Debug for MutableAttribute<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableAttribute").field(&self.attribute.id).finish()
    }
}
