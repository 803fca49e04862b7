use super::{AttributeBuilder, PropertyTarget, RelationBuilder};
use crate::attribute::{Attribute, AttributeKind, ModelAttribute, MutableAttribute};
use crate::class::ModelClass;
use crate::element::PropertyValue;
use crate::error::ModelError;
use crate::field::{Accessor, Field, Function, MutableField, RelationEndpoint};
use crate::graph::{AttributeRequest, ElementRef, RelationRequest};
use crate::kind::{ClassKind, FieldKey};
use crate::registry::ModelRegistry;
use crate::relation::{ModelRelation, RelationField, RelationKind};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Declares the attributes, relations and metadata of the model class of `T`.
///
/// Relations are always declared from `T`'s side: `T` is the source class, the type
/// parameter `U` of each relation method is the target class.
pub struct ClassBuilder<'r, T> {
    registry: &'r ModelRegistry,
    class: ModelClass,
    target: PropertyTarget,
    _owner: PhantomData<fn() -> T>,
}

impl<'r, T: 'static> ClassBuilder<'r, T> {
    pub(crate) fn new(registry: &'r ModelRegistry, class: ModelClass) -> Self {
        let target =
            PropertyTarget { graph: class.graph().clone(), element: ElementRef::Class(class.index()) };
        Self { registry, class, target, _owner: PhantomData }
    }

    #[must_use]
    pub const fn model_class(&self) -> &ModelClass {
        &self.class
    }

    /// Sets the modeled super class to `S`. A later call replaces the link.
    pub fn super_class<S: ?Sized + 'static>(&mut self) -> &mut Self {
        self.super_class_kind(ClassKind::of::<S>())
    }

    pub fn super_class_kind(&mut self, kind: ClassKind) -> &mut Self {
        self.class.graph().write().set_super_kind(self.class.index(), kind);
        self
    }

    pub fn property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        self.target.set(key, value);
        self
    }

    /// Declares a read-only attribute.
    pub fn attribute<V: 'static>(&mut self, field: Field<T, V>) -> Attribute<T, V> {
        self.attribute_with(field, |_| {})
    }

    pub fn attribute_with<V: 'static>(
        &mut self,
        field: Field<T, V>,
        block: impl FnOnce(&mut AttributeBuilder<'_>),
    ) -> Attribute<T, V> {
        let accessor = field.accessor();
        let attribute = self.bind_attribute(AttributeKind::Immutable, field.key(), accessor, block);
        Attribute::from_parts(attribute, accessor.get)
    }

    /// Declares a readable and writable attribute.
    pub fn mutable_attribute<V: 'static>(
        &mut self,
        field: MutableField<T, V>,
    ) -> MutableAttribute<T, V> {
        self.mutable_attribute_with(field, |_| {})
    }

    pub fn mutable_attribute_with<V: 'static>(
        &mut self,
        field: MutableField<T, V>,
        block: impl FnOnce(&mut AttributeBuilder<'_>),
    ) -> MutableAttribute<T, V> {
        let attribute =
            self.bind_attribute(AttributeKind::Mutable, field.key(), field.accessor(), block);
        let (get, set) = field.functions();
        MutableAttribute::from_parts(attribute, get, set)
    }

    /// Declares an attribute computed by a method of `T`.
    pub fn function_attribute<V: 'static>(&mut self, function: Function<T, V>) -> Attribute<T, V> {
        self.function_attribute_with(function, |_| {})
    }

    pub fn function_attribute_with<V: 'static>(
        &mut self,
        function: Function<T, V>,
        block: impl FnOnce(&mut AttributeBuilder<'_>),
    ) -> Attribute<T, V> {
        let accessor = function.accessor();
        let attribute = self.bind_attribute(AttributeKind::Function, function.key(), accessor, block);
        Attribute::from_parts(attribute, accessor.get)
    }

    /// Unidirectional relation navigable from `T` only.
    ///
    /// # Errors
    /// [`ModelError::RelationConflict`] when `source` already takes part in a different
    /// relation, [`ModelError::InvalidClassIdentity`] when `U` cannot be modeled.
    pub fn one_to<U: 'static, V: 'static>(
        &mut self,
        source: MutableField<T, V>,
    ) -> Result<ModelRelation, ModelError> {
        self.one_to_with::<U, V>(source, |_| {})
    }

    /// See [`one_to`](Self::one_to).
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn one_to_with<U: 'static, V: 'static>(
        &mut self,
        source: MutableField<T, V>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        self.declare_relation::<U>(RelationKind::OneTo, Some(source.into_relation_field()), None, block)
    }

    /// Unidirectional relation navigable from `U` only; `target` is the field of `U`
    /// that points back to `T`.
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn to_one<U: 'static, V: 'static>(
        &mut self,
        target: MutableField<U, V>,
    ) -> Result<ModelRelation, ModelError> {
        self.to_one_with(target, |_| {})
    }

    /// See [`to_one`](Self::to_one).
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn to_one_with<U: 'static, V: 'static>(
        &mut self,
        target: MutableField<U, V>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        self.declare_relation::<U>(RelationKind::ToOne, None, Some(target.into_relation_field()), block)
    }

    /// Bidirectional relation with a single value on each side.
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn one_to_one<U: 'static, V: 'static, W: 'static>(
        &mut self,
        source: MutableField<T, V>,
        target: MutableField<U, W>,
    ) -> Result<ModelRelation, ModelError> {
        self.one_to_one_with(source, target, |_| {})
    }

    /// See [`one_to_one`](Self::one_to_one).
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn one_to_one_with<U: 'static, V: 'static, W: 'static>(
        &mut self,
        source: MutableField<T, V>,
        target: MutableField<U, W>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        self.declare_relation::<U>(
            RelationKind::OneToOne,
            Some(source.into_relation_field()),
            Some(target.into_relation_field()),
            block,
        )
    }

    /// `T` holds a collection of `U`, each `U` refers back to one `T`.
    ///
    /// The back-reference on `U` may be read-only.
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn one_to_many<U: 'static, V: 'static>(
        &mut self,
        source: MutableField<T, V>,
        target: impl RelationEndpoint<U>,
    ) -> Result<ModelRelation, ModelError> {
        self.one_to_many_with(source, target, |_| {})
    }

    /// See [`one_to_many`](Self::one_to_many).
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn one_to_many_with<U: 'static, V: 'static>(
        &mut self,
        source: MutableField<T, V>,
        target: impl RelationEndpoint<U>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        self.declare_relation::<U>(
            RelationKind::OneToMany,
            Some(source.into_relation_field()),
            Some(target.into_relation_field()),
            block,
        )
    }

    /// `T` refers to one `U`, each `U` holds a collection of `T`.
    ///
    /// The reference on `T` may be read-only.
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn many_to_one<U: 'static, W: 'static>(
        &mut self,
        source: impl RelationEndpoint<T>,
        target: MutableField<U, W>,
    ) -> Result<ModelRelation, ModelError> {
        self.many_to_one_with(source, target, |_| {})
    }

    /// See [`many_to_one`](Self::many_to_one).
    ///
    /// # Errors
    /// Same as [`one_to`](Self::one_to).
    pub fn many_to_one_with<U: 'static, W: 'static>(
        &mut self,
        source: impl RelationEndpoint<T>,
        target: MutableField<U, W>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        self.declare_relation::<U>(
            RelationKind::ManyToOne,
            Some(source.into_relation_field()),
            Some(target.into_relation_field()),
            block,
        )
    }

    fn bind_attribute<V: 'static>(
        &self,
        kind: AttributeKind,
        key: FieldKey,
        accessor: Accessor<T, V>,
        block: impl FnOnce(&mut AttributeBuilder<'_>),
    ) -> ModelAttribute {
        let request =
            AttributeRequest { class: self.class.index(), kind, key, accessor: Arc::new(accessor) };
        let index = self.class.graph().write().bind_attribute(request);

        let attribute = ModelAttribute::new(self.class.graph().clone(), index);
        block(&mut AttributeBuilder::new(&attribute));
        attribute
    }

    fn declare_relation<U: 'static>(
        &self,
        kind: RelationKind,
        source_field: Option<RelationField>,
        target_field: Option<RelationField>,
        block: impl FnOnce(&mut RelationBuilder<'_>),
    ) -> Result<ModelRelation, ModelError> {
        let target = self.registry.get_or_create(ClassKind::of::<U>())?;
        let request = RelationRequest {
            kind,
            source_class: self.class.index(),
            target_class: target.index(),
            source_field,
            target_field,
        };
        let index = self.class.graph().write().bind_relation(request)?;

        let relation = ModelRelation::new(self.class.graph().clone(), index);
        block(&mut RelationBuilder::new(&relation));
        Ok(relation)
    }
}

impl<T> fmt::Debug for ClassBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBuilder").field("class", &self.class).finish_non_exhaustive()
    }
}
