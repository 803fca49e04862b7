//! Declaration surface.
//!
//! A declaration block receives a [`ModelBuilder`], from which class blocks receive a
//! [`ClassBuilder`], and so on down to attributes and relations. Builders only live for
//! the duration of their block.

mod attribute;
mod class;
mod relation;

pub use attribute::{AttributeBuilder, MAX_VALUE, MIN_VALUE};
pub use class::ClassBuilder;
pub use relation::{RelationBuilder, ReverseRelationBuilder};

use crate::class::ModelClass;
use crate::element::PropertyValue;
use crate::error::ModelError;
use crate::graph::{ElementRef, SharedGraph};
use crate::kind::ClassKind;
use crate::registry::ModelRegistry;

/// Entry point of a declaration block.
#[derive(Debug)]
pub struct ModelBuilder<'r> {
    registry: &'r ModelRegistry,
}

impl<'r> ModelBuilder<'r> {
    pub(crate) const fn new(registry: &'r ModelRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r ModelRegistry {
        self.registry
    }

    /// Declares (or reopens) the model class of `T` and runs `block` against it.
    ///
    /// Declaring the same class again merges into the existing entry.
    ///
    /// # Errors
    /// [`ModelError::InvalidClassIdentity`] when `T` has no stable simple name, or the
    /// first error returned by `block`.
    pub fn model_class<T: 'static>(
        &mut self,
        block: impl FnOnce(&mut ClassBuilder<'_, T>) -> Result<(), ModelError>,
    ) -> Result<ModelClass, ModelError> {
        let class = self.registry.get_or_create(ClassKind::of::<T>())?;
        let mut builder = ClassBuilder::new(self.registry, class.clone());
        block(&mut builder)?;
        Ok(class)
    }
}

/// Writes into the property bag of one element.
#[derive(Debug, Clone)]
struct PropertyTarget {
    graph: SharedGraph,
    element: ElementRef,
}

impl PropertyTarget {
    fn set(&self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.graph.write().set_property(self.element, key.into(), value.into());
    }
}
