use super::PropertyTarget;
use crate::attribute::ModelAttribute;
use crate::element::PropertyValue;
use crate::graph::ElementRef;

/// Property key written by [`AttributeBuilder::max`].
pub const MAX_VALUE: &str = "maxValue";
/// Property key written by [`AttributeBuilder::min`].
pub const MIN_VALUE: &str = "minValue";

/// Configures one attribute inside a `*_with` declaration.
#[derive(Debug)]
pub struct AttributeBuilder<'a> {
    attribute: &'a ModelAttribute,
    target: PropertyTarget,
}

impl<'a> AttributeBuilder<'a> {
    pub(crate) fn new(attribute: &'a ModelAttribute) -> Self {
        let target = PropertyTarget {
            graph: attribute.graph().clone(),
            element: ElementRef::Attribute(attribute.index()),
        };
        Self { attribute, target }
    }

    #[must_use]
    pub const fn attribute(&self) -> &'a ModelAttribute {
        self.attribute
    }

    /// Sets a property; an existing value under `key` is replaced.
    pub fn property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        self.target.set(key, value);
        self
    }

    /// Records the largest allowed value under `maxValue`.
    pub fn max(&mut self, value: impl Into<PropertyValue>) -> &mut Self {
        self.property(MAX_VALUE, value)
    }

    /// Records the smallest allowed value under `minValue`.
    pub fn min(&mut self, value: impl Into<PropertyValue>) -> &mut Self {
        self.property(MIN_VALUE, value)
    }
}
