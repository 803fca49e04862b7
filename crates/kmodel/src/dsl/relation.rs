use super::PropertyTarget;
use crate::element::PropertyValue;
use crate::graph::ElementRef;
use crate::relation::ModelRelation;

fn property_target(relation: &ModelRelation) -> PropertyTarget {
    PropertyTarget { graph: relation.graph().clone(), element: ElementRef::Relation(relation.index()) }
}

/// Configures the forward side of a relation inside a `*_with` declaration.
#[derive(Debug)]
pub struct RelationBuilder<'a> {
    relation: &'a ModelRelation,
    target: PropertyTarget,
}

impl<'a> RelationBuilder<'a> {
    pub(crate) fn new(relation: &'a ModelRelation) -> Self {
        Self { relation, target: property_target(relation) }
    }

    #[must_use]
    pub const fn relation(&self) -> &'a ModelRelation {
        self.relation
    }

    pub fn property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        self.target.set(key, value);
        self
    }

    /// Runs `block` against the reverse relation.
    ///
    /// For a relation that is its own reverse (a symmetric self-relation), the block
    /// configures the same relation.
    pub fn reverse(&mut self, block: impl FnOnce(&mut ReverseRelationBuilder)) -> &mut Self {
        let mut builder = ReverseRelationBuilder::new(self.relation.reverse());
        block(&mut builder);
        self
    }
}

/// Configures the reverse side of a relation.
#[derive(Debug)]
pub struct ReverseRelationBuilder {
    relation: ModelRelation,
    target: PropertyTarget,
}

impl ReverseRelationBuilder {
    fn new(relation: ModelRelation) -> Self {
        let target = property_target(&relation);
        Self { relation, target }
    }

    #[must_use]
    pub const fn relation(&self) -> &ModelRelation {
        &self.relation
    }

    pub fn property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        self.target.set(key, value);
        self
    }
}
