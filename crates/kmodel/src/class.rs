use crate::attribute::ModelAttribute;
use crate::element::{ModelElement, Properties, element_identity};
use crate::graph::{ClassIndex, SharedGraph};
use crate::kind::ClassKind;
use crate::relation::ModelRelation;
use std::fmt;
use std::sync::Arc;

/// Registry entry describing one Rust type.
///
/// Handles are cheap to clone and always reflect the current state of the registry:
/// attributes and relations declared after the handle was obtained are visible through
/// it.
#[derive(Clone)]
pub struct ModelClass {
    graph: SharedGraph,
    index: ClassIndex,
    id: Arc<str>,
}

impl ModelClass {
    pub(crate) fn new(graph: SharedGraph, index: ClassIndex) -> Self {
        let id = graph.read().class(index).id.clone();
        Self { graph, index, id }
    }

    pub(crate) const fn index(&self) -> ClassIndex {
        self.index
    }

    pub(crate) const fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.graph.read().class(self.index).kind
    }

    #[must_use]
    pub fn super_class_kind(&self) -> Option<ClassKind> {
        self.graph.read().class(self.index).super_kind
    }

    /// The modeled super class, resolved at call time.
    ///
    /// `None` when no super class was declared or when it was never modeled itself.
    #[must_use]
    pub fn super_class(&self) -> Option<Self> {
        let index = {
            let graph = self.graph.read();
            let kind = graph.class(self.index).super_kind?;
            graph.class_for(kind)?
        };
        Some(Self::new(self.graph.clone(), index))
    }

    /// Attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> Vec<ModelAttribute> {
        let indices = self.graph.read().class(self.index).attributes.clone();
        indices.into_iter().map(|index| ModelAttribute::new(self.graph.clone(), index)).collect()
    }

    /// Attribute declared for the field `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<ModelAttribute> {
        let index = {
            let graph = self.graph.read();
            graph
                .class(self.index)
                .attributes
                .iter()
                .copied()
                .find(|index| graph.attribute(*index).key.name() == name)?
        };
        Some(ModelAttribute::new(self.graph.clone(), index))
    }

    /// Relations whose source is this class, in declaration order. Includes the reverse
    /// sides of relations declared on other classes.
    #[must_use]
    pub fn relations(&self) -> Vec<ModelRelation> {
        let indices = self.graph.read().class(self.index).relations.clone();
        indices.into_iter().map(|index| ModelRelation::new(self.graph.clone(), index)).collect()
    }

    /// The relation held by this class's field `name`.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<ModelRelation> {
        let index = {
            let graph = self.graph.read();
            graph.class(self.index).relations.iter().copied().find(|index| {
                graph.relation(*index).source_field.as_ref().is_some_and(|field| field.name() == name)
            })?
        };
        Some(ModelRelation::new(self.graph.clone(), index))
    }

    /// Whether both handles address the same class of the same registry.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.index == other.index
    }
}

impl ModelElement for ModelClass {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> Properties {
        self.graph.read().class(self.index).properties.clone()
    }
}

element_identity!(ModelClass);

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass").field("id", &self.id).field("kind", &self.kind()).finish()
    }
}
