use crate::class::ModelClass;
use crate::dsl::ModelBuilder;
use crate::error::ModelError;
use crate::graph::SharedGraph;
use crate::kind::ClassKind;
use parking_lot::ReentrantMutex;
use std::sync::{Arc, LazyLock};

/// The process-wide registry used by [`declare_model`].
pub static MODEL_MANAGER: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

/// Runs a declaration block against [`MODEL_MANAGER`].
///
/// # Errors
/// Returns the first [`ModelError`] raised inside the block.
///
/// # Examples
/// ```rust
/// use kmodel::{ModelElement, declare_model, field};
///
/// struct Planet { name: String }
///
/// # fn main() -> Result<(), kmodel::ModelError> {
/// declare_model(|m| {
///     m.model_class::<Planet>(|c| {
///         c.attribute(field!(Planet, name));
///         Ok(())
///     })?;
///     Ok(())
/// })?;
///
/// assert_eq!(kmodel::MODEL_MANAGER.lookup::<Planet>().unwrap().id(), "Planet");
/// # Ok(())
/// # }
/// ```
pub fn declare_model<R>(
    block: impl FnOnce(&mut ModelBuilder<'_>) -> Result<R, ModelError>,
) -> Result<R, ModelError> {
    MODEL_MANAGER.declare(block)
}

/// Lookup table from class identity to [`ModelClass`], and the only place model classes
/// are minted.
///
/// Cloning yields another handle to the same registry. The registry only grows: classes,
/// attributes and relations are never removed.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    graph: SharedGraph,
    declaring: Arc<ReentrantMutex<()>>,
}

impl ModelRegistry {
    /// Creates a new, empty registry, independent of [`MODEL_MANAGER`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn global() -> &'static Self {
        &MODEL_MANAGER
    }

    /// Runs a declaration block.
    ///
    /// Blocks on the same registry are serialized; a block may start another `declare`
    /// on the same registry from within. The first error aborts the block and is
    /// returned. Declarations applied before the error stay in place.
    ///
    /// # Errors
    /// Returns the first [`ModelError`] raised inside the block.
    pub fn declare<R>(
        &self,
        block: impl FnOnce(&mut ModelBuilder<'_>) -> Result<R, ModelError>,
    ) -> Result<R, ModelError> {
        let _declaring = self.declaring.lock();
        let mut builder = ModelBuilder::new(self);
        block(&mut builder)
    }

    /// Returns the class registered for `T`. Never creates one.
    #[must_use]
    pub fn lookup<T: ?Sized + 'static>(&self) -> Option<ModelClass> {
        self.lookup_kind(ClassKind::of::<T>())
    }

    #[must_use]
    pub fn lookup_kind(&self, kind: ClassKind) -> Option<ModelClass> {
        let index = self.graph.read().class_for(kind)?;
        Some(ModelClass::new(self.graph.clone(), index))
    }

    #[must_use]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.graph.read().class_for(ClassKind::of::<T>()).is_some()
    }

    /// All classes in registration order.
    #[must_use]
    pub fn classes(&self) -> Vec<ModelClass> {
        let indices: Vec<_> = self.graph.read().class_indices().collect();
        indices.into_iter().map(|index| ModelClass::new(self.graph.clone(), index)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.read().class_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) const fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    /// Returns the class for `kind`, registering it on first use.
    pub(crate) fn get_or_create(&self, kind: ClassKind) -> Result<ModelClass, ModelError> {
        let index = self.graph.write().get_or_insert_class(kind)?;
        Ok(ModelClass::new(self.graph.clone(), index))
    }
}
