//! # kModel
//!
//! An in-process metamodel registry: describe your types, their attributes and the
//! relations between them without touching the types themselves.
//!
//! ## Overview
//!
//! * **Registry**: one [`ModelClass`] per Rust type, minted on first declaration and
//!   never removed. Use [`MODEL_MANAGER`] through [`declare_model`], or an isolated
//!   [`ModelRegistry`].
//! * **Attributes**: read-only, mutable or computed fields, deduplicated per field.
//! * **Relations**: `OneTo`, `ToOne`, `OneToOne`, `OneToMany` and `ManyToOne`, always
//!   registered together with their reverse.
//! * **Properties**: a free-form metadata bag on every element.
//! * **Snapshots**: a serde-serializable copy of the whole graph.
//!
//! Field access is supplied by the host through plain function pointers
//! ([`Field`], [`MutableField`], [`Function`]), usually produced by [`field!`],
//! [`mutable_field!`], [`function!`] or `#[derive(ModelFields)]`.
//!
//! # Example
//!
//! ```rust
//! use kmodel::{ModelElement, ModelError, ModelFields, ModelRegistry};
//!
//! #[derive(ModelFields)]
//! struct Customer {
//!     #[model(readonly)]
//!     name: String,
//!     orders: Vec<u64>,
//! }
//!
//! #[derive(ModelFields)]
//! struct Order {
//!     customer: Option<u64>,
//! }
//!
//! # fn main() -> Result<(), ModelError> {
//! let registry = ModelRegistry::new();
//! registry.declare(|m| {
//!     m.model_class::<Customer>(|c| {
//!         c.attribute_with(Customer::NAME, |a| {
//!             a.property("label", "Customer name");
//!         });
//!         c.one_to_many(Customer::ORDERS, Order::CUSTOMER)?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! let order = registry.lookup::<Order>().expect("created as relation target");
//! let back = order.relation("customer").expect("reverse side is registered");
//! assert_eq!(back.id(), "Order.customer - Customer.orders");
//! assert_eq!(back.reverse().reverse(), back);
//! # Ok(())
//! # }
//! ```

mod attribute;
mod class;
pub mod dsl;
mod element;
mod error;
mod field;
mod graph;
mod kind;
mod registry;
mod relation;
pub mod snapshot;

pub use attribute::{Attribute, AttributeKind, ModelAttribute, MutableAttribute};
pub use class::ModelClass;
pub use dsl::{AttributeBuilder, ClassBuilder, ModelBuilder, RelationBuilder, ReverseRelationBuilder};
pub use element::{ModelElement, Properties, PropertyValue};
pub use error::{ModelError, ModelErrorExt};
pub use field::{Field, FieldAccessor, Function, MutableField, MutableFieldAccessor, RelationEndpoint};
pub use kind::{ClassKind, FieldKey};
pub use kmodel_derive::{ModelFields, model_error};
pub use registry::{MODEL_MANAGER, ModelRegistry, declare_model};
pub use relation::{ModelRelation, RelationField, RelationKind};
pub use snapshot::RegistrySnapshot;

/// Commonly used items for declaring and reading models.
pub mod prelude {
    pub use crate::{
        AttributeKind, ClassKind, FieldAccessor, ModelClass, ModelElement, ModelError,
        ModelErrorExt, ModelFields, ModelRegistry, MutableFieldAccessor, RelationKind,
        declare_model, field, function, mutable_field,
    };
}
