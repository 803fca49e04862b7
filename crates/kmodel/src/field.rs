//! Field descriptors: the capability the registry uses to reach into instances.
//!
//! The registry never reflects over a type. Instead every attribute and relation wraps a
//! descriptor holding plain function pointers supplied by the host code:
//!
//! * [`Field`]: read-only access to a stored field,
//! * [`MutableField`]: read and write access to a stored field,
//! * [`Function`]: a value computed by a zero-argument method, always read-only.
//!
//! Descriptors are usually produced by the [`field!`](crate::field!),
//! [`mutable_field!`](crate::mutable_field!) and [`function!`](crate::function!) macros or
//! by `#[derive(ModelFields)]`.

use crate::kind::FieldKey;
use crate::relation::RelationField;
use std::fmt;

/// Read access to a named value of `T`.
pub trait FieldAccessor<T, V> {
    fn name(&self) -> &'static str;

    fn read(&self, instance: &T) -> V;
}

/// Write access on top of [`FieldAccessor`].
pub trait MutableFieldAccessor<T, V>: FieldAccessor<T, V> {
    fn write(&self, instance: &mut T, value: V);
}

/// Type-erased accessor stored inside the graph, recovered by downcasting.
pub(crate) struct Accessor<T, V> {
    pub(crate) get: fn(&T) -> V,
    pub(crate) set: Option<fn(&mut T, V)>,
}

/// A read-only field of `T` holding a `V`.
pub struct Field<T, V> {
    name: &'static str,
    get: fn(&T) -> V,
}

impl<T, V> Field<T, V> {
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&T) -> V) -> Self {
        Self { name, get }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn key(&self) -> FieldKey
    where
        T: 'static,
    {
        FieldKey::of::<T>(self.name)
    }

    pub(crate) const fn accessor(&self) -> Accessor<T, V> {
        Accessor { get: self.get, set: None }
    }
}

/// A read/write field of `T` holding a `V`.
pub struct MutableField<T, V> {
    name: &'static str,
    get: fn(&T) -> V,
    set: fn(&mut T, V),
}

impl<T, V> MutableField<T, V> {
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&T) -> V, set: fn(&mut T, V)) -> Self {
        Self { name, get, set }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn key(&self) -> FieldKey
    where
        T: 'static,
    {
        FieldKey::of::<T>(self.name)
    }

    /// Read-only view of the same field.
    #[must_use]
    pub const fn as_readonly(&self) -> Field<T, V> {
        Field { name: self.name, get: self.get }
    }

    pub(crate) const fn accessor(&self) -> Accessor<T, V> {
        Accessor { get: self.get, set: Some(self.set) }
    }

    pub(crate) const fn functions(&self) -> (fn(&T) -> V, fn(&mut T, V)) {
        (self.get, self.set)
    }
}

/// A value of `T` derived by calling a zero-argument method.
pub struct Function<T, V> {
    name: &'static str,
    call: fn(&T) -> V,
}

impl<T, V> Function<T, V> {
    #[must_use]
    pub const fn new(name: &'static str, call: fn(&T) -> V) -> Self {
        Self { name, call }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn key(&self) -> FieldKey
    where
        T: 'static,
    {
        FieldKey::of::<T>(self.name)
    }

    pub(crate) const fn accessor(&self) -> Accessor<T, V> {
        Accessor { get: self.call, set: None }
    }
}

impl<T, V> FieldAccessor<T, V> for Field<T, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, instance: &T) -> V {
        (self.get)(instance)
    }
}

impl<T, V> FieldAccessor<T, V> for MutableField<T, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, instance: &T) -> V {
        (self.get)(instance)
    }
}

impl<T, V> MutableFieldAccessor<T, V> for MutableField<T, V> {
    fn write(&self, instance: &mut T, value: V) {
        (self.set)(instance, value);
    }
}

impl<T, V> FieldAccessor<T, V> for Function<T, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, instance: &T) -> V {
        (self.call)(instance)
    }
}

/// A field that can sit at one end of a relation.
///
/// Implemented by [`Field`] and [`MutableField`]; relation kinds that need write access
/// on one side take a [`MutableField`] there directly.
pub trait RelationEndpoint<C> {
    fn into_relation_field(self) -> RelationField;
}

impl<C: 'static, V: 'static> RelationEndpoint<C> for Field<C, V> {
    fn into_relation_field(self) -> RelationField {
        RelationField::new(self.key(), self.accessor())
    }
}

impl<C: 'static, V: 'static> RelationEndpoint<C> for MutableField<C, V> {
    fn into_relation_field(self) -> RelationField {
        RelationField::new(self.key(), self.accessor())
    }
}

// Manual impls: the derives would demand `T: Clone`/`V: Clone` for plain fn pointers.
macro_rules! descriptor_impls {
    ($($ty:ident),+ $(,)?) => {$(
        impl<T, V> Clone for $ty<T, V> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T, V> Copy for $ty<T, V> {}

        impl<T, V> fmt::Debug for $ty<T, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("owner", &std::any::type_name::<T>())
                    .field("name", &self.name)
                    .finish()
            }
        }
    )+};
}

descriptor_impls!(Field, MutableField, Function);

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Accessor<T, V> {}

/// Builds a read-only [`Field`] descriptor for a named struct field (value read via `Clone`).
///
/// ```rust
/// use kmodel::{field, FieldAccessor};
///
/// struct Customer { name: String }
///
/// let name = field!(Customer, name);
/// assert_eq!(name.read(&Customer { name: "Ada".into() }), "Ada");
/// ```
#[macro_export]
macro_rules! field {
    ($owner:ty, $field:ident) => {
        $crate::Field::new(stringify!($field), |this: &$owner| {
            ::core::clone::Clone::clone(&this.$field)
        })
    };
}

/// Builds a [`MutableField`] descriptor for a named struct field.
///
/// ```rust
/// use kmodel::{mutable_field, FieldAccessor, MutableFieldAccessor};
///
/// struct Counter { hits: u32 }
///
/// let hits = mutable_field!(Counter, hits);
/// let mut counter = Counter { hits: 1 };
/// hits.write(&mut counter, 7);
/// assert_eq!(hits.read(&counter), 7);
/// ```
#[macro_export]
macro_rules! mutable_field {
    ($owner:ty, $field:ident) => {
        $crate::MutableField::new(
            stringify!($field),
            |this: &$owner| ::core::clone::Clone::clone(&this.$field),
            |this: &mut $owner, value| this.$field = value,
        )
    };
}

/// Builds a [`Function`] descriptor for a `&self` method without arguments.
///
/// ```rust
/// use kmodel::{function, FieldAccessor};
///
/// struct Person { first: String, last: String }
///
/// impl Person {
///     fn full_name(&self) -> String {
///         format!("{} {}", self.first, self.last)
///     }
/// }
///
/// let full_name = function!(Person, full_name);
/// let ada = Person { first: "Ada".into(), last: "Lovelace".into() };
/// assert_eq!(full_name.read(&ada), "Ada Lovelace");
/// ```
#[macro_export]
macro_rules! function {
    ($owner:ty, $method:ident) => {
        $crate::Function::new(stringify!($method), |this: &$owner| this.$method())
    };
}
