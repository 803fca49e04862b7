#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the kModel workspace.
//! This crate provides the error-enum attribute used by every crate in the workspace and
//! the derive that turns struct fields into metamodel field descriptors.
//!
//! ## Usage
//! The macros are re-exported by `kmodel`; depend on this crate directly only when you
//! need `model_error` without the registry:
//! ```toml
//! [dependencies]
//! kmodel-derive = { path = "../infra/derive" }
//! ```
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates’ tests as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type integrated with the kModel crates.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides specialized `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// # Generated Items
///
/// * `<ErrorName>Ext` trait with `.context(...)` for both `Result<T, ErrorName>` and
///   `Result<T, SourceError>` when a source field exists.
/// * `From<SourceError>` impls for variants with a source field and a context field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
///
/// # Example
///
/// ```rust,ignore
/// use kmodel_derive::model_error;
/// use std::borrow::Cow;
///
/// #[model_error]
/// pub enum LoadError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read_model() -> Result<String, LoadError> {
///     std::fs::read_to_string("model.toml").context("Reading model description")
/// }
/// ```
#[proc_macro_attribute]
pub fn model_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derive macro that generates metamodel field descriptors for every named field.
///
/// For each field `foo: Foo` the derive adds an associated constant `FOO` to the struct:
///
/// * `kmodel::MutableField<Self, Foo>` by default (read through `Clone`, written by assignment),
/// * `kmodel::Field<Self, Foo>` when the field is marked `#[model(readonly)]`,
/// * nothing when the field is marked `#[model(skip)]`.
///
/// The constant inherits the field's visibility. Field types must implement `Clone`.
///
/// # Errors
/// Emits a compile-time error for enums, unions, tuple structs, unit structs and unknown
/// `#[model(...)]` options.
///
/// # Example
/// ```rust,ignore
/// use kmodel::ModelFields;
///
/// #[derive(Clone, ModelFields)]
/// pub struct Customer {
///     #[model(readonly)]
///     pub id: u64,
///     pub name: String,
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
///
/// assert_eq!(Customer::NAME.name(), "name");
/// ```
#[proc_macro_derive(ModelFields, attributes(model))]
pub fn model_fields(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::fields::expand_derive(input).into()
}
