//! # Model Errors
//!
//! This module defines the [`ModelError`] enum used throughout the crate for reporting
//! malformed declarations. Every failure is a caller logic error: nothing here is
//! transient and nothing is retried.

use std::borrow::Cow;

/// Errors raised while declaring the metamodel graph.
#[kmodel_derive::model_error]
pub enum ModelError {
    /// The class has no stable simple name (closures, tuples, references, trait objects...).
    ///
    /// Fatal for the `get_or_create` call that hit it; the class is not registered.
    #[error("Invalid class identity{}: {message}", format_context(.context))]
    InvalidClassIdentity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A source field already takes part in a relation with a different target class,
    /// target field or relation kind.
    #[error("Relation declaration conflict{}: {message}", format_context(.context))]
    RelationConflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback, also used by declaration blocks that reject their own input.
    #[error("Internal model error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
