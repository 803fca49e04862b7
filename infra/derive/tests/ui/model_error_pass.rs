use kmodel_derive::model_error;
use std::borrow::Cow;

#[model_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn load() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("Loading model")
}

fn main() {
    let err = load().unwrap_err();
    assert_eq!(err.variant_name(), "Io");
    assert_eq!(err.to_string(), "IO error (Loading model): disk");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.variant_name(), "Internal");
    assert_eq!(internal.to_string(), "Internal error: boom");
}
