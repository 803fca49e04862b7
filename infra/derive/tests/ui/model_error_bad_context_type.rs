use kmodel_derive::model_error;

#[model_error]
pub enum DemoError {
    #[error("Internal error: {message}")]
    Internal { message: String, context: Option<String> },
}

fn main() {}
