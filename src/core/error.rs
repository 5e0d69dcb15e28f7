//! Error taxonomy for the setter engine.
//!
//! Unresolved template matches are not errors; they surface as `None` from
//! [`Template::resolve`](crate::core::pattern::Template::resolve).

use thiserror::Error;

pub use crate::document::TraversalError;

pub type Result<T> = std::result::Result<T, SetterError>;

/// Fatal errors that abort a create or list run.
#[derive(Debug, Error)]
pub enum SetterError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to traverse {file_path}: {source}")]
    Traversal {
        file_path: String,
        #[source]
        source: TraversalError,
    },
}

/// Problems with the user-supplied setter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input setters list cannot be empty")]
    EmptyRegistry,

    #[error("invalid value for setter \"{name}\": {message}")]
    Decode { name: String, message: String },
}
