//! Manifest validation failures.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("manifest declares no services")]
    NoServices,

    #[error("unknown field kind `{kind}` on field `{field}`")]
    UnknownFieldKind { field: String, kind: String },

    #[error("message field `{field}` is missing its message type")]
    MessageFieldWithoutType { field: String },

    #[error("duplicate method name `{method}` in service `{service}`")]
    DuplicateMethod { service: String, method: String },
}
