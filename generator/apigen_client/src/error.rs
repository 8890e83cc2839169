//! Generation failures.

use thiserror::Error;

/// Any failure while generating one client file. A failure aborts only the
/// file being generated; other services are unaffected.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Render(#[from] apigen_ast::RenderError),

    #[error(transparent)]
    Collection(#[from] apigen_collections::CollectionError),

    #[error(transparent)]
    Model(#[from] apigen_model::ModelError),
}
