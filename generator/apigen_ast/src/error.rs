//! Render failure conditions.
//!
//! Rendering errors are programmer-usage errors in tree construction. They
//! abort the current tree's render; other trees are unaffected since every
//! tree is independent and immutable.

use thiserror::Error;

/// Failure raised while rendering an IR tree to source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A node was asked to render a combination it does not model.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A value reached a text position that cannot be emitted safely.
    #[error("unrenderable value: {0}")]
    UnrenderableValue(String),
}
