//! Reformatting collaborator interface.

/// Token-level style normalizer applied to embedded example code.
///
/// Implementations must be idempotent and must not alter semantics, only
/// whitespace and brace layout.
pub trait Reformatter {
    fn format(&self, source: &str) -> String;
}
