//! Collection error conditions.
//!
//! All of these are programmer-usage errors in tree construction: they abort
//! the current build with a descriptive message rather than being coerced or
//! swallowed. There is no retry layer.

use thiserror::Error;

/// Failure conditions raised by the collection types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An absent key was used where a real key is required.
    #[error("absent value is not a valid key")]
    InvalidKey,

    /// Two equal keys were supplied while building a map from a raw list.
    #[error("cannot add two entries with the same key: {key}")]
    DuplicateKey {
        /// Debug rendering of the offending key.
        key: String,
    },

    /// A sequence was indexed beyond its bounds.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// A nonexistent map key was read via the strict accessor.
    #[error("key does not exist: {key}")]
    MissingKey {
        /// Debug rendering of the missing key.
        key: String,
    },
}
