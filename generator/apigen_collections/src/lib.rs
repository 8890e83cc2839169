//! Immutable Collections
//!
//! This crate contains the collection substrate the generator is built on:
//! - [`Vector`]: ordered, immutable sequence
//! - [`Map`]: immutable association preserving first-insertion order
//! - [`Set`]: immutable membership set (a `Map` of presence markers)
//! - [`Equality`]: the hash + equals capability a value implements to be
//!   usable as a key or compared structurally
//!
//! # Design Philosophy
//!
//! - **Mutators are pure**: every `append`/`set`/`add` returns a new
//!   collection; the receiver is never modified.
//! - **Structural nesting**: collections implement [`Equality`] themselves,
//!   so a `Vector<Vector<i64>>` can be a `Map` key.
//! - **Deterministic enumeration**: `Map` and `Set` enumerate in
//!   first-insertion order, stable across value updates.

mod equality;
mod error;
mod map;
mod set;
mod vector;

pub use equality::Equality;
pub use error::CollectionError;
pub use map::Map;
pub use set::Set;
pub use vector::Vector;
