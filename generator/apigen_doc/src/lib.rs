//! Documentation Layout Engine
//!
//! Consumes text fragments and IR nodes, produces aligned, word-wrapped
//! comment blocks, including embedded rendered-and-reformatted code
//! examples.
//!
//! # Layout rules
//!
//! - Words pack greedily onto lines bounded by a fixed width (80); a token
//!   is never split.
//! - Consecutive items in a block are separated by one blank line, except
//!   two adjacent parameter/type tags, which stay contiguous.
//! - Tag alignment is two-pass: the maximum type-column and name-column
//!   widths are computed across the whole block before any tag renders.

mod doc;
mod layout;
mod reformat;

pub use doc::{Doc, DocTree, Fragment, TagKind};
pub use layout::LINE_WIDTH;
pub use reformat::Reformatter;
