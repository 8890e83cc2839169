//! Generated-Declaration Model
//!
//! Class-level declarations (constants, properties, methods) assembled
//! member by member and rendered to source text, plus the token-level
//! reformatter applied to every finished unit of output.

mod decl;
mod format;

pub use decl::{ClassDef, Constant, Member, Method, Param, Property, Visibility};
pub use format::BasicFormatter;
