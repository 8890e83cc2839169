//! IR Nodes for Generated Source
//!
//! A closed family of expression and statement nodes that render themselves
//! to PHP source text. The generator builds a tree of these from service
//! metadata, renders it once, and discards it.
//!
//! # Design Notes
//!
//! - `Expr` and `Stmt` are closed enums; the renderer is a single exhaustive
//!   match, so adding a node kind is a compile-time-enforced exercise.
//! - Absence is `Option<Expr>` at every constructor boundary. [`Expr::concat`]
//!   propagates it (any absent item cancels the whole expression) and array
//!   literal entries drop it before the list/associative form decision.
//! - Raw source fragments are an explicit tagged value ([`StrValue::Raw`]),
//!   not a reserved prefix inside literal content.
//! - One-shot attachment (call arguments, `if` bodies, `finally` clauses)
//!   is expressed with move-consuming builders, so a second attach does not
//!   exist at the type level.

mod error;
mod expr;
mod printer;
mod stmt;

pub use error::RenderError;
pub use expr::{ArrayKey, ArrayLit, CallSite, CallTarget, Expr, Literal, Member, StrValue};
pub use printer::{block_to_source, expr_to_source, stmt_to_source};
pub use stmt::{Block, If, Stmt, StmtTree, Try};
