//! Client Class Generator
//!
//! Turns service metadata into IR trees and documentation blocks and
//! assembles one generated client class per service, member by member:
//! service constants, client defaults, the constructor, and one public
//! method per RPC.

mod error;
mod generate;

pub use error::GenerateError;
pub use generate::generate_client;
