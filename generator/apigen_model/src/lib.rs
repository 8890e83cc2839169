//! Service Metadata Layer
//!
//! Already-validated, typed facts about the services being generated. The
//! generator core never parses descriptor bytes; it consumes a JSON service
//! manifest and exposes the result as plain records.

mod casing;
mod details;
mod error;
mod manifest;
mod types;

pub use casing::{to_lower_camel, to_snake_case, to_upper_camel};
pub use details::{FieldDetails, FieldKind, MethodDetails, ServiceDetails};
pub use error::ModelError;
pub use manifest::ServiceManifest;
pub use types::{PhpType, ResolvedType, SourceFileContext};
