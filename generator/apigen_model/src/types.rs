//! Type references and per-file import tracking.

use std::fmt;

use apigen_collections::{Set, Vector};

/// A PHP type name, split into namespace parts and a short name.
///
/// Scalar types carry no namespace and are never imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhpType {
    namespace: Vector<String>,
    name: String,
}

impl PhpType {
    /// Split a fully qualified name on `\` separators; the last segment is
    /// the short name.
    pub fn from_name(full: &str) -> PhpType {
        let mut parts: Vec<String> = full
            .split('\\')
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect();
        let name = parts.pop().unwrap_or_default();
        PhpType {
            namespace: parts.into(),
            name,
        }
    }

    /// A short name inside the given namespace.
    pub fn in_namespace(namespace: &str, name: impl Into<String>) -> PhpType {
        let mut ty = PhpType::from_name(namespace);
        ty.namespace = ty.namespace.append(std::mem::take(&mut ty.name));
        ty.name = name.into();
        ty
    }

    pub fn int() -> PhpType {
        PhpType::scalar("int")
    }

    pub fn string() -> PhpType {
        PhpType::scalar("string")
    }

    pub fn bool() -> PhpType {
        PhpType::scalar("bool")
    }

    pub fn array() -> PhpType {
        PhpType::scalar("array")
    }

    fn scalar(name: &str) -> PhpType {
        PhpType {
            namespace: Vector::new(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_scalar(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Fully qualified name, `\`-joined.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}\\{}", self.namespace.join("\\"), self.name)
        }
    }

    fn namespace_string(&self) -> String {
        self.namespace.join("\\")
    }
}

/// A type name as it appears in generated source after import resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType(String);

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Import bookkeeping for one generated file.
///
/// Resolving a type registers its `use` import and yields the short name;
/// types in the file's own namespace and scalars need no import. The use
/// set deduplicates, so repeated resolution of one type records one import.
#[derive(Clone, Debug)]
pub struct SourceFileContext {
    namespace: String,
    uses: Set<String>,
}

impl SourceFileContext {
    pub fn new(namespace: impl Into<String>) -> SourceFileContext {
        SourceFileContext {
            namespace: namespace.into(),
            uses: Set::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolve a type for use inside this file.
    pub fn resolve(&mut self, ty: &PhpType) -> ResolvedType {
        if !ty.is_scalar() && ty.namespace_string() != self.namespace {
            self.uses = self.uses.add(ty.full_name());
        }
        ResolvedType(ty.name().to_string())
    }

    /// Imports recorded so far, in first-resolution order.
    pub fn uses(&self) -> Vector<String> {
        self.uses.to_vector()
    }
}
