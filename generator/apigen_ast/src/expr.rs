//! Expression nodes.

use crate::RenderError;

/// Text destined for a string position in the output.
///
/// `Literal` renders as a quoted, escaped string literal. `Raw` renders
/// verbatim and is the only mechanism for injecting raw source fragments
/// (constant references, directory-relative path prefixes) through the same
/// substitution path as ordinary literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrValue {
    Literal(String),
    Raw(String),
}

/// Literal values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(StrValue),
}

/// Array literal key: integer or string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl From<i64> for ArrayKey {
    fn from(value: i64) -> Self {
        ArrayKey::Int(value)
    }
}

impl From<&str> for ArrayKey {
    fn from(value: &str) -> Self {
        ArrayKey::Str(value.to_string())
    }
}

impl From<String> for ArrayKey {
    fn from(value: String) -> Self {
        ArrayKey::Str(value)
    }
}

/// Class member reachable through `self::`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// `self::NAME`
    Const(String),
    /// `self::$name`
    StaticProp(String),
}

/// Callee target for the call family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallTarget {
    /// `$recv->name(...)`
    Receiver(Box<Expr>),
    /// `$this->name(...)`
    This,
    /// `Class::name(...)`
    Class(String),
}

/// Expression node. Produces a value when rendered inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Variable reference: `$name`
    Var(String),

    /// Literal value
    Literal(Literal),

    /// Array literal, list or associative form
    Array(ArrayLit),

    /// String concatenation: `a . b . c`
    Concat(Vec<Expr>),

    /// Method, this-method or static call
    Call {
        target: CallTarget,
        name: String,
        args: Vec<Expr>,
    },

    /// Object construction: `new Type(args)`
    New { class: String, args: Vec<Expr> },

    /// Class-literal reference: `Type::class`
    ClassConst(String),

    /// Array index access: `recv[key]`
    Index { recv: Box<Expr>, key: Box<Expr> },

    /// Existence check: `isset(expr)`
    IsSet(Box<Expr>),

    /// Self member access: `self::NAME` or `self::$name`
    SelfAccess(Member),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Literal(Literal::Bool(value))
    }

    /// Quoted string literal.
    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::Str(StrValue::Literal(value.into())))
    }

    /// Verbatim source fragment.
    pub fn raw(value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::Str(StrValue::Raw(value.into())))
    }

    /// The `__DIR__` magic constant.
    pub fn dir() -> Expr {
        Expr::raw("__DIR__")
    }

    /// Concatenation with absence propagation: if ANY item is absent the
    /// whole expression is absent, never a partial string.
    pub fn concat(items: impl IntoIterator<Item = Option<Expr>>) -> Option<Expr> {
        let mut collected = Vec::new();
        for item in items {
            collected.push(item?);
        }
        Some(Expr::Concat(collected))
    }

    /// Unapplied call on a receiver expression.
    pub fn method_call(recv: Expr, name: impl Into<String>) -> CallSite {
        CallSite {
            target: CallTarget::Receiver(Box::new(recv)),
            name: name.into(),
        }
    }

    /// Unapplied call on `$this`.
    pub fn this_call(name: impl Into<String>) -> CallSite {
        CallSite {
            target: CallTarget::This,
            name: name.into(),
        }
    }

    /// Unapplied static call on a class.
    pub fn static_call(class: impl Into<String>, name: impl Into<String>) -> CallSite {
        CallSite {
            target: CallTarget::Class(class.into()),
            name: name.into(),
        }
    }

    pub fn new_object(class: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::New {
            class: class.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn class_const(class: impl Into<String>) -> Expr {
        Expr::ClassConst(class.into())
    }

    pub fn index(recv: Expr, key: Expr) -> Expr {
        Expr::Index {
            recv: Box::new(recv),
            key: Box::new(key),
        }
    }

    pub fn isset(expr: Expr) -> Expr {
        Expr::IsSet(Box::new(expr))
    }

    pub fn self_const(name: impl Into<String>) -> Expr {
        Expr::SelfAccess(Member::Const(name.into()))
    }

    pub fn self_static_prop(name: impl Into<String>) -> Expr {
        Expr::SelfAccess(Member::StaticProp(name.into()))
    }
}

/// A call with its target picked but its arguments not yet bound.
///
/// `apply` consumes the site, so arguments can be bound at most once.
/// Converting an unapplied site with `From`/`Into` renders a zero-argument
/// call, matching observed generator output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub(crate) target: CallTarget,
    pub(crate) name: String,
}

impl CallSite {
    /// Bind the argument list, producing the call expression.
    pub fn apply(self, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Call {
            target: self.target,
            name: self.name,
            args: args.into_iter().collect(),
        }
    }
}

impl From<CallSite> for Expr {
    fn from(site: CallSite) -> Expr {
        site.apply([])
    }
}

/// Array literal node.
///
/// Entries with an absent value are dropped at construction, before the
/// list/associative form decision. The literal renders in list form iff the
/// surviving keys are exactly the contiguous integers `0..n` in order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ArrayLit {
    entries: Vec<(ArrayKey, Expr)>,
}

impl ArrayLit {
    pub fn new() -> Self {
        ArrayLit::default()
    }

    /// Add one entry; an absent value drops the entry entirely.
    pub fn entry(mut self, key: impl Into<ArrayKey>, value: impl Into<Option<Expr>>) -> Self {
        if let Some(value) = value.into() {
            self.entries.push((key.into(), value));
        }
        self
    }

    /// Positional list: items are keyed `0..n` before absent values drop,
    /// so a dropped item leaves a hole and forces associative form.
    pub fn list(items: impl IntoIterator<Item = Option<Expr>>) -> Self {
        let mut lit = ArrayLit::new();
        for (i, item) in items.into_iter().enumerate() {
            lit = lit.entry(i as i64, item);
        }
        lit
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[(ArrayKey, Expr)] {
        &self.entries
    }

    /// True when surviving keys are exactly `0..n` in order.
    pub(crate) fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, ArrayKey::Int(n) if *n == i as i64))
    }

    /// Merge two array literals of the same form. A list cannot merge with
    /// an associative literal.
    pub fn merge(self, other: ArrayLit) -> Result<ArrayLit, RenderError> {
        if self.is_list() != other.is_list() {
            return Err(RenderError::UnsupportedShape(
                "cannot merge a list array with an associative array".to_string(),
            ));
        }
        let relist = self.is_list();
        let mut entries = self.entries;
        entries.extend(other.entries);
        if relist {
            for (i, (key, _)) in entries.iter_mut().enumerate() {
                *key = ArrayKey::Int(i as i64);
            }
        }
        Ok(ArrayLit { entries })
    }
}

impl From<ArrayLit> for Expr {
    fn from(lit: ArrayLit) -> Expr {
        Expr::Array(lit)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;

    #[test]
    fn concat_propagates_absence() {
        let absent = Expr::concat([Some(Expr::str("host")), None, Some(Expr::str("port"))]);
        assert_eq!(absent, None);
    }

    #[test]
    fn concat_of_present_items_is_present() {
        let present = Expr::concat([Some(Expr::str("a")), Some(Expr::str("b"))]);
        assert!(present.is_some());
    }

    #[test]
    fn absent_entries_drop_before_form_check() {
        let lit = ArrayLit::new()
            .entry(0_i64, Expr::int(1))
            .entry(1_i64, None)
            .entry(2_i64, Expr::int(3));
        // Key 1 dropped, so keys are [0, 2]: associative.
        assert!(!lit.is_list());
        assert_eq!(lit.len(), 2);
    }

    #[test]
    fn contiguous_int_keys_are_list_form() {
        let lit = ArrayLit::new()
            .entry(0_i64, Expr::int(1))
            .entry(1_i64, Expr::int(2));
        assert!(lit.is_list());
    }

    #[test]
    fn merge_requires_matching_form() {
        let list = ArrayLit::list([Some(Expr::int(1))]);
        let assoc = ArrayLit::new().entry("k", Expr::int(2));
        assert!(list.merge(assoc).is_err());
    }

    #[test]
    fn merge_of_lists_rekeys_sequentially() {
        let a = ArrayLit::list([Some(Expr::int(1))]);
        let b = ArrayLit::list([Some(Expr::int(2))]);
        let merged = a.merge(b).unwrap();
        assert!(merged.is_list());
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn unapplied_call_site_becomes_zero_arg_call() {
        let expr: Expr = Expr::this_call("close").into();
        match expr {
            Expr::Call { args, .. } => assert!(args.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
    }
}
