//! Statement nodes and block construction.

use apigen_collections::Vector;

use crate::Expr;

/// Statement node. Produces a full line or block when rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// Expression in statement position, terminated with `;`
    Expr(Expr),

    /// Assignment: `target = value;`
    Assign { target: Expr, value: Expr },

    /// `return value;`
    Return(Expr),

    /// `if (cond) { ... }` — built through [`If`], so a body is always
    /// present.
    If { cond: Expr, then: Block },

    /// `try { ... } finally { ... }` — no catch clause is modeled; that is
    /// a deliberate restriction of this generator, not an omission.
    TryFinally { body: Block, finally: Option<Block> },
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assign { target, value }
    }

    pub fn ret(value: Expr) -> Stmt {
        Stmt::Return(value)
    }
}

impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Stmt {
        Stmt::Expr(expr)
    }
}

/// Heterogeneously nested statement input for [`Block`] construction.
///
/// A block accepts statements, groups of trees at arbitrary depth, and
/// absent markers; construction flattens the nesting and drops every absent
/// marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtTree {
    Stmt(Stmt),
    Group(Vec<StmtTree>),
    Absent,
}

impl From<Stmt> for StmtTree {
    fn from(stmt: Stmt) -> StmtTree {
        StmtTree::Stmt(stmt)
    }
}

impl From<Expr> for StmtTree {
    fn from(expr: Expr) -> StmtTree {
        StmtTree::Stmt(Stmt::Expr(expr))
    }
}

impl From<Option<Stmt>> for StmtTree {
    fn from(stmt: Option<Stmt>) -> StmtTree {
        stmt.map_or(StmtTree::Absent, StmtTree::Stmt)
    }
}

impl From<Vec<StmtTree>> for StmtTree {
    fn from(group: Vec<StmtTree>) -> StmtTree {
        StmtTree::Group(group)
    }
}

impl From<Vector<Stmt>> for StmtTree {
    fn from(stmts: Vector<Stmt>) -> StmtTree {
        StmtTree::Group(stmts.into_iter().map(StmtTree::Stmt).collect())
    }
}

impl From<Vector<StmtTree>> for StmtTree {
    fn from(trees: Vector<StmtTree>) -> StmtTree {
        StmtTree::Group(trees.into_iter().collect())
    }
}

/// A sequence of statements rendered one after another, each followed by its
/// terminator. A block with zero children renders as an empty body.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    /// Build a block from nested statement input, flattening groups and
    /// dropping absent markers.
    pub fn new(items: impl IntoIterator<Item = StmtTree>) -> Block {
        let mut stmts = Vec::new();
        for item in items {
            Self::collect(item, &mut stmts);
        }
        Block { stmts }
    }

    fn collect(tree: StmtTree, out: &mut Vec<Stmt>) {
        match tree {
            StmtTree::Stmt(stmt) => out.push(stmt),
            StmtTree::Group(group) => {
                for item in group {
                    Self::collect(item, out);
                }
            }
            StmtTree::Absent => {}
        }
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl From<Block> for StmtTree {
    fn from(block: Block) -> StmtTree {
        StmtTree::Group(block.stmts.into_iter().map(StmtTree::Stmt).collect())
    }
}

/// Conditional under construction: the condition is bound, the body is not.
///
/// Only [`If::then`] produces a statement, so a bodyless conditional cannot
/// reach the renderer.
#[derive(Clone, Debug)]
pub struct If {
    cond: Expr,
}

impl If {
    pub fn new(cond: Expr) -> If {
        If { cond }
    }

    /// Attach the body, completing the statement.
    pub fn then(self, body: impl Into<StmtTree>) -> Stmt {
        Stmt::If {
            cond: self.cond,
            then: Block::new([body.into()]),
        }
    }
}

/// Try statement under construction: the body is bound, the finally-clause
/// is not. Attaching consumes the builder, so it happens at most once.
#[derive(Clone, Debug)]
pub struct Try {
    body: Block,
}

impl Try {
    pub fn new(body: impl Into<StmtTree>) -> Try {
        Try {
            body: Block::new([body.into()]),
        }
    }

    /// Attach a finally-clause, completing the statement.
    pub fn finally(self, finally: impl Into<StmtTree>) -> Stmt {
        Stmt::TryFinally {
            body: self.body,
            finally: Some(Block::new([finally.into()])),
        }
    }

    /// Complete the statement without a finally-clause.
    pub fn done(self) -> Stmt {
        Stmt::TryFinally {
            body: self.body,
            finally: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_flattens_nesting_and_drops_absent() {
        let a = Stmt::ret(Expr::int(1));
        let b = Stmt::ret(Expr::int(2));
        let c = Stmt::ret(Expr::int(3));

        let nested = Block::new([
            StmtTree::from(a.clone()),
            StmtTree::Group(vec![
                StmtTree::Absent,
                StmtTree::Group(vec![b.clone().into(), StmtTree::Absent]),
                c.clone().into(),
            ]),
            StmtTree::Absent,
        ]);
        let flat = Block::new([a.into(), b.into(), c.into()]);
        assert_eq!(nested, flat);
    }

    #[test]
    fn empty_block_has_no_statements() {
        let block = Block::new([StmtTree::Absent, StmtTree::Group(vec![])]);
        assert!(block.is_empty());
    }

    #[test]
    fn absent_stmt_converts_to_absent_marker() {
        let tree: StmtTree = Option::<Stmt>::None.into();
        assert_eq!(tree, StmtTree::Absent);
    }

    #[test]
    fn if_requires_body_to_become_statement() {
        let stmt = If::new(Expr::bool(true)).then(Stmt::ret(Expr::int(1)));
        assert!(matches!(stmt, Stmt::If { .. }));
    }

    #[test]
    fn try_finally_is_optional() {
        let plain = Try::new(Stmt::ret(Expr::int(1))).done();
        assert!(matches!(plain, Stmt::TryFinally { finally: None, .. }));

        let with = Try::new(Stmt::ret(Expr::int(1))).finally(Stmt::Expr(Expr::this_call("close").into()));
        assert!(matches!(with, Stmt::TryFinally { finally: Some(_), .. }));
    }
}
