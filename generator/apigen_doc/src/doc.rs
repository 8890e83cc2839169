//! Documentation item types.

use apigen_ast::{Block, Expr};
use apigen_collections::Vector;

/// Inline fragment of flowing text.
#[derive(Clone, Debug)]
pub enum Fragment {
    /// Plain text, wrapped word by word.
    Text(String),
    /// Cross-reference to a type: `{@see Type}`. Never split.
    TypeRef(String),
    /// Cross-reference to rendered code: `{@see $x->call()}`. Never split.
    CodeRef(Expr),
    /// A nested block embedded mid-flow; commits the current line.
    Nested(Box<Doc>),
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Fragment {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Fragment {
        Fragment::Text(text)
    }
}

impl From<Doc> for Fragment {
    fn from(doc: Doc) -> Fragment {
        Fragment::Nested(Box::new(doc))
    }
}

/// Parameter-like tag kinds. `Param` tags participate in block-wide column
/// alignment; `Type` tags use a fixed hanging indent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    Param,
    Type,
}

/// Documentation item.
#[derive(Clone, Debug)]
pub enum Doc {
    /// Composed block of items, blank-line separated except adjacent tags.
    Block(Vec<Doc>),
    /// Word-wrapped flowing text.
    Text(Vec<Fragment>),
    /// Lines emitted exactly as given.
    PreFormatted(Vector<String>),
    /// `@param` / `@type` entry with aligned columns.
    Tag {
        kind: TagKind,
        types: Vector<String>,
        name: String,
        description: Box<Doc>,
    },
    /// Rendered, reformatted, fenced code example with an optional intro.
    Example {
        code: Block,
        intro: Option<Box<Doc>>,
    },
    /// `@return Type [description]`
    ReturnTag {
        ty: String,
        description: Option<Box<Doc>>,
    },
    /// `@throws Type [description]`
    ThrowsTag {
        ty: String,
        description: Option<Box<Doc>>,
    },
    /// `@experimental`
    Experimental,
    /// Zero-line item; acts as a paragraph separator in composed blocks.
    NewLine,
}

impl Doc {
    /// Compose a block from nested input, flattening groups and dropping
    /// absent markers.
    pub fn block(items: impl IntoIterator<Item = DocTree>) -> Doc {
        let mut flat = Vec::new();
        for item in items {
            collect(item, &mut flat);
        }
        Doc::Block(flat)
    }

    /// Flowing text from fragments.
    pub fn text(fragments: impl IntoIterator<Item = Fragment>) -> Doc {
        Doc::Text(fragments.into_iter().collect())
    }

    /// Flowing text from a single plain string.
    pub fn words(text: impl Into<String>) -> Doc {
        Doc::Text(vec![Fragment::Text(text.into())])
    }

    pub fn preformatted(lines: Vector<String>) -> Doc {
        Doc::PreFormatted(lines)
    }

    pub fn param(
        types: Vector<String>,
        name: impl Into<String>,
        description: Doc,
    ) -> Doc {
        Doc::Tag {
            kind: TagKind::Param,
            types,
            name: name.into(),
            description: Box::new(description),
        }
    }

    pub fn type_tag(
        types: Vector<String>,
        name: impl Into<String>,
        description: Doc,
    ) -> Doc {
        Doc::Tag {
            kind: TagKind::Type,
            types,
            name: name.into(),
            description: Box::new(description),
        }
    }

    pub fn example(code: Block, intro: Option<Doc>) -> Doc {
        Doc::Example {
            code,
            intro: intro.map(Box::new),
        }
    }

    pub fn return_tag(ty: impl Into<String>, description: Option<Doc>) -> Doc {
        Doc::ReturnTag {
            ty: ty.into(),
            description: description.map(Box::new),
        }
    }

    pub fn throws(ty: impl Into<String>, description: Option<Doc>) -> Doc {
        Doc::ThrowsTag {
            ty: ty.into(),
            description: description.map(Box::new),
        }
    }

    /// True for items that form a contiguous parameter list when adjacent.
    pub(crate) fn is_tag(&self) -> bool {
        matches!(self, Doc::Tag { .. })
    }
}

fn collect(tree: DocTree, out: &mut Vec<Doc>) {
    match tree {
        DocTree::Doc(doc) => out.push(doc),
        DocTree::Group(group) => {
            for item in group {
                collect(item, out);
            }
        }
        DocTree::Absent => {}
    }
}

/// Heterogeneously nested input for [`Doc::block`]: items, groups of items
/// at arbitrary depth, and absent markers.
#[derive(Clone, Debug)]
pub enum DocTree {
    Doc(Doc),
    Group(Vec<DocTree>),
    Absent,
}

impl From<Doc> for DocTree {
    fn from(doc: Doc) -> DocTree {
        DocTree::Doc(doc)
    }
}

impl From<Option<Doc>> for DocTree {
    fn from(doc: Option<Doc>) -> DocTree {
        doc.map_or(DocTree::Absent, DocTree::Doc)
    }
}

impl From<Vec<DocTree>> for DocTree {
    fn from(group: Vec<DocTree>) -> DocTree {
        DocTree::Group(group)
    }
}

impl From<Vector<Doc>> for DocTree {
    fn from(docs: Vector<Doc>) -> DocTree {
        DocTree::Group(docs.into_iter().map(DocTree::Doc).collect())
    }
}

impl From<Vector<DocTree>> for DocTree {
    fn from(trees: Vector<DocTree>) -> DocTree {
        DocTree::Group(trees.into_iter().collect())
    }
}
