//! Line layout for documentation blocks.
//!
//! Rendering is two-phase inside a block: a pre-pass records the widest
//! type column and name column over all aligned tags, then every item
//! renders against those shared widths.

use apigen_ast::{block_to_source, expr_to_source, RenderError};
use apigen_collections::Vector;

use crate::doc::{Doc, Fragment, TagKind};
use crate::reformat::Reformatter;

/// Column bound for word wrapping.
pub const LINE_WIDTH: usize = 80;

/// Shared column widths for aligned tags, computed before any tag renders.
#[derive(Clone, Copy, Debug, Default)]
struct TagWidths {
    types: usize,
    name: usize,
}

impl TagWidths {
    /// Pre-pass: record the widest rendered type and name columns among the
    /// block's aligned tags.
    fn measure(items: &[Doc]) -> TagWidths {
        let mut widths = TagWidths::default();
        for item in items {
            if let Doc::Tag {
                kind: TagKind::Param,
                types,
                name,
                ..
            } = item
            {
                widths.types = widths.types.max(types.join("|").len());
                widths.name = widths.name.max(name.len());
            }
        }
        widths
    }
}

impl Doc {
    /// Render to lines (no comment-marker decoration).
    pub fn to_lines(&self, fmt: &dyn Reformatter) -> Result<Vector<String>, RenderError> {
        self.lines_with(TagWidths::default(), fmt)
    }

    /// Render to a single text blob.
    pub fn to_text(&self, fmt: &dyn Reformatter) -> Result<String, RenderError> {
        Ok(self.to_lines(fmt)?.join("\n"))
    }

    fn lines_with(
        &self,
        widths: TagWidths,
        fmt: &dyn Reformatter,
    ) -> Result<Vector<String>, RenderError> {
        match self {
            Doc::Block(items) => block_lines(items, fmt),
            Doc::Text(fragments) => text_lines(fragments, fmt),
            Doc::PreFormatted(lines) => Ok(lines.clone()),
            Doc::Tag {
                kind,
                types,
                name,
                description,
            } => tag_lines(*kind, types, name, description, widths, fmt),
            Doc::Example { code, intro } => example_lines(code, intro.as_deref(), fmt),
            Doc::ReturnTag { ty, description } => {
                outdent_description(&format!("@return {ty}"), description.as_deref(), fmt)
            }
            Doc::ThrowsTag { ty, description } => {
                outdent_description(&format!("@throws {ty}"), description.as_deref(), fmt)
            }
            Doc::Experimental => Ok(Vector::from(vec!["@experimental".to_string()])),
            Doc::NewLine => Ok(Vector::new()),
        }
    }
}

/// Compose a block: each item's lines, one blank separator between
/// consecutive items unless both are parameter/type tags.
fn block_lines(items: &[Doc], fmt: &dyn Reformatter) -> Result<Vector<String>, RenderError> {
    let widths = TagWidths::measure(items);

    let docs: Vector<Doc> = items.iter().cloned().collect();
    let successors: Vector<Option<Doc>> = docs.skip(1).map(|d| Some(d.clone())).append(None);

    let mut lines = Vector::new();
    for (item, next) in docs.zip(&successors) {
        let mut item_lines = item.lines_with(widths, fmt)?;
        let keep_contiguous = match &next {
            Some(next) => item.is_tag() && next.is_tag(),
            None => true,
        };
        if !keep_contiguous {
            item_lines = item_lines.append(String::new());
        }
        lines = lines.concat(&item_lines);
    }
    Ok(lines)
}

/// Greedy word packing at [`LINE_WIDTH`]; a token is never split.
fn text_lines(fragments: &[Fragment], fmt: &dyn Reformatter) -> Result<Vector<String>, RenderError> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    fn commit(lines: &mut Vec<String>, line: &mut String) {
        if !line.is_empty() {
            lines.push(std::mem::take(line));
        }
    }

    fn add(lines: &mut Vec<String>, line: &mut String, token: &str) {
        if !line.is_empty() && line.len() + 1 + token.len() > LINE_WIDTH {
            commit(lines, line);
        }
        if line.is_empty() {
            line.push_str(token);
        } else {
            line.push(' ');
            line.push_str(token);
        }
    }

    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => {
                for word in text.split_whitespace() {
                    add(&mut lines, &mut line, word);
                }
            }
            Fragment::TypeRef(ty) => {
                add(&mut lines, &mut line, &format!("{{@see {ty}}}"));
            }
            Fragment::CodeRef(expr) => {
                let code = expr_to_source(expr)?;
                add(&mut lines, &mut line, &format!("{{@see {code}}}"));
            }
            Fragment::Nested(doc) => {
                commit(&mut lines, &mut line);
                lines.extend(doc.to_lines(fmt)?);
            }
        }
    }
    commit(&mut lines, &mut line);
    Ok(lines.into_iter().collect())
}

fn tag_lines(
    kind: TagKind,
    types: &Vector<String>,
    name: &str,
    description: &Doc,
    widths: TagWidths,
    fmt: &dyn Reformatter,
) -> Result<Vector<String>, RenderError> {
    let joined = types.join("|");
    match kind {
        TagKind::Param => {
            let padded = format!("{joined:<width$}", width = widths.types.max(joined.len()));
            let intro = format!("@param {padded} ${name}");
            let intro_pad = " ".repeat(widths.name.saturating_sub(name.len()));
            if let Doc::Block(_) = description {
                // Structured description: indented nested block.
                let inner = description.to_lines(fmt)?;
                let mut lines = Vector::from(vec![format!("{intro}{intro_pad} {{")]);
                lines = lines.concat(&inner.map(|x| format!("    {x}")));
                Ok(lines.append("}".to_string()))
            } else {
                let lines = description.to_lines(fmt)?;
                Ok(hang_lines(&format!("{intro}{intro_pad}"), &lines))
            }
        }
        TagKind::Type => {
            let first = format!("@type {joined} ${name}");
            let indent = " ".repeat("@type ".len());
            let lines = description.to_lines(fmt)?;
            Ok(Vector::from(vec![first]).concat(&lines.map(|x| format!("{indent}{x}"))))
        }
    }
}

/// Hanging indent: the first description line continues the intro; later
/// lines align under the first description word.
fn hang_lines(intro: &str, lines: &Vector<String>) -> Vector<String> {
    if lines.is_empty() {
        return Vector::from(vec![intro.trim_end().to_string()]);
    }
    let pad = " ".repeat(intro.len());
    lines
        .take(1)
        .map(|x| format!("{intro} {x}"))
        .concat(&lines.skip(1).map(|x| format!("{pad} {x}")))
}

fn outdent_description(
    intro: &str,
    description: Option<&Doc>,
    fmt: &dyn Reformatter,
) -> Result<Vector<String>, RenderError> {
    match description {
        None => Ok(Vector::from(vec![intro.to_string()])),
        Some(doc) => {
            let lines = doc.to_lines(fmt)?;
            Ok(hang_lines(intro, &lines))
        }
    }
}

/// Render a code example: print the tree, reformat it, strip the opening
/// marker line and trailing blank, and fence what remains.
fn example_lines(
    code: &apigen_ast::Block,
    intro: Option<&Doc>,
    fmt: &dyn Reformatter,
) -> Result<Vector<String>, RenderError> {
    let source = format!("<?php\n{}", block_to_source(code)?);
    let formatted = fmt.format(&source);

    let lines: Vector<String> = formatted.split('\n').map(ToString::to_string).collect();
    let fenced = lines
        .skip(1)
        .skip_last_while(|x| x.is_empty())
        .filter(|x| !x.is_empty())
        .prepend("```".to_string())
        .append("```".to_string());

    let intro_lines = match intro {
        Some(doc) => doc.to_lines(fmt)?,
        None => Vector::new(),
    };
    if intro_lines.is_empty() {
        Ok(fenced)
    } else {
        Ok(intro_lines.concat(&fenced))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::DocTree;
    use apigen_ast::{Block, Expr, Stmt};
    use pretty_assertions::assert_eq;

    /// Identity reformatter; layout tests do not exercise restyling.
    struct PassThrough;

    impl Reformatter for PassThrough {
        fn format(&self, source: &str) -> String {
            source.to_string()
        }
    }

    fn render(doc: &Doc) -> Vec<String> {
        doc.to_lines(&PassThrough).unwrap().to_vec()
    }

    #[test]
    fn words_wrap_at_the_column_bound() {
        let doc = Doc::words("word ".repeat(40));
        for line in render(&doc) {
            assert!(line.len() <= LINE_WIDTH, "line too long: {line}");
        }
    }

    #[test]
    fn a_token_is_never_split() {
        let long = "x".repeat(120);
        let doc = Doc::text([Fragment::Text(format!("intro {long} outro"))]);
        let lines = render(&doc);
        assert!(lines.iter().any(|l| l.contains(&long)));
    }

    #[test]
    fn line_commits_before_overflow() {
        // 70 + 1 + 15 > 80, so the second token starts a fresh line.
        let a = "a".repeat(70);
        let b = "b".repeat(15);
        let doc = Doc::words(format!("{a} {b}"));
        assert_eq!(render(&doc), vec![a, b]);
    }

    #[test]
    fn type_refs_render_as_see_tokens() {
        let doc = Doc::text([
            Fragment::from("See"),
            Fragment::TypeRef("RetrySettings".to_string()),
            Fragment::from("for details."),
        ]);
        assert_eq!(
            render(&doc),
            vec!["See {@see RetrySettings} for details.".to_string()]
        );
    }

    #[test]
    fn code_refs_render_inline() {
        let doc = Doc::text([Fragment::CodeRef(
            Expr::static_call("CredentialsWrapper", "build").apply([]),
        )]);
        assert_eq!(
            render(&doc),
            vec!["{@see CredentialsWrapper::build()}".to_string()]
        );
    }

    #[test]
    fn block_separates_items_with_one_blank_line() {
        let doc = Doc::block([
            Doc::words("First paragraph.").into(),
            Doc::words("Second paragraph.").into(),
        ]);
        assert_eq!(
            render(&doc),
            vec![
                "First paragraph.".to_string(),
                String::new(),
                "Second paragraph.".to_string(),
            ]
        );
    }

    #[test]
    fn adjacent_tags_stay_contiguous() {
        let doc = Doc::block([
            Doc::param(
                Vector::from(vec!["string".to_string()]),
                "name",
                Doc::words("The name."),
            )
            .into(),
            Doc::param(
                Vector::from(vec!["int".to_string()]),
                "count",
                Doc::words("The count."),
            )
            .into(),
        ]);
        let lines = render(&doc);
        assert!(!lines.iter().any(String::is_empty), "unexpected blank: {lines:?}");
    }

    #[test]
    fn block_flattens_nested_groups_and_absent() {
        let doc = Doc::block([
            DocTree::Group(vec![
                Doc::words("a").into(),
                DocTree::Absent,
                DocTree::Group(vec![Doc::words("b").into()]),
            ]),
            DocTree::Absent,
        ]);
        let flat = Doc::block([Doc::words("a").into(), Doc::words("b").into()]);
        assert_eq!(render(&doc), render(&flat));
    }

    #[test]
    fn param_columns_align_across_the_block() {
        let doc = Doc::block([
            Doc::param(
                Vector::from(vec!["string".to_string()]),
                "name",
                Doc::words("Required name."),
            )
            .into(),
            Doc::param(
                Vector::from(vec!["TransportInterface".to_string()]),
                "t",
                Doc::words("Transport."),
            )
            .into(),
        ]);
        let lines = render(&doc);
        // Both type columns pad to the widest type; both descriptions start
        // at the same column.
        assert_eq!(
            lines[0],
            "@param string             $name Required name."
        );
        assert_eq!(
            lines[1],
            "@param TransportInterface $t    Transport."
        );
    }

    #[test]
    fn multi_line_description_hangs_under_first_word() {
        let doc = Doc::block([Doc::param(
            Vector::from(vec!["string".to_string()]),
            "name",
            Doc::words(format!("{} end", "word ".repeat(16))),
        )
        .into()]);
        let lines = render(&doc);
        assert!(lines.len() > 1);
        let first_word_col = lines[0].find("word").unwrap();
        for continuation in &lines[1..] {
            let trimmed_start = continuation.len() - continuation.trim_start().len();
            assert_eq!(trimmed_start, first_word_col);
        }
    }

    #[test]
    fn structured_description_renders_as_nested_block() {
        let doc = Doc::block([Doc::param(
            Vector::from(vec!["array".to_string()]),
            "options",
            Doc::block([
                Doc::words("Optional.").into(),
                Doc::type_tag(
                    Vector::from(vec!["string".to_string()]),
                    "apiEndpoint",
                    Doc::words("The address."),
                )
                .into(),
            ]),
        )
        .into()]);
        let lines = render(&doc);
        assert!(lines[0].ends_with('{'));
        assert_eq!(lines.last(), Some(&"}".to_string()));
        assert!(lines[1].starts_with("    "));
    }

    #[test]
    fn type_tag_uses_fixed_hanging_indent() {
        let doc = Doc::type_tag(
            Vector::from(vec!["string".to_string(), "array".to_string()]),
            "clientConfig",
            Doc::words("Client config. Longer description follows here."),
        );
        let lines = render(&doc);
        assert_eq!(lines[0], "@type string|array $clientConfig");
        assert!(lines[1].starts_with("      "));
    }

    #[test]
    fn return_and_throws_tags() {
        let ret = Doc::return_tag("OperationResponse", None);
        assert_eq!(render(&ret), vec!["@return OperationResponse".to_string()]);

        let throws = Doc::throws("ApiException", Some(Doc::words("if the remote call fails")));
        assert_eq!(
            render(&throws),
            vec!["@throws ApiException if the remote call fails".to_string()]
        );
    }

    #[test]
    fn example_is_fenced_and_stripped() {
        let code = Block::new([Stmt::assign(Expr::var("client"), Expr::new_object("EchoClient", [])).into()]);
        let doc = Doc::example(code, Some(Doc::words("Sample code:")));
        assert_eq!(
            render(&doc),
            vec![
                "Sample code:".to_string(),
                "```".to_string(),
                "$client = new EchoClient();".to_string(),
                "```".to_string(),
            ]
        );
    }

    #[test]
    fn newline_item_yields_no_lines() {
        assert_eq!(render(&Doc::NewLine), Vec::<String>::new());
    }

    #[test]
    fn experimental_tag() {
        assert_eq!(render(&Doc::Experimental), vec!["@experimental".to_string()]);
    }
}
