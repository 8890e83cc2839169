//! Whitespace-only source reformatting.

use apigen_doc::Reformatter;

const INDENT: &str = "    ";

/// Brace-depth reformatter.
///
/// Re-indents every line by its brace depth, collapses runs of blank lines
/// to one, trims trailing spaces, and ends the output with exactly one
/// newline. Doc comments are indented at the depth of their opener and
/// their braces are never counted (structured `@param { ... }` blocks span
/// lines). Brace counting elsewhere is textual, so input must not embed
/// braces in string literals; generated code never does.
pub struct BasicFormatter;

impl Reformatter for BasicFormatter {
    fn format(&self, source: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut depth: usize = 0;
        let mut doc_depth: Option<usize> = None;
        let mut prev_blank = true;

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if !prev_blank {
                    out.push(String::new());
                    prev_blank = true;
                }
                continue;
            }
            prev_blank = false;

            if let Some(opener_depth) = doc_depth {
                // Continuation line of a doc comment; align the `*` under
                // the second character of the opening `/**`.
                let mut rebuilt = INDENT.repeat(opener_depth);
                rebuilt.push(' ');
                rebuilt.push_str(trimmed);
                out.push(rebuilt);
                if trimmed.ends_with("*/") {
                    doc_depth = None;
                }
                continue;
            }
            if trimmed.starts_with("/**") && !trimmed.contains("*/") {
                let mut rebuilt = INDENT.repeat(depth);
                rebuilt.push_str(trimmed);
                out.push(rebuilt);
                doc_depth = Some(depth);
                continue;
            }

            let opens = trimmed.matches('{').count();
            let closes = trimmed.matches('}').count();
            let leading_closes = trimmed.chars().take_while(|c| *c == '}').count();
            let line_depth = depth.saturating_sub(leading_closes);

            let mut rebuilt = INDENT.repeat(line_depth);
            rebuilt.push_str(trimmed);
            out.push(rebuilt);

            depth = (depth + opens).saturating_sub(closes);
        }

        while out.last().is_some_and(String::is_empty) {
            out.pop();
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(source: &str) -> String {
        BasicFormatter.format(source)
    }

    #[test]
    fn reindents_by_brace_depth() {
        let source = "class C\n{\npublic function f()\n{\nreturn 1;\n}\n}\n";
        assert_eq!(
            fmt(source),
            "class C\n{\n    public function f()\n    {\n        return 1;\n    }\n}\n"
        );
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(fmt("a;\n\n\n\nb;\n"), "a;\n\nb;\n");
    }

    #[test]
    fn trims_trailing_spaces_and_normalizes_tail() {
        assert_eq!(fmt("a;   \n\n\n"), "a;\n");
        assert_eq!(fmt("a;"), "a;\n");
    }

    #[test]
    fn drops_leading_blank_lines() {
        assert_eq!(fmt("\n\na;\n"), "a;\n");
    }

    #[test]
    fn aligns_doc_comment_continuations() {
        let source = "class C\n{\n/**\n* Words.\n*/\nconst X = 1;\n}\n";
        assert_eq!(
            fmt(source),
            "class C\n{\n    /**\n     * Words.\n     */\n    const X = 1;\n}\n"
        );
    }

    #[test]
    fn doc_comment_braces_do_not_shift_depth() {
        let source = "class C\n{\n/**\n* @param array $opts {\n*     Detail.\n* }\n*/\nconst X = 1;\n}\n";
        assert_eq!(
            fmt(source),
            "class C\n{\n    /**\n     * @param array $opts {\n     *     Detail.\n     * }\n     */\n    const X = 1;\n}\n"
        );
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let source = "class C\n{\n/**\n* Words.\n*/\npublic function f()\n{\nif ($x) {\nreturn 1;\n}\n}\n}\n";
        let once = fmt(source);
        assert_eq!(fmt(&once), once);
    }
}
