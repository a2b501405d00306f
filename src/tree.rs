//! Strict structural parse of an expression into a display tree.
//!
//! Unlike the reducer's scanner, this path rejects unbalanced parentheses
//! and empty groups. The tree is for display and tracing only; it never
//! feeds back into reduction.

use std::fmt;

use serde::Serialize;

use crate::combinator::CombinatorTable;
use crate::diagnostic::Diagnostic;
use crate::span::Span;

/// A term and the head terms it decomposes into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(text: &str) -> Self {
        Self {
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf texts in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_leaf() {
            out.push(&self.text);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Box-drawing rendering, one node per line, no trailing newline.
    pub fn render(&self) -> String {
        let mut lines = vec![self.text.clone()];
        render_children(&self.children, "", &mut lines);
        lines.join("\n")
    }
}

fn render_children(children: &[Node], prefix: &str, lines: &mut Vec<String>) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        lines.push(format!("{}{}{}", prefix, branch, child.text));
        render_children(&child.children, &format!("{}{}", prefix, indent), lines);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Characters the tree builder drops before parsing.
fn is_ignorable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{3000}')
}

/// Remove the whitespace the tree builder ignores.
pub fn normalize(expr: &str) -> String {
    expr.chars().filter(|c| !is_ignorable(*c)).collect()
}

/// Parse `expr` into a tree whose root text is the normalized expression.
///
/// Spans in returned diagnostics index into [`normalize`]`(expr)`.
pub fn parse(expr: &str, table: &CombinatorTable) -> Result<Node, Diagnostic> {
    let text = normalize(expr);
    if text.is_empty() {
        return Err(Diagnostic::error(
            "empty expression".to_string(),
            Span::dummy(),
        ));
    }
    let children = parse_terms(&text, 0, table)?;
    Ok(Node { text, children })
}

/// Split `s` into sibling nodes, descending into groups. `offset` is the
/// position of `s` within the full expression.
fn parse_terms(s: &str, offset: usize, table: &CombinatorTable) -> Result<Vec<Node>, Diagnostic> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut pos = 0;
    while pos < s.len() {
        let start = offset + pos;
        let term = scan_term_strict(&s[pos..], start, table)
            .map_err(|diag| with_partial(diag, &nodes))?;

        let mut node = Node::leaf(term);
        if term.starts_with('(') {
            let inner = &term[1..term.len() - 1];
            if inner.is_empty() {
                let diag = Diagnostic::error(
                    "empty group '()'".to_string(),
                    Span::new(start, start + term.len()),
                )
                .with_help("a group must contain at least one term".to_string());
                return Err(with_partial(diag, &nodes));
            }
            node.children = parse_terms(inner, start + 1, table)?;
        }

        pos += term.len();
        nodes.push(node);
    }
    Ok(nodes)
}

/// Strict counterpart of the reducer's scanner: a combinator name, a
/// balanced group, or one character. Stray `)` and unclosed `(` are
/// errors. `start` is only used for spans.
fn scan_term_strict<'e>(
    expr: &'e str,
    start: usize,
    table: &CombinatorTable,
) -> Result<&'e str, Diagnostic> {
    if let Some(def) = table.match_prefix(expr) {
        return Ok(&expr[..def.name.len()]);
    }

    let Some(first) = expr.chars().next() else {
        return Ok("");
    };
    match first {
        ')' => Err(Diagnostic::error(
            "unmatched ')'".to_string(),
            Span::new(start, start + 1),
        )
        .with_help("remove it or add a matching '(' before it".to_string())),
        '(' => {
            let mut depth = 0usize;
            for (i, c) in expr.char_indices() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                if depth == 0 {
                    return Ok(&expr[..=i]);
                }
            }
            Err(Diagnostic::error(
                "unclosed '('".to_string(),
                Span::new(start, start + 1),
            )
            .with_note(format!("{} group(s) still open at end of input", depth))
            .with_help("add a matching ')'".to_string()))
        }
        c => Ok(&expr[..c.len_utf8()]),
    }
}

fn with_partial(diag: Diagnostic, parsed: &[Node]) -> Diagnostic {
    if parsed.is_empty() {
        return diag;
    }
    let texts: Vec<&str> = parsed.iter().map(|n| n.text.as_str()).collect();
    diag.with_note(format!("parsed before the error: {}", texts.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::CombinatorDefinition;

    fn ski() -> CombinatorTable {
        CombinatorTable::ski()
    }

    fn leaves(texts: &[&str]) -> Vec<Node> {
        texts.iter().map(|t| Node::leaf(t)).collect()
    }

    #[test]
    fn test_flat_expression() {
        let node = parse("Sxyz", &ski()).unwrap();
        assert_eq!(node.text, "Sxyz");
        assert_eq!(node.children, leaves(&["S", "x", "y", "z"]));
    }

    #[test]
    fn test_single_term() {
        let node = parse("S", &ski()).unwrap();
        assert_eq!(node.children, leaves(&["S"]));
    }

    #[test]
    fn test_nested_groups() {
        let node = parse("(SKI)(a)(ab(abc))", &ski()).unwrap();
        assert_eq!(
            node.children,
            vec![
                Node {
                    text: "(SKI)".to_string(),
                    children: leaves(&["S", "K", "I"]),
                },
                Node {
                    text: "(a)".to_string(),
                    children: leaves(&["a"]),
                },
                Node {
                    text: "(ab(abc))".to_string(),
                    children: vec![
                        Node::leaf("a"),
                        Node::leaf("b"),
                        Node {
                            text: "(abc)".to_string(),
                            children: leaves(&["a", "b", "c"]),
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let spaced = parse("(SKI )(a\u{3000})(ab\t(abc))", &ski()).unwrap();
        let plain = parse("(SKI)(a)(ab(abc))", &ski()).unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn test_multichar_combinator() {
        let table = CombinatorTable::new(vec![CombinatorDefinition::new("Sabc", 0, "").unwrap()]).unwrap();
        let node = parse("Sabcz", &table).unwrap();
        assert_eq!(node.children, leaves(&["Sabc", "z"]));
    }

    #[test]
    fn test_unclosed_group_is_error() {
        let err = parse("SKI((A)", &ski()).unwrap_err();
        assert_eq!(err.message, "unclosed '('");
        assert_eq!(err.span, Span::new(3, 4));
        assert!(err.notes.iter().any(|n| n == "parsed before the error: S K I"));
    }

    #[test]
    fn test_unmatched_close_is_error() {
        let err = parse("SKI(A))", &ski()).unwrap_err();
        assert_eq!(err.message, "unmatched ')'");
        assert_eq!(err.span, Span::new(6, 7));
    }

    #[test]
    fn test_empty_group_is_error() {
        let err = parse("SKI()", &ski()).unwrap_err();
        assert_eq!(err.message, "empty group '()'");
        assert_eq!(err.span, Span::new(3, 5));
    }

    #[test]
    fn test_nested_error_span_is_absolute() {
        let err = parse("S(K())", &ski()).unwrap_err();
        assert_eq!(err.span, Span::new(3, 5));
        assert!(err.notes.iter().any(|n| n == "parsed before the error: K"));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert_eq!(parse("", &ski()).unwrap_err().message, "empty expression");
        assert_eq!(parse(" \t", &ski()).unwrap_err().message, "empty expression");
    }

    #[test]
    fn test_leaves() {
        let node = parse("S(KI)(x(yz))", &ski()).unwrap();
        assert_eq!(node.leaves(), vec!["S", "K", "I", "x", "y", "z"]);
    }

    #[test]
    fn test_render() {
        let node = parse("S(KI)x", &ski()).unwrap();
        insta::assert_snapshot!(node.render(), @r"
        S(KI)x
        ├── S
        ├── (KI)
        │   ├── K
        │   └── I
        └── x
        ");
    }

    #[test]
    fn test_serialize_skips_empty_children() {
        let node = parse("K(x)", &ski()).unwrap();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"text":"K(x)","children":[{"text":"K"},{"text":"(x)","children":[{"text":"x"}]}]}"#
        );
    }
}
