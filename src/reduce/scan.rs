//! Permissive head-term scanning and bracket canonicalization.
//!
//! This is the scanner the reducer uses. It never fails: unbalanced input
//! degrades to "whatever was scanned". The strict scanner used for tree
//! building lives in `crate::tree` and reports the same inputs as errors.

use crate::combinator::CombinatorTable;

/// Return the term at the head of `expr`.
///
/// In order: the empty string for empty input, the name of the first
/// table entry that prefixes `expr`, a parenthesized group up to and
/// including its matching `)`, or the single leading character. An
/// unclosed group returns everything from the `(` to the end.
pub fn scan_term<'e>(expr: &'e str, table: &CombinatorTable) -> &'e str {
    let Some(first) = expr.chars().next() else {
        return "";
    };

    if let Some(def) = table.match_prefix(expr) {
        return &expr[..def.name.len()];
    }

    if first != '(' {
        return &expr[..first.len_utf8()];
    }

    &expr[..group_len(expr)]
}

/// Byte length of the parenthesized group opening at `expr[0]`, or the
/// whole string when the group never closes.
fn group_len(expr: &str) -> usize {
    let mut depth = 0usize;
    for (i, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return i + c.len_utf8();
        }
    }
    expr.len()
}

/// True when `term` is one balanced group: the `(` at index 0 closes
/// exactly at the last character and nowhere earlier.
pub fn is_enclosed(term: &str) -> bool {
    if !term.starts_with('(') || !term.ends_with(')') || term.len() < 2 {
        return false;
    }
    group_len(term) == term.len() && balanced(term)
}

fn balanced(term: &str) -> bool {
    let mut depth = 0i64;
    for c in term.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// Remove every redundant outer layer of parentheses.
///
/// A layer is removed only while the whole term is a single enclosed
/// group, so sibling groups such as `(S)(K)` are never merged.
pub fn strip_brackets(mut term: &str) -> &str {
    while is_enclosed(term) {
        term = &term[1..term.len() - 1];
    }
    term
}
