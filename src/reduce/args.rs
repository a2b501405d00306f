use crate::combinator::CombinatorTable;

use super::scan::scan_term;

/// Arguments collected for one application, plus the untouched suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collected<'e> {
    pub args: Vec<&'e str>,
    pub rest: &'e str,
}

/// Take exactly `arity` leading terms from `expr`.
///
/// Returns `None` when the input runs out first; a partial argument list
/// is never returned.
pub fn collect_args<'e>(
    expr: &'e str,
    arity: usize,
    table: &CombinatorTable,
) -> Option<Collected<'e>> {
    let mut args = Vec::with_capacity(arity);
    let mut rest = expr;
    for _ in 0..arity {
        let term = scan_term(rest, table);
        if term.is_empty() {
            log::trace!("need {} argument(s), found {}", arity, args.len());
            return None;
        }
        args.push(term);
        rest = &rest[term.len()..];
    }
    Some(Collected { args, rest })
}
