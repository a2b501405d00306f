//! Leftmost-outermost textual reduction.
//!
//! Terms are never parsed into a structure here: the working expression is
//! a string, the head term is found by [`scan_term`], and one reduction
//! step replaces `head arg0 .. argN` with the head's rendered template
//! followed by the untouched suffix.

mod args;
mod scan;


use std::borrow::Cow;
use std::fmt;

use crate::combinator::CombinatorTable;

pub use args::{collect_args, Collected};
pub use scan::{is_enclosed, scan_term, strip_brackets};

/// How many single steps the fixpoint driver may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepBudget {
    /// Run until the expression stops changing. May not terminate.
    Unbounded,
    /// At most this many steps; stops earlier at a fixpoint.
    Limited(usize),
}

impl StepBudget {
    /// Interpret a signed step count: negative is unbounded, zero is a
    /// no-op, positive is a limit.
    pub fn from_count(count: i64) -> Self {
        match usize::try_from(count) {
            Ok(n) => StepBudget::Limited(n),
            Err(_) => StepBudget::Unbounded,
        }
    }

    pub fn limit(self) -> Option<usize> {
        match self {
            StepBudget::Unbounded => None,
            StepBudget::Limited(n) => Some(n),
        }
    }
}

impl From<i64> for StepBudget {
    fn from(count: i64) -> Self {
        StepBudget::from_count(count)
    }
}

impl fmt::Display for StepBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepBudget::Unbounded => write!(f, "unbounded"),
            StepBudget::Limited(n) => write!(f, "{} step(s)", n),
        }
    }
}

/// Perform at most one reduction at the head of `expr`.
///
/// Redundant parentheses around the head are unwrapped first, and the
/// unwrapping is kept even when the unwrapped head cannot reduce. Each
/// unwrap shortens the expression, so the loop is bounded by its length.
pub fn step_once(expr: &str, table: &CombinatorTable) -> String {
    let mut current = Cow::Borrowed(expr);
    loop {
        let head = scan_term(&current, table);
        if !is_enclosed(head) {
            break;
        }
        let unwrapped = format!("{}{}", strip_brackets(head), &current[head.len()..]);
        log::trace!("unwrap {} -> {}", head, unwrapped);
        current = Cow::Owned(unwrapped);
    }

    let head = scan_term(&current, table);
    let Some(def) = table.get(head) else {
        return current.into_owned();
    };
    let Some(Collected { args, rest }) = collect_args(&current[head.len()..], def.arity, table)
    else {
        return current.into_owned();
    };

    let mut out = def.apply(&args);
    out.push_str(rest);
    out
}

/// Successive single-step results, ending at the first fixpoint.
pub struct Steps<'t> {
    current: String,
    table: &'t CombinatorTable,
    done: bool,
}

impl<'t> Steps<'t> {
    pub fn new(expr: &str, table: &'t CombinatorTable) -> Self {
        Self {
            current: expr.to_string(),
            table,
            done: false,
        }
    }

    /// The expression after the last step taken.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn into_current(self) -> String {
        self.current
    }
}

impl Iterator for Steps<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let next = step_once(&self.current, self.table);
        if next == self.current {
            self.done = true;
            return None;
        }
        self.current.clone_from(&next);
        Some(next)
    }
}

/// Reduce `expr` within `budget`.
pub fn reduce(expr: &str, table: &CombinatorTable, budget: StepBudget) -> String {
    reduce_with(expr, table, budget, |_, _| {})
}

/// Reduce `expr` within `budget`, calling `on_step(n, expr)` after every
/// step that changed the expression (`n` counts from 1).
pub fn reduce_with(
    expr: &str,
    table: &CombinatorTable,
    budget: StepBudget,
    mut on_step: impl FnMut(usize, &str),
) -> String {
    let mut steps = Steps::new(expr, table);
    let limit = budget.limit().unwrap_or(usize::MAX);
    for (i, next) in steps.by_ref().take(limit).enumerate() {
        log::debug!("step {}: {}", i + 1, next);
        on_step(i + 1, &next);
    }
    steps.into_current()
}
