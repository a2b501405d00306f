//! Textual combinatory-logic reduction with user-defined combinators.
//!
//! ```
//! use colc::{reduce, CombinatorTable, StepBudget};
//!
//! let table = CombinatorTable::ski();
//! assert_eq!(reduce("SKIx", &table, StepBudget::Unbounded), "x");
//! assert_eq!(reduce("SKII", &table, StepBudget::Limited(1)), "KI(II)");
//! ```

pub mod combinator;
pub mod config;
pub mod diagnostic;
pub mod reduce;
pub mod span;
pub mod trace;
pub mod tree;

pub use combinator::{CombinatorDefinition, CombinatorTable, Template};
pub use diagnostic::Diagnostic;
pub use reduce::{reduce, reduce_with, step_once, StepBudget, Steps};
pub use trace::{reduce_lines, reduce_traced, Computation};
pub use tree::Node;

/// Reduce `expr` with the classical S, K, I table until it stops changing.
pub fn reduce_ski(expr: &str) -> String {
    reduce(expr, &CombinatorTable::ski(), StepBudget::Unbounded)
}

/// Parse `expr` for display, printing any structural error to stderr.
pub fn parse_tree(expr: &str, table: &CombinatorTable) -> Result<Node, Diagnostic> {
    match tree::parse(expr, table) {
        Ok(node) => Ok(node),
        Err(diag) => {
            diag.render("<expr>", &tree::normalize(expr));
            Err(diag)
        }
    }
}
