//! Computation records for batches of input lines, and their text and
//! JSON renderings.

use rayon::prelude::*;
use serde::Serialize;

use crate::combinator::CombinatorTable;
use crate::diagnostic::Diagnostic;
use crate::reduce::{reduce, reduce_with, StepBudget};
use crate::span::Span;

/// The outcome of reducing one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Computation {
    pub input: String,
    /// Every intermediate expression, when recorded.
    pub process: Option<Vec<String>>,
    pub result: String,
}

/// Reduce `expr`, keeping the expression produced by every step that
/// changed it. The final no-change step is not recorded.
pub fn reduce_traced(expr: &str, table: &CombinatorTable, budget: StepBudget) -> (Vec<String>, String) {
    let mut process = Vec::new();
    let result = reduce_with(expr, table, budget, |_, step| process.push(step.to_string()));
    (process, result)
}

pub fn compute(input: &str, table: &CombinatorTable, budget: StepBudget, record: bool) -> Computation {
    let (process, result) = if record {
        let (process, result) = reduce_traced(input, table, budget);
        (Some(process), result)
    } else {
        (None, reduce(input, table, budget))
    };
    Computation {
        input: input.to_string(),
        process,
        result,
    }
}

/// Reduce each line independently. Lines are trimmed first. Output order
/// matches input order whether or not the work runs in parallel.
pub fn reduce_lines<S>(
    lines: &[S],
    table: &CombinatorTable,
    budget: StepBudget,
    record: bool,
    parallel: bool,
) -> Vec<Computation>
where
    S: AsRef<str> + Sync,
{
    let run = |line: &S| compute(line.as_ref().trim(), table, budget, record);
    if parallel {
        log::debug!("reducing {} line(s) on the rayon pool", lines.len());
        lines.par_iter().map(run).collect()
    } else {
        lines.iter().map(run).collect()
    }
}

/// Plain-text rendering, one entry per output line.
///
/// Without recorded steps each computation is its result line. With
/// steps, each computation is an optional `=== input ===` header, the
/// steps, then the result.
pub fn render_text(computations: &[Computation], header: bool) -> Vec<String> {
    let mut out = Vec::new();
    for c in computations {
        match &c.process {
            None => out.push(c.result.clone()),
            Some(process) => {
                if header {
                    out.push(format!("=== {} ===", c.input));
                }
                out.extend(process.iter().cloned());
                out.push(c.result.clone());
            }
        }
    }
    out
}

/// JSON rendering: compact without `indent`, pretty-printed with it.
pub fn render_json(computations: &[Computation], indent: Option<&str>) -> Result<String, Diagnostic> {
    let bytes = match indent {
        None => serde_json::to_vec(computations),
        Some(indent) => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            computations.serialize(&mut ser).map(|()| buf)
        }
    }
    .map_err(|e| Diagnostic::error(format!("cannot encode results: {}", e), Span::dummy()))?;
    String::from_utf8(bytes)
        .map_err(|e| Diagnostic::error(format!("cannot encode results: {}", e), Span::dummy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ski() -> CombinatorTable {
        CombinatorTable::ski()
    }

    #[test]
    fn test_reduce_traced() {
        let (process, result) = reduce_traced("SKIx", &ski(), StepBudget::Unbounded);
        assert_eq!(process, vec!["Kx(Ix)", "x"]);
        assert_eq!(result, "x");
    }

    #[test]
    fn test_reduce_traced_irreducible() {
        let (process, result) = reduce_traced("xyz", &ski(), StepBudget::Unbounded);
        assert!(process.is_empty());
        assert_eq!(result, "xyz");
    }

    #[test]
    fn test_reduce_lines_trims_and_keeps_order() {
        let lines = ["  Sxyz ", "SKII", "(SSSS)"];
        let out = reduce_lines(&lines, &ski(), StepBudget::Unbounded, false, false);
        let results: Vec<&str> = out.iter().map(|c| c.result.as_str()).collect();
        assert_eq!(results, vec!["xz(yz)", "I", "SS(SS)"]);
        assert_eq!(out[0].input, "Sxyz");
    }

    #[test]
    fn test_reduce_lines_parallel_matches_sequential() {
        let lines: Vec<String> = (0..64)
            .map(|i| if i % 2 == 0 { "SKIx".to_string() } else { format!("S{}yz", i) })
            .collect();
        let seq = reduce_lines(&lines, &ski(), StepBudget::Unbounded, true, false);
        let par = reduce_lines(&lines, &ski(), StepBudget::Unbounded, true, true);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_reduce_lines_with_budget() {
        let out = reduce_lines(&["Sxyz", "SKII"], &ski(), StepBudget::Limited(1), false, false);
        assert_eq!(render_text(&out, true), vec!["xz(yz)", "KI(II)"]);
    }

    #[test]
    fn test_render_text_with_process() {
        let out = reduce_lines(&["SKIx"], &ski(), StepBudget::Unbounded, true, false);
        assert_eq!(render_text(&out, true), vec!["=== SKIx ===", "Kx(Ix)", "x", "x"]);
        assert_eq!(render_text(&out, false), vec!["Kx(Ix)", "x", "x"]);
    }

    #[test]
    fn test_render_json_compact() {
        let out = reduce_lines(&["Sxyz", "Sxyz"], &ski(), StepBudget::Unbounded, false, false);
        assert_eq!(
            render_json(&out, None).unwrap(),
            r#"[{"input":"Sxyz","process":null,"result":"xz(yz)"},{"input":"Sxyz","process":null,"result":"xz(yz)"}]"#
        );
    }

    #[test]
    fn test_render_json_with_process() {
        let out = reduce_lines(&["SKIx"], &ski(), StepBudget::Unbounded, true, false);
        assert_eq!(
            render_json(&out, None).unwrap(),
            r#"[{"input":"SKIx","process":["Kx(Ix)","x"],"result":"x"}]"#
        );
    }

    #[test]
    fn test_render_json_indented() {
        let out = reduce_lines(&["Sxyz"], &ski(), StepBudget::Unbounded, true, false);
        insta::assert_snapshot!(render_json(&out, Some("  ")).unwrap(), @r#"
        [
          {
            "input": "Sxyz",
            "process": [
              "xz(yz)"
            ],
            "result": "xz(yz)"
          }
        ]
        "#);
    }

    #[test]
    fn test_render_json_tab_indent() {
        let out = reduce_lines(&["I"], &ski(), StepBudget::Unbounded, false, false);
        assert_eq!(
            render_json(&out, Some("\t")).unwrap(),
            "[\n\t{\n\t\t\"input\": \"I\",\n\t\t\"process\": null,\n\t\t\"result\": \"I\"\n\t}\n]"
        );
    }
}
