use std::path::PathBuf;

use clap::{Args, ValueEnum};

use colc::trace::{reduce_lines, render_json, render_text};
use colc::StepBudget;

use super::{fail, load_table, read_inputs, write_output};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    Text,
    Json,
}

#[derive(Args)]
pub struct ReduceArgs {
    /// Input files, one expression per line (stdin when none are given)
    pub files: Vec<PathBuf>,
    /// Expression to reduce (repeatable)
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub exprs: Vec<String>,
    /// Number of steps to compute (negative: until the expression stops changing)
    #[arg(
        short = 's',
        long = "stepcount",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    pub step_count: i64,
    /// JSON combinator definition file (default: S, K, I)
    #[arg(short = 'c', long = "combinator", value_name = "PATH")]
    pub combinator: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short = 'o', long = "outfile", value_name = "PATH")]
    pub outfile: Option<PathBuf>,
    /// Output format
    #[arg(short = 't', long = "outfiletype", value_enum, default_value_t = OutputKind::Text)]
    pub outfile_type: OutputKind,
    /// Indent string for JSON output (`\t` is accepted for a tab); ignored with text output
    #[arg(short = 'i', long)]
    pub indent: Option<String>,
    /// Print every intermediate step
    #[arg(short = 'p', long = "print")]
    pub print: bool,
    /// Omit the `=== input ===` header before each step listing
    #[arg(short = 'n', long = "noheader")]
    pub no_header: bool,
    /// Reduce lines in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,
}

pub fn cmd_reduce(args: ReduceArgs) {
    let table = load_table(args.combinator.as_deref());
    let lines = read_inputs(&args.files, &args.exprs);
    let budget = StepBudget::from_count(args.step_count);
    log::debug!("reducing {} line(s), budget {}", lines.len(), budget);

    if args.indent.is_some() && args.outfile_type == OutputKind::Text {
        log::warn!("--indent only applies to JSON output; ignoring it");
    }

    let computations = reduce_lines(&lines, &table, budget, args.print, args.parallel);

    let rendered = match args.outfile_type {
        OutputKind::Text => render_text(&computations, !args.no_header),
        OutputKind::Json => {
            let indent = args.indent.as_deref().map(|s| s.replace("\\t", "\t"));
            match render_json(&computations, indent.as_deref()) {
                Ok(json) => vec![json],
                Err(diag) => fail(&diag),
            }
        }
    };

    write_output(args.outfile.as_deref(), &rendered);
}
