use std::path::PathBuf;

use clap::Args;

use colc::Steps;

use super::load_table;

#[derive(Args)]
pub struct StepArgs {
    /// Expression to reduce
    pub expr: String,
    /// JSON combinator definition file (default: S, K, I)
    #[arg(short = 'c', long = "combinator", value_name = "PATH")]
    pub combinator: Option<PathBuf>,
    /// Stop after this many steps (default: until the expression stops changing)
    #[arg(short = 'n', long = "count")]
    pub count: Option<usize>,
}

pub fn cmd_step(args: StepArgs) {
    let table = load_table(args.combinator.as_deref());
    let expr = args.expr.trim();
    println!("0: {}", expr);
    let steps = Steps::new(expr, &table);
    for (i, next) in steps.take(args.count.unwrap_or(usize::MAX)).enumerate() {
        println!("{}: {}", i + 1, next);
    }
}
