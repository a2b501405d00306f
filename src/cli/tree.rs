use std::path::PathBuf;
use std::process;

use clap::Args;

use super::{fail, load_table};

#[derive(Args)]
pub struct TreeArgs {
    /// Expression to decompose
    pub expr: String,
    /// JSON combinator definition file (default: S, K, I)
    #[arg(short = 'c', long = "combinator", value_name = "PATH")]
    pub combinator: Option<PathBuf>,
    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_tree(args: TreeArgs) {
    let table = load_table(args.combinator.as_deref());
    let node = match colc::parse_tree(&args.expr, &table) {
        Ok(node) => node,
        Err(_) => process::exit(1),
    };

    if args.json {
        match serde_json::to_string_pretty(&node) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&colc::Diagnostic::error(
                format!("cannot encode tree: {}", e),
                colc::span::Span::dummy(),
            )),
        }
    } else {
        println!("{}", node);
    }
}
