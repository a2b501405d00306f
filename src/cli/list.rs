use std::path::PathBuf;

use clap::Args;

use colc::config::TableFile;

use super::{fail, load_table};

#[derive(Args)]
pub struct ListArgs {
    /// JSON combinator definition file (default: S, K, I)
    #[arg(short = 'c', long = "combinator", value_name = "PATH")]
    pub combinator: Option<PathBuf>,
    /// Print the table in definition-file format
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_list(args: ListArgs) {
    let table = load_table(args.combinator.as_deref());

    if args.json {
        match serde_json::to_string_pretty(&TableFile::from_table(&table)) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&colc::Diagnostic::error(
                format!("cannot encode table: {}", e),
                colc::span::Span::dummy(),
            )),
        }
        return;
    }

    if table.is_empty() {
        eprintln!("(no combinators defined)");
        return;
    }
    let width = table.names().map(|n| n.chars().count()).max().unwrap_or(0);
    for def in &table {
        println!(
            "{:<width$}  {}  {}",
            def.name,
            def.arity,
            def.template,
            width = width
        );
    }
}
