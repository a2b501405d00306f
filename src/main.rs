mod cli;

use clap::{Parser, Subcommand};

use cli::list::{cmd_list, ListArgs};
use cli::reduce::{cmd_reduce, ReduceArgs};
use cli::step::{cmd_step, StepArgs};
use cli::tree::{cmd_tree, TreeArgs};

#[derive(Parser)]
#[command(
    name = "colc",
    version,
    about = "Combinatory logic calculator with user-defined combinators"
)]
struct Cli {
    /// Log every reduction step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reduce expressions from files, arguments or stdin
    Reduce(ReduceArgs),
    /// Print each single-step reduction of an expression
    Step(StepArgs),
    /// Print the structure of an expression
    Tree(TreeArgs),
    /// Print the active combinator table
    List(ListArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Reduce(args) => cmd_reduce(args),
        Command::Step(args) => cmd_step(args),
        Command::Tree(args) => cmd_tree(args),
        Command::List(args) => cmd_list(args),
    }
}
