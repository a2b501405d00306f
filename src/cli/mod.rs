pub mod list;
pub mod reduce;
pub mod step;
pub mod tree;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use colc::{CombinatorTable, Diagnostic};

/// Print a diagnostic without source context and exit with status 1.
pub fn fail(diag: &Diagnostic) -> ! {
    eprintln!("{}", diag);
    for note in &diag.notes {
        eprintln!("  note: {}", note);
    }
    if let Some(help) = &diag.help {
        eprintln!("  help: {}", help);
    }
    process::exit(1);
}

/// The combinator table from `path`, or the S, K, I defaults.
pub fn load_table(path: Option<&Path>) -> CombinatorTable {
    match path {
        None => CombinatorTable::ski(),
        Some(path) => match colc::config::load_table(path) {
            Ok(table) => table,
            Err(diag) => fail(&diag),
        },
    }
}

fn read_lines_from(reader: impl BufRead, name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        match line {
            Ok(line) => lines.push(line),
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", name, e);
                process::exit(1);
            }
        }
    }
    lines
}

/// Gather input expressions: `exprs` first, then every line of every
/// file (`-` is stdin). Reads stdin when both are empty.
pub fn read_inputs(files: &[PathBuf], exprs: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = exprs.to_vec();
    if files.is_empty() && exprs.is_empty() {
        return read_lines_from(io::stdin().lock(), "<stdin>");
    }
    for path in files {
        if path.as_path() == Path::new("-") {
            lines.extend(read_lines_from(io::stdin().lock(), "<stdin>"));
            continue;
        }
        match std::fs::File::open(path) {
            Ok(f) => lines.extend(read_lines_from(io::BufReader::new(f), &path.display().to_string())),
            Err(e) => {
                eprintln!("error: cannot open '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }
    lines
}

/// Write each line, newline-terminated, to `outfile` or stdout. No lines
/// means empty output.
pub fn write_output(outfile: Option<&Path>, lines: &[String]) {
    let content: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    let result = match outfile {
        Some(path) => std::fs::write(path, &content).map(|()| {
            log::info!("wrote {}", path.display());
        }),
        None => io::stdout().lock().write_all(content.as_bytes()),
    };
    if let Err(e) = result {
        let target = outfile.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        eprintln!("error: cannot write '{}': {}", target, e);
        process::exit(1);
    }
}
