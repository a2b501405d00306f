//! Combinator definition files.
//!
//! A definition file is a JSON array:
//!
//! ```json
//! [
//!   { "combinatorName": "S", "argsCount": 3, "format": "{0}{2}({1}{2})" },
//!   { "combinatorName": "K", "argsCount": 2, "format": "{0}" }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combinator::{CombinatorDefinition, CombinatorTable};
use crate::diagnostic::Diagnostic;
use crate::span::Span;

/// One entry of a definition file, as written on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinatorEntry {
    pub combinator_name: String,
    pub args_count: usize,
    pub format: String,
}

/// The on-disk form of a combinator table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableFile(pub Vec<CombinatorEntry>);

impl TableFile {
    pub fn into_table(self) -> Result<CombinatorTable, Diagnostic> {
        let defs = self
            .0
            .iter()
            .enumerate()
            .map(|(i, e)| {
                CombinatorDefinition::new(&e.combinator_name, e.args_count, &e.format)
                    .map_err(|d| d.with_note(format!("in entry #{}", i)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CombinatorTable::new(defs)
    }

    pub fn from_table(table: &CombinatorTable) -> Self {
        TableFile(
            table
                .iter()
                .map(|d| CombinatorEntry {
                    combinator_name: d.name.clone(),
                    args_count: d.arity,
                    format: d.template.source().to_string(),
                })
                .collect(),
        )
    }
}

/// Parse a definition file held in memory.
pub fn parse_table(json: &str) -> Result<CombinatorTable, Diagnostic> {
    let file: TableFile = serde_json::from_str(json).map_err(|e| {
        Diagnostic::error(format!("invalid combinator definitions: {}", e), Span::dummy())
            .with_help(
                "expected an array of {\"combinatorName\", \"argsCount\", \"format\"} objects"
                    .to_string(),
            )
    })?;
    file.into_table()
}

/// Load a definition file from disk.
pub fn load_table(path: &Path) -> Result<CombinatorTable, Diagnostic> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Diagnostic::error(
            format!("cannot read '{}': {}", path.display(), e),
            Span::dummy(),
        )
    })?;
    let table = parse_table(&content)
        .map_err(|d| d.with_note(format!("while loading '{}'", path.display())))?;
    log::debug!(
        "loaded {} combinator(s) from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BOOL_JSON: &str = r#"[
        {"combinatorName": "<true>", "argsCount": 2, "format": "{0}"},
        {"combinatorName": "<false>", "argsCount": 2, "format": "{1}"},
        {"combinatorName": "B", "argsCount": 3, "format": "{0}({1}{2})"}
    ]"#;

    #[test]
    fn test_parse_table() {
        let table = parse_table(BOOL_JSON).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["<true>", "<false>", "B"]);
        assert_eq!(table.get("B").map(|d| d.arity), Some(3));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_table("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_table("{ not json").unwrap_err();
        assert!(err.message.starts_with("invalid combinator definitions"));
        assert!(err.help.is_some());
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = parse_table(r#"[{"combinatorName": "S", "format": "{0}"}]"#).unwrap_err();
        assert!(err.message.contains("argsCount"), "got: {}", err.message);
    }

    #[test]
    fn test_parse_rejects_negative_arity() {
        assert!(parse_table(r#"[{"combinatorName": "S", "argsCount": -1, "format": ""}]"#).is_err());
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let json = r#"[
            {"combinatorName": "S", "argsCount": 1, "format": "{0}"},
            {"combinatorName": "S", "argsCount": 2, "format": "{0}"}
        ]"#;
        assert!(parse_table(json).unwrap_err().message.contains("duplicate"));
    }

    #[test]
    fn test_parse_rejects_empty_name_with_entry_note() {
        let json = r#"[
            {"combinatorName": "S", "argsCount": 1, "format": "{0}"},
            {"combinatorName": "", "argsCount": 1, "format": "{0}"}
        ]"#;
        let err = parse_table(json).unwrap_err();
        assert!(err.notes.iter().any(|n| n == "in entry #1"));
    }

    #[test]
    fn test_load_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combinator.json");
        fs::write(&path, BOOL_JSON).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.message.starts_with("cannot read"));
    }

    #[test]
    fn test_table_file_round_trip_keeps_order() {
        let ski = CombinatorTable::ski();
        let file = TableFile::from_table(&ski);
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(
            json,
            r#"[{"combinatorName":"S","argsCount":3,"format":"{0}{2}({1}{2})"},{"combinatorName":"K","argsCount":2,"format":"{0}"},{"combinatorName":"I","argsCount":1,"format":"{0}"}]"#
        );
        assert_eq!(parse_table(&json).unwrap(), ski);
    }
}
