//! Combinator definitions and the ordered table the reducer matches against.
//!
//! A table is plain read-only data. Matching policy: definitions are
//! tried in declaration order and the first whose name is a prefix of the
//! expression wins, even when a later definition would match a longer
//! prefix.

use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::span::Span;

/// One piece of a parsed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(usize),
}

/// A substitution template with positional placeholders `{0}`..`{arity-1}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    /// Brace groups that look like placeholders but are `>= arity`.
    out_of_range: Vec<usize>,
}

impl Template {
    /// Split `source` into literal runs and placeholder references.
    ///
    /// Only `{i}` with `i < arity` written in plain decimal is a
    /// placeholder. Everything else stays literal, including `{5}` for an
    /// arity-2 combinator and zero-padded forms such as `{01}`.
    pub fn parse(source: &str, arity: usize) -> Template {
        let mut segments = Vec::new();
        let mut out_of_range = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let index = after.find('}').and_then(|close| {
                let digits = &after[..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let i = digits.parse::<usize>().ok()?;
                (digits == i.to_string()).then_some((i, close))
            });

            match index {
                Some((i, close)) if i < arity => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(i));
                    rest = &after[close + 1..];
                }
                Some((i, close)) => {
                    out_of_range.push(i);
                    literal.push_str(&rest[open..open + close + 2]);
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Template {
            source: source.to_string(),
            segments,
            out_of_range,
        }
    }

    /// Substitute `args` in a single left-to-right pass. Argument text is
    /// copied verbatim and never rescanned for placeholders.
    pub fn render(&self, args: &[&str]) -> String {
        let capacity = self.source.len() + args.iter().map(|a| a.len()).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(i) => {
                    if let Some(arg) = args.get(*i) {
                        out.push_str(arg);
                    }
                }
            }
        }
        out
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder indices in template order, repeats included.
    pub fn placeholders(&self) -> Vec<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(i) => Some(*i),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn out_of_range(&self) -> &[usize] {
        &self.out_of_range
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A named rewrite rule: `name a0 .. a(arity-1)` rewrites to `template`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinatorDefinition {
    pub name: String,
    pub arity: usize,
    pub template: Template,
}

impl CombinatorDefinition {
    pub fn new(name: &str, arity: usize, template: &str) -> Result<Self, Diagnostic> {
        if name.is_empty() {
            return Err(Diagnostic::error(
                "combinator name must not be empty".to_string(),
                Span::dummy(),
            ));
        }
        if let Some(bad) = name.chars().find(|c| *c == '(' || *c == ')' || c.is_whitespace()) {
            return Err(Diagnostic::error(
                format!("combinator name '{}' contains '{}'", name, bad.escape_default()),
                Span::dummy(),
            )
            .with_help("names may not contain parentheses or whitespace".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            arity,
            template: Template::parse(template, arity),
        })
    }

    /// Apply the template to exactly `arity` collected arguments.
    pub fn apply(&self, args: &[&str]) -> String {
        debug_assert_eq!(args.len(), self.arity);
        self.template.render(args)
    }
}

impl fmt::Display for CombinatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} = {}", self.name, self.arity, self.template)
    }
}

/// Ordered, immutable set of combinator definitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinatorTable {
    defs: Vec<CombinatorDefinition>,
}

impl CombinatorTable {
    pub fn new(defs: Vec<CombinatorDefinition>) -> Result<Self, Diagnostic> {
        for (i, def) in defs.iter().enumerate() {
            if defs[..i].iter().any(|d| d.name == def.name) {
                return Err(Diagnostic::error(
                    format!("duplicate combinator '{}'", def.name),
                    Span::dummy(),
                ));
            }
        }

        for (i, def) in defs.iter().enumerate() {
            if let Some(earlier) = defs[..i].iter().find(|d| def.name.starts_with(&d.name)) {
                log::warn!(
                    "combinator '{}' is unreachable: earlier combinator '{}' is a prefix of it",
                    def.name,
                    earlier.name
                );
            }
            for index in def.template.out_of_range() {
                log::warn!(
                    "combinator '{}' has arity {} but its template mentions {{{}}}; left as text",
                    def.name,
                    def.arity,
                    index
                );
            }
        }

        Ok(Self { defs })
    }

    /// The classical S, K, I set.
    pub fn ski() -> Self {
        let defs = [("S", 3, "{0}{2}({1}{2})"), ("K", 2, "{0}"), ("I", 1, "{0}")]
            .into_iter()
            .map(|(name, arity, template)| CombinatorDefinition {
                name: name.to_string(),
                arity,
                template: Template::parse(template, arity),
            })
            .collect();
        Self { defs }
    }

    pub fn empty() -> Self {
        Self { defs: Vec::new() }
    }

    /// First definition, in declaration order, whose name prefixes `expr`.
    pub fn match_prefix(&self, expr: &str) -> Option<&CombinatorDefinition> {
        self.defs.iter().find(|d| expr.starts_with(d.name.as_str()))
    }

    /// Exact name lookup.
    pub fn get(&self, name: &str) -> Option<&CombinatorDefinition> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CombinatorDefinition> {
        self.defs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for CombinatorTable {
    fn default() -> Self {
        Self::ski()
    }
}

impl<'a> IntoIterator for &'a CombinatorTable {
    type Item = &'a CombinatorDefinition;
    type IntoIter = std::slice::Iter<'a, CombinatorDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.defs.iter()
    }
}
