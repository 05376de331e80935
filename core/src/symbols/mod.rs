use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::DECLARATION_MARKER;
use crate::issue::{Issue, IssueKind, IssueSink};
use crate::scan::{ALIAS_DECLARATION, ALIAS_USAGE, TokenMatch};
use crate::text::{LineIndex, Position, Span, strip_comment};


/// One distinct alias declaration (`name:`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub span: Span,
    pub name: String,
}

/// One occurrence of an alias reference (`:name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasUsage {
    pub span: Span,
    pub name: String,
}

/// Alias declarations in declaration order and usages in occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub declarations: Vec<AliasRecord>,
    pub usages: Vec<AliasUsage>,
}

impl SymbolTable {
    pub fn declaration(&self, name: &str) -> Option<&AliasRecord> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Usage under the cursor. When spans touch, the later usage wins.
    pub fn usage_at(&self, position: Position) -> Option<&AliasUsage> {
        self.usages.iter().rev().find(|u| u.span.touches(position))
    }

    /// Declaration span for the usage under the cursor, if it resolves.
    pub fn definition_at(&self, position: Position) -> Option<Span> {
        let usage = self.usage_at(position)?;
        self.declaration(&usage.name).map(|d| d.span)
    }

    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }
}

/// Scans `index`'s text for alias declarations and usages.
///
/// Duplicate, undeclared and unused aliases go to `sink`. The budget only gates
/// what is reported: every match is still recorded, so the table is complete
/// even when the issue list is truncated.
pub fn build_symbol_table(index: &LineIndex<'_>, sink: &mut IssueSink) -> SymbolTable {
    let text = index.text();
    let mut table = SymbolTable::default();
    let mut declared: FxHashMap<&str, usize> = FxHashMap::default();

    for found in ALIAS_DECLARATION.scan(text) {
        if !outside_comment(index, &found) {
            continue;
        }
        let name = found.text.trim_end_matches(DECLARATION_MARKER);
        let span = index.span(found.start, found.end);
        match declared.get(name) {
            Some(&first) => {
                let first_span = table.declarations[first].span;
                sink.push(
                    Issue::error(IssueKind::DuplicateAlias, span, format!("Duplicated alias {name}"))
                        .with_related(first_span, "First declared here"),
                );
            }
            None => {
                declared.insert(name, table.declarations.len());
                table.declarations.push(AliasRecord {
                    span,
                    name: name.to_string(),
                });
            }
        }
    }

    for found in ALIAS_USAGE.scan(text) {
        if !outside_comment(index, &found) {
            continue;
        }
        let name = found.text.replacen(DECLARATION_MARKER, "", 1);
        let span = index.span(found.start, found.end);
        if !declared.contains_key(name.as_str()) {
            sink.push(Issue::error(
                IssueKind::UndeclaredAlias,
                span,
                "Using alias before declaration",
            ));
        }
        table.usages.push(AliasUsage { span, name });
    }

    let used: FxHashSet<&str> = table.usages.iter().map(|u| u.name.as_str()).collect();
    for declaration in &table.declarations {
        if !used.contains(declaration.name.as_str()) {
            sink.push(Issue::warning(
                IssueKind::UnusedAlias,
                declaration.span,
                "This alias is never used",
            ));
        }
    }

    table
}

// A match only counts when it survives stripping the comment from its line.
// This is a textual heuristic, so it errs towards ignoring matches.
fn outside_comment(index: &LineIndex<'_>, found: &TokenMatch<'_>) -> bool {
    let line_start = index.line_start(index.line_of(found.start));
    strip_comment(&index.text()[line_start..found.end]).contains(found.text)
}
