use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::issue::{Issue, IssueSink};
use crate::rules::{PassContext, Rule};
use crate::settings::Settings;
use crate::symbols::{SymbolTable, build_symbol_table};
use crate::text::LineIndex;

mod store;

pub use store::AnalysisStore;


/// Result of analyzing one document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub issues: Vec<Issue>,
}

impl Analysis {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Runs the symbol table builder and every rule pass over a document.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    related_information: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            related_information: true,
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether issues keep their related notes. Clients without related
    /// information support get plain issues.
    pub fn with_related_information(mut self, enabled: bool) -> Self {
        self.related_information = enabled;
        self
    }

    /// Analyzes `text` from scratch.
    ///
    /// Passes share one issue budget of `settings.max_number_of_problems`, so
    /// the order below decides which issues survive truncation. The symbol
    /// table is always complete.
    pub fn analyze(&self, text: &str, settings: &Settings) -> Analysis {
        let index = LineIndex::new(text);
        let cx = PassContext::new(&index, settings.opcode_table());
        let mut sink = IssueSink::new(settings.max_number_of_problems, self.related_information);

        for rule in [Rule::Naming, Rule::Literals, Rule::Arity] {
            run_pass(rule, &cx, &mut sink);
        }
        let symbols = build_symbol_table(&index, &mut sink);
        run_pass(Rule::Keywords, &cx, &mut sink);

        let budget = sink.budget();
        let analysis = Analysis {
            symbols,
            issues: sink.into_issues(),
        };
        debug!(
            lines = index.line_count(),
            aliases = analysis.symbols.declarations.len(),
            usages = analysis.symbols.usages.len(),
            issues = analysis.issues.len(),
            truncated = budget.is_exhausted(),
            "analysis finished"
        );
        analysis
    }
}

fn run_pass(rule: Rule, cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
    let before = sink.issues().len();
    rule.run(cx, sink);
    trace!(
        pass = rule.name(),
        reported = sink.issues().len() - before,
        exhausted = sink.is_exhausted(),
        "rule pass finished"
    );
}
