use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    CamelCase,
    DuplicateAlias,
    UndeclaredAlias,
    UnusedAlias,
    MissingParameters,
    InvalidInstruction,
    UnknownOpcode,
    InvalidLiteral,
    UnknownKeyword,
}

impl IssueKind {
    /// Stable code attached to published diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::CamelCase => "camel-case",
            IssueKind::DuplicateAlias => "duplicate-alias",
            IssueKind::UndeclaredAlias => "undeclared-alias",
            IssueKind::UnusedAlias => "unused-alias",
            IssueKind::MissingParameters => "missing-parameters",
            IssueKind::InvalidInstruction => "invalid-instruction",
            IssueKind::UnknownOpcode => "unknown-opcode",
            IssueKind::InvalidLiteral => "invalid-literal",
            IssueKind::UnknownKeyword => "unknown-keyword",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        use IssueKind::*;
        [
            CamelCase,
            DuplicateAlias,
            UndeclaredAlias,
            UnusedAlias,
            MissingParameters,
            InvalidInstruction,
            UnknownOpcode,
            InvalidLiteral,
            UnknownKeyword,
        ]
        .into_iter()
        .find(|kind| kind.code() == code)
    }
}

/// Secondary location attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedNote {
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub span: Span,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedNote>,
}

impl Issue {
    pub fn error(kind: IssueKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            severity: Severity::Error,
            message: message.into(),
            related: None,
        }
    }

    pub fn warning(kind: IssueKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, span, message)
        }
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some(RelatedNote {
            span,
            message: message.into(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Shared cap on how many issues one analysis run may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueBudget {
    max: usize,
    current: usize,
}

impl IssueBudget {
    pub fn new(max: usize) -> Self {
        Self { max, current: 0 }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_exhausted(&self) -> bool {
        self.current >= self.max
    }

    /// Takes one slot; `false` once the budget is spent.
    pub fn try_consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.current += 1;
        true
    }
}

/// Collects issues from every pass of a run against one [`IssueBudget`].
#[derive(Debug, Clone)]
pub struct IssueSink {
    budget: IssueBudget,
    issues: Vec<Issue>,
    related_information: bool,
}

impl IssueSink {
    pub fn new(max: usize, related_information: bool) -> Self {
        Self {
            budget: IssueBudget::new(max),
            issues: Vec::new(),
            related_information,
        }
    }

    /// Records `issue` unless the budget is spent. Related notes are dropped when
    /// the consumer cannot show them.
    pub fn push(&mut self, mut issue: Issue) -> bool {
        if !self.budget.try_consume() {
            return false;
        }
        if !self.related_information {
            issue.related = None;
        }
        self.issues.push(issue);
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    pub fn budget(&self) -> IssueBudget {
        self.budget
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Position;

    fn span() -> Span {
        Span::new(Position::new(0, 0), Position::new(0, 1))
    }

    #[test]
    fn test_budget_stops_at_max() {
        let mut budget = IssueBudget::new(2);
        assert!(budget.try_consume());
        assert!(budget.try_consume());
        assert!(budget.is_exhausted());
        assert!(!budget.try_consume());
        assert_eq!(budget.current(), 2);
    }

    #[test]
    fn test_sink_drops_issues_past_budget() {
        let mut sink = IssueSink::new(1, true);
        assert!(sink.push(Issue::error(IssueKind::UnknownKeyword, span(), "first")));
        assert!(!sink.push(Issue::error(IssueKind::UnknownKeyword, span(), "second")));
        assert_eq!(sink.into_issues().len(), 1);
    }

    #[test]
    fn test_zero_budget_reports_nothing() {
        let mut sink = IssueSink::new(0, true);
        assert!(sink.is_exhausted());
        assert!(!sink.push(Issue::warning(IssueKind::UnusedAlias, span(), "unused")));
        assert!(sink.issues().is_empty());
    }

    #[test]
    fn test_related_notes_follow_capability() {
        let issue = Issue::warning(IssueKind::CamelCase, span(), "x").with_related(span(), "note");
        let mut with = IssueSink::new(5, true);
        let mut without = IssueSink::new(5, false);
        with.push(issue.clone());
        without.push(issue);
        assert!(with.issues()[0].related.is_some());
        assert!(without.issues()[0].related.is_none());
    }

    #[test]
    fn test_issue_kind_codes_round_trip() {
        for code in ["camel-case", "unused-alias", "unknown-keyword"] {
            let kind = IssueKind::from_code(code).expect("known code");
            assert_eq!(kind.code(), code);
        }
        assert_eq!(IssueKind::from_code("nope"), None);
    }
}
