use robson_core::{Issue, Position as CorePosition, Severity, Span};
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticRelatedInformation, DiagnosticSeverity, Location, NumberOrString, Position, Range, Url,
};

// Both sides count columns in UTF-16 code units, so conversion is field by field.
pub fn to_lsp_position(position: CorePosition) -> Position {
    Position::new(position.line, position.character)
}

pub fn from_lsp_position(position: Position) -> CorePosition {
    CorePosition::new(position.line, position.character)
}

pub fn to_lsp_range(span: Span) -> Range {
    Range::new(to_lsp_position(span.start), to_lsp_position(span.end))
}

pub fn from_lsp_range(range: Range) -> Span {
    Span::new(from_lsp_position(range.start), from_lsp_position(range.end))
}

/// Converts an analyzer issue into a diagnostic for the document at `uri`.
///
/// The issue kind becomes the diagnostic code, and a related note becomes a
/// related location in the same document.
pub fn issue_to_diagnostic(uri: &Url, issue: &Issue) -> Diagnostic {
    let severity = match issue.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };
    let related_information = issue.related.as_ref().map(|note| {
        vec![DiagnosticRelatedInformation {
            location: Location::new(uri.clone(), to_lsp_range(note.span)),
            message: note.message.clone(),
        }]
    });
    Diagnostic {
        range: to_lsp_range(issue.span),
        severity: Some(severity),
        code: Some(NumberOrString::String(issue.kind.code().to_string())),
        source: Some("robson".to_string()),
        message: issue.message.clone(),
        related_information,
        ..Default::default()
    }
}
