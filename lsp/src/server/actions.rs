use robson_core::{rename_edit, IssueKind};
use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, DocumentChanges, NumberOrString, OneOf,
    OptionalVersionedTextDocumentIdentifier, Range, TextDocumentEdit, TextEdit, Url, WorkspaceEdit,
};

use super::convert::{from_lsp_range, to_lsp_range};
use super::RENAME_COMMAND;

const RENAME_TITLE: &str = "Rename";

/// One `Rename` quick fix per camel-case diagnostic, each carrying the
/// rename command with `[uri, range]`.
pub fn rename_actions(uri: &Url, diagnostics: &[Diagnostic]) -> Vec<CodeActionOrCommand> {
    diagnostics
        .iter()
        .filter(|diagnostic| is_camel_case(diagnostic))
        .map(|diagnostic| {
            CodeActionOrCommand::CodeAction(CodeAction {
                title: RENAME_TITLE.to_string(),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![diagnostic.clone()]),
                command: Some(Command {
                    title: RENAME_TITLE.to_string(),
                    command: RENAME_COMMAND.to_string(),
                    arguments: Some(vec![serde_json::json!(uri), serde_json::json!(diagnostic.range)]),
                }),
                ..Default::default()
            })
        })
        .collect()
}

// Diagnostics from older servers carry no code, only the message.
fn is_camel_case(diagnostic: &Diagnostic) -> bool {
    match &diagnostic.code {
        Some(NumberOrString::String(code)) => IssueKind::from_code(code) == Some(IssueKind::CamelCase),
        _ => diagnostic.message.contains("camel case"),
    }
}

/// Decodes the `[uri, range]` arguments of the rename command.
pub fn rename_arguments(arguments: &[Value]) -> Option<(Url, Range)> {
    let [uri, range, ..] = arguments else {
        return None;
    };
    let uri = serde_json::from_value(uri.clone()).ok()?;
    let range = serde_json::from_value(range.clone()).ok()?;
    Some((uri, range))
}

/// Versioned edit replacing `range` in `text` with its canonical spelling.
pub fn rename_workspace_edit(uri: Url, version: i32, text: &str, range: Range) -> Option<WorkspaceEdit> {
    let edit = rename_edit(text, from_lsp_range(range))?;
    Some(WorkspaceEdit {
        document_changes: Some(DocumentChanges::Edits(vec![TextDocumentEdit {
            text_document: OptionalVersionedTextDocumentIdentifier {
                uri,
                version: Some(version),
            },
            edits: vec![OneOf::Left(TextEdit {
                range: to_lsp_range(edit.span),
                new_text: edit.new_text,
            })],
        }])),
        ..Default::default()
    })
}
