use crate::DECLARATION_MARKER;
use crate::issue::{Issue, IssueKind, IssueSink};
use crate::mnemonic::{ArgumentKind, Mnemonic};
use crate::scan::NUMERIC_LITERAL;

use super::PassContext;

/// Checks the argument of every parameter line against its mnemonic's grammar.
pub fn check(cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
    for line in 0..cx.index.line_count() {
        if sink.is_exhausted() {
            break;
        }
        let (start, code) = cx.index.code(line);
        let mut parts = code.splitn(2, char::is_whitespace);
        let Some(mnemonic) = parts.next().and_then(Mnemonic::from_keyword) else {
            continue;
        };
        let Some(kind) = mnemonic.argument() else {
            continue;
        };
        let argument = parts.next().unwrap_or("").trim_start();
        if accepts(kind, argument) {
            continue;
        }
        let message = match kind {
            ArgumentKind::Alias => format!("Invalid alias for {mnemonic}"),
            ArgumentKind::NumericLiteral | ArgumentKind::Unsigned => format!("Invalid number for {mnemonic}"),
        };
        let span = cx.index.span(start, start + code.len());
        sink.push(Issue::error(IssueKind::InvalidLiteral, span, message));
    }
}

// Only the start of the argument is checked.
fn accepts(kind: ArgumentKind, argument: &str) -> bool {
    match kind {
        ArgumentKind::NumericLiteral => NUMERIC_LITERAL.is_match(argument),
        ArgumentKind::Unsigned => argument.starts_with(|c: char| c.is_ascii_digit()),
        ArgumentKind::Alias => argument.starts_with(DECLARATION_MARKER),
    }
}
