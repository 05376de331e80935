use crate::issue::{Issue, IssueKind, IssueSink};
use crate::rename::to_canonical;
use crate::scan::CAMEL_CASE;
use crate::text::{LineIndex, Position, Span};

use super::PassContext;

/// Warns about alias tokens written in camelCase and suggests the snake_case form.
pub fn check(cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
    for found in CAMEL_CASE.scan(cx.text()) {
        if sink.is_exhausted() {
            break;
        }
        let span = cx.index.span(found.start, found.end);
        sink.push(
            Issue::warning(IssueKind::CamelCase, span, format!("{} Has camel case", found.text))
                .with_related(span, format!("Write it as {}", to_canonical(found.text))),
        );
    }
}

/// Span of the camelCase alias token under `position`, if any.
pub fn flagged_span_at(index: &LineIndex<'_>, position: Position) -> Option<Span> {
    CAMEL_CASE
        .scan(index.text())
        .map(|found| index.span(found.start, found.end))
        .find(|span| span.touches(position))
}
