use crate::COMMENT_MARKER;
use crate::issue::{Issue, IssueKind, IssueSink};
use crate::mnemonic::Mnemonic;
use crate::scan::DECLARATION_PREFIX;

use super::PassContext;

/// Reports every non-blank line that opens with something other than a known
/// keyword, a comment or an alias declaration.
pub fn check(cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
    let index = cx.index;
    for line in 0..index.line_count() {
        if sink.is_exhausted() {
            break;
        }
        let text = index.line_text(line);
        let head = text.trim_start();
        if head.trim_end().is_empty() || is_known_start(head) {
            continue;
        }
        let span = index.span(index.line_start(line), index.line_end(line));
        sink.push(Issue::error(
            IssueKind::UnknownKeyword,
            span,
            format!("Unknown keyword {}", text.trim_end_matches('\r')),
        ));
    }
}

fn is_known_start(head: &str) -> bool {
    head.starts_with(COMMENT_MARKER)
        || Mnemonic::ALL.iter().any(|m| head.starts_with(m.keyword()))
        || DECLARATION_PREFIX.is_match(head)
}
