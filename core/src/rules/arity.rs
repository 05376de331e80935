use crate::issue::{Issue, IssueKind, IssueSink};
use crate::opcode::{classify, is_instruction_line};

use super::PassContext;

/// Checks that every instruction is followed by as many parameter lines as its
/// opcode requires.
///
/// Lines that start with the instruction keyword but do not classify are
/// reported as invalid instructions, and opcodes beyond the table as unknown.
/// Lines past the end of the text count as blank.
pub fn check(cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
    let index = cx.index;
    for line in 0..index.line_count() {
        if sink.is_exhausted() {
            break;
        }
        let text = index.line_text(line);
        if !is_instruction_line(text) {
            continue;
        }
        let (start, code) = index.code(line);
        let code_span = index.span(start, start + code.len());

        let Some(opcode) = classify(text) else {
            sink.push(Issue::error(
                IssueKind::InvalidInstruction,
                code_span,
                format!("Invalid instruction {code}"),
            ));
            continue;
        };
        let Some(entry) = cx.table.get(opcode) else {
            if opcode > cx.table.max_opcode() {
                sink.push(Issue::error(
                    IssueKind::UnknownOpcode,
                    code_span,
                    format!("Unknown opcode {opcode}"),
                ));
            }
            continue;
        };

        for given in 0..entry.params {
            let param_line = line + given + 1;
            if index.code(param_line).1.is_empty() {
                sink.push(Issue::error(
                    IssueKind::MissingParameters,
                    index.line_span(param_line),
                    format!(
                        "Missing parameters for {}, needs {} given {}",
                        entry.name, entry.params, given
                    ),
                ));
                break;
            }
        }
    }
}
