use robson_core::hints::opcode_labels;
use robson_core::OpcodeTable;
use tower_lsp::lsp_types::{InlayHint, InlayHintKind, InlayHintLabel, Range};

use super::convert::to_lsp_position;

/// Opcode name hints for the instruction lines inside `range`.
pub fn compute_inlay_hints(content: &str, range: Range, table: &OpcodeTable) -> Vec<InlayHint> {
    opcode_labels(content, table)
        .into_iter()
        .filter(|label| (range.start.line..=range.end.line).contains(&label.position.line))
        .map(|label| InlayHint {
            position: to_lsp_position(label.position),
            label: InlayHintLabel::String(label.label),
            kind: Some(InlayHintKind::TYPE),
            text_edits: None,
            tooltip: None,
            padding_left: None,
            padding_right: Some(true),
            data: None,
        })
        .collect()
}
