#[cfg(test)]
mod inlay_hint_tests {
    use crate::compute_inlay_hints;
    use robson_core::InstructionSet;
    use tower_lsp::lsp_types::{InlayHint, InlayHintKind, InlayHintLabel, Position, Range};

    fn full_range(s: &str) -> Range {
        let lines = s.lines().count();
        let end_line = (lines.saturating_sub(1)) as u32;
        let end_col = s.lines().last().map(|l| l.len() as u32).unwrap_or(0);
        Range::new(Position::new(0, 0), Position::new(end_line, end_col))
    }

    fn labels(hints: &[InlayHint]) -> Vec<String> {
        hints
            .iter()
            .map(|h| match &h.label {
                InlayHintLabel::String(s) => s.clone(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_opcode_hints_for_each_instruction() {
        let src = "robson robson robson\ncomeu 1\n  robson robson robson robson robson robson robson\n";
        let hints = compute_inlay_hints(src, full_range(src), InstructionSet::Standard.table());
        assert_eq!(labels(&hints), vec!["push", "print"]);
        assert_eq!(hints[1].position, Position::new(2, 2));
        assert!(hints.iter().all(|h| h.kind == Some(InlayHintKind::TYPE)));
        assert!(hints.iter().all(|h| h.padding_right == Some(true)));
    }

    #[test]
    fn test_hints_outside_range_are_skipped() {
        let src = "robson\ncomeu 0\nfudeu 1\nfudeu 2\nrobson robson robson\ncomeu 4\n";
        let range = Range::new(Position::new(3, 0), Position::new(5, 0));
        let hints = compute_inlay_hints(src, range, InstructionSet::Standard.table());
        assert_eq!(labels(&hints), vec!["push"]);
    }

    #[test]
    fn test_invalid_instructions_get_no_hint() {
        let src = "robson robsom\nrobson robson robson robson robson robson robson robson robson robson robson robson robson\n";
        let hints = compute_inlay_hints(src, full_range(src), InstructionSet::Standard.table());
        assert!(hints.is_empty(), "{:?}", labels(&hints));
    }

    #[test]
    fn test_extended_sub_operation_hint() {
        let src = "robson\ncomeu 3\nfudeu 0\nfudeu 1\n";
        let hints = compute_inlay_hints(src, full_range(src), InstructionSet::Extended.table());
        assert_eq!(labels(&hints), vec!["operation (div)"]);
    }
}
