use serde::{Deserialize, Serialize};

use crate::mnemonic::Mnemonic;
use crate::opcode::{OpcodeTable, classify, is_instruction_line};
use crate::text::{LineIndex, Position};

/// Display name of the instruction starting at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodeLabel {
    pub position: Position,
    pub opcode: u32,
    pub label: String,
}

/// One label per valid instruction line, placed before its first keyword.
///
/// Opcodes with sub-operations are refined by the integer argument of the
/// following `comeu` line when there is one.
pub fn opcode_labels(text: &str, table: &OpcodeTable) -> Vec<OpcodeLabel> {
    let index = LineIndex::new(text);
    let mut labels = Vec::new();
    for line in 0..index.line_count() {
        let raw = index.line_text(line);
        if !is_instruction_line(raw) {
            continue;
        }
        let Some(opcode) = classify(raw) else {
            continue;
        };
        let sub_operation = if table.has_sub_operations(opcode) {
            sub_operation_index(index.code(line + 1).1)
        } else {
            None
        };
        let Some(label) = table.display_name(opcode, sub_operation) else {
            continue;
        };
        let (start, _) = index.code(line);
        labels.push(OpcodeLabel {
            position: index.position(start),
            opcode,
            label,
        });
    }
    labels
}

fn sub_operation_index(code: &str) -> Option<usize> {
    let rest = code.strip_prefix(Mnemonic::Comeu.keyword())?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::InstructionSet;

    #[test]
    fn test_labels_for_standard_table() {
        let text = "  robson robson robson\ncomeu 1\nrobson robsom\nrobson robson robson robson robson robson robson\n";
        let labels = opcode_labels(text, InstructionSet::Standard.table());
        let found: Vec<_> = labels.iter().map(|l| (l.position, l.label.as_str())).collect();
        assert_eq!(
            found,
            vec![(Position::new(0, 2), "push"), (Position::new(3, 0), "print")]
        );
    }

    #[test]
    fn test_sub_operation_from_next_line() {
        let text = "robson\ncomeu 2 ; mul\nfudeu 0\nfudeu 1\nrobson\ncomeu x\n";
        let labels = opcode_labels(text, InstructionSet::Extended.table());
        let names: Vec<_> = labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(names, vec!["operation (mul)", "operation"]);

        // The standard table has no sub-operation names.
        let labels = opcode_labels(text, InstructionSet::Standard.table());
        assert_eq!(labels[0].label, "operation");
    }

    #[test]
    fn test_unknown_opcodes_get_no_label() {
        let text = vec!["robson"; 14].join(" ");
        assert!(opcode_labels(&text, InstructionSet::Standard.table()).is_empty());
        let labels = opcode_labels(&text, InstructionSet::Extended.table());
        assert_eq!(labels[0].label, "random");
    }
}
