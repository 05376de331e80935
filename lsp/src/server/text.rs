use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

/// Rope char index for an LSP position. Columns past the end of the line
/// clamp to the line end, lines past the end clamp to the end of the text.
pub(crate) fn position_to_char_idx(rope: &Rope, position: Position) -> usize {
    let line = position.line as usize;
    if line >= rope.len_lines() {
        return rope.len_chars();
    }
    let slice = rope.line(line);
    let mut len = slice.len_chars();
    if len > 0 && slice.char(len - 1) == '\n' {
        len -= 1;
    }
    let content = slice.slice(..len);
    let units = (position.character as usize).min(content.len_utf16_cu());
    rope.line_to_char(line) + content.utf16_cu_to_char(units)
}

/// Applies one full or ranged change to `rope`.
pub(crate) fn apply_change(rope: &mut Rope, change: &TextDocumentContentChangeEvent) {
    let Some(range) = change.range else {
        *rope = Rope::from_str(&change.text);
        return;
    };
    let a = position_to_char_idx(rope, range.start);
    let b = position_to_char_idx(rope, range.end);
    let (start, end) = (a.min(b), a.max(b));
    if start < end {
        rope.remove(start..end);
    }
    if !change.text.is_empty() {
        rope.insert(start, &change.text);
    }
}
