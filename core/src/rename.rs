use serde::{Deserialize, Serialize};

use crate::DECLARATION_MARKER;
use crate::text::{LineIndex, Span};

/// A single replacement of `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEdit {
    pub span: Span,
    pub new_text: String,
}

/// Rewrites a camelCase identifier in snake_case, keeping a leading
/// declaration marker in place.
///
/// An underscore goes before each ASCII capital unless one is already there.
/// Only one `_` is then dropped from the front, and one more right after a
/// leading marker; any further underscores are kept.
///
/// ```
/// use robson_core::to_canonical;
///
/// assert_eq!(to_canonical("fooBar"), "foo_bar");
/// assert_eq!(to_canonical(":fooBar"), ":foo_bar");
/// assert_eq!(to_canonical("_FooBar"), "foo_bar");
/// assert_eq!(to_canonical("__Foo"), "_foo");
/// ```
pub fn to_canonical(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for ch in identifier.chars() {
        if ch.is_ascii_uppercase() && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }

    let trimmed = out.strip_prefix('_').unwrap_or(&out);
    match trimmed.strip_prefix(DECLARATION_MARKER) {
        Some(rest) => format!("{DECLARATION_MARKER}{}", rest.strip_prefix('_').unwrap_or(rest)),
        None => trimmed.to_string(),
    }
}

/// Replacement for the identifier covered by `span`, or `None` when the span
/// covers no text.
pub fn rename_edit(text: &str, span: Span) -> Option<RenameEdit> {
    let current = LineIndex::new(text).slice(span);
    if current.is_empty() {
        return None;
    }
    Some(RenameEdit {
        span,
        new_text: to_canonical(current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Position;

    #[test]
    fn test_canonical_forms() {
        assert_eq!(to_canonical("fooBar"), "foo_bar");
        assert_eq!(to_canonical(":fooBar"), ":foo_bar");
        assert_eq!(to_canonical("_FooBar"), "foo_bar");
        assert_eq!(to_canonical(":PushValue"), ":push_value");
        assert_eq!(to_canonical("pushValue:"), "push_value:");
        assert_eq!(to_canonical("already_snake"), "already_snake");
        assert_eq!(to_canonical("loop2Start"), "loop2_start");
        assert_eq!(to_canonical(""), "");
    }

    #[test]
    fn test_drops_a_single_underscore() {
        assert_eq!(to_canonical("__Foo"), "_foo");
        assert_eq!(to_canonical(":__foo"), ":_foo");
        assert_eq!(to_canonical(":_Foo"), ":foo");
        assert_eq!(to_canonical("Foo_Bar"), "foo_bar");
        assert_eq!(to_canonical("_:Foo"), ":foo");
    }

    #[test]
    fn test_lowercases_non_ascii() {
        assert_eq!(to_canonical("çãoX"), "ção_x");
        // Only ASCII capitals get an underscore, but every letter is lowercased.
        assert_eq!(to_canonical("ÇX"), "ç_x");
    }

    #[test]
    fn test_rename_edit_replaces_span_text() {
        let text = "lambeu :pushValue\npushValue:\n";
        let span = Span::new(Position::new(0, 7), Position::new(0, 17));
        let edit = rename_edit(text, span).expect("edit");
        assert_eq!(edit.span, span);
        assert_eq!(edit.new_text, ":push_value");

        let empty = Span::new(Position::new(1, 3), Position::new(1, 3));
        assert_eq!(rename_edit(text, empty), None);
    }
}
