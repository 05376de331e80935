//! Token-shape scanning over document text.
//!
//! Every pass that looks for aliases or identifiers walks the text through a
//! [`Pattern`], which yields successive non-overlapping matches with their
//! byte offsets.

use once_cell::sync::Lazy;
use regex::Regex;

/// One match produced by a [`Pattern`] scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
}

impl<'t> TokenMatch<'t> {
    fn from_regex(m: regex::Match<'t>) -> Self {
        Self {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
        }
    }
}

/// A described token shape that can be searched for in text.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    fn builtin(source: &str) -> Self {
        Self::new(source).unwrap_or_else(|e| panic!("built-in pattern {source:?} is invalid: {e}"))
    }

    /// All non-overlapping matches, left to right.
    pub fn scan<'t>(&self, text: &'t str) -> impl Iterator<Item = TokenMatch<'t>> {
        self.regex.find_iter(text).map(TokenMatch::from_regex)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// `name:` anywhere in the text.
pub(crate) static ALIAS_DECLARATION: Lazy<Pattern> = Lazy::new(|| Pattern::builtin(r"[A-Za-z0-9_]+:"));

/// `:name`, or `prefix:name` where the marker sits inside a word.
pub(crate) static ALIAS_USAGE: Lazy<Pattern> = Lazy::new(|| Pattern::builtin(r"[A-Za-z0-9_]*:[A-Za-z0-9_]+"));

/// A line that opens with a declaration token.
pub(crate) static DECLARATION_PREFIX: Lazy<Pattern> = Lazy::new(|| Pattern::builtin(r"^[A-Za-z0-9_]+:"));

/// Alias tokens with an internal lower/upper case transition, marker on either side.
pub(crate) static CAMEL_CASE: Lazy<Pattern> = Lazy::new(|| {
    const TRANSITION: &str = "(?:[A-Z0-9]*[a-z][a-z0-9]*[A-Z]|[a-z0-9]*[A-Z][A-Z0-9]*[a-z])";
    Pattern::builtin(&format!(
        ":[A-Za-z]{TRANSITION}[A-Za-z0-9]*|[A-Za-z]{TRANSITION}[A-Za-z0-9]*:"
    ))
});

/// Start of a `comeu` argument: plain digits, `f<digit>` or `i<digit>` / `i-<digit>`.
pub(crate) static NUMERIC_LITERAL: Lazy<Pattern> = Lazy::new(|| Pattern::builtin(r"^(?:[0-9]|f[0-9]|i-?[0-9])"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_yields_offsets_in_order() {
        let text = "a: b:\n:c";
        let found: Vec<_> = ALIAS_DECLARATION.scan(text).map(|m| (m.start, m.text)).collect();
        assert_eq!(found, vec![(0, "a:"), (3, "b:")]);
    }

    #[test]
    fn test_usages_do_not_overlap() {
        let text = "lambeu :one\nlambeu :two\nstart:go";
        let found: Vec<_> = ALIAS_USAGE.scan(text).map(|m| (m.start, m.text)).collect();
        assert_eq!(found, vec![(7, ":one"), (19, ":two"), (24, "start:go")]);
    }

    #[test]
    fn test_camel_case_shapes() {
        assert!(CAMEL_CASE.is_match("pushValue:"));
        assert!(CAMEL_CASE.is_match(":PushValue"));
        assert!(!CAMEL_CASE.is_match("Push:"));
        assert!(!CAMEL_CASE.is_match("PUSH:"));
        assert!(!CAMEL_CASE.is_match("pushValue"));
    }

    #[test]
    fn test_numeric_literal_prefixes() {
        for ok in ["0", "42", "f3.5", "i7", "i-7"] {
            assert!(NUMERIC_LITERAL.is_match(ok), "{ok} should be accepted");
        }
        for bad in ["", "x", "f", "i-", "-1", ":alias"] {
            assert!(!NUMERIC_LITERAL.is_match(bad), "{bad} should be rejected");
        }
    }
}
