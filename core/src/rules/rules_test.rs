#[cfg(test)]
mod tests {
    use crate::issue::{Issue, IssueKind, IssueSink, Severity};
    use crate::opcode::{InstructionSet, OpcodeTable};
    use crate::rules::{PassContext, Rule, naming};
    use crate::text::{LineIndex, Position, Span};

    fn run_with(rule: Rule, text: &str, table: &OpcodeTable, max: usize) -> Vec<Issue> {
        let index = LineIndex::new(text);
        let cx = PassContext::new(&index, table);
        let mut sink = IssueSink::new(max, true);
        rule.run(&cx, &mut sink);
        sink.into_issues()
    }

    fn run(rule: Rule, text: &str) -> Vec<Issue> {
        run_with(rule, text, InstructionSet::Standard.table(), 1000)
    }

    fn messages(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn test_naming_ignores_plain_identifiers() {
        for text in ["push:\n", "PUSH:\n", "_push:\n", "lambeu :push\n", "Push:\n", "snake_case_name:\n"] {
            assert!(run(Rule::Naming, text).is_empty(), "{text:?} should not be flagged");
        }
    }

    #[test]
    fn test_naming_flags_camel_case_once() {
        let issues = run(Rule::Naming, "pushValue:\n");
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.kind, IssueKind::CamelCase);
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.message, "pushValue: Has camel case");
        let related = issue.related.as_ref().expect("suggestion");
        assert_eq!(related.message, "Write it as push_value:");
        assert_eq!(related.span, issue.span);

        let issues = run(Rule::Naming, "lambeu :PushValue\n");
        assert_eq!(messages(&issues), vec![":PushValue Has camel case"]);
        assert_eq!(
            issues[0].span,
            Span::new(Position::new(0, 7), Position::new(0, 17))
        );
        assert_eq!(
            issues[0].related.as_ref().map(|r| r.message.as_str()),
            Some("Write it as :push_value")
        );
    }

    #[test]
    fn test_naming_only_inspects_alias_tokens() {
        // Without a marker the word is not an alias, so it is left alone.
        assert!(run(Rule::Naming, "comeu pushValue\n").is_empty());
        let issues = run(Rule::Naming, "comeu pushValue\nlambeu :pushValue\n");
        assert_eq!(messages(&issues), vec![":pushValue Has camel case"]);
    }

    #[test]
    fn test_flagged_span_at_finds_token_under_cursor() {
        let text = "robson robson robson\nlambeu :pushValue\n";
        let index = LineIndex::new(text);
        let span = naming::flagged_span_at(&index, Position::new(1, 10)).expect("flagged token");
        assert_eq!(index.slice(span), ":pushValue");
        assert!(naming::flagged_span_at(&index, Position::new(0, 2)).is_none());
    }

    #[test]
    fn test_missing_parameters_counts_given() {
        // `if lower` needs three parameters; only one is present.
        let text = "robson robson\ncomeu 1\n\ncomeu 2\n";
        let issues = run(Rule::Arity, text);
        assert_eq!(messages(&issues), vec!["Missing parameters for if lower, needs 3 given 1"]);
        assert_eq!(issues[0].kind, IssueKind::MissingParameters);
        assert_eq!(
            issues[0].span,
            Span::new(Position::new(2, 0), Position::new(3, 0))
        );
    }

    #[test]
    fn test_missing_parameters_at_end_of_text() {
        let issues = run(Rule::Arity, "robson robson robson\n");
        assert_eq!(messages(&issues), vec!["Missing parameters for push, needs 1 given 0"]);
        // Clamped to the end of the text.
        assert_eq!(
            issues[0].span,
            Span::new(Position::new(1, 0), Position::new(1, 0))
        );

        let issues = run(Rule::Arity, "robson robson robson");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].span.start, Position::new(0, 20));
    }

    #[test]
    fn test_comment_only_parameter_counts_as_blank() {
        let issues = run(Rule::Arity, "robson robson robson ; push\n   ; just a note\n");
        assert_eq!(messages(&issues), vec!["Missing parameters for push, needs 1 given 0"]);
    }

    #[test]
    fn test_satisfied_instructions_pass() {
        let text = "robson\ncomeu 1\nfudeu 2\nchupou 0\nrobson robson robson robson robson robson robson\n";
        assert!(run(Rule::Arity, text).is_empty());
    }

    #[test]
    fn test_invalid_and_unknown_instructions() {
        let issues = run(Rule::Arity, "robson robsom ; typo\n");
        assert_eq!(messages(&issues), vec!["Invalid instruction robson robsom"]);
        assert_eq!(issues[0].kind, IssueKind::InvalidInstruction);
        assert_eq!(
            issues[0].span,
            Span::new(Position::new(0, 0), Position::new(0, 13))
        );

        let thirteen = vec!["robson"; 13].join(" ");
        let issues = run(Rule::Arity, &thirteen);
        assert_eq!(messages(&issues), vec!["Unknown opcode 13"]);

        // The same instruction is known to the extended set.
        let issues = run_with(
            Rule::Arity,
            &format!("{thirteen}\ncomeu 0\n"),
            InstructionSet::Extended.table(),
            1000,
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn test_literal_formats() {
        let ok = "comeu 42\ncomeu f1.5\ncomeu i-3\nfudeu 7\npenetrou 0\nchupou 1\nlambeu :done\n";
        assert!(run(Rule::Literals, ok).is_empty());

        let bad = "comeu x\n  fudeu a\npenetrou -1\nchupou\nlambeu done\ncomeu ; nothing\n";
        let issues = run(Rule::Literals, bad);
        assert_eq!(
            messages(&issues),
            vec![
                "Invalid number for comeu",
                "Invalid number for fudeu",
                "Invalid number for penetrou",
                "Invalid number for chupou",
                "Invalid alias for lambeu",
                "Invalid number for comeu",
            ]
        );
        assert!(issues.iter().all(|i| i.kind == IssueKind::InvalidLiteral));
        // Span covers the code, not the indentation.
        assert_eq!(
            issues[1].span,
            Span::new(Position::new(1, 2), Position::new(1, 9))
        );
    }

    #[test]
    fn test_literals_ignore_longer_words() {
        assert!(run(Rule::Literals, "comeuzinho x\nlambeus y\n").is_empty());
    }

    #[test]
    fn test_unknown_keywords() {
        let text = "robson\ncomeu 1\n\n; comment\nloop: robson\n   lambeu :loop\nprint 1\n  goto x\n";
        let issues = run(Rule::Keywords, text);
        assert_eq!(messages(&issues), vec!["Unknown keyword print 1", "Unknown keyword   goto x"]);
        assert_eq!(issues[0].kind, IssueKind::UnknownKeyword);
        assert_eq!(
            issues[0].span,
            Span::new(Position::new(6, 0), Position::new(6, 7))
        );
    }

    #[test]
    fn test_unknown_keywords_continue_past_blank_lines() {
        let issues = run(Rule::Keywords, "\n\nfoo\n   \nbar\n");
        assert_eq!(messages(&issues), vec!["Unknown keyword foo", "Unknown keyword bar"]);
    }

    #[test]
    fn test_passes_stop_at_budget() {
        let issues = run_with(Rule::Keywords, "a\nb\nc\nd\n", InstructionSet::Standard.table(), 2);
        assert_eq!(messages(&issues), vec!["Unknown keyword a", "Unknown keyword b"]);

        let issues = run_with(
            Rule::Naming,
            "fooBar:\nbarBaz:\n",
            InstructionSet::Standard.table(),
            0,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_rule_names() {
        let names: Vec<_> = [Rule::Naming, Rule::Literals, Rule::Arity, Rule::Keywords]
            .into_iter()
            .map(Rule::name)
            .collect();
        assert_eq!(names, vec!["naming", "literals", "arity", "keywords"]);
    }
}
