use std::path::{Component, Path};

use anyhow::{bail, Context};
use robson_core::{Analyzer, Settings};

const USAGE: &str = "Usage: robson-lsp --analyze [--errors-only] <relative-file-path>
  --analyze <file>     : Full analysis with JSON output
  --errors-only        : Show only errors in simple format";

/// Handles `--analyze`; `None` means start the server.
pub(crate) fn try_cli_analyze() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    analyze_args(&args)
}

pub(crate) fn analyze_args(args: &[String]) -> anyhow::Result<Option<String>> {
    if !args.iter().any(|a| a == "--analyze") {
        return Ok(None);
    }
    let Some(path) = args.iter().find(|a| !a.starts_with("--")) else {
        bail!("{USAGE}");
    };
    let errors_only = args.iter().any(|a| a == "--errors-only");

    let content = read_file_content(path)?;
    let analysis = Analyzer::new().analyze(&content, &Settings::default());

    if !errors_only {
        return Ok(Some(serde_json::to_string_pretty(&analysis)?));
    }
    let errors: Vec<String> = analysis
        .errors()
        .map(|issue| format!("Line {}: {}", issue.span.start, issue.message))
        .collect();
    if errors.is_empty() {
        Ok(Some("No errors found".to_string()))
    } else {
        Ok(Some(errors.join("\n")))
    }
}

/// Relative paths only, without parent segments or control characters.
pub(crate) fn is_safe_path(path: &str) -> bool {
    let candidate = Path::new(path);
    !path.is_empty()
        && !candidate.is_absolute()
        && !candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        && !path.chars().any(|c| c.is_control())
        && path.as_bytes().get(1) != Some(&b':')
}

fn read_file_content(path: &str) -> anyhow::Result<String> {
    if !is_safe_path(path) {
        bail!("Unsafe file path: {path}");
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{path}'"))
}
