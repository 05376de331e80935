use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use robson_core::rules::naming::flagged_span_at;
use robson_core::{Analysis, Analyzer, InstructionSet, Issue, LineIndex, OpcodeTable, Position, Settings, rename_edit};
use serde::Serialize;
use tracing::{debug, info};


const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "robson", author, version, about = "Static checks for Robson programs", long_about = None)]
struct CliArgs {
    /// Settings file (TOML) with `maxNumberOfProblems`, `instructionSet` and `opcodeTable`
    #[arg(long, global = true, value_name = "FILE", value_parser = parse_sanitized_path)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InstructionSetArg {
    Standard,
    Extended,
}

impl From<InstructionSetArg> for InstructionSet {
    fn from(value: InstructionSetArg) -> Self {
        match value {
            InstructionSetArg::Standard => InstructionSet::Standard,
            InstructionSetArg::Extended => InstructionSet::Extended,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check files and print their issues. Exits with 1 when any error is found.
    Check {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Stop reporting after this many issues per file
        #[arg(long, value_name = "N")]
        max_problems: Option<usize>,

        #[arg(long, value_enum)]
        instruction_set: Option<InstructionSetArg>,

        /// Opcode table (TOML) replacing the instruction set
        #[arg(long, value_name = "FILE.toml", value_parser = parse_sanitized_path)]
        table: Option<PathBuf>,

        #[arg(value_name = "FILE", required = true, value_parser = parse_sanitized_path)]
        files: Vec<PathBuf>,
    },
    /// Print the alias declarations and usages of a file as JSON.
    Symbols {
        #[arg(value_name = "FILE", value_parser = parse_sanitized_path)]
        file: PathBuf,
    },
    /// Rewrite the camelCase alias at LINE:COLUMN (1-based) in snake_case.
    Rename {
        #[arg(value_name = "FILE", value_parser = parse_sanitized_path)]
        file: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
        /// Column in UTF-16 code units
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        column: u32,
        /// Rewrite the file in place instead of printing it
        #[arg(long)]
        write: bool,
    },
}

/// Command-line overrides applied on top of the settings file.
#[derive(Debug, Default)]
struct Overrides {
    max_problems: Option<usize>,
    instruction_set: Option<InstructionSet>,
    table: Option<PathBuf>,
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        bail!("Parent directory components ('..') are not allowed in file paths.");
    }
    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = std::env::var("ROBSON_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt().with_writer(std::io::stderr).with_env_filter(filter).try_init();
}

fn resolve_settings(config: Option<&Path>, overrides: Overrides) -> anyhow::Result<Settings> {
    let mut settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(max) = overrides.max_problems {
        settings.max_number_of_problems = max;
    }
    if let Some(set) = overrides.instruction_set {
        settings.instruction_set = set;
        settings.opcode_table = None;
    }
    if let Some(path) = overrides.table {
        settings.opcode_table = Some(OpcodeTable::load(path)?);
    }
    Ok(settings)
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: String,
    issues: &'a [Issue],
}

fn format_issue(path: &Path, issue: &Issue) -> String {
    format!(
        "{}:{}: {}: {}",
        path.display(),
        issue.span.start,
        issue.severity,
        issue.message
    )
}

/// Analyzes every file and prints the report. Returns whether any error was found.
fn check(files: &[PathBuf], settings: &Settings, format: OutputFormat) -> anyhow::Result<bool> {
    let analyzer = Analyzer::new();
    let mut analyses: Vec<(&PathBuf, Analysis)> = Vec::with_capacity(files.len());
    for path in files {
        let source = read_source(path)?;
        let analysis = analyzer.analyze(&source, settings);
        debug!(path = %path.display(), issues = analysis.issues.len(), "checked file");
        analyses.push((path, analysis));
    }

    match format {
        OutputFormat::Text => {
            for (path, analysis) in &analyses {
                for issue in &analysis.issues {
                    println!("{}", format_issue(path, issue));
                }
            }
            let errors: usize = analyses.iter().map(|(_, a)| a.errors().count()).sum();
            let warnings: usize = analyses.iter().map(|(_, a)| a.warnings().count()).sum();
            eprintln!(
                "{} file(s) checked: {} error(s), {} warning(s)",
                analyses.len(),
                errors,
                warnings
            );
        }
        OutputFormat::Json => {
            let reports: Vec<FileReport<'_>> = analyses
                .iter()
                .map(|(path, analysis)| FileReport {
                    path: path.display().to_string(),
                    issues: &analysis.issues,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(analyses.iter().any(|(_, a)| a.has_errors()))
}

/// Source text with the camelCase alias at `position` renamed, plus the old
/// and new spellings.
fn rename_at(source: &str, position: Position) -> anyhow::Result<(String, String, String)> {
    let index = LineIndex::new(source);
    let Some(span) = flagged_span_at(&index, position) else {
        bail!("no camel case alias at {position}");
    };
    let Some(edit) = rename_edit(source, span) else {
        bail!("no camel case alias at {position}");
    };
    let start = index.offset(edit.span.start);
    let end = index.offset(edit.span.end);
    let old = source[start..end].to_string();

    let mut renamed = String::with_capacity(source.len() + 4);
    renamed.push_str(&source[..start]);
    renamed.push_str(&edit.new_text);
    renamed.push_str(&source[end..]);
    Ok((renamed, old, edit.new_text))
}

fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        Commands::Check {
            format,
            max_problems,
            instruction_set,
            table,
            files,
        } => {
            let overrides = Overrides {
                max_problems,
                instruction_set: instruction_set.map(Into::into),
                table,
            };
            let settings = resolve_settings(args.config.as_deref(), overrides)?;
            let failed = check(&files, &settings, format)?;
            Ok(if failed { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
        Commands::Symbols { file } => {
            let settings = resolve_settings(args.config.as_deref(), Overrides::default())?;
            let source = read_source(&file)?;
            let analysis = Analyzer::new().analyze(&source, &settings);
            println!("{}", serde_json::to_string_pretty(&analysis.symbols)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Rename {
            file,
            line,
            column,
            write,
        } => {
            let source = read_source(&file)?;
            let position = Position::new(line - 1, column - 1);
            let (renamed, old, new) = rename_at(&source, position)?;
            if write {
                std::fs::write(&file, &renamed)
                    .with_context(|| format!("Failed to write file '{}'", file.display()))?;
                info!(path = %file.display(), "renamed {old} to {new}");
                eprintln!("{}: renamed {} to {}", file.display(), old, new);
            } else {
                print!("{renamed}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
