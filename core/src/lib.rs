//! Source analysis for the Robson instruction language.
//!
//! The entry point is [`Analyzer::analyze`], which scans one document snapshot
//! and returns its alias [`SymbolTable`] together with the [`Issue`]s found by
//! every rule pass.

pub mod analyzer;
pub mod hints;
pub mod issue;
pub mod mnemonic;
pub mod opcode;
pub mod rename;
pub mod rules;
pub mod scan;
pub mod settings;
pub mod symbols;
pub mod text;

pub use analyzer::{Analysis, AnalysisStore, Analyzer};
pub use issue::{Issue, IssueBudget, IssueKind, IssueSink, RelatedNote, Severity};
pub use mnemonic::Mnemonic;
pub use opcode::{InstructionSet, OpcodeEntry, OpcodeTable, classify};
pub use rename::{RenameEdit, rename_edit, to_canonical};
pub use settings::Settings;
pub use symbols::{AliasRecord, AliasUsage, SymbolTable};
pub use text::{LineIndex, Position, Span, offset_to_position, position_to_offset, strip_comment};

/// Marker that ends an alias declaration (`name:`) and starts a usage (`:name`).
pub const DECLARATION_MARKER: char = ':';

/// Everything after this character on a line is a comment.
pub const COMMENT_MARKER: char = ';';
