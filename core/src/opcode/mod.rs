use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::text::strip_comment;


/// The keyword whose run length selects an instruction.
pub const KEYWORD: &str = "robson";

/// Classifies an instruction line by counting its `robson` tokens.
///
/// Returns `Some(k)` when the comment-free line consists of exactly `k`
/// keywords (`Some(0)` for a blank line) and `None` as soon as any other
/// token shows up.
pub fn classify(line: &str) -> Option<u32> {
    let mut opcode = 0;
    for token in strip_comment(line).split_whitespace() {
        if token != KEYWORD {
            return None;
        }
        opcode += 1;
    }
    Some(opcode)
}

/// True when the line's first non-blank text begins with the instruction keyword.
pub fn is_instruction_line(line: &str) -> bool {
    line.trim_start().starts_with(KEYWORD)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodeEntry {
    pub opcode: u32,
    pub name: String,
    pub params: usize,
}

impl OpcodeEntry {
    pub fn new(opcode: u32, name: impl Into<String>, params: usize) -> Self {
        Self {
            opcode,
            name: name.into(),
            params,
        }
    }
}

/// Secondary names for an opcode whose first argument picks a sub-operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubOperations {
    pub opcode: u32,
    pub names: Vec<String>,
}

/// Ordered opcode → (name, parameter count) mapping.
///
/// Loaded from configuration when a project uses a different instruction set;
/// [`InstructionSet`] provides the two built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOpcodeTable")]
pub struct OpcodeTable {
    opcodes: Vec<OpcodeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_operations: Vec<SubOperations>,
}

// Deserialization goes through `from_entries` so lookups can rely on sorted,
// unique opcodes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpcodeTable {
    opcodes: Vec<OpcodeEntry>,
    #[serde(default)]
    sub_operations: Vec<SubOperations>,
}

impl TryFrom<RawOpcodeTable> for OpcodeTable {
    type Error = anyhow::Error;

    fn try_from(raw: RawOpcodeTable) -> Result<Self, Self::Error> {
        Self::from_entries(raw.opcodes, raw.sub_operations)
    }
}

const STANDARD: [(&str, usize); 12] = [
    ("operation", 3),
    ("if lower", 3),
    ("push", 1),
    ("if equal", 3),
    ("vstack", 1),
    ("input", 3),
    ("print", 0),
    ("pnumber", 0),
    ("jump", 1),
    ("set", 1),
    ("pop", 0),
    ("load", 1),
];

// Placeholder names for 13..=15 and for the sub-operation lists below. Projects
// that use a different extended set replace them with an `opcodeTable`.
const EXTENDED: [(&str, usize); 3] = [("timer", 1), ("random", 1), ("terminal", 1)];

const OPERATIONS: [&str; 5] = ["add", "sub", "mul", "div", "mod"];
const TIMER_OPERATIONS: [&str; 2] = ["start", "elapsed"];
const TERMINAL_OPERATIONS: [&str; 6] = [
    "clear",
    "raw mode on",
    "raw mode off",
    "hide cursor",
    "show cursor",
    "move cursor",
];

static STANDARD_TABLE: Lazy<OpcodeTable> = Lazy::new(|| OpcodeTable {
    opcodes: numbered(&STANDARD, 1),
    sub_operations: Vec::new(),
});

static EXTENDED_TABLE: Lazy<OpcodeTable> = Lazy::new(|| {
    let mut opcodes = numbered(&STANDARD, 1);
    opcodes.extend(numbered(&EXTENDED, STANDARD.len() as u32 + 1));
    OpcodeTable {
        opcodes,
        sub_operations: vec![
            sub_operations(1, &OPERATIONS),
            sub_operations(13, &TIMER_OPERATIONS),
            sub_operations(15, &TERMINAL_OPERATIONS),
        ],
    }
});

fn numbered(rows: &[(&str, usize)], first: u32) -> Vec<OpcodeEntry> {
    rows.iter()
        .zip(first..)
        .map(|((name, params), opcode)| OpcodeEntry::new(opcode, *name, *params))
        .collect()
}

fn sub_operations(opcode: u32, names: &[&str]) -> SubOperations {
    SubOperations {
        opcode,
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

impl OpcodeTable {
    /// Builds a table from explicit entries, rejecting opcode `0` and duplicates.
    pub fn from_entries(mut opcodes: Vec<OpcodeEntry>, sub_operations: Vec<SubOperations>) -> anyhow::Result<Self> {
        opcodes.sort_by_key(|e| e.opcode);
        let mut seen = BTreeSet::new();
        for entry in &opcodes {
            if entry.opcode == 0 {
                bail!("opcode 0 is reserved for blank lines");
            }
            if !seen.insert(entry.opcode) {
                bail!("opcode {} is defined more than once", entry.opcode);
            }
        }
        for sub in &sub_operations {
            if !seen.contains(&sub.opcode) {
                bail!("sub-operations given for unknown opcode {}", sub.opcode);
            }
        }
        Ok(Self {
            opcodes,
            sub_operations,
        })
    }

    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("invalid opcode table")
    }

    pub fn from_json(value: serde_json::Value) -> anyhow::Result<Self> {
        serde_json::from_value(value).context("invalid opcode table")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read opcode table '{}'", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in '{}'", path.display()))
    }

    pub fn entries(&self) -> &[OpcodeEntry] {
        &self.opcodes
    }

    pub fn get(&self, opcode: u32) -> Option<&OpcodeEntry> {
        self.opcodes
            .binary_search_by_key(&opcode, |e| e.opcode)
            .ok()
            .map(|i| &self.opcodes[i])
    }

    pub fn max_opcode(&self) -> u32 {
        self.opcodes.last().map_or(0, |e| e.opcode)
    }

    pub fn sub_operation(&self, opcode: u32, index: usize) -> Option<&str> {
        self.sub_operations
            .iter()
            .find(|s| s.opcode == opcode)
            .and_then(|s| s.names.get(index))
            .map(String::as_str)
    }

    pub fn has_sub_operations(&self, opcode: u32) -> bool {
        self.sub_operations.iter().any(|s| s.opcode == opcode)
    }

    /// Display name of `opcode`, refined by its sub-operation when one is known.
    pub fn display_name(&self, opcode: u32, sub_operation: Option<usize>) -> Option<String> {
        let entry = self.get(opcode)?;
        match sub_operation.and_then(|i| self.sub_operation(opcode, i)) {
            Some(sub) => Some(format!("{} ({})", entry.name, sub)),
            None => Some(entry.name.clone()),
        }
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        STANDARD_TABLE.clone()
    }
}

/// Built-in instruction sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionSet {
    /// Opcodes 1–12.
    #[default]
    Standard,
    /// Opcodes 1–15 with sub-operation names for opcodes 1, 13 and 15.
    Extended,
}

impl InstructionSet {
    pub fn table(self) -> &'static OpcodeTable {
        match self {
            InstructionSet::Standard => Lazy::force(&STANDARD_TABLE),
            InstructionSet::Extended => Lazy::force(&EXTENDED_TABLE),
        }
    }
}
