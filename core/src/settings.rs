use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::opcode::{InstructionSet, OpcodeTable};

pub const DEFAULT_MAX_PROBLEMS: usize = 1000;

/// Per-document analyzer settings.
///
/// Deserializes from the editor's `RobsonAnalyzer` configuration section or
/// from a TOML file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_number_of_problems: usize,
    pub instruction_set: InstructionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opcode_table: Option<OpcodeTable>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_problems: DEFAULT_MAX_PROBLEMS,
            instruction_set: InstructionSet::default(),
            opcode_table: None,
        }
    }
}

impl Settings {
    /// The explicit table when one is configured, else the instruction set's table.
    pub fn opcode_table(&self) -> &OpcodeTable {
        self.opcode_table
            .as_ref()
            .unwrap_or_else(|| self.instruction_set.table())
    }

    pub fn from_json(value: serde_json::Value) -> anyhow::Result<Self> {
        serde_json::from_value(value).context("invalid analyzer settings")
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("invalid analyzer settings")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings '{}'", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("in '{}'", path.display()))
    }
}
