use std::fmt;

use crate::opcode::KEYWORD;

/// Built-in keywords of the language: the instruction keyword and the
/// parameter mnemonics that introduce argument lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// Raw number literal.
    Comeu,
    /// Value stored at an address.
    Fudeu,
    /// Value at the address stored at an address.
    Penetrou,
    /// Value on the stack at a given depth.
    Chupou,
    /// Line of an alias.
    Lambeu,
    /// The instruction keyword itself.
    Robson,
}

/// What the argument after a parameter mnemonic must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Decimal integer, or a literal tagged `f` (float) or `i` (signed integer).
    NumericLiteral,
    /// Plain non-negative integer.
    Unsigned,
    /// An alias usage, `:name`.
    Alias,
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 6] = [
        Mnemonic::Comeu,
        Mnemonic::Fudeu,
        Mnemonic::Penetrou,
        Mnemonic::Chupou,
        Mnemonic::Lambeu,
        Mnemonic::Robson,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Mnemonic::Comeu => "comeu",
            Mnemonic::Fudeu => "fudeu",
            Mnemonic::Penetrou => "penetrou",
            Mnemonic::Chupou => "chupou",
            Mnemonic::Lambeu => "lambeu",
            Mnemonic::Robson => KEYWORD,
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.keyword() == word)
    }

    /// Opaque tag carried on completion items and resolved back with [`Mnemonic::from_tag`].
    pub fn tag(self) -> &'static str {
        self.keyword()
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::from_keyword(tag)
    }

    pub fn detail(self) -> &'static str {
        self.keyword()
    }

    pub fn documentation(self) -> &'static str {
        match self {
            Mnemonic::Comeu => "returns the raw number",
            Mnemonic::Fudeu => "returns the value stored at the given address",
            Mnemonic::Penetrou => "returns the value at the address that the given address points to",
            Mnemonic::Chupou => "returns the stack value at the given depth",
            Mnemonic::Lambeu => "returns the line of the alias",
            Mnemonic::Robson => "instruction keyword; repeat it to select the opcode",
        }
    }

    /// Argument grammar for parameter mnemonics; `None` for the instruction keyword.
    pub fn argument(self) -> Option<ArgumentKind> {
        match self {
            Mnemonic::Comeu => Some(ArgumentKind::NumericLiteral),
            Mnemonic::Fudeu | Mnemonic::Penetrou | Mnemonic::Chupou => Some(ArgumentKind::Unsigned),
            Mnemonic::Lambeu => Some(ArgumentKind::Alias),
            Mnemonic::Robson => None,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
