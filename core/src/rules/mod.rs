//! Line and token rules that run next to the symbol table builder.
//!
//! Every pass reads the same [`PassContext`] and reports into one shared
//! [`IssueSink`]; a pass stops scanning as soon as the sink's budget is spent.

use crate::issue::IssueSink;
use crate::opcode::OpcodeTable;
use crate::text::LineIndex;

pub mod arity;
pub mod keywords;
pub mod literals;
pub mod naming;

#[cfg(test)]
mod rules_test;

/// Read-only inputs shared by the rule passes of one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a, 't> {
    pub index: &'a LineIndex<'t>,
    pub table: &'a OpcodeTable,
}

impl<'a, 't> PassContext<'a, 't> {
    pub fn new(index: &'a LineIndex<'t>, table: &'a OpcodeTable) -> Self {
        Self { index, table }
    }

    pub fn text(&self) -> &'t str {
        self.index.text()
    }
}

/// One rule pass, in the order the analyzer runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Naming,
    Literals,
    Arity,
    Keywords,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Naming => "naming",
            Rule::Literals => "literals",
            Rule::Arity => "arity",
            Rule::Keywords => "keywords",
        }
    }

    pub fn run(self, cx: &PassContext<'_, '_>, sink: &mut IssueSink) {
        match self {
            Rule::Naming => naming::check(cx, sink),
            Rule::Literals => literals::check(cx, sink),
            Rule::Arity => arity::check(cx, sink),
            Rule::Keywords => keywords::check(cx, sink),
        }
    }
}
