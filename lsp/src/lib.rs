//! Language server for Robson programs.
//!
//! The server keeps one rope per open document, re-runs the analyzer from
//! `robson-core` on every change and publishes the resulting issues.

mod server;

#[cfg(test)]
mod inlay_hint_test;

pub use server::{
    completion_items, compute_inlay_hints, from_lsp_position, from_lsp_range, issue_to_diagnostic,
    rename_actions, rename_arguments, rename_workspace_edit, resolve_completion, run, to_lsp_position,
    to_lsp_range, CONFIG_SECTION, RENAME_COMMAND,
};
