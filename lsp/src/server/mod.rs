mod actions;
mod analysis;
mod cli;
mod config;
mod convert;
mod entry;
mod handlers;
mod inlay_hints;
mod state;
mod text;

pub use actions::{rename_actions, rename_arguments, rename_workspace_edit};
pub use convert::{from_lsp_position, from_lsp_range, issue_to_diagnostic, to_lsp_position, to_lsp_range};
pub use entry::run;
pub use inlay_hints::compute_inlay_hints;
pub use state::{completion_items, resolve_completion};

/// Command that rewrites a camelCase alias in snake_case.
pub const RENAME_COMMAND: &str = "re.name";

/// Client configuration section holding the analyzer settings.
pub const CONFIG_SECTION: &str = "RobsonAnalyzer";
