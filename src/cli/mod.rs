//! Line-oriented shell over the ledger: the presentation side that owns every
//! confirmation prompt and all currency formatting.

pub mod commands;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
