//! Subcommand implementations.

pub mod check;
pub mod codemod;
pub mod guard;
pub mod init;
pub mod list_rules;
pub mod output;
