//! Subcommand implementations.

pub mod check;
pub mod classify;
pub mod init;
pub mod output;
pub mod show_policy;
