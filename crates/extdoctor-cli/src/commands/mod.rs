//! Subcommand implementations.

pub mod completion;
pub mod diagnose;
pub mod manifest;
