//! CLI subcommands.

pub mod benchmark;
pub mod migrate;
