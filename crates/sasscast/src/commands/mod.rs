//! CLI subcommand implementations

pub mod assemble;
pub mod compile;
