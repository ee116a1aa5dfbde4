//! Command-line surface of the cheat sheet generator.

pub mod common;
pub mod generate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
