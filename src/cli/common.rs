//! Shared types for the command-line surface: errors, exit codes and JSON responses.

use serde::Serialize;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input failed validation
    ValidationError = 1,
    /// File could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code handed to the operating system.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Error returned by a command, carrying the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code
    pub code: ExitCode,
    /// Message printed after `Error:`
    pub message: String,
}

impl CliError {
    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// JSON output of `--validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// No errors were found
    pub valid: bool,
    /// Validation errors
    pub errors: Vec<String>,
    /// Warnings
    pub warnings: Vec<String>,
}

/// JSON output of `--estimate-pages --json`.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    /// Number of hotkeys in the document
    pub hotkeys: usize,
    /// Pages the cheat sheet will occupy
    pub pages: usize,
}

/// JSON output of a generation run with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Path of the written PDF
    pub output: String,
    /// Document title
    pub title: String,
    /// Number of hotkeys in the document
    pub hotkeys: usize,
    /// Pages written
    pub pages: usize,
}

/// Prints a response as pretty JSON on stdout.
pub fn print_json<T: Serialize>(response: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(response)
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
    );
    Ok(())
}
