//! Parsing for cheat sheet source files.
//!
//! Cheat sheets are written in YAML; see [`yaml`] for the format.

pub mod yaml;

// Re-export commonly used functions
pub use yaml::{
    inspect_document_str, parse_document, parse_document_str, read_document_file, ParseOutcome,
    ValidationReport,
};
