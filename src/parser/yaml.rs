//! YAML cheat sheet parsing and validation.
//!
//! # File Format
//!
//! ```yaml
//! title: "Vim"
//! config:
//!   columns: 4
//!   paper_size: a4
//! sections:
//!   Movement:
//!     h: Left
//!     l: Right
//!   Editing:
//!     x: Delete character
//!     Insert mode:
//!       i: Insert before cursor
//!       a: Append after cursor
//! ```
//!
//! A scalar value under a section is a hotkey; a mapping value is a
//! subsection of hotkeys. Hotkeys directly under a section are printed before
//! its subsections.

use crate::constants::APP_BINARY_NAME;
use crate::layout::PageGeometry;
use crate::models::{
    ConfigLayers, Document, Entry, LayoutConfig, LayoutOverrides, Section, SectionContent,
    Subsection,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_yml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// Top-level keys of a cheat sheet file.
const TOP_LEVEL_KEYS: [&str; 3] = ["title", "config", "sections"];

/// Problems found while reading a cheat sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that prevent building the document
    pub errors: Vec<String>,
    /// Suspicious but accepted input
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of inspecting a cheat sheet: the document if it is valid, plus every issue found.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Parsed document (present only when there are no errors)
    pub document: Option<Document>,
    /// Errors and warnings
    pub report: ValidationReport,
}

/// Parses and validates a cheat sheet, collecting every problem instead of stopping at the first.
pub fn inspect_document_str(content: &str, layers: &ConfigLayers) -> ParseOutcome {
    let mut report = ValidationReport::default();
    let document = read_root(content, layers, &mut report);

    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "cheat sheet inspected"
    );

    ParseOutcome {
        document: if report.is_valid() { document } else { None },
        report,
    }
}

/// Parses a cheat sheet from a string.
///
/// # Errors
///
/// Returns one error listing every validation problem.
pub fn parse_document_str(content: &str, layers: &ConfigLayers) -> Result<Document> {
    let outcome = inspect_document_str(content, layers);
    match outcome.document {
        Some(document) => Ok(document),
        None => anyhow::bail!(
            "Invalid cheat sheet:\n  - {}",
            outcome.report.errors.join("\n  - ")
        ),
    }
}

/// Reads a cheat sheet file into a string.
pub fn read_document_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!(
            "Cheat sheet file not found: {}\n\n\
             Please check the file path and try again.\n\
             For usage, run: {} --help",
            path.display(),
            APP_BINARY_NAME
        );
    }

    if !path.is_file() {
        anyhow::bail!(
            "Path is not a file: {}\n\n\
            Please provide a path to a YAML (.yaml) file.",
            path.display()
        );
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cheat sheet file: {}", path.display()))
}

/// Parses a cheat sheet file.
pub fn parse_document(path: &Path, layers: &ConfigLayers) -> Result<Document> {
    let content = read_document_file(path)?;
    parse_document_str(&content, layers)
        .with_context(|| format!("Failed to parse cheat sheet file: {}", path.display()))
}

/// Renders a scalar as text; `None` for null, sequences and mappings.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Renders a mapping key, rejecting blank and non-scalar keys.
fn key_text(value: &Value) -> Option<String> {
    scalar_text(value).filter(|s| !s.trim().is_empty())
}

fn read_root(
    content: &str,
    layers: &ConfigLayers,
    report: &mut ValidationReport,
) -> Option<Document> {
    let root: Value = match serde_yml::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            report.errors.push(format!("Invalid YAML: {e}"));
            return None;
        }
    };

    let Value::Mapping(root) = root else {
        report
            .errors
            .push("Top level must be a mapping with title and sections".to_string());
        return None;
    };

    for key in root.keys() {
        let known = key
            .as_str()
            .is_some_and(|k| TOP_LEVEL_KEYS.contains(&k));
        if !known {
            report.warnings.push(format!(
                "Unknown top-level key ignored: {}",
                scalar_text(key).unwrap_or_else(|| "<non-scalar>".to_string())
            ));
        }
    }

    let title = read_title(&root, report);
    let layout = read_config(&root, layers, report);
    let sections = read_sections(&root, report);

    Some(Document {
        title: title?,
        layout: layout?,
        sections,
    })
}

fn read_title(root: &Mapping, report: &mut ValidationReport) -> Option<String> {
    match root.get("title") {
        None | Some(Value::Null) => {
            report.errors.push("Missing required field: title".to_string());
            None
        }
        Some(value) => match scalar_text(value) {
            Some(title) if !title.trim().is_empty() => Some(title),
            _ => {
                report
                    .errors
                    .push("title must be a non-empty string".to_string());
                None
            }
        },
    }
}

fn read_config(
    root: &Mapping,
    layers: &ConfigLayers,
    report: &mut ValidationReport,
) -> Option<LayoutConfig> {
    let overrides = match root.get("config") {
        None | Some(Value::Null) => LayoutOverrides::default(),
        Some(Value::Mapping(mapping)) => {
            for key in mapping.keys() {
                let known = key
                    .as_str()
                    .is_some_and(|k| LayoutOverrides::KNOWN_KEYS.contains(&k));
                if !known {
                    report.warnings.push(format!(
                        "Unknown config option ignored: {}",
                        scalar_text(key).unwrap_or_else(|| "<non-scalar>".to_string())
                    ));
                }
            }

            let recognised: Mapping = mapping
                .iter()
                .filter(|(k, _)| {
                    k.as_str()
                        .is_some_and(|k| LayoutOverrides::KNOWN_KEYS.contains(&k))
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();

            match serde_yml::from_value::<LayoutOverrides>(Value::Mapping(recognised)) {
                Ok(overrides) => overrides,
                Err(e) => {
                    report.errors.push(format!("Invalid config: {e}"));
                    return None;
                }
            }
        }
        Some(_) => {
            report.errors.push("config must be a mapping".to_string());
            return None;
        }
    };

    let layout = match layers.resolve(&overrides) {
        Ok(layout) => layout,
        Err(e) => {
            report.errors.push(format!("Invalid config: {e}"));
            return None;
        }
    };

    if let Err(e) = PageGeometry::from_config(&layout, true) {
        report.errors.push(format!("Invalid config: {e}"));
        return None;
    }

    Some(layout)
}

fn read_sections(root: &Mapping, report: &mut ValidationReport) -> Vec<Section> {
    let mapping = match root.get("sections") {
        None => {
            report
                .errors
                .push("Missing required field: sections".to_string());
            return Vec::new();
        }
        Some(Value::Null) => {
            report.warnings.push("No sections defined".to_string());
            return Vec::new();
        }
        Some(Value::Mapping(mapping)) => mapping,
        Some(_) => {
            report
                .errors
                .push("sections must be a mapping of section names".to_string());
            return Vec::new();
        }
    };

    if mapping.is_empty() {
        report.warnings.push("No sections defined".to_string());
    }

    let mut sections = Vec::new();
    for (name, body) in mapping {
        let Some(name) = key_text(name) else {
            report
                .errors
                .push("sections: section names must be non-empty strings".to_string());
            continue;
        };
        let path = format!("sections.{name}");

        let content = match body {
            Value::Null => SectionContent::Empty,
            Value::Mapping(body) => read_section_body(&path, body, report),
            _ => {
                report.errors.push(format!(
                    "{path}: must be a mapping of hotkeys or subsections"
                ));
                continue;
            }
        };

        if content == SectionContent::Empty {
            report.warnings.push(format!("{path}: section is empty"));
        }

        match Section::new(name, content) {
            Ok(section) => sections.push(section),
            Err(e) => report.errors.push(format!("{path}: {e}")),
        }
    }

    sections
}

fn read_section_body(path: &str, body: &Mapping, report: &mut ValidationReport) -> SectionContent {
    let mut entries = Vec::new();
    let mut subsections = Vec::new();

    for (key, value) in body {
        let Some(key) = key_text(key) else {
            report
                .errors
                .push(format!("{path}: keys must be non-empty strings"));
            continue;
        };
        let item_path = format!("{path}.{key}");

        match value {
            Value::Mapping(inner) => {
                let sub_entries = read_entries(&item_path, inner, report);
                if sub_entries.is_empty() {
                    report
                        .errors
                        .push(format!("{item_path}: subsection has no hotkeys"));
                    continue;
                }
                match Subsection::new(key, sub_entries) {
                    Ok(subsection) => subsections.push(subsection),
                    Err(e) => report.errors.push(format!("{item_path}: {e}")),
                }
            }
            other => {
                if let Some(entry) = read_entry(&item_path, key, other, report) {
                    entries.push(entry);
                }
            }
        }
    }

    SectionContent::from_parts(entries, subsections)
}

fn read_entries(path: &str, mapping: &Mapping, report: &mut ValidationReport) -> Vec<Entry> {
    let mut entries = Vec::new();

    for (key, value) in mapping {
        let Some(key) = key_text(key) else {
            report
                .errors
                .push(format!("{path}: keys must be non-empty strings"));
            continue;
        };
        let item_path = format!("{path}.{key}");

        if matches!(value, Value::Mapping(_)) {
            report.errors.push(format!(
                "{item_path}: subsections cannot be nested (expected a description)"
            ));
            continue;
        }

        if let Some(entry) = read_entry(&item_path, key, value, report) {
            entries.push(entry);
        }
    }

    entries
}

fn read_entry(
    path: &str,
    key: String,
    value: &Value,
    report: &mut ValidationReport,
) -> Option<Entry> {
    let Some(description) = scalar_text(value) else {
        report
            .errors
            .push(format!("{path}: description must be a non-empty string"));
        return None;
    };

    match Entry::new(key, description) {
        Ok(entry) => Some(entry),
        Err(e) => {
            report.errors.push(format!("{path}: {e}"));
            None
        }
    }
}
