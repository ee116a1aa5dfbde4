//! Cheat sheet content: sections, subsections and key/description entries.

use crate::models::layout_config::LayoutConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A single hotkey → description pair.
///
/// # Validation
///
/// - key and description must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Key combination as printed (e.g., "Ctrl+Shift+P")
    pub key: String,
    /// What the key combination does
    pub description: String,
}

impl Entry {
    /// Creates a new entry with validation.
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let description = description.into();

        if key.trim().is_empty() {
            anyhow::bail!("Entry key cannot be empty");
        }
        if description.trim().is_empty() {
            anyhow::bail!("Entry '{}' has an empty description", key);
        }

        Ok(Self { key, description })
    }
}

/// A named group of entries inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Subsection name (non-empty)
    pub name: String,
    /// Entries in print order
    pub entries: Vec<Entry>,
}

impl Subsection {
    /// Creates a new subsection with validation.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("Subsection name cannot be empty");
        }
        Ok(Self { name, entries })
    }
}

/// Shape of a section's body, resolved once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionContent {
    /// Header only
    Empty,
    /// Entries directly under the section header
    DirectEntries(Vec<Entry>),
    /// Only named subsections
    Grouped(Vec<Subsection>),
    /// Direct entries first, then subsections
    Mixed(Vec<Entry>, Vec<Subsection>),
}

impl SectionContent {
    /// Builds the variant matching the given parts.
    pub fn from_parts(entries: Vec<Entry>, subsections: Vec<Subsection>) -> Self {
        match (entries.is_empty(), subsections.is_empty()) {
            (true, true) => Self::Empty,
            (false, true) => Self::DirectEntries(entries),
            (true, false) => Self::Grouped(subsections),
            (false, false) => Self::Mixed(entries, subsections),
        }
    }

    /// Entries placed directly under the section header.
    pub fn direct_entries(&self) -> &[Entry] {
        match self {
            Self::DirectEntries(entries) | Self::Mixed(entries, _) => entries,
            Self::Empty | Self::Grouped(_) => &[],
        }
    }

    /// Subsections, in print order.
    pub fn subsections(&self) -> &[Subsection] {
        match self {
            Self::Grouped(subsections) | Self::Mixed(_, subsections) => subsections,
            Self::Empty | Self::DirectEntries(_) => &[],
        }
    }
}

/// A named top-level group of the cheat sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section name (non-empty)
    pub name: String,
    /// Section body
    pub content: SectionContent,
}

impl Section {
    /// Creates a new section with validation.
    pub fn new(name: impl Into<String>, content: SectionContent) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("Section name cannot be empty");
        }
        Ok(Self { name, content })
    }

    /// Number of entries in the section, including those in subsections.
    pub fn entry_count(&self) -> usize {
        self.content.direct_entries().len()
            + self
                .content
                .subsections()
                .iter()
                .map(|sub| sub.entries.len())
                .sum::<usize>()
    }
}

/// Root of the content model: title, resolved layout and sections.
///
/// Constructed once per run and never mutated by layout or rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Title printed at the top of the first page
    pub title: String,
    /// Fully resolved layout configuration
    pub layout: LayoutConfig,
    /// Sections in print order
    pub sections: Vec<Section>,
}

impl Document {
    /// Creates a document, validating its layout configuration.
    pub fn new(
        title: impl Into<String>,
        layout: LayoutConfig,
        sections: Vec<Section>,
    ) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            title: title.into(),
            layout,
            sections,
        })
    }

    /// Total number of hotkeys across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(Section::entry_count).sum()
    }
}
