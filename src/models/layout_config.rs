//! Layout configuration: paper, columns, typography and flow options.
//!
//! Configuration arrives in layers (built-in defaults, the user's config file,
//! the document's `config:` mapping, command-line flags). Each layer is a
//! [`LayoutOverrides`] with every field optional; [`ConfigLayers::resolve`]
//! folds them into a fully populated, validated [`LayoutConfig`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum PaperSize {
    /// US Letter, 612 × 792 pt
    #[default]
    Letter,
    /// ISO A4, 595 × 842 pt
    A4,
}

impl FromStr for PaperSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "a4" => Ok(Self::A4),
            other => anyhow::bail!("Invalid paper size '{}' (expected: letter, a4)", other),
        }
    }
}

impl TryFrom<String> for PaperSize {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PaperSize> for String {
    fn from(value: PaperSize) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter => write!(f, "letter"),
            Self::A4 => write!(f, "a4"),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    /// Height greater than width
    #[default]
    Portrait,
    /// Width and height swapped
    Landscape,
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => anyhow::bail!(
                "Invalid orientation '{}' (expected: portrait, landscape)",
                other
            ),
        }
    }
}

impl TryFrom<String> for Orientation {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Orientation> for String {
    fn from(value: Orientation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Fully resolved layout configuration.
///
/// # Validation
///
/// - `columns` >= 1
/// - `font_size`, `header_font_size`, `row_height` > 0
/// - `margin`, `section_spacing`, `subsection_spacing` >= 0
/// - every numeric value is finite
///
/// The margin-versus-page-size check lives in the geometry module since it
/// needs the resolved page dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Entry text size in points
    pub font_size: f32,
    /// Section header text size in points
    pub header_font_size: f32,
    /// Columns per page
    pub columns: u32,
    /// Height of one entry row in points
    pub row_height: f32,
    /// Page margin on every side in points
    pub margin: f32,
    /// Space before each section (except the first)
    pub section_spacing: f32,
    /// Space before each subsection that does not follow its section header
    pub subsection_spacing: f32,
    /// Paper size
    pub paper_size: PaperSize,
    /// Page orientation
    pub orientation: Orientation,
    /// Split each column into a top and a bottom half, filled in that order
    pub fill_top_half: bool,
    /// Drop leading spacing when a unit starts a fresh slot
    pub section_align_flush: bool,
    /// Never leave a header alone at the bottom of a slot
    pub section_no_awkward_breaks: bool,
}

/// Returns the built-in layout defaults.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        font_size: 7.0,
        header_font_size: 10.0,
        columns: 5,
        row_height: 11.0,
        margin: 25.0,
        section_spacing: 8.0,
        subsection_spacing: 4.0,
        paper_size: PaperSize::Letter,
        orientation: Orientation::Portrait,
        fill_top_half: false,
        section_align_flush: true,
        section_no_awkward_breaks: true,
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        default_layout_config()
    }
}

impl LayoutConfig {
    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.columns < 1 {
            anyhow::bail!("columns must be at least 1 (got {})", self.columns);
        }

        let positive = [
            ("font_size", self.font_size),
            ("header_font_size", self.header_font_size),
            ("row_height", self.row_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{} must be a positive number (got {})", name, value);
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("section_spacing", self.section_spacing),
            ("subsection_spacing", self.subsection_spacing),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must not be negative (got {})", name, value);
            }
        }

        Ok(())
    }
}

/// One configuration layer; absent fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOverrides {
    /// Entry text size
    pub font_size: Option<f32>,
    /// Section header text size
    pub header_font_size: Option<f32>,
    /// Columns per page
    pub columns: Option<u32>,
    /// Entry row height
    pub row_height: Option<f32>,
    /// Page margin
    pub margin: Option<f32>,
    /// Space before sections
    pub section_spacing: Option<f32>,
    /// Space before subsections
    pub subsection_spacing: Option<f32>,
    /// Paper size
    pub paper_size: Option<PaperSize>,
    /// Page orientation
    pub orientation: Option<Orientation>,
    /// Two-row (top/bottom half) layout
    pub fill_top_half: Option<bool>,
    /// Flush alignment at slot tops
    pub section_align_flush: Option<bool>,
    /// Orphan-header avoidance
    pub section_no_awkward_breaks: Option<bool>,
}

impl LayoutOverrides {
    /// Option names recognised in a `config:` mapping or `[layout]` table.
    pub const KNOWN_KEYS: [&'static str; 12] = [
        "font_size",
        "header_font_size",
        "columns",
        "row_height",
        "margin",
        "section_spacing",
        "subsection_spacing",
        "paper_size",
        "orientation",
        "fill_top_half",
        "section_align_flush",
        "section_no_awkward_breaks",
    ];

    /// Returns `base` with every value set in this layer replaced.
    pub fn apply(&self, base: LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            font_size: self.font_size.unwrap_or(base.font_size),
            header_font_size: self.header_font_size.unwrap_or(base.header_font_size),
            columns: self.columns.unwrap_or(base.columns),
            row_height: self.row_height.unwrap_or(base.row_height),
            margin: self.margin.unwrap_or(base.margin),
            section_spacing: self.section_spacing.unwrap_or(base.section_spacing),
            subsection_spacing: self.subsection_spacing.unwrap_or(base.subsection_spacing),
            paper_size: self.paper_size.unwrap_or(base.paper_size),
            orientation: self.orientation.unwrap_or(base.orientation),
            fill_top_half: self.fill_top_half.unwrap_or(base.fill_top_half),
            section_align_flush: self.section_align_flush.unwrap_or(base.section_align_flush),
            section_no_awkward_breaks: self
                .section_no_awkward_breaks
                .unwrap_or(base.section_no_awkward_breaks),
        }
    }

    /// True when no value is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The configuration layers that surround a document's own `config:` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayers {
    /// User defaults (config file); below the document
    pub defaults: LayoutOverrides,
    /// Command-line flags; above the document
    pub overrides: LayoutOverrides,
}

impl ConfigLayers {
    /// Resolves the final configuration for a document layer and validates it.
    pub fn resolve(&self, document: &LayoutOverrides) -> Result<LayoutConfig> {
        let config = self.overrides.apply(
            document.apply(self.defaults.apply(default_layout_config())),
        );
        config.validate()?;
        Ok(config)
    }
}
