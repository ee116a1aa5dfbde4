//! Page, column and slot geometry.
//!
//! All values are PostScript points measured from the top-left corner of the
//! page. The functions here are pure; [`PageGeometry`] bundles their results
//! for one resolved configuration.

use crate::constants::{TITLE_FONT_BUMP, TITLE_LEADING, TITLE_SPACE_AFTER};
use crate::models::{LayoutConfig, Orientation, PaperSize};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which part of a column a slot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    /// The whole column (two-row layout disabled)
    Full,
    /// Upper half of the column
    Top,
    /// Lower half of the column
    Bottom,
}

/// Returns `(width, height)` of the page in points.
pub fn page_dimensions(paper_size: PaperSize, orientation: Orientation) -> (f32, f32) {
    let (width, height) = match paper_size {
        PaperSize::Letter => (612.0, 792.0),
        PaperSize::A4 => (595.0, 842.0),
    };

    match orientation {
        Orientation::Portrait => (width, height),
        Orientation::Landscape => (height, width),
    }
}

/// Horizontal division of the printable area into columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    /// Width of a single column
    pub column_width: f32,
    /// Height between the top and bottom margins
    pub usable_height: f32,
    /// Left edge of every column, left to right
    pub column_x: Vec<f32>,
}

/// Splits the area inside the margins into `columns` equal columns.
///
/// # Errors
///
/// - `columns` < 1
/// - `margin` >= half of the shorter page side
pub fn column_geometry(
    page_width: f32,
    page_height: f32,
    margin: f32,
    columns: u32,
) -> Result<ColumnGeometry> {
    if columns < 1 {
        anyhow::bail!("columns must be at least 1 (got {})", columns);
    }

    let limit = page_width.min(page_height) / 2.0;
    if margin >= limit {
        anyhow::bail!(
            "margin {} leaves no printable area on a {}x{} page (must be below {})",
            margin,
            page_width,
            page_height,
            limit
        );
    }

    let usable_width = page_width - 2.0 * margin;
    let usable_height = page_height - 2.0 * margin;
    let column_width = usable_width / columns as f32;
    let column_x = (0..columns)
        .map(|i| margin + i as f32 * column_width)
        .collect();

    Ok(ColumnGeometry {
        column_width,
        usable_height,
        column_x,
    })
}

/// Height of one half when the two-row layout is enabled.
pub fn half_height(usable_height: f32) -> f32 {
    usable_height / 2.0
}

/// Height reserved above the slots of the first page for the title.
pub fn title_band_height(header_font_size: f32) -> f32 {
    (header_font_size + TITLE_FONT_BUMP) * TITLE_LEADING + TITLE_SPACE_AFTER
}

/// Complete geometry of a page for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Margin on every side
    pub margin: f32,
    /// Column division
    pub columns: ColumnGeometry,
    /// Two-row layout: every column is split into top and bottom halves
    pub split: bool,
    /// Space reserved for the title on page 0
    pub title_band: f32,
}

impl PageGeometry {
    /// Builds geometry from explicit page measurements.
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin: f32,
        columns: u32,
        split: bool,
        title_band: f32,
    ) -> Result<Self> {
        let columns = column_geometry(page_width, page_height, margin, columns)?;

        Ok(Self {
            page_width,
            page_height,
            margin,
            columns,
            split,
            title_band,
        })
    }

    /// Builds geometry for a resolved configuration.
    ///
    /// The title band is only reserved when the document has a title to print.
    pub fn from_config(config: &LayoutConfig, with_title: bool) -> Result<Self> {
        config.validate()?;

        let (page_width, page_height) = page_dimensions(config.paper_size, config.orientation);
        let title_band = if with_title {
            title_band_height(config.header_font_size)
        } else {
            0.0
        };

        Self::new(
            page_width,
            page_height,
            config.margin,
            config.columns,
            config.fill_top_half,
            title_band,
        )
    }

    /// Number of columns per page.
    pub fn column_count(&self) -> usize {
        self.columns.column_x.len()
    }

    /// The first slot of any column.
    pub fn first_half(&self) -> Half {
        if self.split {
            Half::Top
        } else {
            Half::Full
        }
    }

    /// Title band height applying to the given slot.
    fn reserved(&self, page: usize, half: Half) -> f32 {
        if page == 0 && half != Half::Bottom {
            self.title_band
        } else {
            0.0
        }
    }

    /// Height available to content in a slot.
    pub fn slot_height(&self, page: usize, half: Half) -> f32 {
        let base = match half {
            Half::Full => self.columns.usable_height,
            Half::Top | Half::Bottom => half_height(self.columns.usable_height),
        };
        (base - self.reserved(page, half)).max(0.0)
    }

    /// Top-left corner of a slot, measured from the page's top-left corner.
    pub fn slot_origin(&self, page: usize, column: usize, half: Half) -> (f32, f32) {
        let x = self
            .columns
            .column_x
            .get(column)
            .copied()
            .unwrap_or(self.margin);
        let offset = match half {
            Half::Full | Half::Top => 0.0,
            Half::Bottom => half_height(self.columns.usable_height),
        };
        (x, self.margin + offset + self.reserved(page, half))
    }
}
