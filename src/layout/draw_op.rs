//! Positioned output of the flow planner.

use crate::layout::geometry::Half;
use serde::Serialize;

/// Where a draw operation lands: page, column, half and offset from the slot top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotPosition {
    /// Zero-based page index
    pub page: usize,
    /// Zero-based column index within the page
    pub column: usize,
    /// Part of the column
    pub half: Half,
    /// Distance from the top of the slot in points
    pub y: f32,
}

impl SlotPosition {
    /// Identifies the slot, ignoring the vertical offset.
    pub fn slot(&self) -> (usize, usize, Half) {
        (self.page, self.column, self.half)
    }
}

/// What to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOpKind<'a> {
    /// Section header bar
    SectionHeader {
        /// Section name
        text: &'a str,
        /// Font size in points
        font_size: f32,
        /// Height of the header unit
        height: f32,
    },
    /// Subsection header line
    SubsectionHeader {
        /// Subsection name
        text: &'a str,
        /// Font size in points
        font_size: f32,
        /// Height of the header unit
        height: f32,
    },
    /// One key/description row
    EntryRow {
        /// Key combination
        key: &'a str,
        /// Description
        description: &'a str,
        /// Font size in points
        font_size: f32,
        /// Row height
        height: f32,
    },
    /// Flow moved to the next column of the same page
    ColumnBreak,
    /// Flow moved to the first column of a new page
    PageBreak,
}

/// A typed, positioned unit of output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawOp<'a> {
    /// Target slot and offset
    #[serde(flatten)]
    pub at: SlotPosition,
    /// Payload
    #[serde(flatten)]
    pub kind: DrawOpKind<'a>,
}

impl DrawOp<'_> {
    /// True for section and subsection headers.
    pub fn is_header(&self) -> bool {
        matches!(
            self.kind,
            DrawOpKind::SectionHeader { .. } | DrawOpKind::SubsectionHeader { .. }
        )
    }

    /// True for column and page breaks.
    pub fn is_break(&self) -> bool {
        matches!(self.kind, DrawOpKind::ColumnBreak | DrawOpKind::PageBreak)
    }

    /// Height consumed by the unit; zero for breaks.
    pub fn height(&self) -> f32 {
        match self.kind {
            DrawOpKind::SectionHeader { height, .. }
            | DrawOpKind::SubsectionHeader { height, .. }
            | DrawOpKind::EntryRow { height, .. } => height,
            DrawOpKind::ColumnBreak | DrawOpKind::PageBreak => 0.0,
        }
    }
}

/// Result of a full planning pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowPlan<'a> {
    /// Draw operations in emission order
    pub ops: Vec<DrawOp<'a>>,
    /// Number of pages the plan occupies (at least 1)
    pub total_page_count: usize,
}
