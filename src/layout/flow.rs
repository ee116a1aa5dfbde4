//! Flow planner and page estimator.
//!
//! Sections are packed greedily, in document order, into slots: the columns
//! of each page, or the top and bottom halves of each column when the two-row
//! layout is enabled. A single forward pass places every header and row at
//! the current cursor and advances to the next slot whenever a unit does not
//! fit. With `section_no_awkward_breaks` a header is only placed where its
//! first child fits too, so no slot ends on a bare header.
//!
//! The page estimator runs the same packer with a sink that drops every
//! operation, so both always agree on the page count.

use crate::constants::{FIT_EPSILON, SECTION_HEADER_LEADING};
use crate::layout::draw_op::{DrawOp, DrawOpKind, FlowPlan, SlotPosition};
use crate::layout::geometry::{Half, PageGeometry};
use crate::models::{Document, Entry, LayoutConfig, Section, Subsection};
use anyhow::Result;
use tracing::{debug, trace, warn};

/// Receives draw operations as the packer emits them.
pub trait OpSink<'a> {
    /// Accepts the next operation in emission order.
    fn push(&mut self, op: DrawOp<'a>);
}

impl<'a> OpSink<'a> for Vec<DrawOp<'a>> {
    fn push(&mut self, op: DrawOp<'a>) {
        Vec::push(self, op);
    }
}

/// Sink that keeps nothing; the estimator only needs cursor bookkeeping.
struct Discard;

impl<'a> OpSink<'a> for Discard {
    fn push(&mut self, _op: DrawOp<'a>) {}
}

/// Unit heights, font sizes and flow options derived from the configuration.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    section_header: f32,
    subsection_header: f32,
    row: f32,
    section_font: f32,
    subsection_font: f32,
    entry_font: f32,
    section_spacing: f32,
    subsection_spacing: f32,
    flush: bool,
    no_awkward_breaks: bool,
}

impl Metrics {
    fn from_config(config: &LayoutConfig) -> Self {
        Self {
            section_header: config.header_font_size * SECTION_HEADER_LEADING,
            subsection_header: config.row_height,
            row: config.row_height,
            section_font: config.header_font_size,
            subsection_font: config.font_size + 1.0,
            entry_font: config.font_size,
            section_spacing: config.section_spacing,
            subsection_spacing: config.subsection_spacing,
            flush: config.section_align_flush,
            no_awkward_breaks: config.section_no_awkward_breaks,
        }
    }
}

/// Flow position: slot identity plus the offset of the next free point.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    page: usize,
    column: usize,
    half: Half,
    y: f32,
    max_page: usize,
}

/// Owns the cursor for one planning pass.
struct Packer<'g, S> {
    geometry: &'g PageGeometry,
    metrics: Metrics,
    cursor: Cursor,
    sink: S,
}

impl<'a, 'g, S: OpSink<'a>> Packer<'g, S> {
    fn new(geometry: &'g PageGeometry, config: &LayoutConfig, sink: S) -> Self {
        Self {
            geometry,
            metrics: Metrics::from_config(config),
            cursor: Cursor {
                page: 0,
                column: 0,
                half: geometry.first_half(),
                y: 0.0,
                max_page: 0,
            },
            sink,
        }
    }

    /// Packs every section and returns the sink with the page count.
    fn run(mut self, document: &'a Document) -> (S, usize) {
        for (index, section) in document.sections.iter().enumerate() {
            self.place_section(section, index == 0);
        }
        (self.sink, self.cursor.max_page + 1)
    }

    fn place_section(&mut self, section: &'a Section, first: bool) {
        let m = self.metrics;

        if !section.name.is_empty() {
            let spacing = if first { 0.0 } else { m.section_spacing };
            let mut need = m.section_header;
            if m.no_awkward_breaks {
                need += self.section_lead(section);
            }

            let y = self.reserve(spacing, need);
            self.place(
                y,
                DrawOpKind::SectionHeader {
                    text: &section.name,
                    font_size: m.section_font,
                    height: m.section_header,
                },
            );
        }

        let direct = section.content.direct_entries();
        for entry in direct {
            self.place_entry(entry);
        }

        let mut follows_header = direct.is_empty();
        for subsection in section.content.subsections() {
            self.place_subsection(subsection, follows_header);
            follows_header = false;
        }
    }

    fn place_subsection(&mut self, subsection: &'a Subsection, follows_header: bool) {
        let m = self.metrics;
        let spacing = if follows_header {
            0.0
        } else {
            m.subsection_spacing
        };
        let mut need = m.subsection_header;
        if m.no_awkward_breaks {
            need += self.subsection_lead(subsection);
        }

        let y = self.reserve(spacing, need);
        self.place(
            y,
            DrawOpKind::SubsectionHeader {
                text: &subsection.name,
                font_size: m.subsection_font,
                height: m.subsection_header,
            },
        );

        for entry in &subsection.entries {
            self.place_entry(entry);
        }
    }

    fn place_entry(&mut self, entry: &'a Entry) {
        let m = self.metrics;
        let y = self.reserve(0.0, m.row);
        self.place(
            y,
            DrawOpKind::EntryRow {
                key: &entry.key,
                description: &entry.description,
                font_size: m.entry_font,
                height: m.row,
            },
        );
    }

    /// Height that must follow a section header in the same slot.
    fn section_lead(&self, section: &Section) -> f32 {
        if !section.content.direct_entries().is_empty() {
            self.metrics.row
        } else if let Some(first) = section.content.subsections().first() {
            self.metrics.subsection_header + self.subsection_lead(first)
        } else {
            0.0
        }
    }

    /// Height that must follow a subsection header in the same slot.
    fn subsection_lead(&self, subsection: &Subsection) -> f32 {
        if subsection.entries.is_empty() {
            0.0
        } else {
            self.metrics.row
        }
    }

    fn remaining(&self) -> f32 {
        self.geometry
            .slot_height(self.cursor.page, self.cursor.half)
            - self.cursor.y
    }

    /// Spacing actually applied at the current cursor.
    fn leading_space(&self, spacing: f32) -> f32 {
        if self.metrics.flush && self.cursor.y == 0.0 {
            0.0
        } else {
            spacing
        }
    }

    /// Finds room for `spacing` + `need` points and returns the unit's offset.
    ///
    /// Only a slot that already holds content is abandoned; a unit that is
    /// too tall for a fresh slot is placed there and overflows. First-page
    /// slots the title band leaves with no height are skipped outright.
    fn reserve(&mut self, spacing: f32, need: f32) -> f32 {
        while self.cursor.page == 0 && self.cursor.y == 0.0 && self.remaining() <= FIT_EPSILON {
            self.advance();
        }

        let mut space = self.leading_space(spacing);
        if self.cursor.y > 0.0 && space + need > self.remaining() + FIT_EPSILON {
            self.advance();
            space = self.leading_space(spacing);
        }

        if space + need > self.remaining() + FIT_EPSILON {
            warn!(
                page = self.cursor.page,
                column = self.cursor.column,
                need,
                available = self.remaining(),
                "unit taller than its slot, placing anyway"
            );
        }

        self.cursor.y + space
    }

    fn place(&mut self, y: f32, kind: DrawOpKind<'a>) {
        let op = DrawOp {
            at: SlotPosition {
                page: self.cursor.page,
                column: self.cursor.column,
                half: self.cursor.half,
                y,
            },
            kind,
        };
        self.cursor.y = y + op.height();
        self.sink.push(op);
    }

    /// Moves to the next slot: bottom half, then next column, then next page.
    fn advance(&mut self) {
        let cursor = &mut self.cursor;
        cursor.y = 0.0;

        if cursor.half == Half::Top {
            cursor.half = Half::Bottom;
            trace!(page = cursor.page, column = cursor.column, "advance to bottom half");
            return;
        }

        cursor.half = self.geometry.first_half();
        let kind = if cursor.column + 1 < self.geometry.column_count() {
            cursor.column += 1;
            DrawOpKind::ColumnBreak
        } else {
            cursor.page += 1;
            cursor.column = 0;
            DrawOpKind::PageBreak
        };
        cursor.max_page = cursor.max_page.max(cursor.page);
        trace!(page = cursor.page, column = cursor.column, "advance to next slot");

        let at = SlotPosition {
            page: cursor.page,
            column: cursor.column,
            half: cursor.half,
            y: 0.0,
        };
        self.sink.push(DrawOp { at, kind });
    }
}

/// Plans a document on the geometry implied by its own configuration.
pub fn plan(document: &Document) -> Result<FlowPlan<'_>> {
    let geometry = PageGeometry::from_config(&document.layout, !document.title.is_empty())?;
    plan_with_geometry(document, &geometry)
}

/// Plans a document on explicit geometry.
pub fn plan_with_geometry<'a>(
    document: &'a Document,
    geometry: &PageGeometry,
) -> Result<FlowPlan<'a>> {
    document.layout.validate()?;

    let (ops, total_page_count) =
        Packer::new(geometry, &document.layout, Vec::new()).run(document);
    debug!(
        ops = ops.len(),
        pages = total_page_count,
        "flow plan complete"
    );

    Ok(FlowPlan {
        ops,
        total_page_count,
    })
}

/// Counts the pages a document needs without building the plan.
pub fn estimate_pages(document: &Document) -> Result<usize> {
    let geometry = PageGeometry::from_config(&document.layout, !document.title.is_empty())?;
    estimate_pages_with_geometry(document, &geometry)
}

/// Counts pages on explicit geometry.
pub fn estimate_pages_with_geometry(document: &Document, geometry: &PageGeometry) -> Result<usize> {
    document.layout.validate()?;

    let (_, pages) = Packer::new(geometry, &document.layout, Discard).run(document);
    Ok(pages)
}
