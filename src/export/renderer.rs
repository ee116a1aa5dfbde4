//! Drawing backend abstraction and the driver that feeds it a flow plan.
//!
//! The planner decides where everything goes; a [`Renderer`] only knows how
//! to put text, lines and filled boxes on a page. [`render_plan`] walks the
//! plan in emission order and translates every operation into drawing calls.

use crate::constants::{
    COLUMN_PADDING, KEY_COLUMN_SHARE, SUBSECTION_INDENT, TITLE_FONT_BUMP, TITLE_LEADING,
};
use crate::layout::{DrawOp, DrawOpKind, FlowPlan, PageGeometry};
use crate::models::Document;
use anyhow::Result;

/// Typeface families available to every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Body text
    Regular,
    /// Titles and section headers
    Bold,
    /// Subsection headers
    Italic,
    /// Key combinations
    MonoBold,
}

/// How a piece of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Typeface
    pub face: Face,
    /// Size in points
    pub size: f32,
    /// White text (for use on a filled bar) instead of black
    pub inverse: bool,
}

impl TextStyle {
    /// Black text in the given face and size.
    pub fn new(face: Face, size: f32) -> Self {
        Self {
            face,
            size,
            inverse: false,
        }
    }
}

/// Capabilities the layout core needs from an output backend.
///
/// Coordinates are points from the top-left corner of the current page; `y`
/// passed to [`Renderer::draw_text`] is the text baseline.
pub trait Renderer {
    /// The finished artifact (e.g. PDF bytes).
    type Output;

    /// Width of `text` when drawn with `style`.
    fn measure_text(&self, text: &str, style: TextStyle) -> f32;

    /// Draws a single line of text with its baseline at `y`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);

    /// Draws a straight line of the given width in light grey.
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32);

    /// Fills a black rectangle whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Finishes the current page and starts a new, empty one.
    fn start_new_page(&mut self);

    /// Completes the document.
    fn finalize(self) -> Result<Self::Output>;
}

/// Width of the rule between consecutive entry rows.
const ROW_RULE_WIDTH: f32 = 0.25;

/// Baseline for text of `size` centred in a band of `height` starting at `top`.
fn baseline(top: f32, height: f32, size: f32) -> f32 {
    // Cap height of the standard faces is roughly 0.7 em.
    top + (height + size * 0.7) / 2.0
}

/// Shortens `text` with a trailing "..." until it fits `max_width`.
pub fn fit_text<R: Renderer + ?Sized>(
    renderer: &R,
    text: &str,
    style: TextStyle,
    max_width: f32,
) -> String {
    if renderer.measure_text(text, style) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}...", chars.iter().collect::<String>().trim_end());
        if renderer.measure_text(&candidate, style) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Draws a planned document and returns the backend's output.
pub fn render_plan<R: Renderer>(
    document: &Document,
    plan: &FlowPlan<'_>,
    geometry: &PageGeometry,
    mut renderer: R,
) -> Result<R::Output> {
    draw_title(document, geometry, &mut renderer);

    for (index, op) in plan.ops.iter().enumerate() {
        let next = plan.ops.get(index + 1);
        draw_op(op, next, geometry, &mut renderer);
    }

    renderer.finalize()
}

fn draw_title<R: Renderer>(document: &Document, geometry: &PageGeometry, renderer: &mut R) {
    if document.title.is_empty() {
        return;
    }

    let size = document.layout.header_font_size + TITLE_FONT_BUMP;
    let style = TextStyle::new(Face::Bold, size);
    let usable_width = geometry.page_width - 2.0 * geometry.margin;
    let title = fit_text(renderer, &document.title, style, usable_width);
    let width = renderer.measure_text(&title, style);
    let x = geometry.margin + (usable_width - width).max(0.0) / 2.0;
    let y = baseline(geometry.margin, size * TITLE_LEADING, size);
    renderer.draw_text(x, y, &title, style);
}

fn draw_op<R: Renderer>(
    op: &DrawOp<'_>,
    next: Option<&DrawOp<'_>>,
    geometry: &PageGeometry,
    renderer: &mut R,
) {
    let (left, slot_top) = geometry.slot_origin(op.at.page, op.at.column, op.at.half);
    let top = slot_top + op.at.y;
    let width = geometry.columns.column_width;
    let inner_left = left + COLUMN_PADDING;
    let inner_width = (width - 2.0 * COLUMN_PADDING).max(0.0);

    match op.kind {
        DrawOpKind::PageBreak => renderer.start_new_page(),
        DrawOpKind::ColumnBreak => {}
        DrawOpKind::SectionHeader {
            text,
            font_size,
            height,
        } => {
            renderer.fill_rect(inner_left, top, inner_width, height);
            let style = TextStyle {
                face: Face::Bold,
                size: font_size,
                inverse: true,
            };
            let label = fit_text(
                renderer,
                &text.to_uppercase(),
                style,
                inner_width - 2.0 * COLUMN_PADDING,
            );
            let label_width = renderer.measure_text(&label, style);
            let x = inner_left + (inner_width - label_width).max(0.0) / 2.0;
            renderer.draw_text(x, baseline(top, height, font_size), &label, style);
        }
        DrawOpKind::SubsectionHeader {
            text,
            font_size,
            height,
        } => {
            let style = TextStyle::new(Face::Italic, font_size);
            let x = inner_left + SUBSECTION_INDENT;
            let label = fit_text(renderer, text, style, inner_width - SUBSECTION_INDENT);
            renderer.draw_text(x, baseline(top, height, font_size), &label, style);
        }
        DrawOpKind::EntryRow {
            key,
            description,
            font_size,
            height,
        } => {
            let key_width = inner_width * KEY_COLUMN_SHARE;
            let y = baseline(top, height, font_size);

            let key_style = TextStyle::new(Face::MonoBold, font_size);
            let key_label = fit_text(renderer, key, key_style, key_width - COLUMN_PADDING);
            renderer.draw_text(inner_left, y, &key_label, key_style);

            let desc_style = TextStyle::new(Face::Regular, font_size);
            let desc_label = fit_text(renderer, description, desc_style, inner_width - key_width);
            renderer.draw_text(inner_left + key_width, y, &desc_label, desc_style);

            let continues_table = next.is_some_and(|n| {
                matches!(n.kind, DrawOpKind::EntryRow { .. }) && n.at.slot() == op.at.slot()
            });
            if continues_table {
                let rule_y = top + height;
                renderer.draw_line(
                    inner_left,
                    rule_y,
                    inner_left + inner_width,
                    rule_y,
                    ROW_RULE_WIDTH,
                );
            }
        }
    }
}
