//! Export of planned cheat sheets.
//!
//! This module turns a flow plan into a finished artifact through the
//! [`Renderer`] abstraction; [`PdfRenderer`] is the print backend.

pub mod pdf;
pub mod renderer;

pub use pdf::PdfRenderer;
pub use renderer::{fit_text, render_plan, Face, Renderer, TextStyle};

use crate::layout::{self, PageGeometry};
use crate::models::Document;
use anyhow::Result;

/// A rendered cheat sheet.
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    /// PDF file contents
    pub bytes: Vec<u8>,
    /// Number of pages in the document
    pub pages: usize,
}

/// Plans and renders a document to PDF.
pub fn export_to_pdf(document: &Document) -> Result<RenderedSheet> {
    let geometry = PageGeometry::from_config(&document.layout, !document.title.is_empty())?;
    let plan = layout::plan_with_geometry(document, &geometry)?;
    let pages = plan.total_page_count;

    let bytes = render_plan(
        document,
        &plan,
        &geometry,
        PdfRenderer::for_geometry(&geometry).with_title(&document.title),
    )?;

    Ok(RenderedSheet { bytes, pages })
}
