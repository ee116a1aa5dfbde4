//! PDF backend built on `pdf-writer`.
//!
//! Uses the standard Type1 fonts so no font files are embedded. Text is
//! encoded as WinAnsi; common key symbols outside that encoding are spelled
//! out (⌘ → Cmd) and anything else becomes `?`.

use crate::constants::APP_NAME;
use crate::export::renderer::{Face, Renderer, TextStyle};
use crate::layout::PageGeometry;
use anyhow::Result;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use std::borrow::Cow;
use tracing::debug;

/// Resource name and PostScript name of every face.
static FONTS: [(Face, &[u8], &[u8]); 4] = [
    (Face::Regular, b"F1", b"Helvetica"),
    (Face::Bold, b"F2", b"Helvetica-Bold"),
    (Face::Italic, b"F3", b"Helvetica-Oblique"),
    (Face::MonoBold, b"F4", b"Courier-Bold"),
];

/// Grey level of the rules between entry rows.
const RULE_GREY: f32 = 0.75;

/// Key symbols with a readable ASCII spelling.
static SYMBOL_NAMES: [(char, &str); 14] = [
    ('⌘', "Cmd"),
    ('⇧', "Shift"),
    ('⌥', "Opt"),
    ('⌃', "Ctrl"),
    ('←', "Left"),
    ('→', "Right"),
    ('↑', "Up"),
    ('↓', "Down"),
    ('↵', "Enter"),
    ('⏎', "Enter"),
    ('⌫', "Bksp"),
    ('⌦', "Del"),
    ('⇥', "Tab"),
    ('⎋', "Esc"),
];

/// Replaces key symbols the standard fonts cannot show with their names.
pub fn transliterate(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| SYMBOL_NAMES.iter().any(|(s, _)| *s == c)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match SYMBOL_NAMES.iter().find(|(s, _)| *s == c) {
            Some((_, name)) => out.push_str(name),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Encodes text as WinAnsi bytes for the standard Type1 fonts.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    transliterate(text)
        .chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Approximate Helvetica advance width in thousandths of an em.
fn helvetica_width(c: char) -> f32 {
    match c {
        '\'' => 191.0,
        'i' | 'j' | 'l' => 222.0,
        '|' => 260.0,
        ' ' | '.' | ',' | ':' | ';' | '!' | 'I' | 'f' | 't' | '/' | '[' | ']' => 278.0,
        'r' | '-' | '(' | ')' => 333.0,
        'm' | 'M' => 833.0,
        'w' => 722.0,
        'W' => 944.0,
        'A'..='Z' => 667.0,
        _ => 556.0,
    }
}

/// Renders pages into an in-memory PDF.
pub struct PdfRenderer {
    page_width: f32,
    page_height: f32,
    title: Option<String>,
    pages: Vec<Content>,
    current: Content,
}

impl PdfRenderer {
    /// Creates a renderer with one empty page of the given size.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            title: None,
            pages: Vec::new(),
            current: Content::new(),
        }
    }

    /// Creates a renderer sized for the given geometry.
    pub fn for_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.page_width, geometry.page_height)
    }

    /// Sets the title recorded in the document information dictionary.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string()).filter(|t| !t.is_empty());
        self
    }

    fn font_name(face: Face) -> Name<'static> {
        FONTS
            .iter()
            .find(|(f, _, _)| *f == face)
            .map_or(Name(b"F1"), |(_, name, _)| Name(*name))
    }

    /// Flips a top-down y coordinate into PDF user space.
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }
}

impl Renderer for PdfRenderer {
    type Output = Vec<u8>;

    fn measure_text(&self, text: &str, style: TextStyle) -> f32 {
        let text = transliterate(text);
        let units: f32 = match style.face {
            Face::MonoBold => text.chars().count() as f32 * 600.0,
            Face::Bold => text.chars().map(helvetica_width).sum::<f32>() * 1.06,
            Face::Regular | Face::Italic => text.chars().map(helvetica_width).sum(),
        };
        units * style.size / 1000.0
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let bytes = encode_win_ansi(text);
        let y = self.flip(y);
        let content = &mut self.current;

        if style.inverse {
            content.set_fill_gray(1.0);
        }
        content
            .begin_text()
            .set_font(Self::font_name(style.face), style.size)
            .next_line(x, y)
            .show(Str(&bytes))
            .end_text();
        if style.inverse {
            content.set_fill_gray(0.0);
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        let (y1, y2) = (self.flip(y1), self.flip(y2));
        let content = &mut self.current;
        content.save_state();
        content.set_stroke_gray(RULE_GREY);
        content.set_line_width(width);
        content.move_to(x1, y1);
        content.line_to(x2, y2);
        content.stroke();
        content.restore_state();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let bottom = self.flip(y + height);
        let content = &mut self.current;
        content.set_fill_gray(0.0);
        content.rect(x, bottom, width, height);
        content.fill_nonzero();
    }

    fn start_new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Content::new());
        self.pages.push(finished);
    }

    fn finalize(mut self) -> Result<Self::Output> {
        self.start_new_page();

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc()).collect();
        let page_ids: Vec<Ref> = self.pages.iter().map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = self.pages.iter().map(|_| alloc()).collect();
        let info_id = alloc();

        pdf.catalog(catalog_id).pages(pages_id);
        let count = i32::try_from(page_ids.len())?;
        pdf.pages(pages_id).kids(page_ids.iter().copied()).count(count);

        for ((_, _, base_font), id) in FONTS.iter().zip(&font_ids) {
            pdf.type1_font(*id)
                .base_font(Name(*base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (i, content) in self.pages.into_iter().enumerate() {
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            {
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                for ((_, name, _), id) in FONTS.iter().zip(&font_ids) {
                    fonts.pair(Name(*name), *id);
                }
            }
        }

        {
            let mut info = pdf.document_info(info_id);
            info.producer(TextStr(APP_NAME));
            if let Some(title) = &self.title {
                info.title(TextStr(title));
            }
        }

        let bytes = pdf.finish();
        debug!(
            pages = page_ids.len(),
            bytes = bytes.len(),
            "PDF document assembled"
        );
        Ok(bytes)
    }
}
