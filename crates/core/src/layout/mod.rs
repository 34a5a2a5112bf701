//! Append-only pagination of rendered content onto fixed-size pages.
//!
//! Every entry opens a fresh page. Images are placed at their native pixel
//! size, text is wrapped into rows and paginated, dividers get a page of their
//! own. Nothing placed is ever moved again.

mod cursor;

pub use cursor::{Cursor, CursorState};

use folio_render_core::{BuiltinFont, DocumentWriter, FontSpec, RenderError};
use folio_types::{Bitmap, PageCanvas, Rect};

pub const MARGIN: f32 = 50.0;
pub const LINE_HEIGHT: f32 = 14.0;
/// Longer text rows are cut, not wrapped.
pub const MAX_LINE_CHARS: usize = 100;
pub const MAX_ROWS_PER_PAGE: usize = 50;
pub const CAPTION_INSET: f32 = 10.0;

const BODY_FONT: FontSpec = FontSpec { font: BuiltinFont::Helvetica, size: 10.0 };
const TITLE_FONT: FontSpec = FontSpec { font: BuiltinFont::HelveticaBold, size: 12.0 };
const CAPTION_FONT: FontSpec = FontSpec { font: BuiltinFont::Helvetica, size: 10.0 };
const DIVIDER_FONT: FontSpec = FontSpec { font: BuiltinFont::HelveticaBold, size: 24.0 };

/// The serialised output of one layout run.
#[derive(Debug, Clone)]
pub struct FinishedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct PageLayoutEngine {
    canvas: PageCanvas,
    writer: Box<dyn DocumentWriter>,
    cursor: Cursor,
}

impl PageLayoutEngine {
    pub fn new_document(canvas: PageCanvas, writer: Box<dyn DocumentWriter>) -> Self {
        Self {
            canvas,
            writer,
            cursor: Cursor::new(MARGIN),
        }
    }

    pub fn canvas(&self) -> PageCanvas {
        self.canvas
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        let index = self.writer.begin_page(self.canvas.width, self.canvas.height)?;
        self.cursor.start_page(index);
        Ok(())
    }

    /// Places a bitmap at 1px = 1pt from the top-left corner of a new page, captioned with `caption`.
    ///
    /// Bitmaps larger than the page bleed off its edges. A bitmap that cannot be
    /// drawn leaves no page behind.
    pub fn place_image(&mut self, bitmap: &Bitmap, caption: &str) -> Result<(), RenderError> {
        let result = self.place_image_inner(bitmap, caption);
        self.cursor.close_page();
        result
    }

    fn place_image_inner(&mut self, bitmap: &Bitmap, caption: &str) -> Result<(), RenderError> {
        if bitmap.is_empty() {
            return Err(RenderError::InvalidImage(format!(
                "'{}' is {}x{}px",
                caption, bitmap.width, bitmap.height
            )));
        }
        self.new_page()?;
        if let Err(err) = self.draw_captioned_image(bitmap, caption) {
            self.writer.discard_page();
            return Err(err);
        }
        Ok(())
    }

    fn draw_captioned_image(&mut self, bitmap: &Bitmap, caption: &str) -> Result<(), RenderError> {
        let rect = Rect::new(0.0, 0.0, bitmap.width as f32, bitmap.height as f32);
        if rect.overflows(self.canvas.size()) {
            log::debug!(
                "'{}' is {}x{}px and bleeds off the {}x{}pt page",
                caption,
                bitmap.width,
                bitmap.height,
                self.canvas.width,
                self.canvas.height
            );
        }
        self.writer.draw_image(bitmap, rect)?;
        self.writer
            .draw_text(caption, CAPTION_INSET, CAPTION_INSET, CAPTION_FONT)?;
        Ok(())
    }

    /// Places a title row (if any) followed by `lines`, starting on a new page.
    pub fn place_text(&mut self, lines: &[String], title: Option<&str>) -> Result<(), RenderError> {
        let result = self.place_text_inner(lines, title);
        self.cursor.close_page();
        result
    }

    fn place_text_inner(&mut self, lines: &[String], title: Option<&str>) -> Result<(), RenderError> {
        self.new_page()?;
        if let Some(title) = title {
            self.place_row(title, TITLE_FONT)?;
        }
        for line in lines {
            self.place_row(line, BODY_FONT)?;
        }
        Ok(())
    }

    fn place_row(&mut self, text: &str, font: FontSpec) -> Result<(), RenderError> {
        if self.needs_break() {
            self.new_page()?;
        }
        let row = truncate_chars(text, MAX_LINE_CHARS);
        let baseline = self.cursor.y + font.ascent();
        self.writer.draw_text(row, self.cursor.x, baseline, font)?;
        self.cursor.advance_row(LINE_HEIGHT);
        Ok(())
    }

    fn needs_break(&self) -> bool {
        match self.cursor.state {
            CursorState::NeedsNewPage => true,
            // A fresh page takes at least one row, however small it is.
            CursorState::AtTopOfNewPage => false,
            CursorState::Placing => {
                self.cursor.rows_on_page >= MAX_ROWS_PER_PAGE
                    || !self.cursor.row_fits(LINE_HEIGHT, self.canvas.height)
            }
        }
    }

    /// Adds a page carrying `title` centred horizontally at half height.
    pub fn insert_divider(&mut self, title: &str) -> Result<(), RenderError> {
        let result = self.insert_divider_inner(title);
        self.cursor.close_page();
        result
    }

    fn insert_divider_inner(&mut self, title: &str) -> Result<(), RenderError> {
        self.new_page()?;
        let width = DIVIDER_FONT.text_width(title);
        let x = ((self.canvas.width - width) / 2.0).max(MARGIN);
        self.writer
            .draw_text(title, x, self.canvas.height / 2.0, DIVIDER_FONT)
    }

    /// Serialises the document. A document with no pages gets one blank page.
    pub fn finish(mut self) -> Result<FinishedDocument, RenderError> {
        if self.writer.page_count() == 0 {
            log::debug!("No content was placed; emitting a blank page");
            self.new_page()?;
        }
        let page_count = self.writer.page_count();
        let bytes = self.writer.finish()?;
        Ok(FinishedDocument { bytes, page_count })
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
