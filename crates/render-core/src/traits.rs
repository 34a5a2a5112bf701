use crate::error::RenderError;
use crate::fonts::FontSpec;
use folio_types::{Bitmap, Rect};

/// Append-only sink for pages, abstracting the document format.
///
/// Coordinates passed in are in points with the origin at the top-left corner
/// of the current page; implementations convert to their native space.
pub trait DocumentWriter: Send {
    /// Starts a new page and makes it current. Returns its zero-based index.
    fn begin_page(&mut self, width: f32, height: f32) -> Result<usize, RenderError>;

    /// Draws a bitmap stretched to `rect`. Parts outside the page are clipped by the viewer.
    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), RenderError>;

    /// Draws a single line of text with its baseline at `baseline_y`.
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline_y: f32,
        font: FontSpec,
    ) -> Result<(), RenderError>;

    /// Drops the current page and everything drawn on it. No-op without a current page.
    fn discard_page(&mut self);

    fn page_count(&self) -> usize;

    /// Serialises the document. Consumes the writer.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
