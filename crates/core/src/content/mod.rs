//! Per-kind content rendering with failure isolation.
//!
//! One handler per [`ContentKind`], selected by an exhaustive match. Every
//! decoder error, and every decoder panic, is converted to
//! [`RenderResult::Error`] here so it never reaches sibling entries.

pub mod decoders;
pub mod text;

use crate::classify::ContentKind;
use crate::error::DecodeError;
use decoders::{
    BitmapDecoder, CadParser, DxfParser, ImageCrateDecoder, LegacyRasterDecoder, MarkdownConverter,
    PsdCompositeDecoder, PulldownMarkdown, ResvgRasterizer, VectorRasterizer,
};
use folio_types::Bitmap;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Canvas SVG files are rasterised onto, in pixels.
pub const DEFAULT_VECTOR_CANVAS: (u32, u32) = (800, 600);

pub const UNSUPPORTED_REASON: &str = "unsupported type";
pub const CAD_PARSE_REASON: &str = "DXF parse error";

/// The outcome of rendering one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    Image(Bitmap),
    TextLines(Vec<String>),
    Skipped(String),
    Error(String),
}

pub struct ContentRenderer {
    bitmaps: Box<dyn BitmapDecoder>,
    vectors: Box<dyn VectorRasterizer>,
    legacy: Box<dyn LegacyRasterDecoder>,
    markdown: Box<dyn MarkdownConverter>,
    cad: Box<dyn CadParser>,
    vector_canvas: (u32, u32),
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self {
            bitmaps: Box::new(ImageCrateDecoder),
            vectors: Box::new(ResvgRasterizer),
            legacy: Box::new(PsdCompositeDecoder),
            markdown: Box::new(PulldownMarkdown),
            cad: Box::new(DxfParser),
            vector_canvas: DEFAULT_VECTOR_CANVAS,
        }
    }
}

impl ContentRenderer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_bitmap_decoder(mut self, decoder: impl BitmapDecoder + 'static) -> Self {
        self.bitmaps = Box::new(decoder);
        self
    }

    pub fn with_vector_rasterizer(mut self, rasterizer: impl VectorRasterizer + 'static) -> Self {
        self.vectors = Box::new(rasterizer);
        self
    }

    pub fn with_legacy_raster_decoder(mut self, decoder: impl LegacyRasterDecoder + 'static) -> Self {
        self.legacy = Box::new(decoder);
        self
    }

    pub fn with_markdown_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.markdown = Box::new(converter);
        self
    }

    pub fn with_cad_parser(mut self, parser: impl CadParser + 'static) -> Self {
        self.cad = Box::new(parser);
        self
    }

    pub fn with_vector_canvas(mut self, width: u32, height: u32) -> Self {
        self.vector_canvas = (width, height);
        self
    }

    /// Renders one entry's bytes. Never panics and never returns early with an error.
    pub fn render(&self, kind: ContentKind, bytes: &[u8]) -> RenderResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.render_kind(kind, bytes))) {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => RenderResult::Error(err.to_string()),
            Err(payload) => RenderResult::Error(DecodeError::Panicked(panic_message(payload)).to_string()),
        }
    }

    fn render_kind(&self, kind: ContentKind, bytes: &[u8]) -> Result<RenderResult, DecodeError> {
        match kind {
            ContentKind::Image => self.bitmaps.decode(bytes).map(RenderResult::Image),
            ContentKind::Vector => {
                let (width, height) = self.vector_canvas;
                self.vectors.rasterize(bytes, width, height).map(RenderResult::Image)
            }
            ContentKind::LegacyRaster => self.legacy.decode_composite(bytes).map(RenderResult::Image),
            ContentKind::MarkupText => {
                let source = String::from_utf8_lossy(bytes);
                let plain = self.markdown.to_plain_text(&source)?;
                let lines = text::split_lines(&plain)
                    .iter()
                    .map(|line| text::strip_residual_markup(line))
                    .collect();
                Ok(RenderResult::TextLines(lines))
            }
            // A DXF that parses is still shown as its source text, not drawn.
            ContentKind::Cad => match self.cad.parse(bytes) {
                Ok(summary) => {
                    log::debug!("DXF parsed with {} entities", summary.entity_count);
                    Ok(RenderResult::TextLines(text::split_lines(&String::from_utf8_lossy(bytes))))
                }
                Err(err) => {
                    log::warn!("DXF parse failed: {}", err);
                    Ok(RenderResult::Skipped(CAD_PARSE_REASON.to_string()))
                }
            },
            ContentKind::PlainText => Ok(RenderResult::TextLines(text::split_lines(
                &String::from_utf8_lossy(bytes),
            ))),
            ContentKind::Unsupported => Ok(RenderResult::Skipped(UNSUPPORTED_REASON.to_string())),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{png_bytes, psd_bytes, FailingDecoder, PanickingDecoder, MINIMAL_DXF};

    #[test]
    fn plain_text_splits_into_lines() {
        let renderer = ContentRenderer::new();
        let result = renderer.render(ContentKind::PlainText, b"a,b\r\nc,d\n");
        assert_eq!(result, RenderResult::TextLines(vec!["a,b".into(), "c,d".into()]));
    }

    #[test]
    fn markdown_is_flattened_and_stripped() {
        let renderer = ContentRenderer::new();
        let result = renderer.render(ContentKind::MarkupText, b"## Heading\n\nBody **bold**\n");
        assert_eq!(result, RenderResult::TextLines(vec!["Heading".into(), "Body bold".into()]));
    }

    #[test]
    fn unsupported_is_skipped() {
        let result = ContentRenderer::new().render(ContentKind::Unsupported, b"\x00\x01");
        assert_eq!(result, RenderResult::Skipped("unsupported type".into()));
    }

    #[test]
    fn images_decode_through_the_bitmap_decoder() {
        match ContentRenderer::new().render(ContentKind::Image, &png_bytes(5, 4)) {
            RenderResult::Image(bitmap) => assert_eq!((bitmap.width, bitmap.height), (5, 4)),
            other => panic!("expected an image, got {other:?}"),
        }
    }

    #[test]
    fn svg_uses_the_configured_canvas() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#;
        match ContentRenderer::new().with_vector_canvas(40, 30).render(ContentKind::Vector, svg) {
            RenderResult::Image(bitmap) => assert_eq!((bitmap.width, bitmap.height), (40, 30)),
            other => panic!("expected an image, got {other:?}"),
        }
    }

    #[test]
    fn decoder_errors_become_error_results() {
        let renderer = ContentRenderer::new().with_bitmap_decoder(FailingDecoder("bad header".into()));
        assert_eq!(
            renderer.render(ContentKind::Image, b"anything"),
            RenderResult::Error("bad header".into())
        );
    }

    #[test]
    fn decoder_panics_are_contained() {
        let renderer = ContentRenderer::new().with_legacy_raster_decoder(PanickingDecoder);
        match renderer.render(ContentKind::LegacyRaster, b"8BPS") {
            RenderResult::Error(message) => assert!(message.starts_with("decoder panicked")),
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_psd_is_an_error() {
        let result = ContentRenderer::new().render(ContentKind::LegacyRaster, b"not a psd");
        assert!(matches!(result, RenderResult::Error(_)));
    }

    #[test]
    fn cad_renders_source_text_or_skips() {
        let ok = ContentRenderer::new().with_cad_parser(crate::test_utils::AcceptingCadParser);
        assert_eq!(
            ok.render(ContentKind::Cad, b"0\nSECTION\n0\nEOF\n"),
            RenderResult::TextLines(vec!["0".into(), "SECTION".into(), "0".into(), "EOF".into()])
        );

        let failing = ContentRenderer::new().with_cad_parser(FailingDecoder("bad group code".into()));
        assert_eq!(
            failing.render(ContentKind::Cad, b"garbage"),
            RenderResult::Skipped("DXF parse error".into())
        );
    }

    #[test]
    fn psd_renders_its_composite() {
        match ContentRenderer::new().render(ContentKind::LegacyRaster, &psd_bytes(6, 5, [255, 0, 0])) {
            RenderResult::Image(bitmap) => assert_eq!((bitmap.width, bitmap.height), (6, 5)),
            other => panic!("expected an image, got {other:?}"),
        }
    }

    #[test]
    fn parsed_dxf_is_shown_as_its_source_lines() {
        match ContentRenderer::new().render(ContentKind::Cad, MINIMAL_DXF.as_bytes()) {
            RenderResult::TextLines(lines) => {
                assert_eq!(lines.first().map(String::as_str), Some("  0"));
                assert!(lines.iter().any(|l| l == "LINE"));
                assert_eq!(lines.last().map(String::as_str), Some("EOF"));
            }
            other => panic!("expected text lines, got {other:?}"),
        }
        assert_eq!(
            ContentRenderer::new().render(ContentKind::Cad, b""),
            RenderResult::TextLines(vec![])
        );
    }
}
