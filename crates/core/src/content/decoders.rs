//! Contracts for the external codecs each content kind relies on, and the
//! default implementations backed by ecosystem crates.

use crate::error::DecodeError;
use folio_types::Bitmap;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;

/// Raster formats (png, jpeg, gif, bmp, webp) to pixels.
pub trait BitmapDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError>;
}

/// SVG markup to pixels on a canvas of the requested size.
pub trait VectorRasterizer: Send + Sync {
    fn rasterize(&self, markup: &[u8], width: u32, height: u32) -> Result<Bitmap, DecodeError>;
}

/// Layered legacy raster documents (PSD) to their flattened composite.
pub trait LegacyRasterDecoder: Send + Sync {
    fn decode_composite(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError>;
}

pub trait MarkdownConverter: Send + Sync {
    fn to_plain_text(&self, markdown: &str) -> Result<String, DecodeError>;
}

/// What a successful CAD parse found. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadSummary {
    pub entity_count: usize,
}

pub trait CadParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<CadSummary, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl BitmapDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| DecodeError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Bitmap::from_rgba(width, height, rgba.into_raw())
            .ok_or_else(|| DecodeError::Decode("decoded buffer does not match image size".into()))
    }
}

/// Rasterises with `resvg`, stretching the drawing to fill the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgRasterizer;

impl VectorRasterizer for ResvgRasterizer {
    fn rasterize(&self, markup: &[u8], width: u32, height: u32) -> Result<Bitmap, DecodeError> {
        let tree = usvg::Tree::from_data(markup, &usvg::Options::default())
            .map_err(|e| DecodeError::Parse(e.to_string()))?;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| DecodeError::Decode(format!("cannot allocate a {width}x{height} canvas")))?;

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let pixels = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Bitmap::from_rgba(width, height, pixels)
            .ok_or_else(|| DecodeError::Decode("rasterised buffer does not match canvas size".into()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PsdCompositeDecoder;

impl LegacyRasterDecoder for PsdCompositeDecoder {
    fn decode_composite(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        let psd = psd::Psd::from_bytes(bytes).map_err(|e| DecodeError::Decode(e.to_string()))?;
        Bitmap::from_rgba(psd.width(), psd.height(), psd.rgba())
            .ok_or_else(|| DecodeError::Decode("PSD composite does not match its declared size".into()))
    }
}

/// Walks `pulldown-cmark` events, keeping text and turning block ends into line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownMarkdown;

impl MarkdownConverter for PulldownMarkdown {
    fn to_plain_text(&self, markdown: &str) -> Result<String, DecodeError> {
        let mut out = String::with_capacity(markdown.len());
        for event in Parser::new_ext(markdown, Options::all()) {
            match event {
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::SoftBreak | Event::HardBreak | Event::Rule => out.push('\n'),
                Event::Start(Tag::Item) => out.push_str("- "),
                Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
                Event::End(TagEnd::TableCell) => out.push_str("  "),
                Event::End(end) if ends_block(&end) => {
                    if !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
                _ => {}
            }
        }
        let trimmed = out.trim_end_matches('\n').len();
        out.truncate(trimmed);
        Ok(out)
    }
}

fn ends_block(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::CodeBlock
            | TagEnd::TableHead
            | TagEnd::TableRow
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DxfParser;

impl CadParser for DxfParser {
    fn parse(&self, bytes: &[u8]) -> Result<CadSummary, DecodeError> {
        let drawing = dxf::Drawing::load(&mut Cursor::new(bytes))
            .map_err(|e| DecodeError::Parse(e.to_string()))?;
        Ok(CadSummary {
            entity_count: drawing.entities().count(),
        })
    }
}
