//! Shared fixtures for unit tests in this crate.

use crate::content::decoders::{
    BitmapDecoder, CadParser, CadSummary, LegacyRasterDecoder, MarkdownConverter, VectorRasterizer,
};
use crate::error::DecodeError;
use folio_render_core::{DocumentWriter, FontSpec, RenderError};
use folio_types::{Bitmap, Rect};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png fixture");
    out.into_inner()
}

/// A flat 8-bit RGB PSD with no layers, filled with one colour.
pub fn psd_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"8BPS");
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(&3u16.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&8u16.to_be_bytes());
    out.extend_from_slice(&3u16.to_be_bytes());
    // colour mode data, image resources, layer and mask info: all empty
    for _ in 0..3 {
        out.extend_from_slice(&0u32.to_be_bytes());
    }
    // raw planar composite
    out.extend_from_slice(&0u16.to_be_bytes());
    let plane = (width * height) as usize;
    for channel in rgb {
        out.extend(std::iter::repeat_n(channel, plane));
    }
    out
}

/// A drawing with a single line entity.
pub const MINIMAL_DXF: &str = "  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n10.0\n 21\n10.0\n 31\n0.0\n  0\nENDSEC\n  0\nEOF\n";

/// Builds a zip buffer; names ending in `/` become directory records.
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add directory");
        } else {
            writer.start_file(*name, options).expect("start file");
            writer.write_all(bytes).expect("write file");
        }
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Rewrites the uncompressed size every central directory header declares.
pub fn with_declared_size(mut zip: Vec<u8>, size: u32) -> Vec<u8> {
    let starts: Vec<usize> = zip
        .windows(4)
        .enumerate()
        .filter(|(_, w)| *w == b"PK\x01\x02")
        .map(|(i, _)| i)
        .collect();
    for start in starts {
        zip[start + 24..start + 28].copy_from_slice(&size.to_le_bytes());
    }
    zip
}

/// Fails every call with the given message.
#[derive(Debug, Clone)]
pub struct FailingDecoder(pub String);

impl BitmapDecoder for FailingDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        Err(DecodeError::Decode(self.0.clone()))
    }
}

impl VectorRasterizer for FailingDecoder {
    fn rasterize(&self, _markup: &[u8], _width: u32, _height: u32) -> Result<Bitmap, DecodeError> {
        Err(DecodeError::Parse(self.0.clone()))
    }
}

impl MarkdownConverter for FailingDecoder {
    fn to_plain_text(&self, _markdown: &str) -> Result<String, DecodeError> {
        Err(DecodeError::Parse(self.0.clone()))
    }
}

impl CadParser for FailingDecoder {
    fn parse(&self, _bytes: &[u8]) -> Result<CadSummary, DecodeError> {
        Err(DecodeError::Parse(self.0.clone()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanickingDecoder;

impl LegacyRasterDecoder for PanickingDecoder {
    fn decode_composite(&self, _bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        panic!("layer table truncated")
    }
}

impl BitmapDecoder for PanickingDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        panic!("corrupt huffman table")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AcceptingCadParser;

impl CadParser for AcceptingCadParser {
    fn parse(&self, _bytes: &[u8]) -> Result<CadSummary, DecodeError> {
        Ok(CadSummary { entity_count: 0 })
    }
}

/// One call observed by a [`RecordingWriter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    BeginPage { width: f32, height: f32 },
    Image { width: u32, height: u32, rect: Rect },
    Text { text: String, x: f32, baseline_y: f32, size: f32 },
    DiscardPage,
}

/// A [`DocumentWriter`] that records calls instead of producing a document.
///
/// The log is shared so it stays readable after the writer is boxed and consumed.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    ops: Arc<Mutex<Vec<Op>>>,
    pages: usize,
    page_open: bool,
    fail_images: bool,
}

impl RecordingWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<Op>>>) {
        let writer = Self::default();
        let ops = Arc::clone(&writer.ops);
        (writer, ops)
    }

    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }
}

impl DocumentWriter for RecordingWriter {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<usize, RenderError> {
        self.ops.lock().unwrap().push(Op::BeginPage { width, height });
        self.pages += 1;
        self.page_open = true;
        Ok(self.pages - 1)
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), RenderError> {
        if self.pages == 0 {
            return Err(RenderError::NoPage);
        }
        if self.fail_images {
            return Err(RenderError::InvalidImage("rejected by test writer".into()));
        }
        self.ops.lock().unwrap().push(Op::Image {
            width: bitmap.width,
            height: bitmap.height,
            rect,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, font: FontSpec) -> Result<(), RenderError> {
        if self.pages == 0 {
            return Err(RenderError::NoPage);
        }
        self.ops.lock().unwrap().push(Op::Text {
            text: text.to_string(),
            x,
            baseline_y,
            size: font.size,
        });
        Ok(())
    }

    fn discard_page(&mut self) {
        if self.page_open {
            self.ops.lock().unwrap().push(Op::DiscardPage);
            self.pages -= 1;
            self.page_open = false;
        }
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        Ok(format!("pages={}", self.pages).into_bytes())
    }
}
