use crate::page::PageContext;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use folio_render_core::{BuiltinFont, DocumentWriter, FontSpec, RenderError};
use folio_types::{Bitmap, Rect};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::io::Write;

const PRODUCER: &str = "folio";

fn pdf_error(err: lopdf::Error) -> RenderError {
    RenderError::Pdf(err.to_string())
}

/// A [`DocumentWriter`] producing PDF through `lopdf`.
///
/// Text uses the non-embedded standard Helvetica faces with WinAnsi encoding.
/// Images become Flate-compressed DeviceRGB XObjects with alpha flattened onto white.
pub struct LopdfWriter {
    doc: Document,
    pages_id: ObjectId,
    fonts_id: ObjectId,
    font_map: HashMap<BuiltinFont, String>,
    current: Option<PageContext>,
    page_ids: Vec<ObjectId>,
    image_count: usize,
    title: String,
}

impl LopdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_map = HashMap::new();
        let mut font_dict = Dictionary::new();
        for (i, font) in BuiltinFont::ALL.iter().enumerate() {
            let internal_name = format!("F{}", i + 1);
            let single_font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            };
            font_dict.set(internal_name.as_bytes(), Object::Dictionary(single_font_dict));
            font_map.insert(*font, internal_name);
        }
        let fonts_id = doc.add_object(font_dict);

        Self {
            doc,
            pages_id,
            fonts_id,
            font_map,
            current: None,
            page_ids: Vec::new(),
            image_count: 0,
            title: title.into(),
        }
    }

    fn current_page(&mut self) -> Result<&mut PageContext, RenderError> {
        self.current.as_mut().ok_or(RenderError::NoPage)
    }

    /// Writes the in-progress page's content stream and page object.
    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };
        let (width, height) = (page.width, page.height);
        let (content, xobjects) = page.finish();

        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = self.doc.add_object(deflated_stream(dictionary! {}, &encoded)?);

        let mut resources = dictionary! { "Font" => self.fonts_id };
        if !xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    fn page_total(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }
}

impl DocumentWriter for LopdfWriter {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<usize, RenderError> {
        self.flush_page()?;
        self.current = Some(PageContext::new(width, height));
        Ok(self.page_ids.len())
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), RenderError> {
        if bitmap.is_empty() {
            return Err(RenderError::InvalidImage("image has no pixels".into()));
        }
        // Fail before allocating the XObject when no page is open.
        self.current_page()?;

        let rgb = bitmap.to_rgb_on_white();
        let image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bitmap.width as i64,
            "Height" => bitmap.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        let image_id = self.doc.add_object(deflated_stream(image_dict, &rgb)?);

        self.image_count += 1;
        let resource_name = format!("Im{}", self.image_count);
        self.current_page()?.draw_image(resource_name, image_id, rect);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, font: FontSpec) -> Result<(), RenderError> {
        let font_name = self
            .font_map
            .get(&font.font)
            .cloned()
            .ok_or_else(|| RenderError::Other(format!("Font not registered: {}", font.font.postscript_name())))?;
        self.current_page()?.draw_text(text, x, baseline_y, &font_name, font);
        Ok(())
    }

    fn discard_page(&mut self) {
        let Some(page) = self.current.take() else {
            return;
        };
        let (_, xobjects) = page.finish();
        for (_, object) in xobjects.iter() {
            if let Ok(id) = object.as_reference() {
                self.doc.objects.remove(&id);
            }
        }
    }

    fn page_count(&self) -> usize {
        self.page_total()
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let mut writer = *self;
        writer.flush_page()?;

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => writer.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => writer.page_ids.len() as i64,
        };
        writer.doc.objects.insert(writer.pages_id, pages_dict.into());

        let catalog_id = writer.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => writer.pages_id,
        });
        let info_id = writer.doc.add_object(dictionary! {
            "Title" => lopdf::text_string(&writer.title),
            "Producer" => lopdf::text_string(PRODUCER),
        });
        writer.doc.trailer.set("Root", catalog_id);
        writer.doc.trailer.set("Info", info_id);

        log::debug!(
            "Serialising PDF '{}' with {} pages and {} images",
            writer.title,
            writer.page_ids.len(),
            writer.image_count
        );

        let mut buffer = Vec::new();
        writer
            .doc
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(buffer)
    }
}

fn deflated_stream(mut dict: Dictionary, data: &[u8]) -> Result<Stream, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    dict.set("Filter", "FlateDecode");
    let mut stream = Stream::new(dict, compressed);
    stream.allows_compression = false;
    Ok(stream)
}
