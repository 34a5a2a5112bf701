//! Drawing context for the page currently being written.

use folio_render_core::utils::{flip_y, to_win_ansi};
use folio_render_core::FontSpec;
use folio_types::Rect;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, StringFormat};

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
}

pub(crate) struct PageContext {
    pub(crate) width: f32,
    pub(crate) height: f32,
    content: Content,
    state: PageRenderState,
    xobjects: Dictionary,
}

impl PageContext {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Content { operations: vec![] },
            state: Default::default(),
            xobjects: Dictionary::new(),
        }
    }

    pub(crate) fn draw_image(&mut self, resource_name: String, image_id: ObjectId, rect: Rect) {
        let ops = &mut self.content.operations;
        let pdf_y = flip_y(rect.bottom(), self.height);
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                pdf_y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(resource_name.as_bytes().to_vec())]));
        ops.push(Operation::new("Q", vec![]));
        self.xobjects.set(resource_name.into_bytes(), image_id);
    }

    pub(crate) fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, font_name: &str, spec: FontSpec) {
        if text.trim().is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(font_name, spec.size);
        let pdf_y = flip_y(baseline_y, self.height);
        self.content.operations.push(Operation::new("Td", vec![x.into(), pdf_y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }

    fn set_font(&mut self, font_name: &str, size: f32) {
        if self.state.font_name != font_name || self.state.font_size != size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font_name.as_bytes().to_vec()), size.into()],
            ));
            self.state.font_name = font_name.to_string();
            self.state.font_size = size;
        }
    }

    pub(crate) fn finish(self) -> (Content, Dictionary) {
        (self.content, self.xobjects)
    }
}
