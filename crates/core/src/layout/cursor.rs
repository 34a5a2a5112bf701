/// Where the cursor stands relative to the page it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// A page was just opened and nothing has been placed on it.
    AtTopOfNewPage,
    Placing,
    /// The current page is closed to further content; the next placement opens a page.
    NeedsNewPage,
}

/// The write position inside the output document. Owned by the layout engine.
#[derive(Debug, Clone)]
pub struct Cursor {
    pub page: Option<usize>,
    pub x: f32,
    pub y: f32,
    pub rows_on_page: usize,
    pub state: CursorState,
    margin: f32,
}

impl Cursor {
    pub fn new(margin: f32) -> Self {
        Self {
            page: None,
            x: margin,
            y: margin,
            rows_on_page: 0,
            state: CursorState::NeedsNewPage,
            margin,
        }
    }

    pub fn start_page(&mut self, index: usize) {
        self.page = Some(index);
        self.x = self.margin;
        self.y = self.margin;
        self.rows_on_page = 0;
        self.state = CursorState::AtTopOfNewPage;
    }

    pub fn advance_row(&mut self, line_height: f32) {
        self.y += line_height;
        self.rows_on_page += 1;
        self.state = CursorState::Placing;
    }

    pub fn close_page(&mut self) {
        self.state = CursorState::NeedsNewPage;
    }

    pub fn is_at_page_top(&self) -> bool {
        self.state == CursorState::AtTopOfNewPage
    }

    /// Whether another row of `line_height` fits above the bottom margin of a page `page_height` tall.
    pub fn row_fits(&self, line_height: f32, page_height: f32) -> bool {
        self.y + line_height <= page_height - self.margin
    }
}
