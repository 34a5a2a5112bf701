//! PDF writer using lopdf.
//!
//! Pages are assembled one at a time; each finished page's content stream is
//! handed to the lopdf document immediately so only the current page's drawing
//! operations are held in memory.

mod page;
mod renderer;

pub use renderer::LopdfWriter;
