pub mod bitmap;
pub mod geometry;
pub mod page;

pub use bitmap::Bitmap;
pub use geometry::{Rect, Size};
pub use page::{Orientation, PageCanvas, PageSize, PageSizeError};
