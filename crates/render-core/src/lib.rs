//! Core rendering abstractions for folio's output documents.
//!
//! This crate provides the fundamental traits and types used by output backends:
//! - `DocumentWriter` trait for page creation, image embedding and text drawing
//! - Built-in font metrics needed to place text
//! - Error types for rendering operations
//! - Shared utility functions for encoding and coordinate conversion

mod error;
pub mod fonts;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use fonts::{BuiltinFont, FontSpec};
pub use traits::DocumentWriter;
