//! Extension-based content classification.

use crate::settings::ConversionSettings;
use serde::Serialize;

/// The closed set of renderable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentKind {
    Image,
    Vector,
    LegacyRaster,
    MarkupText,
    Cad,
    PlainText,
    Unsupported,
}

impl ContentKind {
    /// Kinds gated by `include_images`.
    pub fn is_image_like(&self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Vector | ContentKind::LegacyRaster)
    }

    /// Kinds gated by `include_text`.
    pub fn is_text_like(&self) -> bool {
        matches!(self, ContentKind::MarkupText | ContentKind::Cad | ContentKind::PlainText)
    }

    /// Short label used in processed-entry statuses.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Vector => "SVG",
            ContentKind::LegacyRaster => "PSD",
            ContentKind::MarkupText => "Markdown",
            ContentKind::Cad => "DXF",
            ContentKind::PlainText => "text",
            ContentKind::Unsupported => "unsupported",
        }
    }
}

/// Classifies by the file extension alone, ignoring case. Content is never sniffed.
pub fn classify(name: &str) -> ContentKind {
    let Some((_, extension)) = name.rsplit_once('.') else {
        return ContentKind::Unsupported;
    };
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => ContentKind::Image,
        "svg" => ContentKind::Vector,
        "psd" => ContentKind::LegacyRaster,
        "md" => ContentKind::MarkupText,
        "dxf" => ContentKind::Cad,
        "txt" | "csv" | "log" => ContentKind::PlainText,
        _ => ContentKind::Unsupported,
    }
}

/// Classifies, then reclassifies kinds the settings exclude as `Unsupported`.
pub fn classify_with(name: &str, settings: &ConversionSettings) -> ContentKind {
    let kind = classify(name);
    if (kind.is_image_like() && !settings.include_images)
        || (kind.is_text_like() && !settings.include_text)
    {
        ContentKind::Unsupported
    } else {
        kind
    }
}
