//! Page size presets and the per-run page canvas.

use crate::geometry::Size;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageSizeError {
    #[error("Unknown page size: {0}")]
    UnknownSize(String),
    #[error("Unknown orientation: {0}")]
    UnknownOrientation(String),
    #[error("Custom page dimensions must be positive and finite, got {width} x {height}")]
    InvalidCustom { width: f32, height: f32 },
}

/// Named page sizes. `Custom` takes its dimensions from the settings that select it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Tabloid,
    Executive,
    Custom,
}

impl PageSize {
    /// Portrait dimensions in points. `None` for `Custom`.
    pub fn preset_pt(&self) -> Option<(f32, f32)> {
        match self {
            PageSize::A4 => Some((595.28, 841.89)),
            PageSize::Letter => Some((612.0, 792.0)),
            PageSize::Legal => Some((612.0, 1008.0)),
            PageSize::Tabloid => Some((792.0, 1224.0)),
            PageSize::Executive => Some((522.0, 756.0)),
            PageSize::Custom => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
            PageSize::Executive => "Executive",
            PageSize::Custom => "Custom",
        }
    }

    /// Parse a page size name (e.g., "A4", "letter", "TABLOID").
    fn parse(s: &str) -> Result<Self, PageSizeError> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            "tabloid" => Ok(PageSize::Tabloid),
            "executive" => Ok(PageSize::Executive),
            "custom" => Ok(PageSize::Custom),
            _ => Err(PageSizeError::UnknownSize(s.to_string())),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = PageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(PageSizeError::UnknownOrientation(s.to_string())),
        }
    }
}

/// The geometry every page of one output document shares.
///
/// Derived once per conversion run and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCanvas {
    pub width: f32,
    pub height: f32,
    pub orientation: Orientation,
}

impl PageCanvas {
    /// Resolves a preset (or the custom dimensions) and applies the orientation.
    ///
    /// Landscape swaps width and height unconditionally, so a custom size that is
    /// already wider than tall becomes portrait-shaped.
    pub fn resolve(
        size: PageSize,
        orientation: Orientation,
        custom_width: f32,
        custom_height: f32,
    ) -> Result<Self, PageSizeError> {
        let (width, height) = match size.preset_pt() {
            Some(dims) => dims,
            None => {
                let valid = |v: f32| v.is_finite() && v > 0.0;
                if !valid(custom_width) || !valid(custom_height) {
                    return Err(PageSizeError::InvalidCustom {
                        width: custom_width,
                        height: custom_height,
                    });
                }
                (custom_width, custom_height)
            }
        };

        let mut dims = Size::new(width, height);
        if orientation == Orientation::Landscape {
            dims = dims.transposed();
        }

        Ok(Self {
            width: dims.width,
            height: dims.height,
            orientation,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
