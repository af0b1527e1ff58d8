//! # Label Catalog
//!
//! Fixed enumerations of what a label can be printed for (garment size,
//! label color, care variant) and the store that maps a care variant and
//! color to its pre-made template image.
//!
//! | Care type | White template | Black template |
//! |-----------|----------------|----------------|
//! | washable | `Group-307.jpg` | `Group-308.jpg` |
//! | not washable | `Group-305.jpg` | `Group-306.jpg` |

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::LabelError;

/// Garment size printed in the size region of the label.
///
/// `OneSize` is laid out on two lines with its own font size and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "36")]
    S36,
    #[serde(rename = "38")]
    S38,
    #[serde(rename = "40")]
    S40,
    #[serde(rename = "42")]
    S42,
    #[serde(rename = "44")]
    S44,
    #[serde(rename = "46")]
    S46,
    #[serde(rename = "48")]
    S48,
    #[serde(rename = "ONE SIZE")]
    OneSize,
}

impl Size {
    /// Every size, in print order.
    pub const ALL: [Size; 8] = [
        Size::S36,
        Size::S38,
        Size::S40,
        Size::S42,
        Size::S44,
        Size::S46,
        Size::S48,
        Size::OneSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S36 => "36",
            Size::S38 => "38",
            Size::S40 => "40",
            Size::S42 => "42",
            Size::S44 => "44",
            Size::S46 => "46",
            Size::S48 => "48",
            Size::OneSize => "ONE SIZE",
        }
    }

    #[inline]
    pub fn is_one_size(&self) -> bool {
        matches!(self, Size::OneSize)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("ONE SIZE") {
            return Ok(Size::OneSize);
        }
        Size::ALL
            .iter()
            .copied()
            .find(|size| size.as_str() == token)
            .ok_or_else(|| LabelError::Input(format!("Unknown size '{}'", token)))
    }
}

/// Label stock color. The text is always printed in the opposite color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    White,
    Black,
}

impl LabelColor {
    pub const ALL: [LabelColor; 2] = [LabelColor::White, LabelColor::Black];

    /// Key used on the command line and in the web form.
    pub fn key(&self) -> &'static str {
        match self {
            LabelColor::White => "white",
            LabelColor::Black => "black",
        }
    }

    /// Name used in output file names.
    pub fn display_name(&self) -> &'static str {
        match self {
            LabelColor::White => "белый",
            LabelColor::Black => "чёрный",
        }
    }

    pub fn text_color(&self) -> Rgb<u8> {
        match self {
            LabelColor::White => Rgb([0, 0, 0]),
            LabelColor::Black => Rgb([255, 255, 255]),
        }
    }

    /// Inverse of [`text_color`](Self::text_color), used behind the
    /// composition block.
    pub fn background_color(&self) -> Rgb<u8> {
        let Rgb([r, g, b]) = self.text_color();
        Rgb([255 - r, 255 - g, 255 - b])
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LabelColor {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(LabelColor::White),
            "black" => Ok(LabelColor::Black),
            other => Err(LabelError::Input(format!("Unknown color '{}'", other))),
        }
    }
}

/// Care-instruction variant printed on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    Washable,
    NotWashable,
}

impl CareType {
    pub const ALL: [CareType; 2] = [CareType::Washable, CareType::NotWashable];

    pub fn key(&self) -> &'static str {
        match self {
            CareType::Washable => "washable",
            CareType::NotWashable => "not_washable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CareType::Washable => "стирать можно",
            CareType::NotWashable => "стирать нельзя",
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CareType {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "washable" => Ok(CareType::Washable),
            "not_washable" | "not-washable" => Ok(CareType::NotWashable),
            other => Err(LabelError::Input(format!("Unknown care type '{}'", other))),
        }
    }
}

/// Maps `(care type, color)` to a template image path.
///
/// File names are resolved against `base_dir`. A store may be partial;
/// lookups for unmapped combinations return `None`.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    base_dir: PathBuf,
    entries: HashMap<(CareType, LabelColor), PathBuf>,
}

impl TemplateStore {
    /// Empty store rooted at `base_dir`.
    pub fn empty(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// The brand's four stock templates, rooted at `base_dir`.
    pub fn standard(base_dir: impl Into<PathBuf>) -> Self {
        Self::empty(base_dir)
            .with(CareType::Washable, LabelColor::White, "Group-307.jpg")
            .with(CareType::Washable, LabelColor::Black, "Group-308.jpg")
            .with(CareType::NotWashable, LabelColor::White, "Group-305.jpg")
            .with(CareType::NotWashable, LabelColor::Black, "Group-306.jpg")
    }

    /// Add or replace a mapping.
    pub fn with(mut self, care: CareType, color: LabelColor, file: impl Into<PathBuf>) -> Self {
        self.entries.insert((care, color), file.into());
        self
    }

    /// Resolved template path, if the combination is mapped.
    pub fn lookup(&self, care: CareType, color: LabelColor) -> Option<PathBuf> {
        self.entries
            .get(&(care, color))
            .map(|file| self.base_dir.join(file))
    }
}
