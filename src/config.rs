//! # Label Layout Configuration
//!
//! Geometry and typography for the 35mm square care label.
//!
//! ## Usage
//!
//! ```
//! use carelabel::config::LabelConfig;
//!
//! let config = LabelConfig::default();
//! let coords = config.coordinates();
//! assert_eq!((coords.size.x, coords.size.y), (75, 517));
//! ```
//!
//! All compositing happens on a square canvas of `working_size` pixels. The
//! final physical size only matters when the raster is embedded into the PDF
//! page, which stretches it to `final_size_mm`.
//!
//! ```text
//! px_per_mm     = dpi / 25.4              (300 DPI ≈ 11.81)
//! final_size_px = final_size_mm * px/mm   (35mm → 413px)
//! page_size_pt  = final_size_mm * 72/25.4 (35mm ≈ 99.21pt)
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LabelError;

/// Points per millimeter (72pt per inch).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// A draw position on the working canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Offset moving an anchor right and up (positive `up` moves toward the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightUp {
    pub right: i32,
    pub up: i32,
}

impl RightUp {
    #[inline]
    pub fn apply(&self, base: Point) -> Point {
        Point::new(base.x + self.right, base.y - self.up)
    }
}

/// Offset moving an anchor right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightDown {
    pub right: i32,
    pub down: i32,
}

impl RightDown {
    #[inline]
    pub fn apply(&self, base: Point) -> Point {
        Point::new(base.x + self.right, base.y + self.down)
    }
}

/// Font sizes and line spacing, in working-canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    /// Numeric sizes (36-48)
    pub size_large: f32,
    /// ONE SIZE
    pub size_small: f32,
    pub composition: f32,
    /// Base composition line spacing; rows advance by 1.5x this value.
    pub composition_line_spacing: f32,
    /// Distance between "ONE" and "SIZE".
    pub one_size_line_spacing: i32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            size_large: 180.0,
            size_small: 120.0,
            composition: 40.0,
            composition_line_spacing: 30.0,
            one_size_line_spacing: 120,
        }
    }
}

impl Typography {
    /// Row advance inside the composition block.
    #[inline]
    pub fn composition_row_advance(&self) -> i32 {
        (self.composition_line_spacing * 1.5) as i32
    }
}

/// Final draw positions, computed once from base anchors and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    /// Numeric sizes
    pub size: Point,
    pub size_one_size: Point,
    /// Top-left corner of the rotated composition block
    pub composition: Point,
}

/// # Label Configuration
///
/// Loaded once at startup and read-only afterwards.
///
/// ## Defaults
///
/// | Property | Value |
/// |----------|-------|
/// | Working canvas | 1064×1064 px |
/// | Physical size | 35mm @ 300 DPI |
/// | Size anchor | (80, 470) |
/// | Composition anchor | (750, 420) |
/// | Composition box | 380×240 px |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub working_size: u32,
    pub final_size_mm: f32,
    pub dpi: f32,

    pub typography: Typography,

    pub size_anchor: Point,
    pub composition_anchor: Point,

    /// Offset for numeric sizes
    pub size_offset: RightUp,
    pub one_size_offset: RightUp,
    pub composition_offset: RightDown,

    /// Composition canvas (before rotation)
    pub composition_box: (u32, u32),
    /// Left/top padding inside the composition canvas
    pub composition_padding: i32,
    pub composition_header: String,
    pub max_composition_lines: usize,

    /// Font files tried in order; the first one that loads wins.
    pub font_candidates: Vec<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            working_size: 1064,
            final_size_mm: 35.0,
            dpi: 300.0,
            typography: Typography::default(),
            size_anchor: Point::new(80, 470),
            composition_anchor: Point::new(750, 420),
            size_offset: RightUp { right: -5, up: -47 },
            one_size_offset: RightUp { right: -32, up: -15 },
            composition_offset: RightDown { right: 50, down: 20 },
            composition_box: (380, 240),
            composition_padding: 10,
            composition_header: "СОСТАВ:".to_string(),
            max_composition_lines: 5,
            font_candidates: default_font_candidates(),
        }
    }
}

/// Brand font first, then common system fonts with Cyrillic coverage.
pub fn default_font_candidates() -> Vec<PathBuf> {
    [
        "montserrat-bold.ttf",
        "arial.ttf",
        "/Library/Fonts/Helvetica.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl LabelConfig {
    /// Read a layout override file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, LabelError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            LabelError::Input(format!("Invalid layout file {}: {}", path.display(), e))
        })
    }

    /// Apply offsets to the base anchors.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            size: self.size_offset.apply(self.size_anchor),
            size_one_size: self.one_size_offset.apply(self.size_anchor),
            composition: self.composition_offset.apply(self.composition_anchor),
        }
    }

    #[inline]
    pub fn px_per_mm(&self) -> f32 {
        self.dpi / 25.4
    }

    /// Final label side in print pixels.
    #[inline]
    pub fn final_size_px(&self) -> u32 {
        (self.final_size_mm * self.px_per_mm()) as u32
    }

    /// Ratio between print pixels and working pixels. Informational only:
    /// the working raster is embedded as is and scaled by the PDF page.
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.final_size_px() as f32 / self.working_size as f32
    }

    /// PDF page side in points.
    #[inline]
    pub fn page_size_pt(&self) -> f32 {
        self.final_size_mm * PT_PER_MM
    }

    /// Resolution the working raster ends up printed at.
    #[inline]
    pub fn effective_dpi(&self) -> f32 {
        self.working_size as f32 / (self.final_size_mm / 25.4)
    }
}
