//! Font resolution for label text.
//!
//! Candidate font files are tried in order and the first one that parses is
//! used for every text region. When nothing loads, text falls back to the
//! Spleen 12x24 bitmap font scaled to the requested size. A missing font
//! never fails a render; it only degrades how the label looks.

use ab_glyph::FontArc;
use spleen_font::{FONT_12X24, PSF2Font};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::LabelError;

/// Built-in bitmap glyph width in pixels.
pub const BUILTIN_GLYPH_W: u32 = 12;
/// Built-in bitmap glyph height in pixels.
pub const BUILTIN_GLYPH_H: u32 = 24;

/// A loaded face.
#[derive(Clone)]
pub enum Typeface {
    /// TrueType/OpenType outlines, rendered anti-aliased.
    Outline(FontArc),
    /// Spleen 12x24, scaled by an integer factor.
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
            Typeface::Builtin => f.write_str("Typeface::Builtin"),
        }
    }
}

/// A face at a given pixel size.
#[derive(Debug, Clone)]
pub struct LabelFont {
    pub face: Typeface,
    pub px: f32,
}

impl LabelFont {
    /// The built-in bitmap face at `px`.
    pub fn builtin(px: f32) -> Self {
        Self {
            face: Typeface::Builtin,
            px,
        }
    }

    /// Integer upscale applied to built-in glyphs to approach `px`.
    #[inline]
    pub fn builtin_scale(&self) -> u32 {
        ((self.px / BUILTIN_GLYPH_H as f32).round() as u32).max(1)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Typeface::Builtin)
    }
}

/// Priority-ordered font resolver.
///
/// The winning face is cached for the lifetime of the resolver, so the
/// candidate list is probed once no matter how many labels are rendered.
#[derive(Debug, Default)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
    face: OnceLock<Typeface>,
}

impl FontResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            face: OnceLock::new(),
        }
    }

    /// Resolver that always uses the built-in bitmap font.
    pub fn builtin() -> Self {
        Self::new(Vec::new())
    }

    /// Font for text drawn `px` pixels tall.
    pub fn resolve(&self, px: f32) -> LabelFont {
        LabelFont {
            face: self.face().clone(),
            px,
        }
    }

    fn face(&self) -> &Typeface {
        self.face.get_or_init(|| load_first(&self.candidates))
    }
}

/// Return the first candidate that loads, or the built-in face.
pub fn load_first(candidates: &[PathBuf]) -> Typeface {
    for path in candidates {
        match load_font_file(path) {
            Ok(font) => {
                log::info!("Using font {}", path.display());
                return Typeface::Outline(font);
            }
            Err(e) => log::debug!("Skipping font candidate {}: {}", path.display(), e),
        }
    }

    log::warn!("No font candidate could be loaded, falling back to the built-in bitmap font");
    Typeface::Builtin
}

fn load_font_file(path: &Path) -> Result<FontArc, LabelError> {
    let bytes = std::fs::read(path)?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| LabelError::Font(format!("{}: {}", path.display(), e)))
}

/// Bitmap for one built-in glyph, row-major, `true` = ink.
///
/// Returns `None` when the character is not covered by the font.
pub fn builtin_glyph(ch: char) -> Option<Vec<bool>> {
    let mut font = PSF2Font::new(FONT_12X24).ok()?;
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;

    let (w, h) = (BUILTIN_GLYPH_W as usize, BUILTIN_GLYPH_H as usize);
    let mut bitmap = vec![false; w * h];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < h && col_x < w {
                bitmap[row_y * w + col_x] = on;
            }
        }
    }
    Some(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_candidates_fall_back_to_builtin() {
        let resolver = FontResolver::new(vec![
            PathBuf::from("/nonexistent/font-a.ttf"),
            PathBuf::from("/nonexistent/font-b.ttf"),
        ]);
        let font = resolver.resolve(40.0);
        assert!(font.is_builtin());
        assert_eq!(font.px, 40.0);
    }

    #[test]
    fn test_invalid_font_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();

        let resolver = FontResolver::new(vec![bogus]);
        assert!(resolver.resolve(120.0).is_builtin());
    }

    #[test]
    fn test_builtin_scale() {
        assert_eq!(LabelFont::builtin(40.0).builtin_scale(), 2);
        assert_eq!(LabelFont::builtin(120.0).builtin_scale(), 5);
        assert_eq!(LabelFont::builtin(180.0).builtin_scale(), 8);
        assert_eq!(LabelFont::builtin(5.0).builtin_scale(), 1);
    }

    #[test]
    fn test_builtin_glyph_has_ink() {
        let glyph = builtin_glyph('4').expect("digits are covered");
        assert_eq!(glyph.len(), (BUILTIN_GLYPH_W * BUILTIN_GLYPH_H) as usize);
        assert!(glyph.iter().any(|&on| on));

        let space = builtin_glyph(' ').expect("space is covered");
        assert!(space.iter().all(|&on| !on));
    }
}
