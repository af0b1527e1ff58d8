//! # Label Compositing
//!
//! Draws the size and composition regions onto a template image.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────── 1064 ──┐
//! │                                        │
//! │                             ┌────────┐ │
//! │  36                         │ rotated│ │
//! │ (size anchor)               │ СОСТАВ:│ │
//! │                             │ block  │ │
//! │                             └────────┘ │
//! └────────────────────────────────────────┘
//! ```
//!
//! The composition block is rendered on its own 380×240 canvas with the
//! inverse of the text color as background, rotated 90° clockwise, and
//! pasted at the composition anchor. It always reads vertically, whatever
//! the number of lines.
//!
//! ## Modules
//!
//! - [`font`]: Priority-ordered font resolution with bitmap fallback
//! - [`text`]: Drawing text lines onto RGB canvases

pub mod font;
pub mod text;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::catalog::{LabelColor, Size};
use crate::config::{Coordinates, LabelConfig, Point};
use font::{FontResolver, LabelFont};

/// Where and how the size region is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLayout {
    pub font_px: f32,
    /// Each line with its top-left draw position.
    pub lines: Vec<(String, Point)>,
}

/// Lay out the size region.
///
/// ONE SIZE uses the small font and its own anchor, with "SIZE" drawn one
/// fixed line spacing below "ONE". Numeric sizes are a single line at the
/// shared numeric anchor.
pub fn size_layout(config: &LabelConfig, coords: &Coordinates, size: Size) -> SizeLayout {
    if size.is_one_size() {
        let anchor = coords.size_one_size;
        let below = Point::new(anchor.x, anchor.y + config.typography.one_size_line_spacing);
        SizeLayout {
            font_px: config.typography.size_small,
            lines: vec![("ONE".to_string(), anchor), ("SIZE".to_string(), below)],
        }
    } else {
        SizeLayout {
            font_px: config.typography.size_large,
            lines: vec![(size.as_str().to_string(), coords.size)],
        }
    }
}

/// Render the unrotated composition block: header, then one row per line.
pub fn composition_block(
    config: &LabelConfig,
    font: &LabelFont,
    lines: &[String],
    color: LabelColor,
) -> RgbImage {
    let (width, height) = config.composition_box;
    let mut block = RgbImage::from_pixel(width, height, color.background_color());
    let text_color = color.text_color();
    let pad = config.composition_padding;
    let advance = config.typography.composition_row_advance();

    text::draw_text(
        &mut block,
        &config.composition_header,
        Point::new(pad, pad),
        font,
        text_color,
    );

    let mut y = pad + advance;
    for (i, line) in lines.iter().enumerate() {
        text::draw_text(&mut block, line, Point::new(pad, y), font, text_color);
        log::debug!("Composition line {}: {}", i + 1, line);
        y += advance;
    }

    block
}

/// Composite one label onto a working-resolution copy of `template`.
///
/// `composition` holds already-formatted lines. Pure in-memory operation.
pub fn compose_label(
    template: &DynamicImage,
    config: &LabelConfig,
    coords: &Coordinates,
    fonts: &FontResolver,
    size: Size,
    composition: &[String],
    color: LabelColor,
) -> RgbImage {
    let side = config.working_size;
    let mut label = imageops::resize(&template.to_rgb8(), side, side, FilterType::Lanczos3);
    let text_color = color.text_color();

    // Size region
    let layout = size_layout(config, coords, size);
    let size_font = fonts.resolve(layout.font_px);
    for (line, at) in &layout.lines {
        text::draw_text(&mut label, line, *at, &size_font, text_color);
    }
    log::debug!("Size {} drawn at ({}, {})", size, layout.lines[0].1.x, layout.lines[0].1.y);

    // Composition region, read top to bottom
    let composition_font = fonts.resolve(config.typography.composition);
    let block = composition_block(config, &composition_font, composition, color);
    let rotated = imageops::rotate90(&block);
    imageops::replace(
        &mut label,
        &rotated,
        coords.composition.x as i64,
        coords.composition.y as i64,
    );

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use pretty_assertions::assert_eq;

    fn setup() -> (LabelConfig, Coordinates) {
        let config = LabelConfig::default();
        let coords = config.coordinates();
        (config, coords)
    }

    fn has_ink_in_rows(img: &RgbImage, rows: std::ops::Range<u32>, bg: Rgb<u8>) -> bool {
        rows.flat_map(|y| (0..img.width()).map(move |x| (x, y)))
            .any(|(x, y)| *img.get_pixel(x, y) != bg)
    }

    #[test]
    fn test_numeric_sizes_use_shared_anchor() {
        let (config, coords) = setup();
        for size in Size::ALL.iter().filter(|s| !s.is_one_size()) {
            let layout = size_layout(&config, &coords, *size);
            assert_eq!(layout.font_px, 180.0);
            assert_eq!(layout.lines, vec![(size.to_string(), Point::new(75, 517))]);
        }
    }

    #[test]
    fn test_one_size_two_line_layout() {
        let (config, coords) = setup();
        let layout = size_layout(&config, &coords, Size::OneSize);
        assert_eq!(layout.font_px, 120.0);
        assert_eq!(
            layout.lines,
            vec![
                ("ONE".to_string(), Point::new(48, 485)),
                ("SIZE".to_string(), Point::new(48, 605)),
            ]
        );
    }

    #[test]
    fn test_composition_block_background_is_inverse() {
        let (config, _) = setup();
        let font = LabelFont::builtin(40.0);
        let white = composition_block(&config, &font, &[], LabelColor::White);
        let black = composition_block(&config, &font, &[], LabelColor::Black);

        assert_eq!(white.dimensions(), (380, 240));
        assert_eq!(*white.get_pixel(379, 239), Rgb([255, 255, 255]));
        assert_eq!(*black.get_pixel(379, 239), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_empty_composition_renders_header_only() {
        let (config, _) = setup();
        let font = LabelFont::builtin(40.0);
        let bg = LabelColor::White.background_color();
        let block = composition_block(&config, &font, &[], LabelColor::White);

        // Header occupies rows 10..58 (24px glyphs at 2x)
        assert!(has_ink_in_rows(&block, 10..58, bg));
        assert!(!has_ink_in_rows(&block, 60..240, bg));
    }

    #[test]
    fn test_composition_rows_advance() {
        let (config, _) = setup();
        let font = LabelFont::builtin(40.0);
        let bg = LabelColor::White.background_color();
        let lines = vec!["95% COTTON".to_string(), "5% ELASTANE".to_string()];
        let block = composition_block(&config, &font, &lines, LabelColor::White);

        // Second material line starts at 10 + 2 * 45
        assert!(has_ink_in_rows(&block, 100..148, bg));
        assert!(!has_ink_in_rows(&block, 150..240, bg));
    }

    #[test]
    fn test_compose_label_working_resolution_and_rotated_block() {
        let (config, coords) = setup();
        let template = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, Rgb([128, 128, 128])));
        let fonts = FontResolver::builtin();
        let label = compose_label(
            &template,
            &config,
            &coords,
            &fonts,
            Size::S36,
            &["100% SILK".to_string()],
            LabelColor::White,
        );

        assert_eq!(label.dimensions(), (1064, 1064));
        // Rotated block spans 240×380 from the composition anchor; its
        // bottom-left corner is untouched background.
        assert_eq!(*label.get_pixel(800, 440 + 379), Rgb([255, 255, 255]));
        // Just outside the block the template shows through.
        assert_eq!(*label.get_pixel(800 + 240, 440), Rgb([128, 128, 128]));
        assert_eq!(*label.get_pixel(799, 440), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_black_label_gets_white_text() {
        let (config, coords) = setup();
        let template = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([0, 0, 0])));
        let label = compose_label(
            &template,
            &config,
            &coords,
            &FontResolver::builtin(),
            Size::OneSize,
            &[],
            LabelColor::Black,
        );
        // "ONE" is drawn in white around the ONE SIZE anchor
        let region_has_white = (485..485 + 120)
            .flat_map(|y| (48..48 + 180).map(move |x| (x, y)))
            .any(|(x, y)| *label.get_pixel(x, y) == Rgb([255, 255, 255]));
        assert!(region_has_white);
    }
}
