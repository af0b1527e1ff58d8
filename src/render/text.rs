//! Text drawing onto RGB canvases.
//!
//! The origin passed to [`draw_text`] is the top-left corner of the line
//! (ascender line), not the baseline.

use ab_glyph::{Font, GlyphId, ScaleFont, point};
use image::{Rgb, RgbImage};

use super::font::{BUILTIN_GLYPH_H, BUILTIN_GLYPH_W, LabelFont, Typeface, builtin_glyph};
use crate::config::Point;

/// Draw a single line of text.
pub fn draw_text(canvas: &mut RgbImage, text: &str, origin: Point, font: &LabelFont, color: Rgb<u8>) {
    match &font.face {
        Typeface::Outline(face) => draw_outline(canvas, text, origin, face, font.px, color),
        Typeface::Builtin => draw_builtin(canvas, text, origin, font.builtin_scale(), color),
    }
}

fn draw_outline<F: Font>(
    canvas: &mut RgbImage,
    text: &str,
    origin: Point,
    face: &F,
    px: f32,
    color: Rgb<u8>,
) {
    let scaled = face.as_scaled(px);
    let baseline = origin.y as f32 + scaled.ascent();
    let mut caret = origin.x as f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = face.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(px, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                blend_pixel(canvas, x, y, color, coverage);
            });
        }
    }
}

fn draw_builtin(canvas: &mut RgbImage, text: &str, origin: Point, scale: u32, color: Rgb<u8>) {
    let advance = (BUILTIN_GLYPH_W * scale) as i32;
    let mut caret = origin.x;

    for ch in text.chars() {
        match builtin_glyph(ch) {
            Some(bitmap) => {
                for gy in 0..BUILTIN_GLYPH_H {
                    for gx in 0..BUILTIN_GLYPH_W {
                        if bitmap[(gy * BUILTIN_GLYPH_W + gx) as usize] {
                            fill_block(
                                canvas,
                                caret + (gx * scale) as i32,
                                origin.y + (gy * scale) as i32,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            None => draw_box(canvas, caret, origin.y, scale, color),
        }
        caret += advance;
    }
}

/// Outline box for characters the bitmap font does not cover.
fn draw_box(canvas: &mut RgbImage, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let (w, h) = (BUILTIN_GLYPH_W as i32, BUILTIN_GLYPH_H as i32);
    for gy in 2..h - 2 {
        for gx in 1..w - 1 {
            let edge = gy == 2 || gy == h - 3 || gx == 1 || gx == w - 2;
            if edge {
                fill_block(canvas, x + gx * scale as i32, y + gy * scale as i32, scale, color);
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, x: i32, y: i32, size: u32, color: Rgb<u8>) {
    for dy in 0..size as i32 {
        for dx in 0..size as i32 {
            blend_pixel(canvas, x + dx, y + dy, color, 1.0);
        }
    }
}

/// Mix `color` into the pixel at (x, y) by `coverage`. Out-of-bounds
/// writes are dropped.
#[inline]
fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let mixed = dst[c] as f32 * (1.0 - alpha) + color[c] as f32 * alpha;
        dst[c] = mixed.round() as u8;
    }
}
