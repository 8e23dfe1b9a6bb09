use crate::atlas::{AtlasError, GlyphAtlas};
use crate::texture::TextureSink;

use super::font_system::{FontId, FontSystem};

/// One textured quad of a laid-out line, in +Y-down target pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphQuad {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// `[u0, v0, u1, v1]` in the atlas texture.
    pub uv: [f32; 4],
}

/// Glyph quads for a single line plus the total pen travel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRun {
    pub quads: Vec<GlyphQuad>,
    pub advance: f32,
}

/// Places `text` on one line starting at the pen position `origin`
/// (`origin.1` is the baseline).
///
/// The pen moves by each glyph's advance plus pair kerning. Quad corners are
/// snapped to whole pixels so glyph texels map 1:1 onto the target. No line
/// breaking happens here; control characters (including `'\n'`) are skipped.
/// Glyphs that come back invisible (spaces, a full atlas) emit no quad but
/// still advance the pen by whatever advance they report.
pub fn layout_line<S: TextureSink>(
    atlas: &mut GlyphAtlas<S>,
    fonts: &FontSystem,
    font: FontId,
    size: f32,
    text: &str,
    origin: (f32, f32),
) -> Result<LineRun, AtlasError> {
    let (origin_x, baseline) = origin;
    let mut pen_x = origin_x;
    let mut quads = Vec::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for ch in text.chars().filter(|c| !c.is_control()) {
        if let Some(p) = prev {
            pen_x += fonts.kerning_px(font, p, ch, size);
        }

        let glyph = atlas.get_or_create(fonts, font, size, ch)?;
        if glyph.is_visible() {
            quads.push(GlyphQuad {
                ch,
                x: (pen_x + glyph.x_offset as f32).round(),
                y: (baseline - glyph.y_offset as f32).round(),
                width: glyph.width as f32,
                height: glyph.height as f32,
                uv: glyph.uv(),
            });
        }

        pen_x += glyph.x_advance;
        prev = Some(ch);
    }

    Ok(LineRun { quads, advance: pen_x - origin_x })
}
