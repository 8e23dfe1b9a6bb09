use crate::text::FontId;

use super::error::AtlasError;

/// Cache key: font, pixel size and codepoint.
///
/// The pixel size is stored as its bit pattern so the key is `Eq + Hash`;
/// sizes that differ in any bit are distinct glyphs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GlyphKey {
    pub font: FontId,
    size_bits: u32,
    pub ch: char,
}

impl GlyphKey {
    /// Validates `size` (finite, > 0) and builds the key.
    pub fn new(font: FontId, size: f32, ch: char) -> Result<Self, AtlasError> {
        if !(size.is_finite() && size > 0.0) {
            log::error!("glyph {ch:?} requested at invalid pixel size {size}");
            return Err(AtlasError::InvalidPixelSize(size));
        }
        // 0.0 and -0.0 are rejected above, so bits are canonical.
        Ok(Self { font, size_bits: size.to_bits(), ch })
    }

    #[inline]
    pub fn size(&self) -> f32 {
        f32::from_bits(self.size_bits)
    }
}

/// Where a glyph lives in the atlas and how to place it on screen.
///
/// `x_offset` / `y_offset` locate the bitmap's top-left pixel relative to the
/// pen: draw at `(pen_x + x_offset, baseline_y - y_offset)` in +Y-down space,
/// then advance the pen by `x_advance`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PlacementRecord {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    /// Bitmap size in pixels.
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Horizontal pen advance in pixels.
    pub x_advance: f32,
}

impl PlacementRecord {
    /// Zero-size record returned when a glyph cannot be placed. Callers draw
    /// nothing for it.
    pub const INVISIBLE: PlacementRecord = PlacementRecord {
        u0: 0.0,
        v0: 0.0,
        u1: 0.0,
        v1: 0.0,
        width: 0,
        height: 0,
        x_offset: 0,
        y_offset: 0,
        x_advance: 0.0,
    };

    /// True when the record has pixels to draw.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// UV rectangle as `[u0, v0, u1, v1]`.
    #[inline]
    pub fn uv(&self) -> [f32; 4] {
        [self.u0, self.v0, self.u1, self.v1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_rejects_bad_sizes() {
        let f = FontId::new(0);
        assert_eq!(GlyphKey::new(f, 0.0, 'a'), Err(AtlasError::InvalidPixelSize(0.0)));
        assert!(GlyphKey::new(f, -3.0, 'a').is_err());
        assert!(GlyphKey::new(f, f32::NAN, 'a').is_err());
        assert!(GlyphKey::new(f, f32::INFINITY, 'a').is_err());
    }

    #[test]
    fn key_round_trips_size() {
        let k = GlyphKey::new(FontId::new(1), 13.5, 'x').unwrap();
        assert_eq!(k.size(), 13.5);
    }

    #[test]
    fn keys_differ_by_size() {
        let f = FontId::new(0);
        assert_ne!(GlyphKey::new(f, 12.0, 'a').unwrap(), GlyphKey::new(f, 12.5, 'a').unwrap());
    }

    #[test]
    fn invisible_record_is_not_visible() {
        assert!(!PlacementRecord::INVISIBLE.is_visible());
        assert_eq!(PlacementRecord::INVISIBLE, PlacementRecord::default());
    }
}
