use glint_raster::Outline;

/// A glyph as delivered by a font: outline in font units (+Y up) and the
/// horizontal advance, also in font units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub outline: Outline,
    pub advance: f32,
}

/// Source of glyph outlines for one font face.
///
/// Implementations are trusted input: the atlas scales outlines by
/// `pixel_size / units_per_em()` and rasterizes whatever comes back. Glyphs
/// the face does not contain should map to its fallback (`.notdef`) glyph.
pub trait OutlineProvider {
    /// Outline and advance for `ch`, in font units.
    fn char_to_outline(&self, ch: char) -> GlyphOutline;

    /// Font units per em; must be nonzero.
    fn units_per_em(&self) -> u16;

    /// Horizontal kerning adjustment between `left` and `right`, in font units.
    fn kerning(&self, _left: char, _right: char) -> f32 {
        0.0
    }
}
