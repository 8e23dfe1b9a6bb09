use std::fmt;

use super::provider::OutlineProvider;
use super::ttf::TtfOutlineProvider;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font registered with a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// Builds a handle from a raw index, for hosts that keep their own
    /// provider registry and call [`crate::GlyphAtlas::get_or_create_with`].
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Owns a collection of outline providers.
///
/// Fonts are immutable after loading. The system is owned by the application
/// and passed to [`crate::GlyphAtlas::get_or_create`] so new glyphs can be
/// rasterized on demand.
pub struct FontSystem {
    fonts: Vec<Box<dyn OutlineProvider>>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// Returns the `FontId` that identifies the font in glyph keys.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let provider = TtfOutlineProvider::from_bytes(bytes.to_vec(), 0)?;
        Ok(self.add_provider(Box::new(provider)))
    }

    /// Registers any outline source (synthetic fonts, other parsers).
    pub fn add_provider(&mut self, provider: Box<dyn OutlineProvider>) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(provider);
        log::debug!("font {id:?} registered ({} units/em)", self.fonts[id.0].units_per_em());
        id
    }

    /// Returns the provider behind `id`, if `id` is valid.
    pub fn get(&self, id: FontId) -> Option<&dyn OutlineProvider> {
        self.fonts.get(id.0).map(|f| f.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Kerning between `left` and `right` scaled to `size` pixels.
    ///
    /// Unknown fonts and faces without kerning data yield 0.
    #[must_use]
    pub fn kerning_px(&self, id: FontId, left: char, right: char, size: f32) -> f32 {
        let Some(font) = self.get(id) else { return 0.0 };
        match font.units_per_em() {
            0 => 0.0,
            upem => font.kerning(left, right) * size / upem as f32,
        }
    }

    /// Pen advance of a single line of `text` at `size` pixels, kerning
    /// included. Control characters are skipped.
    ///
    /// Used for layout without going through the atlas; the result matches the
    /// pen travel of [`super::layout_line`].
    #[must_use]
    pub fn measure_line(&self, text: &str, id: FontId, size: f32) -> f32 {
        let Some(font) = self.get(id) else { return 0.0 };
        let upem = font.units_per_em();
        if upem == 0 {
            return 0.0;
        }
        let scale = size / upem as f32;

        let mut width = 0.0;
        let mut prev: Option<char> = None;
        for ch in text.chars().filter(|c| !c.is_control()) {
            if let Some(p) = prev {
                width += font.kerning(p, ch) * scale;
            }
            width += font.char_to_outline(ch).advance * scale;
            prev = Some(ch);
        }
        width
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::GlyphOutline;

    /// Every glyph advances 500 units; "AV" kerns by -100.
    struct MonoFont;

    impl OutlineProvider for MonoFont {
        fn char_to_outline(&self, _ch: char) -> GlyphOutline {
            GlyphOutline { advance: 500.0, ..GlyphOutline::default() }
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn kerning(&self, left: char, right: char) -> f32 {
            if (left, right) == ('A', 'V') { -100.0 } else { 0.0 }
        }
    }

    #[test]
    fn add_provider_assigns_sequential_ids() {
        let mut fonts = FontSystem::new();
        let a = fonts.add_provider(Box::new(MonoFont));
        let b = fonts.add_provider(Box::new(MonoFont));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(fonts.len(), 2);
    }

    #[test]
    fn unknown_font_is_none() {
        let fonts = FontSystem::new();
        assert!(fonts.get(FontId::new(3)).is_none());
        assert_eq!(fonts.kerning_px(FontId::new(3), 'A', 'V', 20.0), 0.0);
    }

    #[test]
    fn kerning_is_scaled_to_pixels() {
        let mut fonts = FontSystem::new();
        let id = fonts.add_provider(Box::new(MonoFont));
        assert_eq!(fonts.kerning_px(id, 'A', 'V', 20.0), -2.0);
        assert_eq!(fonts.kerning_px(id, 'V', 'A', 20.0), 0.0);
    }

    #[test]
    fn measure_line_sums_advances_and_kerning() {
        let mut fonts = FontSystem::new();
        let id = fonts.add_provider(Box::new(MonoFont));
        // 3 × 10 px advances, one -2 px kern pair.
        assert_eq!(fonts.measure_line("AVA", id, 20.0), 28.0);
        assert_eq!(fonts.measure_line("A\nV", id, 20.0), 18.0);
    }

    #[test]
    fn load_font_rejects_garbage() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert!(fonts.is_empty());
    }
}
