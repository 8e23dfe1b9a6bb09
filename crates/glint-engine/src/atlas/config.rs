/// Construction parameters for a [`super::GlyphAtlas`].
///
/// The atlas never grows: `width × height` is the whole capacity for the
/// atlas lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Texture width in pixels.
    pub width: u32,

    /// Texture height in pixels.
    pub height: u32,

    /// Empty gutter kept to the right of and below every glyph so linear
    /// sampling never bleeds into a neighbour.
    pub padding: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 2048,
            padding: 2,
        }
    }
}

impl AtlasConfig {
    /// Square atlas of `size × size` pixels with the default padding.
    pub fn square(size: u32) -> Self {
        Self { width: size, height: size, ..Self::default() }
    }
}
