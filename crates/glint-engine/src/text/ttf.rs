use glint_raster::Outline;
use ouroboros::self_referencing;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::font_system::FontLoadError;
use super::provider::{GlyphOutline, OutlineProvider};

/// The font bytes together with the face parsed from them.
#[self_referencing]
struct FaceCell {
    data: Vec<u8>,

    #[borrows(data)]
    #[covariant]
    face: Face<'this>,
}

/// [`OutlineProvider`] backed by a TrueType / OpenType face.
///
/// Owns the font file; outlines come straight from `glyf` / `CFF` through
/// `ttf_parser::OutlineBuilder`, in font units with +Y up.
pub struct TtfOutlineProvider {
    cell: FaceCell,
}

impl TtfOutlineProvider {
    /// Parses face `index` of `data` (0 for plain `.ttf` / `.otf` files).
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, FontLoadError> {
        let cell = FaceCell::try_new(data, |data| Face::parse(data, index))
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { cell })
    }

    /// Number of glyphs in the face.
    pub fn glyph_count(&self) -> u16 {
        self.cell.borrow_face().number_of_glyphs()
    }

    fn glyph_id(&self, ch: char) -> GlyphId {
        // Missing characters render as .notdef.
        self.cell.borrow_face().glyph_index(ch).unwrap_or(GlyphId(0))
    }
}

impl OutlineProvider for TtfOutlineProvider {
    fn char_to_outline(&self, ch: char) -> GlyphOutline {
        let face = self.cell.borrow_face();
        let id = self.glyph_id(ch);

        let mut sink = OutlineSink(Outline::new());
        // `None` means the glyph has no contours (e.g. space); keep it empty.
        if face.outline_glyph(id, &mut sink).is_none() {
            sink.0 = Outline::new();
        }

        GlyphOutline {
            outline: sink.0,
            advance: face.glyph_hor_advance(id).unwrap_or(0) as f32,
        }
    }

    fn units_per_em(&self) -> u16 {
        self.cell.borrow_face().units_per_em()
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        let face = self.cell.borrow_face();
        let (Some(l), Some(r)) = (face.glyph_index(left), face.glyph_index(right)) else {
            return 0.0;
        };
        let Some(kern) = face.tables().kern else { return 0.0 };

        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(l, r))
            .map_or(0.0, f32::from)
    }
}

/// Collects `ttf-parser` outline callbacks into an [`Outline`].
struct OutlineSink(Outline);

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}
