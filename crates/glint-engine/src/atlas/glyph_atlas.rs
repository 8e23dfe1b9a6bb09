use std::collections::HashMap;

use glint_raster::{GlyphBitmap, Rasterizer};

use crate::text::{FontId, FontSystem, OutlineProvider};
use crate::texture::{encode_coverage, TextureSink};

use super::config::AtlasConfig;
use super::error::AtlasError;
use super::packer::{Allocation, ShelfPacker};
use super::record::{GlyphKey, PlacementRecord};

/// A rasterized glyph waiting to be packed.
///
/// Produced by [`prepare_glyph`] without touching any atlas state, so it can
/// be computed outside a lock and committed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGlyph {
    pub bitmap: GlyphBitmap,
    /// Pen advance in pixels.
    pub x_advance: f32,
}

/// Fetches the outline for `key` from `provider`, scales it to the key's pixel
/// size and rasterizes it.
pub fn prepare_glyph(
    key: &GlyphKey,
    provider: &dyn OutlineProvider,
    rasterizer: &mut Rasterizer,
) -> Result<PreparedGlyph, AtlasError> {
    let upem = provider.units_per_em();
    if upem == 0 {
        return Err(AtlasError::ZeroUnitsPerEm(key.font));
    }

    let size = key.size();
    let scale = size / upem as f32;
    let glyph = provider.char_to_outline(key.ch);
    let bitmap = rasterizer.rasterize(&glyph.outline.scaled(scale), size);

    Ok(PreparedGlyph { bitmap, x_advance: glyph.advance * scale })
}

// ── atlas ─────────────────────────────────────────────────────────────────

/// Fixed-size glyph atlas with a placement cache.
///
/// Glyphs are rasterized on first use, packed on shelves, uploaded through
/// the [`TextureSink`] and cached for the atlas lifetime under
/// `(font, pixel size, codepoint)`.
///
/// Once the packer runs out of room the atlas is *full*: cached glyphs are
/// still served, new ones come back as [`PlacementRecord::INVISIBLE`] until
/// [`Self::reset`].
pub struct GlyphAtlas<S> {
    config: AtlasConfig,
    packer: ShelfPacker,
    cache: HashMap<GlyphKey, PlacementRecord>,
    rasterizer: Rasterizer,
    sink: S,
}

impl<S: TextureSink> GlyphAtlas<S> {
    pub fn new(config: AtlasConfig, sink: S) -> Self {
        Self {
            config,
            packer: ShelfPacker::new(config),
            cache: HashMap::new(),
            rasterizer: Rasterizer::new(),
            sink,
        }
    }

    /// Returns the placement for `ch` in `font` at `size` pixels, rasterizing
    /// and uploading it on first use.
    pub fn get_or_create(
        &mut self,
        fonts: &FontSystem,
        font: FontId,
        size: f32,
        ch: char,
    ) -> Result<PlacementRecord, AtlasError> {
        let key = GlyphKey::new(font, size, ch)?;
        if let Some(record) = self.cache.get(&key) {
            return Ok(*record);
        }
        let provider = fonts
            .get(font)
            .ok_or(AtlasError::UnknownFont(font))
            .inspect_err(|e| log::error!("{e}"))?;
        self.get_or_create_with(key, provider)
    }

    /// Like [`Self::get_or_create`] with an explicit outline source.
    ///
    /// `provider` is only consulted on a cache miss.
    pub fn get_or_create_with(
        &mut self,
        key: GlyphKey,
        provider: &dyn OutlineProvider,
    ) -> Result<PlacementRecord, AtlasError> {
        if let Some(record) = self.cache.get(&key) {
            return Ok(*record);
        }
        if self.packer.is_full() {
            return Ok(PlacementRecord::INVISIBLE);
        }

        let prepared = prepare_glyph(&key, provider, &mut self.rasterizer)?;
        Ok(self.commit(key, prepared))
    }

    /// Cached placement for `key`, if any.
    #[inline]
    pub fn lookup(&self, key: &GlyphKey) -> Option<PlacementRecord> {
        self.cache.get(key).copied()
    }

    /// Packs, uploads and caches a prepared glyph.
    ///
    /// If `key` was cached in the meantime the existing record wins and
    /// `prepared` is dropped, so a key is never placed twice.
    pub fn commit(&mut self, key: GlyphKey, prepared: PreparedGlyph) -> PlacementRecord {
        if let Some(record) = self.cache.get(&key) {
            return *record;
        }

        let PreparedGlyph { bitmap, x_advance } = prepared;

        // Spaces and other empty glyphs only carry an advance.
        if bitmap.is_empty() {
            let record = PlacementRecord { x_advance, ..PlacementRecord::INVISIBLE };
            self.cache.insert(key, record);
            return record;
        }

        let rect = match self.packer.allocate(bitmap.width, bitmap.height) {
            Allocation::Placed(rect) => rect,
            Allocation::Exhausted => return PlacementRecord::INVISIBLE,
            Allocation::Full => {
                log::warn!(
                    "glyph atlas is full ({}×{}); {:?} and later glyphs will not be rendered",
                    self.config.width,
                    self.config.height,
                    key.ch,
                );
                return PlacementRecord::INVISIBLE;
            }
            Allocation::Oversized => {
                log::warn!(
                    "glyph {:?} at {} px is {}×{}, larger than the {}×{} atlas; skipping",
                    key.ch,
                    key.size(),
                    bitmap.width,
                    bitmap.height,
                    self.config.width,
                    self.config.height,
                );
                return PlacementRecord::INVISIBLE;
            }
        };

        let texels = encode_coverage(&bitmap.data);
        self.sink.upload_region(rect.x, rect.y, rect.width, rect.height, bytemuck::cast_slice(&texels));

        let [u0, v0, u1, v1] = rect.uv(self.config.width, self.config.height);
        let record = PlacementRecord {
            u0,
            v0,
            u1,
            v1,
            width: rect.width,
            height: rect.height,
            x_offset: bitmap.x_offset,
            y_offset: bitmap.y_offset,
            x_advance,
        };

        log::trace!("placed {:?} @ {} px at ({}, {})", key.ch, key.size(), rect.x, rect.y);
        self.cache.insert(key, record);
        record
    }

    /// True when `ch` in `font` at `size` pixels is cached.
    pub fn has(&self, font: FontId, size: f32, ch: char) -> bool {
        GlyphKey::new(font, size, ch).is_ok_and(|key| self.cache.contains_key(&key))
    }

    /// True once a placement failed for lack of room. Diagnostic: lets callers
    /// notice degraded (invisible) glyphs.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.packer.is_full()
    }

    /// Number of cached glyphs, empty ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached placement and rewinds the packer.
    ///
    /// Texture contents are left as they are; they are overwritten as new
    /// glyphs are placed.
    pub fn reset(&mut self) {
        log::debug!("glyph atlas reset ({} glyphs dropped)", self.cache.len());
        self.cache.clear();
        self.packer.reset();
    }

    #[inline]
    pub fn config(&self) -> AtlasConfig {
        self.config
    }

    #[inline]
    pub fn packer(&self) -> &ShelfPacker {
        &self.packer
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
