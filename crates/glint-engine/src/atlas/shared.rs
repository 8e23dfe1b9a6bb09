use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard};

use glint_raster::Rasterizer;

use crate::text::{FontId, FontSystem, OutlineProvider};
use crate::texture::TextureSink;

use super::config::AtlasConfig;
use super::error::AtlasError;
use super::glyph_atlas::{prepare_glyph, GlyphAtlas};
use super::record::{GlyphKey, PlacementRecord};

thread_local! {
    // Scratch for rasterizing outside the lock, reused per thread.
    static SCRATCH: RefCell<Rasterizer> = RefCell::new(Rasterizer::new());
}

/// [`GlyphAtlas`] behind a single-writer lock, for multi-threaded hosts.
///
/// The cache check, packing, upload and insertion happen under the lock;
/// outline fetching and rasterization do not. After rasterizing, the cache is
/// checked again under the lock, so two threads racing on the same key still
/// place it once.
pub struct SharedGlyphAtlas<S> {
    inner: Mutex<GlyphAtlas<S>>,
}

impl<S: TextureSink> SharedGlyphAtlas<S> {
    pub fn new(config: AtlasConfig, sink: S) -> Self {
        Self { inner: Mutex::new(GlyphAtlas::new(config, sink)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GlyphAtlas<S>>, AtlasError> {
        self.inner.lock().map_err(|_| AtlasError::Poisoned)
    }

    pub fn get_or_create(
        &self,
        fonts: &FontSystem,
        font: FontId,
        size: f32,
        ch: char,
    ) -> Result<PlacementRecord, AtlasError> {
        let key = GlyphKey::new(font, size, ch)?;
        if let Some(record) = self.lock()?.lookup(&key) {
            return Ok(record);
        }
        let provider = fonts
            .get(font)
            .ok_or(AtlasError::UnknownFont(font))
            .inspect_err(|e| log::error!("{e}"))?;
        self.get_or_create_with(key, provider)
    }

    pub fn get_or_create_with(
        &self,
        key: GlyphKey,
        provider: &dyn OutlineProvider,
    ) -> Result<PlacementRecord, AtlasError> {
        {
            let atlas = self.lock()?;
            if let Some(record) = atlas.lookup(&key) {
                return Ok(record);
            }
            if atlas.is_full() {
                return Ok(PlacementRecord::INVISIBLE);
            }
        }

        let prepared = SCRATCH.with_borrow_mut(|rasterizer| prepare_glyph(&key, provider, rasterizer))?;

        Ok(self.lock()?.commit(key, prepared))
    }

    pub fn has(&self, font: FontId, size: f32, ch: char) -> bool {
        self.lock().is_ok_and(|atlas| atlas.has(font, size, ch))
    }

    pub fn is_full(&self) -> bool {
        self.lock().is_ok_and(|atlas| atlas.is_full())
    }

    pub fn reset(&self) -> Result<(), AtlasError> {
        self.lock()?.reset();
        Ok(())
    }

    pub fn into_inner(self) -> Result<GlyphAtlas<S>, AtlasError> {
        self.inner.into_inner().map_err(|_| AtlasError::Poisoned)
    }
}
