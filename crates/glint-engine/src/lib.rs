//! Glint engine crate.
//!
//! Owns the glyph atlas (shelf packer + placement cache), the texture sinks
//! glyphs are uploaded through, and the font-side adapters that feed outlines
//! to `glint-raster`.

pub mod atlas;
pub mod logging;
pub mod text;
pub mod texture;

pub use atlas::{AtlasConfig, AtlasError, GlyphAtlas, GlyphKey, PlacementRecord, SharedGlyphAtlas};
pub use text::{FontId, FontSystem, GlyphOutline, OutlineProvider};
pub use texture::{PixelBuffer, TextureSink};
