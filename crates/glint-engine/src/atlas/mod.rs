//! Glyph atlas: shelf packer, placement cache and upload path.
//!
//! Convention:
//! - atlas pixels are top-left origin, +Y down
//! - UVs are normalized by the atlas dimensions
//! - placements are append-only; nothing is moved or repacked until `reset`

mod config;
mod error;
mod glyph_atlas;
mod packer;
mod record;
mod shared;

pub use config::AtlasConfig;
pub use error::AtlasError;
pub use glyph_atlas::{prepare_glyph, GlyphAtlas, PreparedGlyph};
pub use packer::{Allocation, AtlasRect, ShelfPacker};
pub use record::{GlyphKey, PlacementRecord};
pub use shared::SharedGlyphAtlas;
