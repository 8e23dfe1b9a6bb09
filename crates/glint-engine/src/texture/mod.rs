//! Texture-side collaborators: where packed glyphs end up.
//!
//! The atlas hands every placed glyph to a [`TextureSink`] as RGBA8 texels
//! (`RGB = 255`, `A = coverage`), so a sprite-style shader can tint glyphs with
//! a per-draw color while anti-aliasing comes from alpha.

mod encode;
mod gpu;
mod pixels;

pub use encode::{encode_coverage, Texel};
pub use gpu::{request_headless_device, WgpuTextureSink};
pub use pixels::PixelBuffer;

/// Destination for atlas uploads.
///
/// `rgba` holds `width * height` tightly packed RGBA8 texels, row-major. The
/// atlas guarantees the region lies inside the texture and never overlaps an
/// earlier upload.
pub trait TextureSink {
    fn upload_region(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]);
}
