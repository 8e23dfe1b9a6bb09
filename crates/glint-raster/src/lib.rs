//! Outline scan-conversion for the **Glint** glyph pipeline.
//!
//! Converts vector glyph outlines (move / line / quadratic / cubic commands)
//! into single-channel anti-aliased coverage bitmaps. The crate holds no
//! shared state; the atlas layer in `glint-engine` calls it on cache misses.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`path`] | `PathCommand`, `Outline`, `Bounds` |
//! | [`flatten`] | fixed-step Bezier flattening |
//! | [`scanline`] | per-row crossing table (reusable scratch) |
//! | [`raster`] | `Rasterizer`, `GlyphBitmap`, `rasterize` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use glint_raster::{rasterize, Outline};
//!
//! let mut outline = Outline::new();
//! outline.move_to(0.0, 0.0);
//! outline.line_to(8.0, 0.0);
//! outline.line_to(8.0, 8.0);
//! outline.line_to(0.0, 8.0);
//! outline.close();
//!
//! let bitmap = rasterize(&outline, 8.0);
//! assert_eq!(bitmap.width, 10); // 8 px of glyph + 1 px padding per side
//! assert_eq!(bitmap.coverage(4, 4), 255);
//! ```

pub mod flatten;
pub mod path;
pub mod raster;
pub mod scanline;

pub use path::{Bounds, Outline, PathCommand};
pub use raster::{rasterize, GlyphBitmap, Rasterizer, RASTER_PADDING, SUPERSAMPLE};
