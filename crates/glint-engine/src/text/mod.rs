//! Font-side collaborators of the atlas.
//!
//! The atlas never parses fonts itself. It asks an [`OutlineProvider`] for a
//! glyph's outline and advance; [`FontSystem`] owns the providers and hands
//! out [`FontId`]s, and [`TtfOutlineProvider`] adapts TrueType / OpenType
//! faces through `ttf-parser`.

mod font_system;
mod provider;
mod run;
mod ttf;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use provider::{GlyphOutline, OutlineProvider};
pub use run::{layout_line, GlyphQuad, LineRun};
pub use ttf::TtfOutlineProvider;
