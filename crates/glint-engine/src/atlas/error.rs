use std::fmt;

use crate::text::FontId;

/// Contract violations reported by the atlas.
///
/// Degraded-but-expected conditions (empty glyphs, a full atlas) are not
/// errors; they produce zero-size placements instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AtlasError {
    /// Pixel size was zero, negative or not finite.
    InvalidPixelSize(f32),
    /// `FontId` not registered with the `FontSystem`.
    UnknownFont(FontId),
    /// Provider reported zero units per em.
    ZeroUnitsPerEm(FontId),
    /// A thread panicked while holding the shared atlas lock.
    Poisoned,
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPixelSize(size) => write!(f, "invalid pixel size: {size}"),
            Self::UnknownFont(id) => write!(f, "unknown font: {id:?}"),
            Self::ZeroUnitsPerEm(id) => write!(f, "font {id:?} reports zero units per em"),
            Self::Poisoned => write!(f, "glyph atlas lock poisoned"),
        }
    }
}

impl std::error::Error for AtlasError {}
