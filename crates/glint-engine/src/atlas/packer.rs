use super::config::AtlasConfig;

/// A rectangle handed out by the packer, in atlas pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    /// Normalized `[u0, v0, u1, v1]` for an atlas of `atlas_w × atlas_h`.
    pub fn uv(&self, atlas_w: u32, atlas_h: u32) -> [f32; 4] {
        let (aw, ah) = (atlas_w as f32, atlas_h as f32);
        [
            self.x as f32 / aw,
            self.y as f32 / ah,
            (self.x + self.width) as f32 / aw,
            (self.y + self.height) as f32 / ah,
        ]
    }

    /// True when the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &AtlasRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Outcome of [`ShelfPacker::allocate`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Allocation {
    Placed(AtlasRect),
    /// No room left; this call is the one that filled the packer.
    Full,
    /// The packer was already full before this call.
    Exhausted,
    /// The rectangle could not fit even an empty atlas. The packer is unchanged.
    Oversized,
}

/// Shelf (row) packer over a fixed-size atlas.
///
/// Rows fill left to right; when a rectangle does not fit the remaining width
/// the cursor wraps to a new row below the tallest rectangle of the current
/// one. Every rectangle reserves `padding` pixels to its right and below it,
/// so `W × H` cells pack exactly `floor(width / (W + padding))` per row and
/// `floor(height / (H + padding))` rows.
///
/// The cursor only moves forward, so placed rectangles never overlap and
/// always lie inside `[0, width) × [0, height)`.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    width: u32,
    height: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub fn new(config: AtlasConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            padding: config.padding,
            cursor_x: 0,
            cursor_y: 0,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w × h` rectangle.
    pub fn allocate(&mut self, w: u32, h: u32) -> Allocation {
        if self.full {
            return Allocation::Exhausted;
        }

        let (pw, ph) = (w.saturating_add(self.padding), h.saturating_add(self.padding));
        if pw > self.width || ph > self.height {
            return Allocation::Oversized;
        }

        // Advance to a new shelf row when the rectangle doesn't fit horizontally.
        if self.cursor_x > 0 && self.cursor_x + pw > self.width {
            self.cursor_x = 0;
            self.cursor_y += self.row_height + self.padding;
            self.row_height = 0;
        }

        if self.cursor_y + ph > self.height {
            self.full = true;
            return Allocation::Full;
        }

        let rect = AtlasRect { x: self.cursor_x, y: self.cursor_y, width: w, height: h };
        self.cursor_x += pw;
        self.row_height = self.row_height.max(h);
        Allocation::Placed(rect)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Current `(x, y)` cursor.
    #[inline]
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x, self.cursor_y)
    }

    #[inline]
    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Empties the atlas: cursor back to the origin, full flag cleared.
    pub fn reset(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.row_height = 0;
        self.full = false;
    }
}
