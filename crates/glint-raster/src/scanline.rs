//! Per-row crossing table for non-zero winding fills.
//!
//! The table is scratch memory: [`EdgeTable::reset`] clears the row lists but
//! keeps their allocations, so a long-lived [`crate::Rasterizer`] stops
//! allocating once it has seen its largest glyph.

/// One edge crossing of a scanline centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Crossing {
    /// X of the intersection, in supersampled pixels.
    pub x: f32,
    /// +1 or -1; see [`EdgeTable::add_edge`].
    pub winding: i32,
}

#[derive(Debug, Default)]
pub struct EdgeTable {
    rows: Vec<Vec<Crossing>>,
    height: usize,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares the table for a raster `height` rows tall.
    pub fn reset(&mut self, height: usize) {
        if self.rows.len() < height {
            self.rows.resize_with(height, Vec::new);
        }
        for row in &mut self.rows[..height] {
            row.clear();
        }
        self.height = height;
    }

    /// Crossings recorded for `row`, in insertion order until [`Self::fill`]
    /// sorts them.
    pub fn row(&self, row: usize) -> &[Crossing] {
        if row < self.height { &self.rows[row][..] } else { &[] }
    }

    /// Records the crossings of the segment `(x0, y0) → (x1, y1)`.
    ///
    /// Coordinates are supersampled raster space (+Y down). Every row whose
    /// centre `row + 0.5` falls in the half-open span `[y_top, y_bottom)`
    /// receives one crossing, so a vertex shared by two edges is counted
    /// exactly once. Horizontal segments never cross a row centre and are
    /// dropped. `winding` is supplied by the caller from the unswapped segment.
    pub fn add_edge(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, winding: i32) {
        if y0 == y1 {
            return;
        }

        let (xt, yt, xb, yb) = if y0 < y1 { (x0, y0, x1, y1) } else { (x1, y1, x0, y0) };

        let first = (yt - 0.5).ceil();
        let last = (yb - 0.5).ceil();
        if first >= last {
            return;
        }

        let slope = (xb - xt) / (yb - yt);
        let first_row = first.max(0.0) as usize;
        let end_row = (last.max(0.0) as usize).min(self.height);

        for row in first_row..end_row {
            let yc = row as f32 + 0.5;
            let x = xt + (yc - yt) * slope;
            self.rows[row].push(Crossing { x, winding });
        }
    }

    /// Fills `mask` (row-major, `width` columns) using the non-zero rule.
    ///
    /// Crossings are sorted per row and swept left to right; a span between two
    /// consecutive crossings is filled when the running winding sum is
    /// nonzero. A column is inside a span when its centre `col + 0.5` lies in
    /// `[x_left, x_right)`.
    pub fn fill(&mut self, mask: &mut [u8], width: usize) {
        for (y, row) in self.rows[..self.height].iter_mut().enumerate() {
            if row.len() < 2 {
                continue;
            }
            row.sort_by(|a, b| a.x.total_cmp(&b.x));

            let line = &mut mask[y * width..(y + 1) * width];
            let mut winding = 0;
            for pair in row.windows(2) {
                winding += pair[0].winding;
                if winding == 0 {
                    continue;
                }
                let start = column_at(pair[0].x, width);
                let end = column_at(pair[1].x, width);
                if start < end {
                    line[start..end].fill(255);
                }
            }
        }
    }
}

/// First column whose centre lies at or right of `x`, clamped to `[0, width]`.
#[inline]
fn column_at(x: f32, width: usize) -> usize {
    let c = (x - 0.5).ceil();
    if c <= 0.0 { 0 } else { (c as usize).min(width) }
}
