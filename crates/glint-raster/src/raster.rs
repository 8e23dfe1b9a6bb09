use crate::flatten::flatten;
use crate::path::Outline;
use crate::scanline::EdgeTable;

// ── raster constants ───────────────────────────────────────────────────────

/// Supersampling factor per axis (S × S samples per output pixel).
pub const SUPERSAMPLE: usize = 2;

/// Empty pixels added on every side of the glyph bounds.
pub const RASTER_PADDING: usize = 1;

/// Largest raster edge accepted, in output pixels. Anything larger comes from
/// a broken scale factor and is treated as degenerate.
const MAX_DIMENSION: usize = 4096;

// ── bitmap ─────────────────────────────────────────────────────────────────

/// Single-channel coverage bitmap produced by [`Rasterizer::rasterize`].
///
/// Rows are stored top to bottom. The top row corresponds to the outline's
/// maximum Y (upright rendering). `x_offset` / `y_offset` locate the bitmap's
/// top-left pixel relative to the pen origin: draw it at
/// `(origin_x + x_offset, baseline_y - y_offset)` in a +Y-down target.
///
/// The offsets include the [`RASTER_PADDING`] border: `x_offset` is
/// `floor(x_min) - 1` and `y_offset` is `ceil(y_max) + 1`, not the bare
/// outline bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl GlyphBitmap {
    /// The 0 × 0 bitmap returned for glyphs without area.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at `(x, y)`; 0 outside the bitmap.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y * self.width + x) as usize]
    }

    /// One row of coverage values; empty for `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }
}

// ── rasterizer ─────────────────────────────────────────────────────────────

/// Scan-converter with reusable scratch buffers.
///
/// Holding one `Rasterizer` across calls keeps the crossing table and the
/// supersample mask allocated; output is identical to [`rasterize`].
#[derive(Debug, Default)]
pub struct Rasterizer {
    edges: EdgeTable,
    mask: Vec<u8>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `outline` (already scaled to pixels, +Y up) into a coverage
    /// bitmap.
    ///
    /// Zero-area and malformed outlines produce [`GlyphBitmap::empty`].
    ///
    /// # Panics
    ///
    /// Panics if `pixel_size` is not a finite positive number.
    pub fn rasterize(&mut self, outline: &Outline, pixel_size: f32) -> GlyphBitmap {
        assert!(
            pixel_size.is_finite() && pixel_size > 0.0,
            "rasterize: pixel size must be finite and positive, got {pixel_size}"
        );

        if !outline.is_finite() {
            log::warn!("rasterize: outline has non-finite coordinates; rendering as empty");
            return GlyphBitmap::empty();
        }

        let Some(bounds) = outline.bounds().filter(|b| !b.is_empty()) else {
            return GlyphBitmap::empty();
        };

        let x_min = bounds.x_min.floor();
        let y_min = bounds.y_min.floor();
        let x_max = bounds.x_max.ceil();
        let y_max = bounds.y_max.ceil();

        // Checked in f32 so that huge finite extents never reach the cast.
        let span_x = x_max - x_min + 2.0 * RASTER_PADDING as f32;
        let span_y = y_max - y_min + 2.0 * RASTER_PADDING as f32;
        if !(span_x <= MAX_DIMENSION as f32 && span_y <= MAX_DIMENSION as f32) {
            log::warn!(
                "rasterize: {span_x}×{span_y} px glyph exceeds {MAX_DIMENSION} px; rendering as empty"
            );
            return GlyphBitmap::empty();
        }
        let width = span_x as usize;
        let height = span_y as usize;

        let ss_width = width * SUPERSAMPLE;
        let ss_height = height * SUPERSAMPLE;

        self.edges.reset(ss_height);
        self.mask.clear();
        self.mask.resize(ss_width * ss_height, 0);

        // Outline space → supersampled raster space: shift by the padded
        // bounds and flip Y so that y_max lands on the top row.
        let s = SUPERSAMPLE as f32;
        let pad = RASTER_PADDING as f32;
        let to_x = |x: f32| (x - x_min + pad) * s;
        let to_y = |y: f32| (y_max - y + pad) * s;

        let edges = &mut self.edges;
        flatten(outline, |a, b| {
            let winding = if b.y > a.y { 1 } else { -1 };
            edges.add_edge(to_x(a.x), to_y(a.y), to_x(b.x), to_y(b.y), winding);
        });
        edges.fill(&mut self.mask, ss_width);

        let data = downsample(&self.mask, width, height);

        GlyphBitmap {
            data,
            width: width as u32,
            height: height as u32,
            x_offset: x_min as i32 - RASTER_PADDING as i32,
            y_offset: y_max as i32 + RASTER_PADDING as i32,
        }
    }
}

/// Renders `outline` with a throwaway [`Rasterizer`].
pub fn rasterize(outline: &Outline, pixel_size: f32) -> GlyphBitmap {
    Rasterizer::new().rasterize(outline, pixel_size)
}

/// Box-filters the supersampled mask down to `width × height` coverage.
fn downsample(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    const SAMPLES: usize = SUPERSAMPLE * SUPERSAMPLE;
    let ss_width = width * SUPERSAMPLE;

    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut covered = 0usize;
            for sy in 0..SUPERSAMPLE {
                let row = (y * SUPERSAMPLE + sy) * ss_width + x * SUPERSAMPLE;
                covered += mask[row..row + SUPERSAMPLE].iter().filter(|&&m| m != 0).count();
            }
            // round(255 * covered / SAMPLES) in integer arithmetic.
            out[y * width + x] = ((255 * covered + SAMPLES / 2) / SAMPLES) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(o: &mut Outline, x0: f32, y0: f32, x1: f32, y1: f32) {
        o.move_to(x0, y0);
        o.line_to(x1, y0);
        o.line_to(x1, y1);
        o.line_to(x0, y1);
        o.close();
    }

    fn rect_reversed(o: &mut Outline, x0: f32, y0: f32, x1: f32, y1: f32) {
        o.move_to(x0, y0);
        o.line_to(x0, y1);
        o.line_to(x1, y1);
        o.line_to(x1, y0);
        o.close();
    }

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Outline {
        let mut o = Outline::new();
        rect(&mut o, x0, y0, x1, y1);
        o
    }

    // ── convex fill ───────────────────────────────────────────────────────

    #[test]
    fn square_is_solid_inside_and_clear_in_padding() {
        let bmp = rasterize(&square(0.0, 0.0, 10.0, 10.0), 10.0);
        assert_eq!((bmp.width, bmp.height), (12, 12));
        for y in 0..12 {
            for x in 0..12 {
                let inside = (1..=10).contains(&x) && (1..=10).contains(&y);
                let expected = if inside { 255 } else { 0 };
                assert_eq!(bmp.coverage(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn half_pixel_edges_are_feathered() {
        let bmp = rasterize(&square(0.5, 0.5, 10.5, 10.5), 10.0);
        assert_eq!((bmp.width, bmp.height), (13, 13));
        assert_eq!(bmp.coverage(0, 0), 0);
        assert_eq!(bmp.coverage(1, 1), 64); // corner: 1 of 4 samples
        assert_eq!(bmp.coverage(1, 5), 128); // left edge: 2 of 4 samples
        assert_eq!(bmp.coverage(5, 5), 255);
        assert_eq!(bmp.coverage(11, 11), 64);
        assert_eq!(bmp.coverage(12, 12), 0);
    }

    #[test]
    fn coverage_values_are_box_filter_steps() {
        let bmp = rasterize(&square(0.5, 0.5, 10.5, 10.5), 10.0);
        assert!(bmp.data.iter().all(|c| [0, 64, 128, 191, 255].contains(c)));
    }

    // ── winding rule ──────────────────────────────────────────────────────

    #[test]
    fn nested_contours_opposite_direction_leave_hole() {
        let mut o = Outline::new();
        rect(&mut o, 0.0, 0.0, 20.0, 20.0);
        rect_reversed(&mut o, 5.0, 5.0, 15.0, 15.0);
        let bmp = rasterize(&o, 20.0);
        assert_eq!(bmp.coverage(10, 10), 0, "inner contour must be a hole");
        assert_eq!(bmp.coverage(3, 10), 255, "ring must be filled");
    }

    #[test]
    fn nested_contours_same_direction_fill_solid() {
        let mut o = Outline::new();
        rect(&mut o, 0.0, 0.0, 20.0, 20.0);
        rect(&mut o, 5.0, 5.0, 15.0, 15.0);
        let bmp = rasterize(&o, 20.0);
        assert_eq!(bmp.coverage(10, 10), 255, "winding 2 is inside");
        assert_eq!(bmp.coverage(3, 10), 255);
    }

    #[test]
    fn clockwise_and_counter_clockwise_render_identically() {
        let mut cw = Outline::new();
        rect_reversed(&mut cw, 0.0, 0.0, 8.0, 8.0);
        assert_eq!(rasterize(&cw, 8.0), rasterize(&square(0.0, 0.0, 8.0, 8.0), 8.0));
    }

    // ── orientation ───────────────────────────────────────────────────────

    #[test]
    fn top_row_is_outline_max_y() {
        // Triangle: wide at y = 10, apex at y = 0.
        let mut o = Outline::new();
        o.move_to(0.0, 10.0);
        o.line_to(10.0, 10.0);
        o.line_to(5.0, 0.0);
        o.close();
        let bmp = rasterize(&o, 10.0);

        let sum = |y: u32| bmp.row(y).iter().map(|&c| c as u32).sum::<u32>();
        assert!(sum(1) > 4 * sum(10), "first glyph row must be the wide one");
        assert_eq!(bmp.y_offset, 11);
        assert_eq!(bmp.x_offset, -1);
    }

    #[test]
    fn offsets_locate_top_left_pixel() {
        // A box floating above the baseline between y = 20 and y = 30.
        let bmp = rasterize(&square(3.0, 20.0, 7.0, 30.0), 30.0);
        assert_eq!(bmp.x_offset, 2);
        assert_eq!(bmp.y_offset, 31);
        assert_eq!(bmp.height, 12);
        // Bottom padding row sits on y = 19..20, just below the glyph.
        assert_eq!(bmp.row(bmp.height - 1).iter().copied().max(), Some(0));
        assert_eq!(bmp.coverage(1, bmp.height - 2), 255);
    }

    #[test]
    fn descender_yields_negative_extent_below_baseline() {
        let bmp = rasterize(&square(0.0, -4.0, 4.0, 6.0), 10.0);
        assert_eq!(bmp.y_offset, 7);
        // Bitmap spans baseline - 7 .. baseline + 5 in +Y-down space.
        assert_eq!(bmp.height as i32 - bmp.y_offset, 5);
    }

    // ── curves ────────────────────────────────────────────────────────────

    #[test]
    fn cubic_circle_covers_centre_not_corners() {
        let k = 0.552_284_8 * 10.0;
        let mut o = Outline::new();
        o.move_to(20.0, 10.0);
        o.cubic_to(20.0, 10.0 + k, 10.0 + k, 20.0, 10.0, 20.0);
        o.cubic_to(10.0 - k, 20.0, 0.0, 10.0 + k, 0.0, 10.0);
        o.cubic_to(0.0, 10.0 - k, 10.0 - k, 0.0, 10.0, 0.0);
        o.cubic_to(10.0 + k, 0.0, 20.0, 10.0 - k, 20.0, 10.0);
        o.close();
        let bmp = rasterize(&o, 20.0);
        assert_eq!((bmp.width, bmp.height), (22, 22));
        assert_eq!(bmp.coverage(10, 10), 255);
        assert_eq!(bmp.coverage(1, 1), 0);
        assert_eq!(bmp.coverage(20, 20), 0);
    }

    #[test]
    fn quadratic_bump_fills_under_curve() {
        let mut o = Outline::new();
        o.move_to(0.0, 0.0);
        o.quad_to(8.0, 16.0, 16.0, 0.0);
        o.close();
        let bmp = rasterize(&o, 16.0);
        // Peak of the curve is y = 8; bounds include the control point at 16.
        assert_eq!(bmp.height, 18);
        let bottom = bmp.height - 2;
        assert_eq!(bmp.coverage(bmp.width / 2, bottom), 255);
        assert_eq!(bmp.coverage(bmp.width / 2, 2), 0);
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn rasterize_is_idempotent() {
        let o = square(0.25, 0.75, 9.5, 7.25);
        assert_eq!(rasterize(&o, 9.0), rasterize(&o, 9.0));
    }

    #[test]
    fn reused_scratch_matches_fresh_rasterizer() {
        let small = square(0.5, 0.5, 3.5, 3.5);
        let big = square(0.0, 0.0, 40.0, 25.0);
        let mut r = Rasterizer::new();
        let first = r.rasterize(&small, 4.0);
        let _ = r.rasterize(&big, 40.0);
        assert_eq!(r.rasterize(&small, 4.0), first);
        assert_eq!(first, rasterize(&small, 4.0));
    }

    // ── degenerate input ──────────────────────────────────────────────────

    #[test]
    fn empty_outline_is_zero_sized() {
        let bmp = rasterize(&Outline::new(), 12.0);
        assert!(bmp.is_empty());
        assert_eq!((bmp.x_offset, bmp.y_offset), (0, 0));
    }

    #[test]
    fn flat_outline_is_zero_sized() {
        let mut o = Outline::new();
        o.move_to(0.0, 5.0);
        o.line_to(10.0, 5.0);
        o.close();
        assert_eq!(rasterize(&o, 12.0), GlyphBitmap::empty());
    }

    #[test]
    fn non_finite_outline_is_zero_sized() {
        let mut o = square(0.0, 0.0, 4.0, 4.0);
        o.line_to(f32::INFINITY, 2.0);
        assert!(rasterize(&o, 12.0).is_empty());
    }

    #[test]
    fn unterminated_contour_is_filled() {
        let mut o = Outline::new();
        o.move_to(0.0, 0.0);
        o.line_to(6.0, 0.0);
        o.line_to(6.0, 6.0);
        o.line_to(0.0, 6.0);
        assert_eq!(rasterize(&o, 6.0), rasterize(&square(0.0, 0.0, 6.0, 6.0), 6.0));
    }

    #[test]
    fn huge_finite_outline_is_zero_sized() {
        assert!(rasterize(&square(-1.0e30, -1.0e30, 1.0e30, 1.0e30), 1.0e30).is_empty());
        assert!(rasterize(&square(-3.0e38, 0.0, 3.0e38, 1.0), 12.0).is_empty());
    }

    #[test]
    fn just_over_max_dimension_is_zero_sized() {
        let limit = MAX_DIMENSION as f32;
        assert!(!rasterize(&square(0.0, 0.0, limit - 2.0, 1.0), limit).is_empty());
        assert!(rasterize(&square(0.0, 0.0, limit - 1.0, 1.0), limit).is_empty());
    }

    #[test]
    fn row_out_of_range_is_empty() {
        let bmp = rasterize(&square(0.0, 0.0, 2.0, 2.0), 2.0);
        assert_eq!(bmp.row(bmp.height - 1).len(), bmp.width as usize);
        assert!(bmp.row(bmp.height).is_empty());
        assert!(GlyphBitmap::empty().row(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "pixel size")]
    fn zero_pixel_size_panics() {
        rasterize(&square(0.0, 0.0, 1.0, 1.0), 0.0);
    }
}
