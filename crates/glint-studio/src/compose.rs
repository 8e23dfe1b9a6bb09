use glint_engine::text::LineRun;
use glint_engine::PixelBuffer;
use image::GrayImage;

/// Software-composites a laid-out line into a grayscale image by copying each
/// quad's alpha out of the atlas. Overlapping glyphs keep the brighter texel.
pub fn compose_line(run: &LineRun, atlas: &PixelBuffer, width: u32, height: u32) -> GrayImage {
    let mut canvas = GrayImage::new(width, height);
    let (aw, ah) = (atlas.width() as f32, atlas.height() as f32);

    for quad in &run.quads {
        let src_x = (quad.uv[0] * aw).round() as u32;
        let src_y = (quad.uv[1] * ah).round() as u32;

        for dy in 0..quad.height as u32 {
            for dx in 0..quad.width as u32 {
                let tx = quad.x as i64 + dx as i64;
                let ty = quad.y as i64 + dy as i64;
                if tx < 0 || ty < 0 || tx >= width as i64 || ty >= height as i64 {
                    continue;
                }
                let a = atlas.alpha(src_x + dx, src_y + dy);
                let px = canvas.get_pixel_mut(tx as u32, ty as u32);
                px.0[0] = px.0[0].max(a);
            }
        }
    }
    canvas
}

/// Coverage of one atlas region as ASCII art, one line per row.
pub fn ascii_preview(atlas: &PixelBuffer, x: u32, y: u32, width: u32, height: u32) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for row in y..y + height {
        for col in x..x + width {
            let a = atlas.alpha(col, row) as usize;
            out.push(RAMP[a * (RAMP.len() - 1) / 255] as char);
        }
        out.push('\n');
    }
    out
}

/// Number of non-black pixels in `img`.
pub fn lit_pixels(img: &GrayImage) -> usize {
    img.pixels().filter(|p| p.0[0] > 0).count()
}

#[cfg(test)]
mod tests {
    use glint_engine::text::GlyphQuad;
    use glint_engine::TextureSink;

    use super::*;

    fn atlas_with_block() -> PixelBuffer {
        let mut atlas = PixelBuffer::new(8, 8);
        atlas.upload_region(2, 2, 2, 2, &[255u8; 16]);
        atlas
    }

    #[test]
    fn compose_copies_quad_alpha() {
        let atlas = atlas_with_block();
        let run = LineRun {
            quads: vec![GlyphQuad {
                ch: 'x',
                x: 5.0,
                y: 1.0,
                width: 2.0,
                height: 2.0,
                uv: [0.25, 0.25, 0.5, 0.5],
            }],
            advance: 4.0,
        };
        let img = compose_line(&run, &atlas, 10, 5);
        assert_eq!(img.get_pixel(5, 1).0[0], 255);
        assert_eq!(img.get_pixel(6, 2).0[0], 255);
        assert_eq!(img.get_pixel(4, 1).0[0], 0);
        assert_eq!(lit_pixels(&img), 4);
    }

    #[test]
    fn compose_clips_offscreen_quads() {
        let atlas = atlas_with_block();
        let run = LineRun {
            quads: vec![GlyphQuad { ch: 'x', x: -1.0, y: -1.0, width: 2.0, height: 2.0, uv: [0.25, 0.25, 0.5, 0.5] }],
            advance: 0.0,
        };
        let img = compose_line(&run, &atlas, 4, 4);
        assert_eq!(lit_pixels(&img), 1);
    }

    #[test]
    fn ascii_preview_maps_ramp_ends() {
        let atlas = atlas_with_block();
        assert_eq!(ascii_preview(&atlas, 1, 2, 3, 1), " @@\n");
    }
}
