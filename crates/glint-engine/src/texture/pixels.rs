use super::TextureSink;

/// CPU-side RGBA8 image used as an atlas texture.
///
/// Handy for tests, offline atlas dumps and software compositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; width as usize * height as usize * 4] }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Texel at `(x, y)`; transparent outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Alpha channel at `(x, y)`.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y)[3]
    }
}

impl TextureSink for PixelBuffer {
    fn upload_region(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]) {
        let row_bytes = width as usize * 4;
        debug_assert_eq!(rgba.len(), row_bytes * height as usize);

        // Clip instead of panicking on an out-of-range region.
        let w = width.min(self.width.saturating_sub(x)) as usize;
        let h = height.min(self.height.saturating_sub(y));
        for row in 0..h {
            let src = row as usize * row_bytes;
            let dst = ((y + row) as usize * self.width as usize + x as usize) * 4;
            self.data[dst..dst + w * 4].copy_from_slice(&rgba[src..src + w * 4]);
        }
    }
}
