use bytemuck::{Pod, Zeroable};

/// One RGBA8 texel as uploaded to the atlas texture.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Texel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Texel {
    /// White texel carrying `coverage` as alpha.
    #[inline]
    pub const fn white(coverage: u8) -> Self {
        Self { r: 255, g: 255, b: 255, a: coverage }
    }
}

/// Expands single-channel coverage into the shared RGBA upload encoding.
pub fn encode_coverage(coverage: &[u8]) -> Vec<Texel> {
    coverage.iter().map(|&c| Texel::white(c)).collect()
}
