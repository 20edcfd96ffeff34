use bytemuck::{Pod, Zeroable};

/// Shader shape indices. The fragment shader draws each sprite procedurally
/// from its frame index (no texture atlas).
pub mod frames {
    pub const CAT_AWAKE: u32 = 0;
    pub const CAT_SLEEPING: u32 = 1;
    pub const ZZZ: u32 = 2;
    pub const STAR: u32 = 3;
    pub const CLOUD: u32 = 4;
    pub const SUN: u32 = 5;
    pub const MOON: u32 = 6;
}

/// Per-instance data uploaded to the GPU each frame.
/// Stride = 28 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Sprite center in window pixels.
    pub position: [f32; 2],
    /// Half-extents in pixels (the quad is a unit quad scaled per instance).
    pub half_size: [f32; 2],
    /// RGBA packed as u32, straight alpha.
    pub color: u32,
    /// Shape index, see [`frames`].
    pub frame: u32,
    /// Rotation angle in radians.
    pub rotation: f32,
}

/// Pack straight-alpha RGBA bytes into the instance color format.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | (a as u32)
}

/// Replace the alpha channel of a packed color, scaling by `alpha` in 0..1.
pub fn with_alpha(color: u32, alpha: f32) -> u32 {
    let base = (color & 0xFF) as f32;
    (color & 0xFFFF_FF00) | (base * alpha.clamp(0.0, 1.0)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_scale_alpha() {
        let c = pack_rgba(0x11, 0x22, 0x33, 0xFF);
        assert_eq!(c, 0x112233FF);
        assert_eq!(with_alpha(c, 0.0), 0x11223300);
        assert_eq!(with_alpha(c, 1.0), 0x112233FF);
        // Half alpha keeps the color channels untouched.
        assert_eq!(with_alpha(c, 0.5) & 0xFFFF_FF00, 0x11223300);
        assert_eq!(with_alpha(c, 0.5) & 0xFF, 0x7F);
    }
}
