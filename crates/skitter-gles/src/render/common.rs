//! Shared geometry used by both renderer variants.

use bytemuck::{Pod, Zeroable};

/// One quad corner: clip-space position (before scale/offset) plus an RGB
/// color, normalized to `[0, 1]` by the attribute pointer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct Vertex {
    pub pos: [f32; 2],
    pub color: [u8; 3],
    // Explicit tail byte; `Pod` forbids implicit padding.
    pub _pad: u8,
}

const fn v(x: f32, y: f32, color: [u8; 3]) -> Vertex {
    Vertex {
        pos: [x, y],
        color,
        _pad: 0,
    }
}

/// Unit quad as a 4-vertex triangle strip, blue bottom edge, red top edge.
/// Diagonal < 2 so the scaled quad fits in clip space at any rotation.
pub(super) const QUAD: [Vertex; 4] = [
    v(-0.5, -0.5, [0x00, 0x00, 0xff]),
    v(0.5, -0.5, [0x00, 0x00, 0xff]),
    v(-0.5, 0.5, [0xff, 0x00, 0x00]),
    v(0.5, 0.5, [0xff, 0x00, 0x00]),
];

pub(super) const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
pub(super) const COLOR_BYTE_OFFSET: i32 = 8;

// Attribute locations fixed by the ES3 layout qualifiers; the ES2 renderer
// queries its own after linking.
pub(super) const POS_ATTRIB: u32 = 0;
pub(super) const COLOR_ATTRIB: u32 = 1;
pub(super) const OFFSET_ATTRIB: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(VERTEX_STRIDE, 12);
    }

    #[test]
    fn quad_fits_in_clip_space_at_any_rotation() {
        for vtx in QUAD {
            let [x, y] = vtx.pos;
            assert!((x * x + y * y).sqrt() < 1.0);
        }
    }
}
