use crate::foundation::error::{VizError, VizResult};

/// Premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over of a premultiplied pixel onto an opaque RGB pixel.
pub(crate) fn over_rgb(dst: [u8; 3], src: PremulRgba8) -> [u8; 3] {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2]];
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 3];
    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Composite a premultiplied RGBA8 layer onto a tightly packed RGB8 buffer.
pub(crate) fn over_rgb_in_place(dst_rgb: &mut [u8], src_premul: &[u8]) -> VizResult<()> {
    if !dst_rgb.len().is_multiple_of(3)
        || !src_premul.len().is_multiple_of(4)
        || dst_rgb.len() / 3 != src_premul.len() / 4
    {
        return Err(VizError::validation(
            "over_rgb_in_place expects rgb8/rgba8 buffers with equal pixel counts",
        ));
    }
    for (d, s) in dst_rgb.chunks_exact_mut(3).zip(src_premul.chunks_exact(4)) {
        let out = over_rgb([d[0], d[1], d[2]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Convert straight-alpha RGBA8 into premultiplied RGBA8.
pub(crate) fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
