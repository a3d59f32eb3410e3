use crate::foundation::{
    error::{BoothError, BoothResult},
    math::mul_div255,
};

/// Premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Composite a premultiplied layer over a premultiplied target of the same size.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> BoothResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BoothError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Separable blend modes used by the tonal pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlendMode {
    Overlay,
    Screen,
}

impl BlendMode {
    /// Blend one channel, backdrop `cb` and source `cs` in `[0,1]`.
    fn mix(self, cb: f32, cs: f32) -> f32 {
        match self {
            BlendMode::Screen => cb + cs - cb * cs,
            BlendMode::Overlay => {
                if cb <= 0.5 {
                    2.0 * cb * cs
                } else {
                    1.0 - 2.0 * (1.0 - cb) * (1.0 - cs)
                }
            }
        }
    }
}

/// Blend a flat color layer with the given opacity onto straight RGBA8 pixels.
///
/// The backdrop's alpha is preserved; a fully transparent backdrop pixel is unchanged.
pub(crate) fn blend_flat_in_place(rgba: &mut [u8], mode: BlendMode, color: [u8; 3], opacity: f32) {
    let alpha = opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let cs = color.map(|c| f32::from(c) / 255.0);
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        for (dst, &s) in px[..3].iter_mut().zip(cs.iter()) {
            let cb = f32::from(*dst) / 255.0;
            let blended = mode.mix(cb, s);
            *dst = crate::foundation::math::unit_to_u8(cb + (blended - cb) * alpha);
        }
    }
}
