use rayon::prelude::*;

use crate::{
    effects::{blur::gaussian_blur_premul, filter::EffectDescriptor},
    foundation::error::BoothResult,
    foundation::raster::Raster,
};

type Mat3 = [[f32; 3]; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    Matrix(Mat3),
    Linear { slope: f32, intercept: f32 },
}

/// Per-pixel color program compiled from an [`EffectDescriptor`].
///
/// Each stage clamps its output to `[0,1]` before the next one runs, matching how
/// chained CSS filter functions behave.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ColorProgram {
    stages: Vec<Stage>,
}

impl ColorProgram {
    pub(crate) fn compile(effect: &EffectDescriptor) -> Self {
        let mut program = Self::default();
        if effect.grayscale > 0.0 {
            program.stages.push(Stage::Matrix(grayscale_matrix(effect.grayscale)));
        }
        if effect.sepia > 0.0 {
            program.stages.push(Stage::Matrix(sepia_matrix(effect.sepia)));
        }
        program
            .then_saturation(effect.saturation)
            .then_hue_rotation(effect.hue_rotate_deg)
            .then_brightness(effect.brightness)
            .then_contrast(effect.contrast)
    }

    pub(crate) fn then_saturation(mut self, factor: f32) -> Self {
        if factor != 1.0 {
            self.stages.push(Stage::Matrix(saturate_matrix(factor)));
        }
        self
    }

    pub(crate) fn then_hue_rotation(mut self, deg: f32) -> Self {
        if deg.rem_euclid(360.0) != 0.0 {
            self.stages.push(Stage::Matrix(hue_rotate_matrix(deg)));
        }
        self
    }

    pub(crate) fn then_brightness(mut self, factor: f32) -> Self {
        if factor != 1.0 {
            self.stages.push(Stage::Linear {
                slope: factor.max(0.0),
                intercept: 0.0,
            });
        }
        self
    }

    pub(crate) fn then_contrast(mut self, factor: f32) -> Self {
        if factor != 1.0 {
            let k = factor.max(0.0);
            self.stages.push(Stage::Linear {
                slope: k,
                intercept: 0.5 - 0.5 * k,
            });
        }
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub(crate) fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let mut c = rgb;
        for stage in &self.stages {
            c = match *stage {
                Stage::Matrix(m) => {
                    let mut out = [0.0f32; 3];
                    for (row, o) in m.iter().zip(out.iter_mut()) {
                        *o = (row[0] * c[0] + row[1] * c[1] + row[2] * c[2]).clamp(0.0, 1.0);
                    }
                    out
                }
                Stage::Linear { slope, intercept } => {
                    c.map(|v| (v * slope + intercept).clamp(0.0, 1.0))
                }
            };
        }
        c
    }

    /// Run the program over straight RGBA8 bytes, leaving alpha untouched.
    pub(crate) fn apply_in_place(&self, rgba: &mut [u8], row_bytes: usize) {
        if self.is_empty() {
            return;
        }
        rgba.par_chunks_mut(row_bytes.max(4)).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                if px[3] == 0 {
                    continue;
                }
                let rgb = [
                    f32::from(px[0]) / 255.0,
                    f32::from(px[1]) / 255.0,
                    f32::from(px[2]) / 255.0,
                ];
                let out = self.apply_rgb(rgb);
                for (dst, v) in px[..3].iter_mut().zip(out) {
                    *dst = crate::foundation::math::unit_to_u8(v);
                }
            }
        });
    }
}

/// Apply an effect to a raster, returning the filtered copy.
pub fn apply_effect(src: &Raster, effect: &EffectDescriptor) -> BoothResult<Raster> {
    if effect.is_identity() {
        return Ok(src.clone());
    }
    let mut out = src.clone();
    if effect.has_color_stage() {
        let row_bytes = (src.width() as usize) * 4;
        ColorProgram::compile(effect).apply_in_place(out.data_mut(), row_bytes);
    }

    if effect.blur_px > 0.0 {
        let premul = out.to_premul();
        let blurred = gaussian_blur_premul(&premul, out.width(), out.height(), effect.blur_px)?;
        out = Raster::from_premul(out.width(), out.height(), blurred)?;
    }
    Ok(out)
}

fn grayscale_matrix(amount: f32) -> Mat3 {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn sepia_matrix(amount: f32) -> Mat3 {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn saturate_matrix(s: f32) -> Mat3 {
    let s = s.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(deg: f32) -> Mat3 {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
