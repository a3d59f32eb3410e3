use crate::{
    effects::{
        blend::{BlendMode, blend_flat_in_place},
        color::ColorProgram,
    },
    foundation::raster::Raster,
};

/// Slider state of the adjustment sub-editor.
///
/// `brightness`, `contrast`, `saturation` and `exposure` are percentages in `[0,200]`
/// (100 = unchanged). `shadows` and `highlights` are in `[-50,50]` (0 = unchanged).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentState {
    /// Brightness percentage.
    pub brightness: f32,
    /// Contrast percentage.
    pub contrast: f32,
    /// Saturation percentage.
    pub saturation: f32,
    /// Exposure percentage, applied as a second brightness pass.
    pub exposure: f32,
    /// Shadow lift (negative) or crush (positive).
    pub shadows: f32,
    /// Highlight boost (positive) or pull (negative).
    pub highlights: f32,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            exposure: 100.0,
            shadows: 0.0,
            highlights: 0.0,
        }
    }
}

/// One of the six sub-editor sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slider {
    /// Brightness percentage.
    Brightness,
    /// Contrast percentage.
    Contrast,
    /// Saturation percentage.
    Saturation,
    /// Exposure percentage.
    Exposure,
    /// Shadows offset.
    Shadows,
    /// Highlights offset.
    Highlights,
}

impl Slider {
    /// All sliders in panel order.
    pub const ALL: [Slider; 6] = [
        Slider::Brightness,
        Slider::Contrast,
        Slider::Saturation,
        Slider::Exposure,
        Slider::Shadows,
        Slider::Highlights,
    ];

    /// Inclusive value range.
    pub fn range(self) -> (f32, f32) {
        match self {
            Slider::Brightness | Slider::Contrast | Slider::Saturation | Slider::Exposure => {
                (0.0, 200.0)
            }
            Slider::Shadows | Slider::Highlights => (-50.0, 50.0),
        }
    }
}

impl AdjustmentState {
    /// Current value of a slider.
    pub fn get(&self, slider: Slider) -> f32 {
        match slider {
            Slider::Brightness => self.brightness,
            Slider::Contrast => self.contrast,
            Slider::Saturation => self.saturation,
            Slider::Exposure => self.exposure,
            Slider::Shadows => self.shadows,
            Slider::Highlights => self.highlights,
        }
    }

    /// Set a slider, clamping into its range. Non-finite values are ignored.
    pub fn set(&mut self, slider: Slider, value: f32) {
        if !value.is_finite() {
            return;
        }
        let (lo, hi) = slider.range();
        let v = value.clamp(lo, hi);
        match slider {
            Slider::Brightness => self.brightness = v,
            Slider::Contrast => self.contrast = v,
            Slider::Saturation => self.saturation = v,
            Slider::Exposure => self.exposure = v,
            Slider::Shadows => self.shadows = v,
            Slider::Highlights => self.highlights = v,
        }
    }

    /// Copy with every slider clamped into range.
    pub fn clamped(self) -> Self {
        let mut out = Self::default();
        for s in Slider::ALL {
            out.set(s, self.get(s));
        }
        out
    }

    /// `true` when the pipeline would leave pixels unchanged.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Run the tonal pipeline over a raster.
///
/// 1. brightness, contrast, saturation, exposure as one filter pass
/// 2. shadows: overlay-blend black (positive) or white (negative) at `|shadows|/100`
/// 3. highlights: screen-blend white (positive) or black (negative) at `|highlights|/200`
pub fn apply_tonal(src: &Raster, state: &AdjustmentState) -> Raster {
    let state = state.clamped();
    let mut out = src.clone();
    if state.is_neutral() {
        return out;
    }
    let row_bytes = (src.width() as usize) * 4;

    ColorProgram::default()
        .then_brightness(state.brightness / 100.0)
        .then_contrast(state.contrast / 100.0)
        .then_saturation(state.saturation / 100.0)
        .then_brightness(state.exposure / 100.0)
        .apply_in_place(out.data_mut(), row_bytes);

    if state.shadows != 0.0 {
        let color = if state.shadows > 0.0 { [0, 0, 0] } else { [255, 255, 255] };
        blend_flat_in_place(
            out.data_mut(),
            BlendMode::Overlay,
            color,
            state.shadows.abs() / 100.0,
        );
    }

    if state.highlights != 0.0 {
        let color = if state.highlights > 0.0 { [255, 255, 255] } else { [0, 0, 0] };
        blend_flat_in_place(
            out.data_mut(),
            BlendMode::Screen,
            color,
            state.highlights.abs() / 100.0 * 0.5,
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tonal.rs"]
mod tests;
