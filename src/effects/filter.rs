/// Photo filter identifiers offered by the customization panel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    /// No effect.
    #[default]
    None,
    /// Warm sepia-tinted boost.
    Warm,
    /// Faded sepia with lifted contrast.
    Vintage,
    /// Blue-shifted, slightly desaturated.
    Cool,
    /// Black and white.
    Bw,
    /// Brightened, low contrast, slight blur.
    Soft,
    /// Strong saturation.
    Vivid,
    /// Light and desaturated.
    Pastel,
    /// Orange-shifted warmth.
    Sunset,
    /// Icy, bright, desaturated.
    Arctic,
    /// High contrast.
    Drama,
    /// Strong sepia with a hue shift.
    Retro,
}

impl FilterId {
    /// Every filter in panel order.
    pub const ALL: [FilterId; 12] = [
        FilterId::None,
        FilterId::Warm,
        FilterId::Vintage,
        FilterId::Cool,
        FilterId::Bw,
        FilterId::Soft,
        FilterId::Vivid,
        FilterId::Pastel,
        FilterId::Sunset,
        FilterId::Arctic,
        FilterId::Drama,
        FilterId::Retro,
    ];

    /// Parse an identifier; matching is case-insensitive and whitespace-tolerant.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == id)
    }

    /// Stable identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterId::None => "none",
            FilterId::Warm => "warm",
            FilterId::Vintage => "vintage",
            FilterId::Cool => "cool",
            FilterId::Bw => "bw",
            FilterId::Soft => "soft",
            FilterId::Vivid => "vivid",
            FilterId::Pastel => "pastel",
            FilterId::Sunset => "sunset",
            FilterId::Arctic => "arctic",
            FilterId::Drama => "drama",
            FilterId::Retro => "retro",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FilterId::None => "Original",
            FilterId::Warm => "Warm",
            FilterId::Vintage => "Vintage",
            FilterId::Cool => "Cool",
            FilterId::Bw => "B&W",
            FilterId::Soft => "Soft",
            FilterId::Vivid => "Vivid",
            FilterId::Pastel => "Pastel",
            FilterId::Sunset => "Sunset",
            FilterId::Arctic => "Arctic",
            FilterId::Drama => "Drama",
            FilterId::Retro => "Retro",
        }
    }

    /// Effect this filter applies.
    pub fn effect(self) -> EffectDescriptor {
        let id = EffectDescriptor::IDENTITY;
        match self {
            FilterId::None => id,
            FilterId::Warm => EffectDescriptor {
                brightness: 1.05,
                saturation: 1.3,
                sepia: 0.3,
                hue_rotate_deg: -10.0,
                ..id
            },
            FilterId::Vintage => EffectDescriptor {
                brightness: 0.9,
                contrast: 1.2,
                sepia: 0.5,
                ..id
            },
            FilterId::Cool => EffectDescriptor {
                contrast: 1.1,
                saturation: 0.9,
                hue_rotate_deg: 15.0,
                ..id
            },
            FilterId::Bw => EffectDescriptor {
                contrast: 1.2,
                grayscale: 1.0,
                ..id
            },
            FilterId::Soft => EffectDescriptor {
                brightness: 1.1,
                contrast: 0.9,
                blur_px: 1.0,
                ..id
            },
            FilterId::Vivid => EffectDescriptor {
                contrast: 1.1,
                saturation: 1.8,
                ..id
            },
            FilterId::Pastel => EffectDescriptor {
                brightness: 1.15,
                saturation: 0.7,
                ..id
            },
            FilterId::Sunset => EffectDescriptor {
                saturation: 1.5,
                sepia: 0.4,
                hue_rotate_deg: -20.0,
                ..id
            },
            FilterId::Arctic => EffectDescriptor {
                brightness: 1.1,
                saturation: 0.6,
                hue_rotate_deg: 30.0,
                ..id
            },
            FilterId::Drama => EffectDescriptor {
                brightness: 0.9,
                contrast: 1.6,
                saturation: 1.2,
                ..id
            },
            FilterId::Retro => EffectDescriptor {
                contrast: 1.1,
                saturation: 1.2,
                sepia: 0.6,
                hue_rotate_deg: -30.0,
                ..id
            },
        }
    }
}

/// Composable color effect, with CSS `filter` function semantics.
///
/// Multipliers are `1.0` at identity; amounts (`sepia`, `grayscale`) are `0.0` at identity.
/// Functions apply in field order: grayscale, sepia, saturation, hue rotation, brightness,
/// contrast, blur.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectDescriptor {
    /// Grayscale amount in `[0,1]`.
    pub grayscale: f32,
    /// Sepia amount in `[0,1]`.
    pub sepia: f32,
    /// Saturation multiplier.
    pub saturation: f32,
    /// Hue rotation in degrees.
    pub hue_rotate_deg: f32,
    /// Brightness multiplier.
    pub brightness: f32,
    /// Contrast multiplier around mid-gray.
    pub contrast: f32,
    /// Gaussian blur standard deviation in pixels.
    pub blur_px: f32,
}

impl EffectDescriptor {
    /// The no-op effect.
    pub const IDENTITY: Self = Self {
        grayscale: 0.0,
        sepia: 0.0,
        saturation: 1.0,
        hue_rotate_deg: 0.0,
        brightness: 1.0,
        contrast: 1.0,
        blur_px: 0.0,
    };

    /// `true` when applying this effect cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `true` when any per-pixel color function differs from identity.
    pub(crate) fn has_color_stage(&self) -> bool {
        Self {
            blur_px: 0.0,
            ..*self
        } != Self::IDENTITY
    }
}

impl Default for EffectDescriptor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Resolve a filter identifier to its effect; unknown identifiers resolve to identity.
pub fn resolve_filter_effect(filter_id: &str) -> EffectDescriptor {
    match FilterId::parse(filter_id) {
        Some(f) => f.effect(),
        None => {
            tracing::debug!(filter_id, "unknown filter id, using identity");
            EffectDescriptor::IDENTITY
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
