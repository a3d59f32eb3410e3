use crate::foundation::core::Rgba8;

/// Canvas background fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// One flat color.
    Flat {
        /// Fill color.
        color: Rgba8,
    },
    /// Two-stop linear gradient from the top-left to the bottom-right corner.
    Gradient {
        /// Color at the top-left corner.
        from: Rgba8,
        /// Color at the bottom-right corner.
        to: Rgba8,
    },
}

impl Background {
    /// Color at pixel `(x, y)` of a `width × height` canvas.
    pub fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Rgba8 {
        match *self {
            Background::Flat { color } => color,
            Background::Gradient { from, to } => {
                let (w, h) = (f64::from(width), f64::from(height));
                let len2 = w * w + h * h;
                if len2 <= 0.0 {
                    return from;
                }
                let t = ((f64::from(x) + 0.5) * w + (f64::from(y) + 0.5) * h) / len2;
                from.lerp(to, t)
            }
        }
    }
}

/// Background and border colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorSpec {
    /// Surface fill.
    pub background: Background,
    /// Solid border at the canvas edge.
    pub border: Rgba8,
}

/// Emoji tiled around the canvas edges.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatternSpec {
    /// Emoji glyph.
    pub glyph: String,
    /// Tint for monochrome fonts; color emoji fonts ignore it.
    pub color: Rgba8,
}

/// Decorative frame treatment of a composite.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameStyle {
    /// Background and border.
    pub color: ColorSpec,
    /// Optional edge pattern.
    #[serde(default)]
    pub pattern: Option<PatternSpec>,
}

/// Named color presets offered by the frame panel.
pub const COLOR_PRESETS: [&str; 8] = [
    "pink", "blue", "mint", "lavender", "peach", "sunset", "white", "black",
];

/// Named pattern presets offered by the frame panel.
pub const PATTERN_PRESETS: [&str; 5] = ["hearts", "stars", "flowers", "sparkles", "none"];

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            color: color_preset("pink").unwrap_or(ColorSpec {
                background: Background::Flat {
                    color: Rgba8::WHITE,
                },
                border: Rgba8::WHITE,
            }),
            pattern: None,
        }
    }
}

fn gradient(from: Rgba8, to: Rgba8, border: Rgba8) -> ColorSpec {
    ColorSpec {
        background: Background::Gradient { from, to },
        border,
    }
}

fn flat(color: Rgba8, border: Rgba8) -> ColorSpec {
    ColorSpec {
        background: Background::Flat { color },
        border,
    }
}

/// Color preset by name (case-insensitive).
pub fn color_preset(name: &str) -> Option<ColorSpec> {
    let spec = match name.trim().to_ascii_lowercase().as_str() {
        "pink" => gradient(
            Rgba8::rgb(0xff, 0xc0, 0xcb),
            Rgba8::rgb(0xff, 0x69, 0xb4),
            Rgba8::rgb(0xff, 0x14, 0x93),
        ),
        "blue" => gradient(
            Rgba8::rgb(0xa1, 0xc4, 0xfd),
            Rgba8::rgb(0xc2, 0xe9, 0xfb),
            Rgba8::rgb(0x41, 0x69, 0xe1),
        ),
        "mint" => gradient(
            Rgba8::rgb(0xd4, 0xfc, 0x79),
            Rgba8::rgb(0x96, 0xe6, 0xa1),
            Rgba8::rgb(0x2e, 0x8b, 0x57),
        ),
        "lavender" => gradient(
            Rgba8::rgb(0xe0, 0xc3, 0xfc),
            Rgba8::rgb(0x8e, 0xc5, 0xfc),
            Rgba8::rgb(0x93, 0x70, 0xdb),
        ),
        "peach" => gradient(
            Rgba8::rgb(0xff, 0xec, 0xd2),
            Rgba8::rgb(0xfc, 0xb6, 0x9f),
            Rgba8::rgb(0xff, 0x7f, 0x50),
        ),
        "sunset" => gradient(
            Rgba8::rgb(0xfa, 0x70, 0x9a),
            Rgba8::rgb(0xfe, 0xe1, 0x40),
            Rgba8::rgb(0xff, 0x45, 0x00),
        ),
        "white" => flat(Rgba8::WHITE, Rgba8::rgb(0xdd, 0xdd, 0xdd)),
        "black" => flat(Rgba8::rgb(0x11, 0x11, 0x11), Rgba8::BLACK),
        _ => return None,
    };
    Some(spec)
}

/// Pattern preset by name. `Some(None)` is the explicit "none" preset.
pub fn pattern_preset(name: &str) -> Option<Option<PatternSpec>> {
    let (glyph, color) = match name.trim().to_ascii_lowercase().as_str() {
        "hearts" => ("\u{1F495}", Rgba8::rgb(0xff, 0x69, 0xb4)),
        "stars" => ("\u{2B50}", Rgba8::rgb(0xff, 0xd7, 0x00)),
        "flowers" => ("\u{1F338}", Rgba8::rgb(0xff, 0xb7, 0xc5)),
        "sparkles" => ("\u{2728}", Rgba8::rgb(0xff, 0xf0, 0x8a)),
        "none" => return Some(None),
        _ => return None,
    };
    Some(Some(PatternSpec {
        glyph: glyph.to_owned(),
        color,
    }))
}

impl FrameStyle {
    /// Frame from a color preset and a pattern preset.
    pub fn from_presets(color: &str, pattern: &str) -> Option<Self> {
        Some(Self {
            color: color_preset(color)?,
            pattern: pattern_preset(pattern)?,
        })
    }
}
