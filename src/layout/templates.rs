use crate::{
    config::BoothConfig,
    foundation::core::{Canvas, Rect},
    foundation::error::BoothResult,
    layout::{fit::FitMode, shapes::SlotShape},
};

/// Template families a session can be arranged into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Full-width vertical strip.
    #[default]
    Classic,
    /// Narrower strip with side margins.
    #[serde(alias = "aesthetic")]
    Grid,
    /// Heart-clipped square photos.
    Hearts,
    /// Grid placement with rounded corners.
    Holiday,
    /// Two frames between sprocket lanes.
    Filmstrip,
    /// Two-by-three rounded grid on a portrait canvas.
    Collage,
}

/// Which canvas proportions a template is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectFamily {
    /// `w × 3w`.
    Strip,
    /// `w × 1.25w`.
    Portrait,
}

impl LayoutKind {
    /// Every template in menu order.
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Classic,
        LayoutKind::Grid,
        LayoutKind::Hearts,
        LayoutKind::Holiday,
        LayoutKind::Filmstrip,
        LayoutKind::Collage,
    ];

    /// Case-insensitive lookup; `"aesthetic"` is accepted for [`LayoutKind::Grid`].
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "grid" | "aesthetic" => Some(Self::Grid),
            "hearts" => Some(Self::Hearts),
            "holiday" => Some(Self::Holiday),
            "filmstrip" => Some(Self::Filmstrip),
            "collage" => Some(Self::Collage),
            _ => None,
        }
    }

    /// Stable identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Grid => "grid",
            Self::Hearts => "hearts",
            Self::Holiday => "holiday",
            Self::Filmstrip => "filmstrip",
            Self::Collage => "collage",
        }
    }

    /// Upper bound on participating photos.
    pub fn max_slots(self) -> usize {
        match self {
            Self::Classic | Self::Grid | Self::Holiday => 4,
            Self::Hearts => 3,
            Self::Filmstrip => 2,
            Self::Collage => 6,
        }
    }

    /// Slot count used when a session does not pick one.
    pub fn default_slots(self) -> usize {
        match self {
            Self::Classic | Self::Grid | Self::Holiday | Self::Hearts => 3,
            Self::Filmstrip => 2,
            Self::Collage => 6,
        }
    }

    /// Canvas proportions for this template.
    pub fn aspect_family(self) -> AspectFamily {
        match self {
            Self::Collage => AspectFamily::Portrait,
            _ => AspectFamily::Strip,
        }
    }
}

/// Immutable layout choice of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    /// Template family.
    pub kind: LayoutKind,
    /// Number of photos that participate, within `1..=kind.max_slots()`; zero only for
    /// [`Layout::empty`].
    pub slot_count: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(LayoutKind::default())
    }
}

impl Layout {
    /// Layout with the template's default slot count.
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            slot_count: kind.default_slots(),
        }
    }

    /// Same template with `slot_count` clamped into `1..=max_slots`.
    pub fn with_slot_count(self, slot_count: usize) -> Self {
        Self {
            slot_count: slot_count.clamp(1, self.kind.max_slots()),
            ..self
        }
    }

    /// Layout that places no photos.
    pub fn empty() -> Self {
        Self {
            kind: LayoutKind::default(),
            slot_count: 0,
        }
    }

    /// Layout by template id. Unknown ids yield [`Layout::empty`].
    pub fn from_id(id: &str, slot_count: Option<usize>) -> Self {
        match LayoutKind::parse(id) {
            Some(kind) => {
                let layout = Self::new(kind);
                slot_count.map_or(layout, |n| layout.with_slot_count(n))
            }
            None => {
                tracing::warn!(layout = id, "unknown layout id, no slots will be drawn");
                Self::empty()
            }
        }
    }

    /// Canvas proportions of the template.
    pub fn aspect_family(&self) -> AspectFamily {
        self.kind.aspect_family()
    }

    /// Backing canvas for this layout under `config`.
    pub fn canvas(&self, config: &BoothConfig) -> BoothResult<Canvas> {
        let scale = if config.compact { 0.75 } else { 1.0 };
        let (base, ratio) = match self.aspect_family() {
            AspectFamily::Strip => (config.strip_width, 3.0),
            AspectFamily::Portrait => (config.collage_width, 1.25),
        };
        let width = (f64::from(base) * scale).round();
        let height = (width * ratio).round();
        Canvas::new(width as u32, height as u32)
    }

    /// Slot rectangles on `canvas`.
    pub fn slots(&self, canvas: Canvas, compact: bool) -> Vec<Slot> {
        compute_layout_slots(
            self.kind,
            f64::from(canvas.width),
            f64::from(canvas.height),
            self.slot_count,
            compact,
        )
    }
}

/// One placement region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Slot {
    /// Position in photo order.
    pub index: usize,
    /// Bounding rectangle in canvas pixels.
    pub rect: Rect,
    /// Clip outline.
    pub shape: SlotShape,
    /// Photo placement rule.
    pub fit: FitMode,
}

/// Proportional spacing derived from the canvas width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Outer padding above, below and beside the stack.
    pub padding: f64,
    /// Gap between neighboring slots.
    pub spacing: f64,
    /// Side margin of the narrow templates.
    pub side_margin: f64,
    /// Corner radius of rounded templates.
    pub corner_radius: f64,
}

impl LayoutMetrics {
    /// Metrics for a canvas of `width` pixels.
    pub fn for_width(width: f64, compact: bool) -> Self {
        if compact {
            Self {
                padding: width * 0.04,
                spacing: width * 0.025,
                side_margin: width * 0.1,
                corner_radius: width * 0.03,
            }
        } else {
            Self {
                padding: width * 0.05,
                spacing: width * 0.03,
                side_margin: width * 0.12,
                corner_radius: width * 0.04,
            }
        }
    }
}

/// Slot rectangles of `kind` on a `canvas_width × canvas_height` canvas.
///
/// `slot_count` is clamped to the template maximum; zero yields no slots. Degenerate
/// canvases that leave no room for a photo also yield no slots.
pub fn compute_layout_slots(
    kind: LayoutKind,
    canvas_width: f64,
    canvas_height: f64,
    slot_count: usize,
    compact: bool,
) -> Vec<Slot> {
    let n = slot_count.min(kind.max_slots());
    if n == 0 || !(canvas_width > 0.0 && canvas_height > 0.0) {
        return Vec::new();
    }
    let m = LayoutMetrics::for_width(canvas_width, compact);

    let slots = match kind {
        LayoutKind::Classic => vertical_stack(
            n,
            m.padding,
            canvas_width - m.padding,
            canvas_height,
            m.padding,
            m.spacing,
            SlotShape::Rect,
        ),
        LayoutKind::Grid => vertical_stack(
            n,
            m.side_margin,
            canvas_width - m.side_margin,
            canvas_height,
            m.padding,
            m.spacing,
            SlotShape::Rect,
        ),
        LayoutKind::Holiday => vertical_stack(
            n,
            m.side_margin,
            canvas_width - m.side_margin,
            canvas_height,
            m.padding,
            m.spacing,
            SlotShape::RoundedRect {
                radius: m.corner_radius,
            },
        ),
        LayoutKind::Hearts => hearts(n, canvas_width, canvas_height, &m),
        LayoutKind::Filmstrip => {
            let lane = filmstrip_lane_width(canvas_width);
            vertical_stack(
                n,
                lane,
                canvas_width - lane,
                canvas_height,
                m.padding,
                m.spacing,
                SlotShape::Rect,
            )
        }
        LayoutKind::Collage => collage(n, canvas_width, canvas_height, &m),
    };

    slots
        .into_iter()
        .filter(|s| s.rect.width() > 0.0 && s.rect.height() > 0.0)
        .collect()
}

/// Like [`compute_layout_slots`] but keyed by template id; unknown ids yield no slots.
pub fn compute_layout_slots_by_id(
    template_id: &str,
    canvas_width: f64,
    canvas_height: f64,
    slot_count: usize,
    compact: bool,
) -> Vec<Slot> {
    match LayoutKind::parse(template_id) {
        Some(kind) => compute_layout_slots(kind, canvas_width, canvas_height, slot_count, compact),
        None => {
            tracing::debug!(template_id, "unknown layout id, no slots");
            Vec::new()
        }
    }
}

/// `photoHeight = (H − 2·padding − N·spacing) / N`, stacked from `padding` downwards.
fn vertical_stack(
    n: usize,
    x0: f64,
    x1: f64,
    canvas_height: f64,
    padding: f64,
    spacing: f64,
    shape: SlotShape,
) -> Vec<Slot> {
    let count = n as f64;
    let h = (canvas_height - 2.0 * padding - count * spacing) / count;
    (0..n)
        .map(|index| {
            let y0 = padding + index as f64 * (h + spacing);
            Slot {
                index,
                rect: Rect::new(x0, y0, x1, y0 + h),
                shape,
                fit: FitMode::Cover,
            }
        })
        .collect()
}

fn hearts(n: usize, canvas_width: f64, canvas_height: f64, m: &LayoutMetrics) -> Vec<Slot> {
    let spacing = m.spacing * 2.0;
    let count = n as f64;
    let cell_h = (canvas_height - 2.0 * m.padding - count * spacing) / count;
    let side = (canvas_width - 2.0 * m.padding).min(cell_h);
    let x0 = (canvas_width - side) / 2.0;
    (0..n)
        .map(|index| {
            let y0 = m.padding + index as f64 * (cell_h + spacing) + (cell_h - side) / 2.0;
            Slot {
                index,
                rect: Rect::new(x0, y0, x0 + side, y0 + side),
                shape: SlotShape::Heart,
                fit: FitMode::Square,
            }
        })
        .collect()
}

fn collage(n: usize, canvas_width: f64, canvas_height: f64, m: &LayoutMetrics) -> Vec<Slot> {
    const COLS: usize = 2;
    const ROWS: usize = 3;
    let cell_w = (canvas_width - 2.0 * m.padding - (COLS - 1) as f64 * m.spacing) / COLS as f64;
    let cell_h = (canvas_height - 2.0 * m.padding - (ROWS - 1) as f64 * m.spacing) / ROWS as f64;
    let radius = m.corner_radius * 0.6;
    (0..n)
        .map(|index| {
            let col = (index % COLS) as f64;
            let row = (index / COLS) as f64;
            let x0 = m.padding + col * (cell_w + m.spacing);
            let y0 = m.padding + row * (cell_h + m.spacing);
            Slot {
                index,
                rect: Rect::new(x0, y0, x0 + cell_w, y0 + cell_h),
                shape: SlotShape::RoundedRect { radius },
                fit: FitMode::Cover,
            }
        })
        .collect()
}

fn filmstrip_lane_width(canvas_width: f64) -> f64 {
    canvas_width * 0.14
}

/// Sprocket holes tiled down both filmstrip lanes.
///
/// Holes are `0.06w × 0.04w`, repeat every `0.08w` and are centered in each lane.
pub fn filmstrip_sprockets(canvas_width: f64, canvas_height: f64) -> Vec<Rect> {
    let lane = filmstrip_lane_width(canvas_width);
    let hole_w = canvas_width * 0.06;
    let hole_h = canvas_width * 0.04;
    let step = canvas_width * 0.08;
    if !(step > 0.0) || canvas_height <= hole_h {
        return Vec::new();
    }

    let left_x = (lane - hole_w) / 2.0;
    let right_x = canvas_width - lane + left_x;
    let mut holes = Vec::new();
    let mut y = (step - hole_h) / 2.0;
    while y + hole_h <= canvas_height {
        holes.push(Rect::new(left_x, y, left_x + hole_w, y + hole_h));
        holes.push(Rect::new(right_x, y, right_x + hole_w, y + hole_h));
        y += step;
    }
    holes
}

#[cfg(test)]
#[path = "../../tests/unit/layout/templates.rs"]
mod tests;
