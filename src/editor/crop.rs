use crate::foundation::core::{Point, Vec2};

/// Smallest crop edge, in percent of the source.
pub const MIN_CROP_SIZE: f64 = 10.0;

/// Half-width of the handle hit zones, in percent.
pub const HANDLE_THRESHOLD: f64 = 3.0;

/// Crop region in percent `[0,100]` of the source's natural size.
///
/// Every mutation keeps `width, height >= MIN_CROP_SIZE`, `x, y >= 0`,
/// `x + width <= 100` and `y + height <= 100`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
        }
    }
}

/// Which part of the crop box a pointer grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CropHandle {
    /// Inside the box: translate.
    Move,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
}

impl CropHandle {
    /// The eight resize handles, corners first.
    pub const RESIZE: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
        CropHandle::Top,
        CropHandle::Bottom,
        CropHandle::Left,
        CropHandle::Right,
    ];

    /// Cursor shown while hovering or dragging this handle.
    pub fn cursor(self) -> CursorIcon {
        match self {
            CropHandle::Move => CursorIcon::Move,
            CropHandle::TopLeft | CropHandle::BottomRight => CursorIcon::NwseResize,
            CropHandle::TopRight | CropHandle::BottomLeft => CursorIcon::NeswResize,
            CropHandle::Top | CropHandle::Bottom => CursorIcon::NsResize,
            CropHandle::Left | CropHandle::Right => CursorIcon::EwResize,
        }
    }

    /// Handle anchor on `rect`, in percent.
    pub fn anchor(self, rect: &CropRect) -> Point {
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right(), rect.bottom());
        let (xm, ym) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        match self {
            CropHandle::Move => Point::new(xm, ym),
            CropHandle::TopLeft => Point::new(x0, y0),
            CropHandle::TopRight => Point::new(x1, y0),
            CropHandle::BottomLeft => Point::new(x0, y1),
            CropHandle::BottomRight => Point::new(x1, y1),
            CropHandle::Top => Point::new(xm, y0),
            CropHandle::Bottom => Point::new(xm, y1),
            CropHandle::Left => Point::new(x0, ym),
            CropHandle::Right => Point::new(x1, ym),
        }
    }

    fn edges(self) -> (Option<HEdge>, Option<VEdge>) {
        match self {
            CropHandle::Move => (None, None),
            CropHandle::TopLeft => (Some(HEdge::Left), Some(VEdge::Top)),
            CropHandle::TopRight => (Some(HEdge::Right), Some(VEdge::Top)),
            CropHandle::BottomLeft => (Some(HEdge::Left), Some(VEdge::Bottom)),
            CropHandle::BottomRight => (Some(HEdge::Right), Some(VEdge::Bottom)),
            CropHandle::Top => (None, Some(VEdge::Top)),
            CropHandle::Bottom => (None, Some(VEdge::Bottom)),
            CropHandle::Left => (Some(HEdge::Left), None),
            CropHandle::Right => (Some(HEdge::Right), None),
        }
    }
}

#[derive(Clone, Copy)]
enum HEdge {
    Left,
    Right,
}

#[derive(Clone, Copy)]
enum VEdge {
    Top,
    Bottom,
}

/// Advisory pointer cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorIcon {
    /// Plain arrow.
    #[default]
    Default,
    /// Four-way move.
    Move,
    /// Diagonal, top-left to bottom-right.
    NwseResize,
    /// Diagonal, top-right to bottom-left.
    NeswResize,
    /// Vertical.
    NsResize,
    /// Horizontal.
    EwResize,
}

impl CursorIcon {
    /// CSS cursor keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorIcon::Default => "default",
            CursorIcon::Move => "move",
            CursorIcon::NwseResize => "nwse-resize",
            CursorIcon::NeswResize => "nesw-resize",
            CursorIcon::NsResize => "ns-resize",
            CursorIcon::EwResize => "ew-resize",
        }
    }
}

impl CropRect {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// `true` when all invariants hold.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width >= MIN_CROP_SIZE
            && self.height >= MIN_CROP_SIZE
            && self.right() <= 100.0
            && self.bottom() <= 100.0
    }

    /// Nearest rectangle satisfying the invariants; non-finite input yields the default.
    pub fn validated(self) -> Self {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Self::default();
        }
        let width = self.width.clamp(MIN_CROP_SIZE, 100.0);
        let height = self.height.clamp(MIN_CROP_SIZE, 100.0);
        Self {
            x: self.x.clamp(0.0, 100.0 - width),
            y: self.y.clamp(0.0, 100.0 - height),
            width,
            height,
        }
    }

    /// Handle under `p` (percent). Corners win over edges, edges over the interior.
    pub fn hit_test(&self, p: Point) -> Option<CropHandle> {
        let near = |a: f64, b: f64| (a - b).abs() < HANDLE_THRESHOLD;
        let (x0, y0, x1, y1) = (self.x, self.y, self.right(), self.bottom());

        for corner in [
            CropHandle::TopLeft,
            CropHandle::TopRight,
            CropHandle::BottomLeft,
            CropHandle::BottomRight,
        ] {
            let a = corner.anchor(self);
            if near(p.x, a.x) && near(p.y, a.y) {
                return Some(corner);
            }
        }

        let within_x = p.x > x0 && p.x < x1;
        let within_y = p.y > y0 && p.y < y1;
        if within_x && near(p.y, y0) {
            return Some(CropHandle::Top);
        }
        if within_x && near(p.y, y1) {
            return Some(CropHandle::Bottom);
        }
        if within_y && near(p.x, x0) {
            return Some(CropHandle::Left);
        }
        if within_y && near(p.x, x1) {
            return Some(CropHandle::Right);
        }

        (within_x && within_y).then_some(CropHandle::Move)
    }

    /// Rectangle after dragging `handle` by `delta` percent.
    ///
    /// `Move` translates and clamps into the source. Resize handles adjust each grabbed
    /// edge independently; an edge whose result would break an invariant is left as is.
    pub fn dragged(&self, handle: CropHandle, delta: Vec2) -> Self {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return *self;
        }
        if handle == CropHandle::Move {
            return Self {
                x: (self.x + delta.x).clamp(0.0, (100.0 - self.width).max(0.0)),
                y: (self.y + delta.y).clamp(0.0, (100.0 - self.height).max(0.0)),
                ..*self
            };
        }

        let mut out = *self;
        let (h, v) = handle.edges();
        match h {
            Some(HEdge::Left) => {
                let x = self.x + delta.x;
                let width = self.width - delta.x;
                if x >= 0.0 && width >= MIN_CROP_SIZE {
                    out.x = x;
                    out.width = width;
                }
            }
            Some(HEdge::Right) => {
                let width = self.width + delta.x;
                if width >= MIN_CROP_SIZE && self.x + width <= 100.0 {
                    out.width = width;
                }
            }
            None => {}
        }
        match v {
            Some(VEdge::Top) => {
                let y = self.y + delta.y;
                let height = self.height - delta.y;
                if y >= 0.0 && height >= MIN_CROP_SIZE {
                    out.y = y;
                    out.height = height;
                }
            }
            Some(VEdge::Bottom) => {
                let height = self.height + delta.y;
                if height >= MIN_CROP_SIZE && self.y + height <= 100.0 {
                    out.height = height;
                }
            }
            None => {}
        }
        out
    }

    /// Pixel rectangle `(x, y, w, h)` of this crop on a `width × height` source.
    pub fn to_pixels(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (fw, fh) = (f64::from(width), f64::from(height));
        let x = ((self.x / 100.0 * fw).round() as u32).min(width.saturating_sub(1));
        let y = ((self.y / 100.0 * fh).round() as u32).min(height.saturating_sub(1));
        let w = ((self.width / 100.0 * fw).round() as u32).clamp(1, width - x);
        let h = ((self.height / 100.0 * fh).round() as u32).clamp(1, height - y);
        (x, y, w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/crop.rs"]
mod tests;
