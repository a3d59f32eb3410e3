use kurbo::{RoundedRect, Shape};

use crate::foundation::core::{BezPath, Point, Rect};

const OUTLINE_TOLERANCE: f64 = 0.1;

/// Clip outline of a slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotShape {
    /// Plain rectangle.
    Rect,
    /// Rectangle with uniformly rounded corners.
    RoundedRect {
        /// Corner radius in canvas pixels.
        radius: f64,
    },
    /// Heart drawn from four cubic segments inside the slot's bounding box.
    Heart,
}

impl SlotShape {
    /// Closed outline of this shape filling `rect`.
    pub fn outline(self, rect: Rect) -> BezPath {
        match self {
            SlotShape::Rect => rect.to_path(OUTLINE_TOLERANCE),
            SlotShape::RoundedRect { radius } => {
                let r = radius.max(0.0).min(rect.width().min(rect.height()) / 2.0);
                RoundedRect::from_rect(rect, r).to_path(OUTLINE_TOLERANCE)
            }
            SlotShape::Heart => heart_path(rect),
        }
    }

    /// Same shape grown by `amount` on every side.
    ///
    /// Rounded corners grow with the rectangle so the matte keeps an even width.
    pub fn inflated(self, rect: Rect, amount: f64) -> (SlotShape, Rect) {
        let grown = rect.inflate(amount, amount);
        let shape = match self {
            SlotShape::RoundedRect { radius } => SlotShape::RoundedRect {
                radius: radius + amount,
            },
            other => other,
        };
        (shape, grown)
    }

    /// Point containment (nonzero winding).
    pub fn contains(self, rect: Rect, p: Point) -> bool {
        match self {
            SlotShape::Rect => rect.contains(p),
            _ => self.outline(rect).contains(p),
        }
    }
}

/// Heart outline inscribed in `rect`.
///
/// The notch sits at 30% of the height on the vertical center line; the point touches the
/// bottom edge.
pub fn heart_path(rect: Rect) -> BezPath {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let mid = x + w / 2.0;
    let notch = y + h * 0.3;

    let mut path = BezPath::new();
    path.move_to((mid, notch));
    path.curve_to((mid, y), (x, y), (x, notch));
    path.curve_to((x, y + h * 0.6), (mid, y + h * 0.8), (mid, y + h));
    path.curve_to((mid, y + h * 0.8), (x + w, y + h * 0.6), (x + w, notch));
    path.curve_to((x + w, y), (mid, y), (mid, notch));
    path.close_path();
    path
}

/// Ring between `outer` and `inner`; the inner contour runs backwards so a nonzero fill
/// leaves the hole empty.
pub(crate) fn ring_path(outer: Rect, inner: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((outer.x0, outer.y0));
    path.line_to((outer.x1, outer.y0));
    path.line_to((outer.x1, outer.y1));
    path.line_to((outer.x0, outer.y1));
    path.close_path();

    path.move_to((inner.x0, inner.y0));
    path.line_to((inner.x0, inner.y1));
    path.line_to((inner.x1, inner.y1));
    path.line_to((inner.x1, inner.y0));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/layout/shapes.rs"]
mod tests;
