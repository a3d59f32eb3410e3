use crate::foundation::core::{Canvas, Point, Rect};

/// Identifier of one contact. Mouse input uses a single fixed id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Id used for mouse input.
    pub const MOUSE: PointerId = PointerId(0);
}

/// Lifecycle phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Contact pressed.
    Down,
    /// Contact moved.
    Move,
    /// Contact released.
    Up,
    /// Contact aborted by the platform.
    Cancel,
}

/// One mouse or touch event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Contact id.
    pub id: PointerId,
    /// Phase.
    pub phase: PointerPhase,
    /// Position on screen.
    pub position: Point,
}

impl PointerEvent {
    /// Event constructor.
    pub fn new(id: PointerId, phase: PointerPhase, position: Point) -> Self {
        Self {
            id,
            phase,
            position,
        }
    }

    /// Mouse event at `(x, y)`.
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(PointerId::MOUSE, phase, Point::new(x, y))
    }

    /// Touch event for contact `id` at `(x, y)`.
    pub fn touch(id: u64, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(PointerId(id), phase, Point::new(x, y))
    }
}

/// Active contacts in press order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerSet {
    contacts: Vec<(PointerId, Point)>,
}

impl PointerSet {
    /// Record `event` at `position` (already mapped to the caller's space).
    ///
    /// Returns the number of active contacts afterwards. Moves and releases of unknown
    /// contacts are ignored; a repeated press of a known contact updates its position.
    pub fn apply(&mut self, event: &PointerEvent, position: Point) -> usize {
        let existing = self.contacts.iter().position(|(id, _)| *id == event.id);
        match (event.phase, existing) {
            (PointerPhase::Down, None) => self.contacts.push((event.id, position)),
            (PointerPhase::Down | PointerPhase::Move, Some(i)) => self.contacts[i].1 = position,
            (PointerPhase::Move, None) => {}
            (PointerPhase::Up | PointerPhase::Cancel, Some(i)) => {
                self.contacts.remove(i);
            }
            (PointerPhase::Up | PointerPhase::Cancel, None) => {}
        }
        self.contacts.len()
    }

    /// Number of active contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// `true` without any active contact.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Position of contact `id`.
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.contacts
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, p)| *p)
    }

    /// First two contacts in press order.
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.contacts.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Drop every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}

/// Distance and angle (degrees, `atan2` of `b - a`) between two contacts.
pub fn pinch_metrics(a: Point, b: Point) -> (f64, f64) {
    let d = b - a;
    (d.hypot(), d.y.atan2(d.x).to_degrees())
}

/// Screen-to-canvas mapping of a displayed canvas.
///
/// The canvas backing store is `canvas` pixels; it is shown at `display` on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMapping {
    /// On-screen rectangle the canvas occupies.
    pub display: Rect,
    /// Backing size.
    pub canvas: Canvas,
}

impl ViewportMapping {
    /// Canvas shown at its backing size at the screen origin.
    pub fn identity(canvas: Canvas) -> Self {
        Self {
            display: canvas.rect(),
            canvas,
        }
    }

    /// Canvas pixels per displayed pixel, per axis.
    pub fn scale(&self) -> (f64, f64) {
        let sx = if self.display.width() > 0.0 {
            f64::from(self.canvas.width) / self.display.width()
        } else {
            1.0
        };
        let sy = if self.display.height() > 0.0 {
            f64::from(self.canvas.height) / self.display.height()
        } else {
            1.0
        };
        (sx, sy)
    }

    /// Map a screen point into canvas pixels.
    pub fn to_canvas(&self, screen: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (screen.x - self.display.x0) * sx,
            (screen.y - self.display.y0) * sy,
        )
    }

    /// Map a screen point into percent of the canvas, `[0,100]` inside it.
    pub fn to_percent(&self, screen: Point) -> Point {
        let p = self.to_canvas(screen);
        Point::new(
            p.x / f64::from(self.canvas.width) * 100.0,
            p.y / f64::from(self.canvas.height) * 100.0,
        )
    }
}
