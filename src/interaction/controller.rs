use crate::{
    foundation::core::{Canvas, Point},
    interaction::{
        pointer::{PointerEvent, PointerPhase, PointerSet, ViewportMapping, pinch_metrics},
        sticker::{
            RESIZE_STEP, ROTATE_STEP, Sticker, StickerBoard, StickerId, default_sticker_position,
        },
    },
};

/// Distance, angle and sticker transform captured when a two-contact gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureBaseline {
    /// Contact distance in canvas pixels.
    pub distance: f64,
    /// Contact angle in degrees.
    pub angle: f64,
    /// Sticker size at gesture start.
    pub size: f64,
    /// Sticker rotation at gesture start.
    pub rotation: f64,
}

/// Pointer-driven manipulation of the sticker overlay.
///
/// Owns the sticker board; every change goes through this controller.
#[derive(Clone, Debug)]
pub struct OverlayController {
    board: StickerBoard,
    viewport: ViewportMapping,
    pointers: PointerSet,
    selected: Option<StickerId>,
    dragged: Option<StickerId>,
    gesture: Option<GestureBaseline>,
    seed: u64,
}

impl OverlayController {
    /// Empty overlay on `canvas`, displayed at backing size.
    pub fn new(canvas: Canvas, seed: u64) -> Self {
        Self::with_board(StickerBoard::default(), canvas, seed)
    }

    /// Overlay over an existing board.
    pub fn with_board(board: StickerBoard, canvas: Canvas, seed: u64) -> Self {
        Self {
            board,
            viewport: ViewportMapping::identity(canvas),
            pointers: PointerSet::default(),
            selected: None,
            dragged: None,
            gesture: None,
            seed,
        }
    }

    /// Current board.
    pub fn board(&self) -> &StickerBoard {
        &self.board
    }

    /// Stickers in draw order.
    pub fn stickers(&self) -> &[Sticker] {
        self.board.stickers()
    }

    /// Selected sticker, if any.
    pub fn selected(&self) -> Option<StickerId> {
        self.selected
    }

    /// Sticker being dragged, if any.
    pub fn dragged(&self) -> Option<StickerId> {
        self.dragged
    }

    /// Active pinch baseline, if any.
    pub fn gesture(&self) -> Option<GestureBaseline> {
        self.gesture
    }

    /// Replace the screen-to-canvas mapping (layout or window changes).
    pub fn set_viewport(&mut self, viewport: ViewportMapping) {
        self.viewport = viewport;
    }

    /// Add a palette glyph at its seeded default position.
    pub fn add_from_palette(&mut self, glyph: &str) -> StickerId {
        let at = default_sticker_position(self.seed, self.board.next_id(), self.viewport.canvas);
        self.add_at(glyph, at)
    }

    /// Add a glyph centered at canvas point `at`.
    pub fn add_at(&mut self, glyph: &str, at: Point) -> StickerId {
        let (board, id) = self.board.with_added(glyph, at);
        self.board = board;
        tracing::debug!(id = id.0, glyph, "sticker added");
        id
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        let at = self.viewport.to_canvas(event.position);
        let before = self.pointers.len();
        let after = self.pointers.apply(&event, at);

        match event.phase {
            PointerPhase::Down if after == 1 && before == 0 => self.press(at),
            PointerPhase::Down if after == 2 && before == 1 => self.begin_gesture(),
            PointerPhase::Down => {}
            PointerPhase::Move => self.track(event, at),
            PointerPhase::Up | PointerPhase::Cancel => self.released(after),
        }
    }

    /// Synthetic release of every contact.
    pub fn release_all(&mut self) {
        self.pointers.clear();
        self.released(0);
    }

    fn press(&mut self, at: Point) {
        match self.board.hit_test(at) {
            Some(id) => {
                self.selected = Some(id);
                self.dragged = Some(id);
            }
            None => {
                self.selected = None;
                self.dragged = None;
            }
        }
    }

    fn begin_gesture(&mut self) {
        let (Some(id), Some((a, b))) = (self.dragged, self.pointers.pair()) else {
            return;
        };
        let Some(sticker) = self.board.get(id) else {
            return;
        };
        let (distance, angle) = pinch_metrics(a, b);
        self.gesture = Some(GestureBaseline {
            distance,
            angle,
            size: sticker.size,
            rotation: sticker.rotation,
        });
    }

    fn track(&mut self, event: PointerEvent, at: Point) {
        let Some(id) = self.dragged else {
            return;
        };
        if self.pointers.len() >= 2 {
            let (Some(base), Some((a, b))) = (self.gesture, self.pointers.pair()) else {
                return;
            };
            let (distance, angle) = pinch_metrics(a, b);
            if base.distance <= f64::EPSILON {
                return;
            }
            let size = base.size * distance / base.distance;
            let rotation = base.rotation + angle - base.angle;
            self.board = self
                .board
                .with_updated(id, |s| s.with_size(size).with_rotation(rotation));
        } else if self.pointers.position(event.id).is_some() {
            self.board = self.board.with_updated(id, |s| s.with_position(at));
        }
    }

    fn released(&mut self, remaining: usize) {
        match remaining {
            0 => {
                self.dragged = None;
                self.gesture = None;
            }
            1 => self.gesture = None,
            // the leading pair may have changed; rebase on the current sticker
            _ => self.begin_gesture(),
        }
    }

    /// Grow or shrink a sticker by `delta` pixels (clamped).
    pub fn resize_by(&mut self, id: StickerId, delta: f64) {
        self.board = self.board.with_updated(id, |s| s.with_size(s.size + delta));
    }

    /// Rotate a sticker by `delta` degrees (wrapped).
    pub fn rotate_by(&mut self, id: StickerId, delta: f64) {
        self.board = self
            .board
            .with_updated(id, |s| s.with_rotation(s.rotation + delta));
    }

    /// Grow the selected sticker by one step.
    pub fn grow_selected(&mut self) {
        if let Some(id) = self.selected {
            self.resize_by(id, RESIZE_STEP);
        }
    }

    /// Shrink the selected sticker by one step.
    pub fn shrink_selected(&mut self) {
        if let Some(id) = self.selected {
            self.resize_by(id, -RESIZE_STEP);
        }
    }

    /// Rotate the selected sticker clockwise (`clockwise`) or back by one step.
    pub fn rotate_selected(&mut self, clockwise: bool) {
        if let Some(id) = self.selected {
            let delta = if clockwise { ROTATE_STEP } else { -ROTATE_STEP };
            self.rotate_by(id, delta);
        }
    }

    /// Remove a sticker, clearing any selection or drag that pointed at it.
    pub fn remove(&mut self, id: StickerId) {
        self.board = self.board.without(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
            self.gesture = None;
        }
    }

    /// Drop every sticker and all interaction state.
    pub fn clear(&mut self) {
        self.board = StickerBoard::default();
        self.pointers.clear();
        self.selected = None;
        self.dragged = None;
        self.gesture = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
