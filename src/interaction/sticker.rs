use crate::foundation::{
    core::{Canvas, Point},
    math::{Fnv1a64, wrap_degrees},
};

/// Smallest sticker edge in canvas pixels.
pub const MIN_STICKER_SIZE: f64 = 24.0;
/// Largest sticker edge in canvas pixels.
pub const MAX_STICKER_SIZE: f64 = 120.0;
/// Edge of a freshly placed sticker.
pub const DEFAULT_STICKER_SIZE: f64 = 48.0;
/// Size change of one resize control press.
pub const RESIZE_STEP: f64 = 8.0;
/// Rotation change of one rotate control press, in degrees.
pub const ROTATE_STEP: f64 = 15.0;

/// Glyphs offered by the sticker palette.
pub const STICKER_PALETTE: [&str; 16] = [
    "\u{2764}\u{FE0F}",
    "\u{1F495}",
    "\u{2B50}",
    "\u{2728}",
    "\u{1F338}",
    "\u{1F33C}",
    "\u{1F308}",
    "\u{1F98B}",
    "\u{1F380}",
    "\u{1F451}",
    "\u{1F60E}",
    "\u{1F618}",
    "\u{1F389}",
    "\u{1F31F}",
    "\u{1F370}",
    "\u{1F4F8}",
];

/// Unique, monotonically assigned sticker id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StickerId(pub u64);

/// Emoji overlay centered at `(x, y)` in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sticker {
    /// Identity.
    pub id: StickerId,
    /// Emoji glyph.
    pub glyph: String,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Edge length, within `[MIN_STICKER_SIZE, MAX_STICKER_SIZE]`.
    pub size: f64,
    /// Clockwise rotation in degrees, within `[0, 360)`.
    pub rotation: f64,
}

/// Clamp a size into the sticker range; NaN becomes the default size.
pub fn clamp_sticker_size(size: f64) -> f64 {
    if size.is_nan() {
        return DEFAULT_STICKER_SIZE;
    }
    size.clamp(MIN_STICKER_SIZE, MAX_STICKER_SIZE)
}

impl Sticker {
    /// Sticker of the default size and no rotation.
    pub fn new(id: StickerId, glyph: impl Into<String>, at: Point) -> Self {
        Self {
            id,
            glyph: glyph.into(),
            x: at.x,
            y: at.y,
            size: DEFAULT_STICKER_SIZE,
            rotation: 0.0,
        }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same sticker moved to `at`. Positions are not clamped to the canvas.
    pub fn with_position(&self, at: Point) -> Self {
        Self {
            x: at.x,
            y: at.y,
            ..self.clone()
        }
    }

    /// Same sticker with a clamped size.
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size: clamp_sticker_size(size),
            ..self.clone()
        }
    }

    /// Same sticker with a wrapped rotation.
    pub fn with_rotation(&self, rotation: f64) -> Self {
        Self {
            rotation: wrap_degrees(rotation),
            ..self.clone()
        }
    }

    /// Copy with size and rotation brought back into range.
    pub fn normalized(&self) -> Self {
        self.with_size(self.size).with_rotation(self.rotation)
    }

    /// `true` when `p` lies strictly within `size` of the center.
    pub fn hit(&self, p: Point) -> bool {
        self.center().distance(p) < self.size
    }
}

/// Ordered sticker collection with persistent updates.
///
/// Every mutation returns a new board; the receiver is left untouched.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerBoard {
    stickers: Vec<Sticker>,
    next_id: u64,
}

impl StickerBoard {
    /// Board holding `stickers` (normalized), continuing ids after the largest one.
    pub fn from_stickers(stickers: impl IntoIterator<Item = Sticker>) -> Self {
        let stickers: Vec<Sticker> = stickers.into_iter().map(|s| s.normalized()).collect();
        let next_id = stickers.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        Self { stickers, next_id }
    }

    /// Stickers in insertion order.
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    /// Number of stickers.
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// `true` when no sticker is placed.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Id the next added sticker will receive.
    pub fn next_id(&self) -> StickerId {
        StickerId(self.next_id)
    }

    /// Sticker by id.
    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Board with a new sticker at `at`, plus the new id.
    pub fn with_added(&self, glyph: impl Into<String>, at: Point) -> (Self, StickerId) {
        let id = StickerId(self.next_id);
        let mut stickers = self.stickers.clone();
        stickers.push(Sticker::new(id, glyph, at));
        (
            Self {
                stickers,
                next_id: self.next_id + 1,
            },
            id,
        )
    }

    /// Board with sticker `id` replaced by `update(old)`; unknown ids leave it unchanged.
    pub fn with_updated(&self, id: StickerId, update: impl FnOnce(&Sticker) -> Sticker) -> Self {
        let mut stickers = self.stickers.clone();
        if let Some(slot) = stickers.iter_mut().find(|s| s.id == id) {
            *slot = Sticker { id, ..update(slot) }.normalized();
        }
        Self {
            stickers,
            next_id: self.next_id,
        }
    }

    /// Board without sticker `id`.
    pub fn without(&self, id: StickerId) -> Self {
        Self {
            stickers: self.stickers.iter().filter(|s| s.id != id).cloned().collect(),
            next_id: self.next_id,
        }
    }

    /// First sticker in insertion order whose radius contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<StickerId> {
        self.stickers.iter().find(|s| s.hit(p)).map(|s| s.id)
    }
}

/// Seeded default position for sticker `id`, inside a 15% margin of the canvas.
pub fn default_sticker_position(seed: u64, id: StickerId, canvas: Canvas) -> Point {
    let unit = |axis: u64| {
        let mut h = Fnv1a64::new(seed);
        h.write_u64(id.0);
        h.write_u64(axis);
        h.unit_f64()
    };
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let (mx, my) = (w * 0.15, h * 0.15);
    Point::new(mx + unit(0) * (w - 2.0 * mx), my + unit(1) * (h - 2.0 * my))
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/sticker.rs"]
mod tests;
