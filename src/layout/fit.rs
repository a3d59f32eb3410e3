use crate::foundation::core::{Affine, Rect};

/// Where to draw an image, relative to the top-left corner of its frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    /// Left edge; `<= 0` when the image overflows horizontally.
    pub draw_x: f64,
    /// Top edge; `<= 0` when the image overflows vertically.
    pub draw_y: f64,
    /// Drawn width.
    pub draw_width: f64,
    /// Drawn height.
    pub draw_height: f64,
}

impl FitRect {
    /// Drawn rectangle translated so the frame starts at `frame.origin()`.
    pub fn in_frame(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x0 + self.draw_x,
            frame.y0 + self.draw_y,
            frame.x0 + self.draw_x + self.draw_width,
            frame.y0 + self.draw_y + self.draw_height,
        )
    }
}

/// Cover-fit an image of aspect `image_aspect` (width / height) into a frame.
///
/// The image is scaled uniformly so it covers the whole frame. Wider images are matched to
/// the frame height and centered horizontally; others are matched to the frame width and
/// centered vertically. Overflow lands outside `[0,frame_width] × [0,frame_height]` and is
/// clipped by the caller. A non-positive or non-finite aspect stretches to the frame.
pub fn compute_fit_rect(image_aspect: f64, frame_width: f64, frame_height: f64) -> FitRect {
    if !(image_aspect.is_finite() && image_aspect > 0.0) || frame_height <= 0.0 {
        return FitRect {
            draw_x: 0.0,
            draw_y: 0.0,
            draw_width: frame_width.max(0.0),
            draw_height: frame_height.max(0.0),
        };
    }

    let frame_aspect = frame_width / frame_height;
    if image_aspect > frame_aspect {
        let draw_height = frame_height;
        let draw_width = frame_height * image_aspect;
        FitRect {
            draw_x: (frame_width - draw_width) / 2.0,
            draw_y: 0.0,
            draw_width,
            draw_height,
        }
    } else {
        let draw_width = frame_width;
        let draw_height = frame_width / image_aspect;
        FitRect {
            draw_x: 0.0,
            draw_y: (frame_height - draw_height) / 2.0,
            draw_width,
            draw_height,
        }
    }
}

/// How a photo is placed into its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Cover the whole slot rectangle.
    Cover,
    /// Center-crop to a square and fill the largest square centered in the slot.
    Square,
}

impl FitMode {
    /// Region of `slot` the image must cover.
    pub fn frame(self, slot: Rect) -> Rect {
        match self {
            FitMode::Cover => slot,
            FitMode::Square => {
                let side = slot.width().min(slot.height());
                Rect::from_center_size(slot.center(), (side, side))
            }
        }
    }

    /// Destination rectangle for an image of `image_w × image_h` pixels placed in `slot`.
    pub fn place(self, image_w: u32, image_h: u32, slot: Rect) -> Rect {
        let aspect = f64::from(image_w) / f64::from(image_h.max(1));
        let frame = self.frame(slot);
        compute_fit_rect(aspect, frame.width(), frame.height()).in_frame(frame)
    }

    /// Affine mapping image pixel space onto the destination rectangle.
    pub fn image_transform(self, image_w: u32, image_h: u32, slot: Rect) -> Affine {
        let dst = self.place(image_w, image_h, slot);
        Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(
                dst.width() / f64::from(image_w.max(1)),
                dst.height() / f64::from(image_h.max(1)),
            )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
