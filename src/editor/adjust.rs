use crate::{
    config::BoothConfig,
    editor::crop::{CropHandle, CropRect, CursorIcon},
    effects::tonal::{AdjustmentState, Slider, apply_tonal},
    foundation::{
        core::{Canvas, Point, Rect, Rgba8},
        error::{BoothError, BoothResult},
        raster::Raster,
    },
    interaction::pointer::{PointerEvent, PointerId, PointerPhase, ViewportMapping},
    layout::shapes::ring_path,
    render::{
        paint::{bezpath_to_cpu, rect_to_cpu, solid},
        photo::Photo,
        surface::Surface,
    },
};

const SCRIM: Rgba8 = Rgba8::rgba(0, 0, 0, 128);
const OUTLINE: Rgba8 = Rgba8::WHITE;
const HANDLE_EDGE: Rgba8 = Rgba8::rgba(0, 0, 0, 200);
const HANDLE_PX: f64 = 10.0;
const DASH_PX: f64 = 6.0;
const GAP_PX: f64 = 4.0;
const LINE_PX: f64 = 2.0;

/// Which tool the sub-editor shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Tonal sliders.
    #[default]
    Adjust,
    /// Crop box with handles.
    Crop,
}

#[derive(Clone, Debug)]
enum SourceState {
    Loading,
    Ready { source: Raster, preview: Raster },
}

#[derive(Clone, Copy, Debug)]
struct CropDrag {
    pointer: PointerId,
    handle: CropHandle,
    last: Point,
}

/// Modal adjust/crop tool over one photo.
///
/// The editor owns a decoded copy of the photo; nothing reaches the session until
/// [`AdjustEditor::save`] produces a replacement.
#[derive(Clone, Debug)]
pub struct AdjustEditor {
    photo_index: usize,
    preview_max_edge: u32,
    state: SourceState,
    mode: EditorMode,
    adjustments: AdjustmentState,
    crop: CropRect,
    display: Option<Rect>,
    drag: Option<CropDrag>,
    hover: Option<CropHandle>,
}

impl AdjustEditor {
    /// Editor for the photo at `photo_index`, still waiting for its source.
    pub fn open(photo_index: usize, config: &BoothConfig) -> Self {
        Self {
            photo_index,
            preview_max_edge: config.preview_max_edge.max(1),
            state: SourceState::Loading,
            mode: EditorMode::default(),
            adjustments: AdjustmentState::default(),
            crop: CropRect::default(),
            display: None,
            drag: None,
            hover: None,
        }
    }

    /// Index of the edited photo in the session.
    pub fn photo_index(&self) -> usize {
        self.photo_index
    }

    /// `true` once the source has been decoded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, SourceState::Ready { .. })
    }

    /// Decode `photo` and become ready. On failure the editor stays in loading state.
    #[tracing::instrument(skip(self, photo), fields(photo_index = self.photo_index))]
    pub fn load(&mut self, photo: &Photo) -> BoothResult<()> {
        let source = photo.decode()?;
        self.load_raster(source)
    }

    /// Become ready with an already decoded source.
    pub fn load_raster(&mut self, source: Raster) -> BoothResult<()> {
        let (w, h) = preview_size(source.width(), source.height(), self.preview_max_edge);
        let preview = if (w, h) == (source.width(), source.height()) {
            source.clone()
        } else {
            source.resized(w, h)?
        };
        tracing::debug!(
            source_w = source.width(),
            source_h = source.height(),
            preview_w = w,
            preview_h = h,
            "editor source ready"
        );
        self.state = SourceState::Ready { source, preview };
        Ok(())
    }

    /// Natural size of the source, once loaded.
    pub fn source_size(&self) -> Option<(u32, u32)> {
        match &self.state {
            SourceState::Ready { source, .. } => Some((source.width(), source.height())),
            SourceState::Loading => None,
        }
    }

    /// Size of the preview surface, once loaded.
    pub fn preview_canvas(&self) -> Option<Canvas> {
        match &self.state {
            SourceState::Ready { preview, .. } => Some(Canvas {
                width: preview.width(),
                height: preview.height(),
            }),
            SourceState::Loading => None,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch tools. Slider and crop state survive; an active drag is released.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode != self.mode {
            self.release_all();
            self.mode = mode;
        }
    }

    /// Slider values.
    pub fn adjustments(&self) -> &AdjustmentState {
        &self.adjustments
    }

    /// Set one slider, clamped to its range.
    pub fn set_slider(&mut self, slider: Slider, value: f32) {
        self.adjustments.set(slider, value);
    }

    /// Replace every slider value.
    pub fn set_adjustments(&mut self, adjustments: AdjustmentState) {
        self.adjustments = adjustments.clamped();
    }

    /// Crop box in percent of the source.
    pub fn crop(&self) -> CropRect {
        self.crop
    }

    /// Replace the crop box; out-of-range values are pulled back inside the invariants.
    pub fn set_crop(&mut self, crop: CropRect) {
        self.crop = crop.validated();
    }

    /// Where the preview is displayed on screen. Pointer events are mapped through it.
    pub fn set_display_rect(&mut self, display: Rect) -> BoothResult<()> {
        if self.preview_canvas().is_none() {
            return Err(BoothError::validation("editor source not loaded"));
        }
        self.display = Some(display);
        Ok(())
    }

    /// Screen mapping for the current preview; identity until a display rect is set.
    fn viewport(&self) -> Option<ViewportMapping> {
        let canvas = self.preview_canvas()?;
        Some(match self.display {
            Some(display) => ViewportMapping { display, canvas },
            None => ViewportMapping::identity(canvas),
        })
    }

    /// `true` while a crop handle is grabbed.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Advisory cursor for the last pointer position.
    pub fn cursor(&self) -> CursorIcon {
        if self.mode != EditorMode::Crop {
            return CursorIcon::Default;
        }
        self.drag
            .map(|d| d.handle)
            .or(self.hover)
            .map_or(CursorIcon::Default, CropHandle::cursor)
    }

    /// Feed a pointer event. Returns `true` when the crop box changed.
    ///
    /// Only Crop mode reacts. A drag follows the pointer that started it; other
    /// pointers only update the hover cursor.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        if self.mode != EditorMode::Crop {
            return false;
        }
        let Some(viewport) = self.viewport() else {
            return false;
        };
        let pct = viewport.to_percent(event.position);

        match event.phase {
            PointerPhase::Down => {
                if self.drag.is_none() {
                    let hit = self.crop.hit_test(pct);
                    self.hover = hit;
                    self.drag = hit.map(|handle| CropDrag {
                        pointer: event.id,
                        handle,
                        last: pct,
                    });
                }
                false
            }
            PointerPhase::Move => match &mut self.drag {
                Some(drag) if drag.pointer == event.id => {
                    let before = self.crop;
                    self.crop = before.dragged(drag.handle, pct - drag.last);
                    drag.last = pct;
                    self.crop != before
                }
                Some(_) => false,
                None => {
                    self.hover = self.crop.hit_test(pct);
                    false
                }
            },
            PointerPhase::Up | PointerPhase::Cancel => {
                if self.drag.is_some_and(|d| d.pointer == event.id) {
                    self.drag = None;
                }
                false
            }
        }
    }

    /// Synthetic release of every pointer.
    pub fn release_all(&mut self) {
        self.drag = None;
        self.hover = None;
    }

    /// Sliders back to neutral and the crop box back to default. The editor stays open.
    pub fn reset(&mut self) {
        self.release_all();
        self.adjustments = AdjustmentState::default();
        self.crop = CropRect::default();
    }

    /// Render the preview surface, `None` while loading.
    ///
    /// Crop mode darkens everything outside the crop box and draws a dashed outline
    /// plus the eight resize handles.
    pub fn preview(&self) -> BoothResult<Option<Raster>> {
        let SourceState::Ready { preview, .. } = &self.state else {
            return Ok(None);
        };
        let toned = apply_tonal(preview, &self.adjustments);
        if self.mode == EditorMode::Adjust {
            return Ok(Some(toned));
        }

        let mut surface = Surface::from_raster(&toned)?;
        let canvas = surface.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let to_px = |p: Point| Point::new(p.x / 100.0 * w, p.y / 100.0 * h);
        let crop = &self.crop;
        let inner = Rect::from_points(
            to_px(Point::new(crop.x, crop.y)),
            to_px(Point::new(crop.right(), crop.bottom())),
        );

        surface.draw_layer(|ctx| {
            ctx.set_paint(solid(SCRIM));
            ctx.fill_path(&bezpath_to_cpu(&ring_path(canvas.rect(), inner)));

            ctx.set_paint(solid(OUTLINE));
            for dash in dashed_outline(inner) {
                ctx.fill_rect(&rect_to_cpu(dash));
            }

            for handle in CropHandle::RESIZE {
                let c = to_px(handle.anchor(crop));
                let outer = Rect::from_center_size(c, (HANDLE_PX + 2.0, HANDLE_PX + 2.0));
                ctx.set_paint(solid(HANDLE_EDGE));
                ctx.fill_rect(&rect_to_cpu(outer));
                ctx.set_paint(solid(OUTLINE));
                ctx.fill_rect(&rect_to_cpu(Rect::from_center_size(c, (HANDLE_PX, HANDLE_PX))));
            }
            Ok(())
        })?;

        Ok(Some(surface.to_raster()?))
    }

    /// Bake the edit at full resolution, `None` while loading.
    ///
    /// The tonal pipeline always applies; in Crop mode the result is also cut to the
    /// crop box.
    #[tracing::instrument(skip(self), fields(photo_index = self.photo_index, mode = ?self.mode))]
    pub fn save(&self) -> BoothResult<Option<Photo>> {
        let SourceState::Ready { source, .. } = &self.state else {
            tracing::debug!("save ignored, source not loaded");
            return Ok(None);
        };
        let base = match self.mode {
            EditorMode::Adjust => source.clone(),
            EditorMode::Crop => {
                let (x, y, w, h) = self.crop.to_pixels(source.width(), source.height());
                source.crop(x, y, w, h)?
            }
        };
        let out = apply_tonal(&base, &self.adjustments);
        Ok(Some(Photo::from_raster(&out)?))
    }
}

fn preview_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    let w = (f64::from(width) * scale).round().max(1.0) as u32;
    let h = (f64::from(height) * scale).round().max(1.0) as u32;
    (w, h)
}

fn dashed_outline(r: Rect) -> Vec<Rect> {
    let half = LINE_PX / 2.0;
    let mut out = Vec::new();
    for y in [r.y0, r.y1] {
        let mut x = r.x0;
        while x < r.x1 {
            let end = (x + DASH_PX).min(r.x1);
            out.push(Rect::new(x, y - half, end, y + half));
            x += DASH_PX + GAP_PX;
        }
    }
    for x in [r.x0, r.x1] {
        let mut y = r.y0;
        while y < r.y1 {
            let end = (y + DASH_PX).min(r.y1);
            out.push(Rect::new(x - half, y, x + half, end));
            y += DASH_PX + GAP_PX;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/editor/adjust.rs"]
mod tests;
