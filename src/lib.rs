//! Snapbooth is a photo-booth compositing engine.
//!
//! It turns a handful of captured photos into one decorated keepsake:
//!
//! - pick a [`Layout`] template and compute its slot rectangles
//! - render a [`Scene`] (photos, [`FilterId`], [`FrameStyle`], stickers) with the
//!   [`CompositeRenderer`]
//! - move, pinch and rotate emoji stickers through the [`OverlayController`]
//! - tone and crop individual photos in the [`AdjustEditor`]
//! - tie it together in a [`BoothSession`] and export PNG bytes
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;

pub(crate) mod editor;
pub(crate) mod effects;
pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod render;
/// Session model and its JSON description.
pub mod session;

pub use crate::config::{BoothConfig, ExportCompression, ExportConfig};
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{BoothError, BoothResult};
pub use crate::foundation::raster::Raster;

pub use crate::effects::color::apply_effect;
pub use crate::effects::filter::{EffectDescriptor, FilterId, resolve_filter_effect};
pub use crate::effects::tonal::{AdjustmentState, Slider, apply_tonal};

pub use crate::layout::fit::{FitMode, FitRect, compute_fit_rect};
pub use crate::layout::shapes::{SlotShape, heart_path};
pub use crate::layout::templates::{
    AspectFamily, Layout, LayoutKind, LayoutMetrics, Slot, compute_layout_slots,
    compute_layout_slots_by_id, filmstrip_sprockets,
};

pub use crate::render::compositor::{
    CompositeRenderer, Delivery, PreparedPhoto, RenderTicket, Scene, SlotJob, border_width,
    render_scene,
};
pub use crate::render::export::{ExportBlob, encode_data_uri, encode_png, export_surface};
pub use crate::render::frame::{
    Background, COLOR_PRESETS, ColorSpec, FrameStyle, PATTERN_PRESETS, PatternSpec,
    color_preset, pattern_preset,
};
pub use crate::render::photo::{Photo, with_replaced_at};
pub use crate::render::surface::Surface;

pub use crate::interaction::controller::{GestureBaseline, OverlayController};
pub use crate::interaction::pointer::{
    PointerEvent, PointerId, PointerPhase, PointerSet, ViewportMapping, pinch_metrics,
};
pub use crate::interaction::sticker::{
    DEFAULT_STICKER_SIZE, MAX_STICKER_SIZE, MIN_STICKER_SIZE, RESIZE_STEP, ROTATE_STEP,
    STICKER_PALETTE, Sticker, StickerBoard, StickerId, clamp_sticker_size,
    default_sticker_position,
};

pub use crate::editor::adjust::{AdjustEditor, EditorMode};
pub use crate::editor::crop::{CropHandle, CropRect, CursorIcon, HANDLE_THRESHOLD, MIN_CROP_SIZE};

pub use crate::session::{BoothSession, FrameSpec, SessionSpec, StickerSpec};
