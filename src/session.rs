//! Booth session state and its JSON description.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    config::BoothConfig,
    editor::adjust::AdjustEditor,
    effects::filter::FilterId,
    foundation::{
        core::Canvas,
        error::{BoothError, BoothResult},
    },
    interaction::{
        controller::OverlayController,
        pointer::ViewportMapping,
        sticker::{DEFAULT_STICKER_SIZE, Sticker, StickerBoard, StickerId},
    },
    layout::templates::Layout,
    render::{
        compositor::{CompositeRenderer, Scene},
        export::{ExportBlob, export_surface},
        frame::FrameStyle,
        photo::{Photo, with_replaced_at},
        surface::Surface,
    },
};

/// One photo booth session: captured photos, the chosen look, stickers and the
/// optional sub-editor.
pub struct BoothSession {
    config: BoothConfig,
    photos: Vec<Photo>,
    layout: Layout,
    filter: FilterId,
    frame: FrameStyle,
    overlay: OverlayController,
    editor: Option<AdjustEditor>,
    renderer: CompositeRenderer,
}

impl std::fmt::Debug for BoothSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoothSession")
            .field("photos", &self.photos.len())
            .field("layout", &self.layout)
            .field("filter", &self.filter)
            .field("stickers", &self.overlay.stickers().len())
            .field("editing", &self.editor.as_ref().map(AdjustEditor::photo_index))
            .finish_non_exhaustive()
    }
}

impl BoothSession {
    /// Empty session with the default layout.
    pub fn new(config: BoothConfig) -> BoothResult<Self> {
        config.validate()?;
        let layout = Layout::default();
        let canvas = layout.canvas(&config)?;
        Ok(Self {
            overlay: OverlayController::new(canvas, config.sticker_seed),
            renderer: CompositeRenderer::new(&config),
            photos: Vec::new(),
            layout,
            filter: FilterId::default(),
            frame: FrameStyle::default(),
            editor: None,
            config,
        })
    }

    /// Session described by `spec`; photo paths resolve against `assets_root`.
    pub fn from_spec(spec: &SessionSpec, assets_root: &Path, config: BoothConfig) -> BoothResult<Self> {
        let scene = spec.to_scene(assets_root)?;
        let mut session = Self::new(config)?;
        session.set_layout(scene.layout);
        session.filter = scene.filter;
        session.frame = scene.frame;
        session.photos = scene.photos;
        let canvas = session.canvas()?;
        session.overlay =
            OverlayController::with_board(spec.sticker_board(), canvas, session.config.sticker_seed);
        Ok(session)
    }

    /// Active configuration.
    pub fn config(&self) -> &BoothConfig {
        &self.config
    }

    /// Backing canvas of the current layout.
    pub fn canvas(&self) -> BoothResult<Canvas> {
        self.layout.canvas(&self.config)
    }

    /// Photos in slot order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Append a photo to the next free slot and return its index.
    pub fn add_photo(&mut self, photo: Photo) -> BoothResult<usize> {
        if self.photos.len() >= self.layout.slot_count {
            return Err(BoothError::validation(format!(
                "all {} slots are filled",
                self.layout.slot_count
            )));
        }
        self.photos.push(photo);
        Ok(self.photos.len() - 1)
    }

    /// Swap the photo at `index` for `photo`.
    pub fn replace_photo(&mut self, index: usize, photo: Photo) -> BoothResult<()> {
        self.photos = with_replaced_at(&self.photos, index, photo)
            .ok_or_else(|| BoothError::validation(format!("no photo at index {index}")))?;
        Ok(())
    }

    /// Current layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Switch layouts. Photos beyond the new slot count are dropped; stickers keep their
    /// canvas positions.
    pub fn set_layout(&mut self, layout: Layout) {
        if self.photos.len() > layout.slot_count {
            tracing::debug!(
                dropped = self.photos.len() - layout.slot_count,
                "layout change dropped photos"
            );
            self.photos.truncate(layout.slot_count);
        }
        self.layout = layout;
        match layout.canvas(&self.config) {
            Ok(canvas) => self.overlay.set_viewport(ViewportMapping::identity(canvas)),
            Err(err) => tracing::warn!(%err, "layout canvas unavailable"),
        }
    }

    /// Current filter.
    pub fn filter(&self) -> FilterId {
        self.filter
    }

    /// Choose the filter applied to every photo.
    pub fn set_filter(&mut self, filter: FilterId) {
        self.filter = filter;
    }

    /// Current frame.
    pub fn frame(&self) -> &FrameStyle {
        &self.frame
    }

    /// Choose the frame treatment.
    pub fn set_frame(&mut self, frame: FrameStyle) {
        self.frame = frame;
    }

    /// Sticker overlay.
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Sticker overlay, for pointer input and control actions.
    pub fn overlay_mut(&mut self) -> &mut OverlayController {
        &mut self.overlay
    }

    /// Open the sub-editor on the photo at `index`, replacing any open editor.
    pub fn open_editor(&mut self, index: usize) -> BoothResult<&mut AdjustEditor> {
        let photo = self
            .photos
            .get(index)
            .ok_or_else(|| BoothError::validation(format!("no photo at index {index}")))?;
        let mut editor = AdjustEditor::open(index, &self.config);
        editor.load(photo)?;
        self.cancel_editor();
        Ok(self.editor.insert(editor))
    }

    /// Open sub-editor.
    pub fn editor(&self) -> Option<&AdjustEditor> {
        self.editor.as_ref()
    }

    /// Open sub-editor, mutably.
    pub fn editor_mut(&mut self) -> Option<&mut AdjustEditor> {
        self.editor.as_mut()
    }

    /// Save the open editor into its photo slot and close it.
    ///
    /// Returns `false` (and keeps the editor open) when there is no editor or its
    /// source has not loaded.
    pub fn commit_editor(&mut self) -> BoothResult<bool> {
        let Some(editor) = &self.editor else {
            return Ok(false);
        };
        let Some(photo) = editor.save()? else {
            return Ok(false);
        };
        let index = editor.photo_index();
        self.replace_photo(index, photo)?;
        self.editor = None;
        tracing::debug!(index, "editor committed");
        Ok(true)
    }

    /// Close the editor without touching the photo.
    pub fn cancel_editor(&mut self) {
        if let Some(mut editor) = self.editor.take() {
            editor.release_all();
        }
    }

    /// Start over: no photos, stickers or editor; default filter and frame. The layout
    /// stays.
    pub fn reset(&mut self) {
        self.cancel_editor();
        self.photos.clear();
        self.overlay.clear();
        self.filter = FilterId::default();
        self.frame = FrameStyle::default();
    }

    /// Snapshot of everything the composite is rendered from.
    pub fn scene(&self) -> Scene {
        Scene {
            photos: self.photos.clone(),
            layout: self.layout,
            filter: self.filter,
            frame: self.frame.clone(),
            stickers: self.overlay.stickers().to_vec(),
        }
    }

    /// Render the current scene onto the session's surface.
    pub fn render(&mut self) -> BoothResult<&Surface> {
        let canvas = self.canvas()?;
        if self.renderer.surface().map(Surface::canvas) != Some(canvas) {
            self.renderer.mount(canvas)?;
        }
        let scene = self.scene();
        self.renderer
            .render(&scene)?
            .ok_or_else(|| BoothError::render("no render target mounted"))
    }

    /// Render and encode the composite.
    pub fn export(&mut self) -> BoothResult<ExportBlob> {
        let export = self.config.export;
        let surface = self.render()?;
        export_surface(surface, &export)
    }
}

/// Frame selection in a [`SessionSpec`]: preset names or a full style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FrameSpec {
    /// Named color preset plus an optional named pattern preset.
    Preset {
        /// Color preset name.
        color: String,
        /// Pattern preset name.
        #[serde(default)]
        pattern: Option<String>,
    },
    /// Explicit style.
    Custom(FrameStyle),
}

impl Default for FrameSpec {
    fn default() -> Self {
        FrameSpec::Custom(FrameStyle::default())
    }
}

impl FrameSpec {
    /// Concrete style. Unknown preset names fall back to the default frame.
    pub fn resolve(&self) -> FrameStyle {
        match self {
            FrameSpec::Custom(style) => style.clone(),
            FrameSpec::Preset { color, pattern } => {
                let pattern = pattern.as_deref().unwrap_or("none");
                FrameStyle::from_presets(color, pattern).unwrap_or_else(|| {
                    tracing::warn!(%color, %pattern, "unknown frame preset, using default frame");
                    FrameStyle::default()
                })
            }
        }
    }
}

/// Sticker entry of a [`SessionSpec`]. Ids are assigned in list order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickerSpec {
    /// Emoji glyph.
    pub glyph: String,
    /// Center x in canvas pixels.
    pub x: f64,
    /// Center y in canvas pixels.
    pub y: f64,
    /// Edge length; clamped into the sticker range.
    #[serde(default = "default_sticker_size")]
    pub size: f64,
    /// Rotation in degrees; wrapped into `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
}

fn default_sticker_size() -> f64 {
    DEFAULT_STICKER_SIZE
}

/// JSON description of a session for batch rendering.
///
/// ```json
/// {
///   "layout": "hearts",
///   "filter": "vintage",
///   "frame": { "color": "mint", "pattern": "stars" },
///   "photos": ["a.jpg", "b.jpg", "c.jpg"],
///   "stickers": [{ "glyph": "⭐", "x": 120, "y": 200, "size": 64 }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSpec {
    /// Layout id; unknown ids render no slots.
    pub layout: String,
    /// Slot count override, clamped to the template's range.
    pub slot_count: Option<usize>,
    /// Filter id; unknown ids render unfiltered.
    pub filter: String,
    /// Frame treatment.
    pub frame: FrameSpec,
    /// Photo files in slot order, relative to the spec file.
    pub photos: Vec<PathBuf>,
    /// Stickers in draw order.
    pub stickers: Vec<StickerSpec>,
}

impl Default for SessionSpec {
    fn default() -> Self {
        Self {
            layout: "classic".to_owned(),
            slot_count: None,
            filter: "none".to_owned(),
            frame: FrameSpec::default(),
            photos: Vec::new(),
            stickers: Vec::new(),
        }
    }
}

impl SessionSpec {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BoothError::validation(format!("parse session JSON: {e}")))
    }

    /// Parse a JSON file on disk.
    pub fn from_path(path: &Path) -> BoothResult<Self> {
        let f = File::open(path).map_err(|e| {
            BoothError::validation(format!("open session JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Resolved layout.
    pub fn layout(&self) -> Layout {
        Layout::from_id(&self.layout, self.slot_count)
    }

    /// Resolved filter.
    pub fn filter(&self) -> FilterId {
        FilterId::parse(&self.filter).unwrap_or_else(|| {
            tracing::warn!(filter = %self.filter, "unknown filter id, rendering unfiltered");
            FilterId::None
        })
    }

    /// Stickers with ids in list order.
    pub fn sticker_board(&self) -> StickerBoard {
        StickerBoard::from_stickers(self.stickers.iter().enumerate().map(|(i, s)| {
            Sticker {
                id: StickerId(i as u64),
                glyph: s.glyph.clone(),
                x: s.x,
                y: s.y,
                size: s.size,
                rotation: s.rotation,
            }
            .normalized()
        }))
    }

    /// Load the photos and build the render scene.
    pub fn to_scene(&self, assets_root: &Path) -> BoothResult<Scene> {
        let layout = self.layout();
        let photos = self
            .photos
            .iter()
            .take(layout.slot_count)
            .map(|p| Photo::from_path(&assets_root.join(p)))
            .collect::<BoothResult<_>>()?;
        Ok(Scene {
            photos,
            layout,
            filter: self.filter(),
            frame: self.frame.resolve(),
            stickers: self.sticker_board().stickers().to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
