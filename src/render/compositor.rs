use rayon::prelude::*;

use crate::{
    config::BoothConfig,
    effects::{
        color::apply_effect,
        filter::{EffectDescriptor, FilterId},
    },
    foundation::{
        core::{Affine, Canvas, Rect, Rgba8},
        error::{BoothError, BoothResult},
        raster::Raster,
    },
    interaction::sticker::Sticker,
    layout::{
        shapes::ring_path,
        templates::{Layout, LayoutKind, Slot, filmstrip_sprockets},
    },
    render::{
        frame::{FrameStyle, PatternSpec},
        glyph::GlyphAtlas,
        paint::{affine_to_cpu, bezpath_to_cpu, raster_paint, rect_to_cpu, solid},
        photo::Photo,
        surface::Surface,
    },
};

/// Cells of pattern glyphs along each edge.
const PATTERN_BAND_CELLS: usize = 2;

const SPROCKET_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 230);

/// Everything one composite is rendered from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Photos in slot order; extra photos beyond the slot count are ignored.
    pub photos: Vec<Photo>,
    /// Template and slot count.
    pub layout: Layout,
    /// Color filter applied to every photo.
    pub filter: FilterId,
    /// Background, border and pattern.
    pub frame: FrameStyle,
    /// Overlay stickers in draw order.
    pub stickers: Vec<Sticker>,
}

/// Photo decoded, cropped to its visible part and filtered, ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedPhoto {
    /// Filtered pixels.
    pub raster: Raster,
    /// Canvas rectangle the raster is stretched onto.
    pub dest: Rect,
}

/// Decode work for one occupied slot of one render invocation.
#[derive(Clone, Debug)]
pub struct SlotJob {
    generation: u64,
    slot: Slot,
    photo: Photo,
    effect: EffectDescriptor,
}

impl SlotJob {
    /// Invocation this job belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Slot the result is delivered to.
    pub fn slot_index(&self) -> usize {
        self.slot.index
    }

    /// Decode the photo, cut it down to the part visible in the slot and filter it.
    pub fn run(&self) -> BoothResult<PreparedPhoto> {
        let raster = self.photo.decode()?;
        prepare_for_slot(&raster, &self.slot, &self.effect)
    }
}

fn prepare_for_slot(
    raster: &Raster,
    slot: &Slot,
    effect: &EffectDescriptor,
) -> BoothResult<PreparedPhoto> {
    let frame = slot.fit.frame(slot.rect);
    let dst = slot.fit.place(raster.width(), raster.height(), slot.rect);
    let visible = dst.intersect(frame);
    if visible.width() <= 0.0 || visible.height() <= 0.0 {
        return Err(BoothError::render(format!(
            "slot {} has no visible area",
            slot.index
        )));
    }

    let sx = f64::from(raster.width()) / dst.width();
    let sy = f64::from(raster.height()) / dst.height();
    let x0 = (((visible.x0 - dst.x0) * sx).floor().max(0.0) as u32).min(raster.width() - 1);
    let y0 = (((visible.y0 - dst.y0) * sy).floor().max(0.0) as u32).min(raster.height() - 1);
    let x1 = (((visible.x1 - dst.x0) * sx).ceil() as u32).clamp(x0 + 1, raster.width());
    let y1 = (((visible.y1 - dst.y0) * sy).ceil() as u32).clamp(y0 + 1, raster.height());

    let cropped = raster.crop(x0, y0, x1 - x0, y1 - y0)?;
    let dest = Rect::new(
        dst.x0 + f64::from(x0) / sx,
        dst.y0 + f64::from(y0) / sy,
        dst.x0 + f64::from(x1) / sx,
        dst.y0 + f64::from(y1) / sy,
    );

    let tw = dest.width().round().max(1.0) as u32;
    let th = dest.height().round().max(1.0) as u32;
    let sized = if tw < cropped.width() || th < cropped.height() {
        cropped.resized(tw, th)?
    } else {
        cropped
    };

    Ok(PreparedPhoto {
        raster: apply_effect(&sized, effect)?,
        dest,
    })
}

/// Handle for one render invocation.
#[derive(Debug)]
pub struct RenderTicket {
    /// Generation id of the invocation.
    pub generation: u64,
    /// One job per occupied slot, in slot order.
    pub jobs: Vec<SlotJob>,
}

impl RenderTicket {
    /// `true` when nothing is left to decode; stickers have already been drawn.
    pub fn is_complete(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Result of delivering one slot decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The invocation was superseded, already finished, or the slot was delivered before.
    Stale,
    /// Slots still outstanding.
    Pending {
        /// Decodes not yet delivered.
        remaining: usize,
    },
    /// Last slot delivered; stickers were drawn.
    Complete,
}

struct InvocationContext {
    generation: u64,
    pending: Vec<Slot>,
    stickers: Vec<Sticker>,
}

/// Draws scenes onto a mounted surface.
///
/// Each [`begin`](Self::begin) starts a new generation: the frame is drawn at once and the
/// slot decodes are handed out as jobs. Results come back through
/// [`deliver`](Self::deliver); deliveries for older generations are ignored, failed decodes
/// still count, and stickers are drawn once the last slot of the current generation lands.
pub struct CompositeRenderer {
    compact: bool,
    decode_threads: Option<usize>,
    pool: Option<rayon::ThreadPool>,
    target: Option<Surface>,
    generation: u64,
    context: Option<InvocationContext>,
    glyphs: GlyphAtlas,
}

impl CompositeRenderer {
    /// Renderer without a target.
    pub fn new(config: &BoothConfig) -> Self {
        Self {
            compact: config.compact,
            decode_threads: config.decode_threads,
            pool: None,
            target: None,
            generation: 0,
            context: None,
            glyphs: GlyphAtlas::default(),
        }
    }

    /// Attach a fresh transparent target of `canvas` size. In-flight invocations go stale.
    pub fn mount(&mut self, canvas: Canvas) -> BoothResult<()> {
        self.target = Some(Surface::new(canvas)?);
        self.context = None;
        Ok(())
    }

    /// Detach and return the target.
    pub fn unmount(&mut self) -> Option<Surface> {
        self.context = None;
        self.target.take()
    }

    /// Current target.
    pub fn surface(&self) -> Option<&Surface> {
        self.target.as_ref()
    }

    /// Most recent generation id.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start rendering `scene`: draw the frame now and return the slot decode jobs.
    ///
    /// Returns `Ok(None)` without a mounted target.
    #[tracing::instrument(skip(self, scene), fields(layout = scene.layout.kind.as_str(), photos = scene.photos.len()))]
    pub fn begin(&mut self, scene: &Scene) -> BoothResult<Option<RenderTicket>> {
        let Some(target) = self.target.as_mut() else {
            tracing::warn!("no render target mounted; skipping render");
            return Ok(None);
        };

        self.generation += 1;
        let generation = self.generation;
        let canvas = target.canvas();
        let slots = scene.layout.slots(canvas, self.compact);

        draw_frame(target, &mut self.glyphs, &scene.frame, scene.layout.kind)?;

        let effect = scene.filter.effect();
        let jobs: Vec<SlotJob> = slots
            .iter()
            .zip(&scene.photos)
            .map(|(slot, photo)| SlotJob {
                generation,
                slot: *slot,
                photo: photo.clone(),
                effect,
            })
            .collect();

        let ctx = InvocationContext {
            generation,
            pending: jobs.iter().map(|j| j.slot).collect(),
            stickers: scene.stickers.clone(),
        };
        if ctx.pending.is_empty() {
            self.context = None;
            draw_stickers(target, &mut self.glyphs, &ctx.stickers);
        } else {
            self.context = Some(ctx);
        }

        tracing::debug!(generation, jobs = jobs.len(), "render invocation started");
        Ok(Some(RenderTicket { generation, jobs }))
    }

    /// Deliver the outcome of one slot decode.
    pub fn deliver(
        &mut self,
        generation: u64,
        slot_index: usize,
        result: BoothResult<PreparedPhoto>,
    ) -> Delivery {
        let Some(mut ctx) = self.context.take_if(|c| c.generation == generation) else {
            tracing::debug!(generation, slot_index, "stale slot delivery ignored");
            return Delivery::Stale;
        };
        let Some(pos) = ctx.pending.iter().position(|s| s.index == slot_index) else {
            tracing::debug!(generation, slot_index, "slot already delivered");
            self.context = Some(ctx);
            return Delivery::Stale;
        };
        let slot = ctx.pending.remove(pos);

        let Some(target) = self.target.as_mut() else {
            tracing::warn!(generation, "render target unmounted mid-render");
            return Delivery::Stale;
        };

        match result {
            Ok(prepared) => {
                if let Err(err) = paint_slot(target, &slot, &prepared) {
                    tracing::warn!(slot = slot.index, %err, "failed to paint slot");
                }
            }
            Err(err) => tracing::warn!(slot = slot.index, %err, "slot decode failed; skipping"),
        }

        if ctx.pending.is_empty() {
            draw_stickers(target, &mut self.glyphs, &ctx.stickers);
            tracing::debug!(generation, "render invocation complete");
            Delivery::Complete
        } else {
            let remaining = ctx.pending.len();
            self.context = Some(ctx);
            Delivery::Pending { remaining }
        }
    }

    /// Render `scene` to completion, decoding slots in parallel.
    ///
    /// Results are delivered in slot order, so output is identical to a sequential render.
    #[tracing::instrument(skip(self, scene))]
    pub fn render(&mut self, scene: &Scene) -> BoothResult<Option<&Surface>> {
        let Some(ticket) = self.begin(scene)? else {
            return Ok(None);
        };
        let results = self.run_jobs(&ticket.jobs)?;
        for (job, result) in ticket.jobs.iter().zip(results) {
            self.deliver(ticket.generation, job.slot_index(), result);
        }
        Ok(self.target.as_ref())
    }

    fn run_jobs(&mut self, jobs: &[SlotJob]) -> BoothResult<Vec<BoothResult<PreparedPhoto>>> {
        let run = || jobs.par_iter().map(SlotJob::run).collect::<Vec<_>>();
        match self.decode_threads {
            None => Ok(run()),
            Some(threads) => {
                if self.pool.is_none() {
                    self.pool = Some(build_thread_pool(threads)?);
                }
                match &self.pool {
                    Some(pool) => Ok(pool.install(run)),
                    None => Ok(run()),
                }
            }
        }
    }
}

fn build_thread_pool(threads: usize) -> BoothResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(BoothError::config("decode_threads must be >= 1 when set"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| BoothError::render(format!("failed to build decode thread pool: {e}")))
}

/// Render `scene` onto a fresh surface of `canvas` size.
pub fn render_scene(scene: &Scene, canvas: Canvas, config: &BoothConfig) -> BoothResult<Surface> {
    let mut renderer = CompositeRenderer::new(config);
    renderer.mount(canvas)?;
    renderer.render(scene)?;
    renderer
        .unmount()
        .ok_or_else(|| BoothError::render("render target vanished"))
}

/// Border width for a canvas `width` pixels wide.
pub fn border_width(width: u32) -> f64 {
    (f64::from(width) * 0.02).round().max(2.0)
}

fn matte_width(width: u32) -> f64 {
    (f64::from(width) * 0.012).max(2.0)
}

fn draw_frame(
    target: &mut Surface,
    glyphs: &mut GlyphAtlas,
    frame: &FrameStyle,
    kind: LayoutKind,
) -> BoothResult<()> {
    let canvas = target.canvas();
    let background = frame.color.background;
    target.shade(|x, y| background.color_at(x, y, canvas.width, canvas.height));

    let outer = canvas.rect();
    let inset = border_width(canvas.width);
    let inner = outer.inflate(-inset, -inset);
    let border = frame.color.border;
    let sprockets = if kind == LayoutKind::Filmstrip {
        filmstrip_sprockets(outer.width(), outer.height())
    } else {
        Vec::new()
    };

    target.draw_layer(|ctx| {
        ctx.set_paint(solid(border));
        ctx.fill_path(&bezpath_to_cpu(&ring_path(outer, inner)));
        ctx.set_paint(solid(SPROCKET_COLOR));
        for hole in &sprockets {
            ctx.fill_rect(&rect_to_cpu(*hole));
        }
        Ok(())
    })?;

    if let Some(pattern) = &frame.pattern {
        draw_pattern(target, glyphs, pattern);
    }
    Ok(())
}

/// Cell centers of the pattern band: a grid over the canvas, keeping only cells within
/// [`PATTERN_BAND_CELLS`] of an edge.
pub(crate) fn pattern_cells(canvas: Canvas, glyph_px: f64) -> Vec<(f64, f64)> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let cell = glyph_px * 1.6;
    let cols = ((w / cell).floor() as usize).max(1);
    let rows = ((h / cell).floor() as usize).max(1);
    let (cw, ch) = (w / cols as f64, h / rows as f64);

    let mut cells = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let depth = c.min(cols - 1 - c).min(r).min(rows - 1 - r);
            if depth < PATTERN_BAND_CELLS {
                cells.push(((c as f64 + 0.5) * cw, (r as f64 + 0.5) * ch));
            }
        }
    }
    cells
}

fn pattern_glyph_px(width: u32) -> f64 {
    (f64::from(width) * 0.055).round().max(8.0)
}

fn draw_pattern(target: &mut Surface, glyphs: &mut GlyphAtlas, pattern: &PatternSpec) {
    let canvas = target.canvas();
    let glyph_px = pattern_glyph_px(canvas.width);
    let glyph = match glyphs.glyph(&pattern.glyph, glyph_px, pattern.color, true) {
        Ok(g) => g,
        Err(err) => {
            tracing::warn!(%err, glyph = pattern.glyph.as_str(), "pattern glyph unavailable");
            return;
        }
    };
    let cells = pattern_cells(canvas, glyph_px);
    let half = glyph.box_px / 2.0;
    let result = target.draw_layer(|ctx| {
        ctx.set_paint(glyph.paint.clone());
        for (cx, cy) in &cells {
            ctx.set_transform(affine_to_cpu(Affine::translate((cx - half, cy - half))));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, glyph.box_px, glyph.box_px));
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    });
    if let Err(err) = result {
        tracing::warn!(%err, "failed to draw pattern");
    }
}

fn paint_slot(target: &mut Surface, slot: &Slot, prepared: &PreparedPhoto) -> BoothResult<()> {
    let matte = matte_width(target.canvas().width);
    let (matte_shape, matte_rect) = slot.shape.inflated(slot.rect, matte);
    let matte_path = bezpath_to_cpu(&matte_shape.outline(matte_rect));
    let clip_path = bezpath_to_cpu(&slot.shape.outline(slot.rect));

    let raster = &prepared.raster;
    let dest = prepared.dest;
    let paint = raster_paint(raster)?;
    let image_to_canvas = Affine::translate((dest.x0, dest.y0))
        * Affine::scale_non_uniform(
            dest.width() / f64::from(raster.width()),
            dest.height() / f64::from(raster.height()),
        );

    target.draw_layer(|ctx| {
        ctx.set_paint(solid(Rgba8::WHITE));
        ctx.fill_path(&matte_path);

        ctx.set_paint(paint);
        ctx.set_paint_transform(affine_to_cpu(image_to_canvas));
        ctx.fill_path(&clip_path);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    })
}

fn draw_stickers(target: &mut Surface, glyphs: &mut GlyphAtlas, stickers: &[Sticker]) {
    if stickers.is_empty() {
        return;
    }
    let mut placed = Vec::with_capacity(stickers.len());
    for sticker in stickers {
        match glyphs.glyph(&sticker.glyph, sticker.size, Rgba8::BLACK, false) {
            Ok(glyph) => placed.push((sticker, glyph)),
            Err(err) => {
                tracing::warn!(id = sticker.id.0, %err, "sticker glyph unavailable");
            }
        }
    }

    let result = target.draw_layer(|ctx| {
        for (sticker, glyph) in &placed {
            let half = glyph.box_px / 2.0;
            let xf = Affine::translate((sticker.x, sticker.y))
                * Affine::rotate(sticker.rotation.to_radians())
                * Affine::translate((-half, -half));
            ctx.set_transform(affine_to_cpu(xf));
            ctx.set_paint(glyph.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, glyph.box_px, glyph.box_px));
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    });
    if let Err(err) = result {
        tracing::warn!(%err, "failed to draw stickers");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
