use super::*;
use crate::{
    interaction::sticker::StickerId,
    layout::{fit::FitMode, shapes::SlotShape},
    render::frame::{Background, ColorSpec},
};

fn png_photo(w: u32, h: u32, rgba: [u8; 4]) -> Photo {
    let raster = Raster::filled(w, h, rgba).unwrap();
    Photo::from_raster(&raster).unwrap()
}

fn flat_frame(bg: Rgba8, border: Rgba8) -> FrameStyle {
    FrameStyle {
        color: ColorSpec {
            background: Background::Flat { color: bg },
            border,
        },
        pattern: None,
    }
}

fn classic_scene(photos: Vec<Photo>) -> Scene {
    Scene {
        photos,
        layout: Layout::new(LayoutKind::Classic),
        filter: FilterId::None,
        frame: flat_frame(Rgba8::rgb(0, 0, 255), Rgba8::rgb(0, 255, 0)),
        stickers: Vec::new(),
    }
}

fn canvas() -> Canvas {
    Canvas::new(200, 600).unwrap()
}

#[test]
fn render_without_target_is_a_no_op() {
    let mut r = CompositeRenderer::new(&BoothConfig::default());
    let scene = classic_scene(vec![png_photo(4, 4, [255, 0, 0, 255])]);
    assert!(r.begin(&scene).unwrap().is_none());
    assert!(r.render(&scene).unwrap().is_none());
    assert_eq!(r.generation(), 0);
}

#[test]
fn frame_border_matte_and_photo_are_layered() {
    let scene = classic_scene(vec![
        png_photo(40, 30, [255, 0, 0, 255]),
        png_photo(30, 40, [255, 0, 0, 255]),
        png_photo(10, 10, [255, 0, 0, 255]),
    ]);
    let surface = render_scene(&scene, canvas(), &BoothConfig::default()).unwrap();

    // border ring
    assert_eq!(surface.pixel(0, 0), Some([0, 255, 0, 255]));
    assert_eq!(surface.pixel(199, 300), Some([0, 255, 0, 255]));
    // background between border and matte
    assert_eq!(surface.pixel(5, 100), Some([0, 0, 255, 255]));
    // matte just outside slot 0 (x0 = 10)
    assert_eq!(surface.pixel(8, 100), Some([255, 255, 255, 255]));
    // photo centers
    for y in [100, 300, 490] {
        assert_eq!(surface.pixel(100, y), Some([255, 0, 0, 255]), "y={y}");
    }
}

#[test]
fn rerender_is_pixel_identical() {
    let scene = Scene {
        filter: FilterId::Vintage,
        frame: FrameStyle::default(),
        ..classic_scene(vec![
            png_photo(64, 48, [200, 120, 40, 255]),
            png_photo(48, 64, [20, 180, 90, 255]),
        ])
    };
    let a = render_scene(&scene, canvas(), &BoothConfig::default()).unwrap();
    let b = render_scene(&scene, canvas(), &BoothConfig::default()).unwrap();
    assert_eq!(a.premul_bytes(), b.premul_bytes());
}

#[test]
fn parallel_pool_matches_global_pool() {
    let scene = classic_scene(vec![
        png_photo(64, 48, [200, 120, 40, 255]),
        png_photo(48, 64, [20, 180, 90, 255]),
        png_photo(33, 33, [90, 90, 250, 255]),
    ]);
    let pooled = BoothConfig {
        decode_threads: Some(2),
        ..BoothConfig::default()
    };
    let a = render_scene(&scene, canvas(), &BoothConfig::default()).unwrap();
    let b = render_scene(&scene, canvas(), &pooled).unwrap();
    assert_eq!(a.premul_bytes(), b.premul_bytes());
}

#[test]
fn stale_generation_deliveries_are_ignored() {
    let mut r = CompositeRenderer::new(&BoothConfig::default());
    r.mount(canvas()).unwrap();
    let scene = classic_scene(vec![
        png_photo(8, 8, [255, 0, 0, 255]),
        png_photo(8, 8, [255, 0, 0, 255]),
    ]);

    let old = r.begin(&scene).unwrap().unwrap();
    let new = r.begin(&scene).unwrap().unwrap();
    assert!(new.generation > old.generation);

    let job = &old.jobs[0];
    assert_eq!(r.deliver(old.generation, job.slot_index(), job.run()), Delivery::Stale);

    let first = &new.jobs[0];
    assert_eq!(
        r.deliver(new.generation, first.slot_index(), first.run()),
        Delivery::Pending { remaining: 1 }
    );
    // duplicate delivery of the same slot does not advance the countdown
    assert_eq!(r.deliver(new.generation, first.slot_index(), first.run()), Delivery::Stale);

    let second = &new.jobs[1];
    assert_eq!(
        r.deliver(new.generation, second.slot_index(), second.run()),
        Delivery::Complete
    );
    // finished invocations accept nothing more
    assert_eq!(r.deliver(new.generation, second.slot_index(), second.run()), Delivery::Stale);
}

#[test]
fn failed_decode_still_completes_the_invocation() {
    let mut r = CompositeRenderer::new(&BoothConfig::default());
    r.mount(canvas()).unwrap();
    let scene = Scene {
        stickers: vec![Sticker::new(StickerId(0), "\u{2B50}", (100.0, 100.0).into())],
        ..classic_scene(vec![
            Photo::from_encoded(b"broken".to_vec()),
            png_photo(8, 8, [255, 0, 0, 255]),
        ])
    };
    let ticket = r.begin(&scene).unwrap().unwrap();
    let results: Vec<_> = ticket.jobs.iter().map(SlotJob::run).collect();
    assert!(results[0].is_err());

    let mut outcomes = Vec::new();
    for (job, result) in ticket.jobs.iter().zip(results) {
        outcomes.push(r.deliver(ticket.generation, job.slot_index(), result));
    }
    assert_eq!(
        outcomes,
        vec![Delivery::Pending { remaining: 1 }, Delivery::Complete]
    );

    // the failed slot keeps the background and gets no matte
    let surface = r.surface().unwrap();
    assert_eq!(surface.pixel(8, 100), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(100, 300), Some([255, 0, 0, 255]));
}

#[test]
fn scene_without_photos_completes_at_begin() {
    let mut r = CompositeRenderer::new(&BoothConfig::default());
    r.mount(canvas()).unwrap();
    let ticket = r.begin(&classic_scene(Vec::new())).unwrap().unwrap();
    assert!(ticket.is_complete());
    assert_eq!(r.deliver(ticket.generation, 0, Err(BoothError::decode("x"))), Delivery::Stale);
}

#[test]
fn extra_photos_beyond_slot_count_are_ignored() {
    let mut r = CompositeRenderer::new(&BoothConfig::default());
    r.mount(canvas()).unwrap();
    let scene = Scene {
        layout: Layout::new(LayoutKind::Filmstrip),
        ..classic_scene(vec![png_photo(4, 4, [1, 2, 3, 255]); 5])
    };
    assert_eq!(r.begin(&scene).unwrap().unwrap().jobs.len(), 2);
}

#[test]
fn prepared_photo_is_cropped_to_visible_region() {
    let slot = Slot {
        index: 0,
        rect: Rect::new(10.0, 10.0, 110.0, 60.0),
        shape: SlotShape::Rect,
        fit: FitMode::Cover,
    };
    // 400x100 into 100x50: height-matched to 200x50, 50px overflow each side
    let raster = Raster::filled(400, 100, [9, 9, 9, 255]).unwrap();
    let prepared = prepare_for_slot(&raster, &slot, &EffectDescriptor::IDENTITY).unwrap();
    assert_eq!(prepared.dest, slot.rect);
    assert_eq!((prepared.raster.width(), prepared.raster.height()), (100, 50));
}

#[test]
fn pattern_band_leaves_interior_empty() {
    let canvas = Canvas::new(600, 1800).unwrap();
    let glyph_px = pattern_glyph_px(canvas.width);
    let cells = pattern_cells(canvas, glyph_px);
    assert!(!cells.is_empty());
    let band = glyph_px * 1.6 * PATTERN_BAND_CELLS as f64 + glyph_px;
    for (x, y) in cells {
        let edge = x.min(600.0 - x).min(y).min(1800.0 - y);
        assert!(edge < band, "cell at ({x}, {y}) is in the interior");
    }
}

fn pixels_in(surface: &Surface, rect: Rect) -> Vec<Option<[u8; 4]>> {
    let mut out = Vec::new();
    for y in rect.y0.max(0.0) as u32..rect.y1 as u32 {
        for x in rect.x0.max(0.0) as u32..rect.x1 as u32 {
            out.push(surface.pixel(x, y));
        }
    }
    out
}

#[test]
fn stickers_are_drawn_over_slots_at_their_position() {
    let config = BoothConfig::default();
    let base = classic_scene(vec![png_photo(16, 16, [255, 0, 0, 255])]);
    let slot = base.layout.slots(canvas(), config.compact)[0].rect;
    let at = slot.center();
    let with_sticker = Scene {
        stickers: vec![Sticker::new(StickerId(0), "A", at).with_size(60.0)],
        ..base.clone()
    };

    let plain = render_scene(&base, canvas(), &config).unwrap();
    let stickered = render_scene(&with_sticker, canvas(), &config).unwrap();

    let sticker_box = Rect::from_center_size(at, (60.0, 60.0));
    let changed = pixels_in(&plain, sticker_box)
        .iter()
        .zip(pixels_in(&stickered, sticker_box))
        .filter(|(a, b)| **a != *b)
        .count();
    assert!(changed > 50, "changed {changed}");

    // the glyph sits on top of the slot photo, away from it nothing moves
    let far = Rect::new(0.0, 450.0, 200.0, 600.0);
    assert_eq!(pixels_in(&plain, far), pixels_in(&stickered, far));
}

#[test]
fn sticker_rotation_changes_the_drawn_glyph() {
    let config = BoothConfig::default();
    let base = classic_scene(vec![png_photo(16, 16, [255, 0, 0, 255])]);
    let at = base.layout.slots(canvas(), config.compact)[0].rect.center();
    let sticker = Sticker::new(StickerId(0), "L", at).with_size(60.0);
    let upright = Scene {
        stickers: vec![sticker.clone()],
        ..base.clone()
    };
    let turned = Scene {
        stickers: vec![sticker.with_rotation(90.0)],
        ..base
    };

    let a = render_scene(&upright, canvas(), &config).unwrap();
    let b = render_scene(&turned, canvas(), &config).unwrap();
    let sticker_box = Rect::from_center_size(at, (84.0, 84.0));
    assert_ne!(pixels_in(&a, sticker_box), pixels_in(&b, sticker_box));
}
