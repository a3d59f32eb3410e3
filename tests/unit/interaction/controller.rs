use super::*;
use crate::foundation::core::Rect;
use crate::interaction::{
    pointer::PointerId,
    sticker::{MAX_STICKER_SIZE, MIN_STICKER_SIZE},
};

fn canvas() -> Canvas {
    Canvas::new(600, 1800).unwrap()
}

fn controller_with_sticker_at(x: f64, y: f64) -> (OverlayController, StickerId) {
    let mut c = OverlayController::new(canvas(), 1);
    let id = c.add_at("\u{2B50}", Point::new(x, y));
    (c, id)
}

fn touch(id: u64, phase: PointerPhase, x: f64, y: f64) -> PointerEvent {
    PointerEvent::touch(id, phase, x, y)
}

#[test]
fn pinch_doubling_distance_with_quarter_turn() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 100.0, 100.0));
    c.handle(touch(2, PointerPhase::Down, 150.0, 100.0));
    let base = c.gesture().unwrap();
    assert_eq!(base.distance, 50.0);
    assert_eq!(base.size, 48.0);

    c.handle(touch(2, PointerPhase::Move, 100.0, 200.0));
    let s = c.board().get(id).unwrap();
    assert!((s.size - 96.0).abs() < 1e-9, "{}", s.size);
    assert!((s.rotation - 90.0).abs() < 1e-9, "{}", s.rotation);
    // the pinch never moves the sticker
    assert_eq!(s.center(), Point::new(100.0, 100.0));
}

#[test]
fn press_selects_and_drag_follows_pointer_unclamped() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(PointerEvent::mouse(PointerPhase::Down, 110.0, 90.0));
    assert_eq!(c.selected(), Some(id));
    assert_eq!(c.dragged(), Some(id));

    c.handle(PointerEvent::mouse(PointerPhase::Move, -40.0, 5000.0));
    assert_eq!(c.board().get(id).unwrap().center(), Point::new(-40.0, 5000.0));

    c.handle(PointerEvent::mouse(PointerPhase::Up, -40.0, 5000.0));
    assert_eq!(c.dragged(), None);
    assert_eq!(c.selected(), Some(id));

    c.handle(PointerEvent::mouse(PointerPhase::Move, 0.0, 0.0));
    assert_eq!(c.board().get(id).unwrap().center(), Point::new(-40.0, 5000.0));
}

#[test]
fn miss_clears_selection() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(PointerEvent::mouse(PointerPhase::Down, 100.0, 100.0));
    c.handle(PointerEvent::mouse(PointerPhase::Up, 100.0, 100.0));
    assert_eq!(c.selected(), Some(id));
    c.handle(PointerEvent::mouse(PointerPhase::Down, 400.0, 900.0));
    assert_eq!(c.selected(), None);
    assert_eq!(c.dragged(), None);
}

#[test]
fn dropping_to_one_contact_keeps_drag_but_clears_baseline() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 100.0, 100.0));
    c.handle(touch(2, PointerPhase::Down, 140.0, 100.0));
    assert!(c.gesture().is_some());

    c.handle(touch(2, PointerPhase::Up, 140.0, 100.0));
    assert!(c.gesture().is_none());
    assert_eq!(c.dragged(), Some(id));

    c.handle(touch(1, PointerPhase::Cancel, 100.0, 100.0));
    assert_eq!(c.dragged(), None);
    assert_eq!(c.selected(), Some(id));
}

#[test]
fn second_touch_without_drag_starts_no_gesture() {
    let (mut c, _) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 500.0, 1500.0));
    c.handle(touch(2, PointerPhase::Down, 100.0, 100.0));
    assert!(c.gesture().is_none());
    assert!(c.dragged().is_none());
}

#[test]
fn pinch_size_is_clamped_and_rotation_wrapped() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 100.0, 100.0));
    c.handle(touch(2, PointerPhase::Down, 110.0, 100.0));
    // 30x farther, pointing straight up (-90 degrees)
    c.handle(touch(2, PointerPhase::Move, 100.0, -200.0));
    let s = c.board().get(id).unwrap();
    assert_eq!(s.size, MAX_STICKER_SIZE);
    assert!((s.rotation - 270.0).abs() < 1e-9);

    c.handle(touch(2, PointerPhase::Move, 100.5, 100.0));
    assert_eq!(c.board().get(id).unwrap().size, MIN_STICKER_SIZE);
}

#[test]
fn control_actions_clamp_wrap_and_remove() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(PointerEvent::mouse(PointerPhase::Down, 100.0, 100.0));
    c.handle(PointerEvent::mouse(PointerPhase::Up, 100.0, 100.0));

    for _ in 0..20 {
        c.grow_selected();
    }
    assert_eq!(c.board().get(id).unwrap().size, MAX_STICKER_SIZE);
    for _ in 0..20 {
        c.shrink_selected();
    }
    assert_eq!(c.board().get(id).unwrap().size, MIN_STICKER_SIZE);

    c.rotate_selected(false);
    assert_eq!(c.board().get(id).unwrap().rotation, 345.0);
    for _ in 0..24 {
        c.rotate_selected(true);
    }
    assert_eq!(c.board().get(id).unwrap().rotation, 345.0);

    c.remove(id);
    assert!(c.board().is_empty());
    assert_eq!(c.selected(), None);
}

#[test]
fn random_gesture_sequences_keep_stickers_in_range() {
    let (mut c, id) = controller_with_sticker_at(300.0, 900.0);
    let mut state = 0x1234_5678_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 2000) as f64 - 500.0
    };
    c.handle(touch(1, PointerPhase::Down, 300.0, 900.0));
    c.handle(touch(2, PointerPhase::Down, 320.0, 900.0));
    for step in 0..500 {
        let pid = 1 + (step % 2);
        c.handle(touch(pid, PointerPhase::Move, next(), next()));
        c.rotate_by(id, next());
        let s = c.board().get(id).unwrap();
        assert!((MIN_STICKER_SIZE..=MAX_STICKER_SIZE).contains(&s.size));
        assert!((0.0..360.0).contains(&s.rotation));
    }
}

#[test]
fn screen_points_are_mapped_into_canvas_space() {
    let (mut c, id) = controller_with_sticker_at(300.0, 900.0);
    c.set_viewport(ViewportMapping {
        display: Rect::new(0.0, 0.0, 300.0, 900.0),
        canvas: canvas(),
    });
    // (150, 450) on screen is (300, 900) in canvas pixels
    c.handle(PointerEvent::new(PointerId::MOUSE, PointerPhase::Down, Point::new(150.0, 450.0)));
    assert_eq!(c.selected(), Some(id));
    c.handle(PointerEvent::mouse(PointerPhase::Move, 10.0, 20.0));
    assert_eq!(c.board().get(id).unwrap().center(), Point::new(20.0, 40.0));
}

#[test]
fn release_all_clears_drag_and_gesture() {
    let (mut c, _) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 100.0, 100.0));
    c.handle(touch(2, PointerPhase::Down, 150.0, 100.0));
    c.release_all();
    assert!(c.dragged().is_none() && c.gesture().is_none());
}

#[test]
fn palette_stickers_land_inside_margins() {
    let mut c = OverlayController::new(canvas(), 42);
    let id = c.add_from_palette("\u{1F338}");
    let s = c.board().get(id).unwrap();
    assert!((90.0..=510.0).contains(&s.x));
    assert!((270.0..=1530.0).contains(&s.y));
}

#[test]
fn lifting_a_pinch_contact_rebases_on_the_next_pair() {
    let (mut c, id) = controller_with_sticker_at(100.0, 100.0);
    c.handle(touch(1, PointerPhase::Down, 100.0, 100.0));
    c.handle(touch(2, PointerPhase::Down, 150.0, 100.0));
    c.handle(touch(3, PointerPhase::Down, 100.0, 400.0));
    c.handle(touch(1, PointerPhase::Up, 100.0, 100.0));

    let base = c.gesture().unwrap();
    assert_eq!(base.size, 48.0);
    assert!((base.distance - (50.0f64 * 50.0 + 300.0 * 300.0).sqrt()).abs() < 1e-9);

    // holding still keeps size and rotation
    c.handle(touch(2, PointerPhase::Move, 150.0, 100.0));
    let s = c.board().get(id).unwrap();
    assert!((s.size - 48.0).abs() < 1e-9, "{}", s.size);
    assert!(s.rotation.abs() < 1e-9, "{}", s.rotation);
}
