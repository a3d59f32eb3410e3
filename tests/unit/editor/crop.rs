use super::*;
use crate::foundation::math::Fnv1a64;

fn rect(x: f64, y: f64, width: f64, height: f64) -> CropRect {
    CropRect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn default_is_centered_eighty_percent() {
    let c = CropRect::default();
    assert_eq!(c, rect(10.0, 10.0, 80.0, 80.0));
    assert!(c.is_valid());
}

#[test]
fn bottom_right_drag_grows_both_edges() {
    let c = CropRect::default().dragged(CropHandle::BottomRight, Vec2::new(5.0, 5.0));
    assert_eq!(c, rect(10.0, 10.0, 85.0, 85.0));
}

#[test]
fn overflowing_edge_is_rejected_alone() {
    let c = CropRect::default().dragged(CropHandle::BottomRight, Vec2::new(25.0, 0.0));
    assert_eq!(c.width, 80.0);
    assert_eq!(c.x, 10.0);

    // the vertical part of the same drag still applies
    let c = CropRect::default().dragged(CropHandle::BottomRight, Vec2::new(25.0, 4.0));
    assert_eq!(c, rect(10.0, 10.0, 80.0, 84.0));
}

#[test]
fn left_and_top_edges_move_origin() {
    let c = CropRect::default().dragged(CropHandle::TopLeft, Vec2::new(5.0, -5.0));
    assert_eq!(c, rect(15.0, 5.0, 75.0, 85.0));

    // shrinking below the minimum is refused
    let c = rect(10.0, 10.0, 12.0, 12.0).dragged(CropHandle::Left, Vec2::new(5.0, 0.0));
    assert_eq!(c, rect(10.0, 10.0, 12.0, 12.0));
    // escaping past zero is refused
    let c = CropRect::default().dragged(CropHandle::Top, Vec2::new(0.0, -11.0));
    assert_eq!(c, CropRect::default());
}

#[test]
fn move_translates_and_clamps() {
    let c = CropRect::default().dragged(CropHandle::Move, Vec2::new(5.0, -3.0));
    assert_eq!(c, rect(15.0, 7.0, 80.0, 80.0));

    let c = CropRect::default().dragged(CropHandle::Move, Vec2::new(50.0, -50.0));
    assert_eq!(c, rect(20.0, 0.0, 80.0, 80.0));
}

#[test]
fn hit_test_precedence() {
    let c = CropRect::default();
    assert_eq!(c.hit_test(Point::new(11.0, 11.0)), Some(CropHandle::TopLeft));
    assert_eq!(c.hit_test(Point::new(89.0, 90.5)), Some(CropHandle::BottomRight));
    assert_eq!(c.hit_test(Point::new(50.0, 9.0)), Some(CropHandle::Top));
    assert_eq!(c.hit_test(Point::new(50.0, 91.0)), Some(CropHandle::Bottom));
    assert_eq!(c.hit_test(Point::new(8.0, 50.0)), Some(CropHandle::Left));
    assert_eq!(c.hit_test(Point::new(92.0, 50.0)), Some(CropHandle::Right));
    assert_eq!(c.hit_test(Point::new(50.0, 50.0)), Some(CropHandle::Move));
    assert_eq!(c.hit_test(Point::new(2.0, 50.0)), None);
    assert_eq!(c.hit_test(Point::new(95.0, 95.0)), None);
}

#[test]
fn cursors_follow_handles() {
    assert_eq!(CropHandle::Move.cursor().as_css(), "move");
    assert_eq!(CropHandle::TopLeft.cursor(), CursorIcon::NwseResize);
    assert_eq!(CropHandle::BottomLeft.cursor(), CursorIcon::NeswResize);
    assert_eq!(CropHandle::Bottom.cursor().as_css(), "ns-resize");
    assert_eq!(CropHandle::Right.cursor().as_css(), "ew-resize");
}

#[test]
fn validated_repairs_out_of_range_input() {
    assert_eq!(rect(-5.0, 95.0, 5.0, 30.0).validated(), rect(0.0, 70.0, 10.0, 30.0));
    assert_eq!(
        rect(f64::NAN, 0.0, 50.0, 50.0).validated(),
        CropRect::default()
    );
}

#[test]
fn pixel_mapping_stays_inside_source() {
    assert_eq!(CropRect::default().to_pixels(200, 100), (20, 10, 160, 80));
    let full = rect(0.0, 0.0, 100.0, 100.0);
    assert_eq!(full.to_pixels(7, 3), (0, 0, 7, 3));
    let (x, y, w, h) = rect(90.0, 90.0, 10.0, 10.0).to_pixels(3, 3);
    assert!(x + w <= 3 && y + h <= 3 && w >= 1 && h >= 1);
}

#[test]
fn random_drags_preserve_invariants() {
    const EPS: f64 = 1e-9;
    let mut rng = Fnv1a64::new(0xC0FFEE);
    let handles = [
        CropHandle::Move,
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
        CropHandle::Top,
        CropHandle::Bottom,
        CropHandle::Left,
        CropHandle::Right,
    ];
    let mut c = CropRect::default();
    for step in 0..5_000u64 {
        rng.write_u64(step);
        let handle = handles[(rng.unit_f64() * handles.len() as f64) as usize % handles.len()];
        rng.write_u64(1);
        let dx = (rng.unit_f64() - 0.5) * 60.0;
        rng.write_u64(2);
        let dy = (rng.unit_f64() - 0.5) * 60.0;
        c = c.dragged(handle, Vec2::new(dx, dy));
        assert!(c.x >= 0.0 && c.y >= 0.0, "{c:?}");
        assert!(c.width >= MIN_CROP_SIZE && c.height >= MIN_CROP_SIZE, "{c:?}");
        assert!(c.right() <= 100.0 + EPS && c.bottom() <= 100.0 + EPS, "{c:?}");
    }
}
