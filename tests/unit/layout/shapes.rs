use super::*;

#[test]
fn heart_bbox_matches_slot() {
    let rect = Rect::new(10.0, 20.0, 110.0, 120.0);
    let bbox = heart_path(rect).bounding_box();
    assert!((bbox.x0 - 10.0).abs() < 1e-6);
    assert!((bbox.x1 - 110.0).abs() < 1e-6);
    assert!((bbox.y1 - 120.0).abs() < 1e-6);
    // the lobes bulge above the notch but stay inside the slot
    assert!(bbox.y0 >= 20.0 - 1e-6 && bbox.y0 < 50.0);
}

#[test]
fn heart_contains_lobes_not_corners() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(SlotShape::Heart.contains(rect, Point::new(25.0, 30.0)));
    assert!(SlotShape::Heart.contains(rect, Point::new(50.0, 60.0)));
    assert!(!SlotShape::Heart.contains(rect, Point::new(2.0, 98.0)));
    assert!(!SlotShape::Heart.contains(rect, Point::new(98.0, 98.0)));
}

#[test]
fn rounded_rect_excludes_corner() {
    let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
    let shape = SlotShape::RoundedRect { radius: 20.0 };
    assert!(!shape.contains(rect, Point::new(1.0, 1.0)));
    assert!(shape.contains(rect, Point::new(50.0, 1.0)));
}

#[test]
fn inflate_grows_radius_with_rect() {
    let rect = Rect::new(10.0, 10.0, 50.0, 50.0);
    let (shape, grown) = SlotShape::RoundedRect { radius: 4.0 }.inflated(rect, 3.0);
    assert_eq!(grown, Rect::new(7.0, 7.0, 53.0, 53.0));
    assert_eq!(shape, SlotShape::RoundedRect { radius: 7.0 });
    assert_eq!(SlotShape::Heart.inflated(rect, 3.0).0, SlotShape::Heart);
}

#[test]
fn ring_leaves_hole() {
    let ring = ring_path(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(2.0, 2.0, 8.0, 8.0));
    assert!(ring.contains(Point::new(1.0, 5.0)));
    assert!(!ring.contains(Point::new(5.0, 5.0)));
}
