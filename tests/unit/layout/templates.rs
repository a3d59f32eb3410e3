use super::*;

const EPS: f64 = 1e-9;

fn assert_non_overlapping(slots: &[Slot]) {
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            let overlap = a.rect.intersect(b.rect);
            assert!(
                overlap.width() <= EPS || overlap.height() <= EPS,
                "slots {} and {} overlap",
                a.index,
                b.index
            );
        }
    }
}

#[test]
fn classic_three_is_uniform_vertical_stack() {
    let slots = compute_layout_slots(LayoutKind::Classic, 600.0, 1800.0, 3, false);
    assert_eq!(slots.len(), 3);
    assert_non_overlapping(&slots);

    let padding = 30.0;
    let spacing = 18.0;
    let h = (1800.0 - 2.0 * padding - 3.0 * spacing) / 3.0;
    for s in &slots {
        assert!((s.rect.x0 - padding).abs() < EPS);
        assert!((s.rect.x1 - (600.0 - padding)).abs() < EPS);
        assert!((s.rect.height() - h).abs() < EPS);
        assert_eq!(s.shape, SlotShape::Rect);
        assert_eq!(s.fit, FitMode::Cover);
    }
    let gap0 = slots[1].rect.y0 - slots[0].rect.y1;
    let gap1 = slots[2].rect.y0 - slots[1].rect.y1;
    assert!((gap0 - gap1).abs() < EPS);
    assert!((gap0 - spacing).abs() < EPS);
    assert!((slots[0].rect.y0 - padding).abs() < EPS);
}

#[test]
fn grid_is_narrower_than_classic() {
    let classic = compute_layout_slots(LayoutKind::Classic, 600.0, 1800.0, 3, false);
    let grid = compute_layout_slots(LayoutKind::Grid, 600.0, 1800.0, 3, false);
    assert_eq!(grid.len(), 3);
    assert!(grid[0].rect.width() < classic[0].rect.width());
    assert!((grid[0].rect.center().x - 300.0).abs() < EPS);
}

#[test]
fn holiday_reuses_grid_with_rounding() {
    let grid = compute_layout_slots(LayoutKind::Grid, 600.0, 1800.0, 3, false);
    let holiday = compute_layout_slots(LayoutKind::Holiday, 600.0, 1800.0, 3, false);
    for (g, h) in grid.iter().zip(&holiday) {
        assert_eq!(g.rect, h.rect);
        assert!(matches!(h.shape, SlotShape::RoundedRect { radius } if radius > 0.0));
    }
}

#[test]
fn hearts_caps_at_three_square_slots() {
    let slots = compute_layout_slots(LayoutKind::Hearts, 600.0, 1800.0, 10, false);
    assert_eq!(slots.len(), 3);
    assert_non_overlapping(&slots);
    for s in &slots {
        assert!((s.rect.width() - s.rect.height()).abs() < EPS);
        assert_eq!(s.shape, SlotShape::Heart);
        assert_eq!(s.fit, FitMode::Square);
        assert!((s.rect.center().x - 300.0).abs() < EPS);
    }
}

#[test]
fn collage_caps_at_six_in_two_columns() {
    let slots = compute_layout_slots(LayoutKind::Collage, 900.0, 1125.0, 9, false);
    assert_eq!(slots.len(), 6);
    assert_non_overlapping(&slots);
    assert!((slots[0].rect.y0 - slots[1].rect.y0).abs() < EPS);
    assert!(slots[1].rect.x0 > slots[0].rect.x1);
    assert!(slots[2].rect.y0 > slots[0].rect.y1);
    assert!(slots.iter().all(|s| s.rect.x1 <= 900.0 && s.rect.y1 <= 1125.0));
}

#[test]
fn filmstrip_has_two_slots_and_lane_sprockets() {
    let slots = compute_layout_slots(LayoutKind::Filmstrip, 600.0, 1800.0, 4, false);
    assert_eq!(slots.len(), 2);
    let holes = filmstrip_sprockets(600.0, 1800.0);
    assert!(!holes.is_empty());
    assert_eq!(holes.len() % 2, 0);
    for hole in &holes {
        let in_left = hole.x1 <= slots[0].rect.x0;
        let in_right = hole.x0 >= slots[0].rect.x1;
        assert!(in_left || in_right, "{hole:?}");
        assert!(hole.y1 <= 1800.0);
    }
}

#[test]
fn zero_slots_and_unknown_ids_yield_nothing() {
    assert!(compute_layout_slots(LayoutKind::Classic, 600.0, 1800.0, 0, false).is_empty());
    assert!(compute_layout_slots_by_id("polaroid", 600.0, 1800.0, 3, false).is_empty());
    assert_eq!(
        compute_layout_slots_by_id("Aesthetic", 600.0, 1800.0, 3, false),
        compute_layout_slots(LayoutKind::Grid, 600.0, 1800.0, 3, false)
    );
}

#[test]
fn layout_is_deterministic() {
    for kind in LayoutKind::ALL {
        let a = compute_layout_slots(kind, 450.0, 1350.0, 6, true);
        let b = compute_layout_slots(kind, 450.0, 1350.0, 6, true);
        assert_eq!(a, b);
        assert!(a.len() <= kind.max_slots());
    }
}

#[test]
fn canvas_follows_aspect_family_and_compact_scaling() {
    let mut config = BoothConfig::default();
    let strip = Layout::new(LayoutKind::Classic).canvas(&config).unwrap();
    assert_eq!((strip.width, strip.height), (600, 1800));
    let collage = Layout::new(LayoutKind::Collage).canvas(&config).unwrap();
    assert_eq!((collage.width, collage.height), (900, 1125));

    config.compact = true;
    let strip = Layout::new(LayoutKind::Hearts).canvas(&config).unwrap();
    assert_eq!((strip.width, strip.height), (450, 1350));
}

#[test]
fn slot_count_is_clamped() {
    assert_eq!(Layout::new(LayoutKind::Hearts).with_slot_count(9).slot_count, 3);
    assert_eq!(Layout::new(LayoutKind::Collage).with_slot_count(0).slot_count, 1);
}

#[test]
fn layout_from_id_falls_back_to_empty() {
    assert_eq!(
        Layout::from_id("HEARTS", Some(2)),
        Layout::new(LayoutKind::Hearts).with_slot_count(2)
    );
    assert_eq!(Layout::from_id("aesthetic", None).kind, LayoutKind::Grid);
    let empty = Layout::from_id("polaroid", Some(3));
    assert_eq!(empty, Layout::empty());
    let canvas = empty.canvas(&BoothConfig::default()).unwrap();
    assert!(empty.slots(canvas, false).is_empty());
}

#[test]
fn layout_kind_parses_and_serializes() {
    assert_eq!(LayoutKind::parse(" FilmStrip "), Some(LayoutKind::Filmstrip));
    assert_eq!(LayoutKind::parse("mosaic"), None);
    let kind: LayoutKind = serde_json::from_str("\"aesthetic\"").unwrap();
    assert_eq!(kind, LayoutKind::Grid);
    assert_eq!(serde_json::to_string(&LayoutKind::Hearts).unwrap(), "\"hearts\"");
}
