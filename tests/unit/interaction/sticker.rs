use super::*;

fn board_with(n: usize) -> StickerBoard {
    let mut board = StickerBoard::default();
    for i in 0..n {
        board = board.with_added("\u{2B50}", Point::new(100.0 * i as f64, 50.0)).0;
    }
    board
}

#[test]
fn ids_are_unique_and_monotonic() {
    let board = board_with(3);
    let ids: Vec<u64> = board.stickers().iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    // removal never recycles an id
    let board = board.without(StickerId(2));
    let (board, id) = board.with_added("\u{2728}", Point::ZERO);
    assert_eq!(id, StickerId(3));
    assert_eq!(board.len(), 3);
}

#[test]
fn updates_are_persistent() {
    let before = board_with(2);
    let after = before.with_updated(StickerId(1), |s| s.with_size(80.0));
    assert_eq!(before.get(StickerId(1)).unwrap().size, DEFAULT_STICKER_SIZE);
    assert_eq!(after.get(StickerId(1)).unwrap().size, 80.0);
    assert_eq!(before.get(StickerId(0)), after.get(StickerId(0)));
}

#[test]
fn update_may_consume_captured_values() {
    let glyph = String::from("\u{1F496}");
    let board = board_with(2).with_updated(StickerId(1), move |s| Sticker {
        glyph,
        ..s.clone()
    });
    assert_eq!(board.get(StickerId(1)).unwrap().glyph, "\u{1F496}");
    assert_eq!(board.get(StickerId(0)).unwrap().glyph, "\u{2B50}");

    // unknown ids never run the update
    let same = board.with_updated(StickerId(7), |_| unreachable!());
    assert_eq!(same, board);
}

#[test]
fn update_cannot_escape_ranges_or_change_id() {
    let board = board_with(1).with_updated(StickerId(0), |s| Sticker {
        id: StickerId(99),
        size: 500.0,
        rotation: -30.0,
        ..s.clone()
    });
    let s = &board.stickers()[0];
    assert_eq!(s.id, StickerId(0));
    assert_eq!(s.size, MAX_STICKER_SIZE);
    assert_eq!(s.rotation, 330.0);
}

#[test]
fn size_and_rotation_stay_in_range() {
    let s = Sticker::new(StickerId(0), "x", Point::ZERO);
    for size in [-10.0, 0.0, 23.9, 24.0, 64.0, 120.0, 1e9, f64::INFINITY] {
        let v = s.with_size(size).size;
        assert!((MIN_STICKER_SIZE..=MAX_STICKER_SIZE).contains(&v), "{size} -> {v}");
    }
    for rot in [-720.5, -1e-18, 0.0, 359.999, 360.0, 1e6, f64::NAN] {
        let v = s.with_rotation(rot).rotation;
        assert!((0.0..360.0).contains(&v), "{rot} -> {v}");
    }
}

#[test]
fn hit_test_prefers_insertion_order() {
    let (board, first) = StickerBoard::default().with_added("a", Point::new(50.0, 50.0));
    let (board, _second) = board.with_added("b", Point::new(60.0, 50.0));
    assert_eq!(board.hit_test(Point::new(55.0, 50.0)), Some(first));
    assert_eq!(board.hit_test(Point::new(500.0, 500.0)), None);
    // radius is exclusive
    assert_eq!(board.hit_test(Point::new(50.0 - DEFAULT_STICKER_SIZE, 50.0)), None);
}

#[test]
fn default_positions_are_seeded_and_inside_margins() {
    let canvas = Canvas::new(600, 1800).unwrap();
    for id in 0..50 {
        let p = default_sticker_position(7, StickerId(id), canvas);
        assert!((90.0..=510.0).contains(&p.x), "{p:?}");
        assert!((270.0..=1530.0).contains(&p.y), "{p:?}");
        assert_eq!(p, default_sticker_position(7, StickerId(id), canvas));
    }
    assert_ne!(
        default_sticker_position(7, StickerId(0), canvas),
        default_sticker_position(8, StickerId(0), canvas)
    );
}

#[test]
fn from_stickers_continues_ids() {
    let board = StickerBoard::from_stickers([Sticker::new(StickerId(41), "a", Point::ZERO)]);
    assert_eq!(board.with_added("b", Point::ZERO).1, StickerId(42));
}
