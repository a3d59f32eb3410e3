use super::*;

fn gray(v: u8) -> Raster {
    Raster::filled(4, 4, [v, v, v, 255]).unwrap()
}

#[test]
fn defaults_are_neutral() {
    let src = gray(77);
    assert_eq!(apply_tonal(&src, &AdjustmentState::default()), src);
}

#[test]
fn sliders_clamp_into_range() {
    let mut s = AdjustmentState::default();
    s.set(Slider::Brightness, 500.0);
    s.set(Slider::Shadows, -80.0);
    s.set(Slider::Highlights, f32::NAN);
    assert_eq!(s.brightness, 200.0);
    assert_eq!(s.shadows, -50.0);
    assert_eq!(s.highlights, 0.0);
}

#[test]
fn exposure_and_brightness_compound() {
    let s = AdjustmentState {
        brightness: 150.0,
        exposure: 50.0,
        ..AdjustmentState::default()
    };
    let out = apply_tonal(&gray(100), &s);
    // 100 * 1.5 * 0.5 = 75
    assert_eq!(out.pixel(0, 0), Some([75, 75, 75, 255]));
}

#[test]
fn positive_shadows_darken() {
    let s = AdjustmentState {
        shadows: 40.0,
        ..AdjustmentState::default()
    };
    let out = apply_tonal(&gray(100), &s);
    assert!(out.pixel(1, 1).unwrap()[0] < 100);
}

#[test]
fn negative_shadows_lighten() {
    let s = AdjustmentState {
        shadows: -40.0,
        ..AdjustmentState::default()
    };
    let out = apply_tonal(&gray(100), &s);
    assert!(out.pixel(1, 1).unwrap()[0] > 100);
}

#[test]
fn positive_highlights_brighten_and_negative_is_screen_black() {
    let up = AdjustmentState {
        highlights: 50.0,
        ..AdjustmentState::default()
    };
    // screen with white at 0.25: 100 + (255 - 100) * 0.25 = 138.75
    assert_eq!(apply_tonal(&gray(100), &up).pixel(0, 0), Some([139, 139, 139, 255]));

    let down = AdjustmentState {
        highlights: -50.0,
        ..AdjustmentState::default()
    };
    assert_eq!(apply_tonal(&gray(100), &down), gray(100));
}

#[test]
fn alpha_is_preserved() {
    let src = Raster::filled(2, 2, [200, 100, 50, 90]).unwrap();
    let s = AdjustmentState {
        contrast: 180.0,
        shadows: 30.0,
        ..AdjustmentState::default()
    };
    assert_eq!(apply_tonal(&src, &s).pixel(0, 0).unwrap()[3], 90);
}
