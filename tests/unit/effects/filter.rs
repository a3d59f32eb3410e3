use super::*;

#[test]
fn every_enumerated_filter_resolves() {
    for f in FilterId::ALL {
        assert_eq!(resolve_filter_effect(f.as_str()), f.effect());
        assert_eq!(FilterId::parse(f.as_str()), Some(f));
    }
    assert!(resolve_filter_effect("none").is_identity());
}

#[test]
fn only_none_is_identity() {
    for f in FilterId::ALL.into_iter().skip(1) {
        assert!(!f.effect().is_identity(), "{} should change pixels", f.as_str());
    }
}

#[test]
fn unknown_ids_fall_back_to_identity() {
    assert!(resolve_filter_effect("lomo").is_identity());
    assert!(resolve_filter_effect("").is_identity());
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(FilterId::parse("  VinTage "), Some(FilterId::Vintage));
    assert_eq!(FilterId::parse("BW"), Some(FilterId::Bw));
}

#[test]
fn blur_only_effect_has_no_color_stage() {
    let soft_blur = EffectDescriptor {
        blur_px: 2.0,
        ..EffectDescriptor::IDENTITY
    };
    assert!(!soft_blur.has_color_stage());
    assert!(FilterId::Soft.effect().has_color_stage());
}

#[test]
fn serde_uses_lowercase_ids() {
    let f: FilterId = serde_json::from_str("\"sunset\"").unwrap();
    assert_eq!(f, FilterId::Sunset);
    assert_eq!(serde_json::to_string(&FilterId::Bw).unwrap(), "\"bw\"");
}
