use super::*;

const ALL: [Ease; 5] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InCubic,
    Ease::OutCubic,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn out_cubic_leads_in_cubic() {
    assert!(Ease::OutCubic.apply(0.25) > Ease::Linear.apply(0.25));
    assert!(Ease::InCubic.apply(0.25) < Ease::Linear.apply(0.25));
    assert!((Ease::OutCubic.apply(0.5) - 0.875).abs() < 1e-12);
}

#[test]
fn reversed_curve_mirrors_progress() {
    for e in ALL {
        assert_eq!(e.reversed().reversed(), e);
        for t in [0.1, 0.3, 0.5, 0.8] {
            let mirrored = 1.0 - e.reversed().apply(1.0 - t);
            assert!((e.apply(t) - mirrored).abs() < 1e-12, "{e:?} at {t}");
        }
    }
}

#[test]
fn curves_are_named_in_show_json() {
    assert_eq!(serde_json::to_string(&Ease::OutQuad).unwrap(), "\"OutQuad\"");
    assert_eq!(Ease::default(), Ease::OutCubic);
}
