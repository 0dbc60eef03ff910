use super::*;

#[test]
fn reference_screen_is_identity() {
    let ctx = ScaleContext::new(ScreenSize::REFERENCE).unwrap();
    assert_eq!(ctx.factor(), 1.0);
    assert_eq!(ctx.scale_size(ScreenSize::new(450, 450)), ScreenSize::new(450, 450));
}

#[test]
fn scale_uses_the_tighter_axis() {
    // 2560x1080 is wider than 16:9; height constrains.
    assert_eq!(
        compute_scale(ScreenSize::new(2560, 1080), ScreenSize::REFERENCE),
        1.0
    );
    assert_eq!(
        compute_scale(ScreenSize::new(3840, 2160), ScreenSize::REFERENCE),
        2.0
    );
    let narrow = compute_scale(ScreenSize::new(1280, 1024), ScreenSize::REFERENCE);
    assert!((narrow - 1280.0 / 1920.0).abs() < 1e-12);
}

#[test]
fn positions_subtract_title_bar_before_scaling() {
    let ctx = ScaleContext::new(ScreenSize::new(3840, 2160)).unwrap();
    assert_eq!(
        ctx.scale_position(ScreenPoint::new(230, 342)),
        ScreenPoint::new(460, (342 - TITLE_BAR_COMPENSATION) * 2)
    );
}

#[test]
fn empty_screen_is_rejected() {
    assert!(ScaleContext::new(ScreenSize::new(0, 1080)).is_err());
}

#[test]
fn place_scales_literals_and_keeps_the_title_bar_offset() {
    let ctx = ScaleContext::new(ScreenSize::new(960, 540)).unwrap();
    let p = ctx.place(&PositionSpec::at(100, 200), ScreenSize::new(400, 300));
    assert_eq!(p, ScreenPoint::new(50, 92));
}

#[test]
fn place_centers_on_an_ultrawide_screen() {
    let ctx = ScaleContext::new(ScreenSize::new(2560, 1080)).unwrap();
    let size = ScreenSize::new(400, 200);
    let p = ctx.place(&PositionSpec::centered(), size);
    assert_eq!(p.x + 200, 1280);
    assert_eq!(p.y, 486 - 100);

    let right = PositionSpec::parse("gapR0", "mid").unwrap();
    assert_eq!(ctx.place(&right, size).x + 400, 2560);
}

#[test]
fn place_centers_the_scaled_window_on_a_large_screen() {
    let ctx = ScaleContext::new(ScreenSize::new(3840, 1600)).unwrap();
    let size = ScreenSize::new(400, 200);
    let window = ctx.scale_size(size);
    let p = ctx.place(&PositionSpec::centered(), size);
    assert!((2 * p.x + window.width as i32 - 3840).abs() <= 1);
}
