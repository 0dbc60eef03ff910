use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 100, 50, 255], 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([9, 9, 9, 255], [10, 20, 30, 255], 1.0), [10, 20, 30, 255]);
}

#[test]
fn half_opacity_blends() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn premultiply_roundtrips_opaque_colors() {
    let px = [0xFF, 0x7C, 0x7F, 255];
    assert_eq!(unpremultiply(premultiply(px)), px);
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
}
