use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#FF7C7F").unwrap(), palette::TETO_RED);
    let c = Rgba8::parse_hex("0000ff80").unwrap();
    assert_eq!(c.to_array(), [0, 0, 255, 128]);
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#GG0000").is_err());
}

#[test]
fn json_round_trips_through_hex() {
    let s = serde_json::to_string(&palette::BG).unwrap();
    assert_eq!(s, "\"#F2EFF2\"");
    let back: Rgba8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, palette::BG);
}

#[test]
fn translucent_colors_print_their_alpha() {
    assert_eq!(Rgba8::TRANSPARENT.to_string(), "#00000000");
    assert_eq!(palette::ROPE.to_string(), "#CDA4AB");
}
