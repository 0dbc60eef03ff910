use super::*;
use crate::foundation::color::palette;

const TEST_FONT: &str = "tests/data/fonts/DejaVuSansMono.ttf";

fn engine() -> TextEngine {
    TextEngine::from_font_bytes(std::fs::read(TEST_FONT).unwrap()).unwrap()
}

fn style(size: f32) -> TextStyle {
    TextStyle {
        font_size: size,
        letter_spacing: 0.0,
        color: palette::FG,
    }
}

#[test]
fn registered_font_exposes_its_family() {
    let e = engine();
    assert!(e.has_font());
    assert!(!e.family().unwrap().trim().is_empty());
    assert!(e.font_bytes().is_some());
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(TextEngine::from_font_bytes(vec![0, 1, 2, 3]).is_err());
}

#[test]
fn engine_without_font_measures_nothing() {
    let e = TextEngine::new();
    assert!(e.layout("abc", &style(20.0), 1.0).is_none());
    assert!(e.measure("abc", &style(20.0)).is_none());
}

#[test]
fn width_follows_glyph_count_in_a_monospace_face() {
    let e = engine();
    let two = e.measure("ab", &style(40.0)).unwrap();
    let four = e.measure("abcd", &style(40.0)).unwrap();
    assert!(four.width > two.width);
    assert!((i64::from(four.width) - 2 * i64::from(two.width)).abs() <= 2);
    assert!(two.height >= 40);
}

#[test]
fn doubling_the_size_doubles_the_width() {
    let e = engine();
    let small = e.measure("yanzhi", &style(20.0)).unwrap();
    let large = e.measure("yanzhi", &style(40.0)).unwrap();
    assert!((i64::from(large.width) - 2 * i64::from(small.width)).abs() <= 2);
}

#[test]
fn breaks_add_lines() {
    let e = engine();
    let one = e.measure("ab", &style(30.0)).unwrap();
    let two = e.measure("ab<br>cd", &style(30.0)).unwrap();
    assert_eq!(two.width, one.width);
    assert!(two.height >= 2 * one.height - 2);
}

#[test]
fn letter_spacing_widens_the_line() {
    let e = engine();
    let tight = e.measure("abcd", &style(30.0)).unwrap();
    let mut wide = style(30.0);
    wide.letter_spacing = 10.0;
    assert!(e.measure("abcd", &wide).unwrap().width > tight.width);
}

#[test]
fn span_sizes_override_the_default() {
    let e = engine();
    let plain = e.measure("ab", &style(20.0)).unwrap();
    let sized = e
        .measure("<span style='font-size:80px;'>a</span>b", &style(20.0))
        .unwrap();
    assert!(sized.width > plain.width);
    assert!(sized.height > plain.height);
}

#[test]
fn markup_keeps_text_and_span_ranges() {
    let rich = parse_markup(
        "<span style='font-size:560px;'>え</span><span style='font-size:160px;'>？</span><br>うそ",
    );
    assert_eq!(rich.text, "え？\nうそ");
    assert_eq!(rich.sizes, vec![(0..3, 560.0), (3..6, 160.0)]);
}

#[test]
fn markup_orders_outer_spans_first_and_drops_unknown_tags() {
    let rich = parse_markup("<span style='font-size:10px'>a<span style='font-size:20px'>b</span></span><b>c</b>");
    assert_eq!(rich.text, "abc");
    assert_eq!(rich.sizes, vec![(0..2, 10.0), (1..2, 20.0)]);

    let unclosed = parse_markup("a<b");
    assert_eq!(unclosed.text, "a<b");
}
