#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parse_color_supports_short_and_long_hex() {
    assert_eq!(parse_color("#ABC"), Some(Rgba::opaque(170, 187, 204)));
    assert_eq!(parse_color("  #a1B2c3 "), Some(Rgba::opaque(161, 178, 195)));
}

#[test]
fn parse_color_reads_hex_alpha() {
    let c = parse_color("#ff000080").unwrap();
    assert_eq!((c.r, c.g, c.b), (255, 0, 0));
    assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn parse_color_supports_rgb_and_rgba() {
    assert_eq!(parse_color("rgb(255, 140, 0)"), Some(Rgba::opaque(255, 140, 0)));
    let c = parse_color("rgba(255,140,0,0.8)").unwrap();
    assert_eq!((c.r, c.g, c.b), (255, 140, 0));
    assert!((c.a - 0.8).abs() < 1e-6);
}

#[test]
fn parse_color_clamps_functional_channels() {
    assert_eq!(parse_color("rgb(300, -4, 12.6)"), Some(Rgba::opaque(255, 0, 13)));
}

#[test]
fn parse_color_supports_named_colors() {
    assert_eq!(parse_color("White"), Some(Rgba::opaque(255, 255, 255)));
    assert_eq!(parse_color("transparent").unwrap().a, 0.0);
}

#[test]
fn parse_color_rejects_invalid_inputs() {
    assert_eq!(parse_color("AABBCC"), None);
    assert_eq!(parse_color("#12"), None);
    assert_eq!(parse_color("#abcd"), None);
    assert_eq!(parse_color("#12GG34"), None);
    assert_eq!(parse_color("rgb(1, 2)"), None);
    assert_eq!(parse_color("rgb(1, 2, x)"), None);
    assert_eq!(parse_color("chartreuse-ish"), None);
}

#[test]
fn css_color_falls_back_to_black() {
    assert_eq!(css_color("nope"), Rgba::BLACK);
    assert_eq!(css_color("#00ff00"), Rgba::opaque(0, 255, 0));
}

#[test]
fn to_skia_multiplies_opacity() {
    let c = Rgba { r: 255, g: 0, b: 0, a: 0.5 }.to_skia(0.5);
    assert!((c.alpha() - 0.25).abs() < 1e-6);
    assert_eq!(c.red(), 1.0);
}
