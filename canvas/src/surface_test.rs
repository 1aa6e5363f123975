use super::*;

fn paint_red_square(surface: &mut Surface) {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(255, 0, 0, 255);
    let rect = tiny_skia::Rect::from_xywh(2.0, 2.0, 4.0, 4.0).unwrap();
    surface.pixmap_mut().fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
}

#[test]
fn new_surface_is_blank() {
    let s = Surface::new(16, 8).unwrap();
    assert_eq!((s.width(), s.height()), (16, 8));
    assert!(s.is_blank());
}

#[test]
fn zero_size_is_rejected() {
    assert!(matches!(Surface::new(0, 10), Err(SurfaceError::InvalidSize { width: 0, height: 10 })));
}

#[test]
fn alpha_at_reads_painted_pixels() {
    let mut s = Surface::new(10, 10).unwrap();
    paint_red_square(&mut s);
    assert_eq!(s.alpha_at(3.0, 3.0), 255);
    assert_eq!(s.alpha_at(8.0, 8.0), 0);
}

#[test]
fn alpha_at_rounds_coordinates() {
    let mut s = Surface::new(10, 10).unwrap();
    paint_red_square(&mut s);
    assert_eq!(s.alpha_at(1.6, 1.6), 255);
    assert_eq!(s.alpha_at(1.4, 1.4), 0);
}

#[test]
fn alpha_at_out_of_bounds_is_zero() {
    let s = Surface::new(10, 10).unwrap();
    assert_eq!(s.alpha_at(-3.0, 2.0), 0);
    assert_eq!(s.alpha_at(2.0, 50.0), 0);
    assert_eq!(s.alpha_at(f64::NAN, 2.0), 0);
}

#[test]
fn clear_resets_pixels() {
    let mut s = Surface::new(10, 10).unwrap();
    paint_red_square(&mut s);
    assert!(!s.is_blank());
    s.clear();
    assert!(s.is_blank());
}

#[test]
fn png_roundtrip_preserves_pixels() {
    let mut s = Surface::new(10, 10).unwrap();
    paint_red_square(&mut s);
    let bytes = s.encode_png().unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let back = Surface::decode_png(&bytes).unwrap();
    assert_eq!(back, s);
}

#[test]
fn decode_garbage_fails() {
    assert!(matches!(Surface::decode_png(b"not a png"), Err(SurfaceError::Decode(_))));
}
