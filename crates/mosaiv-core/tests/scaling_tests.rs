use mosaiv_core::buffer::{Pixel, PixelBuffer};
use mosaiv_core::scaler::{Viewport, resample};

fn viewport(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn checker(width: u32, height: u32, a: Pixel, b: Pixel) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x + y) % 2 == 0 { a } else { b }))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

#[test]
fn test_magnified_dimensions_are_scale_multiples() {
    for (w, h, max, expected_scale) in [
        (4u32, 4u32, 100u32, 25u32),
        (10, 5, 100, 10),
        (99, 99, 100, 1),
        (1, 1, 64, 64),
    ] {
        let source = PixelBuffer::filled(w, h, Pixel::BLACK).unwrap();
        let bitmap = resample(&source, viewport(max, max));
        assert_eq!(
            (bitmap.width(), bitmap.height()),
            (w * expected_scale, h * expected_scale),
            "source {w}x{h} into {max}x{max}"
        );
    }
}

#[test]
fn test_minified_dimensions_floor_by_ceil_scale() {
    for (w, h, max, expected_w, expected_h) in [
        (800u32, 600u32, 200u32, 200u32, 150u32),
        (1000, 1000, 100, 100, 100),
        (201, 100, 200, 100, 50),
        (500, 120, 250, 250, 60),
    ] {
        let source = PixelBuffer::filled(w, h, Pixel::BLACK).unwrap();
        let bitmap = resample(&source, viewport(max, max));
        assert_eq!(
            (bitmap.width(), bitmap.height()),
            (expected_w, expected_h),
            "source {w}x{h} into {max}x{max}"
        );
    }
}

#[test]
fn test_exact_viewport_match_is_identity() {
    let source = checker(64, 48, Pixel::from_rgb(250, 10, 0), Pixel::from_rgb(0, 10, 250));
    let bitmap = resample(&source, viewport(64, 48));
    assert_eq!((bitmap.width(), bitmap.height()), (64, 48));
    for y in 0..48 {
        for x in 0..64 {
            let p = source.pixel(x, y);
            assert_eq!(bitmap.rgba(x, y), [p.r(), p.g(), p.b(), 255]);
        }
    }
}

#[test]
fn test_box_average_stays_within_channel_bounds() {
    // Means of a two-color checker always land between the two colors.
    let a = Pixel::from_rgb(20, 40, 60);
    let b = Pixel::from_rgb(200, 180, 160);
    let source = checker(301, 157, a, b);
    let bitmap = resample(&source, viewport(100, 100));

    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let [r, g, bl, alpha] = bitmap.rgba(x, y);
            assert!(alpha == 255);
            assert!((20..=200).contains(&r), "red {r} out of range at ({x},{y})");
            assert!((40..=180).contains(&g));
            assert!((60..=160).contains(&bl));
        }
    }
}

#[test]
fn test_minification_is_lossy_but_documented() {
    // 2x2 block [0, 100, 200, 40] collapses to its truncating mean 85; the
    // original values are unrecoverable.
    let source = PixelBuffer::from_pixels(
        2,
        2,
        vec![
            Pixel::from_rgb(0, 0, 0),
            Pixel::from_rgb(100, 100, 100),
            Pixel::from_rgb(200, 200, 200),
            Pixel::from_rgb(40, 40, 40),
        ],
    )
    .unwrap();
    let bitmap = resample(&source, viewport(1, 1));
    assert_eq!((bitmap.width(), bitmap.height()), (1, 1));
    assert_eq!(bitmap.rgba(0, 0), [85, 85, 85, 255]);
}
