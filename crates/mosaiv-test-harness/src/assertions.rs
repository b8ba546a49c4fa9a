use mosaiv_core::buffer::{Pixel, PixelBuffer};
use mosaiv_core::scaler::Bitmap;

/// Assert a bitmap has the expected dimensions.
pub fn assert_dimensions(bitmap: &Bitmap, width: u32, height: u32) {
    assert_eq!(
        (bitmap.width(), bitmap.height()),
        (width, height),
        "bitmap is {}x{}, expected {width}x{height}",
        bitmap.width(),
        bitmap.height()
    );
}

/// Assert every pixel of a bitmap is the given color with alpha 255.
pub fn assert_solid(bitmap: &Bitmap, rgb: [u8; 3]) {
    let expected = [rgb[0], rgb[1], rgb[2], 255];
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let actual = bitmap.rgba(x, y);
            assert_eq!(
                actual, expected,
                "pixel ({x}, {y}) is {actual:?}, expected {expected:?}"
            );
        }
    }
}

/// Assert every pixel of a bitmap is fully opaque.
pub fn assert_opaque(bitmap: &Bitmap) {
    for (i, chunk) in bitmap.data().chunks_exact(4).enumerate() {
        assert_eq!(chunk[3], 255, "pixel {i} has alpha {}", chunk[3]);
    }
}

/// Assert two pixel buffers hold identical pixels.
pub fn assert_buffers_equal(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "buffer dimensions differ"
    );
    for y in 0..actual.height() {
        for x in 0..actual.width() {
            assert_eq!(
                actual.pixel(x, y),
                expected.pixel(x, y),
                "buffers differ at ({x}, {y})"
            );
        }
    }
}

/// Assert every pixel of a buffer equals `fill`.
pub fn assert_uniform(buffer: &PixelBuffer, fill: Pixel) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            assert_eq!(
                buffer.pixel(x, y),
                fill,
                "pixel ({x}, {y}) is not the uniform fill"
            );
        }
    }
}
