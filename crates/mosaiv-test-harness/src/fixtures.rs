use std::io::Cursor;

/// Encode a solid-color PNG in memory. Decode tests consume these bytes
/// instead of files on disk.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .expect("in-memory png encode");
    cursor.into_inner()
}

/// Bytes that are definitely not a decodable image.
pub fn not_an_image() -> Vec<u8> {
    b"this is not an image payload at all".to_vec()
}
