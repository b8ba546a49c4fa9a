use std::path::Path;

use mosaiv_core::buffer::{Pixel, PixelBuffer};

use crate::arena::{Arena, RawBuffer};
use crate::error::{EngineError, Result};
use crate::registry::{ImageHandle, ImageStore};

/// Trait for image decoders, enabling test mocking.
pub trait ImageCodec {
    /// Decode raw file bytes into a pixel buffer. The filename is used only
    /// for format sniffing, never stored.
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<PixelBuffer>;
}

/// Decoder backed by the `image` crate (PNG and JPEG).
#[derive(Debug, Default)]
pub struct ImageRsCodec;

impl ImageCodec for ImageRsCodec {
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<PixelBuffer> {
        let sniffed = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(image::ImageFormat::from_extension);

        // Prefer the extension hint, but fall back to content-based
        // detection when the hint is missing or lies about the payload.
        let decoded = match sniffed {
            Some(format) => image::load_from_memory_with_format(bytes, format)
                .or_else(|_| image::load_from_memory(bytes)),
            None => image::load_from_memory(bytes),
        }
        .map_err(|e| EngineError::DecodeFailed(e.to_string()))?;

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels: Vec<Pixel> = rgb
            .pixels()
            .map(|p| Pixel::from_rgb(p.0[0], p.0[1], p.0[2]))
            .collect();

        log::debug!("decoded {name:?}: {width}x{height}");
        Ok(PixelBuffer::from_pixels(width, height, pixels)?)
    }
}

/// Decode an uploaded file staged in the arena and install the result in
/// the image store.
///
/// Both regions are consumed here: they are released back to the arena on
/// every path, success or failure, before the result propagates.
pub fn decode_upload(
    arena: &mut Arena,
    store: &mut ImageStore,
    codec: &dyn ImageCodec,
    name: RawBuffer,
    content: RawBuffer,
) -> Result<ImageHandle> {
    let name_region = name.into_region();
    let content_region = content.into_region();

    let decoded = {
        let name = String::from_utf8_lossy(arena.bytes(&name_region)).into_owned();
        codec.decode(&name, arena.bytes(&content_region))
    };

    arena.release(name_region);
    arena.release(content_region);

    store.insert(decoded?)
}

#[cfg(test)]
mod tests {
    use mosaiv_test_harness::fixtures;

    use super::*;

    fn stage(arena: &mut Arena, bytes: &[u8]) -> RawBuffer {
        let region = arena.allocate(bytes.len()).unwrap();
        arena.write(&region, bytes).unwrap();
        RawBuffer::bind(region)
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let codec = ImageRsCodec;
        let bytes = fixtures::png_bytes(6, 4, [10, 200, 30]);
        let buffer = codec.decode("tile.png", &bytes).unwrap();
        assert_eq!(buffer.width(), 6);
        assert_eq!(buffer.height(), 4);
        assert!(buffer
            .as_slice()
            .iter()
            .all(|&p| p == Pixel::from_rgb(10, 200, 30)));
    }

    #[test]
    fn test_decode_ignores_misleading_extension() {
        let codec = ImageRsCodec;
        // PNG payload with a .jpg name: content detection wins.
        let bytes = fixtures::png_bytes(2, 2, [1, 2, 3]);
        let buffer = codec.decode("photo.jpg", &bytes).unwrap();
        assert_eq!(buffer.width(), 2);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let codec = ImageRsCodec;
        let err = codec.decode("junk.png", &fixtures::not_an_image()).unwrap_err();
        assert!(matches!(err, EngineError::DecodeFailed(_)));
    }

    #[test]
    fn test_decode_upload_releases_regions_on_success() {
        let mut arena = Arena::new();
        let mut store = ImageStore::new();
        let codec = ImageRsCodec;

        let name = stage(&mut arena, b"tile.png");
        let content = stage(&mut arena, &fixtures::png_bytes(3, 3, [5, 5, 5]));

        let handle = decode_upload(&mut arena, &mut store, &codec, name, content).unwrap();
        assert_eq!(arena.live_bytes(), 0);
        assert_eq!(store.width(&handle).unwrap(), 3);
        store.release(handle).unwrap();
    }

    #[test]
    fn test_decode_upload_releases_regions_on_failure() {
        let mut arena = Arena::new();
        let mut store = ImageStore::new();
        let codec = ImageRsCodec;

        let name = stage(&mut arena, b"junk.png");
        let content = stage(&mut arena, &fixtures::not_an_image());

        let err = decode_upload(&mut arena, &mut store, &codec, name, content).unwrap_err();
        assert!(matches!(err, EngineError::DecodeFailed(_)));
        assert_eq!(arena.live_bytes(), 0);
        assert_eq!(store.live_count(), 0);
    }
}
