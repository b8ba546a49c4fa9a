use uuid::Uuid;

use mosaiv_core::config::AppConfig;
use mosaiv_core::scaler::{Bitmap, Viewport};

use crate::arena::{Arena, RawBuffer};
use crate::decoder::{ImageCodec, decode_upload};
use crate::error::{EngineError, Result};
use crate::mosaic::{MosaicTransform, SeedMode};
use crate::pipeline;
use crate::registry::{ImageHandle, ImageStore};

/// The currently loaded image: decoded pixels held by the store plus the
/// metadata the shell displays.
#[derive(Debug)]
pub struct SourceImage {
    pub id: Uuid,
    pub name: String,
    pub width: u32,
    pub height: u32,
    handle: ImageHandle,
}

impl SourceImage {
    pub fn handle(&self) -> &ImageHandle {
        &self.handle
    }
}

/// Owns the arena, the image store, and at most one live source image.
///
/// All mutable shared state of the application lives here; every operation
/// takes the session explicitly. Replacing the source on a new upload
/// decodes first, then releases the old handle, so a failed decode leaves
/// the previous image (and its rendered preview) untouched.
#[derive(Debug, Default)]
pub struct Session {
    arena: Arena,
    store: ImageStore,
    source: Option<SourceImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = match config.image_store_limit {
            Some(limit) => ImageStore::with_limit(limit),
            None => ImageStore::new(),
        };
        Self {
            arena: Arena::new(),
            store,
            source: None,
        }
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Number of images currently held by the store (source plus any
    /// in-flight working copies).
    pub fn live_images(&self) -> usize {
        self.store.live_count()
    }

    /// Decode an upload staged in the arena and make it the session's
    /// source image. The previous source is released immediately after a
    /// successful replacement; on failure it stays installed.
    pub fn install_decoded(
        &mut self,
        codec: &dyn ImageCodec,
        name: RawBuffer,
        content: RawBuffer,
    ) -> Result<&SourceImage> {
        let display_name = String::from_utf8_lossy(self.arena.bytes(name.region())).into_owned();

        let handle = decode_upload(&mut self.arena, &mut self.store, codec, name, content)?;
        let width = self.store.width(&handle)?;
        let height = self.store.height(&handle)?;

        if let Some(previous) = self.source.take() {
            log::info!("replacing source image {:?}", previous.name);
            self.store.release(previous.handle)?;
        }

        Ok(self.source.insert(SourceImage {
            id: Uuid::new_v4(),
            name: display_name,
            width,
            height,
            handle,
        }))
    }

    /// Render the untransformed source for display.
    pub fn render_source(&self, viewport: Viewport) -> Result<Bitmap> {
        let source = self.source.as_ref().ok_or(EngineError::NoSource)?;
        pipeline::render(&self.store, &source.handle, viewport)
    }

    /// Run the mosaic pipeline against the current source.
    pub fn apply_mosaic(
        &mut self,
        transform: &dyn MosaicTransform,
        seed_mode: SeedMode,
        requested_cells: u32,
        cell_cap: u32,
        viewport: Viewport,
    ) -> Result<Bitmap> {
        let source = self.source.as_ref().ok_or(EngineError::NoSource)?;
        pipeline::apply_mosaic(
            &mut self.store,
            &source.handle,
            transform,
            seed_mode,
            requested_cells,
            cell_cap,
            viewport,
        )
    }

    /// Release the current source, if any.
    pub fn clear(&mut self) -> Result<()> {
        if let Some(source) = self.source.take() {
            self.store.release(source.handle)?;
        }
        Ok(())
    }
}
