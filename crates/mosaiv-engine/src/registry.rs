use mosaiv_core::buffer::PixelBuffer;

use crate::error::{EngineError, Result};

/// Opaque reference to a decoded image held by an [`ImageStore`].
///
/// Handles are move-only: `release` consumes the handle, so double-release
/// and use-after-release are unreachable by construction rather than
/// runtime-checked. The generation field guards the remaining hole (a
/// handle presented to a store that never issued it).
#[derive(Debug, PartialEq, Eq)]
pub struct ImageHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    image: Option<PixelBuffer>,
}

/// Owner of all decoded pixel buffers. Generational slots plus an optional
/// byte budget shared by every live image.
#[derive(Debug, Default)]
pub struct ImageStore {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live_bytes: usize,
    limit: Option<usize>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses to hold more than `limit` bytes of pixel data.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Take ownership of a buffer and issue a handle for it.
    pub fn insert(&mut self, image: PixelBuffer) -> Result<ImageHandle> {
        let bytes = image.byte_len();
        if let Some(limit) = self.limit {
            if self.live_bytes + bytes > limit {
                return Err(EngineError::OutOfMemory {
                    requested: bytes,
                    limit,
                });
            }
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.image = Some(image);
        self.live_bytes += bytes;
        Ok(ImageHandle {
            index,
            generation: slot.generation,
        })
    }

    pub fn width(&self, handle: &ImageHandle) -> Result<u32> {
        Ok(self.get(handle)?.width())
    }

    pub fn height(&self, handle: &ImageHandle) -> Result<u32> {
        Ok(self.get(handle)?.height())
    }

    /// Borrowed view of the handle's pixels.
    pub fn pixels(&self, handle: &ImageHandle) -> Result<&PixelBuffer> {
        self.get(handle)
    }

    pub fn pixels_mut(&mut self, handle: &ImageHandle) -> Result<&mut PixelBuffer> {
        let slot = self.slot_mut(handle)?;
        slot.image.as_mut().ok_or(EngineError::InvalidHandle)
    }

    /// Duplicate the image behind `handle` into an independent new handle.
    /// The duplicate counts against the byte budget and must be released by
    /// the caller.
    pub fn copy(&mut self, handle: &ImageHandle) -> Result<ImageHandle> {
        let image = self.get(handle)?.clone();
        self.insert(image)
    }

    /// Free the image and invalidate the handle. The slot generation is
    /// bumped so any forged reference to it goes stale.
    pub fn release(&mut self, handle: ImageHandle) -> Result<()> {
        let slot = self.slot_mut(&handle)?;
        let image = slot.image.take().ok_or(EngineError::InvalidHandle)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.live_bytes -= image.byte_len();
        self.free.push(handle.index);
        Ok(())
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.image.is_some()).count()
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    fn get(&self, handle: &ImageHandle) -> Result<&PixelBuffer> {
        let slot = self.slots.get(handle.index).ok_or_else(|| {
            debug_assert!(false, "image handle from a different store");
            EngineError::InvalidHandle
        })?;
        if slot.generation != handle.generation {
            debug_assert!(false, "stale image handle generation");
            return Err(EngineError::InvalidHandle);
        }
        slot.image.as_ref().ok_or(EngineError::InvalidHandle)
    }

    fn slot_mut(&mut self, handle: &ImageHandle) -> Result<&mut Slot> {
        let slot = self.slots.get_mut(handle.index).ok_or_else(|| {
            debug_assert!(false, "image handle from a different store");
            EngineError::InvalidHandle
        })?;
        if slot.generation != handle.generation {
            debug_assert!(false, "stale image handle generation");
            return Err(EngineError::InvalidHandle);
        }
        Ok(slot)
    }
}
