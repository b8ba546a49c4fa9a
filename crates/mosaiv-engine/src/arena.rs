use crate::error::{EngineError, Result};

/// An allocated span of the arena. Move-only: a region is consumed exactly
/// once, either by `Arena::release` or by the decode call that takes its
/// `RawBuffer` by value, so double-release and use-after-release cannot be
/// written.
#[derive(Debug)]
pub struct ByteRegion {
    offset: usize,
    len: usize,
}

impl ByteRegion {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A region bound as a named byte buffer, ready to hand to a decode call.
/// Binding does not copy.
#[derive(Debug)]
pub struct RawBuffer(ByteRegion);

impl RawBuffer {
    pub fn bind(region: ByteRegion) -> Self {
        RawBuffer(region)
    }

    /// Borrow the underlying region, e.g. to read the bytes back before the
    /// consuming call.
    pub fn region(&self) -> &ByteRegion {
        &self.0
    }

    pub fn into_region(self) -> ByteRegion {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct FreeSpan {
    offset: usize,
    len: usize,
}

/// A shared byte arena with explicit allocate/release and a first-fit free
/// list. Upload payloads (filename bytes, file content bytes) are staged
/// here before decoding.
///
/// `bytes` hands out borrowed views; the borrow checker rules out reading a
/// view across a later `allocate` (which may reallocate the backing store)
/// or after `release`.
#[derive(Debug, Default)]
pub struct Arena {
    buf: Vec<u8>,
    free: Vec<FreeSpan>,
    limit: Option<usize>,
    live_bytes: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// An arena that refuses to grow past `limit` bytes of backing store.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Reserve `len` zeroed bytes. Reuses a released span when one fits,
    /// otherwise grows the backing store.
    pub fn allocate(&mut self, len: usize) -> Result<ByteRegion> {
        if let Some(idx) = self.free.iter().position(|span| span.len >= len) {
            let span = self.free[idx];
            if span.len == len {
                self.free.remove(idx);
            } else {
                self.free[idx] = FreeSpan {
                    offset: span.offset + len,
                    len: span.len - len,
                };
            }
            self.buf[span.offset..span.offset + len].fill(0);
            self.live_bytes += len;
            return Ok(ByteRegion {
                offset: span.offset,
                len,
            });
        }

        let offset = self.buf.len();
        let grown = offset + len;
        if let Some(limit) = self.limit {
            if grown > limit {
                return Err(EngineError::OutOfMemory {
                    requested: len,
                    limit,
                });
            }
        }
        log::debug!("arena grows to {grown} bytes for a {len}-byte region");
        self.buf.resize(grown, 0);
        self.live_bytes += len;
        Ok(ByteRegion { offset, len })
    }

    /// Copy `bytes` into the region. The lengths must match exactly.
    pub fn write(&mut self, region: &ByteRegion, bytes: &[u8]) -> Result<()> {
        if bytes.len() != region.len {
            return Err(EngineError::LengthMismatch {
                expected: region.len,
                actual: bytes.len(),
            });
        }
        self.buf[region.offset..region.offset + region.len].copy_from_slice(bytes);
        Ok(())
    }

    pub fn bytes(&self, region: &ByteRegion) -> &[u8] {
        &self.buf[region.offset..region.offset + region.len]
    }

    /// Return the region to the free list, coalescing with adjacent spans.
    pub fn release(&mut self, region: ByteRegion) {
        self.live_bytes -= region.len;
        if region.len == 0 {
            return;
        }
        let mut span = FreeSpan {
            offset: region.offset,
            len: region.len,
        };

        // Merge a neighbor that ends where this span starts, and one that
        // starts where it ends.
        if let Some(idx) = self
            .free
            .iter()
            .position(|f| f.offset + f.len == span.offset)
        {
            let prev = self.free.remove(idx);
            span = FreeSpan {
                offset: prev.offset,
                len: prev.len + span.len,
            };
        }
        if let Some(idx) = self.free.iter().position(|f| f.offset == span.offset + span.len) {
            let next = self.free.remove(idx);
            span.len += next.len;
        }
        self.free.push(span);
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
