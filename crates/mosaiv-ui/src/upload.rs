use mosaiv_engine::arena::{Arena, RawBuffer};
use mosaiv_engine::decoder::ImageCodec;
use mosaiv_engine::error::Result;
use mosaiv_engine::session::Session;

/// Marshal an uploaded file into the session and decode it.
///
/// The filename and the content bytes each get their own arena region
/// (allocate, write, bind); decoding consumes both. If staging the content
/// fails, the already-staged name region is released before the error
/// propagates.
pub fn ingest(
    session: &mut Session,
    codec: &dyn ImageCodec,
    filename: &str,
    bytes: &[u8],
) -> Result<()> {
    log::info!("upload: {filename:?} ({} bytes)", bytes.len());

    let name = stage(session.arena_mut(), filename.as_bytes())?;
    let content = match stage(session.arena_mut(), bytes) {
        Ok(content) => content,
        Err(e) => {
            session.arena_mut().release(name.into_region());
            return Err(e);
        }
    };

    session.install_decoded(codec, name, content)?;
    Ok(())
}

fn stage(arena: &mut Arena, bytes: &[u8]) -> Result<RawBuffer> {
    let region = arena.allocate(bytes.len())?;
    arena.write(&region, bytes)?;
    Ok(RawBuffer::bind(region))
}
