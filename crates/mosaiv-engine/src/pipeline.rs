use mosaiv_core::params::CellCount;
use mosaiv_core::scaler::{Bitmap, Viewport, resample};

use crate::error::Result;
use crate::mosaic::{MosaicTransform, SeedMode};
use crate::registry::{ImageHandle, ImageStore};

/// Render a stored image for display, untransformed.
pub fn render(store: &ImageStore, handle: &ImageHandle, viewport: Viewport) -> Result<Bitmap> {
    Ok(resample(store.pixels(handle)?, viewport))
}

/// Apply the mosaic to a working copy of `source` and render the result.
///
/// The source image is never mutated: the transform runs on a copy that is
/// acquired up front and released on every exit path, including transform
/// failure. The cell count is clamped against the image's dimensions and
/// `cell_cap` before it reaches the transform.
pub fn apply_mosaic(
    store: &mut ImageStore,
    source: &ImageHandle,
    transform: &dyn MosaicTransform,
    seed_mode: SeedMode,
    requested_cells: u32,
    cell_cap: u32,
    viewport: Viewport,
) -> Result<Bitmap> {
    let copy = store.copy(source)?;
    let result = transform_and_render(
        store,
        &copy,
        transform,
        seed_mode,
        requested_cells,
        cell_cap,
        viewport,
    );
    // The single mandatory cleanup point: the copy dies here whether the
    // transform and render succeeded or not.
    store.release(copy)?;
    result
}

fn transform_and_render(
    store: &mut ImageStore,
    copy: &ImageHandle,
    transform: &dyn MosaicTransform,
    seed_mode: SeedMode,
    requested_cells: u32,
    cell_cap: u32,
    viewport: Viewport,
) -> Result<Bitmap> {
    let width = store.width(copy)?;
    let height = store.height(copy)?;
    let cells = CellCount::clamped(requested_cells, cell_cap, width, height);
    log::debug!(
        "mosaic pipeline: {width}x{height}, {} cells ({requested_cells} requested)",
        cells.get()
    );

    transform.apply(store.pixels_mut(copy)?, seed_mode, cells)?;
    Ok(resample(store.pixels(copy)?, viewport))
}
