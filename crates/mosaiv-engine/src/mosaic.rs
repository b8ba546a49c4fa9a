use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use mosaiv_core::buffer::{Pixel, PixelBuffer};
use mosaiv_core::params::CellCount;

use crate::error::Result;

/// How the mosaic scatters its cell sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Fixed base seed: the same image and cell count always produce the
    /// same mosaic.
    Deterministic,
    /// Seeded from OS entropy: every application looks different.
    Randomized,
}

/// An in-place pixel transform parameterized by a cell count. Implementors
/// must never change the buffer's dimensions.
pub trait MosaicTransform {
    fn apply(&self, buffer: &mut PixelBuffer, seed_mode: SeedMode, cells: CellCount)
    -> Result<()>;
}

/// Voronoi mosaic: scatters `cells` sites across the image, assigns every
/// pixel to its nearest site, and recolors each cell with the mean color of
/// its members.
#[derive(Debug, Clone)]
pub struct VoronoiMosaic {
    pub base_seed: u64,
}

impl Default for VoronoiMosaic {
    fn default() -> Self {
        Self {
            base_seed: 0x9e37_79b9_7f4a_7c15,
        }
    }
}

impl MosaicTransform for VoronoiMosaic {
    fn apply(
        &self,
        buffer: &mut PixelBuffer,
        seed_mode: SeedMode,
        cells: CellCount,
    ) -> Result<()> {
        let mut rng = match seed_mode {
            SeedMode::Deterministic => StdRng::seed_from_u64(self.base_seed),
            SeedMode::Randomized => StdRng::from_entropy(),
        };

        let (width, height) = (buffer.width(), buffer.height());
        let sites: Vec<(u32, u32)> = (0..cells.get())
            .map(|_| (rng.gen_range(0..width), rng.gen_range(0..height)))
            .collect();
        log::debug!(
            "mosaic: {} sites over {width}x{height} ({seed_mode:?})",
            sites.len()
        );

        let cell_of = assign_cells(width, height, &sites);

        // Per-cell channel sums, then truncating means.
        let mut sums = vec![[0u64; 3]; sites.len()];
        let mut areas = vec![0u64; sites.len()];
        for (i, &cell) in cell_of.iter().enumerate() {
            let p = buffer.as_slice()[i];
            let sum = &mut sums[cell as usize];
            sum[0] += p.r() as u64;
            sum[1] += p.g() as u64;
            sum[2] += p.b() as u64;
            areas[cell as usize] += 1;
        }
        let colors: Vec<Pixel> = sums
            .iter()
            .zip(&areas)
            .map(|(sum, &area)| {
                if area == 0 {
                    // A site shadowed by a duplicate never wins a pixel.
                    Pixel::BLACK
                } else {
                    Pixel::from_rgb(
                        (sum[0] / area) as u8,
                        (sum[1] / area) as u8,
                        (sum[2] / area) as u8,
                    )
                }
            })
            .collect();

        let width_px = width as usize;
        buffer
            .as_mut_slice()
            .par_chunks_exact_mut(width_px)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    *slot = colors[cell_of[y * width_px + x] as usize];
                }
            });

        Ok(())
    }
}

/// Nearest-site index for every pixel, row-major. Sites are bucketed into a
/// coarse grid (about one site per bucket) and each pixel searches outward
/// ring by ring, stopping once no unscanned bucket can hold a closer site.
fn assign_cells(width: u32, height: u32, sites: &[(u32, u32)]) -> Vec<u32> {
    let pixels = (width as u64) * (height as u64);
    let bucket = (((pixels / sites.len() as u64) as f64).sqrt().ceil() as u32).max(1);
    let gw = (width + bucket - 1) / bucket;
    let gh = (height + bucket - 1) / bucket;

    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); (gw as usize) * (gh as usize)];
    for (i, &(x, y)) in sites.iter().enumerate() {
        buckets[((y / bucket) * gw + (x / bucket)) as usize].push(i as u32);
    }

    let mut cell_of = vec![0u32; pixels as usize];
    cell_of
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                row[x as usize] = nearest_site(x, y as u32, bucket, gw, gh, &buckets, sites);
            }
        });
    cell_of
}

fn nearest_site(
    x: u32,
    y: u32,
    bucket: u32,
    gw: u32,
    gh: u32,
    buckets: &[Vec<u32>],
    sites: &[(u32, u32)],
) -> u32 {
    let bx = (x / bucket) as i64;
    let by = (y / bucket) as i64;
    let mut best = 0u32;
    let mut best_dist = u64::MAX;

    let max_ring = gw.max(gh) as i64;
    for ring in 0..=max_ring {
        // Any bucket at Chebyshev ring r is at least (r-1) bucket widths
        // away from the pixel; once that floor exceeds the best distance,
        // no further ring can win.
        if best_dist < u64::MAX {
            let floor = (ring - 1).max(0) as u64 * bucket as u64;
            if floor * floor > best_dist {
                break;
            }
        }

        visit_ring(bx, by, ring, gw as i64, gh as i64, |ux, uy| {
            for &site in &buckets[(uy * gw as i64 + ux) as usize] {
                let (sx, sy) = sites[site as usize];
                let dx = sx as i64 - x as i64;
                let dy = sy as i64 - y as i64;
                let dist = (dx * dx + dy * dy) as u64;
                if dist < best_dist {
                    best_dist = dist;
                    best = site;
                }
            }
        });
    }
    best
}

/// Invoke `f` for every in-bounds bucket at Chebyshev distance `ring` from
/// (bx, by).
fn visit_ring(bx: i64, by: i64, ring: i64, gw: i64, gh: i64, mut f: impl FnMut(i64, i64)) {
    let mut visit = |ux: i64, uy: i64| {
        if ux >= 0 && uy >= 0 && ux < gw && uy < gh {
            f(ux, uy);
        }
    };
    if ring == 0 {
        visit(bx, by);
        return;
    }
    for dx in -ring..=ring {
        visit(bx + dx, by - ring);
        visit(bx + dx, by + ring);
    }
    for dy in (-ring + 1)..=(ring - 1) {
        visit(bx - ring, by + dy);
        visit(bx + ring, by + dy);
    }
}
