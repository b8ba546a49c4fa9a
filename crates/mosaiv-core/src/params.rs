/// Number of mosaic cells requested by the user, already clamped to the
/// valid domain for a given image.
///
/// The domain is `[1, min(cap, width*height/8)]`. User input is clamped
/// rather than rejected: a request of 0 becomes 1, a request above the cap
/// becomes the cap. For images smaller than 8 pixels the upper bound
/// collapses below 1 and the lower bound wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCount(u32);

impl CellCount {
    pub fn clamped(requested: u32, cap: u32, width: u32, height: u32) -> Self {
        let pixels = (width as u64) * (height as u64);
        let density_bound = (pixels / 8).min(u32::MAX as u64) as u32;
        let upper = cap.min(density_bound).max(1);
        CellCount(requested.clamp(1, upper))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_clamps_to_one() {
        assert_eq!(CellCount::clamped(0, 1000, 100, 100).get(), 1);
    }

    #[test]
    fn test_above_cap_clamps_to_cap() {
        assert_eq!(CellCount::clamped(5000, 1000, 100, 100).get(), 1000);
    }

    #[test]
    fn test_in_range_passes_through() {
        assert_eq!(CellCount::clamped(42, 1000, 100, 100).get(), 42);
    }

    #[test]
    fn test_density_bound_tightens_cap() {
        // 10x10 = 100 pixels -> at most 12 cells even with a large cap.
        assert_eq!(CellCount::clamped(5000, 1000, 10, 10).get(), 12);
    }

    #[test]
    fn test_tiny_image_lower_bound_wins() {
        // 2x2 = 4 pixels -> density bound is 0, but one cell is always valid.
        assert_eq!(CellCount::clamped(7, 1000, 2, 2).get(), 1);
    }
}
