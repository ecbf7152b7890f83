//! Min/max contrast stretch into the 0..=255 range

use crate::models::{FloatGrid, GrayGrid, Grid};
use crate::utils::grayscale::round_to_u8;

/// Smallest and largest cell values
pub fn min_max(grid: &FloatGrid) -> (f64, f64) {
    grid.as_slice()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Linearly map `[min, max]` onto `[0, 255]`
///
/// A constant grid has no contrast to stretch and maps to all zeros.
pub fn stretch_to_u8(grid: &FloatGrid) -> GrayGrid {
    let (min, max) = min_max(grid);
    if min == max {
        return Grid::new(grid.width(), grid.height());
    }

    let scale = 255.0 / (max - min);
    grid.map(|v| {
        if v <= min {
            0
        } else if v >= max {
            255
        } else {
            round_to_u8((v - min) * scale)
        }
    })
}
