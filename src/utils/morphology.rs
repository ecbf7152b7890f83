//! Binary morphology with a flat 3x3 structuring element
//!
//! Pixels outside the grid count as background, so border pixels still
//! dilate but can never survive erosion. Output cells are 0 or 1.

use crate::models::{GrayGrid, Grid};
use rayon::prelude::*;

/// Non-zero cells in the 3x3 neighbourhood of (x, y), including itself
#[inline]
fn neighbourhood_count(src: &GrayGrid, x: usize, y: usize) -> usize {
    let (width, height) = src.dimensions();
    let mut count = 0;
    for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
        let row = src.row(ny);
        for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
            if row[nx] > 0 {
                count += 1;
            }
        }
    }
    count
}

fn apply<F>(src: &GrayGrid, parallel: bool, keep: F) -> GrayGrid
where
    F: Fn(usize) -> bool + Sync,
{
    let width = src.width();
    let mut out = Grid::new(width, src.height());
    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = keep(neighbourhood_count(src, x, y)) as u8;
        }
    };

    if parallel {
        out.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        out.as_mut_slice()
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }
    out
}

/// Foreground where any of the 9 neighbourhood cells is foreground
pub fn dilate_3x3(src: &GrayGrid, parallel: bool) -> GrayGrid {
    apply(src, parallel, |count| count > 0)
}

/// Foreground only where all 9 neighbourhood cells are foreground
pub fn erode_3x3(src: &GrayGrid, parallel: bool) -> GrayGrid {
    apply(src, parallel, |count| count == 9)
}

/// Dilate `passes` times in sequence
pub fn dilate_repeated(src: &GrayGrid, passes: usize, parallel: bool) -> GrayGrid {
    (0..passes).fold(src.clone(), |acc, _| dilate_3x3(&acc, parallel))
}

/// Erode `passes` times in sequence
pub fn erode_repeated(src: &GrayGrid, passes: usize, parallel: bool) -> GrayGrid {
    (0..passes).fold(src.clone(), |acc, _| erode_3x3(&acc, parallel))
}

/// All dilations first, then all erosions
///
/// Interleaving single dilate/erode pairs gives a different result.
pub fn close(src: &GrayGrid, dilations: usize, erosions: usize, parallel: bool) -> GrayGrid {
    let dilated = dilate_repeated(src, dilations, parallel);
    erode_repeated(&dilated, erosions, parallel)
}
