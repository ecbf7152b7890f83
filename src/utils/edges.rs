//! Sobel-style edge magnitudes
//!
//! Both operators leave the outer one-pixel ring at zero: the 3x3 window is
//! only evaluated where it fits entirely inside the source.

use crate::error::Result;
use crate::models::{FloatGrid, Grid};
use rayon::prelude::*;

/// 3x3 weights, row-major top to bottom
pub type Kernel3x3 = [[f64; 3]; 3];

/// Responds to left/right intensity changes
pub const VERTICAL_EDGE_KERNEL: Kernel3x3 = [
    [-0.125, 0.0, 0.125],
    [-0.25, 0.0, 0.25],
    [-0.125, 0.0, 0.125],
];

/// Responds to top/bottom intensity changes
pub const HORIZONTAL_EDGE_KERNEL: Kernel3x3 = [
    [-0.125, -0.25, -0.125],
    [0.0, 0.0, 0.0],
    [0.125, 0.25, 0.125],
];

/// Evaluate `op` on every interior 3x3 window of `src`
///
/// Cells whose window would leave the grid keep `border`. Grids narrower or
/// shorter than 3 pixels come back entirely filled with `border`.
pub(crate) fn map_interior_3x3<T, F>(src: &Grid<T>, border: f64, parallel: bool, op: F) -> FloatGrid
where
    T: Copy + Into<f64> + Sync,
    F: Fn(&[[f64; 3]; 3]) -> f64 + Sync,
{
    let (width, height) = src.dimensions();
    let mut out = Grid::filled(width, height, border);
    if width < 3 || height < 3 {
        return out;
    }

    let fill_row = |y: usize, row: &mut [f64]| {
        let (above, here, below) = (src.row(y - 1), src.row(y), src.row(y + 1));
        for x in 1..width - 1 {
            let mut window = [[0.0; 3]; 3];
            for dx in 0..3 {
                window[0][dx] = above[x + dx - 1].into();
                window[1][dx] = here[x + dx - 1].into();
                window[2][dx] = below[x + dx - 1].into();
            }
            row[x] = op(&window);
        }
    };

    let interior = &mut out.as_mut_slice()[width..width * (height - 1)];
    if parallel {
        interior
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(i, row)| fill_row(i + 1, row));
    } else {
        interior
            .chunks_mut(width)
            .enumerate()
            .for_each(|(i, row)| fill_row(i + 1, row));
    }

    out
}

#[inline]
fn weighted_sum(kernel: &Kernel3x3, window: &[[f64; 3]; 3]) -> f64 {
    let mut sum = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            sum += kernel[ky][kx] * window[ky][kx];
        }
    }
    sum
}

/// |kernel * src| over the interior, zero border
pub fn convolve_abs<T>(src: &Grid<T>, kernel: &Kernel3x3, parallel: bool) -> FloatGrid
where
    T: Copy + Into<f64> + Sync,
{
    map_interior_3x3(src, 0.0, parallel, |w| weighted_sum(kernel, w).abs())
}

/// Absolute response to vertical edges (horizontal derivative)
pub fn vertical_edges_abs<T: Copy + Into<f64> + Sync>(src: &Grid<T>) -> FloatGrid {
    convolve_abs(src, &VERTICAL_EDGE_KERNEL, false)
}

/// Absolute response to horizontal edges (vertical derivative)
pub fn horizontal_edges_abs<T: Copy + Into<f64> + Sync>(src: &Grid<T>) -> FloatGrid {
    convolve_abs(src, &HORIZONTAL_EDGE_KERNEL, false)
}

/// Elementwise sum of two magnitude grids
///
/// This is deliberately `|gx| + |gy|`, not the Euclidean magnitude.
pub fn combine_edges(a: &FloatGrid, b: &FloatGrid) -> Result<FloatGrid> {
    a.ensure_same_size(b)?;
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x + y)
        .collect();
    Grid::from_vec(a.width(), a.height(), data)
}

/// Combined horizontal + vertical edge strength of `src`
pub fn edge_strength<T: Copy + Into<f64> + Sync>(src: &Grid<T>, parallel: bool) -> FloatGrid {
    let horizontal = convolve_abs(src, &HORIZONTAL_EDGE_KERNEL, parallel);
    let vertical = convolve_abs(src, &VERTICAL_EDGE_KERNEL, parallel);
    // Same source, same shape
    let mut combined = horizontal;
    for (c, v) in combined.as_mut_slice().iter_mut().zip(vertical.as_slice()) {
        *c += v;
    }
    combined
}
