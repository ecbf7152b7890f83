//! Convert three colour planes to one luminance plane
//! Y = round(0.299*R + 0.587*G + 0.114*B), ties rounded to even
//!
//! - Sequential: plain row-major scan
//! - Parallel: rows processed independently with rayon, bit-identical output

use crate::error::{PipelineError, Result};
use crate::models::{GrayGrid, Grid};
use rayon::prelude::*;

const COEF_R: f64 = 0.299;
const COEF_G: f64 = 0.587;
const COEF_B: f64 = 0.114;

/// Round a non-negative value to the nearest integer, ties to even, clamped to u8
#[inline]
pub(crate) fn round_to_u8(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    round_to_u8(COEF_R * r as f64 + COEF_G * g as f64 + COEF_B * b as f64)
}

fn check_planes(r: &GrayGrid, g: &GrayGrid, b: &GrayGrid) -> Result<()> {
    r.ensure_same_size(g)?;
    r.ensure_same_size(b)
}

/// Convert R, G, B planes to luminance
pub fn rgb_to_luminance(r: &GrayGrid, g: &GrayGrid, b: &GrayGrid) -> Result<GrayGrid> {
    check_planes(r, g, b)?;

    let data = r
        .as_slice()
        .iter()
        .zip(g.as_slice())
        .zip(b.as_slice())
        .map(|((&r, &g), &b)| luminance(r, g, b))
        .collect();

    Grid::from_vec(r.width(), r.height(), data)
}

/// Convert R, G, B planes to luminance, processing rows in parallel
pub fn rgb_to_luminance_parallel(r: &GrayGrid, g: &GrayGrid, b: &GrayGrid) -> Result<GrayGrid> {
    check_planes(r, g, b)?;
    let width = r.width();
    let mut gray = Grid::new(width, r.height());

    gray.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let (rr, gr, br) = (r.row(y), g.row(y), b.row(y));
            for x in 0..width {
                row[x] = luminance(rr[x], gr[x], br[x]);
            }
        });

    Ok(gray)
}

/// Split packed RGB bytes (3 per pixel) into separate planes
pub fn interleaved_to_channels(
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<(GrayGrid, GrayGrid, GrayGrid)> {
    let pixel_count = width * height;
    if rgb.len() != pixel_count * 3 {
        return Err(PipelineError::BufferSize {
            expected: pixel_count * 3,
            actual: rgb.len(),
        });
    }

    let mut r = Vec::with_capacity(pixel_count);
    let mut g = Vec::with_capacity(pixel_count);
    let mut b = Vec::with_capacity(pixel_count);
    for px in rgb.chunks_exact(3) {
        r.push(px[0]);
        g.push(px[1]);
        b.push(px[2]);
    }

    Ok((
        Grid::from_vec(width, height, r)?,
        Grid::from_vec(width, height, g)?,
        Grid::from_vec(width, height, b)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(w: usize, h: usize, v: u8) -> GrayGrid {
        Grid::filled(w, h, v)
    }

    #[test]
    fn test_rgb_to_luminance() {
        // Pure white
        let white = rgb_to_luminance(&plane(1, 1, 255), &plane(1, 1, 255), &plane(1, 1, 255)).unwrap();
        assert_eq!(white.get(0, 0), 255);

        // Pure black
        let black = rgb_to_luminance(&plane(1, 1, 0), &plane(1, 1, 0), &plane(1, 1, 0)).unwrap();
        assert_eq!(black.get(0, 0), 0);

        // Pure red: 0.299 * 255 = 76.245
        let red = rgb_to_luminance(&plane(1, 1, 255), &plane(1, 1, 0), &plane(1, 1, 0)).unwrap();
        assert_eq!(red.get(0, 0), 76);

        // Pure green: 0.587 * 255 = 149.685
        let green = rgb_to_luminance(&plane(1, 1, 0), &plane(1, 1, 255), &plane(1, 1, 0)).unwrap();
        assert_eq!(green.get(0, 0), 150);

        // Neutral grey keeps its value
        let grey = rgb_to_luminance(&plane(2, 2, 128), &plane(2, 2, 128), &plane(2, 2, 128)).unwrap();
        assert!(grey.as_slice().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to_u8(127.5), 128);
        assert_eq!(round_to_u8(126.5), 126);
        assert_eq!(round_to_u8(0.5), 0);
        assert_eq!(round_to_u8(254.5), 254);
        assert_eq!(round_to_u8(127.49), 127);
        assert_eq!(round_to_u8(300.0), 255);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = rgb_to_luminance(&plane(2, 2, 0), &plane(2, 3, 0), &plane(2, 2, 0));
        assert!(matches!(result, Err(PipelineError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let w = 17;
        let h = 9;
        let r = Grid::from_vec(w, h, (0..w * h).map(|i| (i * 7 % 256) as u8).collect()).unwrap();
        let g = Grid::from_vec(w, h, (0..w * h).map(|i| (i * 13 % 256) as u8).collect()).unwrap();
        let b = Grid::from_vec(w, h, (0..w * h).map(|i| (i * 31 % 256) as u8).collect()).unwrap();

        let seq = rgb_to_luminance(&r, &g, &b).unwrap();
        let par = rgb_to_luminance_parallel(&r, &g, &b).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_interleaved_to_channels() {
        let rgb = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let (r, g, b) = interleaved_to_channels(&rgb, 2, 2).unwrap();
        assert_eq!(r.as_slice(), &[255, 0, 0, 255]);
        assert_eq!(g.as_slice(), &[0, 255, 0, 255]);
        assert_eq!(b.as_slice(), &[0, 0, 255, 255]);

        assert!(interleaved_to_channels(&rgb, 3, 2).is_err());
    }
}
