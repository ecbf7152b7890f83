//! Bounding box extraction for the selected component

use crate::config::BoxRule;
use crate::error::{PipelineError, Result};
use crate::models::{BoundingBox, Grid};

/// Minimal axis-aligned rectangle around all non-zero cells
///
/// Returns `None` when the grid has no foreground at all, so an empty
/// result can never be mistaken for a box at the origin.
pub fn bounding_box<T>(grid: &Grid<T>) -> Option<BoundingBox>
where
    T: Copy + Default + PartialEq,
{
    let zero = T::default();
    let mut extent: Option<(usize, usize, usize, usize)> = None;

    for y in 0..grid.height() {
        for (x, &v) in grid.row(y).iter().enumerate() {
            if v == zero {
                continue;
            }
            let e = extent.get_or_insert((x, y, x, y));
            e.0 = e.0.min(x);
            e.2 = e.2.max(x);
            e.3 = y;
        }
    }

    extent.map(|(left, top, right, bottom)| BoundingBox::from_corners(left, top, right, bottom))
}

/// First-hit/last-hit raster scan as signed `(left, top, width, height)`
///
/// `left` and `top` come from the first non-zero cell in row-major order,
/// `right` and `bottom` from the last one. `height` is never negative but
/// `width` is whenever the last hit sits left of the first.
pub fn raster_scan_box<T>(grid: &Grid<T>) -> Option<(i64, i64, i64, i64)>
where
    T: Copy + Default + PartialEq,
{
    let zero = T::default();
    let mut first: Option<(usize, usize)> = None;
    let mut last = (0, 0);

    for y in 0..grid.height() {
        for (x, &v) in grid.row(y).iter().enumerate() {
            if v != zero {
                first.get_or_insert((x, y));
                last = (x, y);
            }
        }
    }

    first.map(|(left, top)| {
        let (left, top) = (left as i64, top as i64);
        (left, top, last.0 as i64 - left, last.1 as i64 - top)
    })
}

/// Reduce a component to a box under `rule`
///
/// `Ok(None)` for an empty grid. A raster scan with negative width is
/// reported as [`PipelineError::InvertedRegion`].
pub fn region_box<T>(grid: &Grid<T>, rule: BoxRule) -> Result<Option<BoundingBox>>
where
    T: Copy + Default + PartialEq,
{
    match rule {
        BoxRule::Minimal => Ok(bounding_box(grid)),
        BoxRule::RasterScan => match raster_scan_box(grid) {
            None => Ok(None),
            Some(scan) => BoundingBox::from_signed(scan).map(Some).ok_or(
                PipelineError::InvertedRegion {
                    left: scan.0,
                    top: scan.1,
                    width: scan.2,
                    height: scan.3,
                },
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GrayGrid, LabelGrid};

    #[test]
    fn test_single_pixel() {
        let mut grid: LabelGrid = Grid::new(12, 10);
        grid.set(7, 5, 3);
        assert_eq!(
            bounding_box(&grid),
            Some(BoundingBox {
                left: 7,
                top: 5,
                width: 0,
                height: 0
            })
        );
    }

    fn diamond() -> GrayGrid {
        // First and last raster hits share a column
        let mut grid: GrayGrid = Grid::new(9, 9);
        for (x, y) in [(4, 1), (3, 2), (5, 2), (2, 3), (6, 3), (3, 4), (5, 4), (4, 5)] {
            grid.set(x, y, 1);
        }
        grid
    }

    #[test]
    fn test_irregular_shape_uses_extremes() {
        assert_eq!(bounding_box(&diamond()), Some(BoundingBox::from_corners(2, 1, 6, 5)));
    }

    #[test]
    fn test_diamond_under_both_rules() {
        let grid = diamond();
        assert_eq!(raster_scan_box(&grid), Some((4, 1, 0, 4)));
        assert_eq!(bounding_box(&grid).map(|b| b.to_tuple()), Some((2, 1, 4, 4)));

        let scan = region_box(&grid, BoxRule::RasterScan).unwrap();
        assert_eq!(scan.map(|b| b.to_tuple()), Some((4, 1, 0, 4)));
        let minimal = region_box(&grid, BoxRule::Minimal).unwrap();
        assert_eq!(minimal.map(|b| b.to_tuple()), Some((2, 1, 4, 4)));
    }

    #[test]
    fn test_raster_scan_negative_width() {
        // Disc-like blob: last hit on the bottom row lies left of the top row's first hit
        let mut grid: LabelGrid = Grid::new(10, 6);
        for x in 5..8 {
            grid.set(x, 1, 2);
        }
        for x in 1..9 {
            grid.set(x, 2, 2);
        }
        for x in 2..4 {
            grid.set(x, 3, 2);
        }

        assert_eq!(raster_scan_box(&grid), Some((5, 1, -2, 2)));
        assert!(matches!(
            region_box(&grid, BoxRule::RasterScan),
            Err(PipelineError::InvertedRegion {
                left: 5,
                top: 1,
                width: -2,
                height: 2
            })
        ));
        assert_eq!(
            region_box(&grid, BoxRule::Minimal).unwrap(),
            Some(BoundingBox::from_corners(1, 1, 8, 3))
        );
    }

    #[test]
    fn test_raster_scan_single_pixel_and_empty() {
        let mut grid: LabelGrid = Grid::new(12, 10);
        assert_eq!(raster_scan_box(&grid), None);
        assert_eq!(region_box(&grid, BoxRule::RasterScan).unwrap(), None);
        grid.set(7, 5, 1);
        assert_eq!(raster_scan_box(&grid), Some((7, 5, 0, 0)));
    }

    #[test]
    fn test_empty_is_none() {
        let grid: GrayGrid = Grid::new(4, 4);
        assert_eq!(bounding_box(&grid), None);
    }
}
