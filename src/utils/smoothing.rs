//! Repeated 3x3 box averaging

use crate::models::{FloatGrid, Grid};
use crate::utils::edges::map_interior_3x3;

/// Unweighted 3x3 mean over the interior; the outer ring is set to 0
pub fn box_average_3x3<T: Copy + Into<f64> + Sync>(src: &Grid<T>, parallel: bool) -> FloatGrid {
    map_interior_3x3(src, 0.0, parallel, |w| {
        // Top row, bottom row, then middle row; f64 sums depend on order
        let sum = w[0][0]
            + w[0][1]
            + w[0][2]
            + w[2][0]
            + w[2][1]
            + w[2][2]
            + w[1][0]
            + w[1][1]
            + w[1][2];
        sum / 9.0
    })
}

/// Apply [`box_average_3x3`] `passes` times in sequence
///
/// Zero passes returns the input unchanged (widened to f64).
pub fn box_average_repeated<T: Copy + Into<f64> + Sync>(
    src: &Grid<T>,
    passes: usize,
    parallel: bool,
) -> FloatGrid {
    let mut current: FloatGrid = src.map(Into::into);
    for _ in 0..passes {
        current = box_average_3x3(&current, parallel);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GrayGrid;

    #[test]
    fn test_box_average_single_spike() {
        let mut grid: GrayGrid = Grid::new(5, 5);
        grid.set(2, 2, 90);

        let avg = box_average_3x3(&grid, false);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(avg.get(x, y), 10.0);
            }
        }
        assert_eq!(avg.get(0, 0), 0.0);
        assert_eq!(avg.get(4, 2), 0.0);
    }

    #[test]
    fn test_border_reset_each_pass() {
        let grid: FloatGrid = Grid::filled(6, 6, 9.0);
        let once = box_average_3x3(&grid, false);
        assert_eq!(once.get(0, 3), 0.0);
        assert_eq!(once.get(3, 3), 9.0);
        // Second pass sees the zeroed border next to the interior
        let twice = box_average_3x3(&once, false);
        assert_eq!(twice.get(1, 1), 4.0);
    }

    #[test]
    fn test_window_summation_order() {
        let grid = Grid::from_vec(3, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]).unwrap();
        let avg = box_average_3x3(&grid, false);
        let expected = (0.1 + 0.2 + 0.3 + 0.7 + 0.8 + 0.9 + 0.4 + 0.5 + 0.6) / 9.0;
        assert_eq!(avg.get(1, 1).to_bits(), f64::to_bits(expected));
    }

    #[test]
    fn test_repeated_pass_counts() {
        let mut grid: GrayGrid = Grid::new(9, 9);
        grid.set(4, 4, 255);

        assert_eq!(box_average_repeated(&grid, 0, false), grid.map(f64::from));
        let three = box_average_repeated(&grid, 3, false);
        let manual = box_average_3x3(&box_average_3x3(&box_average_3x3(&grid, false), false), false);
        assert_eq!(three, manual);
        assert_eq!(box_average_repeated(&grid, 3, true), manual);
    }
}
