use crate::error::{PipelineError, Result};

/// Fixed-size row-major 2-D buffer shared by every pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// 8-bit image plane (greyscale, stretched, binary)
pub type GrayGrid = Grid<u8>;
/// Floating-point plane for edge magnitudes and blurred values
pub type FloatGrid = Grid<f64>;
/// Component label plane; 0 is background
pub type LabelGrid = Grid<u32>;

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`
    ///
    /// Panics when either dimension is zero; use [`Grid::from_vec`] for
    /// untrusted sizes.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Wrap an existing row-major buffer
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyGrid { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(PipelineError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True when both grids have identical dimensions
    pub fn same_size<U: Copy>(&self, other: &Grid<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Error unless `other` matches this grid's dimensions
    pub fn ensure_same_size<U: Copy>(&self, other: &Grid<U>) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(PipelineError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            })
        }
    }

    /// Cell at (x, y)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    /// Overwrite cell at (x, y)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[y * self.width + x] = value;
    }

    /// Borrow row `y`
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Raw row-major cells
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw row-major cells
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every cell, producing a grid of the same shape
    pub fn map<U: Copy, F: Fn(T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Number of cells matching `pred`
    pub fn count<F: Fn(T) -> bool>(&self, pred: F) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }
}
