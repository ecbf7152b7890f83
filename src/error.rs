use thiserror::Error;

/// Failures reported by the locating pipeline and its I/O collaborators
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A grid was requested with a zero width or height
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// A raw buffer does not hold exactly `width * height` cells
    #[error("buffer holds {actual} cells, expected {expected}")]
    BufferSize {
        /// Cells required by the dimensions
        expected: usize,
        /// Cells actually supplied
        actual: usize,
    },

    /// Two grids that must share a shape do not
    #[error("grid dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// (width, height) of the first grid
        left: (usize, usize),
        /// (width, height) of the second grid
        right: (usize, usize),
    },

    /// Nothing survived segmentation, so there is no region to report
    #[error("no foreground region found")]
    NoRegionFound,

    /// The raster-scan rectangle has a negative extent and cannot be a box
    #[error("raster-scan region is inverted: left={left} top={top} width={width} height={height}")]
    InvertedRegion {
        /// First-hit column
        left: i64,
        /// First-hit row
        top: i64,
        /// Last-hit column minus `left`
        width: i64,
        /// Last-hit row minus `top`
        height: i64,
    },

    /// Image decoding or encoding failed
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure while reading or writing images
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PipelineError>;
