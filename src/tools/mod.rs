//! Image codec and rendering collaborators around the core pipeline
//!
//! The pipeline itself only sees [`RgbChannels`]; everything here deals with
//! files through the `image` crate.

use crate::error::{PipelineError, Result};
use crate::models::{BoundingBox, GrayGrid, Grid, RgbChannels};
use image::{GrayImage, Rgb, RgbImage};
use log::debug;
use std::path::{Path, PathBuf};

/// Supplies decoded RGB planes
pub trait ImageSource {
    /// Decode the image into three planes
    fn load(&self) -> Result<RgbChannels>;
}

/// Consumes the located rectangle together with the original image
pub trait RegionRenderer {
    /// Present `region` over `image`
    fn render(&self, image: &RgbChannels, region: &BoundingBox) -> Result<()>;
}

/// Image file in any format the `image` crate decodes
#[derive(Debug, Clone)]
pub struct FileImage {
    path: PathBuf,
}

impl FileImage {
    /// Source reading from `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ImageSource for FileImage {
    fn load(&self) -> Result<RgbChannels> {
        load_rgb(&self.path)
    }
}

/// In-memory source, handy for synthetic images
impl ImageSource for RgbChannels {
    fn load(&self) -> Result<RgbChannels> {
        Ok(self.clone())
    }
}

/// Load an image file as RGB planes
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbChannels> {
    let rgb = image::open(path.as_ref())?.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!(
        "read image {} width={}, height={}",
        path.as_ref().display(),
        width,
        height
    );
    RgbChannels::from_interleaved(rgb.as_raw(), width as usize, height as usize)
}

fn gray_image(width: usize, height: usize, data: Vec<u8>) -> Result<GrayImage> {
    let expected = width * height;
    let actual = data.len();
    GrayImage::from_raw(width as u32, height as u32, data)
        .ok_or(PipelineError::BufferSize { expected, actual })
}

/// Write an 8-bit plane as a greyscale PNG (or any format implied by the extension)
pub fn save_gray<P: AsRef<Path>>(path: P, grid: &GrayGrid) -> Result<()> {
    let img = gray_image(grid.width(), grid.height(), grid.as_slice().to_vec())?;
    img.save(path)?;
    Ok(())
}

/// Write a mask with any non-zero cell shown as white
pub fn save_mask<T, P>(path: P, grid: &Grid<T>) -> Result<()>
where
    T: Copy + Default + PartialEq,
    P: AsRef<Path>,
{
    let zero = T::default();
    save_gray(path, &grid.map(|v| if v == zero { 0 } else { 255 }))
}

/// Write a float plane linearly scaled so its maximum maps to 255
pub fn save_float<P: AsRef<Path>>(path: P, grid: &Grid<f64>) -> Result<()> {
    let max = grid.as_slice().iter().copied().fold(0.0f64, f64::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    save_gray(path, &grid.map(|v| (v * scale).round().clamp(0.0, 255.0) as u8))
}

/// Copy of `image` with a rectangle outline drawn around `region`
pub fn draw_region(
    image: &RgbChannels,
    region: &BoundingBox,
    color: [u8; 3],
    line_width: usize,
) -> Result<RgbImage> {
    let (width, height) = (image.width(), image.height());
    let pixels = image.to_interleaved();
    let actual = pixels.len();
    let mut canvas = RgbImage::from_raw(width as u32, height as u32, pixels).ok_or(
        PipelineError::BufferSize {
            expected: width * height * 3,
            actual,
        },
    )?;

    // Line centred on the box edge, clipped to the image
    let line_width = line_width.max(1);
    let half = line_width / 2;
    let x0 = region.left.saturating_sub(half);
    let y0 = region.top.saturating_sub(half);
    let x1 = (region.right() + line_width - 1 - half).min(width - 1);
    let y1 = (region.bottom() + line_width - 1 - half).min(height - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let near_vertical =
                x < region.left + line_width - half || x + line_width > region.right() + half;
            let near_horizontal =
                y < region.top + line_width - half || y + line_width > region.bottom() + half;
            if near_vertical || near_horizontal {
                canvas.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }

    Ok(canvas)
}

/// Renderer that writes the image with a green outline to a file
#[derive(Debug, Clone)]
pub struct PngOverlay {
    output: PathBuf,
    color: [u8; 3],
    line_width: usize,
}

impl PngOverlay {
    /// Green, 3-pixel outline written to `output`
    pub fn new<P: AsRef<Path>>(output: P) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
            color: [0, 255, 0],
            line_width: 3,
        }
    }

    /// Override outline colour
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Override outline thickness (minimum 1)
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width.max(1);
        self
    }
}

impl RegionRenderer for PngOverlay {
    fn render(&self, image: &RgbChannels, region: &BoundingBox) -> Result<()> {
        let canvas = draw_region(image, region, self.color, self.line_width)?;
        canvas.save(&self.output)?;
        debug!("wrote overlay {}", self.output.display());
        Ok(())
    }
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary mask.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of foreground pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn gray_stats(gray: &GrayGrid) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray.as_slice() {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = (sum / gray.as_slice().len() as u64) as u8;
    GrayStats { min, max, avg }
}

/// Compute foreground pixel stats for a mask.
pub fn binary_stats(binary: &GrayGrid) -> BinaryStats {
    let foreground = binary.count(|v| v > 0);
    let total = binary.width() * binary.height();
    BinaryStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: foreground as f64 / total as f64,
    }
}
