//! qr_locate - find the QR code region in a photograph
//!
//! A classical image-processing pipeline over plain 2-D grids: greyscale,
//! Sobel-style edge strength, repeated box blur, contrast stretch, fixed
//! threshold, morphological closing, connected-component labeling and a
//! bounding box around the largest component.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Tunable thresholds and pass counts
pub mod config;
/// Component labeling and bounding box extraction
pub mod detector;
/// Error type shared by every stage
pub mod error;
/// Core data structures (Grid, BoundingBox, RgbChannels)
pub mod models;
/// Stage orchestration
pub mod pipeline;
/// Image file codec and overlay rendering
pub mod tools;
/// Per-pixel stages (grayscale, edges, smoothing, thresholding, morphology)
pub mod utils;

pub use config::{BoxRule, PipelineConfig};
pub use error::{PipelineError, Result};
pub use models::{BoundingBox, FloatGrid, GrayGrid, Grid, LabelGrid, RgbChannels};
pub use pipeline::{LocateTelemetry, PipelineTrace, locate, locate_with_telemetry, locate_with_trace};

use tools::{ImageSource, RegionRenderer};

/// Locate the QR region in packed RGB bytes
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Bounding box of the region using the default configuration
pub fn locate_rgb(image: &[u8], width: usize, height: usize) -> Result<BoundingBox> {
    let channels = RgbChannels::from_interleaved(image, width, height)?;
    locate(width, height, &channels, &PipelineConfig::default())
}

/// Locator with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: PipelineConfig,
}

impl Locator {
    /// Create a locator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locator with the given configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Create a locator configured from `QR_LOCATE_*` environment variables
    pub fn from_env() -> Self {
        Self::with_config(PipelineConfig::from_env())
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Locate the region in decoded planes
    pub fn locate(&self, image: &RgbChannels) -> Result<BoundingBox> {
        locate(image.width(), image.height(), image, &self.config)
    }

    /// Locate and keep every intermediate grid
    pub fn trace(&self, image: &RgbChannels) -> Result<PipelineTrace> {
        locate_with_trace(image.width(), image.height(), image, &self.config)
    }

    /// Load from `source`, locate, and hand the result to `renderer`
    pub fn run<S, R>(&self, source: &S, renderer: &R) -> Result<BoundingBox>
    where
        S: ImageSource + ?Sized,
        R: RegionRenderer + ?Sized,
    {
        let image = source.load()?;
        let region = self.locate(&image)?;
        renderer.render(&image, &region)?;
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        seen: RefCell<Option<BoundingBox>>,
    }

    impl RegionRenderer for Recorder {
        fn render(&self, _image: &RgbChannels, region: &BoundingBox) -> Result<()> {
            *self.seen.borrow_mut() = Some(*region);
            Ok(())
        }
    }

    fn striped(width: usize, height: usize) -> Vec<u8> {
        // Vertical 2-pixel stripes in a centred square, white elsewhere
        let mut image = vec![255u8; width * height * 3];
        for y in height / 4..3 * height / 4 {
            for x in width / 4..3 * width / 4 {
                if (x / 2) % 2 == 0 {
                    let idx = (y * width + x) * 3;
                    image[idx..idx + 3].copy_from_slice(&[0, 0, 0]);
                }
            }
        }
        image
    }

    #[test]
    fn test_locate_empty() {
        // Flat image has no texture and therefore no region
        let image = vec![0u8; 300]; // 10x10 RGB
        assert!(matches!(
            locate_rgb(&image, 10, 10),
            Err(PipelineError::NoRegionFound)
        ));
    }

    #[test]
    fn test_locate_rgb_bad_buffer() {
        let image = vec![0u8; 299];
        assert!(matches!(
            locate_rgb(&image, 10, 10),
            Err(PipelineError::BufferSize { .. })
        ));
    }

    #[test]
    fn test_locator_run_hands_region_to_renderer() {
        let image = RgbChannels::from_interleaved(&striped(64, 64), 64, 64).unwrap();
        let recorder = Recorder {
            seen: RefCell::new(None),
        };

        let locator = Locator::new();
        let region = locator.run(&image, &recorder).unwrap();
        assert_eq!(*recorder.seen.borrow(), Some(region));
        assert!(region.contains(32, 32));
        assert_eq!(locator.config(), &PipelineConfig::default());
    }
}
