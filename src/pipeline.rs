use crate::config::{BoxRule, PipelineConfig};
use crate::detector::connected_components::{Labeling, label_components};
use crate::detector::region::{raster_scan_box, region_box};
use crate::error::{PipelineError, Result};
use crate::models::{BoundingBox, FloatGrid, GrayGrid, LabelGrid, RgbChannels};
use crate::utils::binarization::{threshold_ge, threshold_ge_in_place};
use crate::utils::edges::edge_strength;
use crate::utils::grayscale::{rgb_to_luminance, rgb_to_luminance_parallel};
use crate::utils::morphology::close;
use crate::utils::normalization::stretch_to_u8;
use crate::utils::smoothing::box_average_repeated;
use log::{debug, trace};
use std::time::Instant;

/// Stage-level counters collected while locating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateTelemetry {
    /// Foreground pixels right after thresholding
    pub thresholded_pixels: usize,
    /// Foreground pixels after dilation and erosion
    pub closed_pixels: usize,
    /// Connected components found
    pub components: usize,
    /// Pixels in the selected component
    pub largest_component_pixels: usize,
    /// Wall time of the whole run in microseconds
    pub elapsed_micros: u128,
}

/// Every intermediate grid of one run, in pipeline order
#[derive(Debug, Clone)]
pub struct PipelineTrace {
    /// Luminance plane
    pub greyscale: GrayGrid,
    /// `|horizontal| + |vertical|` edge strength
    pub edges: FloatGrid,
    /// Edge strength after all box-average passes
    pub smoothed: FloatGrid,
    /// Smoothed map stretched to 0..=255
    pub stretched: GrayGrid,
    /// Thresholded mask (0 / 255)
    pub binary: GrayGrid,
    /// Mask after dilation then erosion (0 / 1)
    pub closed: GrayGrid,
    /// Component labels and sizes of `closed`
    pub labeling: Labeling,
    /// Labels with everything but the largest component zeroed
    pub component: Option<LabelGrid>,
    /// Final rectangle, `None` when no region was found or the scan was inverted
    pub region: Option<BoundingBox>,
    /// First-hit/last-hit scan of `component` as signed `(left, top, width, height)`
    pub scan_box: Option<(i64, i64, i64, i64)>,
    /// Rule that produced `region`
    pub box_rule: BoxRule,
    /// Counters for this run
    pub telemetry: LocateTelemetry,
}

impl PipelineTrace {
    /// The located region, [`PipelineError::NoRegionFound`], or
    /// [`PipelineError::InvertedRegion`] for a raster scan with negative width
    pub fn region(&self) -> Result<BoundingBox> {
        let region = match &self.component {
            Some(component) => region_box(component, self.box_rule)?,
            None => None,
        };
        region.ok_or(PipelineError::NoRegionFound)
    }
}

fn validate(width: usize, height: usize, channels: &RgbChannels) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyGrid { width, height });
    }
    for plane in [&channels.r, &channels.g, &channels.b] {
        if plane.dimensions() != (width, height) {
            return Err(PipelineError::DimensionMismatch {
                left: (width, height),
                right: plane.dimensions(),
            });
        }
    }
    Ok(())
}

fn to_greyscale(channels: &RgbChannels, config: &PipelineConfig) -> Result<GrayGrid> {
    if config.parallel {
        rgb_to_luminance_parallel(&channels.r, &channels.g, &channels.b)
    } else {
        rgb_to_luminance(&channels.r, &channels.g, &channels.b)
    }
}

/// Edge map through smoothing and stretch
fn contrast_map(gray: &GrayGrid, config: &PipelineConfig) -> (FloatGrid, FloatGrid, GrayGrid) {
    let started = Instant::now();
    let edges = edge_strength(gray, config.parallel);
    let smoothed = box_average_repeated(&edges, config.smoothing_passes, config.parallel);
    let stretched = stretch_to_u8(&smoothed);
    debug!(
        "edge map: {} smoothing passes in {:?}",
        config.smoothing_passes,
        started.elapsed()
    );
    (edges, smoothed, stretched)
}

fn select_region(
    labeling: &Labeling,
    rule: BoxRule,
    telemetry: &mut LocateTelemetry,
) -> (Option<LabelGrid>, Result<BoundingBox>) {
    telemetry.components = labeling.component_count();
    let Some((label, size)) = labeling.largest() else {
        debug!("no components survived segmentation");
        return (None, Err(PipelineError::NoRegionFound));
    };
    telemetry.largest_component_pixels = size;
    trace!("largest component: label {} with {} pixels", label, size);

    let component = labeling.largest_component();
    let region = match &component {
        Some(grid) => region_box(grid, rule).and_then(|r| r.ok_or(PipelineError::NoRegionFound)),
        None => Err(PipelineError::NoRegionFound),
    };
    (component, region)
}

/// Locate the dominant high-texture region of an RGB image
///
/// # Arguments
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - R, G and B planes, each `width` x `height`
/// * `config` - Threshold and pass counts
///
/// # Returns
/// Bounding box of the largest connected component, or
/// [`PipelineError::NoRegionFound`] if segmentation left nothing
pub fn locate(
    width: usize,
    height: usize,
    channels: &RgbChannels,
    config: &PipelineConfig,
) -> Result<BoundingBox> {
    locate_with_telemetry(width, height, channels, config).0
}

/// Like [`locate`] but also returns stage-level counters
pub fn locate_with_telemetry(
    width: usize,
    height: usize,
    channels: &RgbChannels,
    config: &PipelineConfig,
) -> (Result<BoundingBox>, LocateTelemetry) {
    let mut tel = LocateTelemetry::default();
    if let Err(err) = validate(width, height, channels) {
        return (Err(err), tel);
    }
    let started = Instant::now();

    let gray = match to_greyscale(channels, config) {
        Ok(gray) => gray,
        Err(err) => return (Err(err), tel),
    };
    let (_, _, stretched) = contrast_map(&gray, config);

    // Stretched values are not needed past this point
    let binary = threshold_ge(stretched, config.threshold);
    tel.thresholded_pixels = binary.count(|v| v > 0);

    let closed = close(&binary, config.dilation_passes, config.erosion_passes, config.parallel);
    tel.closed_pixels = closed.count(|v| v > 0);

    let labeling = label_components(&closed);
    let (_, region) = select_region(&labeling, config.box_rule, &mut tel);
    tel.elapsed_micros = started.elapsed().as_micros();

    debug!(
        "locate {}x{}: thresholded={} closed={} components={} region={:?} in {}us",
        width,
        height,
        tel.thresholded_pixels,
        tel.closed_pixels,
        tel.components,
        region.as_ref().ok(),
        tel.elapsed_micros
    );

    (region, tel)
}

/// Run the pipeline and keep every intermediate grid
///
/// Fails only on precondition violations; an empty result is reported
/// through `PipelineTrace::region`.
pub fn locate_with_trace(
    width: usize,
    height: usize,
    channels: &RgbChannels,
    config: &PipelineConfig,
) -> Result<PipelineTrace> {
    validate(width, height, channels)?;
    let started = Instant::now();
    let mut telemetry = LocateTelemetry::default();

    let greyscale = to_greyscale(channels, config)?;
    let (edges, smoothed, stretched) = contrast_map(&greyscale, config);

    let mut binary = stretched.clone();
    threshold_ge_in_place(&mut binary, config.threshold);
    telemetry.thresholded_pixels = binary.count(|v| v > 0);

    let closed = close(&binary, config.dilation_passes, config.erosion_passes, config.parallel);
    telemetry.closed_pixels = closed.count(|v| v > 0);

    let labeling = label_components(&closed);
    let (component, region) = select_region(&labeling, config.box_rule, &mut telemetry);
    let scan_box = component.as_ref().and_then(raster_scan_box);
    telemetry.elapsed_micros = started.elapsed().as_micros();

    Ok(PipelineTrace {
        greyscale,
        edges,
        smoothed,
        stretched,
        binary,
        closed,
        labeling,
        component,
        region: region.ok(),
        scan_box,
        box_rule: config.box_rule,
        telemetry,
    })
}
