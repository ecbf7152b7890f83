//! Pipeline tuning parameters
//!
//! Defaults reproduce the reference pipeline; each field can be overridden
//! through a `QR_LOCATE_*` environment variable.

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn parse_env_box_rule(name: &str, default: BoxRule) -> BoxRule {
    std::env::var(name)
        .ok()
        .and_then(|v| BoxRule::from_name(v.trim()))
        .unwrap_or(default)
}

/// How the selected component is reduced to a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoxRule {
    /// Smallest rectangle holding every non-zero cell
    #[default]
    Minimal,
    /// Corners from the first and last non-zero cell in row-major order
    ///
    /// Matches the reference scanner; the width is negative when the last
    /// hit lies left of the first one.
    RasterScan,
}

impl BoxRule {
    /// Parse `minimal` or `scan` (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "minimal" | "min" => Some(Self::Minimal),
            "scan" | "raster" | "raster-scan" => Some(Self::RasterScan),
            _ => None,
        }
    }
}

/// Stretched edge strength at or above which a pixel is foreground
pub const DEFAULT_THRESHOLD: u8 = 70;
/// Box-average passes applied to the edge map
pub const DEFAULT_SMOOTHING_PASSES: usize = 6;
/// Dilation passes before erosion
pub const DEFAULT_DILATION_PASSES: usize = 4;
/// Erosion passes after dilation
pub const DEFAULT_EROSION_PASSES: usize = 4;

/// Parameters for [`crate::pipeline::locate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Segmentation threshold on the 0..=255 stretched edge map
    pub threshold: u8,
    /// Number of 3x3 box-average passes
    pub smoothing_passes: usize,
    /// Number of 3x3 dilation passes
    pub dilation_passes: usize,
    /// Number of 3x3 erosion passes
    pub erosion_passes: usize,
    /// Process rows in parallel with rayon (identical results)
    pub parallel: bool,
    /// Rectangle rule for the final stage
    pub box_rule: BoxRule,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            smoothing_passes: DEFAULT_SMOOTHING_PASSES,
            dilation_passes: DEFAULT_DILATION_PASSES,
            erosion_passes: DEFAULT_EROSION_PASSES,
            parallel: false,
            box_rule: BoxRule::Minimal,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `QR_LOCATE_THRESHOLD`, `QR_LOCATE_SMOOTHING`,
    /// `QR_LOCATE_DILATIONS`, `QR_LOCATE_EROSIONS`, `QR_LOCATE_PARALLEL` and
    /// `QR_LOCATE_BOX_RULE` (`minimal` or `scan`)
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            threshold: parse_env_u8("QR_LOCATE_THRESHOLD", d.threshold),
            smoothing_passes: parse_env_usize("QR_LOCATE_SMOOTHING", d.smoothing_passes),
            dilation_passes: parse_env_usize("QR_LOCATE_DILATIONS", d.dilation_passes),
            erosion_passes: parse_env_usize("QR_LOCATE_EROSIONS", d.erosion_passes),
            parallel: parse_env_bool_u8("QR_LOCATE_PARALLEL", d.parallel),
            box_rule: parse_env_box_rule("QR_LOCATE_BOX_RULE", d.box_rule),
        }
    }

    /// Set the segmentation threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of smoothing passes
    pub fn with_smoothing_passes(mut self, passes: usize) -> Self {
        self.smoothing_passes = passes;
        self
    }

    /// Set dilation and erosion pass counts
    pub fn with_morphology_passes(mut self, dilations: usize, erosions: usize) -> Self {
        self.dilation_passes = dilations;
        self.erosion_passes = erosions;
        self
    }

    /// Enable or disable row-parallel processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Select the rectangle rule
    pub fn with_box_rule(mut self, rule: BoxRule) -> Self {
        self.box_rule = rule;
        self
    }
}
