use crate::error::Result;
use crate::models::GrayGrid;
use crate::utils::grayscale::interleaved_to_channels;

/// Decoded colour image as three equally sized planes
#[derive(Debug, Clone, PartialEq)]
pub struct RgbChannels {
    /// Red plane
    pub r: GrayGrid,
    /// Green plane
    pub g: GrayGrid,
    /// Blue plane
    pub b: GrayGrid,
}

impl RgbChannels {
    /// Bundle three planes, rejecting mismatched shapes
    pub fn new(r: GrayGrid, g: GrayGrid, b: GrayGrid) -> Result<Self> {
        r.ensure_same_size(&g)?;
        r.ensure_same_size(&b)?;
        Ok(Self { r, g, b })
    }

    /// Split packed RGB bytes (3 per pixel)
    pub fn from_interleaved(rgb: &[u8], width: usize, height: usize) -> Result<Self> {
        let (r, g, b) = interleaved_to_channels(rgb, width, height)?;
        Ok(Self { r, g, b })
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.r.width()
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.r.height()
    }

    /// Pack back into RGB bytes
    pub fn to_interleaved(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.r.as_slice().len() * 3);
        for ((&r, &g), &b) in self
            .r
            .as_slice()
            .iter()
            .zip(self.g.as_slice())
            .zip(self.b.as_slice())
        {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}
