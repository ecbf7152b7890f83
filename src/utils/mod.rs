//! Per-pixel image processing stages
//!
//! This module provides the grid-to-grid transforms of the locating pipeline:
//! - Grayscale conversion (RGB planes to luminance)
//! - Edge strength (Sobel-style absolute responses)
//! - Smoothing and contrast normalization
//! - Binarization (fixed threshold)
//! - Morphology (3x3 dilation and erosion)

pub mod binarization;
pub mod edges;
pub mod grayscale;
pub mod morphology;
pub mod normalization;
pub mod smoothing;
