//! Region detection modules
//!
//! This module turns a cleaned binary mask into the final region:
//! - Connected component labeling (4-connectivity, breadth-first growth)
//! - Largest component selection
//! - Bounding box extraction

/// Component labeling and largest-component selection
pub mod connected_components;
/// Bounding rectangle of the selected component
pub mod region;
