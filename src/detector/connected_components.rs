//! Connected component labeling for locating the dominant region
//! Grows 4-connected foreground regions breadth-first in raster order

use crate::models::{GrayGrid, Grid, LabelGrid};
use std::collections::{BTreeMap, VecDeque};

/// Label grid plus per-label pixel counts
#[derive(Debug, Clone)]
pub struct Labeling {
    /// 0 for background, 1.. for components in first-seen raster order
    pub labels: LabelGrid,
    /// Pixel count per label id
    pub sizes: BTreeMap<u32, usize>,
}

impl Labeling {
    /// Number of components found
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Label with the most pixels; ties go to the lowest label id
    pub fn largest(&self) -> Option<(u32, usize)> {
        let mut best: Option<(u32, usize)> = None;
        for (&label, &size) in &self.sizes {
            match best {
                Some((_, best_size)) if size <= best_size => {}
                _ => best = Some((label, size)),
            }
        }
        best
    }

    /// Grid keeping only the largest component, or `None` if there is none
    pub fn largest_component(&self) -> Option<LabelGrid> {
        self.largest()
            .map(|(label, _)| keep_label(&self.labels, label))
    }
}

/// Flood one component starting at `seed`, returning its pixel count
fn grow_region(
    binary: &GrayGrid,
    visited: &mut Grid<bool>,
    labels: &mut LabelGrid,
    seed: (usize, usize),
    label: u32,
) -> usize {
    let (width, height) = binary.dimensions();
    let mut queue = VecDeque::new();
    let mut size = 0;

    // Marked on enqueue so no pixel is queued twice
    visited.set(seed.0, seed.1, true);
    queue.push_back(seed);

    while let Some((x, y)) = queue.pop_front() {
        labels.set(x, y, label);
        size += 1;

        let mut visit = |nx: usize, ny: usize| {
            if binary.get(nx, ny) > 0 && !visited.get(nx, ny) {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    size
}

/// Label every 4-connected foreground region of `binary`
pub fn label_components(binary: &GrayGrid) -> Labeling {
    let (width, height) = binary.dimensions();
    let mut labels: LabelGrid = Grid::new(width, height);
    let mut visited: Grid<bool> = Grid::new(width, height);
    let mut sizes = BTreeMap::new();
    let mut next_label = 1u32;

    for y in 0..height {
        for x in 0..width {
            if binary.get(x, y) == 0 || visited.get(x, y) {
                continue;
            }
            let size = grow_region(binary, &mut visited, &mut labels, (x, y), next_label);
            sizes.insert(next_label, size);
            next_label += 1;
        }
    }

    Labeling { labels, sizes }
}

/// Zero every cell whose label differs from `label`
pub fn keep_label(labels: &LabelGrid, label: u32) -> LabelGrid {
    labels.map(|v| if v == label { v } else { 0 })
}

/// Label `binary` and keep only its largest component
pub fn largest_component(binary: &GrayGrid) -> Option<LabelGrid> {
    label_components(binary).largest_component()
}
