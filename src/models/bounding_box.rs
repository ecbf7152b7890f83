/// Axis-aligned rectangle around the located region
///
/// `width` and `height` are inclusive-edge differences: a single pixel has
/// width 0, a 10-pixel-wide square has width 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Leftmost foreground column
    pub left: usize,
    /// Topmost foreground row
    pub top: usize,
    /// `right - left`
    pub width: usize,
    /// `bottom - top`
    pub height: usize,
}

impl BoundingBox {
    /// Raw tuple handed to collaborators when no region exists
    pub const SENTINEL_TUPLE: (i64, i64, i64, i64) = (-1, -1, -1, -1);

    /// Build from inclusive corner coordinates
    pub fn from_corners(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        debug_assert!(right >= left && bottom >= top);
        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Box from a signed `(left, top, width, height)` tuple, `None` if any part is negative
    pub fn from_signed((left, top, width, height): (i64, i64, i64, i64)) -> Option<Self> {
        Some(Self {
            left: usize::try_from(left).ok()?,
            top: usize::try_from(top).ok()?,
            width: usize::try_from(width).ok()?,
            height: usize::try_from(height).ok()?,
        })
    }

    /// Rightmost foreground column
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Bottom foreground row
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// True if (x, y) lies on or inside the rectangle
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.left..=self.right()).contains(&x) && (self.top..=self.bottom()).contains(&y)
    }

    /// Number of pixels covered, counting both edges
    pub fn pixel_area(&self) -> usize {
        (self.width + 1) * (self.height + 1)
    }

    /// (left, top, width, height) as signed integers
    pub fn to_tuple(&self) -> (i64, i64, i64, i64) {
        (
            self.left as i64,
            self.top as i64,
            self.width as i64,
            self.height as i64,
        )
    }

    /// Tuple form of an optional box, using [`Self::SENTINEL_TUPLE`] for `None`
    pub fn to_tuple_or_sentinel(region: Option<&BoundingBox>) -> (i64, i64, i64, i64) {
        region.map_or(Self::SENTINEL_TUPLE, BoundingBox::to_tuple)
    }
}
