use crate::models::GrayGrid;

/// Foreground value written by thresholding
pub const FOREGROUND: u8 = 255;

/// Threshold in place: cells `>= threshold` become 255, the rest 0
///
/// Overwrites `gray`; callers that still need the stretched values must
/// threshold a clone.
pub fn threshold_ge_in_place(gray: &mut GrayGrid, threshold: u8) {
    for v in gray.as_mut_slice() {
        *v = if *v >= threshold { FOREGROUND } else { 0 };
    }
}

/// Consuming variant of [`threshold_ge_in_place`], reusing the buffer
pub fn threshold_ge(mut gray: GrayGrid, threshold: u8) -> GrayGrid {
    threshold_ge_in_place(&mut gray, threshold);
    gray
}
