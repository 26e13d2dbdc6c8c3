/// Width of the scene space an image is normalised into.
/// Pixels map onto [-SPAN / 2, +SPAN / 2] along both x and y.
pub const NORMALIZED_SPAN: f32 = 10.0;

/// Offset applied after scaling so the image is centred on the origin
pub const NORMALIZED_OFFSET: f32 = -NORMALIZED_SPAN / 2.0;

/// Restores the 0-255 dynamic range when brightness becomes height
pub const Z_RANGE_FACTOR: f32 = 255.0;
