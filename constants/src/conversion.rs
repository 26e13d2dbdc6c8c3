/// Default upper bound on points kept from one image
pub const DEFAULT_MAX_POINTS: i64 = 10_000;

/// Normalised brightness a pixel must exceed to become a point
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 0.1;

/// Multiplier applied to brightness before it becomes the z coordinate
pub const DEFAULT_Z_SCALE: f32 = 0.05;

/// Image loaded on initialisation when no other path is configured
pub const DEFAULT_IMAGE_PATH: &str = "./test_image.jpg";

/// Channels requested from the decoder (RGB)
pub const RGB_CHANNELS: u8 = 3;

/// Largest value of an 8-bit channel sample
pub const CHANNEL_MAX: f32 = 255.0;
