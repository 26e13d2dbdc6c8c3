/// Render hint applied to every generated point
pub const DEFAULT_POINT_SIZE: f32 = 5.0;

/// Seconds between point cloud status reports
pub const STATUS_INTERVAL_SECS: f32 = 5.0;

/// Seconds between heartbeat plugin messages
pub const HEARTBEAT_INTERVAL_SECS: f32 = 2.0;

/// Version reported by the bundled plugins
pub const PLUGIN_VERSION: &str = "1.0.0";
