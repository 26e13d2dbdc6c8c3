/// Shared defaults for image to point cloud conversion
pub mod conversion;
pub mod coordinate_system;
pub mod render_settings;
