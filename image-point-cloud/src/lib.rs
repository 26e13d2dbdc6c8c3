//! Image to point cloud conversion: brightness filtering, coordinate
//! remapping and bounded sampling, driven through a host plugin lifecycle.

pub mod bounds;
pub mod config;
pub mod converter;
pub mod coordinates;
pub mod decoder;
pub mod error;
pub mod filter;
pub mod heartbeat;
pub mod host;
pub mod image_plugin;
pub mod pipeline;
pub mod plugin;
pub mod point;
pub mod renderer;
pub mod sampler;
pub mod summary;

pub use config::ConversionConfig;
pub use error::{ConversionError, Result};
pub use pipeline::{PipelineState, PointCloudPipeline};
pub use point::{Point, PointSet};
