/// Conversion configuration loaded from JSON and command line overrides
use crate::error::{ConversionError, Result};
use crate::sampler::point_limit;
use constants::conversion::{
    DEFAULT_BRIGHTNESS_THRESHOLD, DEFAULT_IMAGE_PATH, DEFAULT_MAX_POINTS, DEFAULT_Z_SCALE,
};
use constants::render_settings::{DEFAULT_POINT_SIZE, STATUS_INTERVAL_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Image loaded when the plugin initialises.
    pub image_path: PathBuf,
    /// Upper bound on output points; zero or negative disables sampling.
    pub max_points: i64,
    /// Normalised brightness a pixel must strictly exceed.
    pub brightness_threshold: f32,
    /// Multiplier applied to brightness before it becomes z.
    pub z_scale: f32,
    /// Render hint copied onto every point.
    pub point_size: f32,
    /// Seconds of tick time between status reports.
    pub status_interval_secs: f32,
    pub show_progress: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            max_points: DEFAULT_MAX_POINTS,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            z_scale: DEFAULT_Z_SCALE,
            point_size: DEFAULT_POINT_SIZE,
            status_interval_secs: STATUS_INTERVAL_SECS,
            show_progress: false,
        }
    }
}

impl ConversionConfig {
    /// Reads a JSON config file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConversionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| ConversionError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would produce NaN positions or a stalled timer.
    pub fn validate(&self) -> Result<()> {
        require_finite("brightness_threshold", self.brightness_threshold)?;
        require_finite("z_scale", self.z_scale)?;
        require_finite("point_size", self.point_size)?;

        if !(self.status_interval_secs.is_finite() && self.status_interval_secs > 0.0) {
            return Err(ConversionError::InvalidValue {
                field: "status_interval_secs",
                reason: format!("must be positive, got {}", self.status_interval_secs),
            });
        }
        Ok(())
    }

    pub fn point_limit(&self) -> Option<usize> {
        point_limit(self.max_points)
    }
}

fn require_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConversionError::InvalidValue {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}
