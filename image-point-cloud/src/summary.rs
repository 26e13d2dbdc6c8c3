/// Conversion summary written alongside a run for inspection.
/// Records metadata only; the points themselves are never written out.
use crate::bounds::{PointCloudBounds, ZStatistics};
use crate::config::ConversionConfig;
use crate::converter::ConversionStats;
use crate::error::{ConversionError, Result};
use crate::point::PointSet;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub source: PathBuf,
    pub stats: ConversionStats,
    pub parameters: SummaryParameters,
    pub bounds: Option<PointCloudBounds>,
    pub z_statistics: Option<ZStatistics>,
}

/// Parameters the points were generated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryParameters {
    pub max_points: i64,
    pub brightness_threshold: f32,
    pub z_scale: f32,
    pub point_size: f32,
}

impl ConversionSummary {
    pub fn new(
        source: &Path,
        config: &ConversionConfig,
        stats: ConversionStats,
        points: &PointSet,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            stats,
            parameters: SummaryParameters {
                max_points: config.max_points,
                brightness_threshold: config.brightness_threshold,
                z_scale: config.z_scale,
                point_size: config.point_size,
            },
            bounds: PointCloudBounds::from_points(points.points()),
            z_statistics: ZStatistics::from_points(points.points()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|source| ConversionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved {}", path.display());
        Ok(())
    }
}
