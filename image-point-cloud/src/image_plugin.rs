/// Plugin turning a configured image into a point cloud for the host renderer.
use crate::config::ConversionConfig;
use crate::converter::ConversionStats;
use crate::error::Result;
use crate::pipeline::{PipelineState, PointCloudPipeline};
use crate::plugin::{Plugin, PluginContext};
use crate::summary::ConversionSummary;
use constants::render_settings::PLUGIN_VERSION;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub struct ImagePointCloudPlugin {
    config: ConversionConfig,
    pipeline: PointCloudPipeline,
    context: Option<PluginContext>,
    summary_path: Option<PathBuf>,
}

impl ImagePointCloudPlugin {
    pub fn new(config: ConversionConfig) -> Self {
        let pipeline = PointCloudPipeline::new(&config);
        Self::with_pipeline(config, pipeline)
    }

    /// Use a prepared pipeline, e.g. one with a fixed sampling seed.
    pub fn with_pipeline(config: ConversionConfig, pipeline: PointCloudPipeline) -> Self {
        Self {
            config,
            pipeline,
            context: None,
            summary_path: None,
        }
    }

    /// Write a JSON summary to `path` after every successful load.
    pub fn with_summary_path(mut self, path: PathBuf) -> Self {
        self.summary_path = Some(path);
        self
    }

    /// Loads a new image. The next tick submits it to the renderer.
    pub fn load(&mut self, path: &Path) -> Result<ConversionStats> {
        let stats = self.pipeline.load(path)?;
        if let Some(summary_path) = &self.summary_path {
            let summary =
                ConversionSummary::new(path, &self.config, stats, self.pipeline.points());
            if let Err(err) = summary.write(summary_path) {
                warn!("Failed to write summary: {err}");
            }
        }
        Ok(stats)
    }

    pub fn pipeline(&self) -> &PointCloudPipeline {
        &self.pipeline
    }

    fn submit_points(&mut self) {
        let Some(context) = &self.context else {
            return;
        };
        let mut renderer = context.renderer().borrow_mut();
        self.pipeline.submit(&mut *renderer);
    }
}

impl Plugin for ImagePointCloudPlugin {
    fn initialize(&mut self, context: PluginContext) -> Result<()> {
        self.context = Some(context);
        info!(
            "{} initialized: converting image brightness into 3D points",
            self.name()
        );

        let image_path = self.config.image_path.clone();
        if image_path.is_file() {
            match self.load(&image_path) {
                Ok(stats) => info!(
                    "Loaded default image {} ({} points)",
                    image_path.display(),
                    stats.final_points
                ),
                Err(err) => warn!(
                    "{} starting without points, default image {} unusable: {err}",
                    self.name(),
                    image_path.display()
                ),
            }
        } else {
            info!("No default image found at: {}", image_path.display());
            info!(
                "Place an image at {} or pass one on the command line.",
                image_path.display()
            );
        }
        Ok(())
    }

    fn tick(&mut self, delta_seconds: f32) {
        if self.pipeline.state() == PipelineState::Loaded {
            self.submit_points();
        }
        self.pipeline.tick(delta_seconds);
    }

    fn teardown(&mut self) {
        self.pipeline.teardown();
        self.context = None;
        info!("{} cleaned up", self.name());
    }

    fn name(&self) -> &str {
        "ImagePointCloudPlugin"
    }

    fn version(&self) -> &str {
        PLUGIN_VERSION
    }
}
