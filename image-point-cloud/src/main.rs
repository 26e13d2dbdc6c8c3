/// Image to point cloud converter main entry point
use clap::Parser;
use image_point_cloud::config::ConversionConfig;
use image_point_cloud::heartbeat::HeartbeatPlugin;
use image_point_cloud::host::PluginHost;
use image_point_cloud::image_plugin::ImagePointCloudPlugin;
use image_point_cloud::pipeline::PointCloudPipeline;
use image_point_cloud::renderer::LoggingRenderer;
use log::info;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "image-point-cloud")]
#[command(version, about = "Convert image brightness into a 3D point cloud", long_about = None)]
struct Cli {
    /// Image to convert (defaults to the configured image path)
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum points to keep (0 or negative keeps all)
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    max_points: Option<i64>,

    /// Brightness a pixel must exceed, in [0, 1]
    #[arg(short, long, value_name = "T")]
    threshold: Option<f32>,

    /// Multiplier applied to brightness for z
    #[arg(short, long, value_name = "SCALE")]
    z_scale: Option<f32>,

    /// Render size hint for every point
    #[arg(long, value_name = "SIZE")]
    point_size: Option<f32>,

    /// Fixed seed for sampling, for reproducible output
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Number of host ticks to simulate
    #[arg(long, value_name = "N", default_value = "20")]
    frames: u32,

    /// Seconds per simulated tick
    #[arg(long, value_name = "SECS", default_value = "0.5")]
    frame_seconds: f32,

    /// Write a JSON conversion summary to this path
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Show a progress bar while filtering
    #[arg(long)]
    progress: bool,
}

impl Cli {
    fn into_config(self) -> Result<(ConversionConfig, RunOptions), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ConversionConfig::from_json_file(path)?,
            None => ConversionConfig::default(),
        };

        if let Some(image) = self.image {
            config.image_path = image;
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }
        if let Some(threshold) = self.threshold {
            config.brightness_threshold = threshold;
        }
        if let Some(z_scale) = self.z_scale {
            config.z_scale = z_scale;
        }
        if let Some(point_size) = self.point_size {
            config.point_size = point_size;
        }
        config.show_progress |= self.progress;
        config.validate()?;

        Ok((
            config,
            RunOptions {
                seed: self.seed,
                frames: self.frames,
                frame_seconds: self.frame_seconds,
                summary: self.summary,
            },
        ))
    }
}

struct RunOptions {
    seed: Option<u64>,
    frames: u32,
    frame_seconds: f32,
    summary: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, options) = Cli::parse().into_config()?;

    let pipeline = match options.seed {
        Some(seed) => PointCloudPipeline::with_seed(&config, seed),
        None => PointCloudPipeline::new(&config),
    };
    let mut image_plugin = ImagePointCloudPlugin::with_pipeline(config, pipeline);
    if let Some(summary) = options.summary {
        image_plugin = image_plugin.with_summary_path(summary);
    }

    let renderer = Rc::new(RefCell::new(LoggingRenderer::new()));
    let mut host = PluginHost::new(renderer.clone());
    host.add_plugin(Box::new(image_plugin))
        .add_plugin(Box::new(HeartbeatPlugin::new()));

    host.initialize()?;
    info!("Running plugins: {}", host.plugin_names().join(", "));

    for _ in 0..options.frames {
        host.tick(options.frame_seconds);
    }
    host.teardown();

    let renderer = renderer.borrow();
    info!(
        "Renderer received {} submission(s), last with {} points",
        renderer.submissions(),
        renderer.last_point_count()
    );
    Ok(())
}
