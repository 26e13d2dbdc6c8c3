/// Stateful image to point cloud pipeline: load, submit once, report on a timer.
use crate::bounds::ZStatistics;
use crate::config::ConversionConfig;
use crate::converter::{Conversion, ConversionParams, ConversionStats, PointCloudConverter};
use crate::decoder::{ImageDecoder, RgbImageDecoder};
use crate::error::Result;
use crate::point::PointSet;
use crate::renderer::PointCloudRenderer;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum PipelineState {
    /// Nothing loaded yet, or torn down.
    #[default]
    Empty,
    /// A fresh point set is waiting to be handed to the renderer.
    Loaded,
    /// The current point set has been handed over.
    Submitted,
}

/// Accumulates tick time and fires once per interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusTimer {
    interval: f32,
    elapsed: f32,
}

impl StatusTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Adds `delta` seconds; returns true and restarts when the interval is reached.
    pub fn advance(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

pub struct PointCloudPipeline<D: ImageDecoder = RgbImageDecoder> {
    converter: PointCloudConverter<D>,
    rng: StdRng,
    points: PointSet,
    state: PipelineState,
    last_stats: Option<ConversionStats>,
    status_timer: StatusTimer,
}

impl PointCloudPipeline<RgbImageDecoder> {
    /// Pipeline with the default decoder and an entropy-seeded sampler.
    pub fn new(config: &ConversionConfig) -> Self {
        Self::with_decoder(RgbImageDecoder, config, StdRng::from_entropy())
    }

    /// Pipeline with a fixed sampling seed, for reproducible output.
    pub fn with_seed(config: &ConversionConfig, seed: u64) -> Self {
        Self::with_decoder(RgbImageDecoder, config, StdRng::seed_from_u64(seed))
    }
}

impl<D: ImageDecoder> PointCloudPipeline<D> {
    pub fn with_decoder(decoder: D, config: &ConversionConfig, rng: StdRng) -> Self {
        Self {
            converter: PointCloudConverter::new(decoder, ConversionParams::from(config))
                .with_progress(config.show_progress),
            rng,
            points: PointSet::new(),
            state: PipelineState::Empty,
            last_stats: None,
            status_timer: StatusTimer::new(config.status_interval_secs),
        }
    }

    /// Converts the image at `path`, replacing the current point set.
    ///
    /// On failure the previous point set and state are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<ConversionStats> {
        let result = self.converter.convert_path(path, &mut self.rng);
        self.apply(result)
    }

    /// Converts an in-memory encoded image, replacing the current point set.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<ConversionStats> {
        let result = self.converter.convert_bytes(bytes, &mut self.rng);
        self.apply(result)
    }

    fn apply(&mut self, result: Result<Conversion>) -> Result<ConversionStats> {
        let conversion = match result {
            Ok(conversion) => conversion,
            Err(err) => {
                warn!("Failed to load image: {err}");
                return Err(err);
            }
        };

        self.points = conversion.points;
        self.last_stats = Some(conversion.stats);
        self.state = PipelineState::Loaded;

        match self.z_statistics() {
            Some(stats) => info!("{stats}"),
            None => info!("No points passed the brightness filter"),
        }
        Ok(conversion.stats)
    }

    /// Hands a copy of the point set to `renderer` once per load.
    ///
    /// Does nothing unless the state is `Loaded` with at least one point.
    /// Returns whether a submission happened.
    pub fn submit(&mut self, renderer: &mut dyn PointCloudRenderer) -> bool {
        if self.state != PipelineState::Loaded || self.points.is_empty() {
            return false;
        }

        renderer.set_point_cloud_data(self.points.clone());
        self.state = PipelineState::Submitted;
        info!("Submitted {} points to renderer", self.points.len());
        true
    }

    /// Advances the status timer, returning the statistics it reported.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<ZStatistics> {
        if !self.status_timer.advance(delta_seconds) || self.state == PipelineState::Empty {
            return None;
        }

        let stats = self.z_statistics();
        match &stats {
            Some(stats) => info!("{stats}"),
            None => debug!("No points loaded"),
        }
        stats
    }

    /// Drops the point set and returns to `Empty`.
    pub fn teardown(&mut self) {
        self.points.clear();
        self.last_stats = None;
        self.state = PipelineState::Empty;
    }

    pub fn z_statistics(&self) -> Option<ZStatistics> {
        ZStatistics::from_points(self.points.points())
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn last_stats(&self) -> Option<&ConversionStats> {
        self.last_stats.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedImage;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[derive(Default)]
    struct CountingRenderer {
        received: Vec<usize>,
    }

    impl PointCloudRenderer for CountingRenderer {
        fn set_point_cloud_data(&mut self, points: PointSet) {
            self.received.push(points.len());
        }
    }

    fn png(width: u32, height: u32, value: u8) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([value; 3]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn config() -> ConversionConfig {
        ConversionConfig {
            max_points: 0,
            ..ConversionConfig::default()
        }
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut timer = StatusTimer::new(5.0);
        assert!(!timer.advance(2.0));
        assert!(!timer.advance(2.5));
        assert!(timer.advance(0.5));
        assert_eq!(timer.elapsed(), 0.0);
        assert!(!timer.advance(4.0));
    }

    #[test]
    fn load_moves_to_loaded() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        assert_eq!(pipeline.state(), PipelineState::Empty);

        let stats = pipeline.load_bytes(&png(2, 2, 255)).unwrap();
        assert_eq!(stats.final_points, 4);
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert_eq!(pipeline.points().len(), 4);
    }

    #[test]
    fn submit_happens_once_per_load() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        let mut renderer = CountingRenderer::default();
        pipeline.load_bytes(&png(2, 2, 255)).unwrap();

        assert!(pipeline.submit(&mut renderer));
        assert!(!pipeline.submit(&mut renderer));
        assert_eq!(renderer.received, vec![4]);
        assert_eq!(pipeline.state(), PipelineState::Submitted);

        pipeline.load_bytes(&png(3, 1, 255)).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert!(pipeline.submit(&mut renderer));
        assert_eq!(renderer.received, vec![4, 3]);
    }

    #[test]
    fn submit_without_points_is_ignored() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        let mut renderer = CountingRenderer::default();
        assert!(!pipeline.submit(&mut renderer));

        pipeline.load_bytes(&png(2, 2, 0)).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert!(pipeline.points().is_empty());
        assert!(!pipeline.submit(&mut renderer));
        assert!(renderer.received.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_points() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        let mut renderer = CountingRenderer::default();
        pipeline.load_bytes(&png(2, 2, 255)).unwrap();
        pipeline.submit(&mut renderer);
        let before = pipeline.points().clone();

        let err = pipeline.load_bytes(b"corrupt").unwrap_err();
        assert!(err.is_decode_failure());
        assert_eq!(pipeline.state(), PipelineState::Submitted);
        assert_eq!(pipeline.points(), &before);
    }

    #[test]
    fn tick_reports_statistics_on_interval() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        assert!(pipeline.tick(10.0).is_none());

        pipeline.load_bytes(&png(2, 2, 255)).unwrap();
        assert!(pipeline.tick(1.0).is_none());
        let stats = pipeline.tick(4.0).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min_z, stats.max_z);
        assert!(pipeline.tick(1.0).is_none());
    }

    #[test]
    fn black_image_reports_nothing() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        pipeline.load_bytes(&png(2, 2, 0)).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert!(pipeline.tick(5.0).is_none());
        assert!(pipeline.tick(5.0).is_none());
    }

    #[test]
    fn submitted_points_keep_reporting() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        let mut renderer = CountingRenderer::default();
        pipeline.load_bytes(&png(2, 2, 255)).unwrap();
        assert!(pipeline.submit(&mut renderer));
        assert_eq!(pipeline.state(), PipelineState::Submitted);

        let stats = pipeline.tick(5.0).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(pipeline.state(), PipelineState::Submitted);
    }

    /// Decoder that hands back single-channel luminance.
    struct GreyDecoder;

    impl ImageDecoder for GreyDecoder {
        fn decode_path(&self, _path: &Path) -> Result<DecodedImage> {
            self.decode_bytes(&[])
        }

        fn decode_bytes(&self, _bytes: &[u8]) -> Result<DecodedImage> {
            Ok(DecodedImage {
                width: 2,
                height: 2,
                channels: 1,
                pixels: vec![200; 4],
            })
        }
    }

    #[test]
    fn single_channel_decoder_output_is_a_failed_load() {
        let mut pipeline =
            PointCloudPipeline::with_decoder(GreyDecoder, &config(), StdRng::seed_from_u64(1));

        let err = pipeline.load_bytes(b"x").unwrap_err();
        assert!(err.is_decode_failure());
        assert_eq!(pipeline.state(), PipelineState::Empty);
        assert!(pipeline.points().is_empty());

        let err = pipeline.load(Path::new("grey.png")).unwrap_err();
        assert!(err.is_decode_failure());
        assert_eq!(pipeline.state(), PipelineState::Empty);
    }

    #[test]
    fn teardown_clears_points() {
        let mut pipeline = PointCloudPipeline::with_seed(&config(), 1);
        pipeline.load_bytes(&png(2, 2, 255)).unwrap();
        pipeline.teardown();
        assert_eq!(pipeline.state(), PipelineState::Empty);
        assert!(pipeline.points().is_empty());
        assert!(pipeline.last_stats().is_none());
    }
}
