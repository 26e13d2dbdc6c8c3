/// Image to point cloud converter running decode, filter, map and sample.
use crate::config::ConversionConfig;
use crate::coordinates::CoordinateMapper;
use crate::decoder::{DecodedImage, ImageDecoder};
use crate::error::Result;
use crate::filter::{BrightPixel, filter_bright_pixels_with_progress};
use crate::point::PointSet;
use crate::sampler::sample_bounded;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters fixed for the duration of one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionParams {
    pub brightness_threshold: f32,
    pub z_scale: f32,
    pub point_size: f32,
    /// `None` keeps every filtered point.
    pub point_limit: Option<usize>,
}

impl From<&ConversionConfig> for ConversionParams {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            brightness_threshold: config.brightness_threshold,
            z_scale: config.z_scale,
            point_size: config.point_size,
            point_limit: config.point_limit(),
        }
    }
}

/// Counts gathered while converting one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub image_width: u32,
    pub image_height: u32,
    pub total_pixels: usize,
    pub filtered_points: usize,
    pub final_points: usize,
}

impl ConversionStats {
    pub fn was_sampled(&self) -> bool {
        self.final_points < self.filtered_points
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub points: PointSet,
    pub stats: ConversionStats,
}

pub struct PointCloudConverter<D: ImageDecoder> {
    decoder: D,
    params: ConversionParams,
    show_progress: bool,
}

impl<D: ImageDecoder> PointCloudConverter<D> {
    pub fn new(decoder: D, params: ConversionParams) -> Self {
        Self {
            decoder,
            params,
            show_progress: false,
        }
    }

    /// Display a progress bar while scanning rows.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Decode the image at `path` and convert it.
    pub fn convert_path<R: Rng + ?Sized>(&self, path: &Path, rng: &mut R) -> Result<Conversion> {
        info!("Loading image: {}", path.display());
        let (pixels, width, height) = self.filter_scoped(self.decoder.decode_path(path)?)?;
        Ok(self.finish(pixels, width, height, rng))
    }

    /// Decode an in-memory encoded image and convert it.
    pub fn convert_bytes<R: Rng + ?Sized>(&self, bytes: &[u8], rng: &mut R) -> Result<Conversion> {
        let (pixels, width, height) = self.filter_scoped(self.decoder.decode_bytes(bytes)?)?;
        Ok(self.finish(pixels, width, height, rng))
    }

    /// Convert an already decoded buffer.
    pub fn convert_decoded<R: Rng + ?Sized>(
        &self,
        image: DecodedImage,
        rng: &mut R,
    ) -> Result<Conversion> {
        let (pixels, width, height) = self.filter_scoped(image)?;
        Ok(self.finish(pixels, width, height, rng))
    }

    /// Runs the brightness filter. The pixel buffer is consumed and dropped here.
    fn filter_scoped(&self, image: DecodedImage) -> Result<(Vec<BrightPixel>, u32, u32)> {
        image.validate()?;
        info!(
            "Image loaded: {}x{} ({} pixels)",
            image.width,
            image.height,
            image.total_pixels()
        );

        let pb = self.progress_bar(image.height as u64);
        let pixels =
            filter_bright_pixels_with_progress(&image, self.params.brightness_threshold, &pb);
        pb.finish_with_message("Pixels filtered");

        info!("Points after brightness filter: {}", pixels.len());
        Ok((pixels, image.width, image.height))
    }

    fn finish<R: Rng + ?Sized>(
        &self,
        pixels: Vec<BrightPixel>,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Conversion {
        let mapper = CoordinateMapper::new(width, height, self.params.z_scale, self.params.point_size);
        let mapped = mapper.map_all(&pixels);
        let filtered_points = mapped.len();

        let sampled = sample_bounded(mapped, self.params.point_limit, rng);
        let stats = ConversionStats {
            image_width: width,
            image_height: height,
            total_pixels: width as usize * height as usize,
            filtered_points,
            final_points: sampled.len(),
        };

        if stats.was_sampled() {
            info!(
                "Sampled {} of {} points ({:.1}%)",
                stats.final_points,
                stats.filtered_points,
                stats.final_points as f64 / stats.filtered_points as f64 * 100.0
            );
        }
        info!("Final points: {}", stats.final_points);

        Conversion {
            points: PointSet::from(sampled),
            stats,
        }
    }

    fn progress_bar(&self, rows: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(rows);
        // Template is a literal; fall back to the default style rather than fail the load.
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg}")
            .map(|s| s.progress_chars("▉▊▋▌▍▎▏ "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Filtering pixels");
        pb
    }
}
