use crate::filter::BrightPixel;
use crate::point::Point;
use constants::coordinate_system::{NORMALIZED_OFFSET, NORMALIZED_SPAN, Z_RANGE_FACTOR};
use rayon::prelude::*;

/// Per-image mapping from pixel space into the normalised scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale_x: f32,
    scale_y: f32,
    height: f32,
    z_scale: f32,
    point_size: f32,
}

impl CoordinateMapper {
    pub fn new(width: u32, height: u32, z_scale: f32, point_size: f32) -> Self {
        Self {
            scale_x: NORMALIZED_SPAN / width.max(1) as f32,
            scale_y: NORMALIZED_SPAN / height.max(1) as f32,
            height: height as f32,
            z_scale,
            point_size,
        }
    }

    /// Map one retained pixel. The row is flipped so the image top lands at scene top.
    pub fn map_pixel(&self, pixel: &BrightPixel) -> Point {
        Point {
            x: pixel.x as f32 * self.scale_x + NORMALIZED_OFFSET,
            y: (self.height - pixel.y as f32) * self.scale_y + NORMALIZED_OFFSET,
            z: pixel.brightness * self.z_scale * Z_RANGE_FACTOR,
            r: pixel.r,
            g: pixel.g,
            b: pixel.b,
            size: self.point_size,
        }
    }

    /// Map every pixel, preserving input order.
    pub fn map_all(&self, pixels: &[BrightPixel]) -> Vec<Point> {
        pixels.par_iter().map(|p| self.map_pixel(p)).collect()
    }
}
