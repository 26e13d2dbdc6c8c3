/// Brightness filter selecting which pixels become points
use crate::decoder::DecodedImage;
use constants::conversion::CHANNEL_MAX;
use indicatif::ProgressBar;
use rayon::prelude::*;

/// A pixel that passed the brightness filter, with its channels normalised to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightPixel {
    pub x: u32,
    pub y: u32,
    pub brightness: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Mean of the normalised channels.
pub fn brightness(r: f32, g: f32, b: f32) -> f32 {
    (r + g + b) / 3.0
}

/// Retains pixels whose brightness is strictly above `threshold`, in row-major order.
pub fn filter_bright_pixels(image: &DecodedImage, threshold: f32) -> Vec<BrightPixel> {
    filter_bright_pixels_with_progress(image, threshold, &ProgressBar::hidden())
}

/// Same as [`filter_bright_pixels`], advancing `pb` by one per scanned row.
pub fn filter_bright_pixels_with_progress(
    image: &DecodedImage,
    threshold: f32,
    pb: &ProgressBar,
) -> Vec<BrightPixel> {
    let row_stride = image.width as usize * image.channels as usize;
    if row_stride == 0 || image.height == 0 {
        return Vec::new();
    }

    // Rows are scanned in parallel; collecting per-row vectors keeps scan order.
    let rows: Vec<Vec<BrightPixel>> = image
        .pixels
        .par_chunks(row_stride)
        .take(image.height as usize)
        .enumerate()
        .map(|(y, row)| {
            let hits = scan_row(row, y as u32, image.channels as usize, threshold);
            pb.inc(1);
            hits
        })
        .collect();

    rows.concat()
}

fn scan_row(row: &[u8], y: u32, channels: usize, threshold: f32) -> Vec<BrightPixel> {
    row.chunks_exact(channels)
        .enumerate()
        .filter_map(|(x, px)| {
            let r = px[0] as f32 / CHANNEL_MAX;
            let g = px[1] as f32 / CHANNEL_MAX;
            let b = px[2] as f32 / CHANNEL_MAX;
            let brightness = brightness(r, g, b);

            (brightness > threshold).then_some(BrightPixel {
                x: x as u32,
                y,
                brightness,
                r,
                g,
                b,
            })
        })
        .collect()
}
