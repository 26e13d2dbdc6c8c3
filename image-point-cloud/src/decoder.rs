use crate::error::{ConversionError, Result};
use constants::conversion::RGB_CHANNELS;
use std::path::Path;

/// Pixels produced by a decoder, row-major with `channels` samples per pixel.
/// The first three samples of each pixel are read as RGB.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps an RGB buffer, returning `None` when its length does not match the dimensions.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * RGB_CHANNELS as usize;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            channels: RGB_CHANNELS,
            pixels,
        })
    }

    /// Checks the buffer holds at least RGB samples for every pixel.
    pub fn validate(&self) -> Result<()> {
        if self.channels < RGB_CHANNELS {
            return Err(ConversionError::InvalidPixelBuffer(format!(
                "expected at least {RGB_CHANNELS} channels, got {}",
                self.channels
            )));
        }

        let expected = self.total_pixels() * self.channels as usize;
        if self.pixels.len() != expected {
            return Err(ConversionError::InvalidPixelBuffer(format!(
                "{}x{}x{} image needs {expected} samples, got {}",
                self.width,
                self.height,
                self.channels,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB samples of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

/// Turns encoded image data into an RGB pixel buffer.
pub trait ImageDecoder {
    fn decode_path(&self, path: &Path) -> Result<DecodedImage>;

    fn decode_bytes(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

/// Decoder backed by the `image` crate. Every format it supports is
/// converted to 8-bit RGB, dropping alpha.
#[derive(Debug, Default, Clone, Copy)]
pub struct RgbImageDecoder;

impl ImageDecoder for RgbImageDecoder {
    fn decode_path(&self, path: &Path) -> Result<DecodedImage> {
        let image = image::open(path).map_err(|source| ConversionError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(into_decoded(image))
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let image = image::load_from_memory(bytes).map_err(ConversionError::DecodeBytes)?;
        Ok(into_decoded(image))
    }
}

fn into_decoded(image: image::DynamicImage) -> DecodedImage {
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    DecodedImage {
        width,
        height,
        channels: RGB_CHANNELS,
        pixels: rgb.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn decodes_png_bytes_to_rgb() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageOutputFormat::Png).unwrap();

        let decoded = RgbImageDecoder.decode_bytes(bytes.get_ref()).unwrap();
        assert_eq!((decoded.width, decoded.height, decoded.channels), (3, 2, 3));
        assert_eq!(decoded.pixels.len(), 18);
        assert_eq!(decoded.pixel(2, 1), [10, 20, 30]);
    }

    #[test]
    fn missing_file_is_decode_failure() {
        let err = RgbImageDecoder
            .decode_path(Path::new("/definitely/not/here.png"))
            .unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn garbage_bytes_are_decode_failure() {
        let err = RgbImageDecoder.decode_bytes(b"not an image").unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn validate_rejects_short_channels_and_lengths() {
        let grey = DecodedImage {
            width: 2,
            height: 2,
            channels: 1,
            pixels: vec![200; 4],
        };
        assert!(grey.validate().unwrap_err().is_decode_failure());

        let truncated = DecodedImage {
            width: 2,
            height: 2,
            channels: 3,
            pixels: vec![200; 10],
        };
        assert!(truncated.validate().unwrap_err().is_decode_failure());

        let rgba = DecodedImage {
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![1, 2, 3, 255],
        };
        assert!(rgba.validate().is_ok());
        assert!(DecodedImage::from_rgb(2, 1, vec![0; 6]).unwrap().validate().is_ok());
    }

    #[test]
    fn from_rgb_checks_buffer_length() {
        assert!(DecodedImage::from_rgb(2, 2, vec![0; 12]).is_some());
        assert!(DecodedImage::from_rgb(2, 2, vec![0; 11]).is_none());
    }
}
