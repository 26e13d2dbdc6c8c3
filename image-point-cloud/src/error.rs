/// Error types for image to point cloud conversion.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to decode image bytes: {0}")]
    DecodeBytes(#[source] image::ImageError),

    #[error("decoder returned an unusable pixel buffer: {0}")]
    InvalidPixelBuffer(String),

    #[error("IO error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to serialise summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl ConversionError {
    /// True when the failure came from the image codec or the source file.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            ConversionError::Decode { .. }
                | ConversionError::DecodeBytes(_)
                | ConversionError::InvalidPixelBuffer(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
