use std::path::PathBuf;

/// Errors from loading, packing and writing framebuffer data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pixel format: {0}")]
    InvalidFormatConfiguration(String),

    #[error("invalid bit row width {0}, must be at least 1")]
    InvalidRowWidth(usize),

    #[error("invalid image size {width}x{height} for {pixels} pixels")]
    InvalidImageSize { width: u32, height: u32, pixels: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
