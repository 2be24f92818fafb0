use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoupeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unrecognized direction: {0}")]
    InvalidDirection(String),

    #[error("Viewport has no display size yet")]
    Uninitialized,

    #[error("No {0} image selected")]
    NoImage(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoupeError>;
