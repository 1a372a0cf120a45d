use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid page dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "Rectangle '{id}' ({width}x{height} incl. spacing) does not fit into a {max_width}x{max_height} page"
    )]
    RectangleTooLarge {
        id: String,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("Rectangle '{0}' has zero width or height")]
    EmptyRectangle(String),
    #[error("Duplicate identifier '{0}'")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
