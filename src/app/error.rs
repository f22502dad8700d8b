use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("no feed yielded any entries")]
    NoContent,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BinderyError>;
