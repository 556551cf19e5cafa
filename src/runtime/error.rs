use crate::api::ApiError;
use crate::config::ConfigError;
use crate::gallery::GalleryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("gallery API error: {0}")]
    Api(#[from] ApiError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("gallery state error: {0}")]
    Gallery(#[from] GalleryError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
