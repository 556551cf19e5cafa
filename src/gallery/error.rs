use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("carousel cannot open on an empty image sequence")]
    EmptyCarousel,

    #[error("carousel is closed")]
    CarouselClosed,

    #[error("index {index} is out of range for {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown image: {0}")]
    UnknownImage(String),

    #[error("metadata refresh already in flight for {0}")]
    RefreshInFlight(String),
}
