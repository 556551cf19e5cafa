mod client;
mod error;
mod types;


pub use client::{GalleryApi, HttpGalleryApi, MAX_IMAGE_BYTES, encode_uri_component};
pub use error::{ApiError, Result};
pub use types::{ImageInformation, ImagesResponse, UpdateMetadataResponse};
