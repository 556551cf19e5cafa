use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::api::GalleryApi;
use crate::model::{ApiImage, ImageInfo};

use super::Result;

#[derive(Clone)]
pub struct GalleryService {
    api: Arc<dyn GalleryApi>,
}

impl std::fmt::Debug for GalleryService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("GalleryService").finish_non_exhaustive()
    }
}

impl GalleryService {
    pub fn new(api: Arc<dyn GalleryApi>) -> Self {
        Self { api }
    }

    pub fn load_images(&self) -> Result<Vec<ApiImage>> {
        Ok(self.api.fetch_images()?)
    }

    pub fn refresh_metadata(&self, name: &str) -> Result<ImageInfo> {
        Ok(self.api.refresh_metadata(name)?)
    }

    pub fn image_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.api.fetch_bytes(url)?)
    }

    /// Stores the original image behind `image` at `target`.
    pub fn download(&self, image: &ApiImage, target: impl AsRef<Path>) -> Result<u64> {
        let target = target.as_ref();
        let bytes = self.api.fetch_bytes(&image.url)?;
        fs::write(target, &bytes)?;
        log::info!(
            "saved {} ({} bytes) to {}",
            image.name,
            bytes.len(),
            target.display()
        );
        Ok(bytes.len() as u64)
    }
}
