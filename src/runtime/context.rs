use std::sync::Arc;

use crate::api::{GalleryApi, HttpGalleryApi};
use crate::config::GalleryConfig;
use crate::gallery::GalleryState;

use super::{GalleryService, Result};

#[derive(Debug, Clone)]
pub struct AppContext {
    config: GalleryConfig,
    gallery_service: GalleryService,
}

impl AppContext {
    pub fn new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;
        let api = HttpGalleryApi::new(config.base_url.clone(), config.request_timeout());
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: GalleryConfig, api: Arc<dyn GalleryApi>) -> Self {
        Self {
            config,
            gallery_service: GalleryService::new(api),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn gallery_service(&self) -> &GalleryService {
        &self.gallery_service
    }

    pub fn new_state(&self) -> GalleryState {
        GalleryState::new(self.config.pagination(), self.config.debouncer())
    }
}
