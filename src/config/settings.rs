use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gallery::{DEFAULT_PAGE_SIZE, PaginationWindow, QueryDebouncer};

use super::{ConfigError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub base_url: String,
    pub page_size: usize,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub thumbnail_size: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: 300,
            request_timeout_secs: 30,
            thumbnail_size: 256,
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "base_url `{base_url}` must start with http:// or https://"
            )));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.thumbnail_size == 0 {
            return Err(ConfigError::Invalid(
                "thumbnail_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn pagination(&self) -> PaginationWindow {
        PaginationWindow::new(self.page_size)
    }

    pub fn debouncer(&self) -> QueryDebouncer {
        QueryDebouncer::new(self.debounce())
    }
}
