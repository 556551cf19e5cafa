use std::io::Read;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::{ApiImage, ImageInfo};

use super::{ApiError, ImagesResponse, Result, UpdateMetadataResponse};

const IMAGES_PATH: &str = "/api/images";
pub const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Backend the gallery talks to. Calls block; run them off the UI thread.
pub trait GalleryApi: Send + Sync {
    fn fetch_images(&self) -> Result<Vec<ApiImage>>;

    /// Asks the backend to regenerate title, description and tags of `name`.
    fn refresh_metadata(&self, name: &str) -> Result<ImageInfo>;

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpGalleryApi {
    base_url: String,
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl HttpGalleryApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
            max_body_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Caps the size of image bodies; larger responses are rejected.
    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through, anything else is joined onto the base URL.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    pub fn images_url(&self) -> String {
        self.resolve(IMAGES_PATH)
    }

    pub fn metadata_url(&self, name: &str) -> String {
        self.resolve(&format!("{IMAGES_PATH}/{}/meta", encode_uri_component(name)))
    }

    fn send(&self, request: ureq::Request) -> Result<ureq::Response> {
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => return Err(transport.into()),
        };
        if response.status() != 200 {
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(ApiError::UnexpectedStatus { status, body });
        }
        Ok(response)
    }
}

impl GalleryApi for HttpGalleryApi {
    fn fetch_images(&self) -> Result<Vec<ApiImage>> {
        let url = self.images_url();
        log::debug!("GET {url}");
        let body = self.send(self.agent.get(&url))?.into_string()?;
        let response: ImagesResponse = serde_json::from_str(&body)?;
        log::info!("fetched {} images from {url}", response.images.len());
        Ok(response.images)
    }

    fn refresh_metadata(&self, name: &str) -> Result<ImageInfo> {
        let url = self.metadata_url(name);
        log::info!("PATCH {url}");
        let body = self.send(self.agent.request("PATCH", &url))?.into_string()?;
        let response: UpdateMetadataResponse = serde_json::from_str(&body)?;
        Ok(response.image_information.into())
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(url);
        let response = self.send(self.agent.get(&url))?;
        let limit = self.max_body_bytes;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)?;
        if bytes.len() as u64 > limit {
            log::warn!("{url} exceeds the {limit} byte limit");
            return Err(ApiError::TooLarge { limit });
        }
        Ok(bytes)
    }
}
