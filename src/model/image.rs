use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::search::search_context;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Generated metadata of an image. `Missing` until the backend has described it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Option<ImageInfo>", into = "Option<ImageInfo>")]
pub enum ImageMetadata {
    #[default]
    Missing,
    Present(ImageInfo),
}

impl From<Option<ImageInfo>> for ImageMetadata {
    fn from(value: Option<ImageInfo>) -> Self {
        match value {
            Some(info) => Self::Present(info),
            None => Self::Missing,
        }
    }
}

impl From<ImageMetadata> for Option<ImageInfo> {
    fn from(value: ImageMetadata) -> Self {
        match value {
            ImageMetadata::Present(info) => Some(info),
            ImageMetadata::Missing => None,
        }
    }
}

impl ImageMetadata {
    pub fn info(&self) -> Option<&ImageInfo> {
        match self {
            Self::Present(info) => Some(info),
            Self::Missing => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiImage {
    pub name: String,
    pub url: String,
    #[serde(default, rename = "info")]
    pub metadata: ImageMetadata,
}

impl ApiImage {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            metadata: ImageMetadata::Missing,
        }
    }

    pub fn with_info(mut self, info: ImageInfo) -> Self {
        self.metadata = ImageMetadata::Present(info);
        self
    }

    pub fn info(&self) -> Option<&ImageInfo> {
        self.metadata.info()
    }

    pub fn display_title(&self) -> &str {
        first_non_empty(&[self.info().map(|info| info.title.as_str())]).unwrap_or(&self.name)
    }

    pub fn details_text(&self) -> &str {
        let info = self.info();
        first_non_empty(&[
            info.map(|info| info.description.as_str()),
            info.map(|info| info.title.as_str()),
            Some(self.name.as_str()),
        ])
        .unwrap_or_default()
    }

    pub fn alt_text(&self) -> &str {
        self.details_text()
    }

    /// Tags as shown on a card: comma-separated entries are split, trimmed,
    /// deduplicated and sorted.
    pub fn card_tags(&self) -> Vec<String> {
        let Some(info) = self.info() else {
            return Vec::new();
        };
        info.tags
            .iter()
            .flat_map(|tag| tag.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    api_image: ApiImage,
    search_context: String,
}

impl GalleryImage {
    pub fn new(api_image: ApiImage) -> Self {
        let search_context = search_context(&api_image);
        Self {
            api_image,
            search_context,
        }
    }

    pub fn api_image(&self) -> &ApiImage {
        &self.api_image
    }

    pub fn name(&self) -> &str {
        &self.api_image.name
    }

    pub fn search_context(&self) -> &str {
        &self.search_context
    }

    /// Replaces the metadata and rebuilds the search context from it.
    pub fn set_metadata(&mut self, metadata: ImageMetadata) {
        self.api_image.metadata = metadata;
        self.search_context = search_context(&self.api_image);
    }
}

impl From<ApiImage> for GalleryImage {
    fn from(api_image: ApiImage) -> Self {
        Self::new(api_image)
    }
}
