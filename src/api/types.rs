use serde::{Deserialize, Serialize};

use crate::model::{ApiImage, ImageInfo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInformation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetadataResponse {
    pub image_information: ImageInformation,
}

impl From<ImageInformation> for ImageInfo {
    fn from(value: ImageInformation) -> Self {
        Self {
            title: value.title,
            description: value.detailed_description,
            tags: value.tags,
        }
    }
}
