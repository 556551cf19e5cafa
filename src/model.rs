mod image;
mod search;


pub use image::{ApiImage, GalleryImage, ImageInfo, ImageMetadata};
pub use search::{
    MAX_QUERY_TOKENS, query_tokens, search_context, to_search_value, to_search_value_opt,
};
