mod context;
mod error;
mod gallery_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use gallery_service::GalleryService;
